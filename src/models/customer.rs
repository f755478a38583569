use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::{probe, probe_string};

// Alternative locations per attribute in a Xentral customer record,
// tried in order; first present non-null value wins.
const NAME_PATHS: &[&[&str]] = &[
    &["name"],
    &["firmenname"],
    &["fullname"],
    &["company"],
    &["adresse", "name"],
];
const EMAIL_PATHS: &[&[&str]] = &[&["email"], &["adresse", "email"]];
const PHONE_PATHS: &[&[&str]] = &[&["telefon"], &["phone"], &["adresse", "telefon"]];
const ADDRESS_PATHS: &[&[&str]] = &[&["adresse"]];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Value>,
}

impl CustomerInfo {
    /// Builds customer info from a raw API record, already unwrapped from any
    /// `data` envelope. Attributes with no matching field stay `None`.
    pub fn from_record(record: &Value) -> Self {
        Self {
            name: probe_string(record, NAME_PATHS),
            email: probe_string(record, EMAIL_PATHS),
            phone: probe_string(record, PHONE_PATHS),
            address: probe(record, ADDRESS_PATHS).cloned(),
        }
    }
}
