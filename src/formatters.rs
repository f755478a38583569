use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::{
    clients::xentral::CustomerClient,
    models::message::{Block, SlackMessage},
    utils::probe_display,
};

pub const CUSTOMER_CREATED: &str = "com.xentral.customers.created.v2";

/// Maps an event type to its formatter and produces the Slack message.
///
/// Every type resolves to a formatter: unrecognized types take the
/// customer-created shape, which tolerates arbitrary bodies. Only the
/// customer-created formatter may reach out to the Xentral API, when the
/// payload carries an id but no display name.
pub async fn format_event(
    event_type: &str,
    body: &Value,
    customers: &CustomerClient,
) -> SlackMessage {
    match event_type {
        CUSTOMER_CREATED => customer_created(body, customers).await,
        "order.created" => order_created(body),
        "invoice.created" => invoice_created(body),
        "payment.received" => payment_received(body),
        "report.exported" => report_exported(body),
        "report.viewed" => report_viewed(body),
        "exporter.executed" => exporter_executed(body),
        other => {
            debug!(event_type = other, "No dedicated formatter, falling back to customer-created");
            customer_created(body, customers).await
        }
    }
}

const CREATED_AT_PATHS: &[&[&str]] = &[&["createdAt"], &["created_at"]];

fn event_time(body: &Value) -> String {
    probe_display(body, CREATED_AT_PATHS).unwrap_or_else(|| Utc::now().to_rfc3339())
}

fn currency(amount: Option<String>) -> Option<String> {
    amount.map(|a| format!("€{a}"))
}

/// Appends `<prefix><value>` to the summary line when the value is present.
fn push_clause(text: &mut String, prefix: &str, value: Option<&String>) {
    if let Some(value) = value {
        text.push_str(prefix);
        text.push_str(value);
    }
}

const CUSTOMER_ID_PATHS: &[&[&str]] = &[
    &["customerId"],
    &["id"],
    &["adresseId"],
    &["addressId"],
];
const CUSTOMER_NAME_PATHS: &[&[&str]] = &[
    &["name"],
    &["customer", "name"],
    &["firmenname"],
    &["fullname"],
    &["company"],
    &["customerName"],
    &["data", "name"],
    &["data", "customer", "name"],
    &["data", "firmenname"],
];

async fn customer_created(body: &Value, customers: &CustomerClient) -> SlackMessage {
    let customer_id = probe_display(body, CUSTOMER_ID_PATHS);
    let created_at = event_time(body);

    let mut customer_name = probe_display(body, CUSTOMER_NAME_PATHS);

    // The creation payload often omits the name; resolve it through the API
    // when an id is available.
    if customer_name.is_none() {
        customer_name = customers
            .lookup(customer_id.as_deref())
            .await
            .and_then(|info| info.name);
    }

    let mut text = String::from("New Customer Created");
    push_clause(&mut text, " #", customer_id.as_ref());
    push_clause(&mut text, " – ", customer_name.as_ref());

    SlackMessage::new(
        text,
        vec![
            Block::header("New Customer Created"),
            Block::field_section(&[
                ("Customer ID", customer_id),
                ("Name", customer_name),
                ("Created At", Some(created_at)),
            ]),
        ],
    )
}

const ORDER_ID_PATHS: &[&[&str]] = &[&["id"], &["orderId"]];
const BUYER_NAME_PATHS: &[&[&str]] = &[&["customer", "name"], &["customerName"]];
const TOTAL_PATHS: &[&[&str]] = &[&["total"], &["amount"]];

fn order_created(body: &Value) -> SlackMessage {
    let order_id = probe_display(body, ORDER_ID_PATHS);
    let customer_name = probe_display(body, BUYER_NAME_PATHS);
    let total = probe_display(body, TOTAL_PATHS);
    let created_at = event_time(body);

    let mut text = String::from("📦 New Order Created");
    push_clause(&mut text, " #", order_id.as_ref());
    push_clause(&mut text, " for ", customer_name.as_ref());

    SlackMessage::new(
        text,
        vec![
            Block::header("📦 New Order Created"),
            Block::field_section(&[
                ("Order ID", order_id),
                ("Customer", customer_name),
                ("Total", currency(total)),
                ("Created At", Some(created_at)),
            ]),
        ],
    )
}

const INVOICE_ID_PATHS: &[&[&str]] = &[&["id"], &["invoiceId"]];
const AMOUNT_PATHS: &[&[&str]] = &[&["amount"], &["total"]];

fn invoice_created(body: &Value) -> SlackMessage {
    let invoice_id = probe_display(body, INVOICE_ID_PATHS);
    let customer_name = probe_display(body, BUYER_NAME_PATHS);
    let amount = probe_display(body, AMOUNT_PATHS);
    let created_at = event_time(body);

    let mut text = String::from("🧾 New Invoice Created");
    push_clause(&mut text, " #", invoice_id.as_ref());
    push_clause(&mut text, " for ", customer_name.as_ref());

    SlackMessage::new(
        text,
        vec![
            Block::header("🧾 New Invoice Created"),
            Block::field_section(&[
                ("Invoice ID", invoice_id),
                ("Customer", customer_name),
                ("Amount", currency(amount)),
                ("Created At", Some(created_at)),
            ]),
        ],
    )
}

const PAYMENT_ID_PATHS: &[&[&str]] = &[&["id"], &["paymentId"]];
const METHOD_PATHS: &[&[&str]] = &[&["method"], &["paymentMethod"]];

fn payment_received(body: &Value) -> SlackMessage {
    let payment_id = probe_display(body, PAYMENT_ID_PATHS);
    let customer_name = probe_display(body, BUYER_NAME_PATHS);
    let amount = probe_display(body, AMOUNT_PATHS);
    let method = probe_display(body, METHOD_PATHS);
    let received_at = event_time(body);

    let mut text = String::from("💰 Payment Received");
    push_clause(&mut text, " #", payment_id.as_ref());
    push_clause(&mut text, " from ", customer_name.as_ref());

    SlackMessage::new(
        text,
        vec![
            Block::header("💰 Payment Received"),
            Block::field_section(&[
                ("Payment ID", payment_id),
                ("Customer", customer_name),
                ("Amount", currency(amount)),
                ("Method", method),
                ("Received At", Some(received_at)),
            ]),
        ],
    )
}

const REPORT_NAME_PATHS: &[&[&str]] = &[&["name"], &["reportName"], &["title"]];
const REPORT_TYPE_PATHS: &[&[&str]] = &[&["type"], &["reportType"]];
const EXPORT_FORMAT_PATHS: &[&[&str]] = &[&["format"], &["exportFormat"]];
const EXPORTED_BY_PATHS: &[&[&str]] = &[&["user"], &["exportedBy"], &["username"]];

fn report_exported(body: &Value) -> SlackMessage {
    let report_name = probe_display(body, REPORT_NAME_PATHS);
    let report_type = probe_display(body, REPORT_TYPE_PATHS);
    let export_format = probe_display(body, EXPORT_FORMAT_PATHS);
    let exported_by = probe_display(body, EXPORTED_BY_PATHS);
    let exported_at = event_time(body);

    let mut text = String::from("📊 Report Exported");
    push_clause(&mut text, ": ", report_name.as_ref());

    SlackMessage::new(
        text,
        vec![
            Block::header("📊 Report Exported"),
            Block::field_section(&[
                ("Report Name", report_name),
                ("Report Type", report_type),
                ("Format", export_format),
                ("Exported By", exported_by),
                ("Exported At", Some(exported_at)),
            ]),
        ],
    )
}

const VIEWED_BY_PATHS: &[&[&str]] = &[&["user"], &["viewedBy"], &["username"]];

fn report_viewed(body: &Value) -> SlackMessage {
    let report_name = probe_display(body, REPORT_NAME_PATHS);
    let viewed_by = probe_display(body, VIEWED_BY_PATHS);
    let viewed_at = event_time(body);

    let mut text = String::from("👁️ Report Viewed");
    push_clause(&mut text, ": ", report_name.as_ref());

    SlackMessage::new(
        text,
        vec![
            Block::header("👁️ Report Viewed"),
            Block::field_section(&[
                ("Report Name", report_name),
                ("Viewed By", viewed_by),
                ("Viewed At", Some(viewed_at)),
            ]),
        ],
    )
}

const EXPORTER_NAME_PATHS: &[&[&str]] = &[&["name"], &["exporterName"], &["title"]];
const EXECUTED_BY_PATHS: &[&[&str]] = &[&["user"], &["executedBy"], &["username"]];
const STATUS_PATHS: &[&[&str]] = &[&["status"]];

fn exporter_executed(body: &Value) -> SlackMessage {
    let exporter_name = probe_display(body, EXPORTER_NAME_PATHS);
    let executed_by = probe_display(body, EXECUTED_BY_PATHS);
    let status = probe_display(body, STATUS_PATHS);
    let executed_at = event_time(body);

    let mut text = String::from("📤 Exporter Executed");
    push_clause(&mut text, ": ", exporter_name.as_ref());

    SlackMessage::new(
        text,
        vec![
            Block::header("📤 Exporter Executed"),
            Block::field_section(&[
                ("Exporter Name", exporter_name),
                ("Executed By", executed_by),
                ("Status", status),
                ("Executed At", Some(executed_at)),
            ]),
        ],
    )
}
