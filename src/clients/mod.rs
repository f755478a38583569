pub mod slack;
pub mod xentral;
