pub mod api;
pub mod clients;
pub mod config;
pub mod formatters;
pub mod models;
pub mod utils;
