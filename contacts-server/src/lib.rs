pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod store;
