pub mod config_error;
pub mod store_error;
