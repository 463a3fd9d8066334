pub mod api;
pub mod contact_book;
pub mod errors;
pub mod models;
pub mod terminal;
pub mod validation;
