use contacts_client::{
    api::{DEFAULT_API_URL, HttpContactsApi},
    contact_book::ContactBook,
    terminal::Terminal,
};
use dotenvy::dotenv;
use env_logger::Env;
use log::error;
use std::{env, io};
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let api_url = env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let book = ContactBook::new(HttpContactsApi::new(&api_url));
    let mut terminal = Terminal::new(book, BufReader::new(tokio::io::stdin()), io::stdout());

    if let Err(error) = terminal.run().await {
        error!("Terminal closed: {error}");
    }
}
