use contacts_server::{config::Config, http, store};
use dotenvy::dotenv;
use env_logger::Env;
use log::error;
use std::process;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            error!("{error}");
            process::exit(1);
        }
    };

    let store = match store::open(&config).await {
        Ok(store) => store,
        Err(error) => {
            error!("Could not open contact store: {error}");
            process::exit(1);
        }
    };

    let app = http::router(store, config.frontend_url.clone());
    http::listen(config.port, app).await
}
