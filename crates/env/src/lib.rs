use std::{env::var, sync::Arc};

use dotenv::dotenv;
use eyre::{Context, Error};
use log::info;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4000";

#[derive(Clone)]
pub struct Env(Arc<EnvInner>);

#[derive(Clone)]
pub struct EnvInner {
    mongo_url: String,
    listen_addr: String,
}

impl Env {
    pub fn mongo_url(&self) -> &str {
        &self.0.mongo_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.0.listen_addr
    }

    pub fn load() -> Result<Env, Error> {
        if dotenv().is_err() {
            info!("No .env file found, reading the process environment");
        }

        Ok(Env(Arc::new(EnvInner {
            mongo_url: var("MONGO_URL").context("MONGO_URL is not set")?,
            listen_addr: var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_owned()),
        })))
    }
}
