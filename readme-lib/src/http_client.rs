use crate::error::ReadmeError;
use crate::logging_middleware::LoggingMiddleware;
use crate::result::ReadmeResult;
use anyhow::anyhow;
use log::Level;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use std::time::Duration;

pub(crate) fn build_client(timeout: Duration) -> ReadmeResult<ClientWithMiddleware> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ReadmeError::Other(anyhow!(e)))?;
    Ok(ClientBuilder::new(client)
        .with(LoggingMiddleware::new(Level::Debug))
        .build())
}
