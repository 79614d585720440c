use std::future::Future;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::instrument;

use crate::{
    page::{DisplayTarget, TitleTarget},
    CLIENT,
};

/// Why a fetch failed. Only ever logged; every variant is handled the same.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("endpoint answered with status {0}")]
    Status(StatusCode),
    #[error("unreadable response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Retrieves an endpoint's body as text.
pub trait Transport: Sync {
    fn get_text(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(CLIENT.clone())
    }
}

impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.text().await.map_err(FetchError::Body)
    }
}

pub fn title_for(address: &str) -> String {
    format!("Your IP is {address}")
}

/// One best-effort fetch-and-display cycle.
///
/// On success the trimmed body becomes the target's text, the target is
/// revealed and, when a title target is given, the title is overwritten.
/// On failure a warning is logged and nothing is touched. Returns whether the
/// target was updated.
#[instrument(name = "fetch_address", skip(transport, target, title))]
pub async fn fetch_address<T, D>(
    transport: &T,
    url: &str,
    target: &D,
    title: Option<&dyn TitleTarget>,
) -> bool
where
    T: Transport,
    D: DisplayTarget + ?Sized,
{
    match transport.get_text(url).await {
        Ok(body) => {
            let address = body.trim();
            target.set_text(address);
            target.reveal();
            if let Some(title) = title {
                title.set_title(&title_for(address));
            }
            tracing::info!(address, "address resolved");
            true
        }
        Err(error) => {
            tracing::warn!("Request failed: {error}");
            false
        }
    }
}
