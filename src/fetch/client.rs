// src/fetch/client.rs
use reqwest::header;

use crate::utils::error::FetchError;

/// Creates a reqwest client that identifies itself with `user_agent`.
fn build_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent) // Several sources reject non-browser agents
        .build()
}

/// Downloads a page and returns its body along with the final URL after redirects,
/// which is the base relative image references resolve against.
pub async fn download_page(url: &str, user_agent: &str) -> Result<(String, String), FetchError> {
    let client = build_client(user_agent)?;

    tracing::info!("Downloading page from: {}", url);
    tracing::debug!("Using User-Agent: {}", user_agent);

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - check User-Agent.");
            return Err(FetchError::Forbidden(url.to_string()));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let final_url = response.url().to_string();
    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), final_url);

    Ok((body, final_url))
}
