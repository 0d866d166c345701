// src/fetch/mod.rs
pub mod client;

use std::path::Path;

use url::Url;

use crate::utils::error::FetchError;

/// Raw page markup and the URL it should be treated as living at.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub html: String,
    pub url: String,
}

/// Loads a page from an http(s) URL or a local file path.
///
/// Fetched pages always live at their final URL after redirects. Local files
/// resolve relative references against `base_url` when given, otherwise
/// against the file's own `file://` URL.
pub async fn load_page(
    location: &str,
    base_url: Option<&str>,
    user_agent: &str,
) -> Result<LoadedPage, FetchError> {
    if is_remote(location) {
        if let Some(base) = base_url {
            tracing::warn!("Ignoring base URL {} for fetched page {}", base, location);
        }
        let (html, final_url) = client::download_page(location, user_agent).await?;
        return Ok(LoadedPage { html, url: final_url });
    }

    let path = Path::new(location);
    let html = tokio::fs::read_to_string(path).await?;
    let url = match base_url {
        Some(base) => base.to_string(),
        None => {
            let absolute = tokio::fs::canonicalize(path).await?;
            Url::from_file_path(&absolute)
                .map_err(|_| FetchError::InvalidLocation(location.to_string()))?
                .to_string()
        }
    };
    tracing::debug!("Loaded {} bytes from local file {}", html.len(), location);

    Ok(LoadedPage { html, url })
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
