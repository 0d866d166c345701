// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::models::PageExtraction;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Directory holding every output file for `source`.
    pub fn source_dir(&self, source: &str) -> PathBuf {
        self.base_dir.join(source)
    }

    /// Saves the extracted record as pretty JSON: /base_dir/source/slug.json
    pub fn save_extraction(&self, extraction: &PageExtraction) -> Result<PathBuf, StorageError> {
        let file_name = format!("{}.json", page_slug(&extraction.url));
        let file_path = self.target_path(&extraction.source, &file_name)?;

        let json = serde_json::to_string_pretty(extraction)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved extraction to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves a summary of the extraction next to it: /base_dir/source/slug_meta.json
    pub fn save_extraction_metadata(
        &self,
        extraction: &PageExtraction,
    ) -> Result<PathBuf, StorageError> {
        let file_name = format!("{}_meta.json", page_slug(&extraction.url));
        let file_path = self.target_path(&extraction.source, &file_name)?;

        let metadata = serde_json::json!({
            "source": extraction.source,
            "url": extraction.url,
            "label_count": extraction.record.label_count(),
            "image_count": extraction.record.image_count(),
            "extracted_at": extraction.extracted_at,
            "saved_at": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the raw page markup for debugging: /base_dir/source/debug/slug.html
    pub fn save_raw_page(&self, source: &str, url: &str, html: &str) -> Result<PathBuf, StorageError> {
        let debug_dir = self.source_dir(source).join("debug");
        fs::create_dir_all(&debug_dir).map_err(StorageError::IoError)?;

        let file_path = debug_dir.join(format!("{}.html", page_slug(url)));
        fs::write(&file_path, html).map_err(StorageError::IoError)?;

        tracing::info!("Saved raw page to {}", file_path.display());
        Ok(file_path)
    }

    fn target_path(&self, source: &str, file_name: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.source_dir(source);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir.join(file_name))
    }
}

/// File-name-safe name for a page: its last path segment, or its host.
pub fn page_slug(url: &str) -> String {
    let raw = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string))
            .or_else(|| parsed.host_str().map(str::to_string))
            .unwrap_or_default(),
        Err(_) => url.to_string(),
    };

    let slug: String = raw
        .trim_end_matches(".html")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}
