//! Source-feed acquisition: download the order feed to a local file the
//! pipeline can stream from.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("feed url has no file name component: {url}")]
    NoFileName { url: String },

    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to save feed to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feed download did not produce a file: {url}")]
    NotDownloaded { url: String },
}

/// Fetches the feed at `url` and persists it as
/// `destination_dir/<basename(url)>`, returning the local path.
pub fn download_feed(url: &str, destination_dir: impl AsRef<Path>) -> Result<PathBuf, FetchError> {
    let file_name = url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FetchError::NoFileName {
            url: url.to_string(),
        })?;
    let destination = destination_dir.as_ref().join(file_name);

    let body = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    std::fs::write(&destination, &body).map_err(|source| FetchError::Save {
        path: destination.clone(),
        source,
    })?;

    if !destination.exists() {
        return Err(FetchError::NotDownloaded {
            url: url.to_string(),
        });
    }

    tracing::info!(
        url,
        path = %destination.display(),
        bytes = body.len(),
        "feed downloaded"
    );
    Ok(destination)
}
