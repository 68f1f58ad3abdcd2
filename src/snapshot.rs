use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::error::FetchError;
use crate::record::Publication;
use crate::scholar;

/// Where a previously written `publications.json` lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    File(PathBuf),
    Url(String),
}

impl SnapshotSource {
    /// `http://` and `https://` are URLs; anything else is a local path.
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            SnapshotSource::Url(s.to_string())
        } else {
            SnapshotSource::File(PathBuf::from(s))
        }
    }

    /// True when loading goes over the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, SnapshotSource::Url(_))
    }
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::File(p) => write!(f, "{}", p.display()),
            SnapshotSource::Url(u) => f.write_str(u),
        }
    }
}

/// Load a snapshot. Missing file, HTTP error status and bad JSON are all failures.
pub async fn load(
    client: &reqwest::Client,
    source: &SnapshotSource,
) -> Result<Vec<Publication>, FetchError> {
    let body = match source {
        SnapshotSource::File(path) => fs::read_to_string(path).map_err(|e| FetchError::Io {
            path: path.clone(),
            source: e,
        })?,
        SnapshotSource::Url(url) => scholar::fetch_text(client, url).await?,
    };
    let publications: Vec<Publication> = serde_json::from_str(&body)?;
    info!("Loaded {} publications from {}", publications.len(), source);
    Ok(publications)
}

/// Records already on disk, or none if the file doesn't exist yet.
pub fn load_existing(path: &Path) -> Result<Vec<Publication>> {
    match fs::read_to_string(path) {
        Ok(body) => serde_json::from_str(&body)
            .with_context(|| format!("Malformed snapshot {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Write pretty-printed JSON (2-space indent, non-ASCII kept as is).
pub fn save(path: &Path, publications: &[Publication]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(publications)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {} publications to {}", publications.len(), path.display());
    Ok(())
}

// ── Tests ──
