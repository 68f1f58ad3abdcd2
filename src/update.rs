use std::fmt;
use std::path::Path;

use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use crate::record::Publication;
use crate::settings::Settings;
use crate::{scholar, snapshot};

/// What a refresh of `publications.json` ended up doing.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Saved(usize),
    KeptExisting(usize),
    WroteSample,
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::Saved(n) => write!(f, "Saved {} publications.", n),
            UpdateOutcome::KeptExisting(n) => {
                write!(f, "Scrape failed; kept {} existing publications.", n)
            }
            UpdateOutcome::WroteSample => f.write_str(
                "Scrape failed and no snapshot exists; wrote a sample entry. \
                 Edit it by hand or fix the scraper.",
            ),
        }
    }
}

/// Refresh the snapshot from the live profile.
///
/// A failed or empty scrape never clobbers a snapshot that has records.
pub async fn run(client: &Client, settings: &Settings, path: &Path) -> Result<UpdateOutcome> {
    match scholar::fetch_profile(client, settings).await {
        Ok(pubs) if !pubs.is_empty() => {
            snapshot::save(path, &pubs)?;
            return Ok(UpdateOutcome::Saved(pubs.len()));
        }
        Ok(_) => warn!("Profile page parsed but had no entries (markup change or rate limit?)"),
        Err(e) => warn!("Could not fetch publications: {}", e),
    }

    let existing = snapshot::load_existing(path)?;
    if !existing.is_empty() {
        info!("Keeping {} existing publications in {}", existing.len(), path.display());
        return Ok(UpdateOutcome::KeptExisting(existing.len()));
    }

    snapshot::save(path, &[sample(settings)])?;
    Ok(UpdateOutcome::WroteSample)
}

fn sample(settings: &Settings) -> Publication {
    Publication {
        title: "Sample Publication Title".into(),
        authors: "D Morelli, A Author, B Author".into(),
        journal: "Conference/Journal Name, 2024".into(),
        year: "2024".into(),
        citations: "0".into(),
        url: scholar::profile_link(settings),
        ..Default::default()
    }
}

// ── Tests ──
