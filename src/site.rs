use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::render::{page, Listing};
use crate::settings::Settings;
use crate::sitemap;

const RESEARCH_SCRIPT: &str = include_str!("../assets/research.js");

/// Files written by a build.
pub struct BuildReport {
    pub files: Vec<PathBuf>,
    pub publications: usize,
}

/// Write the static site into `out_dir`.
pub fn build(
    settings: &Settings,
    listing: &Listing,
    out_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<BuildReport> {
    let mut files = Vec::new();

    write(out_dir, "index.html", &page::home(settings), &mut files)?;
    write(
        out_dir,
        "research/index.html",
        &page::research(settings, listing, generated_at),
        &mut files,
    )?;
    write(out_dir, page::SCRIPT_PATH, RESEARCH_SCRIPT, &mut files)?;

    let sitemap = sitemap::write_urlset(&sitemap::page_urls(settings), generated_at)?;
    write(out_dir, "sitemap.xml", &sitemap, &mut files)?;

    let publications = listing.fragments().len();
    info!(
        "Built {} files into {} ({} publications)",
        files.len(),
        out_dir.display(),
        publications
    );
    Ok(BuildReport {
        files,
        publications,
    })
}

fn write(out_dir: &Path, rel: &str, contents: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let path = out_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    files.push(path);
    Ok(())
}

// ── Tests ──
