use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_NAME: &str = "folio";
const ENV_PREFIX: &str = "FOLIO";

/// Runtime settings: built-in defaults, then `folio.toml`, then `FOLIO_*` env vars.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scholar_user: String,
    pub scholar_base_url: String,
    pub page_size: usize,
    pub max_pages: usize,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub data_file: PathBuf,
    pub out_dir: PathBuf,
    /// URL prefix the site is served under, e.g. `/portfolio`. Empty for root.
    pub base_path: String,
    pub site_url: String,
    /// Stylesheets linked from every page. Site-relative paths get `base_path`.
    pub stylesheets: Vec<String>,
    pub profile: Profile,
}

/// What the landing page says about the author.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub affiliations: Vec<String>,
    pub image: String,
    pub description: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scholar_user: "UJ4D3rYAAAAJ".into(),
            scholar_base_url: "https://scholar.google.com".into(),
            page_size: 100,
            max_pages: 5,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .into(),
            timeout_secs: 10,
            data_file: PathBuf::from("publications.json"),
            out_dir: PathBuf::from("public"),
            base_path: "/portfolio".into(),
            site_url: "http://localhost:8000".into(),
            stylesheets: vec![
                "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css".into(),
                "css/globals.css".into(),
            ],
            profile: Profile::default(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Davide Morelli".into(),
            role: "PhD Student".into(),
            affiliations: vec![
                "University of Modena and Reggio Emilia".into(),
                "University of Pisa".into(),
            ],
            image: "/images/davide.jpg".into(),
            description: "My portfolio website".into(),
        }
    }
}

impl Settings {
    /// Load settings. An explicit `path` must exist; the default `folio.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        ensure!(settings.page_size > 0, "page_size must be at least 1");
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `base_path` joined with a site-relative path, always starting with `/`.
    pub fn href(&self, path: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Like [`Settings::href`], but absolute `http(s)://` URLs pass through.
    pub fn asset_href(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            self.href(path)
        }
    }
}

// ── Tests ──
