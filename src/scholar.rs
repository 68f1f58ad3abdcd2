use reqwest::Client;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::parser;
use crate::record::Publication;
use crate::settings::Settings;

/// HTTP client with the browser User-Agent Scholar expects.
pub fn client(settings: &Settings) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.timeout())
        .build()
}

/// Public profile link, used as the fallback when the listing can't be loaded.
pub fn profile_link(settings: &Settings) -> String {
    format!(
        "{}/citations?user={}",
        settings.scholar_base_url.trim_end_matches('/'),
        settings.scholar_user
    )
}

fn page_url(settings: &Settings, cstart: usize) -> String {
    format!(
        "{}&hl=en&cstart={}&pagesize={}",
        profile_link(settings),
        cstart,
        settings.page_size
    )
}

/// Fetch and parse the whole citations listing.
///
/// Pages are requested until one comes back short or `max_pages` is reached.
/// Any failed page fails the whole call: no retry, no partial result.
pub async fn fetch_profile(
    client: &Client,
    settings: &Settings,
) -> Result<Vec<Publication>, FetchError> {
    let mut publications = Vec::new();

    for page in 0..settings.max_pages.max(1) {
        let url = page_url(settings, page * settings.page_size);
        info!("Fetching citations page: {}", url);
        let html = fetch_text(client, &url).await?;

        let found = parser::parse_profile(&html, &settings.scholar_base_url);
        info!("Page {}: {} entries", page + 1, found.len());
        // a zero page size never advances cstart; one page is all there is
        let short = settings.page_size == 0 || found.len() < settings.page_size;
        publications.extend(found);
        if short {
            break;
        }
        if page + 1 == settings.max_pages {
            warn!(
                "Stopped after {} pages; listing may continue past {} entries",
                settings.max_pages,
                publications.len()
            );
        }
    }

    info!("Extracted {} publications", publications.len());
    Ok(publications)
}

/// GET `url` and return the body, treating any non-2xx status as a failure.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::network(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::network(url, e))
}

// ── Tests ──
