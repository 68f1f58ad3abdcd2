pub mod arxiv;
pub mod entries;

use scraper::Html;
use url::Url;

use crate::record::Publication;

/// Citations listing HTML → publications, one per entry row, in document order.
///
/// Relative title links are resolved against `base_url`. Malformed markup is
/// tolerated and just yields fewer (or zero) rows.
pub fn parse_profile(html: &str, base_url: &str) -> Vec<Publication> {
    let base = Url::parse(base_url).ok();
    let document = Html::parse_document(html);
    entries::entries(&document)
        .map(|entry| entries::extract(entry, base.as_ref()))
        .collect()
}

// ── Tests ──
