use std::sync::LazyLock;

use regex::Regex;

static ARXIV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)arxiv[:\s]*(\d{4}\.\d{4,5})").unwrap());

/// Find a new-style arXiv identifier (`2301.01234`) mentioned in title or venue.
pub fn detect(title: &str, journal: &str) -> Option<String> {
    let haystack = format!("{} {}", title, journal);
    ARXIV_RE
        .captures(&haystack)
        .map(|caps| caps[1].to_string())
}
