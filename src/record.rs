use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// One publication as scraped or as stored in `publications.json`.
///
/// Every field is plain text. Loading is lenient: a missing key, `null`, or a
/// bare number all become text, so a hand-edited snapshot never fails to load
/// over a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub authors: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub journal: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
    #[serde(default, alias = "citationCount", deserialize_with = "lenient_text")]
    pub citations: String,
    #[serde(default, alias = "link", deserialize_with = "lenient_text")]
    pub url: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub pdf_url: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        serialize_with = "empty_as_null"
    )]
    pub arxiv_id: String,
    #[serde(
        rename = "abstract",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub abstract_text: String,
}

impl Publication {
    /// Year used for ordering; see [`sort_year`].
    pub fn sort_year(&self) -> i64 {
        sort_year(&self.year)
    }
}

/// Leading integer of `year`, the way a browser's `parseInt` reads it.
/// Empty, `"N/A"` and other non-numeric text count as 0 and sort last.
/// Digit runs too long for `i64` saturate instead of collapsing to 0.
pub fn sort_year(year: &str) -> i64 {
    let Some(caps) = LEADING_INT_RE.captures(year) else {
        return 0;
    };
    let digits = &caps[1];
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn empty_as_null<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(value)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_year_reads_leading_integer() {
        assert_eq!(sort_year("2023"), 2023);
        assert_eq!(sort_year(" 2021 "), 2021);
        assert_eq!(sort_year("2019a"), 2019);
        assert_eq!(sort_year(""), 0);
        assert_eq!(sort_year("N/A"), 0);
        assert_eq!(sort_year("circa 2020"), 0);
        assert_eq!(sort_year("-5"), -5);
    }

    #[test]
    fn oversized_year_saturates() {
        assert_eq!(sort_year("99999999999999999999"), i64::MAX);
        assert_eq!(sort_year("+99999999999999999999 AD"), i64::MAX);
        assert_eq!(sort_year("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn lenient_load_accepts_null_numbers_and_missing() {
        let json = r#"{"title": "A", "year": 2021, "arxiv_id": null, "citations": 7}"#;
        let p: Publication = serde_json::from_str(json).unwrap();
        assert_eq!(p.title, "A");
        assert_eq!(p.year, "2021");
        assert_eq!(p.citations, "7");
        assert_eq!(p.arxiv_id, "");
        assert_eq!(p.authors, "");
        assert_eq!(p.abstract_text, "");
    }

    #[test]
    fn accepts_scrape_field_aliases() {
        let json = r#"{"title": "A", "link": "https://x", "citationCount": "3"}"#;
        let p: Publication = serde_json::from_str(json).unwrap();
        assert_eq!(p.url, "https://x");
        assert_eq!(p.citations, "3");
    }

    #[test]
    fn abstract_key_maps_to_abstract_text() {
        let p: Publication = serde_json::from_str(r#"{"abstract": "We study..."}"#).unwrap();
        assert_eq!(p.abstract_text, "We study...");
    }

    #[test]
    fn empty_arxiv_serializes_as_null_and_optional_fields_are_skipped() {
        let p = Publication {
            title: "A".into(),
            year: "2024".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["arxiv_id"], Value::Null);
        assert!(v.get("pdf_url").is_none());
        assert!(v.get("abstract").is_none());
        assert_eq!(v["year"], "2024");
    }
}
