use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::arxiv;
use crate::record::Publication;

/// Class markers of a Scholar citations listing.
struct ListingSelectors {
    entry: Selector,
    title: Selector,
    gray: Selector,
    year: Selector,
    citations: Selector,
}

static SELECTORS: LazyLock<ListingSelectors> = LazyLock::new(|| ListingSelectors {
    entry: Selector::parse(".gsc_a_tr").unwrap(),
    title: Selector::parse(".gsc_a_at").unwrap(),
    gray: Selector::parse(".gs_gray").unwrap(),
    year: Selector::parse(".gsc_a_y").unwrap(),
    citations: Selector::parse(".gsc_a_c").unwrap(),
});

/// All entry rows in document order.
pub fn entries(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.select(&SELECTORS.entry)
}

/// Pull the fixed sub-fields out of one entry row.
///
/// A missing sub-element leaves its field empty; the row itself is never skipped.
pub fn extract(entry: ElementRef<'_>, base: Option<&Url>) -> Publication {
    let title_el = entry.select(&SELECTORS.title).next();
    let title = title_el.map(text_of).unwrap_or_default();
    let url = title_el
        .and_then(|a| a.value().attr("href"))
        .map(|href| resolve(href, base))
        .unwrap_or_default();
    if title_el.is_some() && url.is_empty() {
        debug!("Entry {:?} has no link target", title);
    }

    let authors = nth_text(entry, &SELECTORS.gray, 0);
    let journal = nth_text(entry, &SELECTORS.gray, 1);
    let year = nth_text(entry, &SELECTORS.year, 0);
    let citations = nth_text(entry, &SELECTORS.citations, 0);
    let arxiv_id = arxiv::detect(&title, &journal).unwrap_or_default();

    Publication {
        title,
        authors,
        journal,
        year,
        citations,
        url,
        arxiv_id,
        ..Default::default()
    }
}

fn nth_text(entry: ElementRef<'_>, selector: &Selector, n: usize) -> String {
    entry
        .select(selector)
        .nth(n)
        .map(text_of)
        .unwrap_or_default()
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Scholar hrefs are site-relative; absolute ones pass through `join` untouched.
fn resolve(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    match base.map(|b| b.join(href)) {
        Some(Ok(u)) => u.to_string(),
        Some(Err(e)) => {
            debug!("Could not resolve href {:?}: {}", href, e);
            href.to_string()
        }
        None => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(html: &str) -> Publication {
        let doc = Html::parse_document(html);
        let base = Url::parse("https://scholar.google.com").unwrap();
        let entry = entries(&doc).next().expect("one entry");
        extract(entry, Some(&base))
    }

    #[test]
    fn reads_fields_by_class_and_position() {
        let p = one(
            r#"<table><tbody><tr class="gsc_a_tr">
                <td class="gsc_a_t">
                  <a href="/citations?view_op=view_citation&amp;citation_for_view=X:abc" class="gsc_a_at"> Paper One </a>
                  <div class="gs_gray">D Morelli, A Author</div>
                  <div class="gs_gray">CVPR, 2023</div>
                </td>
                <td class="gsc_a_c"><a class="gsc_a_ac gs_ibl">12</a></td>
                <td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc gs_ibl">2023</span></td>
            </tr></tbody></table>"#,
        );
        assert_eq!(p.title, "Paper One");
        assert_eq!(p.authors, "D Morelli, A Author");
        assert_eq!(p.journal, "CVPR, 2023");
        assert_eq!(p.year, "2023");
        assert_eq!(p.citations, "12");
        assert_eq!(
            p.url,
            "https://scholar.google.com/citations?view_op=view_citation&citation_for_view=X:abc"
        );
    }

    #[test]
    fn link_comes_from_href_not_anchor_text() {
        let p = one(
            r#"<table><tr class="gsc_a_tr"><td>
                <a class="gsc_a_at" href="https://example.org/paper">Readable Title</a>
            </td></tr></table>"#,
        );
        assert_eq!(p.url, "https://example.org/paper");
        assert_ne!(p.url, p.title);
    }

    #[test]
    fn missing_sub_elements_leave_fields_empty() {
        let p = one(r#"<table><tr class="gsc_a_tr"><td>nothing here</td></tr></table>"#);
        assert_eq!(p, Publication::default());
    }

    #[test]
    fn anchor_without_href_has_empty_link() {
        let p = one(r#"<table><tr class="gsc_a_tr"><td><a class="gsc_a_at">T</a></td></tr></table>"#);
        assert_eq!(p.title, "T");
        assert_eq!(p.url, "");
    }

    #[test]
    fn arxiv_id_is_detected_from_venue() {
        let p = one(
            r#"<table><tr class="gsc_a_tr"><td>
                <a class="gsc_a_at" href="/x">Preprint</a>
                <div class="gs_gray">A B</div>
                <div class="gs_gray">arXiv preprint arXiv:2401.01234</div>
            </td></tr></table>"#,
        );
        assert_eq!(p.arxiv_id, "2401.01234");
    }
}
