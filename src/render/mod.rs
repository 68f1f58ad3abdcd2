pub mod fragment;
pub mod page;

use quick_xml::escape::escape;
use tracing::error;

use crate::error::FetchError;
use crate::record::Publication;
use fragment::Fragment;

pub const EMPTY_MESSAGE: &str = "No publications found. Please check back later.";

/// Newest first. `sort_by` is stable, so equal years keep their input order.
pub fn present(publications: &[Publication]) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = publications.iter().map(Fragment::from_record).collect();
    fragments.sort_by(|a, b| b.sort_year.cmp(&a.sort_year));
    fragments
}

/// Rendered publications plus the per-fragment abstract state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchView {
    fragments: Vec<Fragment>,
}

impl ResearchView {
    pub fn new(publications: &[Publication]) -> Self {
        Self {
            fragments: present(publications),
        }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Flip one fragment's abstract. `None` if out of range or it has no abstract.
    pub fn toggle_abstract(&mut self, index: usize) -> Option<bool> {
        self.fragments
            .get_mut(index)?
            .abstract_panel
            .as_mut()
            .map(|panel| panel.toggle())
    }
}

/// What the research page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Publications(ResearchView),
    /// Loaded fine, nothing in it.
    Empty,
    /// Loading failed; point readers at the external profile instead.
    Unavailable { profile_link: String },
}

/// Turn a load attempt into a listing. Failures are logged here and go no further.
pub fn listing(loaded: Result<Vec<Publication>, FetchError>, profile_link: &str) -> Listing {
    match loaded {
        Ok(pubs) if pubs.is_empty() => Listing::Empty,
        Ok(pubs) => Listing::Publications(ResearchView::new(&pubs)),
        Err(e) => {
            error!("Error loading publications: {}", e);
            Listing::Unavailable {
                profile_link: profile_link.to_string(),
            }
        }
    }
}

impl Listing {
    pub fn fragments(&self) -> &[Fragment] {
        match self {
            Listing::Publications(view) => view.fragments(),
            _ => &[],
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Listing::Publications(view) => view
                .fragments()
                .iter()
                .map(Fragment::to_html)
                .collect(),
            Listing::Empty => format!("<div class=\"error\">{}</div>\n", EMPTY_MESSAGE),
            Listing::Unavailable { profile_link } => format!(
                "<div class=\"error\">\n  <p>Unable to load publications at this time.</p>\n  \
                 <p>Please visit my <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Google Scholar profile</a>.</p>\n</div>\n",
                escape(profile_link)
            ),
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scholar;
    use crate::settings::Settings;
    use crate::snapshot::{self, SnapshotSource};

    fn p(title: &str, year: &str) -> Publication {
        Publication {
            title: title.into(),
            year: year.into(),
            ..Default::default()
        }
    }

    fn titles(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(|f| f.title.as_str()).collect()
    }

    fn count_items(html: &str) -> usize {
        html.matches("class=\"publication-item\"").count()
    }

    #[test]
    fn newest_first_with_blank_year_last() {
        let out = present(&[p("A", "2020"), p("B", "2023"), p("C", "")]);
        assert_eq!(titles(&out), ["B", "A", "C"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let out = present(&[
            p("first", "2021"),
            p("x", "N/A"),
            p("second", "2021"),
            p("newest", "2024"),
            p("third", "2021"),
            p("y", "soon"),
        ]);
        assert_eq!(titles(&out), ["newest", "first", "second", "third", "x", "y"]);
    }

    #[test]
    fn output_is_non_increasing_and_same_length() {
        let years = ["1999", "", "2010", "abc", "2010", "2024", "7", "N/A", "2001"];
        let input: Vec<_> = years.iter().enumerate().map(|(i, y)| p(&i.to_string(), y)).collect();
        let out = present(&input);
        assert_eq!(out.len(), input.len());
        assert!(out.windows(2).all(|w| w[0].sort_year >= w[1].sort_year));
    }

    #[test]
    fn empty_input_renders_one_empty_state() {
        let l = listing(Ok(Vec::new()), "https://scholar.google.com/citations?user=X");
        assert_eq!(l, Listing::Empty);
        let html = l.to_html();
        assert_eq!(html.matches("class=\"error\"").count(), 1);
        assert!(html.contains(EMPTY_MESSAGE));
        assert_eq!(count_items(&html), 0);
    }

    #[test]
    fn listing_renders_in_display_order() {
        let l = listing(Ok(vec![p("A", "2020"), p("B", "2023"), p("C", "")]), "unused");
        let html = l.to_html();
        assert_eq!(count_items(&html), 3);
        let (a, b, c) = (
            html.find(">A<").unwrap(),
            html.find(">B<").unwrap(),
            html.find(">C<").unwrap(),
        );
        assert!(b < a && a < c);
    }

    #[tokio::test]
    async fn http_404_on_snapshot_shows_profile_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/publications.json")
            .with_status(404)
            .create_async()
            .await;

        let source = SnapshotSource::Url(format!("{}/publications.json", server.url()));
        let loaded = snapshot::load(&reqwest::Client::new(), &source).await;
        let l = listing(loaded, &scholar::profile_link(&Settings::default()));

        assert!(l.fragments().is_empty());
        let html = l.to_html();
        assert!(html.contains(
            "href=\"https://scholar.google.com/citations?user=UJ4D3rYAAAAJ\""
        ));
        assert_eq!(count_items(&html), 0);
    }

    #[test]
    fn toggling_one_abstract_leaves_others_alone() {
        let with_abstract = |t: &str, y: &str| Publication {
            abstract_text: format!("About {}", t),
            ..p(t, y)
        };
        let mut view = ResearchView::new(&[
            with_abstract("A", "2023"),
            p("B", "2022"),
            with_abstract("C", "2021"),
        ]);

        assert_eq!(view.toggle_abstract(0), Some(true));
        let expanded: Vec<_> = view
            .fragments()
            .iter()
            .map(|f| f.abstract_panel.as_ref().map(|a| a.expanded))
            .collect();
        assert_eq!(expanded, [Some(true), None, Some(false)]);

        assert_eq!(view.toggle_abstract(1), None);
        assert_eq!(view.toggle_abstract(9), None);
        assert_eq!(view.toggle_abstract(2), Some(true));
        assert_eq!(view.toggle_abstract(0), Some(false));
        let c = view.fragments()[2].abstract_panel.as_ref().unwrap();
        assert!(c.expanded);
    }
}
