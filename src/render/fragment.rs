use std::fmt::Write;

use quick_xml::escape::escape;

use crate::record::Publication;

pub const SHOW_ABSTRACT: &str = "Show Abstract";
pub const HIDE_ABSTRACT: &str = "Hide Abstract";

/// Outbound link shown under a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLink {
    pub label: &'static str,
    pub href: String,
}

/// Expandable abstract. Each fragment owns its own panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractPanel {
    pub text: String,
    pub expanded: bool,
}

impl AbstractPanel {
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn button_label(&self) -> &'static str {
        if self.expanded {
            HIDE_ABSTRACT
        } else {
            SHOW_ABSTRACT
        }
    }
}

/// Display-ready view of one publication, with every default already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub year_label: String,
    pub sort_year: i64,
    pub title: String,
    pub href: Option<String>,
    pub authors: String,
    pub journal: Option<String>,
    pub citations: Option<String>,
    pub links: Vec<OutboundLink>,
    pub abstract_panel: Option<AbstractPanel>,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl Fragment {
    pub fn from_record(p: &Publication) -> Self {
        let href = non_empty(&p.url);

        let mut links = Vec::new();
        if let Some(url) = &href {
            links.push(OutboundLink {
                label: "📄 View on Scholar",
                href: url.clone(),
            });
        }
        if let Some(pdf) = non_empty(&p.pdf_url) {
            links.push(OutboundLink {
                label: "📥 PDF",
                href: pdf,
            });
        }
        if let Some(id) = non_empty(&p.arxiv_id) {
            links.push(OutboundLink {
                label: "📚 arXiv",
                href: format!("https://arxiv.org/abs/{}", id),
            });
        }

        Fragment {
            year_label: non_empty(&p.year).unwrap_or_else(|| "N/A".into()),
            sort_year: p.sort_year(),
            title: non_empty(&p.title).unwrap_or_else(|| "Untitled".into()),
            href,
            authors: non_empty(&p.authors).unwrap_or_else(|| "Unknown authors".into()),
            journal: non_empty(&p.journal),
            citations: non_empty(&p.citations),
            links,
            abstract_panel: non_empty(&p.abstract_text).map(|text| AbstractPanel {
                text,
                expanded: false,
            }),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<div class=\"publication-item\">\n");
        let _ = writeln!(
            out,
            "  <span class=\"publication-year\">{}</span>",
            escape(&self.year_label)
        );

        let title = match &self.href {
            Some(href) => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                escape(href),
                escape(&self.title)
            ),
            None => escape(&self.title).into_owned(),
        };
        let _ = writeln!(out, "  <h3 class=\"publication-title\">{}</h3>", title);
        let _ = writeln!(
            out,
            "  <p class=\"publication-authors\">{}</p>",
            escape(&self.authors)
        );

        if let Some(journal) = &self.journal {
            let _ = writeln!(
                out,
                "  <p class=\"publication-journal\">{}</p>",
                escape(journal)
            );
        }
        if let Some(citations) = &self.citations {
            let _ = writeln!(
                out,
                "  <span class=\"publication-citations\">Cited by {}</span>",
                escape(citations)
            );
        }

        if !self.links.is_empty() {
            out.push_str("  <div class=\"publication-links\">");
            for link in &self.links {
                let _ = write!(
                    out,
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" class=\"publication-link\">{}</a>",
                    escape(&link.href),
                    link.label
                );
            }
            out.push_str("</div>\n");
        }

        if let Some(panel) = &self.abstract_panel {
            let _ = writeln!(
                out,
                "  <button type=\"button\" class=\"toggle-abstract\" aria-expanded=\"{}\">{}</button>",
                panel.expanded,
                panel.button_label()
            );
            // collapsed panels carry `hidden` so they stay closed without any stylesheet
            let attrs = if panel.expanded {
                "class=\"publication-abstract show\""
            } else {
                "class=\"publication-abstract\" hidden"
            };
            let _ = writeln!(out, "  <p {}>{}</p>", attrs, escape(&panel.text));
        }

        out.push_str("</div>\n");
        out
    }
}

// ── Tests ──
