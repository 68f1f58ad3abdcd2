use std::fmt::Write;

use chrono::{DateTime, Utc};
use quick_xml::escape::escape;

use super::Listing;
use crate::settings::Settings;

pub const SCRIPT_PATH: &str = "assets/research.js";

pub fn navbar(settings: &Settings) -> String {
    format!(
        "<nav class=\"navbar\">\n  <div class=\"container-fluid\">\n    \
         <a class=\"nav-link\" href=\"{}\">Home</a>\n    \
         <a class=\"nav-link ms-auto\" href=\"{}\">Research</a>\n  </div>\n</nav>\n",
        escape(&settings.href("")),
        escape(&settings.href("research/"))
    )
}

/// Full document around `body`. `extra_head` goes at the end of `<head>`.
pub fn layout(settings: &Settings, title: &str, body: &str, extra_head: &str) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(title));
    let _ = writeln!(
        out,
        "<meta name=\"description\" content=\"{}\">",
        escape(&settings.profile.description)
    );
    for sheet in &settings.stylesheets {
        let _ = writeln!(
            out,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape(&settings.asset_href(sheet))
        );
    }
    out.push_str(extra_head);
    out.push_str("</head>\n<body>\n");
    out.push_str(&navbar(settings));
    out.push_str("<main>\n");
    out.push_str(body);
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

/// Landing page: portrait, name, role, affiliations.
pub fn home(settings: &Settings) -> String {
    let p = &settings.profile;
    let mut body = String::new();
    body.push_str("<div class=\"container text-center\">\n<div class=\"row p-4\">\n");
    let _ = writeln!(
        body,
        "<div class=\"col-12 col-md-4\"><img class=\"profile-img\" src=\"{}\" width=\"250\" height=\"250\" alt=\"Picture of the author\"></div>",
        escape(&settings.href(&p.image))
    );
    body.push_str("<div class=\"col-12 col-md-8\">\n");
    let _ = writeln!(body, "<h1>{}</h1>", escape(&p.name));
    let _ = writeln!(body, "<p>{}</p>", escape(&p.role));
    for (i, affiliation) in p.affiliations.iter().enumerate() {
        let class = if i == 0 { " class=\"mt-4\"" } else { "" };
        let _ = writeln!(body, "<p{}>{}</p>", class, escape(affiliation));
    }
    body.push_str("</div>\n</div>\n</div>\n");

    layout(settings, &p.name, &body, "")
}

/// Research page around an already decided listing.
pub fn research(settings: &Settings, listing: &Listing, generated_at: DateTime<Utc>) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"container\">\n<section id=\"research\" class=\"row p-4\">\n");
    body.push_str("<h2>Publications</h2>\n");
    body.push_str("<div id=\"publications-container\">\n");
    body.push_str(&listing.to_html());
    body.push_str("</div>\n");
    let _ = writeln!(
        body,
        "<p class=\"last-updated\">Last updated {}</p>",
        generated_at.format("%Y-%m-%d")
    );
    body.push_str("</section>\n</div>\n");

    let script = format!(
        "<script src=\"{}\" defer></script>\n",
        escape(&settings.href(SCRIPT_PATH))
    );
    let title = format!("Research · {}", settings.profile.name);
    layout(settings, &title, &body, &script)
}

// ── Tests ──
