//! Bundle title resolution from page metadata.
//!
//! Sources are tried in a fixed order and the first non-empty one wins,
//! verbatim: `og:title` meta tag, the `<title>` element, the alt text of the
//! `img.bundle-logo` element, and finally a title built from the URL slug.

use scraper::{Html, Selector};
use url::Url;

const FALLBACK_TITLE: &str = "Untitled Bundle";

/// Resolve a display title for the bundle. Never returns an empty string.
pub fn resolve_title(document: &Html, url: &str) -> String {
    first_attr(document, r#"meta[property="og:title"]"#, "content")
        .or_else(|| title_element(document))
        .or_else(|| first_attr(document, "img.bundle-logo", "alt"))
        .unwrap_or_else(|| title_from_url(url))
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let el = document.select(&sel).next()?;
    let value = el.value().attr(attr)?;
    (!value.is_empty()).then(|| value.to_string())
}

fn title_element(document: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    let el = document.select(&sel).next()?;
    let text = el.text().collect::<String>();
    (!text.is_empty()).then_some(text)
}

/// Build a title from the last path segment: `data-visualization-books`
/// becomes `Data Visualization Books`.
pub fn title_from_url(raw: &str) -> String {
    let parsed = Url::parse(raw).ok();
    let segment = match &parsed {
        Some(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        None => raw
            .split(['?', '#'])
            .next()
            .and_then(|path| path.split('/').filter(|s| !s.is_empty()).last())
            .map(str::to_string),
    };

    segment
        .map(|slug| {
            slug.split('-')
                .filter(|word| !word.is_empty())
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|title| !title.is_empty())
        .or_else(|| {
            parsed
                .as_ref()
                .and_then(|url| url.host_str())
                .map(String::from)
        })
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.humblebundle.com/books/data-visualization-oreilly-books";

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn og_title_wins() {
        let html = doc(r#"<html><head>
            <meta property="og:title" content="Humble Tech Book Bundle: Data Viz">
            <title>Ignored</title>
        </head><body><img class="bundle-logo" alt="Also ignored"></body></html>"#);
        assert_eq!(resolve_title(&html, URL), "Humble Tech Book Bundle: Data Viz");
    }

    #[test]
    fn empty_og_title_falls_through_to_title_element() {
        let html = doc(r#"<html><head>
            <meta property="og:title" content="">
            <title>Page Title</title>
        </head></html>"#);
        assert_eq!(resolve_title(&html, URL), "Page Title");
    }

    #[test]
    fn present_values_are_kept_verbatim() {
        let html = doc(r#"<html><head>
            <meta property="og:title" content="  Padded Bundle ">
            <title>Ignored</title>
        </head></html>"#);
        assert_eq!(resolve_title(&html, URL), "  Padded Bundle ");

        let html = doc(r#"<html><head>
            <meta property="og:title" content=" ">
            <title>Ignored</title>
        </head></html>"#);
        assert_eq!(resolve_title(&html, URL), " ");

        let html = doc("<html><head><title> Spaced Title </title></head></html>");
        assert_eq!(resolve_title(&html, URL), " Spaced Title ");
    }

    #[test]
    fn empty_title_element_falls_through_to_logo() {
        let html = doc(r#"<html><head><title></title></head>
            <body><img class="bundle-logo" alt="Logo Bundle"></body></html>"#);
        assert_eq!(resolve_title(&html, URL), "Logo Bundle");
    }

    #[test]
    fn logo_alt_used_without_title() {
        let html = doc(r#"<html><body>
            <img class="hero" alt="Not this one">
            <img class="bundle-logo wide" alt="Logo Bundle">
        </body></html>"#);
        assert_eq!(resolve_title(&html, URL), "Logo Bundle");
    }

    #[test]
    fn url_slug_is_last_resort() {
        let html = doc("<html><body><p>nothing here</p></body></html>");
        assert_eq!(
            resolve_title(&html, URL),
            "Data Visualization Oreilly Books"
        );
    }

    #[test]
    fn slug_ignores_trailing_slash_and_query() {
        assert_eq!(
            title_from_url("https://example.com/games/cozy-GAMES-pack/?hmb_source=nav#top"),
            "Cozy Games Pack"
        );
    }

    #[test]
    fn slug_collapses_repeated_hyphens() {
        assert_eq!(title_from_url("https://example.com/a--b-"), "A B");
    }

    #[test]
    fn bare_host_falls_back_to_host() {
        assert_eq!(title_from_url("https://example.com/"), "example.com");
    }

    #[test]
    fn unparseable_url_still_yields_a_title() {
        assert_eq!(title_from_url("books/puzzle-mania"), "Puzzle Mania");
        assert_eq!(title_from_url(""), FALLBACK_TITLE);
    }
}
