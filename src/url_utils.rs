//! URL utilities for absolutizing catalog hrefs.
//!
//! Episode and catalog links on the site are root-relative, so resolution is
//! origin-based: the page URL contributes only its scheme and host.

use url::Url;

use crate::patterns::BASE_URL;

/// Derive the `scheme://host` origin from a page URL.
///
/// Falls back to the site default when the page URL is empty or unparsable.
#[must_use]
pub fn base_origin(page_url: &str) -> String {
    match Url::parse(page_url.trim()) {
        Ok(url) => match url.host_str() {
            Some(host) => format!("{}://{}", url.scheme(), host),
            None => BASE_URL.to_string(),
        },
        Err(_) => BASE_URL.to_string(),
    }
}

/// Convert a relative or absolute href to absolute form against an origin.
#[must_use]
pub fn absolutize(href: &str, origin: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_from_page_url() {
        assert_eq!(base_origin("https://jut.su/naruto/"), "https://jut.su");
        assert_eq!(base_origin("http://mirror.example/naruto"), "http://mirror.example");
    }

    #[test]
    fn origin_falls_back_to_site_default() {
        assert_eq!(base_origin(""), BASE_URL);
        assert_eq!(base_origin("not a url"), BASE_URL);
    }

    #[test]
    fn absolutize_root_relative() {
        assert_eq!(
            absolutize("/naruto/episode-1.html", "https://jut.su"),
            "https://jut.su/naruto/episode-1.html"
        );
    }

    #[test]
    fn absolutize_keeps_absolute() {
        assert_eq!(
            absolutize("https://cdn.example/v.mp4", "https://jut.su"),
            "https://cdn.example/v.mp4"
        );
    }

    #[test]
    fn absolutize_bare_path() {
        assert_eq!(absolutize("naruto.html", "https://jut.su"), "https://jut.su/naruto.html");
    }
}
