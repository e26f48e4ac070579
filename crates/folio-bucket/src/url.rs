// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public URL derivation and the reverse URL-to-path parse.
//!
//! A public URL has the shape `<public_base>/<bucket>/<path segments>`, each
//! segment percent-encoded. [`ObjectUrl::path_of`] accepts only URLs on the
//! same scheme, host and port as the base, strips everything up to and
//! including the first `<bucket>` segment, and decodes the remainder.

use folio_core::FolioError;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use reqwest::Url;

/// Characters left unencoded in a path segment (RFC 3986 unreserved).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Converts between object paths and their public URLs for one bucket.
#[derive(Debug, Clone)]
pub struct ObjectUrl {
    base: Url,
    bucket: String,
}

impl ObjectUrl {
    pub fn new(public_base: &str, bucket: &str) -> Result<Self, FolioError> {
        let base = Url::parse(public_base).map_err(|e| {
            FolioError::Config(format!("invalid public base URL `{public_base}`: {e}"))
        })?;
        if base.host_str().is_none() {
            return Err(FolioError::Config(format!(
                "public base URL `{public_base}` has no host"
            )));
        }
        Ok(Self {
            base,
            bucket: bucket.to_string(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Public URL of the object at `path`.
    pub fn url_for(&self, path: &str) -> String {
        let mut url = self.base.as_str().trim_end_matches('/').to_string();
        for segment in std::iter::once(self.bucket.as_str()).chain(path.split('/')) {
            url.push('/');
            url.extend(utf8_percent_encode(segment, SEGMENT));
        }
        url
    }

    /// Object path a URL points at, or `None` if it is not one of ours.
    pub fn path_of(&self, url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        if parsed.scheme() != self.base.scheme()
            || parsed.host_str() != self.base.host_str()
            || parsed.port_or_known_default() != self.base.port_or_known_default()
        {
            return None;
        }

        let mut segments = parsed.path_segments()?;
        segments.find(|s| decode(s).as_deref() == Some(self.bucket.as_str()))?;

        let path = segments
            .map(decode)
            .collect::<Option<Vec<String>>>()?
            .join("/");
        (!path.is_empty()).then_some(path)
    }
}

fn decode(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> ObjectUrl {
        ObjectUrl::new("https://storage.googleapis.com", "site.firebasestorage.app").unwrap()
    }

    #[test]
    fn url_keeps_collection_segment_literal() {
        let url = urls().url_for("reels/1700000000000-clip.mp4");
        assert_eq!(
            url,
            "https://storage.googleapis.com/site.firebasestorage.app/reels/1700000000000-clip.mp4"
        );
        assert!(url.contains("reels/"));
    }

    #[test]
    fn awkward_filenames_survive_the_round_trip() {
        let urls = urls();
        for path in [
            "reels/1-my clip (final).mp4",
            "webdesigns/2-résumé#1?.png",
            "reels/3-100%.webm",
        ] {
            let url = urls.url_for(path);
            assert_eq!(urls.path_of(&url).as_deref(), Some(path), "url: {url}");
        }
    }

    #[test]
    fn unencoded_legacy_urls_still_parse() {
        let path = urls().path_of(
            "https://storage.googleapis.com/site.firebasestorage.app/webdesigns/17-site.png",
        );
        assert_eq!(path.as_deref(), Some("webdesigns/17-site.png"));
    }

    #[test]
    fn foreign_hosts_are_rejected() {
        assert!(
            urls()
                .path_of("https://cdn.example.com/site.firebasestorage.app/reels/1-a.mp4")
                .is_none()
        );
        assert!(
            urls()
                .path_of("http://storage.googleapis.com/site.firebasestorage.app/reels/1-a.mp4")
                .is_none()
        );
    }

    #[test]
    fn local_and_malformed_urls_yield_nothing() {
        let urls = urls();
        assert!(urls.path_of("/uploads/1-a.mp4").is_none());
        assert!(urls.path_of("").is_none());
        assert!(
            urls.path_of("https://storage.googleapis.com/other-bucket/reels/1-a.mp4")
                .is_none()
        );
        assert!(
            urls.path_of("https://storage.googleapis.com/site.firebasestorage.app/")
                .is_none()
        );
    }

    #[test]
    fn base_with_path_prefix_and_port() {
        let urls = ObjectUrl::new("http://127.0.0.1:9000/mirror/", "bkt").unwrap();
        let url = urls.url_for("reels/5-x.mp4");
        assert_eq!(url, "http://127.0.0.1:9000/mirror/bkt/reels/5-x.mp4");
        assert_eq!(urls.path_of(&url).as_deref(), Some("reels/5-x.mp4"));
        assert!(
            urls.path_of("http://127.0.0.1:9001/mirror/bkt/reels/5-x.mp4")
                .is_none()
        );
    }

    #[test]
    fn invalid_base_is_a_config_error() {
        assert!(matches!(
            ObjectUrl::new("not a url", "bkt"),
            Err(FolioError::Config(_))
        ));
    }
}
