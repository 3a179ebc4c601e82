//! Site-specific extractors.
//!
//! Some platforms defeat the generic meta-tag cascade (client-rendered
//! markup, bot walls). Extractors here carry a dedicated header profile,
//! their own selector cascade, and a synthetic fallback derived from the
//! URL itself, so a matching host always yields usable metadata.

pub mod velog;

use url::Url;

use crate::metadata::PageMetadata;

/// Run the site-specific extractor for `url`'s host, if one exists.
///
/// Returns `None` for hosts without special handling; the caller then
/// proceeds with the generic fetch-and-extract path. When `Some` is
/// returned the metadata is final — site extractors never fail.
pub async fn try_extract(url: &Url) -> Option<PageMetadata> {
    if velog::matches(url) {
        return Some(velog::extract(url).await);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_matches_velog_only() {
        assert!(velog::matches(&Url::parse("https://velog.io/@someone/post").unwrap()));
        assert!(!velog::matches(&Url::parse("https://example.com/@someone/post").unwrap()));
    }
}
