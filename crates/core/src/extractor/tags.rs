//! Release tag vocabulary stripped from title candidates.
//!
//! Each entry is a removal rule (a regex fragment) applied
//! case-insensitively after the year has been located. New release
//! conventions are added here without touching the extraction
//! algorithm itself.

/// Regex fragments for tags that never belong in a search title.
///
/// Order matters for overlapping tags: `YTS.MX` must come before `YTS`
/// so the longer form wins.
pub(crate) const RELEASE_TAG_RULES: &[&str] = &[
    // Resolution tags
    "2160p",
    "1080p",
    "720p",
    "480p",
    // Distribution tags
    "BluRay",
    "WEBRip",
    "WEB-DL",
    "HDRip",
    "DVDRip",
    "BRRip",
    // Uploader tags
    r"YTS\.MX",
    "YTS",
    "RARBG",
    // Season-style tokens (S.1, S.01, ...)
    r"S\.\d+",
];

/// Build the combined removal pattern: bracketed/parenthesized runs
/// plus every tag rule, case-insensitive.
pub(crate) fn removal_pattern() -> String {
    let mut pattern = String::from(r"(?i)\[[^\]]*\]|\([^)]*\)");
    for rule in RELEASE_TAG_RULES {
        pattern.push('|');
        pattern.push_str(rule);
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex_lite::Regex;

    #[test]
    fn test_pattern_compiles() {
        assert!(Regex::new(&removal_pattern()).is_ok());
    }

    #[test]
    fn test_longer_uploader_tag_listed_first() {
        let yts_mx = RELEASE_TAG_RULES.iter().position(|r| r.contains("MX"));
        let yts = RELEASE_TAG_RULES.iter().position(|r| *r == "YTS");
        assert!(yts_mx.unwrap() < yts.unwrap());
    }
}
