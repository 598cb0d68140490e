//! Title/year extraction from torrent filenames.
//!
//! The filename is the only metadata source: `Inception (2010) 1080p
//! BluRay YTS.MX.torrent` must become the query `("Inception", "2010")`.
//! The heuristic takes the leftmost run of exactly four digits as the
//! year, which misfires on titles carrying their own 4-digit number
//! before the release year (e.g. `Blade Runner 2049 (2017)` parses as
//! `("Blade Runner", "2049")`). That is a known limitation of the
//! leftmost-run rule, kept as-is.

mod tags;

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// A cleaned search query extracted from one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Title with release tags and bracketed runs removed.
    pub title: String,
    /// Release year as the 4-digit string that was matched.
    pub year: String,
}

/// `Title (Year)` or `Title Year`, year optionally wrapped in
/// parentheses or brackets. The lazy prefix makes the leftmost 4-digit
/// run win.
static TITLE_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*[\(\[]?(\d{4})[\)\]]?").expect("invalid title/year pattern")
});

static TAG_REMOVAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&tags::removal_pattern()).expect("invalid tag removal pattern"));

/// Extract a movie search query from a torrent filename.
///
/// Returns `None` when no 4-digit year run is present, or when the
/// title is empty after tag removal (an empty query would be useless
/// downstream).
pub fn extract_movie_query(filename: &str) -> Option<ParsedQuery> {
    let name = filename.strip_suffix(".torrent").unwrap_or(filename);

    let captures = TITLE_YEAR_RE.captures(name)?;
    let raw_title = captures.get(1)?.as_str();
    let year = captures.get(2)?.as_str().to_string();

    let title = TAG_REMOVAL_RE.replace_all(raw_title, "").trim().to_string();
    if title.is_empty() {
        return None;
    }

    Some(ParsedQuery { title, year })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(filename: &str) -> Option<(String, String)> {
        extract_movie_query(filename).map(|q| (q.title, q.year))
    }

    #[test]
    fn test_title_with_parenthesized_year_and_tags() {
        assert_eq!(
            extract("Inception (2010) 1080p BluRay YTS.MX.torrent"),
            Some(("Inception".to_string(), "2010".to_string()))
        );
    }

    #[test]
    fn test_title_with_bracketed_year() {
        assert_eq!(
            extract("The Matrix [1999].torrent"),
            Some(("The Matrix".to_string(), "1999".to_string()))
        );
    }

    #[test]
    fn test_title_with_bare_year() {
        assert_eq!(
            extract("Heat 1995.torrent"),
            Some(("Heat".to_string(), "1995".to_string()))
        );
    }

    #[test]
    fn test_no_year_returns_none() {
        assert_eq!(extract("Untitled.torrent"), None);
    }

    #[test]
    fn test_tags_removed_case_insensitively() {
        assert_eq!(
            extract("Alien (1979) 720P webrip yts.torrent"),
            Some(("Alien".to_string(), "1979".to_string()))
        );
    }

    #[test]
    fn test_bracketed_release_group_removed() {
        assert_eq!(
            extract("Dune [RemuxGroup] (2021) 2160p.torrent"),
            Some(("Dune".to_string(), "2021".to_string()))
        );
    }

    #[test]
    fn test_season_token_removed() {
        assert_eq!(
            extract("Fargo S.2 (2015) WEBRip.torrent"),
            Some(("Fargo".to_string(), "2015".to_string()))
        );
    }

    #[test]
    fn test_empty_title_after_cleaning_returns_none() {
        // Nothing but tags before the year.
        assert_eq!(extract("1080p (2010).torrent"), None);
    }

    #[test]
    fn test_works_without_torrent_suffix() {
        assert_eq!(
            extract("Inception (2010)"),
            Some(("Inception".to_string(), "2010".to_string()))
        );
    }

    #[test]
    fn test_leftmost_year_run_wins() {
        // Known heuristic limitation: the title's own number is taken
        // as the year when it precedes the real one.
        assert_eq!(
            extract("Blade Runner 2049 (2017).torrent"),
            Some(("Blade Runner".to_string(), "2049".to_string()))
        );
    }

    #[test]
    fn test_leading_digits_survive_when_not_a_full_run() {
        // A title starting with digits still parses when the digits
        // cannot form a 4-digit run on their own.
        assert_eq!(
            extract("2001 A Space Odyssey (1968).torrent"),
            Some(("2001 A Space Odyssey".to_string(), "1968".to_string()))
        );
    }
}
