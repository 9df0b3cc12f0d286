//! setlist.fm page URL parsing.

use regex_lite::Regex;

use super::SetlistError;

/// Extract the setlist ID from a setlist.fm page URL.
///
/// Accepts URLs like
/// `https://www.setlist.fm/setlist/artist/2025/venue-city-53af56b5.html`,
/// where the ID is the hex suffix after the final hyphen.
pub fn parse_setlist_url(url: &str) -> Result<String, SetlistError> {
    let url = url.trim().trim_end_matches('/');

    if !url.contains("setlist.fm/setlist/") {
        return Err(SetlistError::InvalidUrl(
            "URL must be from setlist.fm and contain '/setlist/'".to_string(),
        ));
    }

    let file_name = url.rsplit('/').next().unwrap_or_default();
    let stem = file_name.strip_suffix(".html").ok_or_else(|| {
        SetlistError::InvalidUrl(
            "URL does not appear to be a setlist page (should end in .html)".to_string(),
        )
    })?;

    let candidate = stem.rsplit('-').next().unwrap_or_default();
    let id_pattern = Regex::new(r"^[0-9a-fA-F]{6,16}$")
        .map_err(|e| SetlistError::InvalidUrl(e.to_string()))?;

    if !id_pattern.is_match(candidate) {
        return Err(SetlistError::InvalidUrl(format!(
            "could not extract a setlist ID from URL, got '{}'",
            candidate
        )));
    }

    Ok(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_url() {
        let id = parse_setlist_url(
            "https://www.setlist.fm/setlist/radiohead/2018/madison-square-garden-new-york-ny-63e2a6a3.html",
        )
        .unwrap();
        assert_eq!(id, "63e2a6a3");
    }

    #[test]
    fn test_parse_url_with_whitespace_and_trailing_slash() {
        let id = parse_setlist_url(
            "  https://www.setlist.fm/setlist/artist/2025/venue-53AF56B5.html/ ",
        )
        .unwrap();
        assert_eq!(id, "53AF56B5");
    }

    #[test]
    fn test_reject_other_hosts() {
        let err = parse_setlist_url("https://example.com/setlist/x-63e2a6a3.html").unwrap_err();
        assert!(matches!(err, SetlistError::InvalidUrl(_)));
    }

    #[test]
    fn test_reject_non_html_page() {
        assert!(parse_setlist_url("https://www.setlist.fm/setlist/artist/2025/venue-63e2a6a3").is_err());
    }

    #[test]
    fn test_reject_non_hex_id() {
        let err =
            parse_setlist_url("https://www.setlist.fm/setlist/artist/2025/venue-city.html").unwrap_err();
        assert!(err.to_string().contains("city"));
    }
}
