//! Decoding of the semi-structured string fields found in arrest records.
//!
//! Every function here is total: malformed input degrades to an empty or
//! absent value rather than an error.

use std::sync::LazyLock;

use regex::Regex;

/// URL prefix under which mugshot images are served.
pub const MUGSHOT_URL_PREFIX: &str = "/mugshots/";

/// Content-hash file names the source site gives its mugshots, e.g.
/// `wow-mugshot-01e06361f372bb503291a899ec89affa.jpg`.
static MUGSHOT_HASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)wow-mugshot-([a-f0-9]+)\.(?:jpg|png)").expect("valid regex")
});

/// Last path segment of a `.jpg`/`.png` URL, without the extension.
static IMAGE_STEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/([^/]+)\.(?:jpg|png)").expect("valid regex"));

static NON_ID_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("valid regex"));

/// Parses a bracketed pseudo-list such as `"['Theft', 'Assault']"`.
///
/// Brackets and quote characters are stripped, the remainder is split on
/// commas, and each piece is trimmed. Empty pieces are dropped and order is
/// preserved. Input without brackets is accepted as a bare comma list.
#[must_use]
pub fn parse_pseudo_list(raw: &str) -> Vec<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
        .collect();

    stripped
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses an age field. Returns `None` unless the value is a finite number.
#[must_use]
pub fn parse_age(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Builds the served mugshot URL from a local image path.
///
/// Only the file name is kept (either `/` or `\` separates directories),
/// percent-encoded under [`MUGSHOT_URL_PREFIX`]. A blank path yields an
/// empty string.
#[must_use]
pub fn mugshot_url(picture_local: &str) -> String {
    let path = picture_local.trim();
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);

    if file_name.is_empty() {
        return String::new();
    }

    format!("{MUGSHOT_URL_PREFIX}{}", urlencoding::encode(file_name))
}

/// Derives a record identifier from the remote picture URL.
///
/// Prefers the content hash from a `wow-mugshot-<hash>` file name, then the
/// file stem with anything outside `[A-Za-z0-9_-]` replaced by `_`, and
/// finally `idx<index>`.
#[must_use]
pub fn derive_record_id(picture_url: &str, index: usize) -> String {
    if let Some(caps) = MUGSHOT_HASH_RE.captures(picture_url) {
        return caps[1].to_owned();
    }

    if let Some(caps) = IMAGE_STEM_RE.captures(picture_url) {
        let stem = NON_ID_CHARS_RE.replace_all(&caps[1], "_");
        if !stem.is_empty() {
            return stem.into_owned();
        }
    }

    format!("idx{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_python_style_list() {
        assert_eq!(
            parse_pseudo_list("['Theft', 'Assault']"),
            vec!["Theft", "Assault"]
        );
    }

    #[test]
    fn parses_json_style_list() {
        assert_eq!(
            parse_pseudo_list(r#"["Drug Trafficking","Homicide"]"#),
            vec!["Drug Trafficking", "Homicide"]
        );
    }

    #[test]
    fn parsing_is_idempotent_on_well_formed_input() {
        let once = parse_pseudo_list("['Theft', 'Assault']");
        let rendered = format!("['{}']", once.join("', '"));
        assert_eq!(parse_pseudo_list(&rendered), once);
    }

    #[test]
    fn empty_and_degenerate_inputs_yield_empty() {
        assert!(parse_pseudo_list("").is_empty());
        assert!(parse_pseudo_list("[]").is_empty());
        assert!(parse_pseudo_list("[ , '' ,]").is_empty());
    }

    #[test]
    fn bare_comma_list_is_accepted() {
        assert_eq!(
            parse_pseudo_list("Burglary, Fraud ,"),
            vec!["Burglary", "Fraud"]
        );
    }

    #[test]
    fn parses_finite_ages_only() {
        assert_eq!(parse_age("34"), Some(34.0));
        assert_eq!(parse_age(" 27.5 "), Some(27.5));
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("unknown"), None);
        assert_eq!(parse_age("NaN"), None);
        assert_eq!(parse_age("inf"), None);
    }

    #[test]
    fn mugshot_url_uses_encoded_file_name() {
        assert_eq!(
            mugshot_url("output/mugshots/Sahal Osman Shidane.png"),
            "/mugshots/Sahal%20Osman%20Shidane.png"
        );
        assert_eq!(
            mugshot_url(r"C:\data\mugshots\wow-mugshot-abc.jpg"),
            "/mugshots/wow-mugshot-abc.jpg"
        );
    }

    #[test]
    fn blank_mugshot_path_yields_empty() {
        assert_eq!(mugshot_url(""), "");
        assert_eq!(mugshot_url("  "), "");
        assert_eq!(mugshot_url("output/mugshots/"), "");
    }

    #[test]
    fn record_id_prefers_hash() {
        assert_eq!(
            derive_record_id(
                "https://www.dhs.gov/sites/default/files/wow-mugshot-01e06361f372bb503291a899ec89affa.jpg",
                3
            ),
            "01e06361f372bb503291a899ec89affa"
        );
    }

    #[test]
    fn record_id_falls_back_to_sanitized_stem() {
        assert_eq!(
            derive_record_id("https://www.dhs.gov/files/Sahal%20Osman.png", 0),
            "Sahal_20Osman"
        );
    }

    #[test]
    fn record_id_falls_back_to_index() {
        assert_eq!(derive_record_id("", 7), "idx7");
    }
}
