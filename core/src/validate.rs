/// Hint shown next to a jump action that is disabled because of its base URL scheme.
pub const SCHEME_HINT: &str = "Base URL must start with http/https (http:// or https://)";

const OPENABLE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Whether `candidate` may be opened as a dashboard link.
///
/// Only the scheme is checked (ASCII case-insensitive, anchored at the
/// start). Host, path and overall well-formedness are not inspected.
pub fn is_openable_url(candidate: Option<&str>) -> bool {
    let Some(candidate) = candidate else {
        return false;
    };

    OPENABLE_SCHEMES.iter().any(|scheme| {
        candidate
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(is_openable_url(Some("http://a.com")));
        assert!(is_openable_url(Some("https://a.com/x?y=1")));
        assert!(is_openable_url(Some("HTTP://UPPERCASE.COM")));
        assert!(is_openable_url(Some("hTtPs://mixed.case")));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(!is_openable_url(Some("ws://a.com")));
        assert!(!is_openable_url(Some("ftp://a.com")));
        assert!(!is_openable_url(Some("javascript:alert(1)")));
        assert!(!is_openable_url(Some("/relative/path")));
        assert!(!is_openable_url(Some("localhost:9090/graph")));
    }

    #[test]
    fn rejects_missing_or_empty() {
        assert!(!is_openable_url(Some("")));
        assert!(!is_openable_url(None));
    }

    #[test]
    fn scheme_must_be_a_prefix() {
        assert!(!is_openable_url(Some(" http://a.com")));
        assert!(!is_openable_url(Some("see http://a.com")));
        assert!(!is_openable_url(Some("http:/a.com")));
        assert!(!is_openable_url(Some("http")));
    }

    #[test]
    fn multibyte_prefix_does_not_panic() {
        assert!(!is_openable_url(Some("h\u{00e9}tp://a.com")));
        assert!(!is_openable_url(Some("\u{1F600}")));
    }

    #[test]
    fn scheme_only_is_openable() {
        // Host presence is not checked.
        assert!(is_openable_url(Some("https://")));
    }
}
