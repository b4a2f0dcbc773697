//! Preview cookie detection
//!
//! The content source marks preview sessions with a cookie holding a ref
//! for draft content. Its value is URL-encoded and is either the ref itself
//! or a JSON object keyed by repository host:
//! `{"<repo>.prismic.io": {"preview": "<ref>"}}`.

/// Name of the cookie carrying the preview ref
pub const PREVIEW_COOKIE: &str = "io.prismic.preview";

/// Extract the preview ref for `repository` from a `document.cookie`-style string
pub fn preview_ref_from_cookies(cookie_header: &str, repository: &str) -> Option<String> {
    let raw = cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name.trim() == PREVIEW_COOKIE).then(|| value.trim())
    })?;

    let decoded = urlencoding::decode(raw).ok()?.into_owned();
    if decoded.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(&decoded) {
        Ok(serde_json::Value::Object(map)) => map
            .iter()
            .find(|(host, _)| host.split('.').next() == Some(repository))
            .and_then(|(_, entry)| entry.get("preview"))
            .and_then(|v| v.as_str())
            .map(String::from),
        _ => Some(decoded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cookie() {
        assert_eq!(preview_ref_from_cookies("", "vanilla-leagues"), None);
        assert_eq!(
            preview_ref_from_cookies("theme=dark; session=abc", "vanilla-leagues"),
            None
        );
    }

    #[test]
    fn test_bare_ref() {
        let cookies = "theme=dark; io.prismic.preview=ZDraft%7E123";
        assert_eq!(
            preview_ref_from_cookies(cookies, "vanilla-leagues").as_deref(),
            Some("ZDraft~123")
        );
    }

    #[test]
    fn test_json_value_keyed_by_repository() {
        let value = urlencoding::encode(
            r#"{"vanilla-leagues.prismic.io":{"preview":"https://vanilla-leagues.prismic.io/previews/abc?websitePreviewId=1"}}"#,
        );
        let cookies = format!("io.prismic.preview={}", value);

        assert_eq!(
            preview_ref_from_cookies(&cookies, "vanilla-leagues").as_deref(),
            Some("https://vanilla-leagues.prismic.io/previews/abc?websitePreviewId=1")
        );
        assert_eq!(preview_ref_from_cookies(&cookies, "other-repo"), None);
    }
}
