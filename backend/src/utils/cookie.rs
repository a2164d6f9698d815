use axum::http::{HeaderMap, header::COOKIE};

/// Remembers the locale offered by the language prompt.
pub const LOCALE_COOKIE_NAME: &str = "prompt-language-choice";

/// One year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE: u64 = 31_536_000;

/// Value of cookie `name` across all `Cookie` headers, if present.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            if key.trim() == name { Some(value.trim()) } else { None }
        })
}

/// `Set-Cookie` value persisting `value` site-wide for a year.
pub fn locale_cookie(value: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        LOCALE_COOKIE_NAME, value, LOCALE_COOKIE_MAX_AGE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; prompt-language-choice=bn"));
        assert_eq!(read_cookie(&headers, LOCALE_COOKIE_NAME), Some("bn"));
        assert_eq!(read_cookie(&headers, "theme"), Some("dark"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("prompt-language-choice=ar"));
        assert_eq!(read_cookie(&headers, LOCALE_COOKIE_NAME), Some("ar"));
    }

    #[test]
    fn test_locale_cookie() {
        assert_eq!(
            locale_cookie("ar", false),
            "prompt-language-choice=ar; Path=/; Max-Age=31536000; SameSite=Lax"
        );
        assert_eq!(
            locale_cookie("ar", true),
            "prompt-language-choice=ar; Path=/; Max-Age=31536000; SameSite=Lax; Secure"
        );
    }
}
