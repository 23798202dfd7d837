use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Duration;

use super::error::ServerError;

/// Attributes for a `Set-Cookie` header. Every cookie is `Path=/; SameSite=Lax`.
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub max_age: Duration,
    pub http_only: bool,
    pub secure: bool,
}

impl CookieOptions {
    pub fn state(secure: bool) -> Self {
        Self {
            max_age: crate::common::STATE_TTL,
            http_only: false,
            secure,
        }
    }

    pub fn session(max_age: Duration, secure: bool) -> Self {
        Self {
            max_age,
            http_only: true,
            secure,
        }
    }
}

pub fn set_cookie(name: &str, value: &str, options: CookieOptions) -> Result<HeaderValue, ServerError> {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name,
        value,
        options.max_age.num_seconds()
    );
    if options.http_only {
        cookie.push_str("; HttpOnly");
    }
    if options.secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| ServerError::Internal(format!("Invalid cookie header: {}", e)))
}

/// Expire a cookie set by [`set_cookie`]
pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue, ServerError> {
    set_cookie(
        name,
        "",
        CookieOptions {
            max_age: Duration::zero(),
            http_only: false,
            secure,
        },
    )
}

/// First value of cookie `name` across all `Cookie` headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_cookie_is_script_readable_and_short_lived() {
        let value = set_cookie("oauth_state", "abc", CookieOptions::state(false)).unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "oauth_state=abc; Path=/; Max-Age=300; SameSite=Lax"
        );
    }

    #[test]
    fn session_cookie_is_http_only() {
        let value = set_cookie(
            "yuri_session",
            "xyz",
            CookieOptions::session(Duration::days(7), true),
        )
        .unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "yuri_session=xyz; Path=/; Max-Age=604800; SameSite=Lax; HttpOnly; Secure"
        );
    }

    #[test]
    fn clearing_sets_zero_max_age() {
        let value = clear_cookie("yuri_session", false).unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "yuri_session=; Path=/; Max-Age=0; SameSite=Lax"
        );
    }

    #[test]
    fn rejects_values_that_cannot_be_headers() {
        assert!(set_cookie("a", "line\nbreak", CookieOptions::state(false)).is_err());
    }

    #[test]
    fn reads_cookie_among_many_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark; lang=id"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("oauth_state=s1-_x; yuri_session=abc"),
        );

        assert_eq!(read_cookie(&headers, "oauth_state"), Some("s1-_x"));
        assert_eq!(read_cookie(&headers, "yuri_session"), Some("abc"));
        assert_eq!(read_cookie(&headers, "lang"), Some("id"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_reads_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("oauth_state="));
        assert_eq!(read_cookie(&headers, "oauth_state"), None);
    }
}
