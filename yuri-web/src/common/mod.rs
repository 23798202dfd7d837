mod html;
mod models;
mod redirect;

pub use html::escape_html;
pub use models::{AuthStatus, LogoutResponse, UserProfile};
pub use redirect::sanitize_redirect;

use chrono::Duration;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path};

/// Cookie holding the OAuth state token between `/auth/discord` and the callback
pub const STATE_COOKIE: &str = "oauth_state";
/// Cookie holding the opaque session identifier
pub const SESSION_COOKIE: &str = "yuri_session";

pub const STATE_TTL: Duration = Duration::minutes(5);
pub const LOGIN_TTL: Duration = Duration::days(7);

pub const LOGIN_PAGE: &str = "login.html";

/// Browser storage keys written by the login bootstrap page and read by `auth.js`
pub mod storage_keys {
    pub const USER_LOGGED_IN: &str = "userLoggedIn";
    pub const USER_DATA: &str = "userData";
    pub const LOGIN_TIME: &str = "loginTime";
    /// Lives in session storage rather than local storage
    pub const REDIRECT_AFTER_LOGIN: &str = "redirectAfterLogin";
}

/// Pages that require a logged in visitor
pub const PROTECTED_PAGES: [&str; 8] = [
    "fitur.html",
    "command.html",
    "support.html",
    "premium.html",
    "team.html",
    "dokumentasi.html",
    "tos.html",
    "privacy.html",
];

/// Whether `path` resolves to a protected page.
///
/// The path is percent-decoded and split into components the way the static
/// file service does before it opens a file, so `/premium%2Ehtml` and
/// `/premium.html/.` are caught as well.
pub fn is_protected_page(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy();

    let page = Path::new(decoded.as_ref())
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .last();

    page.is_some_and(|page| {
        PROTECTED_PAGES
            .iter()
            .any(|protected| protected.eq_ignore_ascii_case(page))
    })
}
