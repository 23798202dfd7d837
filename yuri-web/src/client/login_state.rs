use chrono::{DateTime, Utc};

use crate::common::{is_protected_page, storage_keys, UserProfile, LOGIN_PAGE, LOGIN_TTL};
use crate::error::AuthError;

use super::storage::BrowserStorage;

/// Where the browser should go after a login-state check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    To(String),
}

impl Navigation {
    fn login() -> Self {
        Navigation::To(LOGIN_PAGE.to_string())
    }
}

/// Login state mirrored into browser storage.
///
/// `local` holds the login flag, profile and login time; `session` holds the
/// page to return to once the visitor has logged in.
pub struct LoginState<L, S> {
    local: L,
    session: S,
}

impl<L, S> LoginState<L, S>
where
    L: BrowserStorage,
    S: BrowserStorage,
{
    pub fn new(local: L, session: S) -> Self {
        Self { local, session }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Record a completed login, as the callback bootstrap page does
    pub fn store_login(&mut self, user: &UserProfile, now: DateTime<Utc>) -> Result<(), AuthError> {
        let user_json = serde_json::to_string(user)?;
        self.local
            .set_item(storage_keys::USER_LOGGED_IN, "true".to_string());
        self.local.set_item(storage_keys::USER_DATA, user_json);
        self.local.set_item(
            storage_keys::LOGIN_TIME,
            now.timestamp_millis().to_string(),
        );
        Ok(())
    }

    /// Whether the visitor counts as logged in at `now`.
    ///
    /// A login older than seven days is cleared and reported as logged out.
    /// An unparseable `loginTime` is ignored.
    pub fn is_user_logged_in(&mut self, now: DateTime<Utc>) -> bool {
        let logged_in = self.local.get_item(storage_keys::USER_LOGGED_IN).as_deref() == Some("true");

        let login_time = self
            .local
            .get_item(storage_keys::LOGIN_TIME)
            .and_then(|t| t.trim().parse::<i64>().ok());

        if let Some(login_time) = login_time {
            let expired = now
                .timestamp_millis()
                .checked_sub(login_time)
                .is_none_or(|age| age > LOGIN_TTL.num_milliseconds());
            if expired {
                tracing::debug!(login_time, "Stored login expired");
                self.clear_login();
                return false;
            }
        }

        logged_in
    }

    pub fn user_data(&self) -> Option<UserProfile> {
        let raw = self.local.get_item(storage_keys::USER_DATA)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Error parsing user data: {}", e);
                None
            }
        }
    }

    /// Forget the stored login and send the visitor to the login page.
    ///
    /// The server-side session is ended separately with
    /// [`SiteClient::logout`](super::SiteClient::logout).
    pub fn logout_user(&mut self) -> Navigation {
        self.clear_login();
        Navigation::login()
    }

    /// Gate the current page on a valid login, remembering where to come back to
    pub fn require_auth(&mut self, current_path: &str, now: DateTime<Utc>) -> Navigation {
        if self.is_user_logged_in(now) {
            return Navigation::Stay;
        }

        if current_path != "/login.html" && current_path != "/login" {
            self.session.set_item(
                storage_keys::REDIRECT_AFTER_LOGIN,
                current_path.to_string(),
            );
        }

        Navigation::login()
    }

    /// Page-load check: protected pages require a login, everything else stays
    pub fn on_page_load(&mut self, current_path: &str, now: DateTime<Utc>) -> Navigation {
        if is_protected_page(current_path) {
            self.require_auth(current_path, now)
        } else {
            Navigation::Stay
        }
    }

    /// Click on a link marked as protected in the navbar
    pub fn follow_protected_link(&mut self, href: &str, now: DateTime<Utc>) -> Navigation {
        if self.is_user_logged_in(now) {
            return Navigation::To(href.to_string());
        }

        self.session
            .set_item(storage_keys::REDIRECT_AFTER_LOGIN, href.to_string());
        Navigation::login()
    }

    /// Consume the remembered destination once logged in.
    ///
    /// Returns `None` when not logged in, when nothing was remembered, or when
    /// the visitor is already on that page.
    pub fn take_redirect_after_login(
        &mut self,
        current_path: &str,
        now: DateTime<Utc>,
    ) -> Option<String> {
        if !self.is_user_logged_in(now) {
            return None;
        }

        let target = self.session.get_item(storage_keys::REDIRECT_AFTER_LOGIN)?;
        self.session.remove_item(storage_keys::REDIRECT_AFTER_LOGIN);

        if target.is_empty() || current_path.contains(target.as_str()) {
            None
        } else {
            Some(target)
        }
    }

    fn clear_login(&mut self) {
        self.local.remove_item(storage_keys::USER_LOGGED_IN);
        self.local.remove_item(storage_keys::USER_DATA);
        self.local.remove_item(storage_keys::LOGIN_TIME);
    }
}
