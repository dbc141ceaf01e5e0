//! Authentication route handlers
//!
//! This module contains all account and session endpoints:
//! - Registration and login
//! - Logout and the current profile
//! - Phone verification (checking and resending codes)

pub mod login;
pub mod logout;
pub mod me;
pub mod register;
pub mod resend_verification;
pub mod verify_phone;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use register::register;
pub use resend_verification::resend_verification;
pub use verify_phone::verify_phone;

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use chrono::Utc;

use sf_core::IssuedToken;
use sf_shared::AuthConfig;

/// Http-only cookie carrying the session token
pub(crate) fn session_cookie(config: &AuthConfig, token: &IssuedToken) -> Cookie<'static> {
    let max_age = (token.expires_at - Utc::now()).num_seconds().max(0);

    Cookie::build(config.cookie_name.clone(), token.token.clone())
        .path("/")
        .http_only(true)
        .secure(config.secure_cookie)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age))
        .finish()
}

/// Cookie that makes the browser drop the session cookie
pub(crate) fn removal_cookie(config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .secure(config.secure_cookie)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = AuthConfig::default();
        let token = IssuedToken {
            token: "abc.def.ghi".to_string(),
            expires_at: Utc::now() + chrono::Duration::days(30),
        };

        let cookie = session_cookie(&config, &token);
        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().unwrap().whole_days() >= 29);
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie(&AuthConfig::default());
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
