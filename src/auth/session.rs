//! Stateless sessions carried in an encrypted private cookie.
//!
//! The cookie value is `<account_id>:<issued_at_unix>`. `PrivateCookieJar`
//! authenticates and encrypts it, so a value that decrypts was issued by us.

use crate::config::BasicConfig;
use crate::error::RosterError;
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::{Duration, OffsetDateTime};

pub const SESSION_COOKIE: &str = "roster_session";

/// Attributes shared by every cookie the app sets.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
    pub session_ttl: Duration,
}

impl CookiePolicy {
    pub fn from_config(basic: &BasicConfig) -> Result<Self, RosterError> {
        let minutes = basic.session_ttl_minutes;
        let seconds = minutes
            .checked_mul(60)
            .filter(|s| *s > 0)
            .ok_or(RosterError::InvalidSessionTtl(minutes))?;
        Ok(Self {
            secure: !basic.insecure_cookie,
            session_ttl: Duration::seconds(seconds),
        })
    }

    pub(crate) fn build_cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build(Cookie::new(name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }

    pub(crate) fn clear_cookie(&self, name: &'static str) -> Cookie<'static> {
        Cookie::build(Cookie::new(name, ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SessionToken {
    account_id: i64,
    issued_at: i64,
}

impl SessionToken {
    fn encode(&self) -> String {
        format!("{}:{}", self.account_id, self.issued_at)
    }

    fn decode(value: &str) -> Option<Self> {
        let (id, issued) = value.split_once(':')?;
        Some(Self {
            account_id: id.parse().ok()?,
            issued_at: issued.parse().ok()?,
        })
    }

    fn is_fresh(&self, now: OffsetDateTime, ttl: Duration) -> bool {
        let age = now.unix_timestamp() - self.issued_at;
        (0..ttl.whole_seconds()).contains(&age)
    }
}

/// Establish a session for `account_id`.
pub fn start(jar: PrivateCookieJar, account_id: i64, policy: &CookiePolicy) -> PrivateCookieJar {
    let token = SessionToken {
        account_id,
        issued_at: OffsetDateTime::now_utc().unix_timestamp(),
    };
    let mut cookie = policy.build_cookie(SESSION_COOKIE, token.encode());
    cookie.set_max_age(policy.session_ttl);
    jar.add(cookie)
}

pub fn end(jar: PrivateCookieJar, policy: &CookiePolicy) -> PrivateCookieJar {
    jar.remove(policy.clear_cookie(SESSION_COOKIE))
}

/// Account id of a present, untampered and unexpired session.
pub fn current_account_id(jar: &PrivateCookieJar, policy: &CookiePolicy) -> Option<i64> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let token = SessionToken::decode(cookie.value())?;
    token
        .is_fresh(OffsetDateTime::now_utc(), policy.session_ttl)
        .then_some(token.account_id)
}
