//! One-time user notifications stored in an encrypted cookie until the next
//! page render.

use crate::auth::CookiePolicy;
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

pub const FLASH_COOKIE: &str = "roster_flash";

/// Messages kept per cookie; older ones are dropped first so the cookie stays
/// well under the browser size limit.
pub const MAX_PENDING: usize = 5;

/// Severity, rendered as the alert style of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }
}

/// Queue a message for the next rendered page.
pub fn push(jar: PrivateCookieJar, flash: Flash, policy: &CookiePolicy) -> PrivateCookieJar {
    let mut pending = pending(&jar);
    pending.push(flash);
    if pending.len() > MAX_PENDING {
        pending.drain(..pending.len() - MAX_PENDING);
    }
    match serde_json::to_string(&pending) {
        Ok(value) => jar.add(policy.build_cookie(FLASH_COOKIE, value)),
        Err(e) => {
            warn!(error = %e, "failed to encode flash messages");
            jar
        }
    }
}

/// Drain queued messages, clearing the cookie when there was anything to show.
pub fn take(jar: PrivateCookieJar, policy: &CookiePolicy) -> (PrivateCookieJar, Vec<Flash>) {
    let pending = pending(&jar);
    if pending.is_empty() {
        return (jar, pending);
    }
    (jar.remove(policy.clear_cookie(FLASH_COOKIE)), pending)
}

fn pending(jar: &PrivateCookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok())
        .unwrap_or_default()
}
