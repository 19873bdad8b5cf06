use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use tracing::debug;

use crate::auth::session;
use crate::db::Account;
use crate::error::RosterError;
use crate::flash::{self, Flash};
use crate::router::RosterState;

pub const ACCESS_DENIED: &str = "Access Denied! Please log in first.";

/// Resolve the session in `jar` to a live account, if any.
pub async fn current_account(
    state: &RosterState,
    jar: &PrivateCookieJar,
) -> Result<Option<Account>, RosterError> {
    let Some(account_id) = session::current_account_id(jar, &state.cookies) else {
        return Ok(None);
    };
    state.accounts.get(account_id).await
}

/// Extractor guarding the CRUD routes.
///
/// Without a valid session the request is turned away with a redirect to the
/// login page and an access-denied flash; a stale session cookie is cleared.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Account);

impl FromRequestParts<RosterState> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &RosterState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        match current_account(state, &jar).await {
            Ok(Some(account)) => Ok(Self(account)),
            Ok(None) => {
                debug!(path = %parts.uri.path(), "unauthenticated request redirected to login");
                let jar = session::end(jar, &state.cookies);
                let jar = flash::push(jar, Flash::danger(ACCESS_DENIED), &state.cookies);
                Err((jar, Redirect::to("/")).into_response())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}
