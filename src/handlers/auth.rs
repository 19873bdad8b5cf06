use crate::auth::session;
use crate::flash::{self, Flash};
use crate::middleware::RequireAdmin;
use crate::middleware::auth::current_account;
use crate::templates::LoginTemplate;
use crate::types::forms::LoginForm;
use crate::{RosterError, router::RosterState};
use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::{info, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// GET / -> login form, or straight to the list when already signed in.
pub async fn login_page(
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
) -> Result<Response, RosterError> {
    if current_account(&state, &jar).await?.is_some() {
        return Ok(Redirect::to("/index").into_response());
    }

    let (jar, flashes) = flash::take(jar, &state.cookies);
    let page = LoginTemplate {
        flashes,
        email: String::new(),
    };
    Ok((jar, Html(page.render()?)).into_response())
}

/// POST / -> verify credentials and start a session.
pub async fn login_submit(
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, RosterError> {
    let verified = state
        .accounts
        .verify_login(&form.email, &form.password)
        .await?;
    let Some(account) = verified else {
        warn!(email = %form.email, "rejected login attempt");
        let (jar, mut flashes) = flash::take(jar, &state.cookies);
        flashes.push(Flash::danger(INVALID_CREDENTIALS));
        let page = LoginTemplate {
            flashes,
            email: form.email,
        };
        return Ok((jar, Html(page.render()?)).into_response());
    };

    info!(email = %account.email, "admin logged in");
    let jar = session::start(jar, account.id, &state.cookies);
    let jar = flash::push(
        jar,
        Flash::success("You have successfully logged in."),
        &state.cookies,
    );
    Ok((jar, Redirect::to("/index")).into_response())
}

/// GET /logout
pub async fn logout(
    RequireAdmin(account): RequireAdmin,
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
) -> Response {
    info!(email = %account.email, "admin logged out");
    let jar = session::end(jar, &state.cookies);
    let jar = flash::push(jar, Flash::info("You have been logged out."), &state.cookies);
    (jar, Redirect::to("/")).into_response()
}
