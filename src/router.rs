use crate::auth::CookiePolicy;
use crate::db::{AccountStorage, SqlitePool, StudentStorage};
use crate::handlers::auth::{login_page, login_submit, logout};
use crate::handlers::students::{
    add_student, delete_student, edit_page, edit_submit, list_students,
};
use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;

#[derive(Clone)]
pub struct RosterState {
    pub accounts: AccountStorage,
    pub students: StudentStorage,
    pub cookies: CookiePolicy,
    key: Key,
}

impl RosterState {
    pub fn new(pool: SqlitePool, key: Key, cookies: CookiePolicy) -> Self {
        Self {
            accounts: AccountStorage::new(pool.clone()),
            students: StudentStorage::new(pool),
            cookies,
            key,
        }
    }
}

impl FromRef<RosterState> for Key {
    fn from_ref(state: &RosterState) -> Self {
        state.key.clone()
    }
}

pub fn roster_router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(login_page).post(login_submit))
        .route("/logout", get(logout))
        .route("/index", get(list_students))
        .route("/add", post(add_student))
        .route("/delete/{id}", get(delete_student))
        .route("/edit/{id}", get(edit_page).post(edit_submit))
        .with_state(state)
}
