//! Askama views. Markup lives under `templates/`.

use crate::db::StudentRecord;
use crate::flash::Flash;
use askama::Template;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub flashes: Vec<Flash>,
    /// Echoed back into the form after a failed attempt.
    pub email: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub flashes: Vec<Flash>,
    pub admin_email: String,
    pub students: Vec<StudentRecord>,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub flashes: Vec<Flash>,
    pub admin_email: String,
    pub student: StudentRecord,
}
