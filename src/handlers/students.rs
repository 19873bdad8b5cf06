use crate::db::StudentRecord;
use crate::flash::{self, Flash};
use crate::middleware::RequireAdmin;
use crate::templates::{EditTemplate, IndexTemplate};
use crate::types::forms::StudentForm;
use crate::{RosterError, router::RosterState};
use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::{debug, info};

/// GET /index -> every student plus the add form.
pub async fn list_students(
    RequireAdmin(account): RequireAdmin,
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
) -> Result<Response, RosterError> {
    let students = state.students.list().await?;
    let (jar, flashes) = flash::take(jar, &state.cookies);
    let page = IndexTemplate {
        flashes,
        admin_email: account.email,
        students,
    };
    Ok((jar, Html(page.render()?)).into_response())
}

/// POST /add
pub async fn add_student(
    _admin: RequireAdmin,
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
    Form(form): Form<StudentForm>,
) -> Result<Response, RosterError> {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(e) => {
            let jar = flash::push(jar, Flash::warning(e.to_string()), &state.cookies);
            return Ok((jar, Redirect::to("/index")).into_response());
        }
    };

    let student = state.students.create(&draft).await?;
    info!(id = student.id, "student added");
    let jar = flash::push(
        jar,
        Flash::success("Student added successfully!"),
        &state.cookies,
    );
    Ok((jar, Redirect::to("/index")).into_response())
}

/// GET /delete/{id}. Unknown or malformed ids redirect without touching anything.
pub async fn delete_student(
    _admin: RequireAdmin,
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
    Path(raw_id): Path<String>,
) -> Result<Response, RosterError> {
    let Ok(id) = raw_id.parse::<i64>() else {
        debug!(id = %raw_id, "ignoring delete of malformed id");
        return Ok(Redirect::to("/index").into_response());
    };

    if !state.students.delete(id).await? {
        debug!(id, "delete of absent student ignored");
        return Ok(Redirect::to("/index").into_response());
    }

    info!(id, "student deleted");
    let jar = flash::push(
        jar,
        Flash::success("Student deleted successfully!"),
        &state.cookies,
    );
    Ok((jar, Redirect::to("/index")).into_response())
}

/// GET /edit/{id}
pub async fn edit_page(
    RequireAdmin(account): RequireAdmin,
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
    Path(raw_id): Path<String>,
) -> Result<Response, RosterError> {
    let student = load_student(&state, &raw_id).await?;
    let (jar, flashes) = flash::take(jar, &state.cookies);
    let page = EditTemplate {
        flashes,
        admin_email: account.email,
        student,
    };
    Ok((jar, Html(page.render()?)).into_response())
}

/// POST /edit/{id}
pub async fn edit_submit(
    _admin: RequireAdmin,
    State(state): State<RosterState>,
    jar: PrivateCookieJar,
    Path(raw_id): Path<String>,
    Form(form): Form<StudentForm>,
) -> Result<Response, RosterError> {
    let student = load_student(&state, &raw_id).await?;

    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(e) => {
            let jar = flash::push(jar, Flash::warning(e.to_string()), &state.cookies);
            let back = format!("/edit/{}", student.id);
            return Ok((jar, Redirect::to(&back)).into_response());
        }
    };

    let updated = state.students.update(student.id, &draft).await?;
    info!(id = updated.id, "student updated");
    let jar = flash::push(
        jar,
        Flash::success("Student updated successfully!"),
        &state.cookies,
    );
    Ok((jar, Redirect::to("/index")).into_response())
}

async fn load_student(state: &RosterState, raw_id: &str) -> Result<StudentRecord, RosterError> {
    let id = raw_id
        .parse::<i64>()
        .map_err(|_| RosterError::MalformedId(raw_id.to_string()))?;
    state
        .students
        .get(id)
        .await?
        .ok_or(RosterError::StudentNotFound(id))
}
