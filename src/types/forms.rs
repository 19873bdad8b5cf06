use crate::db::StudentDraft;
use crate::error::ValidationError;
use serde::Deserialize;

/// Login form. Missing keys deserialize as empty strings and simply fail to match.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Add/edit form. Age arrives as text so non-numeric input becomes a
/// validation message instead of a rejected request.
#[derive(Debug, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub grade: String,
}

impl StudentForm {
    pub fn into_draft(self) -> Result<StudentDraft, ValidationError> {
        StudentDraft::new(self.name, &self.age, self.grade)
    }
}
