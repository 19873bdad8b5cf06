use crate::error::ValidationError;
use sqlx::FromRow;

pub const NAME_MAX_CHARS: usize = 100;
pub const GRADE_MAX_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub grade: String,
}

/// Field values for a create or update that have passed validation.
///
/// Values are kept exactly as submitted; whitespace only counts when deciding
/// whether a field is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    name: String,
    age: u32,
    grade: String,
}

impl StudentDraft {
    pub fn new(
        name: impl Into<String>,
        age: &str,
        grade: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let grade = grade.into();

        if [name.as_str(), age, grade.as_str()]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::MissingField);
        }

        let age = age
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|age| *age > 0)
            .ok_or(ValidationError::InvalidAge)?;

        if name.chars().count() > NAME_MAX_CHARS {
            return Err(ValidationError::NameTooLong(NAME_MAX_CHARS));
        }
        if grade.chars().count() > GRADE_MAX_CHARS {
            return Err(ValidationError::GradeTooLong(GRADE_MAX_CHARS));
        }

        Ok(Self { name, age, grade })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }
}
