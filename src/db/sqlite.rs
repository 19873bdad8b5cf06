use crate::auth::password;
use crate::db::models::{Account, StudentDraft, StudentRecord};
use crate::db::schema::SQLITE_INIT;
use crate::error::RosterError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the database at `database_url` and apply the schema.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RosterError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_opts)
        .await?;
    init_schema(&pool).await?;
    info!(database_url = %database_url, "database ready");
    Ok(pool)
}

/// Initialize the schema by executing the bundled DDL.
async fn init_schema(pool: &SqlitePool) -> Result<(), RosterError> {
    // sqlx::query runs one statement at a time
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct AccountStorage {
    pool: SqlitePool,
}

impl AccountStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Account>, RosterError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RosterError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    /// Create the administrative account unless one with `email` already exists.
    /// An existing account keeps its stored password.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<Account, RosterError> {
        if let Some(existing) = self.find_by_email(email).await? {
            return Ok(existing);
        }

        let password_hash = password::hash_password(password)?;
        sqlx::query(
            "INSERT INTO accounts (email, password_hash) VALUES (?, ?) ON CONFLICT(email) DO NOTHING",
        )
        .bind(email)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;
        info!(email = %email, "seeded admin account");

        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(account)
    }

    /// Check an email/password pair. Returns the account only when both match.
    pub async fn verify_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, RosterError> {
        match self.find_by_email(email).await? {
            Some(account) if password::verify_password(password, &account.password_hash) => {
                Ok(Some(account))
            }
            Some(_) => Ok(None),
            None => {
                password::verify_dummy(password);
                Ok(None)
            }
        }
    }
}

#[derive(Clone)]
pub struct StudentStorage {
    pool: SqlitePool,
}

impl StudentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<StudentRecord>, RosterError> {
        let rows = sqlx::query_as::<_, StudentRecord>(
            "SELECT id, name, age, grade FROM students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Option<StudentRecord>, RosterError> {
        let row = sqlx::query_as::<_, StudentRecord>(
            "SELECT id, name, age, grade FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create(&self, draft: &StudentDraft) -> Result<StudentRecord, RosterError> {
        let row = sqlx::query_as::<_, StudentRecord>(
            r#"INSERT INTO students (name, age, grade) VALUES (?, ?, ?)
               RETURNING id, name, age, grade"#,
        )
        .bind(draft.name())
        .bind(draft.age())
        .bind(draft.grade())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite name, age and grade of an existing record.
    pub async fn update(&self, id: i64, draft: &StudentDraft) -> Result<StudentRecord, RosterError> {
        sqlx::query_as::<_, StudentRecord>(
            r#"UPDATE students SET name = ?, age = ?, grade = ?
               WHERE id = ?
               RETURNING id, name, age, grade"#,
        )
        .bind(draft.name())
        .bind(draft.age())
        .bind(draft.grade())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RosterError::StudentNotFound(id))
    }

    /// Delete by id. Absent ids are not an error; returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, RosterError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn temp_pool(dir: &TempDir) -> SqlitePool {
        let url = format!("sqlite:{}", dir.path().join("roster.db").display());
        connect(&url).await.unwrap()
    }

    fn draft(name: &str, age: &str, grade: &str) -> StudentDraft {
        StudentDraft::new(name, age, grade).unwrap()
    }

    #[tokio::test]
    async fn student_crud_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = StudentStorage::new(temp_pool(&dir).await);

        let ana = store.create(&draft("Ana", "12", "A")).await.unwrap();
        let ben = store.create(&draft("Ben", "13", "B")).await.unwrap();
        assert_ne!(ana.id, ben.id);

        let updated = store.update(ana.id, &draft("Ana Maria", "14", "A+")).await.unwrap();
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.age, 14);

        assert!(store.delete(ben.id).await.unwrap());
        assert!(!store.delete(ben.id).await.unwrap());

        let all = store.list().await.unwrap();
        assert_eq!(all, vec![updated]);
    }

    #[tokio::test]
    async fn update_missing_student_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = StudentStorage::new(temp_pool(&dir).await);

        let err = store.update(42, &draft("Ghost", "10", "C")).await.unwrap_err();
        assert!(matches!(err, RosterError::StudentNotFound(42)));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let dir = TempDir::new().unwrap();
        let store = StudentStorage::new(temp_pool(&dir).await);

        let first = store.create(&draft("Ana", "12", "A")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(&draft("Ben", "12", "A")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn seeding_is_idempotent_and_login_checks_hash() {
        let dir = TempDir::new().unwrap();
        let accounts = AccountStorage::new(temp_pool(&dir).await);

        let first = accounts.ensure_admin("admin@example.com", "admin123").await.unwrap();
        let again = accounts.ensure_admin("admin@example.com", "other").await.unwrap();
        assert_eq!(first, again);
        assert_ne!(first.password_hash, "admin123");

        let ok = accounts.verify_login("admin@example.com", "admin123").await.unwrap();
        assert_eq!(ok.map(|a| a.id), Some(first.id));
        assert!(accounts.verify_login("admin@example.com", "other").await.unwrap().is_none());
        assert!(accounts.verify_login("nobody@example.com", "admin123").await.unwrap().is_none());
    }
}
