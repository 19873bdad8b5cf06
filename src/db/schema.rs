//! SQL DDL for initializing the roster database.

/// SQLite schema with:
/// - `accounts.email` UNIQUE; the seeded admin is the only row in practice
/// - `AUTOINCREMENT` on `students.id` so ids of deleted rows are never reused
/// - `students.age` constrained to positive values
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age > 0),
    grade TEXT NOT NULL
);
"#;
