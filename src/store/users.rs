//! User accounts.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::{Database, StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        let created_at: String = row.get(3)?;
        Ok(Self {
            id: row.get(0)?,
            email: row.get(1)?,
            password_hash: row.get(2)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

impl Database {
    /// Inserts a user. Fails with [`StoreError::Duplicate`] if the email is taken.
    pub fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<User> {
        let created_at = Utc::now();
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![email, password_hash, created_at.to_rfc3339()],
        )
        .map_err(StoreError::from_write)?;

        Ok(User {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }

    pub fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let conn = self.conn.lock();
        let user = conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
                params![email],
                User::from_row,
            )
            .optional()?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_find_user() {
        let db = Database::in_memory().unwrap();

        let created = db.create_user("ada@example.com", "hash").unwrap();
        let found = db.find_user_by_email("ada@example.com").unwrap().unwrap();

        assert_eq!(created.id, found.id);
        assert_eq!(found.password_hash, "hash");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let db = Database::in_memory().unwrap();

        db.create_user("ada@example.com", "hash").unwrap();
        let err = db.create_user("ada@example.com", "other").unwrap_err();

        assert!(matches!(err, StoreError::Duplicate));
    }

    #[test]
    fn test_unknown_email_is_none() {
        let db = Database::in_memory().unwrap();
        assert!(db.find_user_by_email("ghost@example.com").unwrap().is_none());
    }
}
