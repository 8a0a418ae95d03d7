//! User repository contract and SQLite implementation.

use crate::model::user::{normalize_email, UserId, UserInfo};
use crate::repo::error::{map_unique_violation, RepoResult};
use rusqlite::{Connection, Row, ToSql};

const USER_SELECT_SQL: &str = "SELECT id, email FROM user_infos";

/// Read/write access to user identity records.
pub trait UserRepository {
    /// Inserts a user; a taken email surfaces as `RepoError::Conflict`.
    fn create_user(&self, email: &str) -> RepoResult<UserInfo>;
    fn find_by_id(&self, id: UserId) -> RepoResult<Option<UserInfo>>;
    /// Looks up by normalized email; malformed input is a validation error.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<UserInfo>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find_one(&self, where_sql: &str, value: &dyn ToSql) -> RepoResult<Option<UserInfo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE {where_sql};"))?;
        let mut rows = stmt.query([value])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, email: &str) -> RepoResult<UserInfo> {
        let email = normalize_email(email)?;
        self.conn
            .execute("INSERT INTO user_infos (email) VALUES (?1);", [email.as_str()])
            .map_err(|err| map_unique_violation(err, "email already registered"))?;

        Ok(UserInfo {
            id: self.conn.last_insert_rowid(),
            email,
        })
    }

    fn find_by_id(&self, id: UserId) -> RepoResult<Option<UserInfo>> {
        self.find_one("id = ?1", &id)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<UserInfo>> {
        let email = normalize_email(email)?;
        self.find_one("email = ?1", &email)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<UserInfo> {
    Ok(UserInfo {
        id: row.get("id")?,
        email: row.get("email")?,
    })
}
