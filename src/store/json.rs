//! File backed row store.
//!
//! Keeps every table in one JSON document. Reads go through a shared lock,
//! writes take the exclusive lock and rewrite the file before returning, so
//! a successful insert is durable. A write whose file update fails leaves the
//! tables as they were.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Filter, Order, Range, Row, RowSet, RowStore, StoreError, Table};
use crate::model::User;
use crate::util::unix_now;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Tables {
    #[serde(default)]
    posts: Vec<Row>,
    #[serde(default)]
    comments: Vec<Row>,
    #[serde(default)]
    users: Vec<Account>,
    /// Id of the signed in user.
    #[serde(default)]
    session: Option<String>,
}

impl Tables {
    fn rows(&self, table: Table) -> &Vec<Row> {
        match table {
            Table::Posts => &self.posts,
            Table::Comments => &self.comments,
        }
    }

    fn rows_mut(&mut self, table: Table) -> &mut Vec<Row> {
        match table {
            Table::Posts => &mut self.posts,
            Table::Comments => &mut self.comments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Account {
    id: String,
    email: String,
    password_sha256: String,
}

impl Account {
    fn user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

/// Row store persisted as a single JSON file.
///
/// A store opened with [`JsonStore::in_memory`] never touches disk.
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    tables: RwLock<Tables>,
}

impl JsonStore {
    /// Opens the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                Tables::default()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            Tables::default()
        };

        Ok(Self {
            path: Some(path),
            tables: RwLock::new(tables),
        })
    }

    /// Empty store that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(tables)?)?;
        Ok(())
    }

    /// Persists `tables`, rolling the in-memory change back with `undo` when
    /// the write fails.
    fn persist_or_undo(
        &self,
        tables: &mut Tables,
        undo: impl FnOnce(&mut Tables),
    ) -> Result<(), StoreError> {
        self.persist(tables).inspect_err(|_| undo(tables))
    }
}

impl RowStore for JsonStore {
    fn current_user(&self) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read();
        Ok(tables.session.as_ref().and_then(|id| {
            tables
                .users
                .iter()
                .find(|account| &account.id == id)
                .map(Account::user)
        }))
    }

    fn query_rows(
        &self,
        table: Table,
        filter: &Filter,
        order: &Order,
        range: Option<Range>,
    ) -> Result<RowSet, StoreError> {
        let tables = self.tables.read();
        let mut rows: Vec<Row> = tables
            .rows(table)
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        drop(tables);

        order.sort(&mut rows);
        let count = rows.len();
        let rows = match range {
            Some(range) => range.slice(rows),
            None => rows,
        };

        Ok(RowSet {
            rows,
            count: Some(count),
        })
    }

    fn get_row(&self, table: Table, id: &str) -> Result<Row, StoreError> {
        self.tables
            .read()
            .rows(table)
            .iter()
            .find(|row| row.get("id").is_some_and(|v| id_matches(v, id)))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                table: table.name(),
                id: id.to_string(),
            })
    }

    fn insert_row(&self, table: Table, mut row: Row) -> Result<Row, StoreError> {
        let mut tables = self.tables.write();
        let rows = tables.rows_mut(table);

        if !row.contains_key("id") {
            row.insert("id".into(), Value::String(next_id(rows).to_string()));
        }
        if !row.contains_key("created_at") {
            row.insert("created_at".into(), Value::from(unix_now()));
        }
        rows.push(row.clone());

        self.persist_or_undo(&mut tables, |t| {
            t.rows_mut(table).pop();
        })?;
        Ok(row)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.write();
        let digest = password_digest(email, password);
        let user = tables
            .users
            .iter()
            .find(|account| account.email == email && account.password_sha256 == digest)
            .map(Account::user)
            .ok_or_else(|| StoreError::Auth("Invalid login credentials".into()))?;

        let previous = tables.session.replace(user.id.clone());
        self.persist_or_undo(&mut tables, |t| t.session = previous)?;
        Ok(user)
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<User, StoreError> {
        if !email.contains('@') {
            return Err(StoreError::Auth("Unable to validate email address".into()));
        }
        if password.len() < 6 {
            return Err(StoreError::Auth(
                "Password should be at least 6 characters".into(),
            ));
        }

        let mut tables = self.tables.write();
        if tables.users.iter().any(|account| account.email == email) {
            return Err(StoreError::Auth("User already registered".into()));
        }

        let account = Account {
            id: user_id(email),
            email: email.to_string(),
            password_sha256: password_digest(email, password),
        };
        let user = account.user();
        tables.users.push(account);

        self.persist_or_undo(&mut tables, |t| {
            t.users.pop();
        })?;
        Ok(user)
    }

    fn sign_out(&self) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        let previous = tables.session.take();
        self.persist_or_undo(&mut tables, |t| t.session = previous)
    }
}

fn id_matches(value: &Value, id: &str) -> bool {
    match value {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    }
}

/// One past the largest numeric id in the table.
fn next_id(rows: &[Row]) -> u64 {
    rows.iter()
        .filter_map(|row| match row.get("id")? {
            Value::String(s) => s.parse::<u64>().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        })
        .max()
        .map_or(1, |max| max + 1)
}

fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(b"\0");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn user_id(email: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(email.as_bytes()));
    digest[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: &str, category: &str, title: &str, created_at: i64) -> Row {
        let Value::Object(map) = json!({
            "id": id,
            "title": title,
            "category": category,
            "created_at": created_at,
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        // Arrange
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("store.json");

        // Act
        let store = JsonStore::open(&path).expect("Should open missing file");

        // Assert
        let set = store
            .query_rows(Table::Posts, &Filter::new(), &Order::desc("created_at"), None)
            .expect("Should query");
        assert!(set.rows.is_empty());
        assert_eq!(set.count, Some(0));
        assert!(!path.exists(), "Nothing written before first insert");
    }

    #[test]
    fn test_insert_assigns_id_and_persists() {
        // Arrange
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("store.json");
        let store = JsonStore::open(&path).expect("Should open");

        // Act
        let mut row = Row::new();
        row.insert("title".into(), json!("First"));
        let inserted = store.insert_row(Table::Posts, row).expect("Should insert");

        // Assert
        assert_eq!(inserted["id"], json!("1"));
        assert!(inserted.contains_key("created_at"));

        let reopened = JsonStore::open(&path).expect("Should reopen");
        let fetched = reopened.get_row(Table::Posts, "1").expect("Should find row");
        assert_eq!(fetched["title"], json!("First"));
    }

    #[test]
    fn test_query_counts_before_range() {
        // Arrange
        let store = JsonStore::in_memory();
        for i in 0..8 {
            store
                .insert_row(Table::Posts, post(&i.to_string(), "Frontend", "t", i))
                .expect("Should insert");
        }
        store
            .insert_row(Table::Posts, post("99", "Backend", "t", 100))
            .expect("Should insert");

        // Act
        let set = store
            .query_rows(
                Table::Posts,
                &Filter::new().eq("category", "Frontend"),
                &Order::desc("created_at"),
                Some(Range { start: 0, end: 5 }),
            )
            .expect("Should query");

        // Assert
        assert_eq!(set.rows.len(), 6);
        assert_eq!(set.count, Some(8));
        assert_eq!(set.rows[0]["id"], json!("7"));
    }

    #[test]
    fn test_get_row_not_found() {
        let store = JsonStore::in_memory();

        let err = store.get_row(Table::Posts, "404").unwrap_err();

        assert!(matches!(err, StoreError::NotFound { table: "posts", .. }));
    }

    #[test]
    fn test_sign_up_then_sign_in_sets_session() {
        // Arrange
        let store = JsonStore::in_memory();
        store
            .sign_up("dev@example.com", "hunter22")
            .expect("Should sign up");
        assert_eq!(store.current_user().unwrap(), None);

        // Act
        let user = store
            .sign_in("dev@example.com", "hunter22")
            .expect("Should sign in");

        // Assert
        assert_eq!(store.current_user().unwrap(), Some(user));

        store.sign_out().expect("Should sign out");
        assert_eq!(store.current_user().unwrap(), None);
    }

    #[test]
    fn test_sign_in_wrong_password() {
        let store = JsonStore::in_memory();
        store
            .sign_up("dev@example.com", "hunter22")
            .expect("Should sign up");

        let result = store.sign_in("dev@example.com", "wrong");

        assert!(matches!(result, Err(StoreError::Auth(_))));
    }

    #[test]
    fn test_sign_up_duplicate_rejected() {
        let store = JsonStore::in_memory();
        store.sign_up("a@b.c", "secret1").expect("Should sign up");

        let result = store.sign_up("a@b.c", "secret2");

        assert!(matches!(result, Err(StoreError::Auth(msg)) if msg.contains("already")));
    }

    #[test]
    fn test_numeric_ids_match_string_lookup() {
        let store = JsonStore::in_memory();
        let mut row = Row::new();
        row.insert("id".into(), json!(42));
        store.insert_row(Table::Comments, row).expect("Should insert");

        assert!(store.get_row(Table::Comments, "42").is_ok());
    }

    #[test]
    fn test_failed_write_leaves_tables_unchanged() {
        // Arrange
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").expect("Should write file");
        let store = JsonStore::open(blocker.join("store.json")).expect("Should open");

        // Act
        let inserted = store.insert_row(Table::Posts, post("1", "Backend", "Lost", 10));
        let signed_up = store.sign_up("dev@example.com", "hunter22");

        // Assert
        assert!(matches!(inserted, Err(StoreError::Io(_))));
        assert!(matches!(signed_up, Err(StoreError::Io(_))));
        let set = store
            .query_rows(Table::Posts, &Filter::new(), &Order::desc("created_at"), None)
            .expect("Should query");
        assert!(set.rows.is_empty());
        assert_eq!(set.count, Some(0));
        assert!(matches!(
            store.sign_in("dev@example.com", "hunter22"),
            Err(StoreError::Auth(_))
        ));
    }

    #[test]
    fn test_failed_session_write_keeps_previous_session() {
        // Arrange
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let data_dir = dir.path().join("data");
        let store = JsonStore::open(data_dir.join("store.json")).expect("Should open");
        store
            .sign_up("dev@example.com", "hunter22")
            .expect("Should sign up");
        let user = store
            .sign_in("dev@example.com", "hunter22")
            .expect("Should sign in");
        fs::remove_dir_all(&data_dir).expect("Should remove data dir");
        fs::write(&data_dir, "not a directory").expect("Should write file");

        // Act
        let result = store.sign_out();

        // Assert
        assert!(result.is_err());
        assert_eq!(store.current_user().unwrap(), Some(user));
    }
}
