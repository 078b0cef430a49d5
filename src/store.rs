//! Row store abstraction.
//!
//! The blog never owns its data: posts, comments and accounts live in an
//! external table store with row filtering and a session subsystem.
//! [`RowStore`] is the seam; [`JsonStore`] is the file backed implementation
//! the CLI uses.

mod json;

use serde_json::{Map, Value};
use std::cmp::Ordering;
use thiserror::Error;

use crate::model::User;

pub use json::JsonStore;

/// One row as returned by the store.
pub type Row = Map<String, Value>;

/// Errors reported by a row store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No row with id {id} in {table}")]
    NotFound { table: &'static str, id: String },
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Tables the blog reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Posts,
    Comments,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Posts => "posts",
            Table::Comments => "comments",
        }
    }
}

/// Single column predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Column equals value exactly.
    Eq { column: String, value: String },
    /// Column contains value, ignoring case.
    ILike { column: String, needle: String },
}

impl Condition {
    fn matches(&self, row: &Row) -> bool {
        match self {
            Condition::Eq { column, value } => {
                row.get(column).is_some_and(|v| value_text(v) == *value)
            }
            Condition::ILike { column, needle } => row.get(column).is_some_and(|v| {
                value_text(v)
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            }),
        }
    }
}

/// Conjunction of column predicates. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn ilike(mut self, column: impl Into<String>, needle: impl Into<String>) -> Self {
        self.conditions.push(Condition::ILike {
            column: column.into(),
            needle: needle.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.conditions.iter().all(|c| c.matches(row))
    }
}

/// Sort instruction on a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    column: String,
    ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Sorts rows in place. Stable, so ties keep insertion order.
    pub fn sort(&self, rows: &mut [Row]) {
        rows.sort_by(|a, b| {
            let ord = compare_values(a.get(&self.column), b.get(&self.column));
            if self.ascending { ord } else { ord.reverse() }
        });
    }
}

/// Inclusive, zero based window of row offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    /// Applies the window to already filtered and sorted rows.
    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        if self.end < self.start {
            return Vec::new();
        }
        rows.into_iter()
            .skip(self.start)
            .take(self.end.saturating_sub(self.start).saturating_add(1))
            .collect()
    }
}

/// Rows returned by a query plus the number of rows the filter matched
/// before the range was applied, when the store reports it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub rows: Vec<Row>,
    pub count: Option<usize>,
}

/// External table store with a session subsystem.
///
/// Implementations must be shareable across threads: the detail view reads
/// a post and its comments concurrently.
pub trait RowStore: Send + Sync {
    /// Identity of the current session, if any.
    fn current_user(&self) -> Result<Option<User>, StoreError>;

    /// Filtered, ordered and optionally windowed read.
    fn query_rows(
        &self,
        table: Table,
        filter: &Filter,
        order: &Order,
        range: Option<Range>,
    ) -> Result<RowSet, StoreError>;

    /// Single row by id.
    fn get_row(&self, table: Table, id: &str) -> Result<Row, StoreError>;

    /// Inserts a row and returns it as persisted, including generated columns.
    fn insert_row(&self, table: Table, row: Row) -> Result<Row, StoreError>;

    fn sign_in(&self, email: &str, password: &str) -> Result<User, StoreError>;

    fn sign_up(&self, email: &str, password: &str) -> Result<User, StoreError>;

    fn sign_out(&self) -> Result<(), StoreError>;
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Orders JSON values: missing and null first, then numbers, then strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(_)), _) => Ordering::Less,
        (_, Some(Value::Number(_))) => Ordering::Greater,
        (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
    }
}
