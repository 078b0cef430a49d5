//! Shared test utilities for integration tests.
//!
//! Provides store fixtures: a file backed store seeded with posts, and a
//! recording store that counts calls and can be told to fail.

#![allow(dead_code)]

use anyhow::Result;
use devlog::{
    Filter, JsonStore, Order, Range, Row, RowSet, RowStore, StoreError, Table, User,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Builds a post row with the columns the listing reads.
pub fn post_row(id: &str, category: &str, title: &str, created_at: i64) -> Row {
    let Value::Object(row) = json!({
        "id": id,
        "title": title,
        "description": format!("About {title}"),
        "content": format!("# {title}\n\nBody of **{title}**."),
        "author_name": "seed",
        "category": category,
        "read_time_minutes": 4,
        "created_at": created_at,
        "tags": ["seed"],
    }) else {
        unreachable!("json! object literal is always an object")
    };
    row
}

/// Creates a store file in a temporary directory holding `rows` as posts.
///
/// The directory must outlive the store.
///
/// # Errors
///
/// Returns error if the store cannot be created or written
pub fn seeded_store(rows: Vec<Row>) -> Result<(TempDir, JsonStore)> {
    let dir = TempDir::new()?;
    let store = JsonStore::open(dir.path().join("devlog.json"))?;
    for row in rows {
        store.insert_row(Table::Posts, row)?;
    }
    Ok((dir, store))
}

/// `count` Frontend posts followed by `others` Backend posts, newest last.
pub fn mixed_posts(count: usize, others: usize) -> Vec<Row> {
    let frontend = (0..count).map(|i| {
        post_row(
            &format!("f{i}"),
            "Frontend",
            &format!("Frontend post {i}"),
            1_700_000_000 + i as i64,
        )
    });
    let backend = (0..others).map(|i| {
        post_row(
            &format!("b{i}"),
            "Backend",
            &format!("Backend post {i}"),
            1_700_100_000 + i as i64,
        )
    });
    frontend.chain(backend).collect()
}

/// Store double that records every call before delegating to an in-memory
/// store.
pub struct RecordingStore {
    inner: JsonStore,
    fail_reads: bool,
    fail_writes: bool,
    fail_session: bool,
    queries: AtomicUsize,
    inserts: AtomicUsize,
    session_lookups: AtomicUsize,
    last_query: Mutex<Option<(Table, Filter, Order, Option<Range>)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: JsonStore::in_memory(),
            fail_reads: false,
            fail_writes: false,
            fail_session: false,
            queries: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            session_lookups: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Every read answers with a backend error.
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::new()
        }
    }

    /// Every insert answers with a backend rejection.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// Session lookups answer with a backend error.
    pub fn failing_session() -> Self {
        Self {
            fail_session: true,
            ..Self::new()
        }
    }

    /// Registers and signs in an account.
    pub fn signed_in(self) -> Self {
        self.inner
            .sign_up("writer@example.com", "secret1")
            .expect("Should sign up");
        self.inner
            .sign_in("writer@example.com", "secret1")
            .expect("Should sign in");
        self
    }

    pub fn inner(&self) -> &JsonStore {
        &self.inner
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn session_lookups(&self) -> usize {
        self.session_lookups.load(Ordering::SeqCst)
    }

    /// Total calls of any kind.
    pub fn calls(&self) -> usize {
        self.queries() + self.inserts() + self.session_lookups()
    }

    pub fn last_query(&self) -> Option<(Table, Filter, Order, Option<Range>)> {
        self.last_query.lock().clone()
    }
}

impl RowStore for RecordingStore {
    fn current_user(&self) -> Result<Option<User>, StoreError> {
        self.session_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_session {
            return Err(StoreError::Unavailable("auth service timed out".into()));
        }
        self.inner.current_user()
    }

    fn query_rows(
        &self,
        table: Table,
        filter: &Filter,
        order: &Order,
        range: Option<Range>,
    ) -> Result<RowSet, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock() = Some((table, filter.clone(), order.clone(), range));
        if self.fail_reads {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        self.inner.query_rows(table, filter, order, range)
    }

    fn get_row(&self, table: Table, id: &str) -> Result<Row, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        self.inner.get_row(table, id)
    }

    fn insert_row(&self, table: Table, row: Row) -> Result<Row, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(StoreError::Rejected("new row violates row-level security policy".into()));
        }
        self.inner.insert_row(table, row)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<User, StoreError> {
        self.inner.sign_in(email, password)
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<User, StoreError> {
        self.inner.sign_up(email, password)
    }

    fn sign_out(&self) -> Result<(), StoreError> {
        self.inner.sign_out()
    }
}
