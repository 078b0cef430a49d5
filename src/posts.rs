//! Blog operations against the row store: listing, detail and publishing.

use serde_json::{Value, json};
use thiserror::Error;

use crate::avatar::avatar_url;
use crate::draft::PostDraft;
use crate::model::{Comment, Post};
use crate::query::{QueryResult, QuerySpec, build_query, interpret_result, interpret_result_checked};
use crate::store::{Filter, Order, Row, RowStore, StoreError, Table};

/// Failure to publish a post.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("You need to sign in to publish.")]
    LoginRequired,
    /// Backend rejected the write; carries the backend's message.
    #[error("{0}")]
    Store(String),
    #[error("Store returned an unreadable post: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One listing page. Store failures come back as an empty page.
pub fn fetch_posts<S: RowStore + ?Sized>(store: &S, spec: &QuerySpec) -> QueryResult {
    let query = build_query(spec);
    crate::debug!(
        "query";
        "category={:?} search={:?} range={}..={}",
        query.category,
        query.search,
        query.range_start,
        query.range_end
    );
    interpret_result(store.query_rows(
        Table::Posts,
        &query.filter(),
        &query.order(),
        Some(query.range()),
    ))
}

/// One listing page, keeping a store failure distinct from "no posts".
///
/// # Errors
///
/// Returns the store error when the query fails.
pub fn fetch_posts_checked<S: RowStore + ?Sized>(
    store: &S,
    spec: &QuerySpec,
) -> Result<QueryResult, StoreError> {
    let query = build_query(spec);
    interpret_result_checked(store.query_rows(
        Table::Posts,
        &query.filter(),
        &query.order(),
        Some(query.range()),
    ))
}

/// A post with its comments, oldest comment first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDetail {
    pub post: Option<Post>,
    pub comments: Vec<Comment>,
}

/// Fetches a post and its comments concurrently.
///
/// A missing post or a failed read yields an empty detail; the failure is
/// logged. A failed comment read alone only drops the comments.
pub fn fetch_post_detail<S: RowStore + ?Sized>(store: &S, post_id: &str) -> PostDetail {
    let (post, comments) = rayon::join(
        || store.get_row(Table::Posts, post_id),
        || {
            store.query_rows(
                Table::Comments,
                &Filter::new().eq("post_id", post_id),
                &Order::asc("created_at"),
                None,
            )
        },
    );

    let post = match post.and_then(|row| Ok(decode::<Post>(row)?)) {
        Ok(post) => post,
        Err(e) => {
            crate::log!("error"; "post {} detail failed: {}", post_id, e);
            return PostDetail::default();
        }
    };

    let comments: Vec<Comment> = match comments {
        Ok(set) => set
            .rows
            .into_iter()
            .filter_map(|row| match decode(row) {
                Ok(comment) => Some(comment),
                Err(e) => {
                    crate::debug!("posts"; "skipping malformed comment row: {}", e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            crate::log!("error"; "comments for post {} failed: {}", post_id, e);
            Vec::new()
        }
    };

    PostDetail {
        post: Some(post),
        comments,
    }
}

/// Publishes a validated draft as the signed in user.
///
/// The author name is the local part of the session email and the author
/// image a hosted avatar keyed by the user id.
///
/// # Errors
///
/// - [`PublishError::LoginRequired`] when there is no session; nothing is written
/// - [`PublishError::Store`] when the session lookup or the insert fails
/// - [`PublishError::Decode`] when the inserted row is not a post
pub fn publish<S: RowStore + ?Sized>(store: &S, draft: &PostDraft) -> Result<Post, PublishError> {
    let user = match store.current_user() {
        Ok(Some(user)) => user,
        Ok(None) => return Err(PublishError::LoginRequired),
        Err(e) => {
            crate::log!("error"; "session lookup failed: {}", e);
            return Err(PublishError::Store(e.to_string()));
        }
    };

    let mut row = Row::new();
    row.insert("title".into(), json!(draft.title()));
    row.insert("description".into(), json!(draft.description()));
    row.insert("content".into(), json!(draft.content()));
    row.insert("category".into(), json!(draft.category()));
    row.insert("tags".into(), json!(draft.tags()));
    row.insert("read_time_minutes".into(), json!(draft.read_time_minutes()));
    row.insert("author_name".into(), json!(user.display_name()));
    row.insert("author_image".into(), json!(avatar_url(&user.id)));
    row.insert("image_url".into(), Value::Null);

    let inserted = store.insert_row(Table::Posts, row).map_err(|e| {
        crate::log!("error"; "publish failed: {}", e);
        PublishError::Store(e.to_string())
    })?;

    let post: Post = decode(inserted)?;
    crate::log!("publish"; "post {} \"{}\" by {}", post.id, post.title, post.author_name);
    Ok(post)
}

fn decode<T: serde::de::DeserializeOwned>(row: Row) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(row))
}
