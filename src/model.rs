//! Rows the blog reads from and writes to the row store.

use serde::{Deserialize, Serialize};

/// Published blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_image: Option<String>,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_read_time")]
    pub read_time_minutes: u32,
    /// Unix seconds.
    pub created_at: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_read_time() -> u32 {
    5
}

/// Reader comment attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_image: Option<String>,
    pub content: String,
    /// Unix seconds.
    pub created_at: i64,
}

/// Signed in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    /// Part of the email before `@`, used as the public author name.
    pub fn display_name(&self) -> &str {
        self.email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or("Anonymous")
    }
}
