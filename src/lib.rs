//! Developer blog: category browsing, markdown authoring and static HTML views.
//!
//! Posts live behind the [`RowStore`] trait. The listing composes a filtered,
//! paginated query from the view's category, search term and page; the
//! editor renders a live preview with [`render_preview`] and publishes a
//! validated [`PostDraft`]. [`build_site`] writes the whole blog as static
//! HTML.

#[macro_use]
pub mod logger;

pub mod assets;
pub mod avatar;
pub mod components;
mod config;
pub mod draft;
pub mod markdown;
pub mod model;
pub mod pages;
pub mod posts;
pub mod query;
pub mod session;
mod site;
pub mod state;
pub mod store;
pub mod util;

pub use assets::write_css_assets;
pub use config::{Command, Config, ConfigError, SiteConfig};
pub use draft::{CATEGORIES, DraftError, DraftForm, PostDraft};
pub use markdown::{PostRenderer, render_preview};
pub use model::{Comment, Post, User};
pub use posts::{
    PostDetail, PublishError, fetch_post_detail, fetch_posts, fetch_posts_checked, publish,
};
pub use query::{
    ALL_CATEGORIES, DEFAULT_PAGE_SIZE, PostQuery, QueryResult, QuerySpec, build_query,
    interpret_result, interpret_result_checked,
};
pub use session::{AuthOutcome, Route};
pub use site::{BuildSummary, build_site, write_page};
pub use state::{EditorState, ListingState, StatusKind, StatusMessage, ToolbarAction, ViewMode};
pub use store::{
    Condition, Filter, JsonStore, Order, Range, Row, RowSet, RowStore, StoreError, Table,
};
