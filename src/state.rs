//! Per-view state.
//!
//! The listing and editor views each own one of these for their lifetime.
//! Nothing here is global: a view creates its state on mount and drops it
//! on navigation away.

use std::time::{Duration, Instant};

use crate::draft::{DraftError, DraftForm, PostDraft};
use crate::markdown::render_preview;
use crate::model::Post;
use crate::posts::{fetch_posts, publish};
use crate::query::{ALL_CATEGORIES, DEFAULT_PAGE_SIZE, QueryResult, QuerySpec, page_count};
use crate::store::RowStore;

/// Proof that a fetch was started for a given filter state.
///
/// Only the ticket from the most recent [`ListingState::begin_fetch`] can
/// apply its result; older tickets are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    spec: QuerySpec,
}

impl FetchTicket {
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }
}

/// Listing view: active category, search term, page and the shown result.
#[derive(Debug, Clone)]
pub struct ListingState {
    category: String,
    search: String,
    page: usize,
    page_size: usize,
    generation: u64,
    loading: bool,
    result: QueryResult,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListingState {
    pub fn new(page_size: usize) -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
            generation: 0,
            loading: false,
            result: QueryResult::empty(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    /// Switches category and returns to the first page.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.page = 1;
    }

    /// Changes the search term and returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Jumps to a page, clamped to the known page range.
    pub fn set_page(&mut self, page: usize) {
        let last = self.page_count().max(1);
        self.page = page.clamp(1, last);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn page_count(&self) -> usize {
        page_count(self.result.total_count, self.page_size)
    }

    /// Request for the current filter state.
    pub fn spec(&self) -> QuerySpec {
        QuerySpec::new(&self.category, &self.search, self.page, self.page_size)
    }

    /// Starts a fetch; any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            spec: self.spec(),
        }
    }

    /// Shows `result` if `ticket` is the latest one. Returns whether it did.
    pub fn apply(&mut self, ticket: FetchTicket, result: QueryResult) -> bool {
        if ticket.generation != self.generation {
            crate::debug!(
                "listing";
                "dropping stale result (ticket {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.result = result;
        self.loading = false;
        true
    }

    /// Fetches and applies the current page synchronously.
    pub fn refresh<S: RowStore + ?Sized>(&mut self, store: &S) {
        let ticket = self.begin_fetch();
        let result = fetch_posts(store, ticket.spec());
        self.apply(ticket, result);
    }
}

/// How long a status toast stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Toast shown at the bottom of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    shown_at: Instant,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>, shown_at: Instant) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= STATUS_TTL
    }
}

/// Which panes the editor shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    Editor,
    Preview,
    #[default]
    Split,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Editor, ViewMode::Preview, ViewMode::Split];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Editor => "Editor",
            ViewMode::Preview => "Preview",
            ViewMode::Split => "Split",
        }
    }

    pub fn shows_editor(self) -> bool {
        matches!(self, ViewMode::Editor | ViewMode::Split)
    }

    pub fn shows_preview(self) -> bool {
        matches!(self, ViewMode::Preview | ViewMode::Split)
    }
}

/// Toolbar buttons; each wraps the selection in a pair of delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Heading,
    Link,
    Image,
    Quote,
    CodeBlock,
    List,
    OrderedList,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 9] = [
        ToolbarAction::Bold,
        ToolbarAction::Italic,
        ToolbarAction::Heading,
        ToolbarAction::Link,
        ToolbarAction::Image,
        ToolbarAction::Quote,
        ToolbarAction::CodeBlock,
        ToolbarAction::List,
        ToolbarAction::OrderedList,
    ];

    /// Text inserted before and after the selection.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            ToolbarAction::Bold => ("**", "**"),
            ToolbarAction::Italic => ("*", "*"),
            ToolbarAction::Heading => ("## ", ""),
            ToolbarAction::Link => ("[", "](url)"),
            ToolbarAction::Image => ("![alt](", ")"),
            ToolbarAction::Quote => ("> ", ""),
            ToolbarAction::CodeBlock => ("```\n", "\n```"),
            ToolbarAction::List => ("- ", ""),
            ToolbarAction::OrderedList => ("1. ", ""),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolbarAction::Bold => "Bold",
            ToolbarAction::Italic => "Italic",
            ToolbarAction::Heading => "Heading",
            ToolbarAction::Link => "Link",
            ToolbarAction::Image => "Image",
            ToolbarAction::Quote => "Quote",
            ToolbarAction::CodeBlock => "Code block",
            ToolbarAction::List => "List",
            ToolbarAction::OrderedList => "Ordered list",
        }
    }
}

/// Byte range selected in the content area. `start == end` is a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

/// Editor view: the form being written, pane layout and toasts.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub form: DraftForm,
    pub view_mode: ViewMode,
    pub show_meta: bool,
    status: Option<StatusMessage>,
    saved_at: Option<String>,
}

impl EditorState {
    pub fn new(form: DraftForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    /// Preview markup for the current content, recomputed from scratch.
    pub fn preview(&self) -> String {
        render_preview(&self.form.content)
    }

    /// Visible toast, if it has not expired by `now`.
    pub fn status(&self, now: Instant) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|s| !s.is_expired(now))
    }

    /// Drops an expired toast.
    pub fn tick(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
    }

    pub fn saved_at(&self) -> Option<&str> {
        self.saved_at.as_deref()
    }

    /// Records a local draft save. Nothing is sent to the store.
    pub fn save_draft(&mut self, clock: impl Into<String>) {
        self.saved_at = Some(clock.into());
    }

    /// Wraps the selection with the action's delimiters and returns the new
    /// selection, which covers the originally selected text.
    pub fn apply_toolbar(&mut self, selection: Selection, action: ToolbarAction) -> Selection {
        let (before, after) = action.delimiters();
        let content = &self.form.content;

        let end = floor_char_boundary(content, selection.end);
        let start = floor_char_boundary(content, selection.start.min(end));

        let mut updated = String::with_capacity(content.len() + before.len() + after.len());
        updated.push_str(&content[..start]);
        updated.push_str(before);
        updated.push_str(&content[start..end]);
        updated.push_str(after);
        updated.push_str(&content[end..]);
        self.form.content = updated;

        Selection {
            start: start + before.len(),
            end: end + before.len(),
        }
    }

    /// Validates the form, turning a failure into an error toast.
    ///
    /// A missing description also opens the metadata panel.
    pub fn validate(&mut self, now: Instant) -> Option<PostDraft> {
        match PostDraft::from_form(&self.form) {
            Ok(draft) => Some(draft),
            Err(e) => {
                if e == DraftError::MissingDescription {
                    self.show_meta = true;
                }
                self.status = Some(StatusMessage::new(StatusKind::Error, e.to_string(), now));
                None
            }
        }
    }

    /// Validates and publishes. The outcome is reported through the toast;
    /// invalid forms never reach the store.
    pub fn publish<S: RowStore + ?Sized>(&mut self, store: &S, now: Instant) -> Option<Post> {
        let draft = self.validate(now)?;
        match publish(store, &draft) {
            Ok(post) => {
                self.status = Some(StatusMessage::new(
                    StatusKind::Success,
                    "Post published!",
                    now,
                ));
                Some(post)
            }
            Err(e) => {
                self.status = Some(StatusMessage::new(StatusKind::Error, e.to_string(), now));
                None
            }
        }
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
