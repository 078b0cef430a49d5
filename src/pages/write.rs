//! Post editor page generation

use maud::{Markup, PreEscaped, html};
use std::time::Instant;

use crate::components::feedback::status_toast;
use crate::components::layout::{PageContext, page_wrapper};
use crate::state::{EditorState, ToolbarAction, ViewMode};

/// Data container for editor page generation
pub struct WritePageData<'a> {
    pub ctx: PageContext<'a>,
    pub editor: &'a EditorState,
    /// Choices for the category select.
    pub categories: &'a [String],
    /// Moment the page is rendered; decides whether the toast is still shown.
    pub now: Instant,
}

/// Generates the editor: top bar, toolbar, content and preview panes,
/// metadata panel and status toast.
///
/// Panes follow the editor's view mode. The preview pane holds the live
/// preview markup for the current content.
pub fn generate(data: WritePageData<'_>) -> Markup {
    let ctx = &data.ctx;
    let editor = data.editor;
    let form = &editor.form;
    let mode = editor.view_mode;

    page_wrapper(
        ctx,
        "Write",
        &["assets/write.css"],
        html! {
            header class="editor-bar" {
                a href=(ctx.href("index.html")) class="brand" {
                    span class="brand-mark" { "D" }
                    span class="brand-name" { (ctx.site_title) }
                }
                div class="editor-actions" {
                    @if let Some(clock) = editor.saved_at() {
                        span class="saved-at" { "Saved at " (clock) }
                    }
                    button type="button" class="button" data-action="save-draft" { "Save draft" }
                    button type="button" class="button button-primary" data-action="publish" { "Publish" }
                }
            }

            div class="editor-meta-row" {
                input class="title-input" type="text" name="title" value=(form.title)
                    placeholder="Title";
                div class="view-modes" role="tablist" {
                    @for candidate in ViewMode::ALL {
                        button type="button" role="tab"
                            class=(if candidate == mode { "view-mode active" } else { "view-mode" })
                            aria-selected=(if candidate == mode { "true" } else { "false" })
                            data-mode=(candidate.label().to_ascii_lowercase()) {
                            (candidate.label())
                        }
                    }
                }
            }

            div class="toolbar" role="toolbar" {
                @for action in ToolbarAction::ALL {
                    @let (before, after) = action.delimiters();
                    button type="button" class="tool" title=(action.label())
                        data-before=(before) data-after=(after) {
                        (action.label())
                    }
                }
            }

            div class=(format!("editor-panes mode-{}", mode.label().to_ascii_lowercase())) {
                @if mode.shows_editor() {
                    textarea class="content-input" name="content" spellcheck="false"
                        placeholder="Write in markdown..." { (form.content) }
                }
                @if mode.shows_preview() {
                    div class="preview-pane markdown-preview" {
                        (PreEscaped(editor.preview()))
                    }
                }
            }

            @if editor.show_meta {
                div class="meta-panel" role="dialog" aria-label="Post details" {
                    h2 { "Post details" }
                    label {
                        "Description " span class="required" { "*" }
                        textarea name="description" rows="3"
                            placeholder="Summarize the post in one line..." { (form.description) }
                    }
                    label {
                        "Category"
                        select name="category" {
                            @for category in data.categories {
                                option value=(category) selected[*category == form.category] {
                                    (category)
                                }
                            }
                        }
                    }
                    label {
                        "Tags " span class="hint" { "(comma separated)" }
                        input type="text" name="tags" value=(form.tags)
                            placeholder="e.g. React, TypeScript, Web";
                    }
                    label {
                        "Read time (minutes)"
                        input type="number" name="read_time_minutes" min="1" max="60"
                            value=(form.read_time_minutes);
                    }
                }
            }

            (status_toast(editor.status(data.now)))
        },
    )
}
