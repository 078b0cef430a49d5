//! Listing card for a single post

use maud::{Markup, html};

use super::layout::PageContext;
use crate::model::Post;
use crate::util::format_date;

/// Stored cover image, or a placeholder seeded by the post id.
pub fn thumbnail_url(post: &Post, width: u32, height: u32) -> String {
    match &post.image_url {
        Some(url) if !url.is_empty() => url.clone(),
        _ => format!("https://picsum.photos/seed/{}/{}/{}", post.id, width, height),
    }
}

/// Link target of a post's detail page, root relative.
pub fn post_path(id: &str) -> String {
    format!("post/{id}.html")
}

/// Renders a post card: thumbnail with category badge, date, read time,
/// title, description and tags.
pub fn post_card(ctx: &PageContext<'_>, post: &Post) -> Markup {
    html! {
        a href=(ctx.href(&post_path(&post.id))) class="post-card" {
            div class="card-thumb" {
                span class="card-category" { (post.category) }
                img src=(thumbnail_url(post, 600, 400)) alt=(post.title) loading="lazy";
            }
            div class="card-body" {
                div class="card-meta" {
                    span { (format_date(post.created_at)) }
                    span { "•" }
                    span { (post.read_time_minutes) " min read" }
                }
                h3 class="card-title" { (post.title) }
                p class="card-description" { (post.description) }
                @if !post.tags.is_empty() {
                    div class="card-tags" {
                        @for tag in &post.tags {
                            span class="tag" { "#" (tag) }
                        }
                    }
                }
            }
        }
    }
}

/// Placeholder card shown while a listing fetch is in flight.
pub fn skeleton_card() -> Markup {
    html! {
        div class="post-card skeleton" aria-hidden="true" {
            div class="card-thumb" {}
            div class="card-body" {
                div class="skeleton-line short" {}
                div class="skeleton-line" {}
                div class="skeleton-line" {}
            }
        }
    }
}
