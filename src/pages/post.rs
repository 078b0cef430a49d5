//! Post detail page generation

use maud::{Markup, PreEscaped, html};

use crate::avatar::{self, avatar_url};
use crate::components::layout::{PageContext, page_wrapper};
use crate::components::nav::site_header;
use crate::components::post_card::thumbnail_url;
use crate::markdown::PostRenderer;
use crate::model::{Comment, Post};
use crate::posts::PostDetail;
use crate::util::{format_date, format_timestamp};

/// Generates the detail page for a fetched post.
///
/// A detail without a post renders the not found view. Post bodies go
/// through the published post renderer; a post without content shows its
/// description instead.
pub fn generate(ctx: &PageContext<'_>, detail: &PostDetail, renderer: &PostRenderer<'_>) -> Markup {
    let Some(post) = &detail.post else {
        return not_found(ctx);
    };

    page_wrapper(
        ctx,
        &post.title,
        &["assets/post.css"],
        html! {
            (site_header(ctx, None))

            main class="post-page" {
                a href=(ctx.href("index.html")) class="back-link" {
                    i class="ph ph-arrow-left" {} " Back to posts"
                }

                (post_header(post))

                figure class="post-cover" {
                    img src=(thumbnail_url(post, 1200, 675)) alt=(post.title);
                }

                article class="post-body markdown-body" {
                    @match post.content.as_deref().filter(|c| !c.trim().is_empty()) {
                        Some(content) => { (PreEscaped(renderer.render_or_plain(content))) }
                        None => { p class="post-fallback" { (post.description) } }
                    }
                }

                (comments_section(&detail.comments))
            }
        },
    )
}

fn post_header(post: &Post) -> Markup {
    let author_image = post
        .author_image
        .clone()
        .unwrap_or_else(|| avatar_url(&post.id));

    html! {
        header class="post-header" {
            div class="post-badges" {
                span class="badge badge-category" { (post.category) }
                @for tag in &post.tags {
                    span class="badge" { "#" (tag) }
                }
            }
            h1 class="post-title" { (post.title) }
            @if !post.description.is_empty() {
                p class="post-description" { (post.description) }
            }
            div class="post-byline" {
                (avatar::render(&post.author_name, Some(&author_image), 44))
                div {
                    p class="byline-name" { (post.author_name) }
                    div class="byline-meta" {
                        span { i class="ph ph-calendar-blank" {} " " (format_date(post.created_at)) }
                        span { i class="ph ph-clock" {} " " (post.read_time_minutes) " min read" }
                    }
                }
            }
        }
    }
}

fn comments_section(comments: &[Comment]) -> Markup {
    html! {
        section class="comments" {
            h2 class="comments-title" {
                "Comments " span class="comments-count" { (comments.len()) }
            }
            @if comments.is_empty() {
                p class="comments-empty" { "No comments yet." }
            } @else {
                ul class="comment-list" {
                    @for comment in comments {
                        li class="comment" {
                            (avatar::render(&comment.author_name, comment.author_image.as_deref(), 36))
                            div class="comment-body" {
                                div class="comment-meta" {
                                    span class="comment-author" { (comment.author_name) }
                                    span class="comment-date" { (format_timestamp(comment.created_at)) }
                                }
                                p class="comment-text" { (comment.content) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn not_found(ctx: &PageContext<'_>) -> Markup {
    page_wrapper(
        ctx,
        "Not found",
        &["assets/post.css"],
        html! {
            (site_header(ctx, None))
            main class="not-found" {
                p class="not-found-code" { "404" }
                p { "This post could not be found." }
                a href=(ctx.href("index.html")) { "Back to home" }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: Option<&str>) -> Post {
        Post {
            id: "3".into(),
            title: "Ownership".into(),
            description: "Moves and borrows".into(),
            content: content.map(String::from),
            author_name: "writer".into(),
            author_image: None,
            category: "Backend".into(),
            image_url: None,
            read_time_minutes: 7,
            created_at: 0,
            tags: vec!["rust".into()],
        }
    }

    #[test]
    fn test_post_page_renders_markdown_body() {
        // Arrange
        let ctx = PageContext::new("Devlog", None).at_depth(1);
        let detail = PostDetail {
            post: Some(post(Some("## Moves\n\nValues have **one** owner."))),
            comments: vec![],
        };

        // Act
        let html = generate(&ctx, &detail, &PostRenderer::new()).into_string();

        // Assert
        assert!(html.contains("<h2>Moves</h2>"));
        assert!(html.contains("<strong>one</strong>"));
        assert!(html.contains("https://i.pravatar.cc/150?u=3"));
        assert!(html.contains("No comments yet."));
        assert!(html.contains("href=\"../index.html\" class=\"back-link\""));
    }

    #[test]
    fn test_post_without_content_shows_description() {
        let ctx = PageContext::new("Devlog", None).at_depth(1);
        let detail = PostDetail {
            post: Some(post(None)),
            comments: vec![],
        };

        let html = generate(&ctx, &detail, &PostRenderer::new()).into_string();

        assert!(html.contains("class=\"post-fallback\">Moves and borrows</p>"));
    }

    #[test]
    fn test_comments_listed() {
        // Arrange
        let ctx = PageContext::new("Devlog", None).at_depth(1);
        let detail = PostDetail {
            post: Some(post(Some("body"))),
            comments: vec![Comment {
                id: "c1".into(),
                post_id: "3".into(),
                author_name: "reader".into(),
                author_image: None,
                content: "Great read".into(),
                created_at: 0,
            }],
        };

        // Act
        let html = generate(&ctx, &detail, &PostRenderer::new()).into_string();

        // Assert
        assert!(html.contains("class=\"comments-count\">1</span>"));
        assert!(html.contains("Great read"));
        assert!(html.contains("avatar-initial"));
    }

    #[test]
    fn test_missing_post_is_not_found() {
        let ctx = PageContext::new("Devlog", None).at_depth(1);

        let html = generate(&ctx, &PostDetail::default(), &PostRenderer::new()).into_string();

        assert!(html.contains("404"));
        assert!(html.contains("<title>Not found - Devlog</title>"));
    }
}
