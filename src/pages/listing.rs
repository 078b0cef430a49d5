//! Post listing page generation

use maud::{Markup, html};

use crate::components::layout::{PageContext, page_wrapper};
use crate::components::nav::{category_tabs, site_header};
use crate::components::pagination::pagination;
use crate::components::post_card::{post_card, skeleton_card};
use crate::query::ALL_CATEGORIES;
use crate::state::ListingState;
use crate::util::slugify;

/// Root relative path of a listing page.
///
/// The first page of the unfiltered listing is the site index; every other
/// page lives under `category/<slug>/page-<n>.html`.
pub fn listing_path(category: &str, page: usize) -> String {
    if category == ALL_CATEGORIES && page <= 1 {
        "index.html".to_string()
    } else {
        format!("category/{}/page-{}.html", slugify(category), page.max(1))
    }
}

/// Directory depth of [`listing_path`].
pub fn listing_depth(category: &str, page: usize) -> usize {
    listing_path(category, page).matches('/').count()
}

/// Data container for listing page generation
pub struct ListingPageData<'a> {
    pub ctx: PageContext<'a>,
    /// Category tabs in display order, "All posts" first.
    pub tabs: Vec<&'a str>,
    pub state: &'a ListingState,
}

/// Generates a listing page: header, category tabs, cards and pagination.
///
/// A fetch in flight shows skeleton cards; an empty result shows a hint to
/// pick another category.
pub fn generate(data: ListingPageData<'_>) -> Markup {
    let ctx = &data.ctx;
    let state = data.state;
    let result = state.result();
    let title = if state.category() == ALL_CATEGORIES {
        "Home".to_string()
    } else {
        state.category().to_string()
    };

    page_wrapper(
        ctx,
        &title,
        &["assets/listing.css"],
        html! {
            (site_header(ctx, Some(state.search())))

            section class="hero" {
                h1 { "Engineering insights for the modern web" }
                p {
                    "Deep dives into system design, frontend architecture and developer productivity."
                }
            }

            (category_tabs(data.tabs.iter().copied(), state.category(), |category| {
                ctx.href(&listing_path(category, 1))
            }))

            main class="listing" {
                @if !state.search().is_empty() {
                    p class="search-summary" {
                        (result.total_count) " results for \"" (state.search()) "\""
                    }
                }

                @if state.is_loading() {
                    div class="card-grid" {
                        @for _ in 0..state.page_size() {
                            (skeleton_card())
                        }
                    }
                } @else if result.items.is_empty() {
                    div class="empty-state" {
                        p class="empty-title" { "No posts yet." }
                        p class="empty-hint" { "Try another category." }
                    }
                } @else {
                    div class="card-grid" {
                        @for post in &result.items {
                            (post_card(ctx, post))
                        }
                    }
                }

                (pagination(state.page(), state.page_count(), |page| {
                    ctx.href(&listing_path(state.category(), page))
                }))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Post;
    use crate::query::QueryResult;

    fn post(id: usize) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {id}"),
            description: "desc".into(),
            content: None,
            author_name: "dev".into(),
            author_image: None,
            category: "Frontend".into(),
            image_url: None,
            read_time_minutes: 5,
            created_at: 0,
            tags: vec![],
        }
    }

    fn loaded(category: &str, page: usize, items: Vec<Post>, total: usize) -> ListingState {
        let mut state = ListingState::new(6);
        state.set_category(category);
        let ticket = state.begin_fetch();
        state.apply(
            ticket,
            QueryResult {
                items,
                total_count: total,
            },
        );
        state.set_page(page);
        state
    }

    #[test]
    fn test_listing_paths() {
        assert_eq!(listing_path(ALL_CATEGORIES, 1), "index.html");
        assert_eq!(listing_path(ALL_CATEGORIES, 2), "category/all-posts/page-2.html");
        assert_eq!(listing_path("Frontend", 1), "category/frontend/page-1.html");
        assert_eq!(listing_depth(ALL_CATEGORIES, 1), 0);
        assert_eq!(listing_depth("Frontend", 3), 2);
    }

    #[test]
    fn test_listing_page_with_posts() {
        // Arrange
        let state = loaded("Frontend", 1, (1..=6).map(post).collect(), 8);
        let ctx = PageContext::new("Devlog", None).at_depth(listing_depth("Frontend", 1));

        // Act
        let html = generate(ListingPageData {
            ctx,
            tabs: vec![ALL_CATEGORIES, "Frontend"],
            state: &state,
        })
        .into_string();

        // Assert
        assert_eq!(html.matches("class=\"post-card\"").count(), 6);
        assert!(html.contains("href=\"../../category/frontend/page-2.html\""));
        assert!(html.contains("href=\"../../index.html\" class=\"category-tab\""));
        assert!(html.contains("<title>Frontend - Devlog</title>"));
    }

    #[test]
    fn test_listing_page_empty() {
        let state = loaded(ALL_CATEGORIES, 1, vec![], 0);

        let html = generate(ListingPageData {
            ctx: PageContext::new("Devlog", None),
            tabs: vec![ALL_CATEGORIES],
            state: &state,
        })
        .into_string();

        assert!(html.contains("No posts yet."));
        assert!(!html.contains("class=\"pagination\""));
    }

    #[test]
    fn test_listing_page_loading_skeleton() {
        let mut state = ListingState::new(3);
        state.begin_fetch();

        let html = generate(ListingPageData {
            ctx: PageContext::new("Devlog", None),
            tabs: vec![ALL_CATEGORIES],
            state: &state,
        })
        .into_string();

        assert_eq!(html.matches("post-card skeleton").count(), 3);
    }
}
