//! Site header and category tabs

use maud::{Markup, html};

use super::layout::PageContext;
use crate::session::Route;

/// Renders the sticky site header.
///
/// Shows the brand link, an optional search box, the write link and either
/// the signed in user's email with a logout link or login and signup links.
///
/// # Arguments
///
/// * `ctx`: Page position and viewer
/// * `search`: Current search term; `None` hides the search box
pub fn site_header(ctx: &PageContext<'_>, search: Option<&str>) -> Markup {
    html! {
        nav class="site-nav" {
            a href=(ctx.href(Route::Home.path())) class="brand" {
                span class="brand-mark" { "D" }
                span class="brand-name" { (ctx.site_title) }
            }

            @if let Some(term) = search {
                form class="nav-search" role="search" method="get" {
                    i class="ph ph-magnifying-glass" {}
                    input type="search" name="q" value=(term) placeholder="Search posts...";
                }
            }

            div class="nav-actions" {
                a href=(ctx.href("write.html")) class="nav-write" {
                    i class="ph ph-note-pencil" {}
                    " Write"
                }
                @if let Some(user) = ctx.user {
                    span class="nav-user" { (user.email) }
                    a href=(ctx.href(Route::Login.path())) class="nav-button" data-action="logout" {
                        "Log out"
                    }
                } @else {
                    a href=(ctx.href(Route::Login.path())) class="nav-link" { "Log in" }
                    a href=(ctx.href(Route::Signup.path())) class="nav-button nav-primary" { "Sign up" }
                }
            }
        }
    }
}

/// Renders the category filter row.
///
/// # Arguments
///
/// * `tabs`: Category names in display order
/// * `active`: Currently selected category
/// * `href_for`: Link target for a category's first page
pub fn category_tabs<'a>(
    tabs: impl IntoIterator<Item = &'a str>,
    active: &str,
    href_for: impl Fn(&str) -> String,
) -> Markup {
    html! {
        div class="category-tabs" {
            @for tab in tabs {
                @if tab == active {
                    a href=(href_for(tab)) class="category-tab active" aria-current="page" { (tab) }
                } @else {
                    a href=(href_for(tab)) class="category-tab" { (tab) }
                }
            }
        }
    }
}
