//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use crate::model::User;
use crate::util::relative_root;

/// Where a page sits in the site and who is looking at it.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub site_title: &'a str,
    /// Directory depth below the site root.
    pub depth: usize,
    pub user: Option<&'a User>,
}

impl<'a> PageContext<'a> {
    pub fn new(site_title: &'a str, user: Option<&'a User>) -> Self {
        Self {
            site_title,
            depth: 0,
            user,
        }
    }

    /// Same viewer, page `depth` directories below the root.
    pub fn at_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }

    /// Link to a root relative `path` from this page.
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", relative_root(self.depth), path)
    }
}

/// Wraps page content with standard HTML structure
///
/// Provides consistent DOCTYPE, html, head, and container structure across
/// all page types. Stylesheet paths are root relative and resolved against
/// the page's depth.
///
/// # Arguments
///
/// * `ctx`: Page position and viewer
/// * `title`: Page title text (without suffix)
/// * `stylesheets`: CSS file paths to include
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(ctx: &PageContext<'_>, title: &str, stylesheets: &[&str], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - " (ctx.site_title) }
                script src="https://unpkg.com/@phosphor-icons/web" {}
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(ctx.href(stylesheet));
                }
            }
            body {
                (body)
                (footer(ctx))
            }
        }
    }
}

fn footer(ctx: &PageContext<'_>) -> Markup {
    html! {
        footer class="site-footer" {
            div class="footer-inner" {
                a href=(ctx.href("index.html")) class="brand brand-small" {
                    span class="brand-mark" { "D" }
                    span class="brand-name" { (ctx.site_title) }
                }
                span class="footer-note" { "Generated by devlog" }
            }
        }
    }
}
