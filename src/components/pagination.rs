//! Listing pagination

use maud::{Markup, html};

/// Renders previous, numbered and next page links.
///
/// Nothing is rendered when everything fits on one page. The previous link
/// is disabled on the first page and the next link on the last.
///
/// # Arguments
///
/// * `current`: One based current page
/// * `total`: Number of pages
/// * `href_for`: Link target for a page number
pub fn pagination(current: usize, total: usize, href_for: impl Fn(usize) -> String) -> Markup {
    if total <= 1 {
        return html! {};
    }

    html! {
        nav class="pagination" aria-label="Pagination" {
            @if current > 1 {
                a href=(href_for(current - 1)) class="page-step" rel="prev" {
                    i class="ph ph-caret-left" {} " Previous"
                }
            } @else {
                span class="page-step disabled" aria-disabled="true" {
                    i class="ph ph-caret-left" {} " Previous"
                }
            }

            @for page in 1..=total {
                @if page == current {
                    span class="page-number current" aria-current="page" { (page) }
                } @else {
                    a href=(href_for(page)) class="page-number" { (page) }
                }
            }

            @if current < total {
                a href=(href_for(current + 1)) class="page-step" rel="next" {
                    "Next " i class="ph ph-caret-right" {}
                }
            } @else {
                span class="page-step disabled" aria-disabled="true" {
                    "Next " i class="ph ph-caret-right" {}
                }
            }
        }
    }
}
