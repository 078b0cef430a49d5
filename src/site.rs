//! Static site generation.

use anyhow::{Context, Result};
use maud::Markup;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assets::write_css_assets;
use crate::components::layout::PageContext;
use crate::components::post_card::post_path;
use crate::config::SiteConfig;
use crate::draft::DraftForm;
use crate::markdown::PostRenderer;
use crate::model::Post;
use crate::pages::{account, listing, post, write};
use crate::posts::{fetch_post_detail, fetch_posts_checked};
use crate::query::ALL_CATEGORIES;
use crate::session::{self, Route};
use crate::state::{EditorState, ListingState};
use crate::store::RowStore;

/// What a build wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    listing_pages: usize,
    post_pages: usize,
}

impl BuildSummary {
    pub fn listing_pages(&self) -> usize {
        self.listing_pages
    }

    pub fn post_pages(&self) -> usize {
        self.post_pages
    }
}

/// Generates the whole site into `output`.
///
/// Writes one listing page per category and page number, one detail page per
/// post, the editor, the account pages and the CSS bundles. Listing reads
/// are checked: a failing store aborts the build instead of publishing an
/// empty site.
///
/// # Errors
///
/// Returns error if a listing query fails, the theme is unknown, or a file
/// cannot be written
pub fn build_site<S: RowStore + ?Sized>(
    store: &S,
    site: &SiteConfig,
    output: &Path,
    theme: &str,
) -> Result<BuildSummary> {
    fs::create_dir_all(output).context("Failed to create output directory")?;
    let assets_dir = output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;
    write_css_assets(&assets_dir, theme).context("Failed to write CSS assets")?;

    let user = session::current_user(store);
    let root = PageContext::new(&site.title, user.as_ref());
    let mut summary = BuildSummary::default();
    let mut all_posts: Vec<Post> = Vec::new();

    for category in site.tabs() {
        let mut state = ListingState::new(site.posts_per_page);
        state.set_category(category);

        let mut page = 1;
        loop {
            state.set_page(page);
            let ticket = state.begin_fetch();
            let result = fetch_posts_checked(store, ticket.spec())
                .with_context(|| format!("Failed to list {} page {}", category, page))?;
            state.apply(ticket, result);

            if category == ALL_CATEGORIES {
                all_posts.extend(state.result().items.iter().cloned());
            }

            let path = listing::listing_path(category, page);
            let html = listing::generate(listing::ListingPageData {
                ctx: root.at_depth(listing::listing_depth(category, page)),
                tabs: site.tabs().collect(),
                state: &state,
            });
            write_page(output, &path, html)?;
            summary.listing_pages += 1;

            if page >= state.page_count() {
                break;
            }
            page += 1;
        }
        crate::debug!("build"; "{}: {} pages", category, page);
    }

    let renderer = PostRenderer::new();
    let post_ctx = root.at_depth(1);
    for listed in &all_posts {
        let detail = fetch_post_detail(store, &listed.id);
        write_page(
            output,
            &post_path(&listed.id),
            post::generate(&post_ctx, &detail, &renderer),
        )?;
        summary.post_pages += 1;
    }

    let mut form = DraftForm::starter();
    if let Some(first) = site.categories.first() {
        form.category = first.clone();
    }
    let editor = EditorState::new(form);
    write_page(
        output,
        "write.html",
        write::generate(write::WritePageData {
            ctx: root,
            editor: &editor,
            categories: &site.categories,
            now: Instant::now(),
        }),
    )?;

    for route in [Route::Login, Route::Signup] {
        write_page(output, route.path(), account::generate(&root, route, None))?;
    }

    crate::log!(
        "build";
        "{} listing pages, {} posts -> {}",
        summary.listing_pages,
        summary.post_pages,
        output.display()
    );
    Ok(summary)
}

/// Writes a page to `output/relative`, creating parent directories.
pub fn write_page(output: &Path, relative: &str, html: Markup) -> Result<PathBuf> {
    let path = output.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&path, html.into_string())
        .with_context(|| format!("Failed to write page: {}", path.display()))?;
    crate::debug!("build"; "wrote {}", relative);
    Ok(path)
}
