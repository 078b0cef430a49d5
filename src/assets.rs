//! CSS asset bundling

use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, css_for_theme_with_class_style};

const BASE: &str = include_str!("../assets/base.css");
const LAYOUT: &str = include_str!("../assets/components/layout.css");

const LISTING_PAGE: &str = include_str!("../assets/listing.css");
const POST_PAGE: &str = include_str!("../assets/post.css");
const WRITE_PAGE: &str = include_str!("../assets/write.css");
const ACCOUNT_PAGE: &str = include_str!("../assets/account.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");
const PREVIEW: &str = include_str!("../assets/preview.css");

/// Syntax theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Writes all bundled CSS assets to output directory
///
/// The post stylesheet carries the code highlighting rules for `theme`,
/// generated from syntect's bundled themes.
///
/// # Errors
///
/// Returns error if the theme is unknown or a file cannot be written
pub fn write_css_assets(assets_dir: &Path, theme: &str) -> Result<()> {
    let highlight = highlight_css(theme)?;

    write_bundled(assets_dir, "listing.css", &[BASE, LAYOUT, LISTING_PAGE])?;
    write_bundled(
        assets_dir,
        "post.css",
        &[BASE, LAYOUT, POST_PAGE, MARKDOWN, &highlight],
    )?;
    write_bundled(assets_dir, "write.css", &[BASE, LAYOUT, WRITE_PAGE, PREVIEW])?;
    write_bundled(assets_dir, "account.css", &[BASE, LAYOUT, ACCOUNT_PAGE])?;
    Ok(())
}

/// Highlighting rules for the `hl-` classes emitted by the post renderer.
pub fn highlight_css(theme: &str) -> Result<String> {
    let themes = ThemeSet::load_defaults();
    let selected = themes.themes.get(theme).ok_or_else(|| {
        let mut known: Vec<_> = themes.themes.keys().map(String::as_str).collect();
        known.sort_unstable();
        anyhow!("Unknown syntax theme: {} (available: {})", theme, known.join(", "))
    })?;

    css_for_theme_with_class_style(selected, ClassStyle::SpacedPrefixed { prefix: "hl-" })
        .with_context(|| format!("Failed to generate CSS for theme: {}", theme))
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
