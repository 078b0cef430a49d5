//! Author avatars.
//!
//! Authors get a hosted avatar keyed by their account id when they publish.
//! Rows without an image fall back to a colored initial.

use maud::{Markup, html};

const AVATAR_HOST: &str = "https://i.pravatar.cc/150";

const COLORS: &[&str] = &[
    "#dc8a78", "#ea76cb", "#ca9ee6", "#8caaee", "#74c7ec", "#81c8be", "#a6d189", "#e5c890",
    "#ef9f76", "#b4befe",
];

/// Deterministic avatar URL for an account id.
pub fn avatar_url(user_id: &str) -> String {
    format!("{}?u={}", AVATAR_HOST, user_id)
}

fn hash(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    s.trim()
        .bytes()
        .fold(OFFSET, |h, b| (h ^ b as u64).wrapping_mul(PRIME))
}

/// Background color for the initial fallback, stable per name.
pub fn fallback_color(name: &str) -> &'static str {
    COLORS[(hash(name) % COLORS.len() as u64) as usize]
}

fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Avatar element: the stored image when present, else a colored initial.
pub fn render(name: &str, image: Option<&str>, size: u32) -> Markup {
    let dimension = format!("width:{size}px;height:{size}px");
    html! {
        @if let Some(src) = image {
            img class="avatar" src=(src) alt=(name) style=(dimension) loading="lazy";
        } @else {
            span class="avatar avatar-initial"
                style=(format!("{dimension};background:{}", fallback_color(name))) {
                (initial(name))
            }
        }
    }
}
