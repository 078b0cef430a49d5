//! Reusable HTML components for page generation
//!
//! Maud component functions shared across the listing, post, editor and
//! account pages.

pub mod feedback;
pub mod layout;
pub mod nav;
pub mod pagination;
pub mod post_card;
