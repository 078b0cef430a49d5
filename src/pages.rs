//! Page generation modules for different view types
//!
//! This module organizes HTML page generators by page type (listing, post,
//! editor, account). Each page module handles its specific view logic and
//! utilizes shared components from the components module.

pub mod account;
pub mod listing;
pub mod post;
pub mod write;
