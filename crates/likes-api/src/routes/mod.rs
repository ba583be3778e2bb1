//! # API Route Modules
//!
//! - `votes` — cast or read a vote on any votable content kind (AJAX only).
//! - `voters` — list who voted on an object, in full or page by page.

pub mod voters;
pub mod votes;
