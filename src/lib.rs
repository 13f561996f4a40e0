//! Archive search for statically published blogs.
//!
//! A page ships an ordered list of post records; [`application::widget::SearchWidget`]
//! filters that list as the reader types and rewrites the archive list with one
//! markup string per match. The same widget runs in the browser (feature `web`)
//! and in the `blogsift` binary, which drives it against in-memory elements.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
