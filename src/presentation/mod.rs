//! Markup produced for the archive list.

pub mod template;
