//! Common utilities for the live stylesheet editor.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **URL helpers** - origin/directory extraction and href resolution
//! - **Fetching** - the [`net::ResourceFetcher`] capability and its
//!   network/file/`data:` implementation
//! - **Warning System** - deduplicated warnings routed through `log`

pub mod net;
pub mod url;
pub mod warning;
