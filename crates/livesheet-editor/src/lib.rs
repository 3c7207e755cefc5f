//! Stylesheet loading and live edit synchronization.
//!
//! # Scope
//!
//! This crate provides:
//! - **Naming** - unique, bounded names for every stylesheet on a page
//! - **Loading** - [`StylesheetLoader`] discovers every sheet, fetches the
//!   linked ones concurrently and swaps them for editable `<style>` elements
//! - **Editing** - [`EditorSession`] owns the editor text and writes it back
//!   into the page, debounced, behind a Hidden/Visible state machine
//! - **Host glue** - the JSON message protocol, a channel-backed fetcher and
//!   the [`Overlay`] shell that loads once on first toggle
//!
//! Nothing here needs a browser. The page is a [`livesheet_dom::DomTree`] and
//! every outside capability is injected.

pub mod barrier;
pub mod config;
pub mod debounce;
pub mod entry;
pub mod keys;
pub mod loader;
pub mod messaging;
pub mod naming;
pub mod overlay;
pub mod session;
pub mod textbox;

pub use config::{ConfigError, EditorConfig};
pub use entry::{SheetOrigin, StylesheetEntry};
pub use livesheet_common::net::{FetchError, NetFetcher, ResourceFetcher};
pub use loader::{LoadedSheets, StylesheetLoader};
pub use messaging::{HostBridge, HostMessage, HostResponse, MessageError, MessageRouter};
pub use naming::NameResolver;
pub use overlay::Overlay;
pub use session::{EditorEvent, EditorSession, KeyOutcome, Visibility};
