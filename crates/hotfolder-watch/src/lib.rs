//! Hotfolder Watch - the watched-folder auto-loader.
//!
//! Newly created files matching the configured pattern are opened in the
//! main window on the UI context, and played there once the grace period
//! has passed.

pub mod error;
pub mod loader;
pub mod source;

pub use error::{WatchError, WatchResult};
pub use loader::{AutoLoader, Dispatch};
pub use source::{WatchHandle, start};
