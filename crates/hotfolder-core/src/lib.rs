//! Hotfolder Core - shared domain types for the watched-folder auto-loader.
//!
//! This crate contains the configuration, event and filter types, and the
//! contract that a UI-owning window implements to receive load and play
//! requests.

pub mod collaborator;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;

pub use collaborator::Collaborator;
pub use config::{DEFAULT_PATTERN, DEFAULT_PLAY_DELAY, PlayPolicy, WatchConfig, prepare_directory};
pub use error::{Error, Result};
pub use event::FileCreatedEvent;
pub use filter::ExtensionFilter;
