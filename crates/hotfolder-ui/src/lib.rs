//! Hotfolder UI - the single-threaded UI execution context.
//!
//! Every interaction with the main window happens on one dedicated thread
//! that drains a FIFO queue of [`UiCommand`]s. Other threads only ever post
//! commands through a [`UiHandle`].

pub mod command;
pub mod context;
pub mod error;
pub mod window;

pub use command::{OpenRequest, UiCommand};
pub use context::{UiContext, UiHandle};
pub use error::{UiError, UiResult};
pub use window::WindowId;
