//! Plainwiki - a minimal wiki server
//!
//! Pages are plain text files, one per title. Bodies may contain `[Word]`
//! references, rendered as links to other pages.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod routing;
pub mod services;
pub mod types;

// Re-export commonly used items
pub use config::{Config, EditFallback};
pub use errors::WikiError;
pub use routing::{extract, make_handler, router, Operation, Rejected, Route};
pub use services::{filter, PageStore, StoreError};
pub use types::{AppState, Page};
pub use components::{TemplateName, Templates};
