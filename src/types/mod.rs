use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;

use crate::components::Templates;
use crate::config::EditFallback;
use crate::services::PageStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub templates: Arc<Templates>,
    pub edit_fallback: EditFallback,
}

impl AppState {
    pub fn new(store: PageStore, templates: Templates, edit_fallback: EditFallback) -> Self {
        Self {
            store: Arc::new(store),
            templates: Arc::new(templates),
            edit_fallback,
        }
    }
}

/// A wiki page, built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    /// Stored content, exactly as the client submitted it.
    pub body: Vec<u8>,
    /// Filtered HTML, only set while serving a view.
    pub display_body: Option<String>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            title: title.into(),
            body,
            display_body: None,
        }
    }

    /// Empty page used when there is nothing to edit yet.
    pub fn blank(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Template context for this page.
    pub fn context(&self) -> PageContext<'_> {
        PageContext {
            title: &self.title,
            body: String::from_utf8_lossy(&self.body),
            display_body: self.display_body.as_deref(),
        }
    }
}

/// Template rendering context
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub body: Cow<'a, str>,
    pub display_body: Option<&'a str>,
}
