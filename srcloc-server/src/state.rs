//! Application state shared across handlers

use std::sync::Arc;

use srcloc_core::Locator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    locator: Locator,
}

impl AppState {
    pub fn new(locator: Locator) -> Self {
        Self {
            inner: Arc::new(AppStateInner { locator }),
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.inner.locator
    }
}
