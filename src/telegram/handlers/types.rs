//! Handler types and dependencies

use std::sync::Arc;

use crate::telegram::dialog::MenuRouter;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub router: Arc<MenuRouter>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(router: MenuRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}
