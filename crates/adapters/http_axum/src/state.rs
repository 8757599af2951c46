//! Shared application state for axum handlers.

use std::path::PathBuf;
use std::sync::Arc;

use lastvalue_app::ports::LastValueStore;
use lastvalue_app::services::last_value_service::LastValueService;

/// Presentation settings fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct DashboardSettings {
    /// Reload interval of the HTML dashboard; no reload when `None`.
    pub refresh_seconds: Option<u32>,
    /// Directory holding `index.html` and other static assets.
    pub static_dir: Option<PathBuf>,
}

impl DashboardSettings {
    /// The landing document, when the static directory provides one.
    #[must_use]
    pub fn landing_page(&self) -> Option<PathBuf> {
        self.static_dir
            .as_ref()
            .map(|dir| dir.join("index.html"))
            .filter(|page| page.is_file())
    }
}

/// Application state shared across all axum handlers.
///
/// Generic over the store type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the store itself does not need to be
/// `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<S> {
    /// Row assembly and lookups.
    pub last_value_service: Arc<LastValueService<S>>,
    /// Presentation settings.
    pub settings: Arc<DashboardSettings>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            last_value_service: Arc::clone(&self.last_value_service),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<S> AppState<S>
where
    S: LastValueStore + Send + Sync + 'static,
{
    /// Create a new application state from the service and settings.
    pub fn new(last_value_service: LastValueService<S>, settings: DashboardSettings) -> Self {
        Self {
            last_value_service: Arc::new(last_value_service),
            settings: Arc::new(settings),
        }
    }
}
