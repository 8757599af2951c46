//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod schuler;
#[allow(clippy::missing_errors_doc)]
pub mod values;

use axum::Router;
use axum::routing::get;

use lastvalue_app::ports::LastValueStore;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: LastValueStore + Send + Sync + 'static,
{
    Router::new().route("/schuler", get(schuler::list::<S>))
}
