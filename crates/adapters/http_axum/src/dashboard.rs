//! Server-side rendered HTML dashboard (no JavaScript).

pub mod landing;
#[allow(clippy::missing_errors_doc)]
pub mod schuler;

use askama::Template;
use axum::Router;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use lastvalue_app::ports::LastValueStore;
use lastvalue_domain::error::LastValueError;

use crate::error::status_and_message;
use crate::state::AppState;

/// Canonical path of the machine dashboard.
pub const DASHBOARD_PATH: &str = "/dashboard/schuler";

/// Short alias of [`DASHBOARD_PATH`], target of the landing redirect.
pub const DASHBOARD_ALIAS: &str = "/_dashboard";

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: LastValueStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(landing::index::<S>))
        .route(DASHBOARD_PATH, get(schuler::page::<S>))
        .route(DASHBOARD_ALIAS, get(schuler::page::<S>))
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    message: String,
}

/// Maps [`LastValueError`] to an HTML error page.
pub struct DashboardError(LastValueError);

impl From<LastValueError> for DashboardError {
    fn from(err: LastValueError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = status_and_message(&self.0);
        let page = ErrorTemplate {
            status: status.as_u16(),
            message,
        };
        (status, Html(page.to_string())).into_response()
    }
}
