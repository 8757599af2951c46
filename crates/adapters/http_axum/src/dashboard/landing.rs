//! Landing page: the static `index.html` when present, else the dashboard.

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Redirect, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use lastvalue_app::ports::LastValueStore;

use super::DASHBOARD_ALIAS;
use crate::state::AppState;

/// `GET /` — serve the landing document or redirect (307) to the dashboard.
pub async fn index<S>(State(state): State<AppState<S>>, request: Request) -> Response
where
    S: LastValueStore + Send + Sync + 'static,
{
    let Some(page) = state.settings.landing_page() else {
        return Redirect::temporary(DASHBOARD_ALIAS).into_response();
    };

    match ServeFile::new(page).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
