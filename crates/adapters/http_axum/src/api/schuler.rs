//! JSON handler for the per-machine last values.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use lastvalue_app::ports::LastValueStore;
use lastvalue_domain::grouping::MachineGroups;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    /// 200 OK with every configured machine and its rows.
    Ok(Json<MachineGroups>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/schuler`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: LastValueStore + Send + Sync + 'static,
{
    let groups = state.last_value_service.machine_groups().await?;
    Ok(ListResponse::Ok(Json(groups)))
}
