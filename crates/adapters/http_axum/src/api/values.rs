//! JSON handler for a single (source, element) lookup.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use lastvalue_app::ports::LastValueStore;
use lastvalue_domain::error::{LastValueError, ValidationError};
use lastvalue_domain::id::{ElementId, SourceId};
use lastvalue_domain::row::ValueRecord;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ValueRecord>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(LastValueError::from(ValidationError::InvalidIdentifier(
            raw.to_owned(),
        )))
    })
}

/// `GET /value/:source_id/:element_id`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path((source_id, element_id)): Path<(String, String)>,
) -> Result<GetResponse, ApiError>
where
    S: LastValueStore + Send + Sync + 'static,
{
    let source_id: SourceId = parse_id(&source_id)?;
    let element_id: ElementId = parse_id(&element_id)?;

    let record = state
        .last_value_service
        .fetch_value(source_id, element_id)
        .await?;
    Ok(GetResponse::Ok(Json(record)))
}
