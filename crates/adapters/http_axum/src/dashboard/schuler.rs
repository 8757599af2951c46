//! Dashboard page: one table of last values per machine.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use lastvalue_app::ports::LastValueStore;
use lastvalue_domain::grouping::MachineGroups;
use lastvalue_domain::id::SourceId;

use super::DashboardError;
use crate::state::AppState;

/// One table line; missing readings render as empty cells.
struct TableRow {
    label: String,
    value: String,
    timestamp: String,
}

/// One machine heading and its table.
struct Section {
    name: String,
    source_id: SourceId,
    rows: Vec<TableRow>,
}

/// Machine dashboard template.
#[derive(Template)]
#[template(path = "schuler.html")]
pub struct SchulerTemplate {
    refresh_seconds: Option<u32>,
    sections: Vec<Section>,
}

impl SchulerTemplate {
    /// Lay out every group in order; values are escaped on render.
    #[must_use]
    pub fn new(groups: &MachineGroups, refresh_seconds: Option<u32>) -> Self {
        let sections = groups
            .groups()
            .iter()
            .map(|group| Section {
                name: group.machine_name.clone(),
                source_id: group.source_id,
                rows: group
                    .items
                    .iter()
                    .map(|row| TableRow {
                        label: row.label.clone(),
                        value: row.value().unwrap_or_default().to_owned(),
                        timestamp: row.timestamp().unwrap_or_default().to_owned(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            refresh_seconds,
            sections,
        }
    }
}

impl IntoResponse for SchulerTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /dashboard/schuler` and `GET /_dashboard`.
pub async fn page<S>(State(state): State<AppState<S>>) -> Result<SchulerTemplate, DashboardError>
where
    S: LastValueStore + Send + Sync + 'static,
{
    let groups = state.last_value_service.machine_groups().await?;
    Ok(SchulerTemplate::new(
        &groups,
        state.settings.refresh_seconds,
    ))
}
