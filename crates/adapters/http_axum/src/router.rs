//! Axum router assembly.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use lastvalue_app::ports::LastValueStore;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges API routes under `/api`, the single-pair lookup, the dashboard
/// pages and, when the directory exists, static assets under `/static`.
/// Responses allow any origin. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<S>(state: AppState<S>) -> Router
where
    S: LastValueStore + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/health", get(health_check::<S>))
        .route(
            "/value/{source_id}/{element_id}",
            get(crate::api::values::get::<S>),
        )
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes());

    if let Some(dir) = state.settings.static_dir.as_deref().filter(|dir| dir.is_dir()) {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthBody {
    db_path: String,
    db_exists: bool,
}

async fn health_check<S>(State(state): State<AppState<S>>) -> Json<HealthBody>
where
    S: LastValueStore + Send + Sync + 'static,
{
    let status = state.last_value_service.store_status();
    Json(HealthBody {
        db_path: status.path.display().to_string(),
        db_exists: status.exists,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DashboardSettings;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use lastvalue_app::ports::{LastValueReader, StoreStatus};
    use lastvalue_app::services::last_value_service::LastValueService;
    use lastvalue_domain::error::LastValueError;
    use lastvalue_domain::id::{ElementId, SourceId};
    use lastvalue_domain::registry::Registry;
    use lastvalue_domain::row::ValueRecord;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Store with a single record for (982, 69), or no store at all.
    struct StubStore {
        available: bool,
    }

    struct StubReader;

    impl LastValueStore for StubStore {
        type Reader = StubReader;

        async fn open(&self) -> Result<StubReader, LastValueError> {
            if self.available {
                Ok(StubReader)
            } else {
                Err(LastValueError::StoreUnavailable(Box::new(
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no database"),
                )))
            }
        }

        fn status(&self) -> StoreStatus {
            StoreStatus {
                path: PathBuf::from("/data/last_value.sqlite"),
                exists: self.available,
            }
        }
    }

    impl LastValueReader for StubReader {
        async fn fetch_last(
            &mut self,
            source_id: SourceId,
            element_id: ElementId,
        ) -> Result<Option<ValueRecord>, LastValueError> {
            Ok((source_id.get() == 982 && element_id.get() == 69).then(|| ValueRecord {
                source_id,
                element_id,
                value: "12.5".to_string(),
                timestamp: "2024-01-01 10:00:00".to_string(),
            }))
        }

        async fn close(self) {}
    }

    fn registry() -> Arc<Registry> {
        Arc::new(
            Registry::builder()
                .machine("Schuler1", SourceId::new(982))
                .machine("Schuler2", SourceId::new(1028))
                .labelled_element(ElementId::new(69), "Barras.VelocidadAcunado.Valor")
                .labelled_element(ElementId::new(48), "DatosGen.ModoTrabajo.Led")
                .element(ElementId::new(999))
                .build()
                .unwrap(),
        )
    }

    fn app_with(available: bool, settings: DashboardSettings) -> Router {
        let service = LastValueService::new(registry(), StubStore { available });
        build(AppState::new(service, settings))
    }

    fn app(available: bool) -> Router {
        app_with(available, DashboardSettings::default())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn should_report_store_location_when_health_check_called() {
        let (status, body) = get_json(app(false), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["db_path"], "/data/last_value.sqlite");
        assert_eq!(body["db_exists"], false);
    }

    #[tokio::test]
    async fn should_list_every_machine_with_its_rows() {
        let (status, body) = get_json(app(true), "/api/schuler").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Schuler1"]["sourceId"], 982);
        assert_eq!(body["Schuler2"]["sourceId"], 1028);

        let items = body["Schuler1"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["value"], "12.5");
        assert_eq!(items[0]["timestamp"], "2024-01-01 10:00:00");
        assert_eq!(items[0]["machineName"], "Schuler1");
        assert_eq!(items[2]["label"], "el_999");
        assert!(items[2]["value"].is_null());
        assert!(items[2]["timestamp"].is_null());
    }

    #[tokio::test]
    async fn should_keep_machine_order_in_json() {
        let (_, body) = get(app(true), "/api/schuler").await;

        let first = body.find("\"Schuler1\"").unwrap();
        let second = body.find("\"Schuler2\"").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn should_return_500_when_store_unavailable() {
        let (status, body) = get_json(app(false), "/api/schuler").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }

    #[tokio::test]
    async fn should_return_single_value() {
        let (status, body) = get_json(app(true), "/value/982/69").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "sourceId": 982,
                "elementId": 69,
                "value": "12.5",
                "timestamp": "2024-01-01 10:00:00",
            })
        );
    }

    #[tokio::test]
    async fn should_return_404_when_value_missing() {
        let (status, body) = get_json(app(true), "/value/1028/48").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no value for dp_id=1028 and el_id=48");
    }

    #[tokio::test]
    async fn should_return_400_when_id_not_numeric() {
        let (status, _) = get_json(app(true), "/value/abc/69").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_render_dashboard_on_both_paths() {
        let (status, canonical) = get(app(true), "/dashboard/schuler").await;
        assert_eq!(status, StatusCode::OK);
        assert!(canonical.contains("<h1>Dashboard Schuler</h1>"));
        assert!(canonical.contains("<td>12.5</td>"));

        let (status, alias) = get(app(true), "/_dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(canonical, alias);
    }

    #[tokio::test]
    async fn should_render_error_page_when_store_unavailable() {
        let (status, body) = get(app(false), "/dashboard/schuler").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Error 500"));
        assert!(!body.contains("<table>"));
    }

    #[tokio::test]
    async fn should_redirect_root_to_dashboard_without_landing_page() {
        let response = app(true)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/_dashboard");
    }

    #[tokio::test]
    async fn should_serve_landing_page_and_static_assets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Planta</h1>").unwrap();
        std::fs::write(dir.path().join("app.css"), "body{margin:0}").unwrap();
        let settings = DashboardSettings {
            refresh_seconds: None,
            static_dir: Some(dir.path().to_path_buf()),
        };

        let (status, body) = get(app_with(true, settings.clone()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>Planta</h1>");

        let (status, body) = get(app_with(true, settings), "/static/app.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body{margin:0}");
    }

    #[tokio::test]
    async fn should_allow_any_origin() {
        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/api/schuler")
                    .header(header::ORIGIN, "http://plant.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }
}
