use axum::{Router, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Basic authentication middleware.
pub mod auth;
/// HTML dashboard route.
pub mod dashboard;
/// Health check route.
pub mod health;
/// Posting listing and on-demand scans.
pub mod jobs;

/// Compose all route trees: public health and docs, everything else behind basic auth.
pub fn router(state: SharedState) -> Router<()> {
    let protected = dashboard::router()
        .merge(jobs::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    let docs: Router<SharedState> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    health::router()
        .merge(protected)
        .merge(docs)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use futures::future::BoxFuture;
    use reqwest::Url;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            job_store::{
                JobStore,
                sqlite::{SqliteConfig, SqliteJobStore},
            },
            models::SeenJobEntity,
            storage::{StorageError, StorageResult},
        },
        sources::fetch::{FetchError, PageFetcher},
        state::AppState,
    };

    const GOOD_AUTH: &str = "Basic YWRtaW46cGFzc3dvcmQ="; // admin:password
    const BAD_AUTH: &str = "Basic YWRtaW46d3Jvbmc="; // admin:wrong

    /// Every portal answers without content.
    struct OfflineFetcher;

    impl PageFetcher for OfflineFetcher {
        fn fetch(&self, _url: Url) -> BoxFuture<'static, Result<Option<String>, FetchError>> {
            Box::pin(async { Ok(None) })
        }
    }

    /// Store whose every call fails as if the database file were gone.
    struct UnreachableStore;

    fn store_down<T: Send + 'static>() -> BoxFuture<'static, StorageResult<T>> {
        Box::pin(async {
            Err(StorageError::unavailable(
                "ping",
                std::io::Error::other("database is locked"),
            ))
        })
    }

    impl JobStore for UnreachableStore {
        fn is_seen(&self, _job_id: String) -> BoxFuture<'static, StorageResult<bool>> {
            store_down()
        }

        fn mark_seen(&self, _job: SeenJobEntity) -> BoxFuture<'static, StorageResult<bool>> {
            store_down()
        }

        fn list_recent(&self, _limit: u32) -> BoxFuture<'static, StorageResult<Vec<SeenJobEntity>>> {
            store_down()
        }

        fn count(&self) -> BoxFuture<'static, StorageResult<u64>> {
            store_down()
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            store_down()
        }
    }

    async fn app() -> Router<()> {
        let store = SqliteJobStore::connect(SqliteConfig::in_memory())
            .await
            .unwrap();
        let state =
            AppState::new(AppConfig::default(), Arc::new(store), Arc::new(OfflineFetcher)).shared();
        router(state)
    }

    fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn dashboard_challenges_without_credentials() {
        let response = app().await.oneshot(get("/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            r#"Basic realm="Login""#
        );
        assert_eq!(body_text(response).await, "Login required");
    }

    #[tokio::test]
    async fn dashboard_rejects_wrong_password() {
        let response = app().await.oneshot(get("/", Some(BAD_AUTH))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn dashboard_renders_scan_with_credentials() {
        let response = app().await.oneshot(get("/", Some(GOOD_AUTH))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<h1>Job Scout</h1>"));
        assert!(html.contains("No matching jobs found."));
        assert!(html.contains("We Work Remotely: 0 jobs, 0 new"));
    }

    #[tokio::test]
    async fn healthcheck_is_public() {
        let response = app().await.oneshot(get("/healthcheck", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["seen_jobs"], 0);
    }

    #[tokio::test]
    async fn healthcheck_reports_degraded_storage() {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(UnreachableStore),
            Arc::new(OfflineFetcher),
        )
        .shared();
        let response = router(state)
            .oneshot(get("/healthcheck", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, r#"{"status":"degraded"}"#);
    }

    #[tokio::test]
    async fn jobs_validates_limit() {
        let response = app()
            .await
            .oneshot(get("/jobs?limit=0", Some(GOOD_AUTH)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app()
            .await
            .oneshot(get("/jobs", Some(GOOD_AUTH)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn scan_endpoint_requires_post_and_auth() {
        let request = Request::builder()
            .method("POST")
            .uri("/scan")
            .body(Body::empty())
            .unwrap();
        let response = app().await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .method("POST")
            .uri("/scan")
            .header(header::AUTHORIZATION, GOOD_AUTH)
            .body(Body::empty())
            .unwrap();
        let response = app().await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["sources"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/jobs", "/scan", "/healthcheck"] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
