use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the job scout API.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::jobs::list_jobs,
        crate::routes::jobs::trigger_scan,
        crate::routes::dashboard::dashboard,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::jobs::SeenJob,
            crate::dto::scan::ScanReport,
            crate::dto::scan::SourceReport,
            crate::sources::JobPosting,
        )
    ),
    modifiers(&BasicAuthScheme),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "jobs", description = "Scans and remembered postings"),
        (name = "dashboard", description = "HTML dashboard"),
    )
)]
pub struct ApiDoc;

/// Declares the HTTP Basic scheme protecting every route but `/healthcheck`.
struct BasicAuthScheme;

impl utoipa::Modify for BasicAuthScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
    }
}
