//! OpenAPI document assembly.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::validate::list_validations,
        crate::handlers::validate::validate_document,
        crate::handlers::convert::list_conversions,
        crate::handlers::convert::convert_document,
        crate::handlers::compare::list_comparisons,
        crate::handlers::compare::compare_documents,
        crate::handlers::media::serve_media,
        crate::handlers::health::health_check,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::handlers::auth::RegisterRequest,
        crate::handlers::auth::LoginRequest,
        crate::handlers::auth::LoginResponse,
        crate::handlers::auth::LoginRejection,
        spdxhub_core::models::UserResponse,
        spdxhub_core::models::ValidateUploadResponse,
        spdxhub_core::models::ConvertUploadResponse,
        spdxhub_core::models::CompareUploadResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "validate", description = "SPDX document validation"),
        (name = "convert", description = "SPDX format conversion"),
        (name = "compare", description = "SPDX document comparison"),
        (name = "media", description = "Stored files and generated outputs"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("serialize");
        let paths = json.get("paths").and_then(|p| p.as_object()).unwrap();
        assert!(paths.contains_key("/api/v1/validate"));
        assert!(paths.contains_key("/api/v1/convert"));
        assert!(paths.contains_key("/api/v1/compare"));
        assert!(paths.contains_key("/api/v1/auth/login"));
    }

    #[test]
    fn test_security_scheme_registered() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("serialize");
        let schemes = json
            .pointer("/components/securitySchemes")
            .and_then(|s| s.as_object())
            .unwrap();
        assert!(schemes.contains_key("bearer_auth"));
    }
}
