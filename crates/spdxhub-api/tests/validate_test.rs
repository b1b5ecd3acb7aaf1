mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{bearer, register_and_login, setup_test_app, setup_test_app_with_tool, ToolBehavior};
use serde_json::Value;

const TAG_DOCUMENT: &[u8] = b"SPDXVersion: SPDX-2.0\nDataLicense: CC0-1.0\nDocumentName: example\n";

fn tag_file_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(TAG_DOCUMENT.to_vec()).file_name("SPDXTagExample-v2.0.spdx"),
    )
}

#[tokio::test]
async fn test_validate_requires_authentication() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();

    let response = client.get("/api/v1/validate").await;
    assert_eq!(response.status_code(), 401);

    let response = client
        .post("/api/v1/validate")
        .multipart(tag_file_form())
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_validate_accepts_well_formed_document() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let response = client
        .post("/api/v1/validate")
        .add_header("Authorization", bearer(&user))
        .multipart(tag_file_form())
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(
        body["result"].as_str(),
        Some("This SPDX Document is valid.")
    );
    assert_eq!(
        body["filename"].as_str(),
        Some("SPDXTagExample-v2.0.spdx")
    );
}

#[tokio::test]
async fn test_validate_records_tool_rejection_verbatim() {
    let Some(app) =
        setup_test_app_with_tool(ToolBehavior::Reject("Document does not conform to SPDX 2.0"))
            .await
    else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let response = client
        .post("/api/v1/validate")
        .add_header("Authorization", bearer(&user))
        .multipart(tag_file_form())
        .await;

    // Tool rejection is the request's recorded outcome, not an HTTP error.
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(
        body["result"].as_str(),
        Some("Document does not conform to SPDX 2.0")
    );
}

#[tokio::test]
async fn test_validate_without_file_is_404_and_recorded() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let response = client
        .post("/api/v1/validate")
        .add_header("Authorization", bearer(&user))
        .multipart(MultipartForm::new().add_text("unrelated", "field"))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some());

    // The fileless attempt still shows up in the caller's records.
    let response = client
        .get("/api/v1/validate")
        .add_header("Authorization", bearer(&user))
        .await;
    assert_eq!(response.status_code(), 200);
    let records: Vec<Value> = response.json();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["result"].as_str(), Some("File Not Uploaded"));
    assert!(records[0]["filename"].is_null());
}

#[tokio::test]
async fn test_validate_rejects_unknown_extension() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"not spdx".to_vec()).file_name("evil.exe"),
    );

    let response = client
        .post("/api/v1/validate")
        .add_header("Authorization", bearer(&user))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_validation_listing_is_owner_scoped() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user1 = register_and_login(client).await;
    let user2 = register_and_login(client).await;

    let response = client
        .post("/api/v1/validate")
        .add_header("Authorization", bearer(&user1))
        .multipart(tag_file_form())
        .await;
    assert_eq!(response.status_code(), 200);

    let response = client
        .get("/api/v1/validate")
        .add_header("Authorization", bearer(&user2))
        .await;
    assert_eq!(response.status_code(), 200);
    let records: Vec<Value> = response.json();
    assert!(records.is_empty());
}
