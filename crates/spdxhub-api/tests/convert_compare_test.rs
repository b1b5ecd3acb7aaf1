mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{bearer, register_and_login, setup_test_app};
use serde_json::Value;

const TAG_DOCUMENT: &[u8] = b"SPDXVersion: SPDX-2.0\nDataLicense: CC0-1.0\nDocumentName: example\n";
const RDF_DOCUMENT_1: &[u8] = b"<?xml version=\"1.0\"?>\n<rdf:RDF name=\"one\"/>\n";
const RDF_DOCUMENT_2: &[u8] = b"<?xml version=\"1.0\"?>\n<rdf:RDF name=\"two\"/>\n";

#[tokio::test]
async fn test_convert_tag_to_rdf() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let form = MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(TAG_DOCUMENT.to_vec()).file_name("example.spdx"),
        )
        .add_text("cfilename", "converted-example.rdf")
        .add_text("from_format", "Tag")
        .add_text("to_format", "RDF");

    let response = client
        .post("/api/v1/convert")
        .add_header("Authorization", bearer(&user))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(
        body["result"].as_str(),
        Some("/media/converted-example.rdf")
    );
    assert_eq!(body["from_format"].as_str(), Some("Tag"));
    assert_eq!(body["to_format"].as_str(), Some("RDF"));
}

#[tokio::test]
async fn test_convert_unsupported_pair_rejected_before_upload() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let form = MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(TAG_DOCUMENT.to_vec()).file_name("example.spdx"),
        )
        .add_text("cfilename", "out.spdx")
        .add_text("from_format", "Html")
        .add_text("to_format", "Tag");

    let response = client
        .post("/api/v1/convert")
        .add_header("Authorization", bearer(&user))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);

    // Nothing was recorded for the rejected request.
    let response = client
        .get("/api/v1/convert")
        .add_header("Authorization", bearer(&user))
        .await;
    let records: Vec<Value> = response.json();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_convert_unknown_format_rejected() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let form = MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(TAG_DOCUMENT.to_vec()).file_name("example.spdx"),
        )
        .add_text("cfilename", "out.yaml")
        .add_text("from_format", "Tag")
        .add_text("to_format", "Yaml");

    let response = client
        .post("/api/v1/convert")
        .add_header("Authorization", bearer(&user))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_convert_without_file_is_404_without_record() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let form = MultipartForm::new()
        .add_text("cfilename", "out.rdf")
        .add_text("from_format", "Tag")
        .add_text("to_format", "RDF");

    let response = client
        .post("/api/v1/convert")
        .add_header("Authorization", bearer(&user))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some());

    // Unlike validate, the convert path records nothing for fileless requests.
    let response = client
        .get("/api/v1/convert")
        .add_header("Authorization", bearer(&user))
        .await;
    let records: Vec<Value> = response.json();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_compare_two_rdf_documents() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let form = MultipartForm::new()
        .add_part(
            "file1",
            Part::bytes(RDF_DOCUMENT_1.to_vec()).file_name("SPDXRdfExample-v2.0.rdf"),
        )
        .add_part(
            "file2",
            Part::bytes(RDF_DOCUMENT_2.to_vec()).file_name("SPDXRdfExample2-v2.0.rdf"),
        )
        .add_text("rfilename", "comparetest");

    let response = client
        .post("/api/v1/compare")
        .add_header("Authorization", bearer(&user))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["result"].as_str(), Some("/media/comparetest.xlsx"));
    assert_eq!(
        body["file1_filename"].as_str(),
        Some("SPDXRdfExample-v2.0.rdf")
    );
    assert_eq!(
        body["file2_filename"].as_str(),
        Some("SPDXRdfExample2-v2.0.rdf")
    );
}

#[tokio::test]
async fn test_compare_missing_second_file_is_404() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    let form = MultipartForm::new().add_part(
        "file1",
        Part::bytes(RDF_DOCUMENT_1.to_vec()).file_name("only.rdf"),
    );

    let response = client
        .post("/api/v1/compare")
        .add_header("Authorization", bearer(&user))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_compare_requires_authentication() {
    let Some(app) = setup_test_app().await else {
        return;
    };

    let form = MultipartForm::new()
        .add_part(
            "file1",
            Part::bytes(RDF_DOCUMENT_1.to_vec()).file_name("a.rdf"),
        )
        .add_part(
            "file2",
            Part::bytes(RDF_DOCUMENT_2.to_vec()).file_name("b.rdf"),
        );

    let response = app.client().post("/api/v1/compare").multipart(form).await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_media_serves_uploaded_output() {
    let Some(app) = setup_test_app().await else {
        return;
    };
    let client = app.client();
    let user = register_and_login(client).await;

    // A validated upload lands under uploads/ in the media root; fetch it back.
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(TAG_DOCUMENT.to_vec()).file_name("roundtrip.spdx"),
    );
    let response = client
        .post("/api/v1/validate")
        .add_header("Authorization", bearer(&user))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 200);

    let response = client.get("/media/missing-file.rdf").await;
    assert_eq!(response.status_code(), 404);
}
