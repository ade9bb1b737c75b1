//! Integration tests for the face and ID-card API client
//!
//! **Coverage:**
//! - Wire contract per operation: method, path, token query, content type, body
//! - Envelope decoding into typed results
//! - Provider error propagation for every operation
//! - Batch liveness de-duplication and face match ordering
//!
//! **Infrastructure:**
//! - WireMock HTTP server standing in for the provider

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use std::io::Write;

use facelink_domain::{
    FaceDescriptor, FaceFields, FaceLiveRequest, FaceType, IdCardSide, ImageReference, ImageType,
};
use facelink_infra::api::ApiError;
use serde_json::json;
use support::{
    client_for, envelope, id_card_front_response, invalid_token_envelope, liveness_result,
    match_result, two_face_detect_result, TEST_TOKEN,
};
use tempfile::NamedTempFile;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Face detection
// ============================================================================

#[tokio::test]
async fn face_detect_returns_both_faces() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/face/v3/detect"))
        .and(query_param("access_token", TEST_TOKEN))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "image_type": "URL",
            "max_face_num": "10",
            "image": "https://example.com/group.jpg"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(two_face_detect_result())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let result = client.face_detect(&ImageReference::url("https://example.com/group.jpg")).await.unwrap();

    assert_eq!(result.face_num, 2);
    assert_eq!(result.face_list.len(), 2);
    assert_eq!(result.face_list[0].face_token, "35235asfas21421fakghktyfdgh68bio");
    assert_eq!(result.face_list[0].face_probability, Some(1.0));
    assert_eq!(result.face_list[1].face_token, "8b3f2e7c1d4a9e6f5b0c2d8a7e1f4b3c");
    assert_eq!(result.face_list[1].face_probability, Some(0.98));
    assert_eq!(result.face_list[1].location.as_ref().map(|l| l.rotation), Some(-2));
}

#[tokio::test]
async fn face_detect_accepts_string_encoded_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/face/v3/detect"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!(two_face_detect_result().to_string()))),
        )
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let result = client.face_detect(&ImageReference::base64("aGVsbG8")).await.unwrap();
    assert_eq!(result.face_num, 2);
}

// ============================================================================
// Face match
// ============================================================================

#[tokio::test]
async fn face_match_sends_two_element_array_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/face/v3/match"))
        .and(query_param("access_token", TEST_TOKEN))
        .and(header("content-type", "application/json"))
        .and(body_json(json!([
            {"image": "first", "image_type": "FACE_TOKEN", "face_type": "LIVE"},
            {"image": "https://example.com/card.jpg", "image_type": "URL", "face_type": "CERT"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(match_result())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let first = FaceDescriptor::new(ImageReference::face_token("first"));
    let second = FaceDescriptor::new(ImageReference::url("https://example.com/card.jpg"))
        .with_face_type(FaceType::Cert);

    let result = client.face_match(&first, &second).await.unwrap();
    assert!((result.score - 44.3).abs() < f64::EPSILON);
    assert_eq!(result.face_list[0].face_token, "fid1");
    assert_eq!(result.face_list[1].face_token, "fid2");
}

#[tokio::test]
async fn face_match_with_uses_live_and_idcard_types() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/face/v3/match"))
        .and(body_json(json!([
            {"image": "bGl2ZQ", "image_type": "BASE64", "face_type": "LIVE"},
            {"image": "Y2FyZA", "image_type": "BASE64", "face_type": "IDCARD"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(match_result())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let result = client.face_match_with(ImageType::Base64, "bGl2ZQ", "Y2FyZA").await.unwrap();
    assert_eq!(result.face_list.len(), 2);
}

// ============================================================================
// Liveness
// ============================================================================

#[tokio::test]
async fn check_live_single_uses_default_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/face/v3/faceverify"))
        .and(query_param("access_token", TEST_TOKEN))
        .and(header("content-type", "application/json"))
        .and(body_json(json!([{
            "image": "https://example.com/selfie.jpg",
            "image_type": "URL",
            "face_field": "age,beauty,spoofing",
            "face_type": "COMMON"
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(liveness_result())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let result =
        client.check_live_single(&ImageReference::url("https://example.com/selfie.jpg")).await.unwrap();

    assert!((result.face_liveness - 0.4929).abs() < f64::EPSILON);
    assert!(result.passes(result.thresholds.frr_1e_3));
    assert!(!result.passes(result.thresholds.frr_1e_2));
    assert_eq!(result.face_list[0].age, Some(22.0));
}

#[tokio::test]
async fn check_live_batch_collapses_duplicate_images() {
    let server = MockServer::start().await;
    let request = |image: &str| {
        json!({
            "image": image,
            "image_type": "URL",
            "face_field": "age,beauty,spoofing",
            "face_type": "COMMON"
        })
    };
    Mock::given(method("POST"))
        .and(path("/rest/2.0/face/v3/faceverify"))
        .and(body_json(json!([request("https://x/1.jpg"), request("https://x/2.jpg")])))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(liveness_result())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let images = ["https://x/1.jpg", "https://x/2.jpg", "https://x/1.jpg"].map(String::from);
    client.check_live_batch(ImageType::Url, images).await.unwrap();
}

#[tokio::test]
async fn check_live_sends_caller_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/face/v3/faceverify"))
        .and(body_json(json!([{
            "image": "tok",
            "image_type": "FACE_TOKEN",
            "face_field": "age,quality",
            "face_type": "LIVE"
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(liveness_result())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let fields: FaceFields = "quality,age".parse().unwrap();
    let request = FaceLiveRequest::new(ImageReference::face_token("tok"), fields, FaceType::Live);
    client.check_live(&[request]).await.unwrap();
}

// ============================================================================
// ID card
// ============================================================================

#[tokio::test]
async fn check_id_card_always_requests_risk_and_photo() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/ocr/v1/idcard"))
        .and(query_param("access_token", TEST_TOKEN))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("id_card_side=front"))
        .and(body_string_contains("detect_risk=true"))
        .and(body_string_contains("detect_photo=true"))
        .and(body_string_contains("image=aGVsbG8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(id_card_front_response()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let result = client.check_id_card_front(&ImageReference::base64("aGVsbG8")).await.unwrap();

    assert_eq!(result.words_result_num, 6);
    assert_eq!(result.word("姓名"), Some("伍云龙"));
    assert_eq!(result.word("公民身份号码"), Some("330881199904173914"));
    assert_eq!(result.image_status.as_deref(), Some("normal"));
    assert_eq!(result.idcard_number_type, Some(1));
    assert!(result.photo.is_some());
}

#[tokio::test]
async fn check_id_card_back_with_url_uses_url_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/ocr/v1/idcard"))
        .and(body_string_contains("id_card_side=back"))
        .and(body_string_contains("detect_risk=true"))
        .and(body_string_contains("detect_photo=true"))
        .and(body_string_contains("url=https%3A%2F%2Fexample.com%2Fback.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "log_id": 1,
            "image_status": "normal",
            "words_result_num": 1,
            "words_result": {"签发机关": {"location": {}, "words": "南京市公安局"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let result =
        client.check_id_card_back(&ImageReference::url("https://example.com/back.jpg")).await.unwrap();
    assert_eq!(result.word("签发机关"), Some("南京市公安局"));
}

#[tokio::test]
async fn check_id_card_file_submits_base64_contents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/2.0/ocr/v1/idcard"))
        .and(body_string_contains("image=aGVsbG8%3D"))
        .respond_with(ResponseTemplate::new(200).set_body_json(id_card_front_response()))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"hello").unwrap();

    let (client, _) = client_for(&server);
    let result = client.check_id_card_file(file.path(), IdCardSide::Front).await.unwrap();
    assert_eq!(result.log_id, 2_648_325_511);
}

// ============================================================================
// Provider errors
// ============================================================================

async fn invalid_token_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(invalid_token_envelope()))
        .mount(&server)
        .await;
    server
}

fn assert_token_rejected(err: &ApiError) {
    assert_eq!(err.vendor_code(), Some("110"), "unexpected error: {err:?}");
    assert!(err.is_token_rejected());
    assert!(err.to_string().contains("Access token invalid"));
}

#[tokio::test]
async fn every_operation_surfaces_provider_error_code() {
    let server = invalid_token_server().await;
    let (client, _) = client_for(&server);
    let image = ImageReference::url("https://example.com/a.jpg");
    let descriptor = FaceDescriptor::new(image.clone());

    assert_token_rejected(&client.face_detect(&image).await.unwrap_err());
    assert_token_rejected(&client.face_match(&descriptor, &descriptor).await.unwrap_err());
    assert_token_rejected(&client.check_live_single(&image).await.unwrap_err());
    assert_token_rejected(
        &client.check_live_batch(ImageType::Url, vec!["https://x/1.jpg".to_string()]).await.unwrap_err(),
    );
    assert_token_rejected(&client.check_id_card(&image, IdCardSide::Front).await.unwrap_err());
}

#[tokio::test]
async fn http_error_status_keeps_vendor_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error_code": 6,
            "error_msg": "No permission to access data"
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.face_detect(&ImageReference::face_token("t")).await.unwrap_err();
    assert_eq!(err, ApiError::Vendor { code: "6".into(), message: "No permission to access data".into() });
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.face_detect(&ImageReference::face_token("t")).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn refreshed_token_is_used_by_next_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("access_token", "24.rotated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(two_face_detect_result())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, holder) = client_for(&server);
    holder.set("24.rotated").await;

    let result = client.face_detect(&ImageReference::face_token("t")).await.unwrap();
    assert_eq!(result.face_num, 2);
}
