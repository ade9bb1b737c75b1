//! Shared fixtures for provider integration tests.

use std::sync::Arc;

use facelink_infra::api::{FaceApiClient, FaceApiConfig, TokenHolder};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "24.6c5e1ff107f0e8bcef8c46d3424a0e78.2592000.1485516651.282335-8574074";

/// Client pointed at the mock server, with a holder already holding
/// [`TEST_TOKEN`].
pub fn client_for(server: &MockServer) -> (FaceApiClient, Arc<TokenHolder>) {
    let holder = Arc::new(TokenHolder::with_token(TEST_TOKEN));
    let config = FaceApiConfig { base_url: server.uri(), ..Default::default() };
    let client = FaceApiClient::new(config, holder.clone()).expect("client should build");
    (client, holder)
}

/// Wrap a payload in the provider's success envelope.
pub fn envelope(result: Value) -> Value {
    json!({
        "error_code": 0,
        "error_msg": "SUCCESS",
        "log_id": 3_584_051_565_u64,
        "timestamp": 1_588_000_000,
        "cached": 0,
        "result": result
    })
}

/// Error envelope for an invalid access token.
pub fn invalid_token_envelope() -> Value {
    json!({
        "error_code": 110,
        "error_msg": "Access token invalid or no longer valid",
        "log_id": 3_584_051_566_u64,
        "result": null
    })
}

/// Detection result for a photo with two people.
pub fn two_face_detect_result() -> Value {
    json!({
        "face_num": 2,
        "face_list": [
            {
                "face_token": "35235asfas21421fakghktyfdgh68bio",
                "location": {"left": 117, "top": 131, "width": 172, "height": 170, "rotation": 4},
                "face_probability": 1,
                "angle": {"yaw": -0.34859421849251, "pitch": 1.9135693311691, "roll": 2.3033397197723}
            },
            {
                "face_token": "8b3f2e7c1d4a9e6f5b0c2d8a7e1f4b3c",
                "location": {"left": 402, "top": 98, "width": 160, "height": 158, "rotation": -2},
                "face_probability": 0.98,
                "angle": {"yaw": 5.1, "pitch": -1.2, "roll": 0.4}
            }
        ]
    })
}

pub fn match_result() -> Value {
    json!({
        "score": 44.3,
        "face_list": [
            {"face_token": "fid1"},
            {"face_token": "fid2"}
        ]
    })
}

pub fn liveness_result() -> Value {
    json!({
        "face_liveness": 0.4929,
        "thresholds": {"frr_1e-4": 0.05, "frr_1e-3": 0.3, "frr_1e-2": 0.9},
        "face_list": [
            {
                "face_token": "fa26f3aa9b2e3e0e9ab1f4d1e0f4b5c2",
                "location": {"left": 31.95, "top": 120.3, "width": 87, "height": 85, "rotation": -5},
                "face_probability": 1,
                "angle": {"yaw": -0.7, "pitch": 5.2, "roll": -4.1},
                "liveness": {"livemapscore": 0.4929},
                "age": 22,
                "beauty": 63.7,
                "spoofing": 0.00002
            }
        ]
    })
}

/// OCR response for the portrait side. Fields sit at top level.
pub fn id_card_front_response() -> Value {
    json!({
        "log_id": 2_648_325_511_u64,
        "direction": 0,
        "image_status": "normal",
        "risk_type": "normal",
        "edit_tool": "",
        "idcard_number_type": 1,
        "words_result_num": 6,
        "words_result": {
            "住址": {"location": {"left": 267, "top": 453, "width": 459, "height": 99}, "words": "南京市江宁区弘景大道3889号"},
            "公民身份号码": {"location": {"left": 443, "top": 681, "width": 589, "height": 45}, "words": "330881199904173914"},
            "出生": {"location": {"left": 270, "top": 355, "width": 357, "height": 45}, "words": "19990417"},
            "姓名": {"location": {"left": 267, "top": 176, "width": 152, "height": 50}, "words": "伍云龙"},
            "性别": {"location": {"left": 269, "top": 262, "width": 33, "height": 52}, "words": "男"},
            "民族": {"location": {"left": 492, "top": 279, "width": 30, "height": 37}, "words": "汉"}
        },
        "photo": "/9j/4AAQSkZJRgABAQAAAQABAAD",
        "photo_location": {"left": 756, "top": 176, "width": 304, "height": 384}
    })
}
