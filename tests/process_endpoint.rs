use canvas_ai::gemini::VisionModel;
use canvas_ai::process::{handle_process, ProcessRequest};
use serde_json::json;
use std::sync::Mutex;

/// Canned vision model for exercising the handler without the network.
struct StubModel {
    reply: Result<String, String>,
    seen: Mutex<Vec<String>>,
}

impl StubModel {
    fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl VisionModel for StubModel {
    fn describe_image(&self, jpeg_base64: &str) -> anyhow::Result<String> {
        self.seen.lock().unwrap().push(jpeg_base64.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

fn request(image: Option<&str>) -> ProcessRequest {
    ProcessRequest {
        image: image.map(str::to_string),
    }
}

#[test]
fn missing_image_returns_exact_400_payload() {
    let model = StubModel::replying("unused");
    let response = handle_process(&request(None), &model);

    assert_eq!(response.status, 400);
    assert_eq!(response.body, json!({ "error": "Image is required" }));
    assert!(model.seen.lock().unwrap().is_empty(), "model must not be called");
}

#[test]
fn empty_image_string_is_treated_as_missing() {
    let model = StubModel::replying("unused");
    let response = handle_process(&request(Some("")), &model);
    assert_eq!(response.status, 400);
}

#[test]
fn mathematical_reply_returns_typed_200() {
    let model = StubModel::replying("{\"computed_result\": 14}");
    let response = handle_process(&request(Some("aGVsbG8=")), &model);

    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        json!({ "type": "mathematical", "result": 14.0 })
    );
}

#[test]
fn caption_reply_returns_typed_200() {
    let model = StubModel::replying("A hand-drawn cat sitting on a mat");
    let response = handle_process(&request(Some("aGVsbG8=")), &model);

    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        json!({ "type": "caption", "result": "A hand-drawn cat sitting on a mat" })
    );
}

#[test]
fn data_url_prefix_is_stripped_before_the_model_sees_the_image() {
    let model = StubModel::replying("{\"computed_result\": 2}");
    let response = handle_process(
        &request(Some("data:image/jpeg;base64,c29tZWJ5dGVz")),
        &model,
    );

    assert_eq!(response.status, 200);
    assert_eq!(model.seen.lock().unwrap().as_slice(), ["c29tZWJ5dGVz"]);
}

#[test]
fn model_failure_returns_500_with_details() {
    let model = StubModel::failing("quota exceeded");
    let response = handle_process(&request(Some("aGVsbG8=")), &model);

    assert_eq!(response.status, 500);
    assert_eq!(
        response.body,
        json!({ "error": "Internal server error", "details": "quota exceeded" })
    );
    assert_eq!(response.error_details().as_deref(), Some("quota exceeded"));
}

#[test]
fn prose_wrapped_json_still_classifies_as_mathematical() {
    let model = StubModel::replying("Sure! {\"computed_result\": 25.866} there you go");
    let response = handle_process(&request(Some("aGVsbG8=")), &model);

    assert_eq!(response.status, 200);
    assert_eq!(response.body["type"], "mathematical");
    assert_eq!(response.body["result"], 25.866);
}
