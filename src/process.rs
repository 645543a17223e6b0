use crate::gemini::VisionModel;
use crate::interpret::{interpret_reply, ComputationResult};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

/// Body of a processing request: `{"image": <data-URL-or-base64 string>}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessRequest {
    pub image: Option<String>,
}

/// Status code plus JSON body, transport-agnostic. The payloads follow the
/// `/api/process` contract exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessResponse {
    pub status: u16,
    pub body: Value,
}

impl ProcessResponse {
    fn bad_request() -> Self {
        Self {
            status: 400,
            body: json!({ "error": "Image is required" }),
        }
    }

    fn ok(result: ComputationResult) -> Self {
        let body = match result {
            ComputationResult::Mathematical(number) => {
                json!({ "type": "mathematical", "result": number })
            }
            ComputationResult::Caption(text) => json!({ "type": "caption", "result": text }),
        };
        Self { status: 200, body }
    }

    fn internal_error(details: String) -> Self {
        Self {
            status: 500,
            body: json!({ "error": "Internal server error", "details": details }),
        }
    }

    /// Re-extracts the classified result from a successful response body.
    pub fn computation(&self) -> Option<ComputationResult> {
        if self.status != 200 {
            return None;
        }
        let result = self.body.get("result")?;
        match self.body.get("type")?.as_str()? {
            "mathematical" => Some(ComputationResult::Mathematical(result.as_f64()?)),
            "caption" => Some(ComputationResult::Caption(result.as_str()?.to_string())),
            _ => None,
        }
    }

    /// Human-readable failure detail for error responses.
    pub fn error_details(&self) -> Option<String> {
        if self.status == 200 {
            return None;
        }
        self.body
            .get("details")
            .or_else(|| self.body.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Strips an optional `data:<mime>;base64,` prefix, leaving raw base64.
pub fn strip_data_url_prefix(image: &str) -> &str {
    if !image.starts_with("data:") {
        return image;
    }
    match image.split_once(',') {
        Some((_, data)) => data,
        None => image,
    }
}

/// The `/api/process` operation: validates the request, forwards the image
/// to the vision model and classifies the reply. Nothing is retried; any
/// model or transport failure surfaces as a 500 with the raw error detail.
pub fn handle_process(request: &ProcessRequest, model: &dyn VisionModel) -> ProcessResponse {
    let Some(image) = request.image.as_deref().filter(|image| !image.is_empty()) else {
        return ProcessResponse::bad_request();
    };

    match model.describe_image(strip_data_url_prefix(image)) {
        Ok(reply) => ProcessResponse::ok(interpret_reply(&reply)),
        Err(err) => {
            error!("vision model request failed: {err:#}");
            ProcessResponse::internal_error(err.to_string())
        }
    }
}
