use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

const API_KEY_VAR: &str = "GEMINI_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed instruction prompt sent with every image. The model answers either
/// with a `{"computed_result": <number>}` object or a plain-text caption.
const PROMPT: &str = r#"CanvasAI: Empowering Creativity with Intelligent Note-Taking

Analyze the provided image and respond in one of two ways:

1. For mathematical content:
{
    "computed_result": number
}

- Handle all mathematical expressions including:
  - Basic arithmetic
  - Algebraic expressions
  - Trigonometric functions
  - Logarithmic operations
  - Calculus-based computations
- Return only the final computed result in JSON format
- Include no explanations or intermediate steps

Examples:
Input: "2 + 3"
Response: {"computed_result": 5}

Input: "25 / 5 - 3"
Response: {"computed_result": 2}

Input: "x^2 + 2x + 1, where x = 3"
Response: {"computed_result": 16}

Input: "sin(30 deg)"
Response: {"computed_result": 0.5}

Input: "log10(100)"
Response: {"computed_result": 2}

Input: "2 * sin(45 deg) + log10(1000)"
Response: {"computed_result": 4.414}

Input: "integral of 2x dx from 0 to 2"
Response: {"computed_result": 4}

Input: "d/dx(x^2) at x = 3"
Response: {"computed_result": 6}

2. For non-mathematical content:
- Provide a single, concise caption describing the key elements in the image
- Focus on identifying:
  - Main subjects/objects
  - Notable text content
  - Key visual elements
  - Spatial relationships
  - Important contextual details
- Return the caption as plain text without any JSON formatting

Important:
- Provide only the requested output format
- Include no additional explanations or commentary
- Ensure mathematical results are precise and formatted as JSON
- Keep non-mathematical captions clear and descriptive"#;

/// Seam between the processing handler and the hosted vision model, so the
/// handler is testable without the network.
pub trait VisionModel {
    /// Sends one JPEG image (base64, no data-URL prefix) together with the
    /// fixed instruction prompt and returns the model's raw text reply.
    fn describe_image(&self, jpeg_base64: &str) -> Result<String>;
}

#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("canvas-ai")
            .build()
            .context("build vision model http client")?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Reads the API key from `GEMINI_API_KEY`. A missing key is a fatal
    /// startup condition for the processing endpoint.
    pub fn from_env(endpoint: String) -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| anyhow!("{API_KEY_VAR} is not set; image processing cannot start"))?;
        Self::new(api_key, endpoint)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

impl VisionModel for GeminiClient {
    fn describe_image(&self, jpeg_base64: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Some(PROMPT),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "image/jpeg",
                            data: jpeg_base64,
                        }),
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .context("send request to vision model")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("vision model returned {status}: {body}");
        }

        let parsed: GenerateResponse = response
            .json()
            .context("decode vision model response")?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| anyhow!("vision model returned no candidates"))?;
        debug!(len = text.len(), "vision model reply received");
        Ok(text)
    }
}
