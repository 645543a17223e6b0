use once_cell::sync::Lazy;
use regex::Regex;

/// Greedy span from the first `{` to the last `}` in the reply. When the
/// reply carries several independent objects the outermost span is taken
/// unconditionally; a failed parse of that span falls through to the
/// caption path.
static BRACE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

const COMPUTED_RESULT_FIELD: &str = "computed_result";

/// Classified output of the vision model: a computed number for
/// mathematical handwriting or a descriptive caption, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputationResult {
    Mathematical(f64),
    Caption(String),
}

impl ComputationResult {
    pub fn title(&self) -> &'static str {
        match self {
            ComputationResult::Mathematical(_) => "Computed Result",
            ComputationResult::Caption(_) => "Caption",
        }
    }

    pub fn display_value(&self) -> String {
        match self {
            ComputationResult::Mathematical(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    format!("{value}")
                }
            }
            ComputationResult::Caption(text) => text.clone(),
        }
    }
}

/// Decides whether the raw model reply encodes a mathematical result or a
/// caption. Prose around a valid JSON object is ignored; malformed or
/// partial braces are not an error and resolve to the caption fallback.
pub fn interpret_reply(raw: &str) -> ComputationResult {
    if let Some(span) = BRACE_SPAN.find(raw) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(span.as_str()) {
            if let Some(number) = value.get(COMPUTED_RESULT_FIELD).and_then(|v| v.as_f64()) {
                return ComputationResult::Mathematical(number);
            }
        }
    }
    ComputationResult::Caption(raw.trim().to_string())
}
