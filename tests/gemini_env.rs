use canvas_ai::gemini::{GeminiClient, DEFAULT_ENDPOINT};
use serial_test::serial;

const KEY_VAR: &str = "GEMINI_API_KEY";

#[test]
#[serial]
fn missing_api_key_is_a_fatal_startup_condition() {
    std::env::remove_var(KEY_VAR);
    let err = GeminiClient::from_env(DEFAULT_ENDPOINT.to_string()).unwrap_err();
    assert!(err.to_string().contains(KEY_VAR));
}

#[test]
#[serial]
fn present_api_key_builds_a_client() {
    std::env::set_var(KEY_VAR, "test-key");
    assert!(GeminiClient::from_env(DEFAULT_ENDPOINT.to_string()).is_ok());
    std::env::remove_var(KEY_VAR);
}
