pub mod middleware;

use serde::Deserialize;

/// Error envelope returned by the Identity Toolkit API on non-success
/// responses: `{"error": {"status": "...", "message": "..."}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlatformErrorResponse {
    pub error: PlatformErrorDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlatformErrorDetails {
    pub status: String,
    pub message: String,
}

/// Best-effort parse of a platform error body. Bodies that are not valid
/// JSON (or not the expected envelope) yield empty status/message rather
/// than an error of their own.
pub fn parse_platform_error(body: &str) -> PlatformErrorDetails {
    serde_json::from_str::<PlatformErrorResponse>(body)
        .map(|resp| resp.error)
        .unwrap_or_default()
}
