//! Shared plumbing for the Google REST clients.

mod auth;

pub use auth::GoogleAuth;

/// Turn a non-success response into `"<status>: <body>"` for error detail.
pub(crate) async fn describe_failure(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    format!("{} {}", status, body.trim())
}
