// ── Core error types ──
//
// User-facing errors from wattview-core. Consumers never see reqwest
// errors or JSON parse failures directly -- the `From<wattview_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants
// whose Display strings are fit for a status line.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach backend: {reason}")]
    BackendUnreachable { reason: String },

    #[error("Backend rejected the request (HTTP {status}){}", fmt_detail(.detail))]
    BackendRejected { status: u16, detail: String },

    #[error("Backend sent an unreadable response: {message}")]
    MalformedResponse { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn fmt_detail(detail: &str) -> String {
    let trimmed = detail.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", &trimmed[..trimmed.len().min(200)])
    }
}

impl From<wattview_api::Error> for CoreError {
    fn from(err: wattview_api::Error) -> Self {
        match err {
            wattview_api::Error::Transport(e) => CoreError::BackendUnreachable {
                reason: e.to_string(),
            },
            wattview_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            wattview_api::Error::Response { status, body } => CoreError::BackendRejected {
                status,
                detail: body,
            },
            wattview_api::Error::Decode { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_trimmed_body() {
        let err = CoreError::BackendRejected {
            status: 400,
            detail: "  bad range  ".into(),
        };
        assert_eq!(
            err.to_string(),
            "Backend rejected the request (HTTP 400): bad range"
        );
    }

    #[test]
    fn rejected_display_omits_empty_body() {
        let err = CoreError::BackendRejected {
            status: 502,
            detail: String::new(),
        };
        assert_eq!(err.to_string(), "Backend rejected the request (HTTP 502)");
    }
}
