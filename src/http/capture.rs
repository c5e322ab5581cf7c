//! Status capture for responses flowing back through the pipeline.

use axum::{http::StatusCode, response::Response};

/// Remembers the status of the response sent to the client.
///
/// Only the first observation counts; later ones pass through untouched.
/// Until a response is observed the recorded status is 200.
#[derive(Debug, Clone, Copy)]
pub struct StatusCapture {
    status: StatusCode,
    observed: bool,
}

impl StatusCapture {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            observed: false,
        }
    }

    /// Record the response status and hand the response back unchanged.
    pub fn observe(&mut self, response: Response) -> Response {
        if !self.observed {
            self.status = response.status();
            self.observed = true;
        }
        response
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether a response has gone through this capture.
    pub fn observed(&self) -> bool {
        self.observed
    }
}

impl Default for StatusCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_defaults_to_ok() {
        let capture = StatusCapture::new();
        assert_eq!(capture.status(), StatusCode::OK);
        assert!(!capture.observed());
    }

    #[test]
    fn test_records_first_status_only() {
        let mut capture = StatusCapture::new();
        let response = capture.observe((StatusCode::FORBIDDEN, "no").into_response());
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        capture.observe(StatusCode::ACCEPTED.into_response());
        assert_eq!(capture.status(), StatusCode::FORBIDDEN);
        assert!(capture.observed());
    }

    #[test]
    fn test_implicit_ok_is_recorded() {
        let mut capture = StatusCapture::new();
        capture.observe("body only".into_response());
        assert_eq!(capture.status(), StatusCode::OK);
    }
}
