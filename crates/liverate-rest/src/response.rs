//! Interpretation of transport outcomes.

use rest_client::{RestError, TransportResponse};
use serde_json::Value;

use crate::error::LiverateError;

/// Turn a transport outcome into the client result.
///
/// Only a 200 response with a JSON body succeeds. Transport failures are passed
/// through unchanged.
pub fn parse_response(
    outcome: Result<TransportResponse, RestError>,
) -> Result<Value, LiverateError> {
    let response = outcome?;

    if response.status != 200 {
        tracing::warn!(
            status = response.status,
            body = %response.body,
            "Liverate request failed"
        );
        return Err(LiverateError::Server {
            status: response.status,
            message: response.body,
        });
    }

    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(body = %response.body, error = %e, "Failed to parse response");
        LiverateError::Server {
            status: response.status,
            message: format!("invalid JSON body: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_with_json() {
        let value = parse_response(Ok(TransportResponse::new(200, r#"{"rating":4.5}"#))).unwrap();
        assert_eq!(value, json!({ "rating": 4.5 }));
    }

    #[test]
    fn test_non_200_is_server_error() {
        let err = parse_response(Ok(TransportResponse::new(404, r#"{"rating":4.5}"#))).unwrap_err();
        match err {
            LiverateError::Server { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, r#"{"rating":4.5}"#);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_other_2xx_is_server_error() {
        let err = parse_response(Ok(TransportResponse::new(201, "{}"))).unwrap_err();
        assert_eq!(err.status(), Some(201));
    }

    #[test]
    fn test_invalid_json_is_server_error() {
        let err = parse_response(Ok(TransportResponse::new(200, "<html>oops</html>"))).unwrap_err();
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().contains("invalid JSON body"));
    }

    #[test]
    fn test_transport_error_passed_through() {
        let err = parse_response(Err(RestError::Connection("dns failure".into()))).unwrap_err();
        match err {
            LiverateError::Transport(inner) => {
                assert_eq!(inner, RestError::Connection("dns failure".into()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
