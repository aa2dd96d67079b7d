use std::collections::BTreeMap;

use crate::app::ports::HttpResponse;
use crate::constants::{ERROR_MESSAGE_KEY, GENERIC_ERROR_MESSAGE};

/// Outcome of a submission that reached the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// 2xx status
    Success(ResponseBody),
    /// Any other status
    Failure(ErrorPayload),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Text(String),
    /// The API answered without an entity
    Empty,
}

/// Generic error returned for non-2xx answers. The API's own error body is
/// not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub status: u16,
    pub message: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }
}

impl ErrorPayload {
    pub fn generic(status: u16) -> Self {
        Self {
            status,
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// `{"error message": "..."}`, pretty-printed
    pub fn to_pretty_json(&self) -> String {
        let mut map = BTreeMap::new();
        map.insert(ERROR_MESSAGE_KEY, self.message.as_str());
        serde_json::to_string_pretty(&map)
            .unwrap_or_else(|_| format!("{{\"{}\": \"{}\"}}", ERROR_MESSAGE_KEY, self.message))
    }
}

/// Map a raw response onto the two terminal states. Takes the response by
/// value so its body is released on every path.
pub fn interpret(response: HttpResponse) -> ApiResponse {
    let HttpResponse { status, body } = response;

    if (200..300).contains(&status) {
        let body = match body {
            Some(text) if !text.is_empty() => ResponseBody::Text(text),
            _ => ResponseBody::Empty,
        };
        return ApiResponse::Success(body);
    }

    ApiResponse::Failure(ErrorPayload::generic(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: Option<&str>) -> HttpResponse {
        HttpResponse {
            status,
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn test_created_with_body_is_success() {
        assert_eq!(
            interpret(response(201, Some("OK"))),
            ApiResponse::Success(ResponseBody::Text("OK".to_string()))
        );
    }

    #[test]
    fn test_missing_or_empty_body_is_marked_empty() {
        assert_eq!(interpret(response(204, None)), ApiResponse::Success(ResponseBody::Empty));
        assert_eq!(interpret(response(200, Some(""))), ApiResponse::Success(ResponseBody::Empty));
    }

    #[test]
    fn test_status_boundaries() {
        assert!(interpret(response(200, Some("a"))).is_success());
        assert!(interpret(response(299, Some("a"))).is_success());
        assert!(!interpret(response(199, Some("a"))).is_success());
        assert!(!interpret(response(300, Some("a"))).is_success());
    }

    #[test]
    fn test_server_error_yields_generic_payload() {
        let result = interpret(response(500, Some(r#"{"error_message":"boom"}"#)));
        match result {
            ApiResponse::Failure(payload) => {
                assert_eq!(payload.status, 500);
                assert_eq!(payload.message, GENERIC_ERROR_MESSAGE);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_pretty_json_payload() {
        let json = ErrorPayload::generic(400).to_pretty_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error message"], GENERIC_ERROR_MESSAGE);
        assert!(json.contains('\n'));
    }
}
