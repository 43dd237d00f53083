//! Invocation response shape.

use serde::{Deserialize, Serialize};

/// The fixed-shape status object returned to the invoking scheduler:
/// 200 + message on success, 500 + message on failure. Serialized with the
/// `statusCode` casing the invocation boundary expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl FunctionResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_lambda_casing() {
        let response = FunctionResponse::ok("Files moved and deleted successfully.");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["body"], "Files moved and deleted successfully.");
    }

    #[test]
    fn error_is_500() {
        let response = FunctionResponse::error("Error: boom");
        assert_eq!(response.status_code, 500);
        assert!(!response.is_success());
    }
}
