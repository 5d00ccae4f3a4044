//! JSON bodies returned by the contact endpoint.

use serde::{Deserialize, Serialize};

pub const THANK_YOU: &str = "Thank you for your inquiry. We will contact you soon.";

/// Body of a 200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckBody {
    pub success: bool,
    pub message: String,
}

impl AckBody {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: THANK_YOU.to_string(),
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shapes() {
        assert_eq!(
            serde_json::to_value(AckBody::accepted()).unwrap(),
            serde_json::json!({"success": true, "message": THANK_YOU})
        );
        assert_eq!(
            serde_json::to_value(ErrorBody::new("Name is required")).unwrap(),
            serde_json::json!({"error": "Name is required"})
        );
    }
}
