//! Error response fixtures

use serde_json::json;

/// Sample 404 returned when deleting an unknown file
pub fn error_404_file_not_found() -> serde_json::Value {
    json!({
        "error": {
            "code": "404",
            "message": "File with id 'file-181a1cbdcdcf4677ada87f63a0928099' not found."
        }
    })
}

/// Sample 401 for a bad account key
pub fn error_401_invalid_key() -> serde_json::Value {
    json!({
        "error": {
            "code": "401",
            "message": "Access denied due to invalid subscription key or wrong API endpoint."
        }
    })
}

/// Sample 400 with nested details and a three level inner error chain
pub fn error_400_invalid_payload() -> serde_json::Value {
    json!({
        "error": {
            "code": "invalidPayload",
            "message": "The file has invalid content.",
            "target": "file",
            "details": [
                {
                    "code": "invalidLine",
                    "message": "Line 1 is not valid JSON.",
                    "target": "line:1",
                    "details": null
                },
                {
                    "code": "invalidLine",
                    "message": "Line 7 is missing 'messages'.",
                    "target": "line:7"
                },
                {
                    "code": "tooFewExamples",
                    "message": "At least 10 examples are required."
                }
            ],
            "innererror": {
                "code": "ValidationError",
                "innererror": {
                    "code": "InvalidFileFormat",
                    "innererror": {
                        "code": "MissingMessagesKey"
                    }
                }
            }
        }
    })
}

/// Sample 400 for an unsupported purpose
pub fn error_400_invalid_purpose() -> serde_json::Value {
    json!({
        "error": {
            "code": "invalidPurpose",
            "message": "The specified purpose 'batch' is not supported.",
            "target": "purpose",
            "details": [],
            "innererror": null
        }
    })
}

/// Sample 400 in the OpenAI shape, with a null code and sparse details
pub fn error_400_sparse() -> serde_json::Value {
    json!({
        "error": {
            "message": "Invalid file format for Fine-Tuning API. Must be .jsonl",
            "type": "invalid_request_error",
            "param": null,
            "code": null,
            "details": [
                {"code": "invalidExtension"},
                {"code": null, "message": null, "target": null}
            ]
        }
    })
}
