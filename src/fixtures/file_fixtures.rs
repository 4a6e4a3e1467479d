//! File fixtures

use serde_json::json;

/// Sample upload response for a fine-tuning file
pub fn file_record_response() -> serde_json::Value {
    json!({
        "bytes": 140,
        "created_at": 1715000000,
        "filename": "puppy.jsonl",
        "id": "file-181a1cbdcdcf4677ada87f63a0928099",
        "object": "file",
        "purpose": "fine-tune",
        "status": "pending",
        "status_details": null
    })
}

/// Sample file whose processing failed
pub fn file_record_failed_response() -> serde_json::Value {
    json!({
        "bytes": 52,
        "created_at": 1715000100,
        "filename": "broken.jsonl",
        "id": "file-7c1f0b2e9d8a4c3b",
        "object": "file",
        "purpose": "fine-tune",
        "status": "error",
        "status_details": "Line 1: expected a JSON object with a 'messages' key."
    })
}

/// Upload response missing required fields
pub fn file_record_truncated_response() -> serde_json::Value {
    json!({
        "id": "file-181a1cbdcdcf4677ada87f63a0928099",
        "object": "file"
    })
}
