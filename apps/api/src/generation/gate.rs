//! Validation gate between the raw request body and the builder.
//!
//! Rejections here happen before any document work starts and always map to
//! `AppError::InputInvalid` (HTTP 400).

use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::models::resume::{CvRecord, REQUIRED_FIELDS};

/// True for `application/json` and any `+json` structured-syntax type.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(raw) = content_type else {
        return false;
    };
    let essence = raw.split(';').next().unwrap_or_default().trim();
    let essence = essence.to_ascii_lowercase();
    essence == "application/json" || (essence.contains('/') && essence.ends_with("+json"))
}

/// Checks the declared content type, then parses and validates the body.
pub fn admit_request(content_type: Option<&str>, body: &[u8]) -> Result<CvRecord, AppError> {
    if !is_json_content_type(content_type) {
        warn!("Rejected request with content type {content_type:?}");
        return Err(AppError::InputInvalid("Invalid JSON data".to_string()));
    }
    admit_body(body)
}

/// Parses a request body and returns a validated record.
pub fn admit_body(body: &[u8]) -> Result<CvRecord, AppError> {
    let payload: Value = serde_json::from_slice(body).map_err(|e| {
        warn!("Request body is not valid JSON: {e}");
        AppError::InputInvalid("Invalid JSON data".to_string())
    })?;
    admit(payload)
}

/// Validates an already-parsed payload.
pub fn admit(payload: Value) -> Result<CvRecord, AppError> {
    let payload = unwrap_text_envelope(payload)?;

    let Value::Object(fields) = &payload else {
        warn!("Invalid JSON data structure: expected object or list with text field");
        return Err(AppError::InputInvalid(
            "Invalid JSON data structure".to_string(),
        ));
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !fields.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        warn!("Missing required fields in JSON data: {missing:?}");
        return Err(AppError::InputInvalid(format!(
            "Missing required fields in JSON data: {}",
            missing.join(", ")
        )));
    }

    serde_json::from_value(payload).map_err(|e| {
        warn!("Payload has an unexpected shape: {e}");
        AppError::InputInvalid(format!("Invalid JSON data structure: {e}"))
    })
}

/// Some clients wrap the document as `[{"text": "<json string>"}]`.
/// That envelope is opened and its text parsed as the real payload.
fn unwrap_text_envelope(payload: Value) -> Result<Value, AppError> {
    let text = match &payload {
        Value::Array(items) if items.len() == 1 => match items[0].get("text") {
            Some(text) => text,
            None => return Ok(payload),
        },
        _ => return Ok(payload),
    };

    let invalid = || AppError::InputInvalid("Invalid JSON text in request".to_string());
    let Value::String(text) = text else {
        warn!("Envelope 'text' field is not a string");
        return Err(invalid());
    };
    serde_json::from_str(text).map_err(|e| {
        warn!("Failed to parse JSON text: {e}");
        invalid()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "personalInformation": {"name": "Ada Lovelace"},
            "contactDetails": {},
            "overview": {},
            "workExperience": [],
            "education": [],
            "skills": []
        })
    }

    fn reason(err: AppError) -> String {
        match err {
            AppError::InputInvalid(msg) => msg,
            other => panic!("expected InputInvalid, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_record_is_admitted() {
        let record = admit(minimal()).unwrap();
        assert_eq!(record.personal_information.name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_each_missing_required_field_is_rejected() {
        for field in REQUIRED_FIELDS {
            let mut payload = minimal();
            payload.as_object_mut().unwrap().remove(*field);
            let msg = reason(admit(payload).unwrap_err());
            assert!(msg.contains(field), "message {msg:?} should name {field}");
        }
    }

    #[test]
    fn test_non_object_payloads_are_rejected() {
        for payload in [json!([1, 2]), json!("text"), json!(7), json!([])] {
            let msg = reason(admit(payload).unwrap_err());
            assert_eq!(msg, "Invalid JSON data structure");
        }
    }

    #[test]
    fn test_text_envelope_is_unwrapped() {
        let wrapped = json!([{"text": minimal().to_string()}]);
        let record = admit(wrapped).unwrap();
        assert_eq!(record.personal_information.name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_bad_envelope_text_is_rejected() {
        let msg = reason(admit(json!([{"text": "{not json"}])).unwrap_err());
        assert_eq!(msg, "Invalid JSON text in request");
        let msg = reason(admit(json!([{"text": 12}])).unwrap_err());
        assert_eq!(msg, "Invalid JSON text in request");
    }

    #[test]
    fn test_body_that_is_not_json_is_rejected() {
        let msg = reason(admit_body(b"<xml/>").unwrap_err());
        assert_eq!(msg, "Invalid JSON data");
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type(Some("application/json")));
        assert!(is_json_content_type(Some("Application/JSON; charset=utf-8")));
        assert!(is_json_content_type(Some("application/vnd.cv+json")));
        assert!(!is_json_content_type(Some("text/plain")));
        assert!(!is_json_content_type(Some("+json")));
        assert!(!is_json_content_type(None));
    }

    #[test]
    fn test_wrong_content_type_is_rejected_before_parsing() {
        let body = minimal().to_string();
        let msg = reason(admit_request(Some("text/plain"), body.as_bytes()).unwrap_err());
        assert_eq!(msg, "Invalid JSON data");
        assert!(admit_request(Some("application/json"), body.as_bytes()).is_ok());
    }

    #[test]
    fn test_shape_error_is_input_invalid() {
        let mut payload = minimal();
        payload["education"] = json!("yesterday");
        let msg = reason(admit(payload).unwrap_err());
        assert!(msg.starts_with("Invalid JSON data structure:"), "{msg}");
    }
}
