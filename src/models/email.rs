use serde::Deserialize;
use serde::de::{Error as _, Unexpected};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of `POST /email/validate`. A missing `email` reads as empty and is
/// rejected by the handler.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailRequest {
    #[serde(default)]
    #[schema(example = "user@example.com")]
    pub email: String,
}

impl EmailRequest {
    /// Decodes a request body. Anything but a JSON object is rejected, even
    /// though serde would otherwise accept a one-element array for the struct.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        if value.is_object() {
            return serde_json::from_value(value);
        }
        let unexpected = match &value {
            Value::Object(_) => Unexpected::Map,
            Value::Null => Unexpected::Unit,
            Value::Bool(b) => Unexpected::Bool(*b),
            Value::Number(_) => Unexpected::Other("number"),
            Value::String(s) => Unexpected::Str(s),
            Value::Array(_) => Unexpected::Seq,
        };
        Err(serde_json::Error::invalid_type(unexpected, &"a JSON object"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn test_valid_email_deserialization() {
        let json = r#"{"email": "user@example.com"}"#;
        let email_request: EmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(email_request.email, "user@example.com");
    }

    #[test]
    fn test_missing_email_field_reads_as_empty() {
        let json = r#"{}"#;
        let email_request: EmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(email_request.email, "");
    }

    #[test]
    fn test_invalid_email_type() {
        let json = r#"{"email": 123}"#;
        let result: Result<EmailRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_email_with_whitespace_is_kept() {
        let json = r#"{"email": "  user@example.com  "}"#;
        let email_request: EmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(email_request.email, "  user@example.com  ");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let json = r#"{"email": "user@example.com", "extra": "ignored"}"#;
        let email_request: EmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(email_request.email, "user@example.com");
    }

    #[test]
    fn test_malformed_json() {
        let json = r#"{"email": "user@example.com""#;
        let result: Result<EmailRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_array_instead_of_object() {
        let result = EmailRequest::from_json(br#"["user@example.com"]"#);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "invalid type: sequence, expected a JSON object");
    }

    #[test]
    fn test_scalars_instead_of_object() {
        let bodies: [&[u8]; 4] = [b"null", b"true", b"42", br#""user@example.com""#];
        for body in bodies {
            assert!(EmailRequest::from_json(body).is_err(), "{:?}", std::str::from_utf8(body));
        }
    }

    #[test]
    fn test_from_json_object() {
        let request = EmailRequest::from_json(br#"{"email": "user@example.com"}"#).unwrap();
        assert_eq!(request.email, "user@example.com");

        let request = EmailRequest::from_json(b"{}").unwrap();
        assert_eq!(request.email, "");
    }

    #[test]
    fn test_from_json_wrong_field_type() {
        assert!(EmailRequest::from_json(br#"{"email": 123}"#).is_err());
        assert!(EmailRequest::from_json(br#"{"email": "a@b""#).is_err());
    }
}
