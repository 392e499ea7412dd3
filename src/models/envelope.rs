use serde_json::Value;

/// Lenient view over the JSON the validate endpoint returns.
///
/// No schema is enforced: every field is optional and a field with an
/// unexpected type reads as absent, except `status`, which is kept raw so a
/// non-numeric value can still be shown to the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateEnvelope {
    pub status: Option<Value>,
    pub data: Option<ValidateData>,
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidateData {
    pub validate: Option<String>,
}

impl ValidateEnvelope {
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self {
                status: None,
                data: None,
                msg: None,
            };
        };

        // An empty or non-object `data` counts as missing
        let data = object
            .get("data")
            .and_then(Value::as_object)
            .filter(|data| !data.is_empty())
            .map(|data| ValidateData {
                validate: data.get("validate").and_then(Value::as_str).map(str::to_string),
            });

        let msg = object.get("msg").map(|msg| match msg {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        });

        Self {
            status: object.get("status").cloned(),
            data,
            msg,
        }
    }

    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    /// `status` is numerically zero
    pub fn is_ok(&self) -> bool {
        matches!(self.status.as_ref().and_then(Value::as_f64), Some(code) if code == 0.0)
    }

    /// Status as shown in the trace
    pub fn status_display(&self) -> String {
        match &self.status {
            Some(Value::String(text)) => format!("\"{}\"", text),
            Some(other) => other.to_string(),
            None => "<missing>".to_string(),
        }
    }

    pub fn validate(&self) -> Option<&str> {
        self.data.as_ref()?.validate.as_deref()
    }

    /// Qualifying success: `status == 0` and a non-empty `data.validate`
    pub fn qualifying_token(&self) -> Option<&str> {
        if !self.is_ok() {
            return None;
        }
        self.validate().filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_successful_envelope() {
        let envelope = ValidateEnvelope::from_value(&json!({
            "status": 0,
            "data": {"validate": "validate_1_abc"},
            "msg": "ok"
        }));
        assert!(envelope.is_ok());
        assert_eq!(envelope.qualifying_token(), Some("validate_1_abc"));
        assert_eq!(envelope.msg.as_deref(), Some("ok"));
    }

    #[test]
    fn tolerates_missing_and_odd_fields() {
        let envelope = ValidateEnvelope::from_value(&json!({"data": {}}));
        assert!(!envelope.has_status());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.status_display(), "<missing>");

        let envelope = ValidateEnvelope::from_value(&json!({"status": "0", "data": "x", "msg": 12}));
        assert!(envelope.has_status());
        assert!(!envelope.is_ok());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.msg.as_deref(), Some("12"));
        assert_eq!(envelope.status_display(), "\"0\"");

        let envelope = ValidateEnvelope::from_value(&json!([1, 2, 3]));
        assert_eq!(envelope, ValidateEnvelope { status: None, data: None, msg: None });
    }

    #[test]
    fn empty_token_is_not_qualifying() {
        let envelope = ValidateEnvelope::from_value(&json!({"status": 0, "data": {"validate": ""}}));
        assert!(envelope.is_ok());
        assert_eq!(envelope.validate(), Some(""));
        assert_eq!(envelope.qualifying_token(), None);

        let envelope = ValidateEnvelope::from_value(&json!({"status": 1, "data": {"validate": "validate_1_a"}}));
        assert_eq!(envelope.qualifying_token(), None);
    }
}
