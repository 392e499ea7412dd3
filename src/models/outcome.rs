use serde_json::Value;

use crate::client::RawResponse;
use crate::config::SuccessGate;
use crate::error::TransportError;
use crate::models::ValidateEnvelope;

/// Result of one call, classified by how far it got.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    /// Never got an HTTP response
    Transport(TransportError),
    /// HTTP status rejected by the success gate
    HttpStatus { response: RawResponse },
    /// Status accepted, body is not JSON
    Decode { error: String, response: RawResponse },
    /// Body decoded; semantic checks are up to the caller
    Decoded {
        response: RawResponse,
        value: Value,
        envelope: ValidateEnvelope,
    },
}

impl CallOutcome {
    pub fn classify(result: Result<RawResponse, TransportError>, gate: SuccessGate) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(e) => return CallOutcome::Transport(e),
        };

        if !gate.accepts(response.status) {
            return CallOutcome::HttpStatus { response };
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(value) => {
                let envelope = ValidateEnvelope::from_value(&value);
                CallOutcome::Decoded {
                    response,
                    value,
                    envelope,
                }
            }
            Err(e) => CallOutcome::Decode {
                error: e.to_string(),
                response,
            },
        }
    }

    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            CallOutcome::Transport(_) => None,
            CallOutcome::HttpStatus { response }
            | CallOutcome::Decode { response, .. }
            | CallOutcome::Decoded { response, .. } => Some(response),
        }
    }

    pub fn envelope(&self) -> Option<&ValidateEnvelope> {
        match self {
            CallOutcome::Decoded { envelope, .. } => Some(envelope),
            _ => None,
        }
    }

    /// Token of a qualifying success, if this call was one
    pub fn qualifying_token(&self) -> Option<&str> {
        self.envelope()?.qualifying_token()
    }

    /// One-line reason a call did not qualify
    pub fn failure_reason(&self) -> String {
        match self {
            CallOutcome::Transport(e) => format!("Exception: {}", e),
            CallOutcome::HttpStatus { response } => format!("HTTP error: {}", response.status),
            CallOutcome::Decode { error, .. } => format!("Exception: JSON decode failed: {}", error),
            CallOutcome::Decoded { envelope, .. } => format!(
                "Failed: {}",
                envelope.msg.as_deref().unwrap_or("Unknown error")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
            elapsed: Duration::from_millis(5),
        }
    }

    #[test]
    fn classifies_each_stage() {
        let outcome = CallOutcome::classify(Err(TransportError::Timeout), SuccessGate::Any2xx);
        assert!(matches!(outcome, CallOutcome::Transport(TransportError::Timeout)));
        assert!(outcome.response().is_none());

        let outcome = CallOutcome::classify(Ok(response(503, "busy")), SuccessGate::Any2xx);
        assert!(matches!(outcome, CallOutcome::HttpStatus { .. }));
        assert_eq!(outcome.failure_reason(), "HTTP error: 503");

        let outcome = CallOutcome::classify(Ok(response(200, "<html>")), SuccessGate::Any2xx);
        assert!(matches!(outcome, CallOutcome::Decode { .. }));

        let outcome = CallOutcome::classify(
            Ok(response(200, r#"{"status":0,"data":{"validate":"validate_9_x"}}"#)),
            SuccessGate::Any2xx,
        );
        assert_eq!(outcome.qualifying_token(), Some("validate_9_x"));
    }

    #[test]
    fn gate_decides_non_200_success() {
        let body = r#"{"status":0,"data":{"validate":"validate_9_x"}}"#;

        let outcome = CallOutcome::classify(Ok(response(202, body)), SuccessGate::Any2xx);
        assert_eq!(outcome.qualifying_token(), Some("validate_9_x"));

        let outcome = CallOutcome::classify(Ok(response(202, body)), SuccessGate::OkOnly);
        assert!(matches!(outcome, CallOutcome::HttpStatus { .. }));

        let default_gate = crate::config::ProbeConfig::default().target.success_gate;
        let outcome = CallOutcome::classify(Ok(response(201, body)), default_gate);
        assert!(matches!(outcome, CallOutcome::HttpStatus { .. }));
        assert_eq!(outcome.failure_reason(), "HTTP error: 201");
    }

    #[test]
    fn rejected_call_surfaces_msg() {
        let outcome = CallOutcome::classify(
            Ok(response(200, r#"{"status":1,"msg":"rate limited"}"#)),
            SuccessGate::Any2xx,
        );
        assert_eq!(outcome.qualifying_token(), None);
        assert_eq!(outcome.failure_reason(), "Failed: rate limited");

        let outcome = CallOutcome::classify(Ok(response(200, r#"{"status":1}"#)), SuccessGate::Any2xx);
        assert_eq!(outcome.failure_reason(), "Failed: Unknown error");
    }
}
