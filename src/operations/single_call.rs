// Single-call inspection - one request, full dump, envelope analysis
use crate::client::{HeaderProfile, ValidateTransport};
use crate::config::ProbeConfig;
use crate::console::Console;
use crate::error::TransportError;
use crate::models::{CallOutcome, ValidateEnvelope};
use crate::operations::rule;
use crate::{v_debug, v_error, v_info, v_summary};

/// What the single-call inspection concluded
#[derive(Debug, Clone, PartialEq)]
pub enum InspectionVerdict {
    Success { token: String, prefix_ok: bool },
    MissingData,
    MissingValidate,
    Rejected { status: String, msg: Option<String> },
    MissingStatus,
    HttpFailure { status: u16 },
    DecodeFailure { error: String },
    TransportFailure(TransportError),
}

impl InspectionVerdict {
    pub fn is_success(&self) -> bool {
        matches!(self, InspectionVerdict::Success { .. })
    }
}

pub struct SingleCallInspector<'a> {
    transport: &'a dyn ValidateTransport,
    config: &'a ProbeConfig,
    console: &'a Console,
}

impl<'a> SingleCallInspector<'a> {
    pub fn new(transport: &'a dyn ValidateTransport, config: &'a ProbeConfig, console: &'a Console) -> Self {
        Self { transport, config, console }
    }

    pub async fn run(&self) -> InspectionVerdict {
        let console = self.console;

        v_summary!(console, "=== Single-call inspection ===");
        v_info!(console, "Endpoint: {}", self.transport.target());
        v_info!(console, "Time: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        v_info!(console, "{}", rule('-'));

        for (name, value) in self.config.headers.full_set() {
            v_debug!(console, "   → {}: {}", name, value);
        }

        v_info!(console, "📡 Calling endpoint...");
        let result = self.transport.fetch(HeaderProfile::Full).await;
        let outcome = CallOutcome::classify(result, self.config.target.success_gate);

        if let Some(response) = outcome.response() {
            v_info!(console, "⏱️  Elapsed: {:.2}s", response.elapsed.as_secs_f64());
            v_info!(console, "HTTP status: {}", response.status);
            let headers: Vec<String> = response
                .headers
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect();
            v_info!(console, "Response headers: {{{}}}", headers.join(", "));
        }

        match outcome {
            CallOutcome::Transport(e) => {
                match &e {
                    TransportError::Timeout => v_error!(console, "❌ Request timed out"),
                    TransportError::Connect(detail) => v_error!(console, "❌ Connection error: {}", detail),
                    TransportError::Request(detail) => v_error!(console, "❌ Request exception: {}", detail),
                }
                InspectionVerdict::TransportFailure(e)
            }
            CallOutcome::HttpStatus { response } => {
                v_error!(console, "❌ HTTP request failed: {}", response.status);
                v_error!(console, "Error response: {}", response.body);
                InspectionVerdict::HttpFailure { status: response.status }
            }
            CallOutcome::Decode { error, response } => {
                v_summary!(console, "✅ HTTP request succeeded");
                v_error!(console, "❌ JSON decode failed: {}", error);
                v_error!(console, "Raw response: {}", response.body);
                InspectionVerdict::DecodeFailure { error }
            }
            CallOutcome::Decoded { value, envelope, .. } => {
                v_summary!(console, "✅ HTTP request succeeded");

                v_info!(console, "\n=== Response body ===");
                match serde_json::to_string_pretty(&value) {
                    Ok(pretty) => v_info!(console, "{}", pretty),
                    Err(_) => v_info!(console, "{}", value.to_string()),
                }

                v_info!(console, "\n=== Response analysis ===");
                self.analyze(&envelope)
            }
        }
    }

    fn analyze(&self, envelope: &ValidateEnvelope) -> InspectionVerdict {
        let console = self.console;

        let verdict = if !envelope.has_status() {
            v_error!(console, "❌ Response is missing the status field");
            InspectionVerdict::MissingStatus
        } else {
            v_info!(console, "Status: {}", envelope.status_display());

            if envelope.is_ok() {
                v_summary!(console, "✅ Validation succeeded");
                self.inspect_token(envelope)
            } else {
                v_error!(console, "❌ Validation failed");
                if let Some(msg) = &envelope.msg {
                    v_error!(console, "Error message: {}", msg);
                }
                InspectionVerdict::Rejected {
                    status: envelope.status_display(),
                    msg: envelope.msg.clone(),
                }
            }
        };

        if let Some(msg) = &envelope.msg {
            v_info!(console, "Message: {}", msg);
        }

        verdict
    }

    fn inspect_token(&self, envelope: &ValidateEnvelope) -> InspectionVerdict {
        let console = self.console;

        let Some(data) = &envelope.data else {
            v_error!(console, "❌ Response is missing data, or data is empty");
            return InspectionVerdict::MissingData;
        };
        let Some(token) = &data.validate else {
            v_error!(console, "❌ Response is missing the validate field");
            return InspectionVerdict::MissingValidate;
        };

        v_summary!(console, "✅ Got validate value: {}", token);

        let prefix_ok = token.starts_with(&self.config.token.expected_prefix);
        if prefix_ok {
            v_summary!(console, "✅ validate format is correct");
        } else {
            v_summary!(console, "⚠️ validate format may be incorrect (expected prefix '{}')",
                self.config.token.expected_prefix);
        }

        InspectionVerdict::Success {
            token: token.clone(),
            prefix_ok,
        }
    }
}
