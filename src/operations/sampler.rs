// Repeated-call sampling - N sequential calls, success rate
use tokio::time::sleep;

use crate::client::{HeaderProfile, ValidateTransport};
use crate::config::ProbeConfig;
use crate::console::Console;
use crate::models::CallOutcome;
use crate::operations::rule;
use crate::{v_error, v_info, v_summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingSummary {
    pub attempts: u32,
    pub successes: u32,
}

impl SamplingSummary {
    /// Percentage of qualifying calls, 0.0 when nothing was attempted
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        f64::from(self.successes) / f64::from(self.attempts) * 100.0
    }

    pub fn rate_display(&self) -> String {
        format!("{:.1}%", self.success_rate())
    }
}

pub struct RepeatedCallSampler<'a> {
    transport: &'a dyn ValidateTransport,
    config: &'a ProbeConfig,
    console: &'a Console,
}

impl<'a> RepeatedCallSampler<'a> {
    pub fn new(transport: &'a dyn ValidateTransport, config: &'a ProbeConfig, console: &'a Console) -> Self {
        Self { transport, config, console }
    }

    pub async fn run(&self) -> SamplingSummary {
        let console = self.console;
        let attempts = self.config.sampling.attempts;
        let delay = self.config.sampling_delay();
        let mut successes = 0;

        v_summary!(console, "\n{}", rule('='));
        v_summary!(console, "=== Repeated-call sampling ===");

        for attempt in 1..=attempts {
            v_info!(console, "\n--- Call {} of {} ---", attempt, attempts);

            let result = self.transport.fetch(HeaderProfile::Reduced).await;
            let outcome = CallOutcome::classify(result, self.config.target.success_gate);

            match outcome.qualifying_token() {
                Some(token) => {
                    successes += 1;
                    let elapsed = outcome
                        .response()
                        .map(|response| response.elapsed.as_secs_f64())
                        .unwrap_or_default();
                    v_summary!(console, "✅ Success (elapsed: {:.2}s)", elapsed);
                    v_info!(console, "Validate: {}...", self.preview(token));
                }
                None => v_error!(console, "❌ {}", outcome.failure_reason()),
            }

            // No pause after the final call
            if attempt < attempts {
                sleep(delay).await;
            }
        }

        let summary = SamplingSummary { attempts, successes };

        v_summary!(console, "\n=== Sampling summary ===");
        v_summary!(console, "Total calls: {}", summary.attempts);
        v_summary!(console, "Successful calls: {}", summary.successes);
        v_summary!(console, "Success rate: {}", summary.rate_display());

        summary
    }

    fn preview(&self, token: &str) -> String {
        token.chars().take(self.config.sampling.preview_chars).collect()
    }
}
