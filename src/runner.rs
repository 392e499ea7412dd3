// Diagnostic runner - runs the checks one after another in a fixed order
use crate::client::ValidateTransport;
use crate::config::ProbeConfig;
use crate::console::Console;
use crate::operations::*;
use crate::v_summary;

/// The checks a run can include
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Check {
    /// Single-call inspection
    Single,
    /// Repeated-call sampling
    Sampling,
    /// Token-format inspection
    Token,
}

impl Check {
    /// Every check, in execution order
    pub const ALL: [Check; 3] = [Check::Single, Check::Sampling, Check::Token];
}

/// What each check that ran reported
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub single: Option<InspectionVerdict>,
    pub sampling: Option<SamplingSummary>,
    pub token: Option<TokenFormatReport>,
}

pub struct DiagnosticRunner<T: ValidateTransport> {
    pub transport: T,
    config: ProbeConfig,
    console: Console,
}

impl<T: ValidateTransport> DiagnosticRunner<T> {
    pub fn new(transport: T, config: ProbeConfig, console: Console) -> Self {
        Self { transport, config, console }
    }

    pub async fn run_all(&self) -> RunReport {
        self.run(&Check::ALL).await
    }

    /// Run the selected checks. Order is always single, sampling, token
    /// regardless of how `checks` is ordered; failures never stop the run.
    pub async fn run(&self, checks: &[Check]) -> RunReport {
        let console = &self.console;
        let mut report = RunReport::default();

        v_summary!(console, "🔎 Validate endpoint diagnostics");
        v_summary!(console, "{}", rule('='));
        self.config.print_summary(console);

        for check in Check::ALL.into_iter().filter(|check| checks.contains(check)) {
            match check {
                Check::Single => {
                    let inspector = SingleCallInspector::new(&self.transport, &self.config, console);
                    report.single = Some(inspector.run().await);
                }
                Check::Sampling => {
                    let sampler = RepeatedCallSampler::new(&self.transport, &self.config, console);
                    report.sampling = Some(sampler.run().await);
                }
                Check::Token => {
                    let inspector = TokenFormatInspector::new(&self.transport, &self.config, console);
                    report.token = Some(inspector.run().await);
                }
            }
        }

        v_summary!(console, "\n{}", rule('='));
        v_summary!(console, "🎉 Diagnostics complete!");

        report
    }
}
