// Validate endpoint probe - Main Entry Point
// Runs single-call, sampling and token-format checks against the validate API

use clap::Parser;
use validate_probe::console::DEFAULT_VERBOSITY;
use validate_probe::{Check, Console, DiagnosticRunner, ProbeConfig, ValidateClient};

#[derive(Parser, Debug)]
#[command(name = "validate_probe", version, about = "Interactive diagnostics for a captcha validate endpoint")]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(long)]
    config: Option<String>,

    /// Override the target URL
    #[arg(long)]
    url: Option<String>,

    /// Run only these checks (repeatable); they still run in the fixed order
    #[arg(long, value_enum)]
    only: Vec<Check>,

    /// Also print request headers and the configuration summary
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print verdicts, failures and totals
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write the effective configuration as TOML and exit
    #[arg(long)]
    write_config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ProbeConfig::load(path)?,
        None => ProbeConfig::default(),
    };
    if let Some(url) = cli.url {
        config.target.url = url;
    }
    config.validate()?;

    if let Some(path) = &cli.write_config {
        config.save(path)?;
        println!("💾 Wrote configuration to {}", path);
        return Ok(());
    }

    let verbosity = if cli.quiet {
        0
    } else {
        DEFAULT_VERBOSITY.saturating_add(cli.verbose)
    };

    let client = ValidateClient::new(&config)?;
    let runner = DiagnosticRunner::new(client, config, Console::stdout(verbosity));

    let checks = if cli.only.is_empty() {
        Check::ALL.to_vec()
    } else {
        cli.only
    };

    // Check failures are reported on stdout; they never change the exit code
    runner.run(&checks).await;

    Ok(())
}
