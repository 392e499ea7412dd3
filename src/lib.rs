// Validate endpoint probe library
// Interactive diagnostics for a slider-captcha "validate" token service

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod operations;
pub mod runner;

// Re-export commonly used types
pub use client::{HeaderProfile, RawResponse, ValidateClient, ValidateTransport};
pub use config::{ProbeConfig, SuccessGate};
pub use console::{Console, OutputLevel};
pub use error::{ConfigError, TransportError};
pub use models::{CallOutcome, ValidateData, ValidateEnvelope};
pub use operations::{
    InspectionVerdict, RepeatedCallSampler, SamplingSummary, SingleCallInspector,
    TokenAnalysis, TokenFormatInspector, TokenFormatReport, TokenShape, analyze_token,
};
pub use runner::{Check, DiagnosticRunner, RunReport};

// Constants
pub const VALIDATE_API_URL: &str = "https://api.daka1.com/api/validate";
pub const TOKEN_PREFIX: &str = "validate_";
