// Token-format inspection - split the token and check the hex digest
use crate::client::{HeaderProfile, ValidateTransport};
use crate::config::ProbeConfig;
use crate::console::Console;
use crate::models::CallOutcome;
use crate::operations::rule;
use crate::{v_error, v_summary};

/// Segment layout of a `prefix_id_hash` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenShape {
    /// Fewer than two segments
    Unexpected,
    Partial {
        prefix: String,
        id: String,
    },
    Full {
        prefix: String,
        id: String,
        hash: String,
        hash_ok: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAnalysis {
    pub token: String,
    /// Length in characters
    pub length: usize,
    pub segments: usize,
    pub shape: TokenShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenFormatReport {
    NoToken { reason: String },
    Analyzed(TokenAnalysis),
}

/// Split `token` on `_` and check the third segment is a hex digest of
/// `hash_length` characters. Segments past the third are ignored.
pub fn analyze_token(token: &str, hash_length: usize) -> TokenAnalysis {
    let parts: Vec<&str> = token.split('_').collect();

    let shape = match parts.as_slice() {
        [prefix, id, hash, ..] => TokenShape::Full {
            prefix: prefix.to_string(),
            id: id.to_string(),
            hash: hash.to_string(),
            hash_ok: is_hex_digest(hash, hash_length),
        },
        [prefix, id] => TokenShape::Partial {
            prefix: prefix.to_string(),
            id: id.to_string(),
        },
        _ => TokenShape::Unexpected,
    };

    TokenAnalysis {
        token: token.to_string(),
        length: token.chars().count(),
        segments: parts.len(),
        shape,
    }
}

fn is_hex_digest(segment: &str, expected_length: usize) -> bool {
    segment.chars().count() == expected_length && segment.chars().all(|c| c.is_ascii_hexdigit())
}

pub struct TokenFormatInspector<'a> {
    transport: &'a dyn ValidateTransport,
    config: &'a ProbeConfig,
    console: &'a Console,
}

impl<'a> TokenFormatInspector<'a> {
    pub fn new(transport: &'a dyn ValidateTransport, config: &'a ProbeConfig, console: &'a Console) -> Self {
        Self { transport, config, console }
    }

    pub async fn run(&self) -> TokenFormatReport {
        let console = self.console;

        v_summary!(console, "\n{}", rule('='));
        v_summary!(console, "=== Token format inspection ===");

        let result = self.transport.fetch(HeaderProfile::Reduced).await;
        let outcome = CallOutcome::classify(result, self.config.target.success_gate);

        let Some(token) = outcome.qualifying_token() else {
            let reason = outcome.failure_reason();
            v_error!(console, "❌ No valid validate value obtained ({})", reason);
            return TokenFormatReport::NoToken { reason };
        };

        let analysis = analyze_token(token, self.config.token.hash_length);
        self.report(&analysis);
        TokenFormatReport::Analyzed(analysis)
    }

    fn report(&self, analysis: &TokenAnalysis) {
        let console = self.console;

        v_summary!(console, "Full validate value: {}", analysis.token);
        v_summary!(console, "Length: {}", analysis.length);

        match &analysis.shape {
            TokenShape::Unexpected => {
                v_summary!(console, "⚠️ validate format not as expected");
            }
            TokenShape::Partial { prefix, id } => {
                v_summary!(console, "Prefix: {}", prefix);
                v_summary!(console, "ID: {}", id);
            }
            TokenShape::Full { prefix, id, hash, hash_ok } => {
                v_summary!(console, "Prefix: {}", prefix);
                v_summary!(console, "ID: {}", id);
                v_summary!(console, "Hash: {}", hash);
                v_summary!(console, "Hash length: {}", hash.chars().count());
                if *hash_ok {
                    v_summary!(console, "✅ Hash format correct ({}-char hexadecimal)",
                        self.config.token.hash_length);
                } else {
                    v_summary!(console, "⚠️ Hash format may be incorrect");
                }
            }
        }
    }
}
