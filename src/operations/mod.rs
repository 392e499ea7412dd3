// Operations module - the three diagnostic checks

pub mod single_call;
pub mod sampler;
pub mod token_format;

pub use single_call::*;
pub use sampler::*;
pub use token_format::*;

/// Section separator used between checks
pub const RULE_WIDTH: usize = 60;

pub fn rule(ch: char) -> String {
    std::iter::repeat_n(ch, RULE_WIDTH).collect()
}
