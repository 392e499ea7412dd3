// Models module - response envelope and call classification

pub mod envelope;
pub mod outcome;

pub use envelope::*;
pub use outcome::*;
