//! End-to-end identity verification of a live session.

mod engine;

pub use engine::{VerificationEngine, Verdict};
