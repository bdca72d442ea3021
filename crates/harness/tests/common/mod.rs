/// Bench builders and tracing setup.
pub mod harness;
