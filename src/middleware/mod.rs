pub mod identity;
pub mod tracing;
