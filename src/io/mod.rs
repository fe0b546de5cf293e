//! I/O adapters around the resolution core.

pub mod diagnostics;
pub mod input;
pub mod output;

pub use diagnostics::DiagnosticSink;
