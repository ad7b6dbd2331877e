//! rbc-util - shared infrastructure for the Rainbow pipeline.
//!
//! Two concerns live here because every stage needs them:
//!
//! - [`Span`]: (line, column) source positions, 1-based.
//! - [`Handler`]: append-only diagnostic collection. Stages never abort on
//!   the first problem; they record diagnostics and produce a best-effort
//!   artifact, and the driver decides what downstream stages may consume.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, Handler, Level, Stage};
pub use span::Span;
