//! Output formatting for CLI commands.

mod diagnostic;

pub use diagnostic::TemplateDiagnostic;
pub(crate) use diagnostic::body_byte_offset;
