//! Shader compilation and linking.
//!
//! Stages are compiled from WGSL text with the naga front end and validator,
//! so compile and link diagnostics are available before anything reaches the
//! GPU. A stage or program that fails is reported as an error carrying its
//! diagnostic log; the caller decides whether a missing program is fatal.
//!
//! Handles are owned values: `link` consumes the stages it is given, and a
//! failed or abandoned handle is released when dropped.

mod diagnostic;
mod error;
mod program;
mod stage;

pub use diagnostic::DiagnosticLog;
pub use error::{CompileError, LinkError};
pub use program::{
    COLOR_OUTPUT, LinkedProgram, LinkedStage, POSITION_ATTRIBUTE, ProgramSource, link, load_program,
};
pub use stage::{CompiledStage, StageKind, compile};
