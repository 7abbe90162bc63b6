use std::fmt;

use super::diagnostic::DiagnosticLog;
use super::stage::StageKind;

/// A shader stage failed to compile.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub stage: StageKind,
    pub log: DiagnosticLog,
}

impl CompileError {
    pub(crate) fn new(stage: StageKind, log: DiagnosticLog) -> Self {
        Self { stage, log }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shader failed to compile: {}", self.stage, self.log)
    }
}

impl std::error::Error for CompileError {}

/// A program could not be linked.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkError {
    /// At least one input stage was a null handle; linkage was not attempted.
    MissingStage { vertex: bool, fragment: bool },

    /// The stages were valid on their own but their interfaces do not agree.
    Interface(DiagnosticLog),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::MissingStage { vertex, fragment } => {
                let which = match (vertex, fragment) {
                    (true, true) => "vertex and fragment stages",
                    (true, false) => "vertex stage",
                    (false, true) => "fragment stage",
                    (false, false) => "no stage",
                };
                write!(f, "program not linked: missing {which}")
            }
            LinkError::Interface(log) => write!(f, "program failed to link: {log}"),
        }
    }
}

impl std::error::Error for LinkError {}
