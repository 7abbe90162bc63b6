use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::diagnostic::DiagnosticLog;
use super::error::CompileError;

/// Pipeline stage a source text is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            StageKind::Vertex => naga::ShaderStage::Vertex,
            StageKind::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A successfully compiled shader stage.
///
/// Owned and not `Clone`: linking consumes it, dropping it releases it.
#[derive(Debug)]
pub struct CompiledStage {
    kind: StageKind,
    source: String,
    entry_point: String,
    module: naga::Module,
}

impl CompiledStage {
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub(crate) fn module(&self) -> &naga::Module {
        &self.module
    }

    /// The entry point function this stage was compiled for.
    pub(crate) fn entry(&self) -> Option<&naga::EntryPoint> {
        let stage = self.kind.naga_stage();
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.stage == stage && ep.name == self.entry_point)
    }

    pub(crate) fn into_parts(self) -> (String, String) {
        (self.source, self.entry_point)
    }
}

/// Compiles WGSL `source` as a single `kind` stage.
///
/// The source must parse, validate, and declare exactly one entry point for
/// `kind`. On failure the diagnostic log is written at error level and the
/// error is returned; callers treat it as terminal for that stage.
pub fn compile(source: &str, kind: StageKind) -> Result<CompiledStage, CompileError> {
    let result = compile_quiet(source, kind);
    match &result {
        Ok(stage) => log::debug!("compiled {kind} stage (entry point `{}`)", stage.entry_point),
        Err(err) => err.log.emit(&format!("{kind} shader log")),
    }
    result
}

fn compile_quiet(source: &str, kind: StageKind) -> Result<CompiledStage, CompileError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| CompileError::new(kind, DiagnosticLog::new(e.emit_to_string(source))))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| CompileError::new(kind, DiagnosticLog::from_error_chain(e.as_inner())))?;

    let stage = kind.naga_stage();
    let mut entries = module.entry_points.iter().filter(|ep| ep.stage == stage);

    let entry_point = match (entries.next(), entries.next()) {
        (Some(ep), None) => ep.name.clone(),
        (None, _) => {
            return Err(CompileError::new(
                kind,
                DiagnosticLog::new(format!("no @{kind} entry point declared")),
            ));
        }
        (Some(_), Some(_)) => {
            return Err(CompileError::new(
                kind,
                DiagnosticLog::new(format!("more than one @{kind} entry point declared")),
            ));
        }
    };

    Ok(CompiledStage {
        kind,
        source: source.to_owned(),
        entry_point,
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = "@vertex fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> { return vec4<f32>(p, 1.0); }";
    const FS: &str = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";

    #[test]
    fn compiles_vertex_stage() {
        let stage = compile(VS, StageKind::Vertex).unwrap();
        assert_eq!(stage.kind(), StageKind::Vertex);
        assert_eq!(stage.entry_point(), "vs_main");
        assert!(stage.entry().is_some());
    }

    #[test]
    fn compiles_fragment_stage() {
        let stage = compile(FS, StageKind::Fragment).unwrap();
        assert_eq!(stage.entry_point(), "fs_main");
    }

    #[test]
    fn syntax_error_returns_log() {
        let err = compile("@vertex fn broken( {", StageKind::Vertex).unwrap_err();
        assert_eq!(err.stage, StageKind::Vertex);
        assert!(!err.log.is_empty());
    }

    #[test]
    fn type_error_fails_validation_or_parse() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1u; }";
        let err = compile(src, StageKind::Fragment).unwrap_err();
        assert!(!err.log.is_empty());
    }

    #[test]
    fn wrong_stage_kind_is_rejected() {
        let err = compile(FS, StageKind::Vertex).unwrap_err();
        assert!(err.log.as_str().contains("@vertex"));
    }

    #[test]
    fn two_entry_points_of_same_kind_are_ambiguous() {
        let src = format!(
            "{FS}\n@fragment fn other() -> @location(0) vec4<f32> {{ return vec4<f32>(0.0); }}"
        );
        let err = compile(&src, StageKind::Fragment).unwrap_err();
        assert!(err.log.as_str().contains("more than one"));
    }

    #[test]
    fn mixed_module_compiles_for_either_stage() {
        let src = format!("{VS}\n{FS}");
        assert_eq!(compile(&src, StageKind::Vertex).unwrap().entry_point(), "vs_main");
        assert_eq!(compile(&src, StageKind::Fragment).unwrap().entry_point(), "fs_main");
    }
}
