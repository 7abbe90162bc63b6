use std::borrow::Cow;
use std::collections::BTreeMap;

use naga::{Binding, BuiltIn, Handle, Interpolation, Module, Sampling, Scalar, Type, TypeInner};

use super::diagnostic::DiagnosticLog;
use super::error::LinkError;
use super::stage::{CompiledStage, StageKind, compile};

/// Vertex attribute location the position array is bound to.
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Color output location written to the single render target.
pub const COLOR_OUTPUT: u32 = 0;

/// Source text for both stages of a program.
#[derive(Debug, Clone)]
pub struct ProgramSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ProgramSource {
    pub fn new(
        vertex: impl Into<Cow<'static, str>>,
        fragment: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Pass-through vertex stage and a screen-space color ramp.
    pub fn triangle() -> Self {
        Self::new(
            include_str!("shaders/triangle.vert.wgsl"),
            include_str!("shaders/triangle.frag.wgsl"),
        )
    }
}

/// One stage of a linked program: its source and resolved entry point.
#[derive(Debug)]
pub struct LinkedStage {
    pub source: String,
    pub entry_point: String,
}

/// A linked vertex + fragment pair whose interfaces agree.
///
/// Owned and not `Clone`. The per-stage handles it was linked from no longer
/// exist once this value does.
#[derive(Debug)]
pub struct LinkedProgram {
    vertex: LinkedStage,
    fragment: LinkedStage,
}

impl LinkedProgram {
    pub fn vertex(&self) -> &LinkedStage {
        &self.vertex
    }

    pub fn fragment(&self) -> &LinkedStage {
        &self.fragment
    }
}

/// Links a vertex and a fragment stage into a program.
///
/// Either argument may be a null handle (`None`), e.g. after a failed
/// `compile`. In that case both handles are released and linkage is not
/// attempted. On an interface mismatch the program log is written at error
/// level and both stages are released. On success both stage handles are
/// consumed.
pub fn link(
    vertex: Option<CompiledStage>,
    fragment: Option<CompiledStage>,
) -> Result<LinkedProgram, LinkError> {
    let (vertex, fragment) = match (vertex, fragment) {
        (Some(v), Some(f))
            if v.kind() == StageKind::Vertex && f.kind() == StageKind::Fragment =>
        {
            (v, f)
        }
        (v, f) => {
            let err = LinkError::MissingStage {
                vertex: !v.as_ref().is_some_and(|s| s.kind() == StageKind::Vertex),
                fragment: !f.as_ref().is_some_and(|s| s.kind() == StageKind::Fragment),
            };
            log::warn!("{err}");
            return Err(err);
        }
    };

    let problems = check_interface(&vertex, &fragment);
    if !problems.is_empty() {
        let log = DiagnosticLog::from_lines(problems);
        log.emit("program log");
        return Err(LinkError::Interface(log));
    }

    let (vs_source, vs_entry) = vertex.into_parts();
    let (fs_source, fs_entry) = fragment.into_parts();
    log::debug!("linked program ({vs_entry} -> {fs_entry})");

    Ok(LinkedProgram {
        vertex: LinkedStage {
            source: vs_source,
            entry_point: vs_entry,
        },
        fragment: LinkedStage {
            source: fs_source,
            entry_point: fs_entry,
        },
    })
}

/// Compiles both stages of `source` and links them.
///
/// Returns `None` (a null program) if either stage fails to compile or the
/// link fails; diagnostics have already been logged by then.
pub fn load_program(source: &ProgramSource) -> Option<LinkedProgram> {
    let vertex = compile(&source.vertex, StageKind::Vertex).ok();
    let fragment = compile(&source.fragment, StageKind::Fragment).ok();
    link(vertex, fragment).ok()
}

// ── interface matching ──────────────────────────────────────────────

/// A user-located value crossing a stage boundary.
#[derive(Debug, Clone, PartialEq)]
struct Varying {
    ty: TypeInner,
    interpolation: Option<Interpolation>,
    sampling: Option<Sampling>,
}

impl Varying {
    /// The position attribute is fed from `f32` components; the stage may
    /// declare fewer or more of them.
    fn accepts_position_attribute(&self) -> bool {
        match self.ty {
            TypeInner::Scalar(scalar) | TypeInner::Vector { scalar, .. } => scalar == Scalar::F32,
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
struct StageIo {
    locations: BTreeMap<u32, Varying>,
    position: bool,
}

impl StageIo {
    fn collect(&mut self, module: &Module, ty: Handle<Type>, binding: Option<&Binding>) {
        match binding {
            Some(Binding::Location {
                location,
                interpolation,
                sampling,
                ..
            }) => {
                let varying = Varying {
                    ty: module.types[ty].inner.clone(),
                    interpolation: *interpolation,
                    sampling: *sampling,
                };
                self.locations.insert(*location, varying);
            }
            Some(Binding::BuiltIn(BuiltIn::Position { .. })) => self.position = true,
            Some(Binding::BuiltIn(_)) => {}
            None => {
                if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                    for m in members {
                        self.collect(module, m.ty, m.binding.as_ref());
                    }
                }
            }
        }
    }

    fn inputs(stage: &CompiledStage) -> Self {
        let mut io = Self::default();
        if let Some(ep) = stage.entry() {
            for arg in &ep.function.arguments {
                io.collect(stage.module(), arg.ty, arg.binding.as_ref());
            }
        }
        io
    }

    fn outputs(stage: &CompiledStage) -> Self {
        let mut io = Self::default();
        if let Some(result) = stage.entry().and_then(|ep| ep.function.result.as_ref()) {
            io.collect(stage.module(), result.ty, result.binding.as_ref());
        }
        io
    }
}

fn check_interface(vertex: &CompiledStage, fragment: &CompiledStage) -> Vec<String> {
    let mut problems = Vec::new();

    let vs_in = StageIo::inputs(vertex);
    let vs_out = StageIo::outputs(vertex);
    let fs_in = StageIo::inputs(fragment);
    let fs_out = StageIo::outputs(fragment);

    for (location, input) in &vs_in.locations {
        if *location != POSITION_ATTRIBUTE {
            problems.push(format!(
                "vertex input at location {location} has no attribute bound \
                 (only location {POSITION_ATTRIBUTE} is supplied)"
            ));
        } else if !input.accepts_position_attribute() {
            problems.push(format!(
                "vertex input at location {location} reads {:?}, \
                 but the attribute supplies f32 components",
                input.ty
            ));
        }
    }

    if !vs_out.position {
        problems.push("vertex stage does not write @builtin(position)".to_owned());
    }

    for (location, fs_var) in &fs_in.locations {
        match vs_out.locations.get(location) {
            None => problems.push(format!(
                "fragment input at location {location} is not written by the vertex stage"
            )),
            Some(vs_var) if vs_var.ty != fs_var.ty => problems.push(format!(
                "type mismatch at location {location}: vertex writes {:?}, fragment reads {:?}",
                vs_var.ty, fs_var.ty
            )),
            Some(vs_var)
                if (vs_var.interpolation, vs_var.sampling)
                    != (fs_var.interpolation, fs_var.sampling) =>
            {
                problems.push(format!(
                    "interpolation mismatch at location {location}: \
                     vertex writes {:?}/{:?}, fragment reads {:?}/{:?}",
                    vs_var.interpolation, vs_var.sampling, fs_var.interpolation, fs_var.sampling
                ))
            }
            Some(_) => {}
        }
    }

    if !fs_out.locations.contains_key(&COLOR_OUTPUT) {
        problems.push(format!("fragment stage does not write @location({COLOR_OUTPUT})"));
    }

    problems
}
