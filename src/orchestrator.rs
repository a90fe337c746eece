//! Synthesis orchestration: one candidate in, one terminal state out.
//!
//! The flow is fixed and strictly forward: `Normalizing` → `Validating` →
//! (`Failed` | `Compiling` → (`Ready` | `Failed`)).  Repair runs exactly
//! once, before validation; a validation failure goes straight to
//! `Failed` with no second repair attempt.
//!
//! Requests are numbered, and the newest request wins: once a later
//! `synthesize` call starts, earlier runs stop being current and their
//! units must not be surfaced, even if they finished in `Ready`.

use std::rc::Rc;

use crate::compiler::{compile, CompiledUnit};
use crate::error::SynthesisError;
use crate::lang::normalizer::normalize;
use crate::lang::validator::{validate, ValidationResult};
use crate::registry::CapabilityRegistry;
use crate::CandidateSource;

// ─── States ───────────────────────────────────────────────────────────────────

/// Lifecycle of one synthesis request.
#[derive(Clone, Debug)]
pub enum SynthesisState {
    Idle,
    Normalizing,
    Validating,
    Compiling,
    Ready(CompiledUnit),
    Failed(SynthesisError),
}

impl SynthesisState {
    /// Stable name for logs and state assertions.
    pub fn name(&self) -> &'static str {
        match self {
            SynthesisState::Idle => "idle",
            SynthesisState::Normalizing => "normalizing",
            SynthesisState::Validating => "validating",
            SynthesisState::Compiling => "compiling",
            SynthesisState::Ready(_) => "ready",
            SynthesisState::Failed(_) => "failed",
        }
    }
}

// ─── Run record ───────────────────────────────────────────────────────────────

/// Everything one `synthesize` call produced: the request id and the
/// ordered states the request moved through, ending in `Ready` or
/// `Failed`.
#[derive(Debug)]
pub struct SynthesisRun {
    pub id: u64,
    pub transitions: Vec<SynthesisState>,
}

impl SynthesisRun {
    pub fn final_state(&self) -> &SynthesisState {
        self.transitions
            .last()
            .expect("a run always records at least one state")
    }

    /// The compiled unit, when the run ended in `Ready`.
    pub fn unit(&self) -> Option<&CompiledUnit> {
        match self.final_state() {
            SynthesisState::Ready(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SynthesisError> {
        match self.final_state() {
            SynthesisState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

// ─── Orchestrator ─────────────────────────────────────────────────────────────

/// Drives candidates through the pipeline against one shared registry.
pub struct Orchestrator {
    registry: Rc<CapabilityRegistry>,
    generation: u64,
}

impl Orchestrator {
    pub fn new(registry: Rc<CapabilityRegistry>) -> Self {
        Self {
            registry,
            generation: 0,
        }
    }

    /// Run one candidate through normalize → validate → compile and
    /// record every state along the way.  Never panics on bad input; the
    /// run ends in `Ready` or `Failed`.
    pub fn synthesize(&mut self, candidate: CandidateSource) -> SynthesisRun {
        self.generation += 1;
        let id = self.generation;
        let mut transitions = Vec::new();

        let mut enter = |state: SynthesisState, transitions: &mut Vec<SynthesisState>| {
            log::debug!("request {}: {}", id, state.name());
            transitions.push(state);
        };

        enter(SynthesisState::Normalizing, &mut transitions);
        let repaired = normalize(&candidate, &self.registry);

        enter(SynthesisState::Validating, &mut transitions);
        match validate(&repaired, &self.registry) {
            ValidationResult::Valid => {}
            ValidationResult::Invalid(err) => {
                log::warn!("request {} rejected: {}", id, err);
                enter(SynthesisState::Failed(err), &mut transitions);
                return SynthesisRun { id, transitions };
            }
        }

        enter(SynthesisState::Compiling, &mut transitions);
        match compile(&repaired, &self.registry) {
            Ok(unit) => enter(SynthesisState::Ready(unit), &mut transitions),
            Err(err) => {
                log::warn!("request {} failed to compile: {}", id, err);
                enter(SynthesisState::Failed(err), &mut transitions);
            }
        }
        SynthesisRun { id, transitions }
    }

    /// Whether `run` is still the newest request.  A superseded run's
    /// unit must not be mounted as the current surface.
    pub fn is_current(&self, run: &SynthesisRun) -> bool {
        run.id == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::default_registry;
    use crate::error::ErrorKind;

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(Rc::new(default_registry()))
    }

    fn state_names(run: &SynthesisRun) -> Vec<&'static str> {
        run.transitions.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn happy_path_moves_strictly_forward() {
        let mut orch = orchestrator();
        let run = orch.synthesize(CandidateSource::new(
            "const ToolComponent = () => <Label>ok</Label>;",
        ));
        assert_eq!(
            state_names(&run),
            vec!["normalizing", "validating", "compiling", "ready"]
        );
        assert!(run.unit().is_some());
        assert!(orch.is_current(&run));
    }

    #[test]
    fn validation_failure_skips_compilation() {
        let mut orch = orchestrator();
        let run = orch.synthesize(CandidateSource::new("const Other = () => null;"));
        assert_eq!(state_names(&run), vec!["normalizing", "validating", "failed"]);
        assert_eq!(run.error().unwrap().kind, ErrorKind::MissingEntryPoint);
    }

    #[test]
    fn repair_runs_before_validation() {
        // Bare markup would fail validation untouched; the single repair
        // pass wraps it first.
        let mut orch = orchestrator();
        let run = orch.synthesize(CandidateSource::new("<Button>Go</Button>"));
        assert!(run.unit().is_some(), "final: {:?}", run.final_state());
    }

    #[test]
    fn compile_failure_ends_in_failed() {
        let mut orch = orchestrator();
        let run = orch.synthesize(CandidateSource::new("const ToolComponent = 5;"));
        assert_eq!(
            state_names(&run),
            vec!["normalizing", "validating", "compiling", "failed"]
        );
        assert_eq!(run.error().unwrap().kind, ErrorKind::NotInvocable);
    }

    #[test]
    fn newer_request_supersedes_older() {
        let mut orch = orchestrator();
        let first = orch.synthesize(CandidateSource::new(
            "const ToolComponent = () => <Label>v1</Label>;",
        ));
        let second = orch.synthesize(CandidateSource::new(
            "const ToolComponent = () => <Label>v2</Label>;",
        ));
        assert!(!orch.is_current(&first));
        assert!(orch.is_current(&second));
        // The superseded unit still exists but must not be treated as
        // current, even though it compiled fine.
        assert!(first.unit().is_some());
    }

    #[test]
    fn run_ids_are_monotonic() {
        let mut orch = orchestrator();
        let a = orch.synthesize(CandidateSource::new("x"));
        let b = orch.synthesize(CandidateSource::new("y"));
        assert!(b.id > a.id);
    }
}
