//! Runtime synthesis and sandboxing of generated UI components.
//!
//! Takes untrusted, model-generated component source text through a fixed
//! pipeline: normalize (best-effort textual repair), validate (static
//! structural checks), compile (a single supervised execution binding only
//! registered capabilities), and mount behind an isolation boundary that
//! turns any later render fault into a fallback view instead of a crash.
//!
//! The host configures a [`registry::CapabilityRegistry`] once at startup;
//! everything a synthesized component can name comes from it.  Host side
//! effects (announcements, speech, clock, storage) go through the
//! [`platform::Platform`] trait injected at mount time.

pub mod boundary;
pub mod capabilities;
pub mod compiler;
pub mod envelope;
pub mod error;
pub mod lang;
pub mod orchestrator;
pub mod platform;
pub mod registry;
pub mod render;

// ─── Re-exports ───────────────────────────────────────────────────────────────

pub use boundary::{BoundaryState, IsolationBoundary};
pub use compiler::{compile, CompiledUnit};
pub use envelope::{candidate_from_json, GenerationEnvelope};
pub use error::{ErrorKind, SynthResult, SynthesisError};
pub use lang::normalizer::normalize;
pub use lang::validator::{validate, ValidationResult, ENTRY_POINT};
pub use orchestrator::{Orchestrator, SynthesisState};
pub use registry::{Capability, CapabilityKind, CapabilityRegistry};

// ─── Candidate source ─────────────────────────────────────────────────────────

/// Untrusted component source text, as received from the generation
/// service.  A plain newtype so signatures distinguish candidate text
/// from ordinary strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSource {
    pub text: String,
}

impl CandidateSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
