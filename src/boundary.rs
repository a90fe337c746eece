//! Render isolation: a faulting component degrades to a fallback view,
//! never an error returned to the host.
//!
//! The boundary wraps one [`Mount`].  While `Healthy` it forwards renders
//! and events; the first fault flips it to `Faulted`, which is sticky for
//! the life of the mount and renders a fixed fallback element carrying the
//! error message and its recovery suggestion.  Recovery is a new
//! synthesis, not a state reset.
//!
//! Only render-lifecycle faults (render passes, queued effects, event
//! handlers) are covered; host-side failures outside the mount are the
//! caller's problem.

use crate::error::SynthesisError;
use crate::lang::interp::Value;
use crate::render::{Mount, Node};

// ─── State ────────────────────────────────────────────────────────────────────

/// Boundary lifecycle: healthy until the first fault, then faulted forever.
#[derive(Clone, Debug)]
pub enum BoundaryState {
    Healthy,
    Faulted(SynthesisError),
}

// ─── Boundary ─────────────────────────────────────────────────────────────────

/// Fault containment around one mounted component instance.
pub struct IsolationBoundary {
    mount: Mount,
    state: BoundaryState,
}

impl IsolationBoundary {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            state: BoundaryState::Healthy,
        }
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self.state, BoundaryState::Faulted(_))
    }

    /// Render the wrapped component, or the fallback once faulted.
    pub fn render(&mut self) -> Node {
        match &self.state {
            BoundaryState::Faulted(err) => fallback_node(err),
            BoundaryState::Healthy => match self.mount.render() {
                Ok(node) => node,
                Err(err) => self.trip(err),
            },
        }
    }

    /// Forward an event to the wrapped component.  An unknown target or a
    /// handler fault trips the boundary; the fallback is returned either
    /// way.
    pub fn dispatch(&mut self, tag: &str, event: &str) -> Node {
        match &self.state {
            BoundaryState::Faulted(err) => fallback_node(err),
            BoundaryState::Healthy => match self.mount.dispatch(tag, event) {
                Ok(node) => node,
                Err(err) => self.trip(err),
            },
        }
    }

    fn trip(&mut self, err: SynthesisError) -> Node {
        log::warn!("boundary faulted: {}", err);
        let node = fallback_node(&err);
        self.state = BoundaryState::Faulted(err);
        node
    }
}

/// The fixed degraded view: an alert element with the failure message and
/// a recovery hint, so the surface is never blank.
fn fallback_node(err: &SynthesisError) -> Node {
    Node::Element {
        tag: "Fallback".to_string(),
        props: vec![("role".to_string(), Value::Str("alert".to_string()))],
        children: vec![
            Node::Text(err.to_string()),
            Node::Text(" ".to_string()),
            Node::Text(err.suggestion().to_string()),
        ],
    }
}
