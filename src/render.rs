//! Host rendering model: the node tree a compiled component produces and
//! the mount that owns one instance's hook state.
//!
//! A renderable unit here is a zero-argument callable returning markup.
//! [`Mount`] invokes it, re-invoking while state setters mark the pass
//! dirty (bounded), runs queued effects, and supports simulated event
//! dispatch against the last rendered tree.  Anything a real host (DOM,
//! TUI, test harness) needs is derivable from the [`Node`] tree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{ErrorKind, SynthResult, SynthesisError};
use crate::lang::interp::{push_value_as_nodes, Interp, RuntimeCtx, Value};
use crate::platform::Platform;

/// Render passes per `render()` call before declaring a runaway loop.
const MAX_RENDER_PASSES: usize = 50;

// ─── Node tree ────────────────────────────────────────────────────────────────

/// One rendered subtree.
#[derive(Clone, Debug)]
pub enum Node {
    Element {
        tag: String,
        props: Vec<(String, Value)>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element { children, .. } => {
                children.iter().map(|c| c.text_content()).collect()
            }
        }
    }

    /// Depth-first search for the first element with the given tag,
    /// including this node itself.
    pub fn find(&self, tag: &str) -> Option<&Node> {
        match self {
            Node::Element { tag: t, children, .. } => {
                if t == tag {
                    return Some(self);
                }
                children.iter().find_map(|c| c.find(tag))
            }
            Node::Text(_) => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            Node::Text(_) => None,
        }
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        match self {
            Node::Element { props, .. } => {
                props.iter().find(|(n, _)| n == name).map(|(_, v)| v)
            }
            Node::Text(_) => None,
        }
    }

    /// Short description used by debug output.
    pub fn summary(&self) -> String {
        match self {
            Node::Element { tag, children, .. } => format!("<{}> ({} children)", tag, children.len()),
            Node::Text(t) => format!("text {:?}", t),
        }
    }

    /// Deterministic serialized form, used by hosts that diff output and
    /// by tests asserting structural equivalence.
    pub fn to_markup(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element { tag, props, children } => {
                let mut out = String::new();
                out.push('<');
                out.push_str(tag);
                for (name, value) in props {
                    match value {
                        Value::Str(s) => out.push_str(&format!(" {}=\"{}\"", name, s)),
                        Value::Num(n) => {
                            out.push_str(&format!(" {}={{{}}}", name, crate::lang::interp::fmt_num(*n)))
                        }
                        Value::Bool(true) => out.push_str(&format!(" {}", name)),
                        Value::Bool(false) => {}
                        other => out.push_str(&format!(" {}={{{:?}}}", name, other)),
                    }
                }
                if children.is_empty() {
                    out.push_str(" />");
                } else {
                    out.push('>');
                    for c in children {
                        out.push_str(&c.to_markup());
                    }
                    out.push_str(&format!("</{}>", tag));
                }
                out
            }
        }
    }
}

// ─── Mount ────────────────────────────────────────────────────────────────────

/// One mounted instance of a compiled component: owns its hook slots and
/// the injected platform.  A fresh mount starts with empty state.
pub struct Mount {
    root: Value,
    hooks: Rc<RefCell<Vec<Value>>>,
    dirty: Rc<Cell<bool>>,
    platform: Rc<dyn Platform>,
    last: Option<Node>,
}

impl Mount {
    /// `root` must be callable (a closure or native function).
    pub fn new(root: Value, platform: Rc<dyn Platform>) -> Self {
        Self {
            root,
            hooks: Rc::new(RefCell::new(Vec::new())),
            dirty: Rc::new(Cell::new(false)),
            platform,
            last: None,
        }
    }

    /// Render the component, looping while state setters mark the pass
    /// dirty and running effects queued by `useEffect` after each pass.
    pub fn render(&mut self) -> SynthResult<Node> {
        for _ in 0..MAX_RENDER_PASSES {
            self.dirty.set(false);
            let mut ctx = RuntimeCtx::for_mount(
                self.hooks.clone(),
                self.dirty.clone(),
                self.platform.clone(),
            );

            let root = self.root.clone();
            let output = {
                let mut interp = Interp::new(&mut ctx);
                interp.call(&root, &[])?
            };

            let mut nodes = Vec::new();
            push_value_as_nodes(&output, &mut nodes)?;
            let node = match nodes.len() {
                1 => nodes.remove(0),
                _ => Node::Element {
                    tag: "Fragment".to_string(),
                    props: Vec::new(),
                    children: nodes,
                },
            };

            let effects = std::mem::take(&mut ctx.effects);
            if !effects.is_empty() {
                let mut interp = Interp::new(&mut ctx);
                for effect in &effects {
                    interp.call(effect, &[])?;
                }
            }

            if !self.dirty.get() {
                self.last = Some(node.clone());
                return Ok(node);
            }
        }
        Err(SynthesisError::new(
            ErrorKind::UnknownCompileError,
            format!("component did not settle after {} render passes", MAX_RENDER_PASSES),
        ))
    }

    /// Simulate an event: find the first element with the given tag in the
    /// last rendered tree, invoke its handler prop, then re-render.
    pub fn dispatch(&mut self, tag: &str, event: &str) -> SynthResult<Node> {
        let handler = self
            .last
            .as_ref()
            .and_then(|n| n.find(tag))
            .and_then(|n| n.prop(event))
            .cloned()
            .ok_or_else(|| {
                SynthesisError::new(
                    ErrorKind::TypeError,
                    format!("no '{}' handler on a <{}> element", event, tag),
                )
            })?;

        let mut ctx = RuntimeCtx::for_mount(
            self.hooks.clone(),
            self.dirty.clone(),
            self.platform.clone(),
        );
        {
            let mut interp = Interp::new(&mut ctx);
            interp.call(&handler, &[])?;
        }
        self.render()
    }

    /// The most recently rendered tree, if any.
    pub fn last_rendered(&self) -> Option<&Node> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_concatenates_descendants() {
        let n = Node::Element {
            tag: "Card".into(),
            props: vec![],
            children: vec![
                Node::Text("a".into()),
                Node::Element {
                    tag: "Label".into(),
                    props: vec![],
                    children: vec![Node::Text("b".into())],
                },
            ],
        };
        assert_eq!(n.text_content(), "ab");
    }

    #[test]
    fn find_is_depth_first() {
        let inner = Node::Element {
            tag: "Button".into(),
            props: vec![("label".into(), Value::Str("hi".into()))],
            children: vec![],
        };
        let root = Node::Element {
            tag: "Stack".into(),
            props: vec![],
            children: vec![inner],
        };
        let found = root.find("Button").unwrap();
        assert!(matches!(found.prop("label"), Some(Value::Str(s)) if s == "hi"));
        assert!(root.find("Slider").is_none());
    }

    #[test]
    fn markup_serialization_is_stable() {
        let n = Node::Element {
            tag: "Button".into(),
            props: vec![("disabled".into(), Value::Bool(true))],
            children: vec![Node::Text("Go".into())],
        };
        assert_eq!(n.to_markup(), "<Button disabled>Go</Button>");
    }
}
