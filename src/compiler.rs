//! Dynamic compilation: one supervised execution of validated source.
//!
//! Compilation parses the candidate and runs its top-level statements
//! exactly once, in a scope containing only the registry's bindings and
//! with a [`NullPlatform`] installed, so module-level code can neither
//! reach the host nor observe anything outside the registry.  The value
//! bound to the entry symbol afterwards becomes the [`CompiledUnit`].
//!
//! Each compile builds its own root binding map from the registry, so
//! compiles never share mutable state and compiling the same source twice
//! yields equivalent units.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ErrorKind, SynthResult, SynthesisError};
use crate::lang::interp::{Env, Interp, RuntimeCtx, Value};
use crate::lang::parser::parse;
use crate::lang::validator::ENTRY_POINT;
use crate::platform::{NullPlatform, Platform};
use crate::registry::CapabilityRegistry;
use crate::render::Mount;
use crate::CandidateSource;

// ─── Compiled unit ────────────────────────────────────────────────────────────

/// A successfully compiled component: the entry callable (a closure, or a
/// registered helper the candidate aliased), ready to mount.
#[derive(Clone)]
pub struct CompiledUnit {
    root: Value,
}

impl CompiledUnit {
    /// Mount a fresh instance with its own hook state, wired to `platform`
    /// for host side effects.
    pub fn mount(&self, platform: Rc<dyn Platform>) -> Mount {
        Mount::new(self.root.clone(), platform)
    }
}

impl std::fmt::Debug for CompiledUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            Value::Closure(c) => write!(f, "CompiledUnit(fn({}))", c.params.join(", ")),
            other => write!(f, "CompiledUnit({:?})", other),
        }
    }
}

// ─── Compilation ──────────────────────────────────────────────────────────────

/// Compile validated candidate source against the registry.
pub fn compile(
    source: &CandidateSource,
    registry: &CapabilityRegistry,
) -> SynthResult<CompiledUnit> {
    let stmts = parse(&source.text)?;
    log::debug!("compile: parsed {} top-level statements", stmts.len());

    // Fresh root scope per compile, bound in registration order.
    let mut bindings: HashMap<String, Value> = HashMap::with_capacity(registry.len());
    for cap in registry.entries() {
        bindings.insert(cap.name.clone(), cap.value.clone());
    }
    let env = Env::from_bindings(bindings);

    // The single top-level execution.  No host platform is reachable here.
    let mut ctx = RuntimeCtx::detached(Rc::new(NullPlatform));
    {
        let mut interp = Interp::new(&mut ctx);
        interp.exec_block(&stmts, &env)?;
    }

    let entry = env.lookup(ENTRY_POINT).ok_or_else(|| {
        SynthesisError::new(
            ErrorKind::ReferenceError,
            format!("'{}' was not bound by the top-level code", ENTRY_POINT),
        )
    })?;

    if matches!(entry, Value::Closure(_) | Value::Native(_)) {
        log::debug!("compile: entry point bound");
        Ok(CompiledUnit { root: entry })
    } else {
        Err(SynthesisError::new(
            ErrorKind::NotInvocable,
            format!(
                "'{}' is a {} value, not a component function",
                ENTRY_POINT,
                entry.type_name()
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::default_registry;
    use crate::platform::NullPlatform;

    fn compile_text(text: &str) -> SynthResult<CompiledUnit> {
        compile(&CandidateSource::new(text), &default_registry())
    }

    #[test]
    fn compiles_and_mounts_a_minimal_component() {
        let unit = compile_text("const ToolComponent = () => <Label>hi</Label>;").unwrap();
        let mut mount = unit.mount(Rc::new(NullPlatform));
        let node = mount.render().unwrap();
        assert_eq!(node.text_content(), "hi");
    }

    #[test]
    fn syntax_errors_surface_with_position() {
        let err = compile_text("const ToolComponent = () => { return 1 +; };").unwrap_err();
        assert_eq!(err.kind, ErrorKind::SyntaxError);
        assert!(err.detail.contains("line"), "detail: {}", err.detail);
    }

    #[test]
    fn unknown_top_level_name_is_reference_error() {
        let err = compile_text("const ToolComponent = mystery;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ReferenceError);
    }

    #[test]
    fn non_function_entry_is_not_invocable() {
        let err = compile_text("const ToolComponent = 42;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotInvocable);
        assert!(err.detail.contains("number"), "detail: {}", err.detail);
    }

    #[test]
    fn top_level_code_cannot_reach_a_live_platform() {
        // announce at module level runs against the null platform; the
        // mount's platform only sees render-time calls.
        let unit = compile_text(
            "announce(\"module level\");\nconst ToolComponent = () => <Label>ok</Label>;",
        )
        .unwrap();
        let platform = Rc::new(crate::platform::RecordingPlatform::new());
        let mut mount = unit.mount(platform.clone());
        mount.render().unwrap();
        assert!(platform.announcements().is_empty());
    }

    #[test]
    fn native_helper_entry_is_invocable() {
        // Aliasing a registered zero-arg-callable helper is a legal, if
        // odd, entry point; it renders nothing but must not be rejected.
        let unit = compile_text("const ToolComponent = announce;").unwrap();
        let platform = Rc::new(crate::platform::RecordingPlatform::new());
        let mut mount = unit.mount(platform.clone());
        mount.render().unwrap();
        assert_eq!(platform.announcements().len(), 1);
    }

    #[test]
    fn repeated_compiles_are_equivalent() {
        let src = "const ToolComponent = () => { const [n] = useState(3); \
                   return <Card><Label>{n * 2}</Label></Card>; };";
        let a = compile_text(src).unwrap();
        let b = compile_text(src).unwrap();
        let out_a = a.mount(Rc::new(NullPlatform)).render().unwrap().to_markup();
        let out_b = b.mount(Rc::new(NullPlatform)).render().unwrap().to_markup();
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn compiles_do_not_share_state() {
        let src = "const ToolComponent = () => { const [n, setN] = useState(0); \
                   return <Button onClick={() => setN(n + 1)}>{n}</Button>; };";
        let unit = compile_text(src).unwrap();
        let mut first = unit.mount(Rc::new(NullPlatform));
        first.render().unwrap();
        let after = first.dispatch("Button", "onClick").unwrap();
        assert_eq!(after.text_content(), "1");

        // A second mount starts from scratch.
        let mut second = unit.mount(Rc::new(NullPlatform));
        assert_eq!(second.render().unwrap().text_content(), "0");
    }
}
