//! The default capability set: the fixed names synthesized code may
//! reference.
//!
//! The exact list is host configuration rather than protocol, but once
//! fixed it is the contract the validator, normalizer and compiler all
//! agree on.  Platform side effects (speech, clock, storage) go through
//! the `RuntimeCtx`'s injected [`crate::platform::Platform`], so nothing
//! here touches real hardware.

use std::collections::BTreeMap;

use crate::error::{ErrorKind, SynthResult, SynthesisError};
use crate::lang::interp::{
    shallow_list_eq, to_display_string, Interp, NativeValue, RuntimeCtx, Value,
};
use crate::registry::{CapabilityKind, CapabilityRegistry};

/// UI primitive constructors (layout / display / form).
const COMPONENTS: &[&str] = &[
    "Button", "Card", "Stack", "Label", "Input", "Checkbox", "Slider", "Heading", "Timer",
];

/// Icon primitives; these participate in the exact-casing check.
const ICONS: &[&str] = &[
    "Play", "Pause", "Stop", "Volume", "Mic", "Sun", "Moon", "Bell", "Eye",
];

// ─── Registry assembly ────────────────────────────────────────────────────────

/// Build the standard registry.  Called once at host startup.
pub fn default_registry() -> CapabilityRegistry {
    let mut reg = CapabilityRegistry::new();

    for name in COMPONENTS {
        reg.register(name, CapabilityKind::Component, Value::Component((*name).into()));
    }
    for name in ICONS {
        reg.register(name, CapabilityKind::Icon, Value::Component((*name).into()));
    }

    reg.register("useState", CapabilityKind::Hook, Value::Native(use_state()));
    reg.register("useEffect", CapabilityKind::Hook, Value::Native(use_effect()));
    reg.register("useTimer", CapabilityKind::Hook, Value::Native(use_timer()));

    reg.register("announce", CapabilityKind::Helper, Value::Native(announce()));
    reg.register("speak", CapabilityKind::Helper, Value::Native(speak()));

    reg.register("Math", CapabilityKind::Global, math_object());
    reg.register("JSON", CapabilityKind::Global, json_object());
    reg.register("storage", CapabilityKind::Global, storage_object());
    reg.register(
        "now",
        CapabilityKind::Global,
        Value::Native(NativeValue::new("now", |ctx, _| {
            Ok(Value::Num(ctx.platform.now_ms() as f64))
        })),
    );

    reg
}

// ─── State hooks ──────────────────────────────────────────────────────────────

/// `useState(initial)` → `[value, setValue]`.  The setter accepts either a
/// replacement value or an updater function of the previous value, marks
/// the mount dirty, and takes effect on the next render pass.
fn use_state() -> NativeValue {
    NativeValue::new("useState", |ctx, args| {
        let initial = args.first().cloned().unwrap_or(Value::Null);
        let idx = ctx.next_hook_slot(move || initial);
        let current = ctx.hooks.borrow()[idx].clone();

        let hooks = ctx.hooks.clone();
        let setter = NativeValue::new("setState", move |ctx2, set_args| {
            let arg = set_args.first().cloned().unwrap_or(Value::Null);
            let next = match &arg {
                Value::Closure(_) | Value::Native(_) => {
                    let prev = hooks.borrow()[idx].clone();
                    let mut interp = Interp::new(ctx2);
                    interp.call(&arg, &[prev])?
                }
                _ => arg,
            };
            hooks.borrow_mut()[idx] = next;
            ctx2.dirty.set(true);
            Ok(Value::Null)
        });

        Ok(Value::list(vec![current, Value::Native(setter)]))
    })
}

/// `useEffect(f)` or `useEffect(f, deps)`.  The effect is queued and run
/// by the mount after the render pass; with a dependency list it re-runs
/// only when the list changes element-wise.
fn use_effect() -> NativeValue {
    NativeValue::new("useEffect", |ctx, args| {
        let effect = args.first().cloned().ok_or_else(|| {
            SynthesisError::new(ErrorKind::TypeError, "useEffect requires a function argument")
        })?;
        if !matches!(effect, Value::Closure(_) | Value::Native(_)) {
            return Err(SynthesisError::new(
                ErrorKind::TypeError,
                "useEffect requires a function argument",
            ));
        }

        // Slot holds the previous dependency list; null means never ran.
        let idx = ctx.next_hook_slot(|| Value::Null);
        let should_run = match args.get(1) {
            None => true,
            Some(deps) => {
                let prev = ctx.hooks.borrow()[idx].clone();
                matches!(prev, Value::Null) || !shallow_list_eq(&prev, deps)
            }
        };

        if should_run {
            let marker = args.get(1).cloned().unwrap_or(Value::Bool(true));
            ctx.hooks.borrow_mut()[idx] = marker;
            ctx.effects.push(effect);
        }
        Ok(Value::Null)
    })
}

/// `useTimer()` → `[elapsedMs, start, stop, reset]`, an accessible timer
/// driven by the injected platform clock.  Controls mark the mount dirty;
/// the host re-renders to refresh the elapsed reading.
fn use_timer() -> NativeValue {
    NativeValue::new("useTimer", |ctx, _args| {
        let idx = ctx.next_hook_slot(|| {
            Value::list(vec![Value::Bool(false), Value::Num(0.0), Value::Num(0.0)])
        });
        let slot = match ctx.hooks.borrow()[idx].clone() {
            Value::List(items) => items,
            _ => return Err(timer_slot_error()),
        };

        let now = ctx.platform.now_ms() as f64;
        let (running, started, accumulated) =
            timer_fields(&slot.borrow()).ok_or_else(timer_slot_error)?;
        let elapsed = accumulated + if running { now - started } else { 0.0 };

        let start_slot = slot.clone();
        let start = NativeValue::new("startTimer", move |ctx2, _| {
            let mut s = start_slot.borrow_mut();
            let (running, _, _) = timer_fields(&s).ok_or_else(timer_slot_error)?;
            if !running {
                s[0] = Value::Bool(true);
                s[1] = Value::Num(ctx2.platform.now_ms() as f64);
                ctx2.dirty.set(true);
            }
            Ok(Value::Null)
        });

        let stop_slot = slot.clone();
        let stop = NativeValue::new("stopTimer", move |ctx2, _| {
            let mut s = stop_slot.borrow_mut();
            let (running, started, acc) = timer_fields(&s).ok_or_else(timer_slot_error)?;
            if running {
                s[2] = Value::Num(acc + ctx2.platform.now_ms() as f64 - started);
                s[0] = Value::Bool(false);
                ctx2.dirty.set(true);
            }
            Ok(Value::Null)
        });

        let reset_slot = slot;
        let reset = NativeValue::new("resetTimer", move |ctx2, _| {
            let mut s = reset_slot.borrow_mut();
            timer_fields(&s).ok_or_else(timer_slot_error)?;
            s[1] = Value::Num(ctx2.platform.now_ms() as f64);
            s[2] = Value::Num(0.0);
            ctx2.dirty.set(true);
            Ok(Value::Null)
        });

        Ok(Value::list(vec![
            Value::Num(elapsed),
            Value::Native(start),
            Value::Native(stop),
            Value::Native(reset),
        ]))
    })
}

/// Read the `[running, startedMs, accumulatedMs]` fields of a timer slot.
/// Returns `None` when the slot does not hold timer state, which happens
/// when conditional hook calls shift a component's hook order between
/// renders.
fn timer_fields(s: &[Value]) -> Option<(bool, f64, f64)> {
    match (s.first(), s.get(1), s.get(2)) {
        (Some(running), Some(Value::Num(started)), Some(Value::Num(acc))) => {
            Some((running.truthy(), *started, *acc))
        }
        _ => None,
    }
}

fn timer_slot_error() -> SynthesisError {
    SynthesisError::new(ErrorKind::TypeError, "useTimer hook slot was overwritten")
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn announce() -> NativeValue {
    NativeValue::new("announce", |ctx, args| {
        let msg = args.first().map(to_display_string).unwrap_or_default();
        ctx.platform.announce(&msg);
        Ok(Value::Null)
    })
}

fn speak() -> NativeValue {
    NativeValue::new("speak", |ctx, args| {
        let msg = args.first().map(to_display_string).unwrap_or_default();
        ctx.platform.speak(&msg);
        Ok(Value::Null)
    })
}

// ─── Globals ──────────────────────────────────────────────────────────────────

fn num_arg(args: &[Value], i: usize, fname: &str) -> SynthResult<f64> {
    match args.get(i) {
        Some(Value::Num(n)) => Ok(*n),
        other => Err(SynthesisError::new(
            ErrorKind::TypeError,
            format!(
                "{} expects a number argument, got {}",
                fname,
                other.map(|v| v.type_name()).unwrap_or("nothing")
            ),
        )),
    }
}

fn math_fn(name: &'static str, f: fn(f64) -> f64) -> Value {
    Value::Native(NativeValue::new(name, move |_ctx, args| {
        Ok(Value::Num(f(num_arg(args, 0, name)?)))
    }))
}

fn math_fn2(name: &'static str, f: fn(f64, f64) -> f64) -> Value {
    Value::Native(NativeValue::new(name, move |_ctx, args| {
        Ok(Value::Num(f(num_arg(args, 0, name)?, num_arg(args, 1, name)?)))
    }))
}

fn math_object() -> Value {
    let mut m: BTreeMap<String, Value> = BTreeMap::new();
    m.insert("PI".into(), Value::Num(std::f64::consts::PI));
    m.insert("E".into(), Value::Num(std::f64::consts::E));
    m.insert("abs".into(), math_fn("Math.abs", f64::abs));
    m.insert("floor".into(), math_fn("Math.floor", f64::floor));
    m.insert("ceil".into(), math_fn("Math.ceil", f64::ceil));
    m.insert("round".into(), math_fn("Math.round", f64::round));
    m.insert("sqrt".into(), math_fn("Math.sqrt", f64::sqrt));
    m.insert("min".into(), math_fn2("Math.min", f64::min));
    m.insert("max".into(), math_fn2("Math.max", f64::max));
    m.insert("pow".into(), math_fn2("Math.pow", f64::powf));
    Value::object(m)
}

fn json_object() -> Value {
    let mut m: BTreeMap<String, Value> = BTreeMap::new();
    m.insert(
        "stringify".into(),
        Value::Native(NativeValue::new("JSON.stringify", |_ctx, args| {
            let v = args.first().cloned().unwrap_or(Value::Null);
            let json = value_to_json(&v);
            serde_json::to_string(&json).map(Value::Str).map_err(|e| {
                SynthesisError::new(ErrorKind::TypeError, format!("JSON.stringify: {}", e))
            })
        })),
    );
    m.insert(
        "parse".into(),
        Value::Native(NativeValue::new("JSON.parse", |_ctx, args| {
            let text = match args.first() {
                Some(Value::Str(s)) => s.clone(),
                other => {
                    return Err(SynthesisError::new(
                        ErrorKind::TypeError,
                        format!(
                            "JSON.parse expects a string, got {}",
                            other.map(|v| v.type_name()).unwrap_or("nothing")
                        ),
                    ))
                }
            };
            let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
                SynthesisError::new(ErrorKind::SyntaxError, format!("JSON.parse: {}", e))
            })?;
            Ok(json_to_value(&json))
        })),
    );
    Value::object(m)
}

fn storage_object() -> Value {
    let mut m: BTreeMap<String, Value> = BTreeMap::new();
    m.insert(
        "get".into(),
        Value::Native(NativeValue::new("storage.get", |ctx, args| {
            let key = args.first().map(to_display_string).unwrap_or_default();
            Ok(match ctx.platform.storage_get(&key) {
                Some(v) => Value::Str(v),
                None => Value::Null,
            })
        })),
    );
    m.insert(
        "set".into(),
        Value::Native(NativeValue::new("storage.set", |ctx, args| {
            let key = args.first().map(to_display_string).unwrap_or_default();
            let value = args.get(1).map(to_display_string).unwrap_or_default();
            ctx.platform.storage_set(&key, &value);
            Ok(Value::Null)
        })),
    );
    Value::object(m)
}

// ─── JSON conversions ─────────────────────────────────────────────────────────

fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null | Value::Closure(_) | Value::Native(_) | Value::Component(_) => {
            serde_json::Value::Null
        }
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Num(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => {
            serde_json::Value::Array(items.borrow().iter().map(value_to_json).collect())
        }
        Value::Object(members) => serde_json::Value::Object(
            members
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::Node(n) => serde_json::Value::String(n.to_markup()),
    }
}

fn json_to_value(j: &serde_json::Value) -> Value {
    match j {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Num(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::list(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect(),
        ),
    }
}
