//! End-to-end pipeline tests: envelope → normalize → validate → compile →
//! mount, exercised the way a host embedding the crate would.

use std::rc::Rc;

use a11y_synth::capabilities::default_registry;
use a11y_synth::platform::{NullPlatform, RecordingPlatform};
use a11y_synth::{
    candidate_from_json, compile, normalize, validate, CandidateSource, ErrorKind,
    IsolationBoundary, Orchestrator, ValidationResult,
};

const COUNTER: &str = "const ToolComponent = () => { const [n,setN]=useState(0); \
                       return <Button onClick={() => setN(n+1)}>{n}</Button>; };";

#[test]
fn counter_component_full_flow() {
    let reg = default_registry();
    let candidate = CandidateSource::new(COUNTER);

    assert!(validate(&candidate, &reg).is_valid());
    let unit = compile(&candidate, &reg).unwrap();
    let mut mount = unit.mount(Rc::new(NullPlatform));

    assert_eq!(mount.render().unwrap().text_content(), "0");
    assert_eq!(mount.dispatch("Button", "onClick").unwrap().text_content(), "1");
    assert_eq!(mount.dispatch("Button", "onClick").unwrap().text_content(), "2");
}

#[test]
fn import_statement_is_rejected_before_execution() {
    let reg = default_registry();
    let candidate =
        CandidateSource::new("import React from 'react'; const ToolComponent = () => null;");
    match validate(&candidate, &reg) {
        ValidationResult::Invalid(err) => assert_eq!(err.kind, ErrorKind::ForbiddenConstruct),
        ValidationResult::Valid => panic!("expected rejection"),
    }
}

#[test]
fn orchestrator_repairs_fenced_model_output() {
    let mut orch = Orchestrator::new(Rc::new(default_registry()));
    let run = orch.synthesize(CandidateSource::new(
        "```jsx\nimport React from 'react';\nconst ToolComponent = () => <play />;\n```",
    ));
    let unit = run.unit().expect("repaired source should compile");
    let node = unit.mount(Rc::new(NullPlatform)).render().unwrap();
    assert_eq!(node.tag(), Some("Play"));
}

#[test]
fn normalization_is_idempotent_and_validity_preserving() {
    let reg = default_registry();
    let messy = CandidateSource::new("```\n<Stack><pause /></Stack>\n```");

    let once = normalize(&messy, &reg);
    let twice = normalize(&once, &reg);
    assert_eq!(once, twice);
    assert!(validate(&once, &reg).is_valid());
}

#[test]
fn compiler_output_is_deterministic() {
    let reg = default_registry();
    let candidate = CandidateSource::new(
        "const ToolComponent = () => <Card title=\"t\"><Label>{Math.floor(7.9)}</Label></Card>;",
    );
    let a = compile(&candidate, &reg).unwrap();
    let b = compile(&candidate, &reg).unwrap();
    assert_eq!(
        a.mount(Rc::new(NullPlatform)).render().unwrap().to_markup(),
        b.mount(Rc::new(NullPlatform)).render().unwrap().to_markup(),
    );
}

#[test]
fn boundary_contains_render_faults() {
    let reg = default_registry();
    // Valid and compilable, but the body dereferences an unknown name.
    let unit = compile(
        &CandidateSource::new("const ToolComponent = () => <Label>{nope + 1}</Label>;"),
        &reg,
    )
    .unwrap();
    let mut boundary = IsolationBoundary::new(unit.mount(Rc::new(NullPlatform)));

    let node = boundary.render();
    assert_eq!(node.tag(), Some("Fallback"));
    assert!(boundary.is_faulted());
    // Still faulted on subsequent interaction.
    assert_eq!(boundary.dispatch("Button", "onClick").tag(), Some("Fallback"));
}

#[test]
fn conditional_hook_order_faults_into_the_fallback() {
    // The hook order shifts between renders: the timer lands on the slot
    // useState filled with a user list.  That is a contained fault, not a
    // host crash.
    let reg = default_registry();
    let unit = compile(
        &CandidateSource::new(
            "const ToolComponent = () => { \
             if (now() > 0) { const [t] = useTimer(); return <Label>{t}</Label>; } \
             const [items, setItems] = useState([0]); \
             return <Label>{items.length}</Label>; };",
        ),
        &reg,
    )
    .unwrap();
    let platform = Rc::new(RecordingPlatform::new());
    let mut boundary = IsolationBoundary::new(unit.mount(platform.clone()));

    assert_eq!(boundary.render().text_content(), "1");
    platform.advance(1);
    let node = boundary.render();
    assert_eq!(node.tag(), Some("Fallback"));
    assert!(boundary.is_faulted());
}

#[test]
fn effects_and_announcements_reach_the_platform() {
    let reg = default_registry();
    let unit = compile(
        &CandidateSource::new(
            "const ToolComponent = () => { \
             useEffect(() => announce(\"tool ready\"), []); \
             return <Label>ready</Label>; };",
        ),
        &reg,
    )
    .unwrap();
    let platform = Rc::new(RecordingPlatform::new());
    let mut mount = unit.mount(platform.clone());

    mount.render().unwrap();
    mount.render().unwrap();
    // Empty dependency list: the effect ran once, not per render.
    assert_eq!(platform.announcements(), vec!["tool ready".to_string()]);
}

#[test]
fn envelope_feeds_the_pipeline() {
    let raw = format!(
        r#"{{"tool_name": "counter", "features": ["state"], "component_code": {}}}"#,
        serde_json::to_string(COUNTER).unwrap()
    );
    let candidate = candidate_from_json(&raw).unwrap();

    let mut orch = Orchestrator::new(Rc::new(default_registry()));
    let run = orch.synthesize(candidate);
    let unit = run.unit().expect("envelope source should synthesize");
    assert_eq!(
        unit.mount(Rc::new(NullPlatform)).render().unwrap().text_content(),
        "0"
    );
}

#[test]
fn timer_tool_end_to_end() {
    let reg = default_registry();
    let unit = compile(
        &CandidateSource::new(
            "const ToolComponent = () => { \
             const [elapsed, start, stop, reset] = useTimer(); \
             return <Stack><Label>{elapsed}</Label>\
             <Button onClick={start}><Play /></Button>\
             <Button onClick={stop}><Pause /></Button></Stack>; };",
        ),
        &reg,
    )
    .unwrap();
    let platform = Rc::new(RecordingPlatform::new());
    let mut mount = unit.mount(platform.clone());

    assert_eq!(mount.render().unwrap().find("Label").unwrap().text_content(), "0");
    mount.dispatch("Button", "onClick").unwrap();
    platform.advance(2000);
    assert_eq!(mount.render().unwrap().find("Label").unwrap().text_content(), "2000");
}
