use serde_json::json;
use task_core::errors::TaskDefinitionError;
use task_core::{AnswerValue, NavigationController, NavigationEvent, ResultTree, TaskDocument, Transition};

const CONSENT_DOC: &str = r#"{
    "identifier": "consent-survey",
    "steps": [
        {"identifier": "intro", "kind": "instruction", "optional": true},
        {"identifier": "consent", "kind": "consent",
         "rule": {"type": "predicate",
                  "branches": [{"when": {"op": "equals", "step": "consent", "value": {"type": "bool", "value": false}},
                                "destination": {"kind": "end_task"}}]}},
        {"identifier": "mood", "kind": "question"},
        {"identifier": "detail",
         "reachable_if": {"op": "in_range", "step": "mood", "min": null, "max": 3.0}},
        {"identifier": "thanks", "kind": "completion", "optional": true}
    ]
}"#;

fn run(answers: &[(&str, AnswerValue)]) -> ResultTree {
    let task = TaskDocument::from_json_str(CONSENT_DOC).unwrap().into_task().unwrap();
    let mut ctl = NavigationController::new();
    let mut current = ctl.start(task).unwrap().step_id().to_string();
    loop {
        if let Some((_, value)) = answers.iter().find(|(id, _)| *id == current) {
            ctl.submit_answer(&current, value.clone()).unwrap();
        }
        match ctl.go_forward().unwrap() {
            Transition::Present(p) => current = p.step_id().to_string(),
            Transition::Finished(tree) => return tree,
        }
    }
}

#[test]
fn declined_consent_ends_the_task() {
    let tree = run(&[("consent", false.into())]);
    assert_eq!(tree.step_identifiers(), vec!["consent"]);
}

#[test]
fn low_mood_reaches_the_detail_step() {
    let tree = run(&[("consent", true.into()), ("mood", 2.into()), ("detail", "tired".into())]);
    assert_eq!(tree.step_identifiers(), vec!["consent", "mood", "detail"]);

    let tree = run(&[("consent", true.into()), ("mood", 5.into())]);
    assert_eq!(tree.step_identifiers(), vec!["consent", "mood"]);
}

#[test]
fn result_tree_survives_json() {
    let tree = run(&[("consent", true.into()), ("mood", 1.5.into()), ("detail", "meh".into())]);
    let value = tree.to_json().unwrap();
    assert_eq!(value["children"][1]["answer"], json!({"type": "decimal", "value": 1.5}));

    let back: ResultTree = serde_json::from_value(value).unwrap();
    assert_eq!(back, tree);
    assert_eq!(back.fingerprint().unwrap(), tree.fingerprint().unwrap());
}

#[test]
fn events_serialize_as_json_lines() {
    let task = TaskDocument::from_json_str(CONSENT_DOC).unwrap().into_task().unwrap();
    let mut ctl = NavigationController::new();
    ctl.start(task).unwrap();
    for ev in ctl.events() {
        let line = serde_json::to_string(&ev).unwrap();
        let parsed: NavigationEvent = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, ev);
    }
}

#[test]
fn mismatched_answer_type_fails_navigation() {
    let doc = json!({
        "identifier": "t",
        "steps": [
            {"identifier": "a"},
            {"identifier": "b", "reachable_if": {"op": "choice_contains", "step": "a", "value": {"type": "text", "value": "x"}}}
        ]
    });
    let task = TaskDocument::from_json_str(&doc.to_string()).unwrap().into_task().unwrap();
    let mut ctl = NavigationController::new();
    ctl.start(task).unwrap();
    ctl.submit_answer("a", "not a list").unwrap();
    assert!(ctl.go_forward().is_err());
}

#[test]
fn duplicate_steps_are_rejected() {
    let doc = r#"{"identifier": "t", "steps": [{"identifier": "a"}, {"identifier": "a"}]}"#;
    let err = TaskDocument::from_json_str(doc).unwrap().into_task().unwrap_err();
    assert_eq!(err, TaskDefinitionError::DuplicateStep("a".into()));
}
