use taskflow_rust::samples::{consent_survey, consent_survey_from_document, AGREE_SCRIPT_JSON};
use taskflow_rust::task_core::{AnswerValue, NavigationController, Transition};

#[test]
fn declining_consent_ends_the_survey() {
    let mut ctl = NavigationController::new();
    ctl.start(consent_survey().unwrap()).unwrap();
    ctl.go_forward().unwrap();
    ctl.submit_answer("consent", false).unwrap();
    let Transition::Finished(tree) = ctl.go_forward().unwrap() else { panic!("expected early end") };
    assert_eq!(tree.step_identifiers(), vec!["consent"]);
}

#[test]
fn smoker_branch_lives_inside_the_profile_page() {
    for (smoker, expected) in [(true, vec!["age", "smoker", "packs"]), (false, vec!["age", "smoker"])] {
        let mut ctl = NavigationController::new();
        ctl.start(consent_survey_from_document().unwrap()).unwrap();
        ctl.go_forward().unwrap();
        ctl.submit_answer("consent", true).unwrap();
        ctl.go_forward().unwrap();
        ctl.submit_answer("age", 30).unwrap();
        ctl.go_forward().unwrap();
        ctl.submit_answer("smoker", smoker).unwrap();
        let mut next = ctl.go_forward().unwrap();
        if smoker {
            ctl.submit_answer("packs", 1).unwrap();
            next = ctl.go_forward().unwrap();
        }
        assert_eq!(next.presentation().unwrap().step_id(), "mood");
        let page = ctl.answers().unwrap().get("profile").and_then(|r| r.page.as_ref()).unwrap();
        assert_eq!(page.path, expected);
    }
}

#[test]
fn agree_script_is_well_formed() {
    let actions: Vec<serde_json::Value> = serde_json::from_str(AGREE_SCRIPT_JSON).unwrap();
    assert!(actions.iter().any(|a| a.get("jump").is_some()));
    assert_eq!(actions.last(), Some(&serde_json::json!("forward")));
}

#[test]
fn low_mood_reaches_followup() {
    let mut ctl = NavigationController::new();
    ctl.start(consent_survey().unwrap()).unwrap();
    ctl.go_forward().unwrap();
    ctl.submit_answer("consent", true).unwrap();
    ctl.go_forward().unwrap();
    ctl.jump_to("mood").unwrap();
    ctl.submit_answer("mood", 1).unwrap();
    let next = ctl.go_forward().unwrap();
    assert_eq!(next.presentation().unwrap().step_id(), "followup");
    assert_eq!(ctl.answers().unwrap().answer("mood"), Some(&AnswerValue::Integer(1)));
}
