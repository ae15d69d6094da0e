use task_core::event::{presented_steps, replay_state};
use task_core::step::AnswerPredicate;
use task_core::{EventStore, InMemoryEventStore, NavigationController, NavigationEvent, NavigationEventKind,
                NavigatorConfig, Step, Task, Transition};
use uuid::Uuid;

fn survey() -> Task {
    Task::builder("survey").step(Step::instruction("intro"))
                           .step(Step::question("scale").with_predicate(AnswerPredicate::equals("intro", "agree")))
                           .step(Step::question("end"))
                           .build()
                           .unwrap()
}

#[test]
fn finished_session_log_replays_to_controller_state() {
    let mut ctl = NavigationController::new();
    let task = survey();
    let hash = task.definition_hash().to_string();
    ctl.start(task).unwrap();
    ctl.submit_answer("intro", "agree").unwrap();
    ctl.go_forward().unwrap();
    ctl.submit_answer("scale", 4).unwrap();
    ctl.go_forward().unwrap();
    ctl.go_backward().unwrap();
    ctl.go_forward().unwrap();
    ctl.submit_answer("end", true).unwrap();
    let Transition::Finished(tree) = ctl.go_forward().unwrap() else { panic!("expected completion") };

    let events = ctl.events();
    assert!(events.iter().enumerate().all(|(i, e)| e.seq == i as u64));
    assert!(events.iter().all(|e| Some(e.session_id) == ctl.session_id()));
    assert!(matches!(events[0].kind,
                     NavigationEventKind::TaskStarted { ref definition_hash, step_count: 3, .. } if *definition_hash == hash));
    assert_eq!(presented_steps(&events), vec!["intro", "scale", "end", "scale", "end"]);
    match &events.last().unwrap().kind {
        NavigationEventKind::TaskFinished { result_fingerprint, result_count } => {
            assert_eq!(*result_fingerprint, tree.fingerprint().unwrap());
            assert_eq!(*result_count, 3);
        }
        other => panic!("unexpected last event {other:?}"),
    }
    assert_eq!(&replay_state(&events), ctl.state().unwrap());

    let store = ctl.event_store();
    let id = ctl.session_id().unwrap();
    assert!(store.is_closed(id));
    assert_eq!(store.presented(id), presented_steps(&events));
    let answers = store.list_where(id, |k| matches!(k, NavigationEventKind::AnswerSubmitted { .. }));
    assert_eq!(answers.len(), 3);
}

#[test]
fn cancelled_session_replays_to_cancelled_state() {
    let mut ctl = NavigationController::new();
    ctl.start(survey()).unwrap();
    ctl.submit_answer("intro", "decline").unwrap();
    ctl.go_forward().unwrap();
    ctl.cancel().unwrap();

    let events = ctl.events();
    assert!(matches!(events.last().unwrap().kind, NavigationEventKind::TaskCancelled { answered: 1 }));
    let replayed = replay_state(&events);
    assert!(replayed.is_cancelled());
    assert_eq!(&replayed, ctl.state().unwrap());
}

#[test]
fn rejected_operations_do_not_append_events() {
    let mut ctl = NavigationController::new();
    ctl.start(survey()).unwrap();
    let before = ctl.events().len();
    assert!(ctl.submit_answer("end", 1).is_err());
    assert!(ctl.go_forward().is_err());
    assert!(ctl.go_backward().is_err());
    assert_eq!(ctl.events().len(), before);
}

#[test]
fn recording_can_be_disabled() {
    let mut ctl = NavigationController::with_config(NavigatorConfig::default().with_record_events(false));
    ctl.start(survey()).unwrap();
    ctl.submit_answer("intro", "agree").unwrap();
    ctl.go_forward().unwrap();
    assert!(ctl.events().is_empty());
    assert_eq!(ctl.event_store().sessions(), 0);
}

#[test]
fn sessions_are_kept_apart_in_the_store() {
    let mut ctl = NavigationController::new();
    ctl.start(survey()).unwrap();
    let first = ctl.session_id().unwrap();
    ctl.cancel().unwrap();
    ctl.start(survey()).unwrap();
    assert_eq!(ctl.event_store().sessions(), 2);
    assert_eq!(ctl.event_store().list(first).len(), 3);
    assert_eq!(ctl.events().len(), 2);
}

/// Store que sólo cuenta eventos, para comprobar que el controlador es
/// genérico sobre el backend.
#[derive(Default)]
struct CountingStore {
    appended: usize,
}

impl EventStore for CountingStore {
    fn append_kind(&mut self, session_id: Uuid, kind: NavigationEventKind) -> NavigationEvent {
        self.appended += 1;
        NavigationEvent { seq: self.appended as u64 - 1,
                          session_id,
                          kind,
                          ts: chrono::Utc::now() }
    }

    fn list(&self, _session_id: Uuid) -> Vec<NavigationEvent> {
        Vec::new()
    }
}

#[test]
fn controller_accepts_custom_store() {
    let mut ctl = NavigationController::new_with_store(CountingStore::default(), NavigatorConfig::default());
    ctl.start(survey()).unwrap();
    ctl.submit_answer("intro", "agree").unwrap();
    assert_eq!(ctl.event_store().appended, 3);

    let mut mem = InMemoryEventStore::default();
    let ev = mem.append_kind(Uuid::new_v4(), NavigationEventKind::TaskCancelled { answered: 0 });
    assert_eq!(ev.seq, 0);
}
