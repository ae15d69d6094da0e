use std::rc::Rc;

use taskflow_rust::console::ConsoleListener;
use taskflow_rust::samples::consent_survey;
use taskflow_rust::task_core::{NavigationController, NavigationError, NavigatorConfig, Transition};

/// Recorre la encuesta de ejemplo: avance, retroceso dentro y fuera de la
/// página, salto explícito y finalización.
fn run_demo() -> Result<(), NavigationError> {
    let task = consent_survey().map_err(|e| NavigationError::Internal(e.to_string()))?;
    let config = NavigatorConfig::from_env().map_err(|e| NavigationError::Internal(e.to_string()))?;
    let mut ctl = NavigationController::with_config(config);
    let console = Rc::new(ConsoleListener::default());
    let _sub = ctl.subscribe(console.clone());

    ctl.start(task)?;
    ctl.go_forward()?;
    ctl.submit_answer("consent", true)?;
    ctl.go_forward()?;
    ctl.submit_answer("age", 41)?;
    ctl.go_forward()?;
    ctl.submit_answer("smoker", true)?;
    ctl.go_forward()?;
    ctl.go_backward()?;
    ctl.submit_answer("smoker", false)?;
    ctl.go_forward()?;
    ctl.submit_answer("mood", 2)?;

    // una respuesta fuera de turno se rechaza sin efectos
    if let Err(e) = ctl.submit_answer("done", true) {
        println!("rechazado: {e}");
    }
    if let Some(progress) = ctl.progress() {
        println!("progreso: {}/{}", progress.current + 1, progress.total);
    }

    ctl.go_forward()?;
    ctl.submit_answer("followup", "duerme poco")?;
    ctl.go_forward()?;
    let tree = match ctl.go_forward()? {
        Transition::Finished(tree) => tree,
        Transition::Present(p) => return Err(NavigationError::Internal(format!("paso inesperado: {}", p.step_id()))),
    };

    match tree.to_json().and_then(|v| serde_json::to_string_pretty(&v)) {
        Ok(json) => println!("{json}"),
        Err(e) => return Err(NavigationError::Internal(e.to_string())),
    }
    println!("presentaciones: {} eventos: {}", console.presented(), ctl.events().len());
    Ok(())
}

fn main() {
    taskflow_rust::task_core::config::init_dotenv();
    if let Err(e) = run_demo() {
        eprintln!("[main-core] {e}");
        std::process::exit(1);
    }
}
