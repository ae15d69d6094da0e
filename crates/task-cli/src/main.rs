mod script;

use std::process::exit;

use task_core::{NavigationController, NavigatorConfig, Task, TaskDocument};

use crate::script::{parse_script, run_script};

fn usage() -> ! {
    eprintln!("Uso: task-cli run --task <FILE> --script <FILE> [--no-back] [--events]");
    eprintln!("     task-cli validate --task <FILE>");
    exit(2);
}

fn read_file(tag: &str, path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[task {tag}] no se pudo leer {path}: {e}");
            exit(3);
        }
    }
}

fn load_task(tag: &str, path: &str) -> Task {
    let raw = read_file(tag, path);
    match TaskDocument::from_json_str(&raw).and_then(TaskDocument::into_task) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("[task {tag}] definición inválida: {e}");
            exit(3);
        }
    }
}

fn main() {
    // .env opcional con TASKFLOW_*
    task_core::config::init_dotenv();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let mut task_path: Option<String> = None;
    let mut script_path: Option<String> = None;
    let mut no_back = false;
    let mut print_events = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--task" => { i += 1; if i < args.len() { task_path = Some(args[i].clone()); } }
            "--script" => { i += 1; if i < args.len() { script_path = Some(args[i].clone()); } }
            "--no-back" => no_back = true,
            "--events" => print_events = true,
            other => eprintln!("[task] argumento ignorado: {other}"),
        }
        i += 1;
    }

    match args[1].as_str() {
        "validate" => {
            let Some(path) = task_path else { usage() };
            let task = load_task("validate", &path);
            println!("ok: task={} steps={} hash={}", task.identifier(), task.len(), task.definition_hash());
        }
        "run" => {
            let (Some(task_path), Some(script_path)) = (task_path, script_path) else { usage() };
            let task = load_task("run", &task_path);
            let actions = match parse_script(&read_file("run", &script_path)) {
                Ok(a) => a,
                Err(e) => { eprintln!("[task run] {e}"); exit(3); }
            };
            let mut config = match NavigatorConfig::from_env() {
                Ok(c) => c,
                Err(e) => { eprintln!("[task run] config: {e}"); exit(3); }
            };
            if no_back {
                config = config.with_allow_backward(false);
            }

            let mut ctl = NavigationController::with_config(config);
            match ctl.start(task) {
                Ok(p) => println!("present {}", p.path.join("/")),
                Err(e) => { eprintln!("[task run] start: {e}"); exit(4); }
            }
            let outcome = run_script(&mut ctl, actions);
            if print_events {
                for ev in ctl.events() {
                    match serde_json::to_string(&ev) {
                        Ok(line) => println!("{line}"),
                        Err(e) => eprintln!("[task run] evento no serializable: {e}"),
                    }
                }
            }
            match outcome {
                Ok(out) => {
                    for line in &out.transcript {
                        println!("{line}");
                    }
                    if let Some(tree) = out.result {
                        match serde_json::to_string_pretty(&tree) {
                            Ok(json) => println!("{json}"),
                            Err(e) => { eprintln!("[task run] resultado: {e}"); exit(5); }
                        }
                    }
                }
                Err(e) => { eprintln!("[task run] {e}"); exit(4); }
            }
        }
        _ => usage(),
    }
}
