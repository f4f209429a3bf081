use fingalaxy::{
    config::LauncherConfig,
    launcher::{self, Launcher},
    utils,
};
use std::process::ExitCode;

/// Status when no interpreter is available.
const NOT_FOUND_EXIT: u8 = 1;
/// Status when the interpreter was found but could not be started.
const HANDOFF_FAILED_EXIT: u8 = 126;

fn main() -> ExitCode {
    utils::init_stderr_logging();

    let launcher = Launcher::new(LauncherConfig::default());
    let search_paths = std::env::var_os("PATH").unwrap_or_default();

    let plan = match launcher.resolve(&search_paths) {
        Ok(plan) => plan,
        Err(e) => {
            println!("{}", launcher.failure_message(&e));
            return ExitCode::from(NOT_FOUND_EXIT);
        }
    };

    println!("{}", launcher.startup_message(&plan));
    match launcher::hand_off(&plan) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(NOT_FOUND_EXIT)),
        Err(e) => {
            println!("{}", launcher.failure_message(&e));
            ExitCode::from(HANDOFF_FAILED_EXIT)
        }
    }
}
