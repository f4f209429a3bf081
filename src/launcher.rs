//! Startup shim: pick the first available interpreter and hand the process to it.

use crate::config::LauncherConfig;
use crate::errors::{AppError, Result};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Resolved handoff target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Command name as probed, e.g. `python3`.
    pub interpreter: String,
    /// Where it was found on the search path.
    pub program: PathBuf,
    pub main_file: PathBuf,
}

pub struct Launcher {
    config: LauncherConfig,
}

impl Launcher {
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    /// Probe the candidates in order against `search_paths` (a `PATH`-style list).
    pub fn resolve(&self, search_paths: &OsStr) -> Result<LaunchPlan> {
        for name in &self.config.candidates {
            match find_in_path(search_paths, name) {
                Some(program) => {
                    debug!(interpreter = name.as_str(), path = %program.display(), "[LAUNCH] interpreter found");
                    return Ok(LaunchPlan {
                        interpreter: name.clone(),
                        program,
                        main_file: self.config.main_file.clone(),
                    });
                }
                None => debug!(interpreter = name.as_str(), "[LAUNCH] not on PATH"),
            }
        }
        Err(AppError::InterpreterNotFound {
            candidates: self.config.candidates.clone(),
        })
    }

    pub fn startup_message(&self, plan: &LaunchPlan) -> String {
        format!(
            "🚀 Starting {} with {} {}...",
            self.config.app_name,
            plan.interpreter,
            plan.main_file.display()
        )
    }

    pub fn failure_message(&self, err: &AppError) -> String {
        format!("❌ Cannot start {}: {}", self.config.app_name, err)
    }
}

/// Replace the current process with `<interpreter> <main_file>`.
///
/// Only returns when the handoff itself failed.
#[cfg(unix)]
pub fn hand_off(plan: &LaunchPlan) -> Result<i32> {
    use std::os::unix::process::CommandExt;

    std::io::stdout().flush()?;
    let err = Command::new(&plan.program)
        .arg0(&plan.interpreter)
        .arg(&plan.main_file)
        .exec();
    Err(err.into())
}

/// Run `<interpreter> <main_file>` to completion and return its exit code.
#[cfg(not(unix))]
pub fn hand_off(plan: &LaunchPlan) -> Result<i32> {
    std::io::stdout().flush()?;
    let status = Command::new(&plan.program).arg(&plan.main_file).status()?;
    Ok(status.code().unwrap_or(1))
}

/// First directory in `search_paths` holding an executable `name`.
pub fn find_in_path(search_paths: &OsStr, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let suffix = std::env::consts::EXE_SUFFIX;
    for dir in std::env::split_paths(search_paths) {
        // an empty entry means the current directory, which a launcher must not trust
        if dir.as_os_str().is_empty() {
            continue;
        }
        let plain = dir.join(name);
        if is_executable(&plain) {
            return Some(plain);
        }
        if !suffix.is_empty() {
            let with_suffix = dir.join(format!("{name}{suffix}"));
            if is_executable(&with_suffix) {
                return Some(with_suffix);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;

    fn touch(dir: &Path, name: &str, executable: bool) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").expect("write fake interpreter");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = if executable { 0o755 } else { 0o644 };
            fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod");
        }
        #[cfg(not(unix))]
        let _ = executable;
        path
    }

    fn search(dirs: &[&Path]) -> OsString {
        std::env::join_paths(dirs).expect("join paths")
    }

    fn launcher() -> Launcher {
        Launcher::new(LauncherConfig::default())
    }

    #[test]
    fn primary_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let python3 = touch(dir.path(), "python3", true);
        touch(dir.path(), "python", true);

        let plan = launcher().resolve(&search(&[dir.path()])).unwrap();
        assert_eq!(plan.interpreter, "python3");
        assert_eq!(plan.program, python3);
        assert_eq!(plan.main_file, PathBuf::from("app.py"));
    }

    #[test]
    fn falls_back_to_secondary() {
        let dir = tempfile::tempdir().unwrap();
        let python = touch(dir.path(), "python", true);

        let plan = launcher().resolve(&search(&[dir.path()])).unwrap();
        assert_eq!(plan.interpreter, "python");
        assert_eq!(plan.program, python);
    }

    #[test]
    fn neither_present_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = launcher().resolve(&search(&[dir.path()])).unwrap_err();
        match &err {
            AppError::InterpreterNotFound { candidates } => {
                assert_eq!(candidates, &vec!["python3".to_string(), "python".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(launcher().failure_message(&err).contains("python3, python"));
    }

    #[test]
    fn earlier_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        touch(second.path(), "python3", true);
        let expected = touch(first.path(), "python3", true);

        let found = find_in_path(&search(&[first.path(), second.path()]), "python3");
        assert_eq!(found, Some(expected));
    }

    #[test]
    #[cfg(unix)]
    fn non_executable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "python3", false);
        let python = touch(dir.path(), "python", true);

        let plan = launcher().resolve(&search(&[dir.path()])).unwrap();
        assert_eq!(plan.program, python);
    }

    #[test]
    fn directory_with_candidate_name_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("python3")).unwrap();
        assert_eq!(find_in_path(&search(&[dir.path()]), "python3"), None);
    }

    #[test]
    fn empty_inputs_find_nothing() {
        assert_eq!(find_in_path(OsStr::new(""), "python3"), None);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_in_path(&search(&[dir.path()]), ""), None);
    }

    #[test]
    fn startup_message_names_interpreter() {
        let plan = LaunchPlan {
            interpreter: "python3".into(),
            program: PathBuf::from("/usr/bin/python3"),
            main_file: PathBuf::from("app.py"),
        };
        assert_eq!(
            launcher().startup_message(&plan),
            "🚀 Starting FinGalaxy with python3 app.py..."
        );
    }
}
