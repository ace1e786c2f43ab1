//! Command resolution and process replacement.

use crate::environment::Environment;
use crate::error::ExecError;
use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Pick the command line to run.
///
/// Arguments given on the command line replace the configured command.
///
/// # Errors
///
/// [`ExecError::NoCommand`] when both are empty or the program name is empty.
pub fn resolve_command(configured: &[String], cli: &[String]) -> Result<Vec<String>, ExecError> {
    let command = if cli.is_empty() { configured } else { cli };

    match command.first() {
        Some(program) if !program.is_empty() => Ok(command.to_vec()),
        _ => Err(ExecError::NoCommand),
    }
}

fn is_executable(path: &Path) -> bool {
    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

/// Locate `program` the way a shell would.
///
/// Names containing `/` are used as given. Other names are searched in each
/// directory of `path_var`; an empty entry means the current directory.
///
/// # Errors
///
/// [`ExecError::NotFound`] when no executable regular file matches.
pub fn resolve_executable(program: &str, path_var: Option<&OsStr>) -> Result<PathBuf, ExecError> {
    if program.contains('/') {
        let path = PathBuf::from(program);
        return if is_executable(&path) {
            Ok(path)
        } else {
            Err(ExecError::NotFound(program.to_string()))
        };
    }

    path_var
        .into_iter()
        .flat_map(std::env::split_paths)
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(".").join(program)
            } else {
                dir.join(program)
            }
        })
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| ExecError::NotFound(program.to_string()))
}

/// Replace the current process with `executable`.
///
/// `argv[0]` is passed through unchanged, so the new process sees the name
/// the user typed. The environment is exactly `environment`.
///
/// Only returns if `execve` fails.
#[must_use]
pub fn replace_process(executable: &Path, argv: &[String], environment: &Environment) -> ExecError {
    let Some((program, args)) = argv.split_first() else {
        return ExecError::NoCommand;
    };

    let source = Command::new(executable)
        .arg0(program)
        .args(args)
        .env_clear()
        .envs(environment.iter())
        .exec();

    ExecError::Exec {
        program: program.clone(),
        source,
    }
}
