use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{AutoVersionError, Result};

/// Runs an external executable and returns its captured standard output.
///
/// The command line is a single pre-joined string; values containing spaces
/// must be double-quoted by the caller (e.g. tag patterns). There is no shell
/// involved; the string is split into discrete arguments and handed to the
/// process directly.
///
/// Blocks until the process exits. The child handle is released on every
/// path, including errors.
///
/// # Arguments
/// * `executable` - Path or name of the program to launch
/// * `command_line` - Pre-joined arguments, quote-aware
/// * `working_dir` - Directory the process runs in
///
/// # Returns
/// * `Ok(String)` - Captured stdout on exit code 0
/// * `Err(ProcessLaunch)` - The executable could not be started
/// * `Err(ProcessExit)` - Non-zero exit; carries captured stderr and the code
pub fn run(executable: &str, command_line: &str, working_dir: &Path) -> Result<String> {
    let args = split_command_line(command_line);

    let output = Command::new(executable)
        .args(&args)
        .current_dir(working_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| AutoVersionError::ProcessLaunch {
            executable: executable.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(AutoVersionError::ProcessExit {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code().unwrap_or(-1),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Splits a pre-joined command line into arguments.
///
/// Whitespace separates arguments; double quotes group a span (quotes
/// stripped) so glob patterns like `"v[0-9]*"` survive as one argument.
fn split_command_line(command_line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in command_line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        args.push(current);
    }

    args
}
