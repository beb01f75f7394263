//! Blocking process invocation with incremental log persistence.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ExecError;

/// Result of one external tool invocation.
#[derive(Debug)]
pub struct RunOutcome {
    /// Exit code of the process; signal deaths map to -1.
    pub exit_code: i32,
    /// Everything the process wrote to stdout and stderr, in order.
    pub output: String,
    /// Log file the output was streamed into.
    pub log_path: PathBuf,
}

impl RunOutcome {
    /// Whether the process exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `program` with `args`, streaming combined stdout+stderr into
/// `log_path`, and return the exit code plus the captured text.
///
/// The log file is opened in append mode and a `--- Running: ...` separator
/// is written before the process starts, so successive invocations stack up
/// in one inspectable history. The child writes straight into the file
/// handle, which means partial output survives a crash or a kill of either
/// process.
#[tracing::instrument(skip_all, fields(program = %program.display()))]
pub fn run_logged(program: &Path, args: &[String], log_path: &Path) -> Result<RunOutcome, ExecError> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut log = OpenOptions::new().create(true).append(true).open(log_path)?;

    let command_line = render_command(program, args);
    writeln!(log, "\n--- Running: {}", command_line)?;
    log.flush()?;

    // Everything past this offset belongs to the invocation below.
    let capture_start = log.metadata()?.len();

    debug!("Launching: {}", command_line);
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::from(log.try_clone()?))
        .stderr(Stdio::from(log.try_clone()?))
        .spawn()
        .map_err(|e| ExecError::Spawn {
            program: program.display().to_string(),
            source: e,
        })?;

    let status = child.wait()?;
    let exit_code = status.code().unwrap_or(-1);

    let output = read_from_offset(log_path, capture_start)?;
    debug!(
        "Process exited with code {} ({} bytes captured)",
        exit_code,
        output.len()
    );

    Ok(RunOutcome {
        exit_code,
        output,
        log_path: log_path.to_path_buf(),
    })
}

fn render_command(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn read_from_offset(path: &Path, offset: u64) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("splatrun-exec-{}-{}", tag, std::process::id()));
        if dir.exists() {
            std::fs::remove_dir_all(&dir).unwrap();
        }
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[cfg(unix)]
    #[test]
    fn test_run_logged_captures_output_and_exit_code() {
        let dir = scratch_dir("capture");
        let log = dir.join("logs").join("run.log");

        let outcome = run_logged(
            Path::new("/bin/sh"),
            &["-c".to_string(), "echo hello; echo oops >&2; exit 3".to_string()],
            &log,
        )
        .unwrap();

        assert_eq!(outcome.exit_code, 3);
        assert!(!outcome.success());
        assert!(outcome.output.contains("hello"));
        assert!(outcome.output.contains("oops"));

        let log_text = std::fs::read_to_string(&log).unwrap();
        assert!(log_text.contains("--- Running: /bin/sh"));
        assert!(log_text.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_logged_appends_across_invocations() {
        let dir = scratch_dir("append");
        let log = dir.join("run.log");

        let first = run_logged(
            Path::new("/bin/sh"),
            &["-c".to_string(), "echo first".to_string()],
            &log,
        )
        .unwrap();
        let second = run_logged(
            Path::new("/bin/sh"),
            &["-c".to_string(), "echo second".to_string()],
            &log,
        )
        .unwrap();

        // Each outcome only captures its own invocation.
        assert!(first.output.contains("first"));
        assert!(!second.output.contains("first"));
        assert!(second.output.contains("second"));

        let log_text = std::fs::read_to_string(&log).unwrap();
        assert_eq!(log_text.matches("--- Running").count(), 2);
        assert!(log_text.contains("first"));
        assert!(log_text.contains("second"));
    }

    #[test]
    fn test_run_logged_missing_program() {
        let dir = scratch_dir("missing");
        let log = dir.join("run.log");

        let err = run_logged(Path::new("/nonexistent/tool"), &[], &log).unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));

        // The separator still made it into the log.
        let log_text = std::fs::read_to_string(&log).unwrap();
        assert!(log_text.contains("--- Running: /nonexistent/tool"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_logged_zero_exit() {
        let dir = scratch_dir("zero");
        let log = dir.join("run.log");

        let outcome = run_logged(
            Path::new("/bin/sh"),
            &["-c".to_string(), "exit 0".to_string()],
            &log,
        )
        .unwrap();
        assert!(outcome.success());
        assert!(outcome.output.is_empty());
    }
}
