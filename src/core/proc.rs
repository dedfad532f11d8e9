//! The twinpane processes module.
//!
//! Runs console commands without a shell. A line is split on whitespace (no quoting,
//! globbing or redirection), its first token is checked case-sensitively against the
//! configured allow-list, and only then is the program spawned directly with a
//! wall-clock timeout. Standard output and standard error are captured, combined and
//! capped to a byte ceiling with a truncation marker.

use crate::core::error::OpError;

use std::collections::HashSet;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use wait_timeout::ChildExt;

/// Appended to the captured output once it has been cut at the byte ceiling.
pub const TRUNCATION_MARKER: &str = "\n...[output truncated]";

const READ_CHUNK: usize = 8192;

/// The fixed rules a console command has to pass before it may run.
#[derive(Debug, Clone)]
pub struct CommandPolicy {
    allowed: HashSet<String>,
    timeout: Duration,
    max_output: usize,
}

impl CommandPolicy {
    pub fn new<I, S>(allowed: I, timeout: Duration, max_output: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            timeout,
            max_output,
        }
    }

    #[inline]
    pub fn is_allowed(&self, program: &str) -> bool {
        self.allowed.contains(program)
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[inline]
    pub fn max_output(&self) -> usize {
        self.max_output
    }

    /// Checks a command line against the policy without running anything.
    ///
    /// Returns the program name and its arguments when the line may run.
    pub fn check<'l>(&self, line: &'l str) -> Result<(&'l str, Vec<&'l str>), OpError> {
        let mut tokens = tokenize(line);
        if tokens.is_empty() {
            return Err(OpError::EmptyInput);
        }
        let program = tokens.remove(0);
        if program == "cd" {
            return Err(OpError::BuiltinCd);
        }
        if !self.is_allowed(program) {
            return Err(OpError::CommandRejected(program.to_string()));
        }
        Ok((program, tokens))
    }
}

/// Splits a console line on whitespace.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Result of a command run: whatever output was captured plus the failure, if any.
///
/// A rejected command is not a failure: it comes back as output with no error.
#[derive(Debug)]
pub struct CommandOutcome {
    pub output: String,
    pub error: Option<OpError>,
}

/// Runs `line` in `cwd` under the given policy. Blocks the calling (worker) thread.
pub fn run_command(line: &str, cwd: &Path, policy: &CommandPolicy) -> CommandOutcome {
    let (program, args) = match policy.check(line) {
        Ok(parts) => parts,
        Err(OpError::CommandRejected(name)) => {
            tracing::info!(command = %name, "command rejected by allow-list");
            return CommandOutcome {
                output: format!("command not allowed: {}", name),
                error: None,
            };
        }
        Err(e) => {
            return CommandOutcome {
                output: String::new(),
                error: Some(e),
            };
        }
    };

    let mut child = match Command::new(program)
        .args(&args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(source) => {
            let source = if source.kind() == io::ErrorKind::NotFound && which::which(program).is_err()
            {
                io::Error::new(io::ErrorKind::NotFound, "not found in PATH")
            } else {
                source
            };
            return CommandOutcome {
                output: String::new(),
                error: Some(OpError::Spawn {
                    command: program.to_string(),
                    source,
                }),
            };
        }
    };

    let cap = policy.max_output();
    let stdout = child.stdout.take().map(|out| spawn_reader(out, cap));
    let stderr = child.stderr.take().map(|err| spawn_reader(err, cap));

    let mut error = match child.wait_timeout(policy.timeout()) {
        Ok(Some(status)) if status.success() => None,
        Ok(Some(status)) => Some(OpError::ExitStatus(status)),
        Ok(None) => {
            tracing::warn!(command = %line, "command exceeded its timeout, killing");
            let _ = child.kill();
            let _ = child.wait();
            Some(OpError::CommandTimeout)
        }
        Err(source) => {
            let _ = child.kill();
            let _ = child.wait();
            Some(OpError::Spawn {
                command: program.to_string(),
                source,
            })
        }
    };

    let mut combined = Vec::new();
    for reader in [stdout, stderr].into_iter().flatten() {
        match reader.join() {
            Ok(Ok(bytes)) => combined.extend_from_slice(&bytes),
            Ok(Err(source)) if error.is_none() => {
                error = Some(OpError::Spawn {
                    command: program.to_string(),
                    source,
                });
            }
            _ => {}
        }
    }

    CommandOutcome {
        output: truncate_output(&String::from_utf8_lossy(&combined), cap),
        error,
    }
}

/// Reads a pipe to its end on its own thread, keeping at most `cap + 1` bytes.
///
/// The rest is drained and dropped so the child never blocks on a full pipe.
fn spawn_reader<R>(mut pipe: R, cap: usize) -> thread::JoinHandle<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut kept = Vec::new();
        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = match pipe.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let room = (cap + 1).saturating_sub(kept.len());
            kept.extend_from_slice(&buf[..n.min(room)]);
        }
        Ok(kept)
    })
}

/// Cuts `output` to at most `max` bytes on a char boundary and appends [TRUNCATION_MARKER].
pub fn truncate_output(output: &str, max: usize) -> String {
    if output.len() <= max {
        return output.to_string();
    }
    let mut end = max;
    while !output.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + TRUNCATION_MARKER.len());
    out.push_str(&output[..end]);
    out.push_str(TRUNCATION_MARKER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::error;
    use tempfile::tempdir;

    fn policy() -> CommandPolicy {
        CommandPolicy::new(
            ["ls", "pwd", "cat", "echo", "head", "tail", "stat", "date", "sleep"],
            Duration::from_secs(5),
            20_000,
        )
    }

    #[test]
    fn test_tokenize_on_whitespace_only() {
        assert_eq!(tokenize("  echo  'a b'\tc "), vec!["echo", "'a", "b'", "c"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_check_is_case_sensitive() {
        let p = policy();
        assert!(p.check("echo hi").is_ok());
        assert!(matches!(
            p.check("ECHO hi"),
            Err(OpError::CommandRejected(name)) if name == "ECHO"
        ));
        assert!(matches!(p.check("cd /tmp"), Err(OpError::BuiltinCd)));
        assert!(matches!(p.check(""), Err(OpError::EmptyInput)));
    }

    #[test]
    fn test_rejected_command_is_output_not_error() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let outcome = run_command("rm -rf /", dir.path(), &policy());
        assert!(outcome.error.is_none());
        assert_eq!(outcome.output, "command not allowed: rm");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_working_directory() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join("hello.txt"), "from the file\n")?;
        let outcome = run_command("cat hello.txt", dir.path(), &policy());
        assert!(outcome.error.is_none(), "{:?}", outcome.error);
        assert_eq!(outcome.output, "from the file\n");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_and_exit_status_captured() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let outcome = run_command("cat does_not_exist.txt", dir.path(), &policy());
        assert!(matches!(outcome.error, Some(OpError::ExitStatus(_))));
        assert!(outcome.output.contains("does_not_exist.txt"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_yields_timeout_outcome() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let short = CommandPolicy::new(["sleep"], Duration::from_millis(200), 1000);
        let outcome = run_command("sleep 5", dir.path(), &short);
        assert!(matches!(outcome.error, Some(OpError::CommandTimeout)));
        Ok(())
    }

    #[test]
    fn test_truncate_output_marks_cut() {
        let long = "x".repeat(50);
        let cut = truncate_output(&long, 10);
        assert_eq!(cut, format!("{}{}", "x".repeat(10), TRUNCATION_MARKER));
        assert_eq!(truncate_output("short", 10), "short");
    }

    #[test]
    fn test_truncate_output_respects_char_boundary() {
        let crabs = "🦀🦀🦀";
        let cut = truncate_output(crabs, 5);
        assert!(cut.starts_with('🦀'));
        assert!(cut.ends_with(TRUNCATION_MARKER));
    }
}
