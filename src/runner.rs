use std::process::Command;

/// Runs a command line to completion and returns everything it printed.
///
/// There is no error channel: a process that cannot be launched, exits
/// non-zero or prints nothing is just a different output string.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str) -> String;
}

/// Executes command lines through `sh -c`, capturing stdout then stderr.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    shell: Option<String>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: Some(shell.into()),
        }
    }

    fn shell(&self) -> &str {
        self.shell.as_deref().unwrap_or("/bin/sh")
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> String {
        tracing::debug!("Running `{command}`");

        let output = match Command::new(self.shell()).arg("-c").arg(command).output() {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!("Failed to launch `{command}`: {err}");
                return String::new();
            }
        };

        if !output.status.success() {
            tracing::debug!("`{command}` exited with {}", output.status);
        }

        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        captured.push_str(&String::from_utf8_lossy(&output.stderr));
        captured
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_stderr() {
        let output = ShellRunner::new().run("echo out; echo err 1>&2");
        assert_eq!(output, "out\nerr\n");
    }

    #[test]
    fn failing_command_still_returns_output() {
        let output = ShellRunner::new().run("echo license declined; exit 3");
        assert_eq!(output, "license declined\n");
    }

    #[test]
    fn launch_failure_is_empty_output() {
        let runner = ShellRunner::with_shell("/definitely/not/a/shell");
        assert_eq!(runner.run("echo hi"), "");
    }
}
