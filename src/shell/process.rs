use crate::core::{Config, Result, ShellError};
use crate::root::RootDetector;
use crate::shell::command::{Command, ShellEvent};
use crate::shell::session::ShellSession;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command as ProcessCommand;
use tokio::runtime::{Builder, Runtime};
use tokio::time::timeout;
use tracing::debug;

/// Runs each command in a fresh child shell: the su binary for a root shell, `sh`
/// otherwise. A readiness marker, the command and `exit` are written to the shell's stdin.
/// A privileged shell that never echoes the marker refused elevation.
pub struct ProcessShell {
    program: PathBuf,
    privileged: bool,
    timeout: Duration,
    runtime: Runtime,
}

impl ProcessShell {
    pub fn root(config: &Config) -> Result<Self> {
        let program = RootDetector::from_config(config)
            .locate_su()
            .unwrap_or_else(|| PathBuf::from(&config.su_binary_name));
        Self::with_program(program, true, config.command_timeout())
    }

    pub fn user(config: &Config) -> Result<Self> {
        Self::with_program("sh", false, config.command_timeout())
    }

    pub fn with_program(
        program: impl Into<PathBuf>,
        privileged: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            program: program.into(),
            privileged,
            timeout,
            runtime,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    fn spawn_error(&self, e: std::io::Error) -> ShellError {
        if self.privileged && e.kind() == std::io::ErrorKind::PermissionDenied {
            ShellError::PermissionDenied(format!("cannot execute {}", self.program.display()))
        } else {
            ShellError::Io(e)
        }
    }

    async fn run(&self, command: &Command, events: &mut dyn FnMut(ShellEvent)) -> Result<()> {
        let id = command.id();
        let mut child = ProcessCommand::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // su that refuses elevation exits before running anything, so it never echoes
        // the marker back.
        let marker = format!("__rootshell_ready_{}__", id);
        if let Some(mut stdin) = child.stdin.take() {
            let script = format!("echo {}\n{}\nexit\n", marker, command.text());
            if let Err(e) = stdin.write_all(script.as_bytes()).await {
                ignore_closed_pipe(e)?;
            }
            if let Err(e) = stdin.shutdown().await {
                ignore_closed_pipe(e)?;
            }
        }

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let mut ready = false;
        let read_stdout = async {
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                while let Some(line) = lines.next_line().await? {
                    if !ready && line == marker {
                        ready = true;
                        continue;
                    }
                    events(ShellEvent::Output { id, line });
                }
            }
            Ok::<(), std::io::Error>(())
        };
        let read_stderr = async {
            let mut buf = String::new();
            if let Some(mut stderr) = stderr {
                stderr.read_to_string(&mut buf).await?;
            }
            Ok::<String, std::io::Error>(buf)
        };
        let (out, err) = tokio::join!(read_stdout, read_stderr);
        out?;
        let stderr = err?;
        let status = child.wait().await?;

        if !stderr.is_empty() {
            debug!(id, stderr = stderr.trim(), "shell wrote to stderr");
        }
        if self.privileged && !ready {
            let detail = match stderr.trim() {
                "" => format!(
                    "{} exited with {} before running the command",
                    self.program.display(),
                    status
                ),
                text => text.to_string(),
            };
            return Err(ShellError::PermissionDenied(detail));
        }
        if !status.success() {
            debug!(id, code = ?status.code(), "shell exited with non-zero status");
        }

        events(ShellEvent::Finished { id });
        Ok(())
    }
}

/// A shell that exits early closes its stdin; that is reported through the marker check.
fn ignore_closed_pipe(e: std::io::Error) -> std::io::Result<()> {
    if e.kind() == std::io::ErrorKind::BrokenPipe {
        Ok(())
    } else {
        Err(e)
    }
}

impl ShellSession for ProcessShell {
    fn execute(&self, command: Command, events: &mut dyn FnMut(ShellEvent)) -> Result<()> {
        let limit = self.timeout;
        self.runtime.block_on(async {
            match timeout(limit, self.run(&command, events)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ShellError::Timeout(limit.as_millis() as u64)),
            }
        })
    }
}
