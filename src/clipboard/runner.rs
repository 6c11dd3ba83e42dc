//! Bounded execution of external clipboard tools.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time;

use super::types::{ClipboardError, ProcessOutput};

/// How long captured pipes may keep draining after the process exits.
///
/// Tools such as `wl-copy` and `xclip` fork a background server that can inherit the
/// pipes; their output is abandoned instead of waited for.
const OUTPUT_DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Where the child's standard input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdinSource {
    Inherit,
    Null,
    /// Stream the file's bytes into the child, then close the pipe.
    File(PathBuf),
}

/// What happens to the child's stdout or stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Inherit,
    Capture,
    Discard,
}

impl OutputMode {
    fn stdio(self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Capture => Stdio::piped(),
            Self::Discard => Stdio::null(),
        }
    }
}

/// A single external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<OsString>,
    pub stdin: StdinSource,
    pub stdout: OutputMode,
    pub stderr: OutputMode,
}

impl CommandSpec {
    /// Command with no stdin and both output streams captured.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: StdinSource::Null,
            stdout: OutputMode::Capture,
            stderr: OutputMode::Capture,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, stdin: StdinSource) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn stdout(mut self, mode: OutputMode) -> Self {
        self.stdout = mode;
        self
    }

    pub fn stderr(mut self, mode: OutputMode) -> Self {
        self.stderr = mode;
        self
    }

    /// Program and arguments as plain strings, mostly for logs and assertions.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|arg| arg.to_string_lossy().into_owned()))
            .collect()
    }
}

/// Abstraction over running external commands. Mocked in tests.
///
/// A non-zero exit is returned as a normal [`ProcessOutput`]; only a timeout or a failure to
/// start the process is an error.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        spec: &CommandSpec,
        timeout: Duration,
    ) -> Result<ProcessOutput, ClipboardError>;
}

/// Runs commands as real child processes and kills them when they overrun.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        spec: &CommandSpec,
        timeout: Duration,
    ) -> Result<ProcessOutput, ClipboardError> {
        let launch_error = |source: std::io::Error| ClipboardError::Launch {
            command: spec.program.clone(),
            source,
        };

        // Open the input before spawning so a missing file never leaves a child behind.
        let input = match &spec.stdin {
            StdinSource::File(path) => {
                Some(tokio::fs::File::open(path).await.map_err(launch_error)?)
            }
            _ => None,
        };

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(match spec.stdin {
                StdinSource::Inherit => Stdio::inherit(),
                StdinSource::Null => Stdio::null(),
                StdinSource::File(_) => Stdio::piped(),
            })
            .stdout(spec.stdout.stdio())
            .stderr(spec.stderr.stdio())
            .kill_on_drop(true);

        log::debug!("Spawning {:?} (timeout {}ms)", spec.argv(), timeout.as_millis());
        let mut child = command.spawn().map_err(launch_error)?;

        let feeder = match (input, child.stdin.take()) {
            (Some(mut file), Some(mut pipe)) => {
                let program = spec.program.clone();
                Some(tokio::spawn(async move {
                    // The pipe is dropped (closed) when the copy ends.
                    if let Err(e) = tokio::io::copy(&mut file, &mut pipe).await {
                        log::debug!("Feeding stdin of {} stopped early: {}", program, e);
                    }
                }))
            }
            _ => None,
        };
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        let waited = time::timeout(timeout, child.wait()).await;
        let status = match waited {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                abort_all(feeder, stdout_reader, stderr_reader);
                return Err(launch_error(e));
            }
            Err(_) => {
                log::warn!(
                    "{} exceeded {}ms, killing it",
                    spec.program,
                    timeout.as_millis()
                );
                if let Err(e) = child.kill().await {
                    log::error!("Failed to kill {}: {}", spec.program, e);
                }
                abort_all(feeder, stdout_reader, stderr_reader);
                return Err(ClipboardError::Timeout {
                    command: spec.program.clone(),
                    timeout,
                });
            }
        };

        if let Some(feeder) = feeder {
            feeder.abort();
        }
        let stdout = drain(stdout_reader).await;
        let stderr = drain(stderr_reader).await;
        log::debug!("{} exited with {:?}", spec.program, status.code());

        Ok(ProcessOutput {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    }
}

fn spawn_reader<R>(mut stream: R) -> JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buffer = Vec::new();
        let _ = stream.read_to_end(&mut buffer).await;
        buffer
    })
}

async fn drain(reader: Option<JoinHandle<Vec<u8>>>) -> String {
    let Some(mut reader) = reader else {
        return String::new();
    };
    match time::timeout(OUTPUT_DRAIN_GRACE, &mut reader).await {
        Ok(Ok(bytes)) => String::from_utf8_lossy(&bytes).trim().to_string(),
        Ok(Err(_)) => String::new(),
        Err(_) => {
            log::debug!("Output pipe still held open after exit; not waiting for it");
            reader.abort();
            String::new()
        }
    }
}

fn abort_all(
    feeder: Option<JoinHandle<()>>,
    stdout: Option<JoinHandle<Vec<u8>>>,
    stderr: Option<JoinHandle<Vec<u8>>>,
) {
    if let Some(handle) = feeder {
        handle.abort();
    }
    for handle in [stdout, stderr].into_iter().flatten() {
        handle.abort();
    }
}
