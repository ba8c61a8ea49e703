//! [`ModuleRegistry`] backed by a long-lived Python child process.
//!
//! The child runs a small driver script and answers one JSON object per
//! line on stdout for every JSON request written to its stdin.  Timings are
//! taken inside the interpreter with `time.perf_counter_ns`.
use std::collections::BTreeSet;
use std::io::{BufRead as _, BufReader, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::registry::{InterpreterInfo, ModuleRegistry};
use crate::error::RegistryError;
use crate::platform::Platform;

const DRIVER: &str = include_str!("driver.py");

/// Locate the interpreter to run.
///
/// `requested` may be a bare program name (looked up on `PATH`) or a path;
/// without it the platform default is looked up.
///
/// # Errors
///
/// Returns [`RegistryError::InterpreterNotFound`] if nothing matches.
pub fn resolve_interpreter(
    requested: Option<&Path>,
    platform: &Platform,
) -> Result<PathBuf, RegistryError> {
    let program = requested.map_or_else(
        || PathBuf::from(platform.default_python()),
        Path::to_path_buf,
    );
    which::which(&program).map_err(|source| RegistryError::InterpreterNotFound {
        program: program.display().to_string(),
        source,
    })
}

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Request<'a> {
    Hello,
    Import { name: &'a str },
    Purge { name: &'a str },
    Modules,
    Repeat { name: &'a str, number: u32 },
}

#[derive(Debug, Deserialize)]
struct Response {
    ok: bool,
    error: Option<String>,
    ns: Option<u64>,
    count: Option<usize>,
    modules: Option<Vec<String>>,
    version: Option<String>,
    executable: Option<String>,
}

/// A Python interpreter driven over stdin/stdout.
///
/// The child is killed and reaped on drop.
#[derive(Debug)]
pub struct PythonRegistry {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl PythonRegistry {
    /// Start `program` running the driver script.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Spawn`] if the process cannot be started.
    pub fn spawn(program: &Path) -> Result<Self, RegistryError> {
        let spawn_err = |source| RegistryError::Spawn {
            program: program.to_path_buf(),
            source,
        };

        let mut child = Command::new(program)
            .arg("-c")
            .arg(DRIVER)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_err)?;

        let missing = |what: &str| {
            spawn_err(std::io::Error::other(format!("child {what} was not captured")))
        };
        let stdin = child.stdin.take().ok_or_else(|| missing("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing("stdout"))?;

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    fn request(&mut self, request: &Request<'_>) -> Result<Response, RegistryError> {
        let line = serde_json::to_string(request)
            .map_err(|e| RegistryError::Protocol(format!("cannot encode request: {e}")))?;
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;

        let mut reply = String::new();
        if self.stdout.read_line(&mut reply)? == 0 {
            return Err(RegistryError::Protocol(
                "interpreter exited before answering".to_string(),
            ));
        }
        serde_json::from_str(&reply)
            .map_err(|e| RegistryError::Protocol(format!("malformed reply {:?}: {e}", reply.trim_end())))
    }

    /// Send `request`, turning a failed reply into a protocol error.
    fn expect_ok(&mut self, request: &Request<'_>) -> Result<Response, RegistryError> {
        let response = self.request(request)?;
        if response.ok {
            Ok(response)
        } else {
            Err(RegistryError::Protocol(
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }

    /// Send an import-style `request`, turning a failed reply into
    /// [`RegistryError::ImportFailed`] for `name`.
    fn timed(&mut self, name: &str, request: &Request<'_>) -> Result<Duration, RegistryError> {
        let response = self.request(request)?;
        if !response.ok {
            return Err(RegistryError::ImportFailed {
                module: name.to_string(),
                reason: response.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        field(response.ns, "ns").map(Duration::from_nanos)
    }
}

fn field<T>(value: Option<T>, name: &str) -> Result<T, RegistryError> {
    value.ok_or_else(|| RegistryError::Protocol(format!("reply is missing '{name}'")))
}

impl ModuleRegistry for PythonRegistry {
    fn interpreter(&mut self) -> Result<InterpreterInfo, RegistryError> {
        let response = self.expect_ok(&Request::Hello)?;
        Ok(InterpreterInfo {
            version: field(response.version, "version")?,
            executable: PathBuf::from(field(response.executable, "executable")?),
        })
    }

    fn import(&mut self, name: &str) -> Result<Duration, RegistryError> {
        self.timed(name, &Request::Import { name })
    }

    fn purge(&mut self, name: &str) -> Result<usize, RegistryError> {
        field(self.expect_ok(&Request::Purge { name })?.count, "count")
    }

    fn loaded_modules(&mut self) -> Result<BTreeSet<String>, RegistryError> {
        let modules = field(self.expect_ok(&Request::Modules)?.modules, "modules")?;
        Ok(modules.into_iter().collect())
    }

    fn import_repeatedly(&mut self, name: &str, number: u32) -> Result<Duration, RegistryError> {
        self.timed(name, &Request::Repeat { name, number })
    }
}

impl Drop for PythonRegistry {
    fn drop(&mut self) {
        // the child may already have exited
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
