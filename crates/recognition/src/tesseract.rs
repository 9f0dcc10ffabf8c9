//! Tesseract command-line engine.
//!
//! Runs the `tesseract` executable once per attempt, feeding the bitmap as
//! PNG on stdin and reading recognized text from stdout.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use image::{ImageFormat, RgbaImage};
use snapname_common::config::RecognitionDefaults;
use snapname_common::error::{SnapnameError, SnapnameResult};

use crate::engine::{Attempt, EngineStatus, RecognitionEngine};

const EXECUTABLE: &str = "tesseract";

/// Tesseract invoked as an external process.
#[derive(Debug)]
pub struct TesseractEngine {
    /// Configured executable; `None` searches `PATH`.
    command: Option<PathBuf>,
    language: String,
    oem: u8,
    /// Executable found by the last successful probe.
    resolved: Mutex<Option<PathBuf>>,
}

impl TesseractEngine {
    pub fn new(command: Option<PathBuf>, language: impl Into<String>, oem: u8) -> Self {
        Self {
            command,
            language: language.into(),
            oem,
            resolved: Mutex::new(None),
        }
    }

    pub fn from_config(config: &RecognitionDefaults) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.language.clone(), config.oem)
    }

    /// Command-line arguments after `stdin stdout` for one attempt.
    pub fn attempt_args(&self, attempt: Attempt) -> Vec<String> {
        let mut args = vec!["-l".to_string(), self.language.clone()];
        if let Attempt::Mode(mode) = attempt {
            args.push("--oem".to_string());
            args.push(self.oem.to_string());
            args.push("--psm".to_string());
            args.push(mode.psm().to_string());
        }
        args
    }

    /// Resolve the executable and check that it answers `--version`.
    fn probe(&self) -> Result<(PathBuf, String), EngineStatus> {
        let executable = match &self.command {
            Some(configured) if is_bare_name(configured) => match find_on_path(configured) {
                Some(found) => found,
                None => {
                    return Err(EngineStatus::ExecutableNotFound {
                        path: configured.clone(),
                    })
                }
            },
            Some(configured) => {
                if !configured.is_file() {
                    return Err(EngineStatus::ExecutableNotFound {
                        path: configured.clone(),
                    });
                }
                configured.clone()
            }
            None => match find_on_path(Path::new(EXECUTABLE)) {
                Some(found) => found,
                None => return Err(EngineStatus::NotInstalled),
            },
        };

        match engine_version(&executable) {
            Some(version) => Ok((executable, version)),
            None => Err(EngineStatus::ExecutableNotFound { path: executable }),
        }
    }

    /// Probe and remember the executable for the attempts that follow.
    fn refresh(&self) -> Result<(PathBuf, String), EngineStatus> {
        let probed = self.probe();
        if let Ok(mut slot) = self.resolved.lock() {
            *slot = probed.as_ref().ok().map(|(path, _)| path.clone());
        }
        probed
    }

    /// Executable to run, probing only when no earlier probe succeeded.
    fn executable(&self) -> SnapnameResult<PathBuf> {
        let cached = self.resolved.lock().ok().and_then(|slot| slot.clone());
        match cached {
            Some(path) => Ok(path),
            None => self.refresh().map(|(path, _)| path).map_err(|status| {
                SnapnameError::recognition(format!("Tesseract unavailable: {status:?}"))
            }),
        }
    }
}

impl RecognitionEngine for TesseractEngine {
    fn status(&self) -> EngineStatus {
        match self.refresh() {
            Ok((path, version)) => {
                tracing::debug!(path = %path.display(), %version, "Tesseract ready");
                EngineStatus::Ready { version }
            }
            Err(status) => status,
        }
    }

    fn recognize(&self, image: &RgbaImage, attempt: Attempt) -> SnapnameResult<String> {
        let executable = self.executable()?;

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        let args = self.attempt_args(attempt);
        tracing::debug!(?attempt, ?args, bytes = png.len(), "Running tesseract");

        let mut command = Command::new(&executable);
        command
            .arg("stdin")
            .arg("stdout")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_console_window(&mut command);

        let mut child = command.spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png)?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(SnapnameError::recognition(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &str {
        EXECUTABLE
    }
}

/// A path with a single component is looked up on `PATH`.
fn is_bare_name(path: &Path) -> bool {
    path.components().count() == 1 && !path.is_absolute()
}

/// Search `PATH` for an executable file.
pub fn find_on_path(name: &Path) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let with_exe = candidate.with_extension("exe");
            if with_exe.is_file() {
                return Some(with_exe);
            }
        }
        None
    })
}

/// First line of `--version`; older releases print it on stderr.
fn engine_version(executable: &Path) -> Option<String> {
    let mut command = Command::new(executable);
    command.arg("--version");
    hide_console_window(&mut command);

    let output = command.output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first_line = stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("tesseract");
    Some(first_line.to_string())
}

#[cfg(windows)]
fn hide_console_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_command: &mut Command) {}
