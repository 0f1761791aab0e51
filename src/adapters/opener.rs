//! OS URL opener adapter
//!
//! Hands a URL to the platform's default handler (usually the browser).

use crate::error::{AppError, Result};
use crate::ports::opener::UrlOpenerPort;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

/// Opens URLs with the platform launcher
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemUrlOpener;

impl SystemUrlOpener {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "windows")]
    fn command(url: &str) -> Command {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    }

    #[cfg(target_os = "macos")]
    fn command(url: &str) -> Command {
        let mut command = Command::new("open");
        command.arg(url);
        command
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn command(url: &str) -> Command {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}

impl UrlOpenerPort for SystemUrlOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(AppError::InvalidInput("Cannot open an empty URL".to_string()));
        }

        log::info!("Opening {}", url);
        Self::launch(Self::command(url))?;
        Ok(())
    }
}

impl SystemUrlOpener {
    /// Spawns the launcher and reaps it on a background thread
    fn launch(mut command: Command) -> Result<JoinHandle<std::io::Result<ExitStatus>>> {
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(std::thread::spawn(move || child.wait()))
    }
}
