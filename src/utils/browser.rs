use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Opens the rendered artifact with the platform's default viewer.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let status = viewer_command(path)
        .status()
        .with_context(|| format!("failed to launch a viewer for {}", path.display()))?;
    if !status.success() {
        bail!("viewer exited with status {}", status);
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
