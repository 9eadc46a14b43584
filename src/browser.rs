//! Hands project URLs to the desktop's default browser.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

fn opener(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    let cmd = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };
    #[cfg(target_os = "windows")]
    let cmd = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let cmd = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };
    cmd
}

/// Only absolute http(s) links are handed to the opener.
pub fn is_openable(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Launch the opener detached; it must not write over the TUI.
pub fn open_url(url: &str) -> Result<()> {
    if !is_openable(url) {
        anyhow::bail!("refusing to open non-http url: {}", url);
    }
    opener(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch browser for {}", url))?;
    Ok(())
}
