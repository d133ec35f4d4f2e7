//! Desktop launcher.
//!
//! The only contract between the packaging layer and the server is the
//! health endpoint: poll `GET /api/health/` at a fixed interval with a
//! bounded number of attempts, then open the app in the default
//! browser. Exhausting the attempts logs a terminal message with no
//! further remediation.

use std::process::Command;
use tracing::{info, warn};

use crate::config::{Config, LauncherConfig};

/// Poll the health endpoint until it answers or attempts run out.
pub async fn wait_for_healthy(base_url: &str, launcher: &LauncherConfig) -> bool {
    let client = reqwest::Client::new();
    let health_url = format!("{base_url}/api/health/");

    for attempt in 1..=launcher.max_attempts {
        match client.get(&health_url).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Server is ready after {attempt} attempt(s)");
                return true;
            }
            Ok(_) | Err(_) => {
                info!("Waiting for server... ({attempt}/{})", launcher.max_attempts);
            }
        }
        tokio::time::sleep(launcher.poll_interval).await;
    }

    false
}

/// Open a URL with the platform's default opener.
pub fn open_in_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    Command::new("open").arg(url).spawn()?;

    #[cfg(target_os = "windows")]
    Command::new("cmd").args(["/C", "start", "", url]).spawn()?;

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    Command::new("xdg-open").arg(url).spawn()?;

    Ok(())
}

/// Wait for the server to come up, then open it in a window.
pub async fn launch_when_ready(config: Config) {
    let url = config.local_url();

    if !wait_for_healthy(&url, &config.launcher).await {
        warn!(
            "Server did not become healthy within {} attempts; not opening a window",
            config.launcher.max_attempts
        );
        return;
    }

    if let Err(e) = open_in_browser(&url) {
        warn!("Failed to open {url} in browser: {e}");
    }
}
