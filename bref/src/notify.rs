//! Best-effort desktop notification.
//!
//! The notification is cosmetic: delivery failures are logged at debug level
//! and never fail the pipeline.

use std::process::Command;

pub fn send(title: &str, body: &str) {
    let result = if cfg!(target_os = "macos") {
        Command::new("osascript")
            .arg("-e")
            .arg(format!(
                "display notification \"{}\" with title \"{}\"",
                body, title
            ))
            .spawn()
    } else {
        Command::new("notify-send").arg(title).arg(body).spawn()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Desktop notification unavailable");
    }
}
