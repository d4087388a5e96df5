//! One-shot bridge entry point: the invocation event arrives as the single
//! command-line argument (or on stdin when the argument is `-`), the JSON
//! result (or `null`) is printed to stdout.

mod bridge;

use anyhow::{Context, Result};
use serde_json::Value;

use bridge::Bridge;

fn main() -> Result<()> {
    init_tracing();

    let raw = std::env::args()
        .nth(1)
        .context("Usage: bref-runtime <event-json>")?;
    let raw = if raw == "-" {
        let mut s = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut s)?;
        s
    } else {
        raw
    };
    let event: Value = serde_json::from_str(&raw).context("Event is not valid JSON")?;

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let result = rt.block_on(Bridge::from_env().invoke(&event))?;

    println!("{}", result.unwrap_or(Value::Null));
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
