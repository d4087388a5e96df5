//! `bref invoke`: package the project and run a function locally through
//! the serverless CLI.

use anyhow::Result;
use bref_core::progress::Progress;

use crate::builder::{Builder, BUILD_STEPS};
use crate::runner;

pub fn invoke(function: &str, data: Option<&str>, raw: bool) -> Result<String> {
    let project_root = std::env::current_dir()?;
    let builder = Builder::new(&project_root);
    let mut progress = Progress::new(BUILD_STEPS);

    builder.build(&mut progress)?;

    let args = invocation_args(function, data, raw);
    let output = runner::run_args("serverless", &args, &builder.output_dir())?;
    Ok(output)
}

/// Discrete argument vector for `serverless invoke local`. Empty or false
/// options are dropped entirely; values are passed as-is since no shell is
/// involved.
fn invocation_args(function: &str, data: Option<&str>, raw: bool) -> Vec<String> {
    let mut args = vec![
        "invoke".to_string(),
        "local".to_string(),
        "-f".to_string(),
        function.to_string(),
    ];
    if let Some(data) = data.filter(|d| !d.is_empty()) {
        args.push("-d".to_string());
        args.push(data.to_string());
    }
    if raw {
        args.push("--raw".to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_only() {
        let args = invocation_args("hello", None, false);
        assert_eq!(args, vec!["invoke", "local", "-f", "hello"]);
    }

    #[test]
    fn test_empty_data_is_dropped() {
        let args = invocation_args("hello", Some(""), false);
        assert_eq!(args, vec!["invoke", "local", "-f", "hello"]);
    }

    #[test]
    fn test_data_and_raw() {
        let args = invocation_args("hello", Some(r#"{"a":1}"#), true);
        assert_eq!(
            args,
            vec!["invoke", "local", "-f", "hello", "-d", r#"{"a":1}"#, "--raw"]
        );
    }

    #[test]
    fn test_raw_is_a_bare_flag() {
        let args = invocation_args("hello", None, true);
        assert_eq!(args, vec!["invoke", "local", "-f", "hello", "--raw"]);
    }
}
