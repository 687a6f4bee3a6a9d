//! Integration tests for CLI argument handling
//!
//! Tests the --platform and --no-cache flags from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_esodash"))
        .args(args)
        .output()
        .expect("Failed to execute esodash")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("esodash"), "Help should mention esodash");
    assert!(
        stdout.contains("platform"),
        "Help should mention --platform flag"
    );
    assert!(
        stdout.contains("no-cache"),
        "Help should mention --no-cache flag"
    );
}

#[test]
fn test_invalid_platform_prints_error_and_exits() {
    let output = run_cli(&["--platform", "dreamcast"]);
    assert!(
        !output.status.success(),
        "Expected invalid platform to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid platform"),
        "Should print error message about invalid platform: {}",
        stderr
    );
}

#[test]
fn test_platform_pc_is_valid() {
    // This test just verifies the argument is accepted (doesn't error immediately)
    // The actual filtering is tested in unit tests
    let output = run_cli(&["--platform", "pc", "--help"]);
    // With --help, it should succeed regardless of other flags
    // This is a workaround since we can't easily test TUI apps
    assert!(output.status.success());
}

#[test]
fn test_platform_ps_is_valid() {
    let output = run_cli(&["--platform", "ps", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use esodash::cli::{parse_platform_arg, Cli, StartupConfig};
    use esodash::data::Platform;

    #[test]
    fn test_cli_no_args_defaults() {
        let cli = Cli::parse_from(["esodash"]);
        assert!(cli.platform.is_none());
        assert!(!cli.no_cache);
    }

    #[test]
    fn test_cli_platform_flag_with_value() {
        let cli = Cli::parse_from(["esodash", "--platform", "xbox"]);
        assert_eq!(cli.platform.as_deref(), Some("xbox"));
    }

    #[test]
    fn test_cli_no_cache_flag() {
        let cli = Cli::parse_from(["esodash", "--no-cache"]);
        assert!(cli.no_cache);
    }

    #[test]
    fn test_startup_config_resolves_platform() {
        let cli = Cli::parse_from(["esodash", "--platform", "ps4"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.platform_filter, Some(Platform::PlayStation));
    }

    #[test]
    fn test_parse_platform_arg_rejects_unknown() {
        assert!(parse_platform_arg("gamecube").is_err());
    }
}
