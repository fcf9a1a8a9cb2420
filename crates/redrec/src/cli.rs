use std::path::PathBuf;

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  redrec bash                  Record under the last used operation
  redrec bash new_operation    Record under new_operation
  redrec bash -s               Choose a previous operation interactively";

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "redrec",
    version,
    about = "Record terminal sessions grouped by operation",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Shell command to run under the recorder.
    pub command: String,

    /// Operation to file the recording under.
    pub operation: Option<String>,

    /// Choose from previously used operations.
    #[arg(short, long, conflicts_with = "operation")]
    pub select: bool,

    /// Workspace directory holding the registry and recordings.
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Recorder program, invoked as `<PROGRAM> rec -c <COMMAND> <FILE>`.
    #[arg(long, value_name = "PROGRAM")]
    pub recorder: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::Cli;

    #[test]
    fn command_alone() {
        let cli = Cli::try_parse_from(["redrec", "bash"]).expect("parse");
        assert_eq!(cli.command, "bash");
        assert_eq!(cli.operation, None);
        assert!(!cli.select);
    }

    #[test]
    fn command_and_operation() {
        let cli = Cli::try_parse_from(["redrec", "ls -la", "recon"]).expect("parse");
        assert_eq!(cli.command, "ls -la");
        assert_eq!(cli.operation.as_deref(), Some("recon"));
    }

    #[test]
    fn select_short_and_long() {
        for flag in ["-s", "--select"] {
            let cli = Cli::try_parse_from(["redrec", "bash", flag]).expect("parse");
            assert!(cli.select);
        }
    }

    #[test]
    fn select_conflicts_with_operation() {
        let err = Cli::try_parse_from(["redrec", "bash", "recon", "-s"]).expect_err("conflict");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn missing_command_is_a_usage_error() {
        let err = Cli::try_parse_from(["redrec"]).expect_err("missing command");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn overrides_parse() {
        let cli = Cli::try_parse_from([
            "redrec",
            "bash",
            "--workspace",
            "/tmp/ws",
            "--recorder",
            "fake-rec",
        ])
        .expect("parse");
        assert_eq!(cli.workspace.as_deref(), Some(std::path::Path::new("/tmp/ws")));
        assert_eq!(cli.recorder.as_deref(), Some("fake-rec"));
    }

    #[test]
    fn help_lists_examples() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("redrec bash new_operation"));
        assert!(help.contains("redrec bash -s"));
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
