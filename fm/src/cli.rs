//! CLI argument parsing for flowmigrate

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fm")]
#[command(
    author,
    version,
    about = "Migrate auto-flow Markdown tracking files to YAML",
    long_about = None,
    after_help = "Reads SPRINTS.md, TASK.md and COMPLETED_TASKS.md and writes a .yml file next to each."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing the Markdown documents (default: .autoflow)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Parse and report without writing any YAML
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["fm"]);
        assert!(cli.config.is_none());
        assert!(cli.dir.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::parse_from(["fm", "-c", "fm.yml", "-d", "docs", "--dry-run", "-v"]);
        assert_eq!(cli.config, Some(PathBuf::from("fm.yml")));
        assert_eq!(cli.dir, Some(PathBuf::from("docs")));
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_positional() {
        assert!(Cli::try_parse_from(["fm", "extra"]).is_err());
    }
}
