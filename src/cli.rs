//! Command-line surface of `sk`: global options and subcommands.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point.  Without a subcommand the interactive menu
/// starts.
#[derive(Parser, Debug)]
#[command(
    name = "sk",
    about = "Fan out skills and agents to AI tool platforms as symlinks",
    version
)]
pub struct Cli {
    /// Subcommand to run; `None` starts the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository and config overrides.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// Name used for the per-command log file.
    #[must_use]
    pub fn command_name(&self) -> &'static str {
        self.command.as_ref().map_or("interactive", Command::name)
    }
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the repository root (default: ~/.config/agent)
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Override the platforms.toml path (default: <repo>/platforms.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Link a module into platform directories
    Use(UseOpts),
    /// Show every module and where it is linked
    List,
    /// Show registered platforms
    Platforms,
    /// Show details of a module
    Info {
        /// Module name
        module: String,
    },
    /// Remove a module's links
    Remove {
        /// Module name
        module: String,
        /// Only remove from this platform key
        platform: Option<String>,
    },
    /// Link every module onto every platform
    Sync {
        /// Preview changes without applying
        #[arg(short = 'd', long)]
        dry_run: bool,
    },
    /// Check link health across all modules and platforms
    Status,
    /// Create the repository layout and a starter platforms.toml
    Init,
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name as typed on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Use(_) => "use",
            Self::List => "list",
            Self::Platforms => "platforms",
            Self::Info { .. } => "info",
            Self::Remove { .. } => "remove",
            Self::Sync { .. } => "sync",
            Self::Status => "status",
            Self::Init => "init",
            Self::Completions { .. } => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `use` subcommand.
#[derive(Args, Debug, Clone)]
pub struct UseOpts {
    /// Module name
    pub module: String,

    /// Only link onto this platform key (default: every platform)
    pub platform: Option<String>,

    /// Link under the platform's global root (default)
    #[arg(short, long, conflicts_with = "project")]
    pub global: bool,

    /// Link under the platform's project root in the current directory
    #[arg(short, long)]
    pub project: bool,

    /// Link under this name instead of the module's own
    #[arg(long = "as", value_name = "NAME")]
    pub link_as: Option<String>,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn use_opts(cli: Cli) -> UseOpts {
        let Some(Command::Use(opts)) = cli.command else {
            panic!("expected use, got {:?}", cli.command);
        };
        opts
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_interactive() {
        let cli = Cli::parse_from(["sk"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command_name(), "interactive");
    }

    #[test]
    fn parse_use_with_platform_and_flags() {
        let opts = use_opts(Cli::parse_from([
            "sk", "use", "review", "claude", "--project", "--as", "rv", "--dry-run",
        ]));
        assert_eq!(opts.module, "review");
        assert_eq!(opts.platform.as_deref(), Some("claude"));
        assert!(opts.project);
        assert!(!opts.global);
        assert_eq!(opts.link_as.as_deref(), Some("rv"));
        assert!(opts.dry_run);
    }

    #[test]
    fn parse_use_defaults() {
        let opts = use_opts(Cli::parse_from(["sk", "use", "review"]));
        assert!(opts.platform.is_none());
        assert!(!opts.project);
        assert!(!opts.dry_run);
    }

    #[test]
    fn global_and_project_conflict() {
        let result = Cli::try_parse_from(["sk", "use", "review", "--global", "--project"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_remove_with_optional_platform() {
        let cli = Cli::parse_from(["sk", "remove", "review", "cursor"]);
        assert!(matches!(
            cli.command,
            Some(Command::Remove {
                ref module,
                platform: Some(ref p),
            }) if module == "review" && p == "cursor"
        ));
    }

    #[test]
    fn parse_sync_dry_run_short() {
        let cli = Cli::parse_from(["sk", "sync", "-d"]);
        assert!(matches!(cli.command, Some(Command::Sync { dry_run: true })));
    }

    #[test]
    fn parse_repo_override_after_subcommand() {
        let cli = Cli::parse_from(["sk", "status", "--repo", "/srv/agent"]);
        assert_eq!(cli.global.repo, Some(PathBuf::from("/srv/agent")));
        assert_eq!(cli.command_name(), "status");
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["sk", "-v", "list"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_completions_shell() {
        let cli = Cli::parse_from(["sk", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Command::Completions {
                shell: clap_complete::Shell::Bash
            })
        ));
    }
}
