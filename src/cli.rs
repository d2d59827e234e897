//! CLI argument parsing via clap.

use clap::Parser;
use shellide::build_info::HELP_FOOTER;

/// Line-editing terminal for a ShellIDE backend.
#[derive(Debug, Parser)]
#[command(
    name = "shellide",
    disable_version_flag = true,
    after_help = HELP_FOOTER
)]
pub struct Args {
    /// Path to config file (default: ./shellide.toml or ~/.config/shellide/shellide.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override backend base URL.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Attach to this project id.
    #[arg(long = "project-id")]
    pub project_id: Option<String>,

    /// Display name for the attached project.
    #[arg(long = "project-name", requires = "project_id")]
    pub project_name: Option<String>,

    /// Starting working directory on the backend.
    #[arg(long = "cwd")]
    pub cwd: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Skip the welcome banner.
    #[arg(long = "no-banner")]
    pub no_banner: bool,

    /// Print the annotated default config and exit.
    #[arg(long = "print-config")]
    pub print_config: bool,

    /// Print version and build metadata.
    #[arg(short = 'V', long = "version")]
    pub version: bool,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn defaults_leave_config_untouched() {
        let args = Args::parse_from(["shellide"]);
        assert!(args.config.is_none());
        assert!(args.base_url.is_none());
        assert!(!args.no_color);
        assert!(!args.no_banner);
        assert!(!args.version);
    }

    #[test]
    fn project_flags_parse_together() {
        let args = Args::parse_from([
            "shellide",
            "--project-id",
            "42",
            "--project-name",
            "demo",
            "--cwd",
            "/projects/demo/src",
        ]);
        assert_eq!(args.project_id.as_deref(), Some("42"));
        assert_eq!(args.project_name.as_deref(), Some("demo"));
        assert_eq!(args.cwd.as_deref(), Some("/projects/demo/src"));
    }

    #[test]
    fn project_name_requires_project_id() {
        let err = Args::try_parse_from(["shellide", "--project-name", "demo"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn short_flags_parse() {
        let args = Args::parse_from(["shellide", "-c", "/tmp/s.toml", "-V"]);
        assert_eq!(args.config.as_deref(), Some("/tmp/s.toml"));
        assert!(args.version);
    }
}
