use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pageaudit_format::OutputFormat;

/// Audit a single web page: technical SEO, content, links, images,
/// structured data, accessibility, performance, security and trust signals.
#[derive(Parser, Debug)]
#[command(name = "pageaudit", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration profile to use (from `[profiles.<name>]`).
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Load settings from this TOML file instead of the user config.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `PAGEAUDIT_LOG` wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a URL or a local HTML file.
    Audit(AuditArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct AuditArgs {
    /// Page to fetch and audit.
    #[arg(value_name = "URL", required_unless_present = "html_file")]
    pub target: Option<String>,

    /// Audit this HTML file instead of fetching (`-` reads stdin).
    #[arg(long, value_name = "PATH", conflicts_with = "target")]
    pub html_file: Option<PathBuf>,

    /// Source URL of the HTML file, used to resolve relative links.
    #[arg(long, value_name = "URL", requires = "html_file")]
    pub url: Option<String>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Write the report to a file instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip robots.txt, sitemap, TLS, header, link and image probes.
    #[arg(long)]
    pub no_network: bool,

    /// Maximum links to probe.
    #[arg(long, value_name = "N")]
    pub max_links: Option<usize>,

    /// Maximum images to size.
    #[arg(long, value_name = "N")]
    pub max_images: Option<usize>,

    /// Page fetch timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Exit with code 2 when the score is below this value.
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_under: Option<u8>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Md,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Md => OutputFormat::Md,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn html_file_and_url_target_conflict() {
        let res = Cli::try_parse_from([
            "pageaudit",
            "audit",
            "https://a.com",
            "--html-file",
            "x.html",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn fail_under_is_bounded() {
        assert!(Cli::try_parse_from(["pageaudit", "audit", "https://a.com", "--fail-under", "101"]).is_err());
        let cli = Cli::try_parse_from(["pageaudit", "audit", "https://a.com", "--fail-under", "70"]).unwrap();
        let Commands::Audit(args) = cli.command else {
            panic!("expected audit");
        };
        assert_eq!(args.fail_under, Some(70));
    }
}
