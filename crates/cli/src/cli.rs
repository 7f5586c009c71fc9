use clap::{Args, Parser, Subcommand, ValueEnum};
use skillrec_datasource::ProfileFormat;
use std::path::PathBuf;

/// Layout of the profile file given with `--profiles`.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Detect from the file contents.
    #[default]
    Auto,
    /// People export (one pretty-printed record per employee).
    People,
    /// JSON object mapping employee ids to skill lists.
    Map,
}

impl From<FormatArg> for ProfileFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Auto => ProfileFormat::Auto,
            FormatArg::People => ProfileFormat::People,
            FormatArg::Map => ProfileFormat::Map,
        }
    }
}

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Skill profile file (falls back to `SKILLREC_PROFILES`).
    #[arg(long, global = true, value_name = "PATH")]
    pub profiles: Option<PathBuf>,
    /// Layout of the profile file.
    #[arg(long, global = true, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,
    /// Config file (TOML or YAML); overrides `SKILLREC_CONFIG` and `~/.skillrec/config.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Overrides one option, e.g. `--set similarity_metric=jaccard` (repeatable).
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

/// Command-line interface for the `skillrec` application.
#[derive(Debug, Parser)]
#[command(
    name = "skillrec",
    version,
    about = "Recommends skills to employees from the skills of their colleagues"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `skillrec` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recommends new skills for one employee.
    Recommend {
        /// Employee to recommend for.
        #[arg(long, short = 'e')]
        employee: i64,
        /// Number of skills to recommend.
        #[arg(short = 'n', long = "count", default_value_t = 5)]
        count: usize,
        /// Number of known skills to report as the basis.
        #[arg(long, default_value_t = 5)]
        most_similar: usize,
        /// Skill to leave out of the result (repeatable).
        #[arg(long = "ignore", value_name = "SKILL")]
        ignored: Vec<String>,
        /// Prints the recommendation as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Lists the skills an employee already has.
    Skills {
        /// Employee to look up.
        #[arg(long, short = 'e')]
        employee: i64,
    },
    /// Shows skill index statistics.
    Inspect {
        /// Prints the statistics as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Prints the effective configuration as TOML.
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_recommend_defaults() {
        let cli = Cli::try_parse_from(["skillrec", "recommend", "--employee", "12"]).unwrap();
        match cli.command {
            Commands::Recommend {
                employee,
                count,
                most_similar,
                ignored,
                json,
            } => {
                assert_eq!(employee, 12);
                assert_eq!(count, 5);
                assert_eq!(most_similar, 5);
                assert!(ignored.is_empty());
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.global.format, FormatArg::Auto);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "skillrec",
            "recommend",
            "-e",
            "3",
            "-n",
            "2",
            "--ignore",
            "Rust",
            "--ignore",
            "Go",
            "--format",
            "map",
            "--set",
            "use_binary=false",
            "--set",
            "similarity_metric=dot",
        ])
        .unwrap();
        assert_eq!(cli.global.format, FormatArg::Map);
        assert_eq!(cli.global.overrides.len(), 2);
        let Commands::Recommend { count, ignored, .. } = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(count, 2);
        assert_eq!(ignored, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_format_maps_to_profile_format() {
        assert_eq!(ProfileFormat::from(FormatArg::People), ProfileFormat::People);
        assert_eq!(ProfileFormat::from(FormatArg::Map), ProfileFormat::Map);
        assert_eq!(ProfileFormat::from(FormatArg::Auto), ProfileFormat::Auto);
    }
}
