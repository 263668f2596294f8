//! Constants and resolved runtime settings.
//!
//! Settings come from command-line flags; `IP_AGGREGATOR_*` environment
//! variables (optionally from a `.env` file) provide defaults for some of
//! them.

use crate::cli::Cli;
use log::LevelFilter;
use crate::output::{OutputFormat, Rendering};
use crate::processing::{PipelineOptions, SortOrder};

/// log4rs configuration file looked up in the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Environment variable overriding [`LOG_CONFIG_FILE`].
pub const ENV_LOG_CONFIG: &str = "IP_AGGREGATOR_LOG_CONFIG";
/// Environment variable with the default mask type.
pub const ENV_MASK_TYPE: &str = "IP_AGGREGATOR_MASK_TYPE";
/// Environment variable with the default output delimiter.
pub const ENV_DELIMITER: &str = "IP_AGGREGATOR_DELIMITER";

pub const RULE: &str = "=";
pub const RULE_WIDTH: usize = 18;

/// Settings for one run, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub pipeline: PipelineOptions,
    pub rendering: Rendering,
    pub format: OutputFormat,
    pub delimiter: String,
    pub quiet: bool,
    pub count_only: bool,
    pub read_stdin: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Settings {
        let sort = if cli.sort {
            Some(SortOrder::Ascending)
        } else if cli.reverse_sort {
            Some(SortOrder::Descending)
        } else {
            None
        };
        if cli.unique && !cli.no_aggregate {
            log::debug!("--unique is ignored while aggregating");
        }
        Settings {
            pipeline: PipelineOptions {
                aggregate: !cli.no_aggregate,
                dedupe: cli.unique,
                sort,
            },
            rendering: Rendering {
                mask: cli.mask_type,
                quote: cli.quote,
                indent: cli.indent,
            },
            format: cli.format,
            delimiter: unescape_delimiter(&cli.output_delimiter),
            quiet: cli.quiet,
            count_only: cli.count,
            read_stdin: cli.stdin,
        }
    }
}

/// Log level requested by the `-v` count, `None` when no `-v` was given.
///
/// An explicit level overrides the log4rs yaml file; without one the file
/// (or a `warn` default) decides.
pub fn verbosity_level(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Turn the `\n`, `\t` and `\\` escapes typed on a command line into characters.
pub fn unescape_delimiter(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MaskStyle;
    use clap::Parser;

    #[test]
    fn test_unescape_delimiter() {
        assert_eq!(unescape_delimiter(","), ",");
        assert_eq!(unescape_delimiter("\\n"), "\n");
        assert_eq!(unescape_delimiter(",\\t"), ",\t");
        assert_eq!(unescape_delimiter("\\x"), "\\x");
        assert_eq!(unescape_delimiter("a\\"), "a\\");
    }

    #[test]
    fn test_verbosity_level() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some(LevelFilter::Info));
        assert_eq!(verbosity_level(2), Some(LevelFilter::Debug));
        assert_eq!(verbosity_level(3), Some(LevelFilter::Trace));
        assert_eq!(verbosity_level(9), Some(LevelFilter::Trace));
    }

    #[test]
    fn test_verbosity_level_from_cli() {
        let cli = Cli::try_parse_from(["ip-aggregator", "-vv", "10.0.0.0/8"]).unwrap();
        assert_eq!(verbosity_level(cli.verbose), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_settings_from_cli_defaults() {
        let cli = Cli::try_parse_from(["ip-aggregator", "10.0.0.0/8"]).unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.pipeline, PipelineOptions::default());
        assert_eq!(settings.format, OutputFormat::Plain);
        assert!(!settings.quiet && !settings.count_only && !settings.read_stdin);
    }

    #[test]
    fn test_settings_from_cli_flags() {
        let cli = Cli::try_parse_from([
            "ip-aggregator", "-A", "-u", "-R", "-q", "-c", "-m", "net", "-d", "\\t", "--quote",
        ])
        .unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(
            settings.pipeline,
            PipelineOptions {
                aggregate: false,
                dedupe: true,
                sort: Some(SortOrder::Descending),
            }
        );
        assert_eq!(settings.rendering.mask, MaskStyle::Net);
        assert!(settings.rendering.quote);
        assert_eq!(settings.delimiter, "\t");
        assert!(settings.quiet && settings.count_only);
    }
}
