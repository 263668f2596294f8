//! Command-line arguments.

use crate::config::{ENV_DELIMITER, ENV_MASK_TYPE};
use crate::output::{MaskStyle, OutputFormat};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "ip-aggregator",
    about = "Extract, filter, sort, and aggregate subnets.",
    version
)]
pub struct Cli {
    /// Subnets, addresses or first-last ranges to aggregate
    pub subnet: Vec<String>,

    /// Extract addresses from stdin (only IPv4 addresses supported)
    #[arg(short, long)]
    pub stdin: bool,

    /// Only produce output, no other information
    #[arg(short, long)]
    pub quiet: bool,

    /// Sets the output delimiter, default is a new line
    #[arg(short = 'd', long, env = ENV_DELIMITER, default_value = "\n", hide_default_value = true)]
    pub output_delimiter: String,

    /// List IP classes and exit. Classes can be used in filters, supports -m/--mask-type
    #[arg(short, long)]
    pub list_classes: bool,

    /// Filter results to include subnets of a network or class. Repeatable
    #[arg(short = 'f', long, value_name = "NETWORK")]
    pub include_filter: Vec<String>,

    /// Filter results to exclude subnets of a network or class. Repeatable
    #[arg(short = 'F', long, value_name = "NETWORK")]
    pub exclude_filter: Vec<String>,

    /// Use prefix length, net mask, or wildcard mask
    #[arg(short, long, value_enum, env = ENV_MASK_TYPE, default_value_t = MaskStyle::Prefix)]
    pub mask_type: MaskStyle,

    /// Sort the output, ascending order
    #[arg(short = 'S', long, conflicts_with = "reverse_sort")]
    pub sort: bool,

    /// Sort the output, descending order
    #[arg(short = 'R', long)]
    pub reverse_sort: bool,

    /// Don't aggregate subnets. Just output valid networks and addresses
    #[arg(short = 'A', long)]
    pub no_aggregate: bool,

    /// Remove duplicates from the output, ignored if used without -A/--no-aggregate
    #[arg(short, long)]
    pub unique: bool,

    /// Only output the count of the networks/IPs
    #[arg(short, long)]
    pub count: bool,

    /// Output list format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Wrap every output network in double quotes
    #[arg(long)]
    pub quote: bool,

    /// Spaces to indent every output network with
    #[arg(long, default_value_t = 0)]
    pub indent: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "ip-aggregator",
            "-A",
            "-u",
            "-S",
            "-f",
            "A",
            "-f",
            "192.168.0.0/16",
            "-F",
            "10.1.0.0/16",
            "-m",
            "wildcard",
            "10.0.0.0/24",
            "10.0.1.0/24",
        ])
        .unwrap();
        assert!(cli.no_aggregate && cli.unique && cli.sort);
        assert_eq!(cli.include_filter, vec!["A", "192.168.0.0/16"]);
        assert_eq!(cli.exclude_filter, vec!["10.1.0.0/16"]);
        assert_eq!(cli.mask_type, MaskStyle::Wildcard);
        assert_eq!(cli.subnet, vec!["10.0.0.0/24", "10.0.1.0/24"]);
    }

    #[test]
    fn test_sort_flags_conflict() {
        assert!(Cli::try_parse_from(["ip-aggregator", "-S", "-R", "10.0.0.0/8"]).is_err());
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["ip-aggregator", "-vv", "10.0.0.0/8"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
