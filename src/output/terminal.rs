//! Terminal output utilities.
//!
//! Builds the informational banner, trailer and class listing printed
//! around the result unless quiet output is requested.

use super::render::{render_network, MaskStyle, Rendering};
use crate::config::{RULE, RULE_WIDTH};
use crate::input::AliasTable;
use crate::models::Network;
use colored::Colorize;

/// Horizontal rule of `width` copies of [`RULE`].
pub fn rule(width: usize) -> String {
    RULE.repeat(width)
}

/// Banner listing the input networks, followed by a rule.
pub fn input_banner(nets: &[Network], rendering: &Rendering, delimiter: &str) -> String {
    format!(
        "{} {} addresses: {}\n{}",
        "Input".bold(),
        nets.len(),
        rendering.list(nets, delimiter),
        rule(RULE_WIDTH)
    )
}

/// Trailer with the output count, preceded by a rule.
pub fn total_trailer(count: usize) -> String {
    format!("{}\n{count} subnets total", rule(RULE_WIDTH))
}

/// Listing of the alias table for `--list-classes`.
pub fn class_listing(table: &AliasTable, mask: MaskStyle) -> String {
    let mut lines = vec![
        "Recognised address class aliases.".to_string(),
        "These can be used alongside regular addresses in filters:".to_string(),
        rule(RULE_WIDTH * 2),
    ];
    for (alias, nets) in table.entries() {
        let nets: Vec<String> = nets.iter().map(|net| render_network(net, mask)).collect();
        lines.push(format!("{}\t{}", alias.to_string().green(), nets.join(",")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule() {
        assert_eq!(rule(3), "===");
        assert_eq!(rule(RULE_WIDTH).len(), RULE_WIDTH);
    }

    #[test]
    fn test_total_trailer() {
        colored::control::set_override(false);
        assert_eq!(total_trailer(2), format!("{}\n2 subnets total", "=".repeat(RULE_WIDTH)));
    }

    #[test]
    fn test_input_banner() {
        colored::control::set_override(false);
        let nets: Vec<Network> = vec!["10.0.0.0/8".parse().unwrap(), "10.1.0.0/16".parse().unwrap()];
        let banner = input_banner(&nets, &Rendering::default(), " ");
        assert!(banner.starts_with("Input 2 addresses: 10.0.0.0/8 10.1.0.0/16\n"));
    }

    #[test]
    fn test_class_listing() {
        colored::control::set_override(false);
        let listing = class_listing(&AliasTable::well_known(), MaskStyle::Net);
        assert!(listing.contains("A\t10.0.0.0/255.0.0.0"));
        assert!(listing.contains("U\t169.254.0.0/255.255.0.0"));
        assert_eq!(listing.lines().count(), 3 + 8);
    }
}
