//! Extraction of IPv4 networks from free-form text.
//!
//! Only IPv4 is recognised. A candidate is a dotted quad with an optional
//! `/len` or `/netmask` suffix, followed by a non-digit or the end of line.
//! Digits are ASCII `0-9` only; other Unicode digits act as separators.
//! Tokens that look right but do not parse are skipped with a warning.

use super::parse::parse_network;
use crate::models::Network;
use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::io::BufRead;

lazy_static! {
    static ref IP4_REGEX: Regex = Regex::new(concat!(
        r"([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}",
        r"(?:/[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}|/3[0-2]|/[1-2][0-9]|/[0-9])?)",
        r"(?:[^0-9]|$)",
    ))
    .expect("Invalid Regex?");
}

/// All IPv4-looking tokens in `line`, in order of appearance.
pub fn scan_line(line: &str) -> Vec<&str> {
    IP4_REGEX
        .captures_iter(line)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Read `reader` line by line and parse every token found.
///
/// Invalid tokens are logged and skipped; only I/O errors fail.
pub fn scan_reader<R: BufRead>(reader: R) -> Result<Vec<Network>, Box<dyn Error>> {
    let mut nets = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        for token in scan_line(&line) {
            match parse_network(token) {
                Ok(net) => nets.push(net),
                Err(e) => {
                    log::warn!(
                        "{warning}: Address {token} from stdin line {n} is not a valid IPv4 address or network, ignoring ({e})",
                        warning = "WARNING".on_red(),
                        n = line_no + 1,
                    );
                }
            }
        }
    }
    log::info!("Read {} networks from stdin", nets.len());
    Ok(nets)
}
