//! Extract, filter, sort, and aggregate IP networks into larger supernets.
//!
//! The engine lives in [`processing`] and works on the value types in
//! [`models`]. [`input`] and [`output`] convert from and to text at the
//! boundary; [`run_app`] wires everything together for the binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;

use cli::Cli;
use colored::Colorize;
use config::{Settings, RULE_WIDTH};
use input::{parse_item, resolve_filter, scan_reader, AliasTable};
use models::Network;
use processing::{run, Aggregation, InputItem};
use std::error::Error;
use std::io::{BufRead, Write};

/// Collect the positional inputs, plus networks scanned from `stdin` when
/// requested. A malformed positional argument aborts the run.
pub fn collect_inputs<R: BufRead>(
    cli: &Cli,
    stdin: Option<R>,
) -> Result<Vec<InputItem>, Box<dyn Error>> {
    let mut items: Vec<InputItem> = match stdin {
        Some(reader) => scan_reader(reader)?.into_iter().map(InputItem::from).collect(),
        None => Vec::new(),
    };
    for token in &cli.subnet {
        let item = parse_item(token).map_err(|e| {
            format!("Supplied argument {token} is not a valid IPv4 or IPv6 network or range: {e}")
        })?;
        items.push(item);
    }
    Ok(items)
}

/// Resolve include or exclude filter arguments, expanding class aliases.
pub fn collect_filters(
    tokens: &[String],
    kind: &str,
    table: &AliasTable,
) -> Result<Vec<Network>, Box<dyn Error>> {
    let mut nets = Vec::new();
    for token in tokens {
        let resolved = resolve_filter(token, table).map_err(|e| {
            format!("Supplied argument {kind} {token} is not a valid IPv4 or IPv6 network: {e}")
        })?;
        nets.extend(resolved);
    }
    Ok(nets)
}

/// Run the aggregator for parsed arguments, writing the result to `out`.
///
/// `stdin` is only read when `--stdin` was given.
pub fn run_app<R: BufRead, W: Write>(
    cli: &Cli,
    table: &AliasTable,
    stdin: R,
    out: &mut W,
) -> Result<Aggregation, Box<dyn Error>> {
    let settings = Settings::from_cli(cli);

    let items = collect_inputs(cli, settings.read_stdin.then_some(stdin))?;
    let includes = collect_filters(&cli.include_filter, "include", table)?;
    let excludes = collect_filters(&cli.exclude_filter, "exclude", table)?;
    let aggregation = run(&items, &includes, &excludes, &settings.pipeline)?;

    if !settings.quiet {
        writeln!(
            out,
            "{}",
            output::input_banner(&aggregation.inputs, &settings.rendering, &settings.delimiter)
        )?;
        if !settings.pipeline.aggregate {
            eprintln!(
                "{}\n{}",
                "Not aggregating subnets as requested.".yellow(),
                output::rule(RULE_WIDTH)
            );
        }
    }

    if settings.count_only {
        writeln!(out, "{}", aggregation.output_count())?;
    } else {
        let text = settings.rendering.render(
            &aggregation.networks,
            settings.format,
            &settings.delimiter,
        )?;
        writeln!(out, "{text}")?;
    }

    if !settings.quiet {
        writeln!(out, "{}", output::total_trailer(aggregation.output_count()))?;
    }
    Ok(aggregation)
}

/// Write the alias table for `--list-classes`.
pub fn list_classes<W: Write>(cli: &Cli, table: &AliasTable, out: &mut W) -> Result<(), Box<dyn Error>> {
    writeln!(out, "{}", output::class_listing(table, cli.mask_type))?;
    Ok(())
}
