use clap::Parser;
use colored::Colorize;
use ip_aggregator::cli::Cli;
use ip_aggregator::config::{verbosity_level, ENV_LOG_CONFIG, LOG_CONFIG_FILE};
use ip_aggregator::input::AliasTable;
use ip_aggregator::{list_classes, run_app};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::io;
use std::path::Path;

/// Log to stderr at the level picked by `-v`. Without `-v` the log4rs yaml
/// file is used when there is one, otherwise stderr at `warn`.
fn init_logging(verbose: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbosity_level(verbose) {
        Some(level) => level,
        None => {
            let config_file =
                std::env::var(ENV_LOG_CONFIG).unwrap_or_else(|_| LOG_CONFIG_FILE.to_string());
            if Path::new(&config_file).exists() {
                log4rs::init_file(&config_file, Default::default())?;
                return Ok(());
            }
            LevelFilter::Warn
        }
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Error initializing log4rs: {e}");
    }
    log::info!("#Start main()");

    let table = AliasTable::well_known();
    let result = if cli.list_classes {
        list_classes(&cli, &table, &mut io::stdout().lock())
    } else {
        run_app(&cli, &table, io::stdin().lock(), &mut io::stdout().lock()).map(|_| ())
    };

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
