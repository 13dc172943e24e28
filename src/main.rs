use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use pbk_screening::{IdComparison, ScreeningConfig, ScreeningReport, ScreeningRepository};

/// Prints library log lines to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn cli() -> Command {
    Command::new("pbk-screening")
        .version(pbk_screening::VERSION)
        .about("Classifies student coursework by subject category and bins students for review")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log per-row decisions"),
        )
        .subcommand(
            Command::new("screen")
                .about("Build the screening report")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("Configuration file path")
                        .default_value("screening.toml"),
                )
                .arg(
                    Arg::new("data-dir")
                        .short('d')
                        .long("data-dir")
                        .value_name("DIR")
                        .help("Directory holding the CSV exports (overrides config)"),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_parser(["csv", "json"])
                        .default_value("json")
                        .help("Output format"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write the report here instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("check-pids")
                .about("Find ids present in one CSV but not the other")
                .arg(Arg::new("file1").required(true).help("Path to the first CSV file"))
                .arg(Arg::new("file2").required(true).help("Path to the second CSV file")),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    match matches.subcommand() {
        Some(("screen", sub)) => run_screen(sub),
        Some(("check-pids", sub)) => run_check_pids(sub),
        _ => bail!("unknown command"),
    }
}

fn run_screen(args: &ArgMatches) -> Result<()> {
    let config_path = args
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("screening.toml");

    let mut config = if Path::new(config_path).exists() {
        eprintln!("📋 Loading configuration from: {}", config_path);
        ScreeningConfig::load_from_file(config_path)?
    } else {
        eprintln!("📝 No configuration at {}, using defaults", config_path);
        ScreeningConfig::default()
    };

    if let Some(dir) = args.get_one::<String>("data-dir") {
        config.data.directory = PathBuf::from(dir);
    }

    eprintln!("📂 Reading exports from: {}", config.data.directory.display());
    let repo = ScreeningRepository::open(config.data.clone());

    let rules = repo.rules();
    if rules.is_empty() {
        eprintln!("⚠️  No classification rules loaded; every course will be uncategorized");
    } else {
        eprintln!("✓ Loaded {} classification rules", rules.len());
    }
    eprintln!("✓ Loaded {} students", repo.students().len());

    let report = ScreeningReport::build(&repo, &config.policy);
    eprintln!("✓ {}", report.summary());

    let format = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("json");

    match args.get_one::<String>("output") {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
            write_report(&report, format, BufWriter::new(file))?;
            eprintln!("💾 Report written to {}", path);
        }
        None => write_report(&report, format, io::stdout().lock())?,
    }

    Ok(())
}

fn write_report<W: Write>(report: &ScreeningReport, format: &str, mut out: W) -> Result<()> {
    match format {
        "csv" => report.write_roster_csv(out)?,
        _ => {
            writeln!(out, "{}", report.to_json()?).context("Failed to write report")?;
            out.flush().context("Failed to flush report")?;
        }
    }
    Ok(())
}

fn run_check_pids(args: &ArgMatches) -> Result<()> {
    let (Some(file1), Some(file2)) = (args.get_one::<String>("file1"), args.get_one::<String>("file2")) else {
        bail!("two CSV files are required");
    };

    let diff = IdComparison::from_files(file1, file2)?;

    if !diff.only_in_first.is_empty() {
        println!("--- IDs unique to {} ---", file1);
        for id in &diff.only_in_first {
            println!("{}", id);
        }
    }

    if !diff.only_in_second.is_empty() {
        if !diff.only_in_first.is_empty() {
            println!();
        }
        println!("--- IDs unique to {} ---", file2);
        for id in &diff.only_in_second {
            println!("{}", id);
        }
    }

    if diff.is_identical() {
        println!("✅ No unique IDs found. Both files contain the exact same IDs.");
    }

    Ok(())
}
