//! Doping Scatter CLI
//!
//! Usage:
//!   doping-scatter [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --stylesheet <FILE>  Stylesheet file for the colour palette (TOML format)
//!   -c, --config <FILE>      Chart geometry overrides (TOML format)
//!   -o, --output <FILE>      Write to a file instead of stdout
//!   --svg                    Emit a bare SVG chart instead of HTML
//!   --show-time              Show the real time in tooltips instead of XX:YY
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use doping_scatter::{
    render_svg, render_with_config, ChartConfig, RenderConfig, RenderError, Stylesheet, SvgConfig,
    TooltipTime,
};

#[derive(Parser)]
#[command(name = "doping-scatter")]
#[command(about = "Scatterplot of race times vs. finishing place, coloured by doping allegations")]
struct Cli {
    /// Input JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Stylesheet file for the colour palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Chart geometry overrides (TOML format, `[chart]` table)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a bare SVG chart without page text or tooltip
    #[arg(long)]
    svg: bool,

    /// Show the rider's time in tooltips instead of the XX:YY placeholder
    #[arg(long)]
    show_time: bool,

    /// Emit only the chart fragment, not a full document
    #[arg(long)]
    fragment: bool,

    /// Id of the chart container
    #[arg(long, default_value = "chart")]
    id_prefix: String,

    /// Log level: trace, debug, info, warn or error
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref());

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    let chart = match &cli.config {
        Some(path) => match ChartConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ChartConfig::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let tooltip_time = if cli.show_time {
        TooltipTime::Actual
    } else {
        TooltipTime::Placeholder
    };
    let config = RenderConfig::new()
        .with_chart(chart)
        .with_svg(SvgConfig::default().with_standalone(!cli.fragment))
        .with_stylesheet(stylesheet)
        .with_tooltip_time(tooltip_time)
        .with_id_prefix(cli.id_prefix);

    let result = if cli.svg {
        render_svg(&source, config)
    } else {
        render_with_config(&source, config)
    };

    let output = match result {
        Ok(out) => out,
        Err(RenderError::Data(e)) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                std::process::exit(1);
            }
            info!(path = %path.display(), bytes = output.len(), "wrote chart");
        }
        None => println!("{}", output),
    }
}

fn setup_logging(log_level: Option<&str>) {
    let level = match log_level.unwrap_or("warn").to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // stdout carries the markup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.to_string()))
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn print_intro() {
    println!(
        r#"Doping Scatter - race times vs. finishing place

USAGE:
    doping-scatter [OPTIONS] [FILE]
    cat cyclist_data.json | doping-scatter > chart.html

OPTIONS:
    -s, --stylesheet   Custom colour palette (TOML file)
    -c, --config       Chart geometry overrides (TOML file)
    -o, --output       Write to a file instead of stdout
    --svg              Bare SVG chart, no page text or tooltip
    --fragment         Chart fragment only, no surrounding document
    --show-time        Real times in tooltips instead of XX:YY
    --id-prefix        Id of the chart container (default: chart)
    -l, --log-level    trace, debug, info, warn or error (default: warn)
    -h, --help         Print help

INPUT:
    A JSON array of records with time ("MM:SS"), place, name,
    nationality, year and doping (empty string when clean)."#
    );
}
