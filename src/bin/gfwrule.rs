//! gfwrule: CLI tool for converting AutoProxy filter lists into routing rules.

use clap::{Parser, Subcommand};
use gfwrule::collector::count_by_type;
use gfwrule::{
    classify, render, Classification, FetchConfig, Handle, ItemType, OutputFormat, Rejection,
    DEFAULT_LIST_URL,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gfwrule")]
#[command(author = "Kaitu.io")]
#[command(version)]
#[command(about = "Convert AutoProxy (gfwlist) filter lists into IP, domain suffix and keyword rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a whole list from a file or URL
    Parse {
        /// Local list file (base64 envelope, optionally gzipped)
        #[arg(short, long, conflicts_with = "url")]
        input: Option<PathBuf>,

        /// List URL (defaults to the public gfwlist)
        #[arg(short, long)]
        url: Option<String>,

        /// Output format: text, json or clash
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Download timeout in seconds
        #[arg(short, long, default_value_t = 60)]
        timeout: u64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify individual rule lines
    Classify {
        /// Rule lines, e.g. '||google.com'
        #[arg(required = true)]
        lines: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            url,
            format,
            output,
            timeout,
            verbose,
        } => {
            let config = FetchConfig::new().with_timeout(Duration::from_secs(timeout));
            if let Err(e) = parse_list(input, url, &config, format, output, verbose) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Classify { lines } => classify_lines(&lines),
    }
}

fn parse_list(
    input: Option<PathBuf>,
    url: Option<String>,
    config: &FetchConfig,
    format: OutputFormat,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let handle = match input {
        Some(path) => {
            if verbose {
                eprintln!("Reading input file: {:?}", path);
            }
            Handle::open_offline(&path)?
        }
        None => {
            let url = url.unwrap_or_else(|| DEFAULT_LIST_URL.to_string());
            if verbose {
                eprintln!("Downloading: {}", url);
            }
            Handle::open_online_with_config(&url, config)?
        }
    };

    let mut rejections: Vec<Rejection> = Vec::new();
    let items = handle.read_items_with_sink(&mut rejections)?;

    if verbose {
        let counts = count_by_type(&items);
        eprintln!("Parsed {} items:", items.len());
        for item_type in ItemType::all() {
            eprintln!(
                "  {:<15} {}",
                item_type.as_str(),
                counts.get(&item_type).copied().unwrap_or(0)
            );
        }
        eprintln!("Rejected lines: {}", rejections.len());
    }
    for r in &rejections {
        log::info!("line {}: {}", r.line_no, r.error);
    }

    let rendered = render(&items, format)?;
    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            println!("Wrote {} items to {:?}", items.len(), path);
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn classify_lines(lines: &[String]) {
    for line in lines {
        match classify(line) {
            Ok(Classification::Item(item)) => println!("{}\t{}", line, item),
            Ok(Classification::Skip) => println!("{}\tskip", line),
            Err(e) => println!("{}\terror: {}", line, e),
        }
    }
}
