use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use termcolor::ColorChoice;
use texindex::build::compile_files;
use texindex::document::{Destination, Fragment, MacroExpander};
use texindex::entry::parse_entry_str;
use texindex::output::{print_indexes, print_json};
use texindex::utils::config::{IndexConfig, get_config_path};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "texindex")]
#[command(about = "Compile document index entries into a sorted, grouped index")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Documents to compile (when no subcommand is given)
    files: Vec<PathBuf>,

    #[command(flatten)]
    options: BuildOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the index of one or more documents
    Build {
        /// TeX source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: BuildOptions,
    },
    /// Parse a single entry and show its parts
    Parse {
        /// Entry specification, e.g. 'fruit@Fruit!apple|textbf'
        entry: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Configuration file (defaults to the app config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Clone)]
struct BuildOptions {
    /// Number of columns per letter group
    #[arg(short, long)]
    columns: Option<usize>,

    /// Letters that get their own group
    #[arg(long)]
    alphabet: Option<String>,

    /// Index title
    #[arg(long)]
    title: Option<String>,

    /// Configuration file (defaults to the app config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    fn choice(self) -> ColorChoice {
        match self {
            ColorWhen::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
            ColorWhen::Auto | ColorWhen::Never => ColorChoice::Never,
            ColorWhen::Always => ColorChoice::Always,
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Build { files, options }) => build(&files, &options)?,
        Some(Commands::Parse { entry, json }) => show_entry(&entry, json)?,
        Some(Commands::Config { config }) => {
            let config = IndexConfig::load(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            if let Some(path) = get_config_path() {
                eprintln!("config path: {}", path.display());
            }
        }
        None => {
            if cli.files.is_empty() {
                bail!("no input files (see 'texindex --help')");
            }
            build(&cli.files, &cli.options)?;
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build(files: &[PathBuf], options: &BuildOptions) -> Result<()> {
    let mut config = IndexConfig::load(options.config.as_deref())?;
    if let Some(columns) = options.columns {
        config.index_columns = columns;
    }
    if let Some(alphabet) = &options.alphabet {
        config.alphabet = alphabet.clone();
    }
    if let Some(title) = &options.title {
        config.title = title.clone();
    }
    config.validate()?;

    let views = compile_files(files, &config)?;
    if options.json {
        print_json(&views)?;
    } else {
        print_indexes(&views, options.color.choice())?;
    }
    Ok(())
}

fn show_entry(source: &str, json: bool) -> Result<()> {
    let node = Destination::new("entry").into_ref();
    let entry = parse_entry_str(source, &MacroExpander::default(), node);
    let keys: Vec<String> = entry.key.iter().map(Fragment::source).collect();
    let format = entry.format.as_ref().map(Fragment::source);

    if json {
        let value = serde_json::json!({
            "key": keys,
            "sort_key": entry.sort_key,
            "format": format,
            "type": entry.entry_type,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("key:      {}", keys.join(" ! "));
        println!("sort key: {}", entry.sort_key.join(" ! "));
        println!("format:   {}", format.as_deref().unwrap_or("-"));
        println!("type:     {:?}", entry.entry_type);
    }
    Ok(())
}
