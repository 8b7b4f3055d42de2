//! sqlc-csharp: generate C# data access code from query metadata.
//!
//! # Usage
//!
//! ```bash
//! # Read a request from stdin, print the response JSON
//! sqlc-csharp generate < request.json
//!
//! # Write files into a directory
//! sqlc-csharp generate --input request.json --out-dir gen/
//!
//! # Inspect an engine's type table
//! sqlc-csharp types --engine postgresql
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use sqlc_csharp::codegen::Generator;
use sqlc_csharp::fmt::render_type;
use sqlc_csharp::prelude::*;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlc-csharp")]
#[command(version)]
#[command(about = "C# code generation for sqlc-style query metadata", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlc-csharp generate < request.json
    sqlc-csharp generate -i request.json --engine postgresql --out-dir gen/
    sqlc-csharp types --engine sqlite")]
struct Cli {
    /// Verbose logging (overridden by SQLC_CSHARP_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate accessors from a request
    Generate(GenerateArgs),
    /// Show an engine's type alias table
    Types {
        #[arg(short, long, default_value = "mysql")]
        engine: Engine,
    },
    /// List supported engines
    Engines,
}

#[derive(Args)]
struct GenerateArgs {
    /// Request JSON file (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Config file (defaults to ./sqlc-csharp.toml, then the user config dir)
    #[arg(short, long, env = "SQLC_CSHARP_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, env = "SQLC_CSHARP_ENGINE")]
    engine: Option<Engine>,

    /// Namespace of the generated file
    #[arg(long)]
    namespace: Option<String>,

    /// Class holding the generated methods
    #[arg(long)]
    class_name: Option<String>,

    /// Generated file name
    #[arg(long)]
    output_file: Option<String>,

    /// What to do with a query that fails: abort or skip
    #[arg(long)]
    on_error: Option<FailurePolicy>,

    /// Write files here instead of printing a response to stdout
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

impl GenerateArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            engine: self.engine,
            namespace: self.namespace.clone(),
            class_name: self.class_name.clone(),
            output_file: self.output_file.clone(),
            on_error: self.on_error,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Types { engine } => {
            show_types(*engine);
            Ok(())
        }
        Commands::Engines => {
            show_engines();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "sqlc_csharp=debug" } else { "sqlc_csharp=warn" };
    let filter =
        EnvFilter::try_from_env("SQLC_CSHARP_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &GenerateArgs) -> Result<Config> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Config::discover(&std::env::current_dir()?),
    };
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Config::load(&path).with_context(|| format!("reading {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let mut config = load_config(args)?;

    let request = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            GenerateRequest::from_reader(file)
        }
        None => GenerateRequest::from_reader(io::stdin().lock()),
    }
    .context("reading request")?;

    config.apply(&request.options);
    config.apply(&args.overrides());
    config.validate()?;

    let generated = Generator::new(config).generate(&request.queries)?;
    for skipped in &generated.skipped {
        eprintln!(
            "{} skipped {}: {}",
            "⚠".yellow(),
            skipped.name.cyan(),
            skipped.error
        );
    }

    let response = GenerateResponse {
        files: vec![generated.file],
    };
    match &args.out_dir {
        Some(dir) => {
            for path in response.write_to_dir(dir)? {
                eprintln!("{} Wrote {}", "✓".green(), path.display().to_string().cyan());
            }
        }
        None => println!("{}", response.to_json()?),
    }
    Ok(())
}

fn show_types(engine: Engine) {
    let driver = engine.driver();
    println!(
        "{} {} ({})",
        "Type table:".cyan().bold(),
        engine.to_string().white().bold(),
        driver.client_type().dimmed()
    );
    println!();
    println!(
        "{:24} {:12} {:10} {}",
        "Raw type".white().bold(),
        "Family".white().bold(),
        "NOT NULL".white().bold(),
        "NULL".white().bold()
    );
    println!("{}", "─".repeat(60).dimmed());

    for (alias, family) in driver.aliases() {
        println!(
            "{:24} {:12} {:10} {}",
            alias.cyan(),
            family.name().yellow(),
            render_type(&family.resolve(true)),
            render_type(&family.resolve(false)).dimmed()
        );
    }
}

fn show_engines() {
    for engine in Engine::ALL {
        let driver = engine.driver();
        println!(
            "{:12} {} / {}",
            engine.name().cyan().bold(),
            driver.client_type(),
            driver.command_type().dimmed()
        );
    }
}
