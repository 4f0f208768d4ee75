use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use ffimath::{BindingConfig, FfiMathError};

#[derive(Parser)]
#[command(name = "ffimath")]
#[command(about = "Arithmetic demo library and SWIG binding generator")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add two integers (wrapping)
    Add {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },

    /// Multiply two doubles
    #[command(alias = "mul")]
    Multiply {
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Compute n!
    #[command(alias = "fact")]
    Factorial {
        #[arg(allow_negative_numbers = true)]
        n: i32,

        /// Fail on overflow instead of wrapping
        #[arg(long)]
        checked: bool,
    },

    /// Compute the nth Fibonacci number
    #[command(alias = "fib")]
    Fibonacci {
        #[arg(allow_negative_numbers = true)]
        n: i32,

        /// Use the naive recursive algorithm
        #[arg(long, conflicts_with = "checked")]
        recursive: bool,

        /// Fail on overflow instead of wrapping
        #[arg(long)]
        checked: bool,
    },

    /// Print or write the C header
    Header {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the C header and SWIG interface file
    Interface {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show version and exported symbols
    Info,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> ffimath::Result<BindingConfig> {
    BindingConfig::discover(path, Path::new("."))
}

fn run(command: Commands) -> ffimath::Result<()> {
    match command {
        Commands::Add { a, b } => println!("{}", ffimath::add(a, b)),

        Commands::Multiply { a, b } => println!("{}", ffimath::multiply(a, b)),

        Commands::Factorial { n, checked } => {
            let value = if checked {
                ffimath::checked_factorial(n)?
            } else {
                ffimath::factorial(n)?
            };
            println!("{value}");
        }

        Commands::Fibonacci {
            n,
            recursive,
            checked,
        } => {
            let value = if recursive {
                ffimath::fibonacci_recursive(n)
            } else if checked {
                ffimath::checked_fibonacci(n)?
            } else {
                ffimath::fibonacci(n)
            };
            println!("{value}");
        }

        Commands::Header { config, output } => {
            let config = load_config(config.as_deref())?;
            let header = ffimath::generate_header(&config);
            match output {
                Some(path) => {
                    fs::write(&path, header)?;
                    println!("📝 Header: {}", path.display());
                }
                None => print!("{header}"),
            }
        }

        Commands::Interface { config, output_dir } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            for file in ffimath::write_bindings(&config)? {
                println!("📦 {}", file.path.display());
            }
        }

        Commands::Info => {
            println!("ffimath v{}", ffimath::version());
            println!("Arithmetic demo library with C ABI exports");
            println!();
            println!("Exported functions:");
            println!("  int    add(int a, int b)");
            println!("  double multiply(double a, double b)");
            println!("  int    factorial(int n)      -1 for negative n");
            println!("  int    fibonacci(int n)      0 for n <= 0");
            #[cfg(not(target_os = "windows"))]
            {
                println!();
                println!("Shared library: {}", ffimath::library_file_name());
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        match e {
            FfiMathError::TomlParse(parse_err) => {
                eprintln!("❌ Invalid config syntax:");
                eprintln!("   {parse_err}");
            }
            _ => eprintln!("❌ {e}"),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn every_subcommand_has_help_text() {
        let command = Cli::command();
        command.clone().debug_assert();
        for sub in command.get_subcommands() {
            assert!(
                sub.get_about().is_some(),
                "subcommand '{}' has no description",
                sub.get_name()
            );
        }
    }
}
