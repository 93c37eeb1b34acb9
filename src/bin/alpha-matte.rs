use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

use alpha_matte::{
    default_output_path, process_chroma_key_file, process_difference_files, process_directory,
    BackgroundSpec, ProcessOptions, ProcessResult, DEFAULT_TOLERANCE,
};

#[derive(Parser)]
#[command(
    name = "alpha-matte",
    about = "Recover transparency for images rendered on a solid background",
    version,
    after_help = "Simple usage: alpha-matte key <image>  (auto-detect background from corners)\n\n\
                  Output is always PNG."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    log: LogArgs,
}

#[derive(Args)]
struct LogArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Key out a solid background color from one image
    Key {
        /// Input image file or directory
        input: String,

        /// Output file or directory (default: {name}_transparent.png)
        #[arg(short, long)]
        output: Option<String>,

        /// Background color: auto, white, black or #RRGGBB
        #[arg(short, long, default_value = "auto")]
        background: String,

        /// Color distance below which pixels become transparent (0-255)
        #[arg(short, long, default_value_t = DEFAULT_TOLERANCE, allow_negative_numbers = true)]
        tolerance: i32,
    },

    /// Recover alpha from renders over pure white and pure black
    Diff {
        /// Image rendered over white
        white: String,

        /// Image rendered over black
        black: String,

        /// Output file (default: {white}_transparent.png)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_logging(log: &LogArgs) {
    let level = if log.verbose {
        Level::DEBUG
    } else if log.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log);

    let results = match cli.command {
        Command::Key {
            input,
            output,
            background,
            tolerance,
        } => {
            let background: BackgroundSpec = match background.parse() {
                Ok(spec) => spec,
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
            let opts = ProcessOptions {
                background,
                tolerance,
                verbose: cli.log.verbose,
                quiet: cli.log.quiet,
            };
            run_key(&input, output.as_deref(), &opts)
        }
        Command::Diff {
            white,
            black,
            output,
        } => {
            let white = Path::new(&white);
            let output = output.map_or_else(|| default_output_path(white), PathBuf::from);
            vec![process_difference_files(white, Path::new(&black), &output)]
        }
    };

    let opts = ProcessOptions {
        verbose: cli.log.verbose,
        quiet: cli.log.quiet,
        ..ProcessOptions::default()
    };

    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, &opts);
        if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn run_key(input: &str, output: Option<&str>, opts: &ProcessOptions) -> Vec<ProcessResult> {
    let input_path = Path::new(input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {input}");
        process::exit(1);
    }

    if !opts.quiet {
        eprintln!(
            "Background: {}, tolerance: {}",
            opts.background, opts.tolerance
        );
        eprintln!();
    }

    if input_path.is_dir() {
        let Some(output_dir) = output.map(PathBuf::from) else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: alpha-matte key <input_dir> -o <output_dir>");
            process::exit(1);
        };
        process_directory(input_path, &output_dir, opts)
    } else {
        let output_path = output.map_or_else(|| default_output_path(input_path), PathBuf::from);
        vec![process_chroma_key_file(input_path, &output_path, opts)]
    }
}

fn print_result(result: &ProcessResult, opts: &ProcessOptions) {
    if opts.quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        if !opts.quiet {
            match result.background {
                Some(color) => eprintln!("[OK] {filename} (background {color})"),
                None => eprintln!("[OK] {filename}"),
            }
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }

    if opts.verbose && !result.message.is_empty() {
        eprintln!("  -> {}", result.message);
    }
}
