//! bmpfx - apply one image filter to an uncompressed 24-bit BMP
//!
//! Reads the input bitmap, applies exactly one of grayscale, reflect, blur
//! or edges, and writes the result. Each failure category exits with its
//! own status code (see [`exit::ExitStatus`]).

use clap::{ArgAction, ArgGroup, Args, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit;

use bmpfx_ops::Filter;
use exit::ExitStatus;

#[derive(Parser, Debug)]
#[command(name = "bmpfx")]
#[command(author, version, about = "Apply an image filter to an uncompressed 24-bit BMP")]
#[command(long_about = "
Apply exactly one filter to an uncompressed 24-bit BMP file.

Examples:
  bmpfx -g in.bmp out.bmp       # Grayscale
  bmpfx -r in.bmp out.bmp       # Mirror left-to-right
  bmpfx -b in.bmp out.bmp       # 3x3 box blur
  bmpfx -e in.bmp out.bmp       # Sobel edges
  bmpfx -vv -e in.bmp out.bmp   # With debug logging on stderr

Exit status:
  0 success, 1 usage, 2 cannot open input, 3 cannot create output,
  4 malformed header, 5 unsupported format, 6 out of memory,
  7 read error, 8 write error
")]
struct Cli {
    #[command(flatten)]
    args: FilterArgs,

    /// Verbose logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("filter")
        .required(true)
        .args(["grayscale", "reflect", "blur", "edges"])
))]
struct FilterArgs {
    /// Grayscale: each pixel becomes the mean of its channels
    #[arg(short = 'g', long)]
    grayscale: bool,

    /// Reflect: mirror each row left-to-right
    #[arg(short = 'r', long)]
    reflect: bool,

    /// Blur: 3x3 box blur
    #[arg(short = 'b', long)]
    blur: bool,

    /// Edges: Sobel gradient magnitude
    #[arg(short = 'e', long)]
    edges: bool,

    /// Input BMP
    input: PathBuf,

    /// Output BMP
    output: PathBuf,
}

impl FilterArgs {
    /// The selected filter. The argument group guarantees exactly one.
    fn filter(&self) -> Option<Filter> {
        [
            (self.grayscale, Filter::Grayscale),
            (self.reflect, Filter::Reflect),
            (self.blur, Filter::Blur),
            (self.edges, Filter::Edges),
        ]
        .into_iter()
        .find_map(|(on, filter)| on.then_some(filter))
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be set when embedded; keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return exit::parse_status(&e).into();
        }
    };

    init_logging(cli.verbose);

    match commands::filter::run(cli.args) {
        Ok(()) => ExitStatus::Success.into(),
        Err(err) => {
            let status = ExitStatus::from_error(&err);
            tracing::debug!(code = status.code(), "exiting on error");
            eprintln!("error: {err:#}");
            status.into()
        }
    }
}
