use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use partio_kit::sequence::{padding_width, SequencePattern};

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("[sequence-probe] error: {err:?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let opts = parse_args()?;
    let Some(pattern) = SequencePattern::from_path(&opts.path) else {
        bail!("'{}' has no parent directory to scan", opts.path.display());
    };
    let width = padding_width(opts.padding);
    println!(
        "[sequence-probe] prefix='{}' extension='{}' in {}",
        pattern.prefix(),
        pattern.extension(),
        pattern.parent().display(),
    );
    println!(
        "[sequence-probe] frame {} writes as {}",
        opts.frame,
        pattern.frame_file_name(opts.frame, width),
    );
    match pattern.resolve_frame(opts.frame)? {
        Some(found) => println!("[sequence-probe] resolved {}", found.display()),
        None => println!("[sequence-probe] no file on disk for frame {}", opts.frame),
    }
    Ok(())
}

struct CliOptions {
    path: PathBuf,
    frame: i64,
    padding: i64,
}

fn parse_args() -> Result<CliOptions> {
    let mut path = None;
    let mut frame = None;
    let mut padding = 0;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--path" | "-p" => path = args.next().map(PathBuf::from),
            "--frame" | "-f" => {
                let Some(value) = args.next() else { return Err(anyhow!("--frame needs a value")); };
                frame = Some(value.parse().with_context(|| format!("parsing frame '{value}'"))?);
            }
            "--padding" => {
                let Some(value) = args.next() else { return Err(anyhow!("--padding needs a value")); };
                padding = value.parse().with_context(|| format!("parsing padding '{value}'"))?;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                return Err(anyhow!("unknown argument '{other}'"));
            }
        }
    }
    let Some(path) = path else { return Err(anyhow!("--path <cache path> is required")); };
    let Some(frame) = frame else { return Err(anyhow!("--frame <number> is required")); };
    Ok(CliOptions { path, frame, padding })
}

fn print_help() {
    println!("Usage: sequence_probe --path <cache path> --frame <number> [--padding <0-4>]");
    println!("  -p, --path      Cache channel value, e.g. caches/burst.####.bin");
    println!("  -f, --frame     Frame number to resolve");
    println!("      --padding   Padding channel value used for the write name (default 0)");
}
