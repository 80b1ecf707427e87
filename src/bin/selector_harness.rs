use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use partio_kit::config::{KitConfig, KitConfigOverrides};
use partio_kit::harness::{load_fixture, run_fixture_with, HarnessReport};
use partio_kit::selector::DialogPolicy;

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("[selector-harness] error: {err:?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let opts = parse_args()?;
    let fixture = load_fixture(&opts.fixture)?;
    let mut config = match &opts.config {
        Some(path) => KitConfig::load(path)?,
        None => KitConfig::default(),
    };
    config.apply_overrides(&KitConfigOverrides { dialog_policy: opts.policy });
    let report = run_fixture_with(&fixture, config.selector.dialog_policy);

    if let Some(path) = &opts.write_output {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating output directory '{}'", parent.display()))?;
            }
        }
        let file = File::create(path)
            .with_context(|| format!("writing harness report to '{}'", path.display()))?;
        serde_json::to_writer_pretty(file, &report).context("serializing harness report")?;
        println!("[selector-harness] wrote {}", path.display());
    }

    if let Some(path) = &opts.check_golden {
        let file = File::open(path)
            .with_context(|| format!("opening golden file '{}'", path.display()))?;
        let expected: HarnessReport =
            serde_json::from_reader(file).context("parsing golden JSON")?;
        if expected != report {
            bail!(
                "golden mismatch for {} (use --write-output to refresh):\nexpected: {}\nactual:   {}",
                opts.fixture.display(),
                serde_json::to_string(&expected).unwrap_or_default(),
                serde_json::to_string(&report).unwrap_or_default(),
            );
        }
        println!("[selector-harness] matched golden {}", path.display());
    } else if opts.write_output.is_none() {
        serde_json::to_writer_pretty(std::io::stdout(), &report)?;
        println!();
    }

    Ok(())
}

struct CliOptions {
    fixture: PathBuf,
    config: Option<PathBuf>,
    policy: Option<DialogPolicy>,
    write_output: Option<PathBuf>,
    check_golden: Option<PathBuf>,
}

fn parse_args() -> Result<CliOptions> {
    let mut fixture = None;
    let mut config = None;
    let mut policy = None;
    let mut write_output = None;
    let mut check_golden = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fixture" | "-f" => fixture = args.next().map(PathBuf::from),
            "--config" | "-c" => config = args.next().map(PathBuf::from),
            "--policy" | "-p" => {
                let Some(name) = args.next() else { return Err(anyhow!("--policy needs a value")); };
                policy = Some(parse_policy(&name)?);
            }
            "--write-output" | "-o" => write_output = args.next().map(PathBuf::from),
            "--golden" | "-g" => check_golden = args.next().map(PathBuf::from),
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                return Err(anyhow!("unknown argument '{other}'"));
            }
        }
    }
    let Some(fixture) = fixture else { return Err(anyhow!("--fixture <path> is required")); };
    Ok(CliOptions { fixture, config, policy, write_output, check_golden })
}

fn parse_policy(name: &str) -> Result<DialogPolicy> {
    match name {
        "follow_mode_channel" => Ok(DialogPolicy::FollowModeChannel),
        "always_save" => Ok(DialogPolicy::AlwaysSave),
        other => Err(anyhow!("unknown policy '{other}' (expected follow_mode_channel or always_save)")),
    }
}

fn print_help() {
    println!("Usage: selector_harness --fixture <path> [--config <path>] [--policy <name>] [--golden <path>] [--write-output <path>]");
    println!("  -f, --fixture        Path to a selector fixture JSON file");
    println!("  -c, --config         Optional kit config JSON");
    println!("  -p, --policy         Dialog policy override: follow_mode_channel | always_save");
    println!("  -g, --golden         Optional golden report to compare against");
    println!("  -o, --write-output   Optional path to write the actual report JSON");
}
