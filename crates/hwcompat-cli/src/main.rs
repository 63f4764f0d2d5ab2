//! hwcompat - Hardware Compatibility Checker CLI
//!
//! Reads a hardware profile produced by a hardware sniffer and reports the
//! macOS releases the machine can run.
//!
//! ## Commands
//!
//! - `check`: Evaluate a profile and print the annotated profile or a summary
//! - `kexts`: Evaluate a profile and list the kexts usable on its range
//! - `layouts`: Show the AppleALC layout ids of an audio codec

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hwcompat_core::{
    check_compatibility, CompatibilityReport, CompatibilityVerdict, EngineConfig, HardwareProfile,
};
use hwcompat_data::{codec_vendor, normalize_id, KextCatalog, KextInfo, ReferenceTables};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "hwcompat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decide which macOS releases a machine can run", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a hardware profile
    Check {
        /// Path to the hardware profile (JSON)
        profile: PathBuf,

        /// Reference tables to evaluate against (default: built-in)
        #[arg(short, long, env = "HWCOMPAT_REFERENCE_DATA")]
        reference: Option<PathBuf>,

        /// Write the annotated profile here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a human-readable summary instead of JSON
        #[arg(short, long)]
        summary: bool,
    },

    /// List the kexts usable on a profile's supported range
    Kexts {
        /// Path to the hardware profile (JSON)
        profile: PathBuf,

        /// Reference tables to evaluate against (default: built-in)
        #[arg(short, long, env = "HWCOMPAT_REFERENCE_DATA")]
        reference: Option<PathBuf>,

        /// Resolve an install set from these kexts plus the required ones
        #[arg(long = "select", value_name = "KEXT")]
        select: Vec<String>,
    },

    /// Show the layout ids of an audio codec
    Layouts {
        /// Codec id, e.g. 10EC-0897
        codec_id: String,

        /// Reference tables whose codec catalog to use (default: built-in)
        #[arg(short, long, env = "HWCOMPAT_REFERENCE_DATA")]
        reference: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    hwcompat_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Check {
            profile,
            reference,
            output,
            summary,
        } => cmd_check(&profile, reference.as_deref(), output.as_deref(), summary),
        Commands::Kexts {
            profile,
            reference,
            select,
        } => cmd_kexts(&profile, reference.as_deref(), &select),
        Commands::Layouts {
            codec_id,
            reference,
        } => cmd_layouts(&codec_id, reference.as_deref()),
    }
}

/// Evaluate a profile and print the annotated profile or a summary
fn cmd_check(
    profile: &Path,
    reference: Option<&Path>,
    output: Option<&Path>,
    summary: bool,
) -> Result<()> {
    let report = evaluate(profile, reference)?;

    let rendered = if summary {
        render_summary(&report.verdict)
    } else {
        serde_json::to_string_pretty(&report.profile)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write {:?}", path))?;
            info!(path = %path.display(), "annotated profile written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Evaluate a profile and list kexts for its range
fn cmd_kexts(profile: &Path, reference: Option<&Path>, select: &[String]) -> Result<()> {
    let report = evaluate(profile, reference)?;
    let range = report.verdict.macos_version;
    let catalog = KextCatalog::builtin();

    let kexts: Vec<&KextInfo> = if select.is_empty() {
        catalog.available_for(range.min_version, range.max_version)
    } else {
        let names: Vec<&str> = select.iter().map(String::as_str).collect();
        catalog
            .resolve(&names, range.min_version, range.max_version)
            .context("Failed to resolve kext selection")?
    };

    if kexts.is_empty() {
        println!("No kexts available: no supported macOS release.");
        return Ok(());
    }
    for kext in kexts {
        println!("{}", render_kext(kext));
    }
    Ok(())
}

/// Show the layout ids of a codec
fn cmd_layouts(codec_id: &str, reference: Option<&Path>) -> Result<()> {
    let tables = load_reference(reference)?;
    let codec_id = normalize_id(codec_id);
    let vendor = codec_vendor(&codec_id).unwrap_or("Unknown vendor");

    match tables.codecs.layout_ids(&codec_id) {
        Some(layouts) => {
            let ids: Vec<String> = layouts.iter().map(u16::to_string).collect();
            println!("{} ({}): {}", codec_id, vendor, ids.join(", "));
        }
        None => println!("{} ({}): no known layouts", codec_id, vendor),
    }
    Ok(())
}

fn evaluate(profile: &Path, reference: Option<&Path>) -> Result<CompatibilityReport> {
    let content = std::fs::read_to_string(profile)
        .with_context(|| format!("Failed to read hardware profile: {:?}", profile))?;
    let hardware = HardwareProfile::from_json_str(&content)
        .with_context(|| format!("Invalid hardware profile in {:?}", profile))?;
    let tables = load_reference(reference)?;

    check_compatibility(&hardware, &tables, &EngineConfig::from_env())
        .with_context(|| format!("Failed to evaluate {:?}", profile))
}

fn load_reference(path: Option<&Path>) -> Result<ReferenceTables> {
    match path {
        Some(path) => ReferenceTables::load(path)
            .with_context(|| format!("Failed to load reference data from {:?}", path)),
        None => Ok(ReferenceTables::builtin()),
    }
}

fn render_summary(verdict: &CompatibilityVerdict) -> String {
    let mut lines = Vec::new();

    let releases = verdict.supported_releases();
    match (releases.first(), releases.last()) {
        (Some(oldest), Some(newest)) if verdict.is_supported() => {
            lines.push(format!("Supported: {} .. {}", oldest, newest));
        }
        _ => lines.push("Supported: none".to_string()),
    }

    if verdict.unsupported_devices.is_empty() {
        lines.push("Unsupported devices: none".to_string());
    } else {
        lines.push("Unsupported devices:".to_string());
        for device in &verdict.unsupported_devices {
            lines.push(format!("  - {}", device));
        }
    }
    lines.join("\n")
}

fn render_kext(kext: &KextInfo) -> String {
    let marker = if kext.required { "*" } else { " " };
    format!("{} {:<24} {}", marker, kext.name, kext.description)
}
