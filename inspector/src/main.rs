use std::fmt::{self, Write};

use clap::{Parser, Subcommand};
use spoof_catalog::{catalog, AndroidVersion, DeviceEntry, FeatureSet};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect the device spoofing catalog", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every device with its feature level and android version
    Devices,
    /// Show what would be spoofed for one device
    Device { name: String },
    /// List android versions
    Versions,
    /// List feature sets, optionally only up to a level
    Features {
        #[arg(short, long)]
        up_to: Option<String>,
    },
    /// Show the default device and default feature sets
    Defaults,
    /// Report catalog inconsistencies
    Check,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("Running {:?}", args.command);

    match args.command {
        Command::Devices => print!("{}", render_devices(&catalog::device_names())?),
        Command::Device { name } => {
            let Some(device) = catalog::device_by_name(Some(name.as_str())) else {
                anyhow::bail!("Unknown device {:?}", name);
            };
            print!("{}", render_device(device)?);
        }
        Command::Versions => {
            let versions: Vec<AndroidVersion> = catalog::android_version_labels()
                .into_iter()
                .filter_map(catalog::version_from_label)
                .collect();
            print!("{}", render_versions(&versions)?);
        }
        Command::Features { up_to } => {
            let features = match up_to {
                Some(level) => {
                    let features = catalog::features_up_to(&level);
                    if features.is_empty() {
                        anyhow::bail!("Unknown feature level {:?}", level);
                    }
                    features
                }
                None => spoof_catalog::features::FEATURES.to_vec(),
            };
            print!("{}", render_features(&features)?);
        }
        Command::Defaults => {
            println!("Default device: {}", catalog::default_device_name());
            let features = catalog::default_features();
            if features.is_empty() {
                println!("Default features: (none)");
            } else {
                print!("{}", render_features(features)?);
            }
        }
        Command::Check => {
            let issues = catalog::check();
            if issues.is_empty() {
                println!("Catalog is consistent.");
                return Ok(());
            }
            for issue in &issues {
                println!("- {}", issue);
            }
            anyhow::bail!("{} catalog issue(s) found", issues.len());
        }
    }

    Ok(())
}

fn render_devices(names: &[&str]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for device in names.iter().filter_map(|&n| catalog::device_by_name(Some(n))) {
        let version = device.android_version.map_or("-", |v| v.label);
        writeln!(
            out,
            "{:<16} level={:<16} version={}",
            device.device_name, device.feature_level_name, version
        )?;
    }
    Ok(out)
}

fn render_device(device: &DeviceEntry) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", device.device_name)?;

    writeln!(out, "props:")?;
    let props = device.props_map();
    if props.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (key, value) in props {
        writeln!(out, "  {} = {}", key, value)?;
    }

    match device.android_version {
        Some(version) => {
            writeln!(out, "android version: {}", version.label)?;
            for (field, value) in version.as_map() {
                writeln!(out, "  {} = {}", field, value)?;
            }
        }
        None => {
            writeln!(out, "android version: (unchanged)")?;
        }
    }

    let features = catalog::features_for_device(Some(device.device_name));
    writeln!(out, "feature level: {}", device.feature_level_name)?;
    if features.is_empty() {
        writeln!(out, "  (no matching feature sets)")?;
    }
    for name in &features {
        writeln!(out, "  {}", name)?;
    }
    for flag in catalog::feature_flags_for(features.iter().copied()) {
        writeln!(out, "  flag {}", flag)?;
    }
    Ok(out)
}

fn render_versions(versions: &[AndroidVersion]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for v in versions {
        writeln!(out, "{:<12} release={:<6} sdk={}", v.label, v.release, v.sdk)?;
    }
    Ok(out)
}

fn render_features(features: &[FeatureSet]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for f in features {
        writeln!(out, "{}", f.display_name)?;
        for flag in f.feature_flags {
            writeln!(out, "  {}", flag)?;
        }
    }
    Ok(out)
}
