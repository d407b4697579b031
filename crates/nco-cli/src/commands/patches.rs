//! Patch listing command.

use clap::Args;
use nco_config::FACTORY_PATCH_NAMES;

use super::common::load_factory_patch;

#[derive(Args)]
pub struct PatchesArgs {
    /// Patch to print as TOML (lists all patches when omitted)
    name: Option<String>,
}

pub fn run(args: PatchesArgs) -> anyhow::Result<()> {
    match args.name {
        Some(name) => show_patch(&name),
        None => list_patches(),
    }
}

fn list_patches() -> anyhow::Result<()> {
    println!("Factory Patches:");
    println!("================");
    for id in FACTORY_PATCH_NAMES {
        let patch = load_factory_patch(id)?;
        let desc = patch.description.as_deref().unwrap_or("");
        println!("  {:12} {:10} - {}", id, patch.waveform.name(), desc);
    }
    println!();
    println!("Show one with: nco patches <name>");
    Ok(())
}

fn show_patch(name: &str) -> anyhow::Result<()> {
    let patch = load_factory_patch(name)?;
    print!("{}", patch.to_toml()?);
    Ok(())
}
