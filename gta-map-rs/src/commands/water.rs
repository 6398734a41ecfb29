//! water.dat command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use std::path::{Path, PathBuf};

use gta_water::{WaterFlag, count_valid_surfaces, parse_water, write_water};

use crate::utils::{add_table_row, create_table, create_writer, open_reader, print_report};

#[derive(Subcommand)]
pub enum WaterCommands {
    /// Summarize the surfaces of a water.dat file
    Info {
        /// Path to the water.dat file
        file: PathBuf,

        /// Print the parsed surfaces as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count the valid surface lines of a water.dat file
    Check {
        /// Path to the water.dat file
        file: PathBuf,
    },

    /// Parse a water.dat file and write it back in game order
    Rewrite {
        /// Path to the input water.dat file
        input: PathBuf,

        /// Path to write the rewritten file
        output: PathBuf,
    },
}

pub fn execute(command: WaterCommands) -> Result<()> {
    match command {
        WaterCommands::Info { file, json } => execute_info(&file, json),
        WaterCommands::Check { file } => execute_check(&file),
        WaterCommands::Rewrite { input, output } => execute_rewrite(&input, &output),
    }
}

fn execute_info(path: &Path, json: bool) -> Result<()> {
    let parsed = parse_water(open_reader(path)?)
        .with_context(|| format!("Failed to parse water file: {}", path.display()))?;
    let surfaces = &parsed.value;

    if json {
        println!("{}", serde_json::to_string_pretty(surfaces)?);
        return Ok(());
    }

    println!("\n{}", style("Water File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Surfaces: {}", style(surfaces.len()).green());
    println!(
        "Quads: {}, triangles: {}",
        surfaces.iter().filter(|s| s.vertices.len() == 4).count(),
        surfaces.iter().filter(|s| s.vertices.len() == 3).count()
    );

    let mut table = create_table(&["Flag", "Visible", "Shallow", "Surfaces"]);
    for flag in WaterFlag::ALL {
        let count = surfaces.iter().filter(|s| s.flag == flag).count();
        add_table_row(
            &mut table,
            vec![
                format!("{} ({})", flag.value(), flag),
                yes_no(flag.is_visible()),
                yes_no(flag.is_shallow()),
                count.to_string(),
            ],
        );
    }
    table.printstd();

    print_report(&parsed.report);
    Ok(())
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

fn execute_check(path: &Path) -> Result<()> {
    let count = count_valid_surfaces(open_reader(path)?)
        .with_context(|| format!("Failed to read water file: {}", path.display()))?;
    println!(
        "Found {} valid water surfaces in {}",
        style(count).green(),
        style(path.display()).cyan()
    );
    Ok(())
}

fn execute_rewrite(input: &Path, output: &Path) -> Result<()> {
    let parsed = parse_water(open_reader(input)?)
        .with_context(|| format!("Failed to parse water file: {}", input.display()))?;
    print_report(&parsed.report);

    let mut writer = create_writer(output)?;
    let written = write_water(&mut writer, &parsed.value)
        .with_context(|| format!("Failed to write water file: {}", output.display()))?;

    println!(
        "✓ Wrote {} surfaces to {}",
        style(written).green(),
        style(output.display()).cyan()
    );
    Ok(())
}
