//! IDE object definition command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use std::path::PathBuf;

use gta_ipl::{BatchValues, assign_definition_ids, parse_ide, write_ide};

use crate::utils::{create_writer, open_reader, print_report};

#[derive(Subcommand)]
pub enum IdeCommands {
    /// Parse an IDE file and write its object definitions back out
    Rewrite {
        /// Path to the input IDE file
        input: PathBuf,

        /// Path to write the rewritten IDE file
        output: PathBuf,

        /// Renumber definitions starting at this id
        #[arg(long, value_name = "ID")]
        id_start: Option<i32>,

        /// Override the texture dictionary of every definition
        #[arg(long, value_name = "TXD")]
        texture_set: Option<String>,

        /// Override the draw distance of every definition
        #[arg(long, value_name = "DISTANCE")]
        draw_distance: Option<f64>,

        /// Override the object flags of every definition
        #[arg(long, value_name = "FLAGS")]
        flags: Option<u32>,
    },
}

pub fn execute(command: IdeCommands) -> Result<()> {
    match command {
        IdeCommands::Rewrite {
            input,
            output,
            id_start,
            texture_set,
            draw_distance,
            flags,
        } => {
            let parsed = parse_ide(open_reader(&input)?)
                .with_context(|| format!("Failed to parse IDE file: {}", input.display()))?;
            print_report(&parsed.report);

            let mut records = parsed.value;
            if let Some(id_start) = id_start {
                assign_definition_ids(&mut records, id_start)
                    .context("Failed to renumber definitions")?;
            }
            let values = BatchValues {
                texture_set,
                draw_distance,
                flags,
                ..BatchValues::default()
            };
            values.apply_to_definitions(&mut records);

            let mut writer = create_writer(&output)?;
            let written = write_ide(&mut writer, &records)
                .with_context(|| format!("Failed to write IDE file: {}", output.display()))?;

            println!(
                "✓ Wrote {} definitions to {}",
                style(written).green(),
                style(output.display()).cyan()
            );
            Ok(())
        }
    }
}
