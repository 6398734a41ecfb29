//! IPL item placement command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use std::path::{Path, PathBuf};

use gta_ipl::{
    BatchValues, InstanceRecord, IplWriteOptions, assign_ids, parse_ipl, validate_records,
    write_ipl,
};

use crate::utils::{
    add_table_row, create_table, create_writer, format_position, open_reader, print_report,
};

#[derive(Subcommand)]
pub enum IplCommands {
    /// Display the instances of an IPL file
    Info {
        /// Path to the IPL file
        file: PathBuf,

        /// Print the parsed records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check an IPL file for parse problems and naming issues
    Validate {
        /// Path to the IPL file
        file: PathBuf,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Parse an IPL file and write it back in canonical form
    Rewrite {
        /// Path to the input IPL file
        input: PathBuf,

        /// Path to write the rewritten IPL file
        output: PathBuf,

        /// Link models to the id of their LOD counterpart
        #[arg(long)]
        lod_autosearch: bool,

        /// Renumber instances starting at this id
        #[arg(long, value_name = "ID")]
        id_start: Option<i32>,

        /// First LOD index used when renumbering
        #[arg(long, value_name = "INDEX", default_value_t = 0)]
        lod_start: i32,

        /// Move every instance to this interior
        #[arg(long, value_name = "AREA")]
        interior: Option<i32>,
    },
}

pub fn execute(command: IplCommands) -> Result<()> {
    match command {
        IplCommands::Info { file, json } => execute_info(&file, json),
        IplCommands::Validate { file, strict } => execute_validate(&file, strict),
        IplCommands::Rewrite {
            input,
            output,
            lod_autosearch,
            id_start,
            lod_start,
            interior,
        } => {
            let values = BatchValues {
                interior,
                ..BatchValues::default()
            };
            execute_rewrite(&input, &output, lod_autosearch, id_start, lod_start, &values)
        }
    }
}

fn read_records(path: &Path) -> Result<(Vec<InstanceRecord>, gta_data::DiagnosticReport)> {
    let parsed = parse_ipl(open_reader(path)?)
        .with_context(|| format!("Failed to parse IPL file: {}", path.display()))?;
    Ok(parsed.into_parts())
}

fn execute_info(path: &Path, json: bool) -> Result<()> {
    let (records, report) = read_records(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("\n{}", style("IPL File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Instances: {}", style(records.len()).green());
    println!(
        "LOD proxies: {}",
        style(records.iter().filter(|r| r.is_lod()).count()).yellow()
    );

    if !records.is_empty() {
        let mut table = create_table(&["Id", "Model", "Interior", "Position", "LOD"]);
        for record in &records {
            add_table_row(
                &mut table,
                vec![
                    record.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                    record.model_name.clone(),
                    record.interior.to_string(),
                    format_position(record.position),
                    record.lod_index.to_string(),
                ],
            );
        }
        table.printstd();
    }

    print_report(&report);
    Ok(())
}

fn execute_validate(path: &Path, strict: bool) -> Result<()> {
    let (records, mut report) = read_records(path)?;
    report.extend(validate_records(&records));

    print!("{}", report.format());

    if !report.is_valid() || (strict && !report.is_clean()) {
        anyhow::bail!("Validation failed for {}", path.display());
    }

    println!(
        "✓ IPL file '{}' is valid ({} instances)",
        style(path.display()).cyan(),
        records.len()
    );
    Ok(())
}

fn execute_rewrite(
    input: &Path,
    output: &Path,
    lod_autosearch: bool,
    id_start: Option<i32>,
    lod_start: i32,
    values: &BatchValues,
) -> Result<()> {
    let (mut records, report) = read_records(input)?;
    print_report(&report);

    if let Some(id_start) = id_start {
        assign_ids(&mut records, id_start, lod_start).context("Failed to renumber instances")?;
    }
    values.apply_to_instances(&mut records);

    let mut writer = create_writer(output)?;
    let options = IplWriteOptions { lod_autosearch };
    let written = write_ipl(&mut writer, &records, &options)
        .with_context(|| format!("Failed to write IPL file: {}", output.display()))?;

    println!(
        "✓ Wrote {} instances to {}",
        style(written).green(),
        style(output.display()).cyan()
    );
    Ok(())
}
