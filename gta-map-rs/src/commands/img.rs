//! IMG archive command implementations

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use console::style;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use gta_img::{ImgArchive, IndexEntry, ResourceKind};

use crate::utils::{
    add_table_row, create_progress_bar, create_table, entry_output_path, format_bytes,
    matches_pattern, print_report,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    /// `.dff` models
    Model,
    /// `.txd` texture dictionaries
    Texture,
}

impl From<KindArg> for ResourceKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Model => ResourceKind::Model,
            KindArg::Texture => ResourceKind::Texture,
        }
    }
}

#[derive(Subcommand)]
pub enum ImgCommands {
    /// List entries of an IMG archive
    List {
        /// Path to the .img (or .dir) file
        archive: PathBuf,

        /// Show offsets and sizes
        #[arg(short, long)]
        long: bool,

        /// Filter entries by pattern (supports wildcards)
        #[arg(short, long)]
        filter: Option<String>,

        /// Print the index as JSON
        #[arg(long, conflicts_with = "long")]
        json: bool,
    },

    /// Extract named resources
    Extract {
        /// Path to the .img (or .dir) file
        archive: PathBuf,

        /// Resource names, with or without extension
        #[arg(required = true)]
        names: Vec<String>,

        /// Extension to try for names given without one
        #[arg(short, long, value_enum, default_value = "model")]
        kind: KindArg,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Extract every entry
    ExtractAll {
        /// Path to the .img (or .dir) file
        archive: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Only extract entries matching this pattern
        #[arg(short, long)]
        filter: Option<String>,
    },
}

#[derive(Serialize)]
struct EntryRow<'a> {
    name: &'a str,
    offset: u64,
    size: u64,
}

pub fn execute(command: ImgCommands) -> Result<()> {
    match command {
        ImgCommands::List {
            archive,
            long,
            filter,
            json,
        } => list_archive(&archive, long, filter.as_deref(), json),
        ImgCommands::Extract {
            archive,
            names,
            kind,
            output,
        } => extract_named(&archive, &names, kind.into(), &output),
        ImgCommands::ExtractAll {
            archive,
            output,
            filter,
        } => extract_all(&archive, &output, filter.as_deref()),
    }
}

fn open_archive(path: &Path) -> Result<ImgArchive> {
    let archive = ImgArchive::open(path)
        .with_context(|| format!("Failed to open archive: {}", path.display()))?;
    print_report(archive.report());
    Ok(archive)
}

fn filtered_entries<'a>(archive: &'a ImgArchive, filter: Option<&str>) -> Vec<&'a IndexEntry> {
    let pattern = filter.unwrap_or("*");
    archive
        .index()
        .entries()
        .iter()
        .filter(|e| matches_pattern(&e.name, pattern))
        .collect()
}

fn list_archive(path: &Path, long: bool, filter: Option<&str>, json: bool) -> Result<()> {
    let archive = open_archive(path)?;
    let entries = filtered_entries(&archive, filter);

    if json {
        let rows: Vec<EntryRow<'_>> = entries
            .iter()
            .map(|e| EntryRow {
                name: &e.name,
                offset: e.byte_offset(),
                size: e.byte_length(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found matching pattern: {}", filter.unwrap_or("*"));
        return Ok(());
    }

    if long {
        println!(
            "{} ({}, {} entries)",
            style(path.display()).cyan(),
            style(archive.version()).yellow(),
            archive.index().len()
        );
        let mut table = create_table(&["Name", "Offset", "Size"]);
        for entry in &entries {
            add_table_row(
                &mut table,
                vec![
                    entry.name.clone(),
                    format!("0x{:08X}", entry.byte_offset()),
                    format_bytes(entry.byte_length()),
                ],
            );
        }
        table.printstd();
    } else {
        for entry in &entries {
            println!("{}", entry.name);
        }
    }

    Ok(())
}

fn extract_named(path: &Path, names: &[String], kind: ResourceKind, output: &Path) -> Result<()> {
    let mut archive = open_archive(path)?;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create directory: {}", output.display()))?;

    let mut missing = Vec::new();
    let mut unsafe_names = Vec::new();
    for name in names {
        let Some(entry) = archive.index().resolve(name, kind).cloned() else {
            missing.push(name.as_str());
            continue;
        };
        let Some(target) = entry_output_path(output, &entry.name) else {
            log::warn!("Refusing to extract entry with unsafe name '{}'", entry.name);
            unsafe_names.push(entry.name);
            continue;
        };

        let data = archive
            .read_entry(&entry)
            .with_context(|| format!("Failed to extract {}", entry.name))?;
        fs::write(&target, &data)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        println!("✓ {} ({})", style(&entry.name).green(), format_bytes(data.len() as u64));
    }

    if !missing.is_empty() {
        anyhow::bail!("Not found in archive: {}", missing.join(", "));
    }
    if !unsafe_names.is_empty() {
        anyhow::bail!("Unsafe entry names not extracted: {}", unsafe_names.join(", "));
    }

    Ok(())
}

fn extract_all(path: &Path, output: &Path, filter: Option<&str>) -> Result<()> {
    let mut archive = open_archive(path)?;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create directory: {}", output.display()))?;

    let entries: Vec<IndexEntry> = filtered_entries(&archive, filter)
        .into_iter()
        .cloned()
        .collect();

    let label = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    let pb = create_progress_bar(entries.len() as u64, &label);
    let mut failed = 0usize;

    for entry in &entries {
        pb.set_message(entry.name.clone());
        let Some(target) = entry_output_path(output, &entry.name) else {
            log::warn!("Refusing to extract entry with unsafe name '{}'", entry.name);
            failed += 1;
            pb.inc(1);
            continue;
        };
        match archive.read_entry(entry) {
            Ok(data) => {
                fs::write(&target, data)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
            }
            Err(e) => {
                log::warn!("Failed to extract {}: {}", entry.name, e);
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    if failed > 0 {
        anyhow::bail!("{} of {} entries could not be extracted", failed, entries.len());
    }
    println!("✓ Extracted {} entries to {}", entries.len(), output.display());
    Ok(())
}
