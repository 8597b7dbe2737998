use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use bioflat_core::utils::get_dynamic_reader_w_stdin;
use bioflat_vcf::{VariantTable, VcfWrite};

use crate::settings::load_config;

pub fn run_vcf(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("A path to a VCF file is required.");
    let config = load_config(matches)?;

    let reader = get_dynamic_reader_w_stdin(input)?;
    let table = VariantTable::from_reader(reader, &config.reader)
        .with_context(|| format!("Failed to decode VCF file: {}", input))?;
    info!(
        "Decoded {} records ({} skipped lines) from {}",
        table.len(),
        table.skipped.len(),
        input
    );

    match matches.get_one::<String>("output") {
        Some(output) => table.write_vcf(output, &config.writer)?,
        None => print_summary(&table),
    }

    Ok(())
}

fn print_summary(table: &VariantTable) {
    let registry = table.registry();
    let info_ids: Vec<&str> = registry.info_fields().map(|d| d.id.as_str()).collect();
    let format_ids: Vec<&str> = registry.format_fields().map(|d| d.id.as_str()).collect();

    println!("fileformat\t{}", table.fileformat().unwrap_or("."));
    println!("info\t{}", info_ids.join(","));
    println!("format\t{}", format_ids.join(","));
    println!("samples\t{}", table.samples().join(","));
    println!("records\t{}", table.len());
    println!("skipped\t{}", table.skipped.len());
    for skipped in &table.skipped {
        println!("#\t{}", skipped);
    }
}
