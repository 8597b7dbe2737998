use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::info;

use bioflat_core::utils::get_dynamic_reader_w_stdin;
use bioflat_gff::{FeatureGraph, GffWrite};

use crate::settings::load_config;

pub fn run_gff(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("A path to a GFF3 file is required.");
    let config = load_config(matches)?;

    let reader = get_dynamic_reader_w_stdin(input)?;
    let graph = FeatureGraph::from_reader(reader, &config.reader)
        .with_context(|| format!("Failed to decode GFF3 file: {}", input))?;
    info!(
        "Decoded {} features ({} skipped lines) from {}",
        graph.len(),
        graph.skipped.len(),
        input
    );

    if let Some(id) = matches.get_one::<String>("children") {
        let parent = graph
            .get_by_id(id)
            .ok_or_else(|| anyhow!("No feature with ID {}", id))?;
        for child in graph.children(parent) {
            println!("{}", child.to_line(config.writer.float_precision));
        }
        return Ok(());
    }

    match matches.get_one::<String>("output") {
        Some(output) => graph.write_gff(output, &config.writer)?,
        None => print_summary(&graph),
    }

    Ok(())
}

fn print_summary(graph: &FeatureGraph) {
    let genes = graph.iter().filter(|f| f.is_gene()).count();

    println!("features\t{}", graph.len());
    println!("genes\t{}", genes);
    println!("roots\t{}", graph.roots().count());
    println!("directives\t{}", graph.directives.len());
    println!("sequences\t{}", graph.sequences.len());
    println!("skipped\t{}", graph.skipped.len());
    for skipped in &graph.skipped {
        println!("#\t{}", skipped);
    }
}
