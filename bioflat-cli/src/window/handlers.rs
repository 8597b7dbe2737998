use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use bioflat_core::utils::get_dynamic_reader_w_stdin;
use bioflat_fasta::{FastaRecord, FastaWrite, SequenceStore, write_fasta};
use bioflat_gff::FeatureGraph;

use crate::settings::load_config;

pub fn run_window(matches: &ArgMatches) -> Result<()> {
    let gff = matches
        .get_one::<String>("gff")
        .expect("A path to a GFF3 file is required.");
    let mut config = load_config(matches)?;

    // flags override the config file
    if let Some(left) = matches.get_one::<usize>("left") {
        config.window.left_flank = *left;
    }
    if let Some(right) = matches.get_one::<usize>("right") {
        config.window.right_flank = *right;
    }

    let reader = get_dynamic_reader_w_stdin(gff)?;
    let graph = FeatureGraph::from_reader(reader, &config.reader)
        .with_context(|| format!("Failed to decode GFF3 file: {}", gff))?;

    let store = match matches.get_one::<String>("fasta") {
        Some(fasta) => Some(SequenceStore::try_from(Path::new(fasta))?),
        None => None,
    };

    let feature_type = matches.get_one::<String>("feature_type").map(String::as_str);
    let records: Vec<FastaRecord> = graph
        .windows(store.as_ref(), &config.window, feature_type)
        .into_iter()
        .map(|w| w.into_fasta_record())
        .collect();
    info!("Cut {} windows from {} features", records.len(), graph.len());

    match matches.get_one::<String>("output") {
        Some(output) => records.write_fasta(output, &config.writer)?,
        None => {
            let mut stdout = io::stdout().lock();
            write_fasta(records.iter(), &mut stdout, config.writer.fasta_line_width)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
