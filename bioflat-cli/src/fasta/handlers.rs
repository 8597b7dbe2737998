use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use log::info;

use bioflat_core::utils::get_dynamic_reader_w_stdin;
use bioflat_fasta::{FastaWrite, SequenceStore, write_fasta};

use crate::settings::load_config;

pub fn run_fasta(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("A path to a FASTA file is required.");
    let mut config = load_config(matches)?;

    if let Some(width) = matches.get_one::<usize>("width") {
        if *width == 0 {
            bail!("--width must be greater than zero");
        }
        config.writer.fasta_line_width = *width;
    }

    let reader = get_dynamic_reader_w_stdin(input)?;
    let store = SequenceStore::from_reader(reader)
        .with_context(|| format!("Failed to decode FASTA file: {}", input))?;
    info!("Decoded {} sequences from {}", store.len(), input);

    match matches.get_one::<String>("output") {
        Some(output) => store.write_fasta(output, &config.writer)?,
        None => {
            let mut stdout = io::stdout().lock();
            write_fasta(store.iter(), &mut stdout, config.writer.fasta_line_width)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
