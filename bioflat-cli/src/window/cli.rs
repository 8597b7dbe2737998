use clap::{Arg, Command, arg, value_parser};

pub const WINDOW_CMD: &str = "window";

pub fn create_window_cli() -> Command {
    Command::new(WINDOW_CMD)
        .about("Cut the sequence under each GFF3 feature, with optional flanks, as FASTA.")
        .arg_required_else_help(true)
        .arg(arg!(-g --gff <gff> "GFF3 file with the features").required(true))
        .arg(arg!(-f --fasta <fasta> "Reference FASTA (defaults to the GFF3 ##FASTA section)"))
        .arg(arg!(-l --left <left> "Bases to add before each feature").value_parser(value_parser!(usize)))
        .arg(arg!(-r --right <right> "Bases to add after each feature").value_parser(value_parser!(usize)))
        .arg(
            Arg::new("feature_type")
                .short('t')
                .long("type")
                .value_name("type")
                .help("Only cut windows for features of this type"),
        )
        .arg(arg!(-o --output <output> "FASTA file to write (defaults to stdout)"))
}
