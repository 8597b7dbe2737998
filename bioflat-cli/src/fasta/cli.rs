use clap::{Command, arg, value_parser};

pub const FASTA_CMD: &str = "fasta";

pub fn create_fasta_cli() -> Command {
    Command::new(FASTA_CMD)
        .about("Re-wrap a FASTA file.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "FASTA file to read (plain, gzip'd, or - for stdin)").required(true))
        .arg(arg!(-o --output <output> "FASTA file to write (defaults to stdout)"))
        .arg(arg!(-w --width <width> "Sequence characters per line").value_parser(value_parser!(usize)))
}
