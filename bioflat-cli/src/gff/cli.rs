use clap::{Command, arg};

pub const GFF_CMD: &str = "gff";

pub fn create_gff_cli() -> Command {
    Command::new(GFF_CMD)
        .about("Decode a GFF3 file and summarize, query or re-write it.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "GFF3 file to read (plain, gzip'd, or - for stdin)").required(true))
        .arg(arg!(-o --output <output> "Write the decoded features back out to this file"))
        .arg(arg!(-c --children <id> "Print the features whose Parent is this ID"))
}
