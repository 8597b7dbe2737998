use clap::{Command, arg};

pub const VCF_CMD: &str = "vcf";

pub fn create_vcf_cli() -> Command {
    Command::new(VCF_CMD)
        .about("Decode a VCF file and summarize or re-write it.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "VCF file to read (plain, gzip'd, or - for stdin)").required(true))
        .arg(arg!(-o --output <output> "Write the decoded records back out to this file"))
}
