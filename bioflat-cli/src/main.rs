mod fasta;
mod gff;
mod settings;
mod vcf;
mod window;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "bioflat";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Decode, inspect and re-write FASTA, GFF3 and VCF files.")
        .subcommand_required(true)
        .arg(settings::config_arg())
        .arg(settings::strict_arg())
        .subcommand(vcf::cli::create_vcf_cli())
        .subcommand(gff::cli::create_gff_cli())
        .subcommand(window::cli::create_window_cli())
        .subcommand(fasta::cli::create_fasta_cli())
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // VCF
        //
        Some((vcf::cli::VCF_CMD, matches)) => {
            vcf::handlers::run_vcf(matches)?;
        }

        //
        // GFF3
        //
        Some((gff::cli::GFF_CMD, matches)) => {
            gff::handlers::run_gff(matches)?;
        }

        //
        // SEQUENCE WINDOWS
        //
        Some((window::cli::WINDOW_CMD, matches)) => {
            window::handlers::run_window(matches)?;
        }

        //
        // FASTA
        //
        Some((fasta::cli::FASTA_CMD, matches)) => {
            fasta::handlers::run_fasta(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_global_flags_reach_subcommands() {
        let matches = build_parser()
            .try_get_matches_from(["bioflat", "vcf", "--input", "calls.vcf", "--strict"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, vcf::cli::VCF_CMD);

        let config = settings::load_config(sub).unwrap();
        assert!(config.reader.strict);
    }

    #[rstest]
    fn test_window_flanks_parse_as_numbers() {
        let matches = build_parser()
            .try_get_matches_from(["bioflat", "window", "--gff", "a.gff3", "--left", "20", "--right", "5"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<usize>("left"), Some(&20));
        assert_eq!(sub.get_one::<usize>("right"), Some(&5));
    }

    #[rstest]
    fn test_missing_input_is_rejected() {
        assert!(build_parser().try_get_matches_from(["bioflat", "gff"]).is_err());
    }
}
