//! Integration tests for reading and re-writing VCF files.

use std::path::Path;

use bioflat_core::WriterConfig;
use bioflat_vcf::{Number, TypedValue, ValueType, VariantTable, VcfWrite};
use pretty_assertions::assert_eq;
use rstest::*;

#[fixture]
fn sample() -> VariantTable {
    VariantTable::try_from(Path::new("../tests/data/vcf/sample.vcf")).expect("Failed to read test VCF")
}

#[rstest]
fn test_header(sample: VariantTable) {
    assert_eq!(sample.fileformat(), Some("VCFv4.2"));
    assert_eq!(sample.registry().meta_lines().len(), 18);
    assert_eq!(sample.registry().info_fields().count(), 6);
    assert_eq!(sample.registry().format_fields().count(), 4);
    assert_eq!(sample.samples(), &["NA00001", "NA00002", "NA00003"]);

    let contig = &sample.registry().meta_lines()[4];
    assert_eq!(contig.class, "contig");
    assert_eq!(contig.get("species"), Some("Homo sapiens"));

    let af = sample.registry().info("AF").unwrap();
    assert_eq!((af.number, af.value_type), (Number::A, ValueType::Float));
}

#[rstest]
fn test_records_and_skipped_lines(sample: VariantTable) {
    assert_eq!(sample.len(), 5);
    assert_eq!(sample.skipped.len(), 1);
    assert_eq!(sample.skipped[0].line_number, 25);
}

#[rstest]
fn test_typed_info(sample: VariantTable) {
    let multi = &sample.records()[2];
    assert_eq!(multi.alternate, "G,T");
    assert_eq!(multi.info["AF"], TypedValue::FloatVector(vec![0.333, 0.667]));
    assert_eq!(multi.info["AA"], TypedValue::String("T".to_string()));
    assert_eq!(multi.info["DB"], TypedValue::Flag(true));
    assert_eq!(multi.info["NS"], TypedValue::Integer(2));

    let microsat = &sample.records()[4];
    assert_eq!(microsat.id, "microsat1");
    assert!(!microsat.has_qual());
}

#[rstest]
fn test_every_sample_matches_format_length(sample: VariantTable) {
    for record in &sample {
        let keys = record.format.as_ref().unwrap().len();
        assert_eq!(record.sample_count(), 3);
        assert!(record.genotypes.iter().all(|g| g.len() == keys));
    }
}

#[rstest]
fn test_typed_genotypes(sample: VariantTable) {
    let first = &sample.records()[0];
    assert_eq!(first.genotype(0, "GT"), Some(&TypedValue::String("0|0".to_string())));
    assert_eq!(first.genotype(1, "GQ"), Some(&TypedValue::Integer(48)));
    assert_eq!(first.genotype(0, "HQ"), Some(&TypedValue::IntegerVector(vec![51, 51])));
    assert_eq!(first.genotype(2, "HQ"), Some(&TypedValue::String(".".to_string())));

    // the third sample stops after DP
    let second = &sample.records()[1];
    assert_eq!(second.genotype(2, "DP"), Some(&TypedValue::Integer(3)));
    assert_eq!(second.genotype(2, "HQ"), Some(&TypedValue::String(".".to_string())));
}

#[rstest]
fn test_write_and_reread(sample: VariantTable) {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("sample.vcf.gz");

    sample.write_vcf(&path, &WriterConfig::default()).unwrap();
    let reread = VariantTable::try_from(path.as_path()).unwrap();

    assert_eq!(reread.registry(), sample.registry());
    assert_eq!(reread.samples(), sample.samples());
    assert_eq!(reread.records(), sample.records());
    assert!(reread.skipped.is_empty());
}
