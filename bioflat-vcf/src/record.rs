use bioflat_core::{ParseError, Result};
use indexmap::IndexMap;
use log::debug;

use crate::consts::{MISSING_VALUE, VCF_FIXED_COLUMNS};
use crate::decoder::decode_or_string;
use crate::header::MetadataRegistry;
use crate::types::TypedValue;

///
/// One VCF data line, with INFO and sample values decoded against the header.
///
/// `genotypes[i]` holds sample `i`'s values in `format` order and always has
/// exactly `format.len()` entries.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantRecord {
    pub chrom: String,
    /// 1-based.
    pub pos: u64,
    pub id: String,
    pub reference: String,
    pub alternate: String,
    pub qual: Option<f64>,
    pub filter: String,
    pub info: IndexMap<String, TypedValue>,
    pub format: Option<Vec<String>>,
    pub genotypes: Vec<Vec<TypedValue>>,
}

impl VariantRecord {
    ///
    /// Decode a tab-delimited data line.
    ///
    /// Fails only when there are fewer than eight columns or POS is not a
    /// position. A QUAL that does not parse is treated as missing, and any
    /// value that does not match its declaration is kept as a `String`.
    ///
    pub fn parse(line: &str, registry: &MetadataRegistry) -> Result<VariantRecord> {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < VCF_FIXED_COLUMNS {
            return Err(ParseError::MalformedLine {
                expected: VCF_FIXED_COLUMNS,
                found: parts.len(),
            });
        }

        let pos = parts[1].parse::<u64>().map_err(|_| ParseError::InvalidField {
            field: "POS",
            value: parts[1].to_string(),
        })?;

        let qual = match parts[5] {
            MISSING_VALUE => None,
            s => s
                .parse::<f64>()
                .inspect_err(|_| debug!("Unparsable QUAL {:?}, treating as missing", s))
                .ok(),
        };

        let mut record = VariantRecord {
            chrom: parts[0].to_string(),
            pos,
            id: parts[2].to_string(),
            reference: parts[3].to_string(),
            alternate: parts[4].to_string(),
            qual,
            filter: parts[6].to_string(),
            info: decode_info(parts[7], registry),
            ..Default::default()
        };

        if let Some(format) = parts.get(VCF_FIXED_COLUMNS) {
            let keys: Vec<String> = format.split(':').map(str::to_string).collect();
            record.genotypes = parts[VCF_FIXED_COLUMNS + 1..]
                .iter()
                .map(|sample| decode_sample(sample, &keys, registry))
                .collect();
            record.format = Some(keys);
        }

        Ok(record)
    }

    pub fn has_qual(&self) -> bool {
        self.qual.is_some()
    }

    pub fn sample_count(&self) -> usize {
        self.genotypes.len()
    }

    ///
    /// Get one sample's values paired with their FORMAT keys.
    ///
    pub fn sample(&self, index: usize) -> Option<impl Iterator<Item = (&str, &TypedValue)>> {
        let keys = self.format.as_deref()?;
        let values = self.genotypes.get(index)?;
        Some(keys.iter().map(String::as_str).zip(values.iter()))
    }

    ///
    /// Get the value of FORMAT field `key` for sample `index`.
    ///
    pub fn genotype(&self, index: usize, key: &str) -> Option<&TypedValue> {
        let position = self.format.as_ref()?.iter().position(|k| k == key)?;
        self.genotypes.get(index)?.get(position)
    }

    ///
    /// Get the VCF line for this record, with QUAL printed to `precision`
    /// decimals.
    ///
    pub fn to_line(&self, precision: usize) -> String {
        let qual = match self.qual {
            Some(qual) => format!("{:.*}", precision, qual),
            None => MISSING_VALUE.to_string(),
        };

        let mut columns = vec![
            self.chrom.clone(),
            self.pos.to_string(),
            self.id.clone(),
            self.reference.clone(),
            self.alternate.clone(),
            qual,
            self.filter.clone(),
            encode_info(&self.info),
        ];

        if let Some(format) = &self.format {
            columns.push(format.join(":"));
            for sample in &self.genotypes {
                let values: Vec<String> = sample.iter().map(|v| v.to_string()).collect();
                columns.push(values.join(":"));
            }
        }

        columns.join("\t")
    }
}

fn decode_info(text: &str, registry: &MetadataRegistry) -> IndexMap<String, TypedValue> {
    let text = text.trim();
    if text.is_empty() || text == MISSING_VALUE {
        return IndexMap::new();
    }

    text.split(';')
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.split_once('=') {
            Some((key, raw)) => (key.to_string(), decode_or_string(registry.info(key), raw)),
            None => (piece.to_string(), TypedValue::Flag(true)),
        })
        .collect()
}

fn encode_info(info: &IndexMap<String, TypedValue>) -> String {
    if info.is_empty() {
        return MISSING_VALUE.to_string();
    }
    info.iter()
        .map(|(key, value)| match value {
            TypedValue::Flag(_) => key.clone(),
            _ => format!("{}={}", key, value),
        })
        .collect::<Vec<String>>()
        .join(";")
}

///
/// Decode one sample column against the FORMAT keys. A literal `.` stays an
/// untyped `String(".")`; missing trailing values are filled with it and
/// values beyond the last key are dropped.
///
fn decode_sample(sample: &str, keys: &[String], registry: &MetadataRegistry) -> Vec<TypedValue> {
    let raw: Vec<&str> = sample.split(':').collect();
    if raw.len() > keys.len() {
        debug!(
            "Sample {:?} has {} values for {} FORMAT keys, dropping the rest",
            sample,
            raw.len(),
            keys.len()
        );
    }

    keys.iter()
        .enumerate()
        .map(|(i, key)| match raw.get(i).copied() {
            None | Some(MISSING_VALUE) => TypedValue::String(MISSING_VALUE.to_string()),
            Some(value) => decode_or_string(registry.format(key), value),
        })
        .collect()
}
