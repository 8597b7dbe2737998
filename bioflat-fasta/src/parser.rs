use std::io::BufRead;

use bioflat_core::Result;
use log::warn;

use crate::record::FastaRecord;

///
/// Split a FASTA header (without the leading `>`) into its ID and description.
///
/// The description is every remaining whitespace-separated token, joined by a
/// single space.
///
pub fn parse_fasta_header(header: &str) -> (String, String) {
    let mut tokens = header.split_whitespace();
    let id = tokens.next().unwrap_or_default().to_string();
    let description = tokens.collect::<Vec<_>>().join(" ");
    (id, description)
}

/// Core FASTA parser that works with any `BufRead` implementation.
///
/// Blank lines and `;` comment lines are ignored. Sequence lines are trimmed and
/// concatenated until the next header. Records whose header has no ID are
/// dropped.
pub fn parse_fasta_reader<R: BufRead>(mut reader: R) -> Result<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();
    let mut current: Option<FastaRecord> = None;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('>') {
            if let Some(record) = current.take() {
                push_record(&mut records, record);
            }
            let (id, description) = parse_fasta_header(header);
            current = Some(FastaRecord::new(id, description, String::new()));
        } else {
            match current.as_mut() {
                Some(record) => record.sequence.push_str(trimmed),
                None => warn!("Sequence line found before any FASTA header, ignoring it"),
            }
        }
    }

    if let Some(record) = current.take() {
        push_record(&mut records, record);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<FastaRecord>, record: FastaRecord) {
    if record.id.is_empty() {
        warn!("Dropping FASTA record with an empty ID");
    } else {
        records.push(record);
    }
}

/// Parse FASTA records held in memory.
pub fn parse_fasta_str(content: &str) -> Result<Vec<FastaRecord>> {
    parse_fasta_reader(content.as_bytes())
}
