use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
///
/// # Returns
///
/// A `BufReader` object for a given file path or stdin.
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        let file_path = Path::new(file_path_str);
        get_dynamic_reader(file_path)
    }
}

///
/// Get a writer for a plain or gzip'd (`.gz`) file. Parent folders are created
/// when missing.
///
/// The gzip stream is finalized when the writer is dropped; call `flush` first
/// to observe I/O errors.
///
pub fn get_dynamic_writer(path: &Path) -> Result<BufWriter<Box<dyn Write>>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let file: Box<dyn Write> = match is_gzipped {
        true => Box::new(GzEncoder::new(file, Compression::default())),
        false => Box::new(file),
    };

    Ok(BufWriter::new(file))
}

/// Strip a trailing `\n` or `\r\n` without touching tabs or other whitespace.
pub fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("a\tb\n", "a\tb")]
    #[case("a\tb\r\n", "a\tb")]
    #[case("a\t\t\n", "a\t\t")]
    #[case("plain", "plain")]
    fn test_trim_line_ending(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(trim_line_ending(line), expected);
    }

    #[rstest]
    #[case("out.txt")]
    #[case("nested/dir/out.txt.gz")]
    fn test_writer_reader_round_trip(#[case] name: &str) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join(name);

        {
            let mut writer = get_dynamic_writer(&path).unwrap();
            writeln!(writer, "first").unwrap();
            writeln!(writer, "second").unwrap();
            writer.flush().unwrap();
        }

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let result = get_dynamic_reader(Path::new("does/not/exist.txt"));
        assert!(result.is_err());
    }
}
