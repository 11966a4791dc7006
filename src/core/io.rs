//! Text input with transparent decompression
//!
//! Genome annotation tables (chrom.sizes, cytoBand.txt) are often shipped
//! gzip- or bzip2-compressed. `open_text` detects the format and returns a
//! buffered line reader either way.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression from the first bytes of a file
pub fn detect_magic(magic: &[u8]) -> CompressionFormat {
    if magic.len() >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        CompressionFormat::Gzip
    } else if magic.len() >= 3 && magic[..3] == *b"BZh" {
        CompressionFormat::Bzip2
    } else {
        CompressionFormat::Plain
    }
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "gz" => return Ok(CompressionFormat::Gzip),
        "bz2" => return Ok(CompressionFormat::Bzip2),
        _ => {}
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;
    Ok(detect_magic(&magic[..bytes_read]))
}

/// Open a possibly-compressed text file for line reading
pub fn open_text(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let format = detect_compression(path)?;
    let file = File::open(path)?;

    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::MultiGzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    };
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_magic() {
        assert_eq!(detect_magic(&[0x1f, 0x8b, 0x08]), CompressionFormat::Gzip);
        assert_eq!(detect_magic(b"BZh"), CompressionFormat::Bzip2);
        assert_eq!(detect_magic(b"chr"), CompressionFormat::Plain);
        assert_eq!(detect_magic(&[]), CompressionFormat::Plain);
    }

    #[test]
    fn test_open_plain() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "chr1\t100").unwrap();
        tmp.flush().unwrap();

        let lines: Vec<String> = open_text(tmp.path()).unwrap().lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["chr1\t100"]);
    }

    #[test]
    fn test_open_gzip_without_extension() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"chr1\t100\nchr2\t200\n").unwrap();
        let bytes = encoder.finish().unwrap();

        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&bytes).unwrap();
        tmp.flush().unwrap();

        assert_eq!(detect_compression(tmp.path()).unwrap(), CompressionFormat::Gzip);
        let lines: Vec<String> = open_text(tmp.path()).unwrap().lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["chr1\t100", "chr2\t200"]);
    }
}
