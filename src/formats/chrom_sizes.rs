//! chrom.sizes adapter
//!
//! Reads UCSC-style `name<TAB>size` tables into a navigation context.
//! Chromosomes keep file order, which becomes their order on screen.

use crate::core::io::open_text;
use crate::core::{DisplayedRegion, GenomeFileError, GenomeFileResult, NavigationContext, Result};
use log::info;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

/// Parse `(name, size)` pairs from a chrom.sizes reader
///
/// Blank lines and `#` comments are skipped; columns after the second are
/// ignored.
pub fn parse_chrom_sizes_reader<R: BufRead>(reader: R) -> GenomeFileResult<Vec<(String, u64)>> {
    let mut sizes = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (name, size) = match (fields.next(), fields.next()) {
            (Some(name), Some(size)) => (name, size),
            _ => {
                return Err(GenomeFileError::InvalidRecord {
                    line: line_number,
                    message: format!("expected 'name<TAB>size', got '{}'", trimmed),
                })
            }
        };

        let size: u64 = size.parse().map_err(|_| GenomeFileError::ParseInt {
            line: line_number,
            value: size.to_string(),
        })?;
        sizes.push((name.to_string(), size));
    }

    Ok(sizes)
}

/// Parse chrom.sizes content from bytes (for testing)
pub fn parse_chrom_sizes_bytes(data: &[u8]) -> GenomeFileResult<Vec<(String, u64)>> {
    parse_chrom_sizes_reader(data)
}

/// Load a chrom.sizes file; gzip and bzip2 are detected automatically
pub fn load_chrom_sizes(path: &Path) -> GenomeFileResult<Vec<(String, u64)>> {
    if !path.exists() {
        return Err(GenomeFileError::FileNotFound(path.to_path_buf()));
    }
    let sizes = parse_chrom_sizes_reader(open_text(path)?)?;
    if sizes.is_empty() {
        return Err(GenomeFileError::Empty(path.to_path_buf()));
    }
    Ok(sizes)
}

/// Assembly name implied by a file name: `hg19.chrom.sizes.gz` -> `hg19`
pub fn assembly_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .filter(|n| !n.is_empty())
        .unwrap_or("genome")
        .to_string()
}

/// Build a navigation context of whole chromosomes from a chrom.sizes file
///
/// The context is named after the file unless `name` is given.
pub fn load_navigation_context(path: &Path, name: Option<&str>) -> GenomeFileResult<NavigationContext> {
    let sizes = load_chrom_sizes(path)?;
    let name = name.map(str::to_string).unwrap_or_else(|| assembly_name(path));
    let context = NavigationContext::from_chrom_sizes(name, sizes)?;
    info!(
        "Loaded genome '{}': {} features, {} bases",
        context.name(),
        context.feature_count(),
        context.total_bases()
    );
    Ok(context)
}

/// Load a genome and open a view of `locus` in it
///
/// Fails with `GenomeViewError::GenomeFile` when the file cannot be loaded
/// and `GenomeViewError::Viewport` when the locus does not fit the genome.
pub fn load_region(path: &Path, locus: &str) -> Result<DisplayedRegion> {
    let context = Arc::new(load_navigation_context(path, None)?);
    Ok(DisplayedRegion::from_locus(context, locus)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GenomeViewError;
    use std::path::PathBuf;

    #[test]
    fn test_parse_basic() {
        let sizes = parse_chrom_sizes_bytes(b"chr1\t248956422\nchr2\t242193529\n").unwrap();
        assert_eq!(sizes, vec![("chr1".to_string(), 248956422), ("chr2".to_string(), 242193529)]);
    }

    #[test]
    fn test_parse_skips_comments_and_extra_columns() {
        let data = b"# assembly hg38\n\nchrM 16569 extra\n";
        let sizes = parse_chrom_sizes_bytes(data).unwrap();
        assert_eq!(sizes, vec![("chrM".to_string(), 16569)]);
    }

    #[test]
    fn test_parse_errors_carry_line_number() {
        let err = parse_chrom_sizes_bytes(b"chr1\t100\nchr2\n").unwrap_err();
        assert!(matches!(err, GenomeFileError::InvalidRecord { line: 2, .. }));

        let err = parse_chrom_sizes_bytes(b"chr1\tlots\n").unwrap_err();
        assert!(matches!(err, GenomeFileError::ParseInt { line: 1, .. }));
    }

    #[test]
    fn test_assembly_name() {
        assert_eq!(assembly_name(&PathBuf::from("/data/hg19.chrom.sizes")), "hg19");
        assert_eq!(assembly_name(&PathBuf::from("mm10.chrom.sizes.gz")), "mm10");
    }

    #[test]
    fn test_missing_file() {
        let err = load_chrom_sizes(&PathBuf::from("/nonexistent/hg19.chrom.sizes")).unwrap_err();
        assert!(matches!(err, GenomeFileError::FileNotFound(_)));
    }

    #[test]
    fn test_load_region_missing_file() {
        let err = load_region(&PathBuf::from("/nonexistent/hg19.chrom.sizes"), "chr1:1-2").unwrap_err();
        assert!(matches!(err, GenomeViewError::GenomeFile(GenomeFileError::FileNotFound(_))));
    }
}
