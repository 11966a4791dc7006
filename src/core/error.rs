//! Error types for genome-viewport
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for genome-viewport operations
#[derive(Debug, Error)]
pub enum GenomeViewError {
    /// Coordinate / geometry errors
    #[error("Viewport error: {0}")]
    Viewport(#[from] ViewportError),

    /// Genome or annotation file errors
    #[error("Genome file error: {0}")]
    GenomeFile(#[from] GenomeFileError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid-argument errors raised by the coordinate model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    /// Pixel width must be positive and finite
    #[error("Invalid pixel width: {0} (must be positive and finite)")]
    InvalidWidth(f64),

    /// Expansion ratio must be non-negative and finite
    #[error("Invalid expansion ratio: {0} (must be >= 0 and finite)")]
    InvalidRatio(f64),

    /// Zoom factor must be positive and finite
    #[error("Invalid zoom factor: {0}")]
    InvalidZoom(f64),

    /// Region bounds are not increasing
    #[error("Invalid coordinate range: start ({start}) >= end ({end})")]
    InvalidRange { start: i64, end: i64 },

    /// Region or base lies outside the navigation context
    #[error("Coordinates {start}-{end} lie outside [0, {total}]")]
    OutOfBounds { start: u64, end: u64, total: u64 },

    /// Feature name not present in the navigation context
    #[error("Feature not found in navigation context: {0}")]
    FeatureNotFound(String),

    /// Two features share a name
    #[error("Duplicate feature name: {0}")]
    DuplicateFeature(String),

    /// Feature with zero length
    #[error("Feature has zero length: {0}")]
    EmptyFeature(String),

    /// Navigation context without features
    #[error("Navigation context '{0}' has no features")]
    EmptyContext(String),

    /// Locus string could not be parsed
    #[error("Invalid locus '{0}': expected chr:start-end")]
    InvalidLocus(String),
}

/// Errors that can occur while reading chrom.sizes or cytoband files
#[derive(Debug, Error)]
pub enum GenomeFileError {
    /// Wrong number of tab-separated fields
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    /// Failed to parse integer
    #[error("Failed to parse integer '{value}' at line {line}")]
    ParseInt { line: usize, value: String },

    /// File contained no records
    #[error("No records found in {0}")]
    Empty(PathBuf),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Building the navigation context failed
    #[error("Invalid genome: {0}")]
    Viewport(#[from] ViewportError),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for genome-viewport operations
pub type Result<T> = std::result::Result<T, GenomeViewError>;

/// Result type alias for coordinate model operations
pub type ViewportResult<T> = std::result::Result<T, ViewportError>;

/// Result type alias for file parsing operations
pub type GenomeFileResult<T> = std::result::Result<T, GenomeFileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ViewportError::InvalidRange { start: 15, end: 10 };
        assert_eq!(err.to_string(), "Invalid coordinate range: start (15) >= end (10)");

        let err = GenomeFileError::ParseInt { line: 3, value: "abc".to_string() };
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_error_conversion() {
        let err: GenomeViewError = ViewportError::InvalidWidth(0.0).into();
        assert!(matches!(err, GenomeViewError::Viewport(ViewportError::InvalidWidth(_))));

        let err: GenomeFileError = ViewportError::EmptyContext("hg19".to_string()).into();
        assert!(err.to_string().contains("hg19"));
    }
}
