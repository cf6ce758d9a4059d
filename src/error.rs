//! Errors raised while loading and deriving round data.

/// Errors returned by the derivation layer and the loader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dataset, file or required column is absent. The dependent
    /// derivation is skipped.
    #[error("missing data in {dataset}: {detail}")]
    MissingData {
        dataset: &'static str,
        detail: String,
    },

    /// A ratio's denominator is zero.
    #[error("{quantity} is undefined: zero denominator")]
    DivisionUndefined { quantity: &'static str },

    /// A row lacks a required field or a field does not parse.
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[cfg(any(feature = "loader", feature = "export"))]
    #[error("i/o error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// Writing rows to a caller-supplied writer failed.
    #[cfg(feature = "export")]
    #[error("write error: {0}")]
    Write(std::io::Error),

    #[cfg(feature = "loader")]
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "export")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// `numerator / denominator`, or `DivisionUndefined` when the denominator is zero.
#[inline]
pub(crate) fn ratio(numerator: f64, denominator: f64, quantity: &'static str) -> Result<f64> {
    if denominator == 0.0 {
        return Err(Error::DivisionUndefined { quantity });
    }
    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::DivisionUndefined { quantity: "cancel ratio" }.to_string(),
            "cancel ratio is undefined: zero denominator"
        );
        assert_eq!(
            Error::MalformedRow {
                line: 4,
                reason: "missing bidVol2".into()
            }
            .to_string(),
            "malformed row at line 4: missing bidVol2"
        );
        assert_eq!(
            Error::MissingData {
                dataset: "order_book",
                detail: "file not found".into()
            }
            .to_string(),
            "missing data in order_book: file not found"
        );
    }

    #[test]
    fn is_error() {
        let err: Box<dyn std::error::Error> = Box::new(Error::DivisionUndefined { quantity: "vwap" });
        assert!(err.to_string().contains("vwap"));
    }

    #[test]
    fn ratio_zero_denominator() {
        assert!(matches!(
            ratio(1.0, 0.0, "x"),
            Err(Error::DivisionUndefined { quantity: "x" })
        ));
        assert_eq!(ratio(1.0, 4.0, "x").ok(), Some(0.25));
    }
}
