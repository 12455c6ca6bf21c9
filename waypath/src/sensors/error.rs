use thiserror::Error;

/// Errors from reading the traveler's location.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The HTTP request itself failed (connectivity, timeout, DNS).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The service answered but the payload could not be read as a
    /// coordinate.
    #[error("Malformed location response: {0}")]
    Malformed(String),
}

/// Errors from reading the traveler's heading.
#[derive(Debug, Error)]
pub enum HeadingError {
    /// No orientation reading is available.
    #[error("Heading unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = LocationError::Http("timed out".to_string());
        assert!(e.to_string().contains("timed out"));

        let e = LocationError::Malformed("missing loc field".to_string());
        assert!(e.to_string().contains("missing loc field"));

        let e = HeadingError::Unavailable("no orientation sensor".to_string());
        assert!(e.to_string().contains("no orientation sensor"));
    }
}
