use thiserror::Error;

/// Everything that can stop a running mean from being produced.
///
/// No variant is ever returned alongside a partial result: either the whole
/// output sequence is built, or one of these comes back instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunMeanError {
    #[error("runmean: invalid width {0} (must be >= 1)")]
    InvalidWidth(i64),

    #[error("runmean: invalid {name} code {code}")]
    InvalidOption { name: &'static str, code: i32 },

    #[error("runmean: null {0} pointer with non-zero length")]
    NullPointer(&'static str),

    #[error("runmean: opencl failure: {0}")]
    OpenCl(String),
}

impl RunMeanError {
    /// Status code reported across the C boundary. Zero is reserved for success.
    pub fn status_code(&self) -> i32 {
        match self {
            RunMeanError::InvalidWidth(_) | RunMeanError::InvalidOption { .. } => 1,
            RunMeanError::NullPointer(_) => 2,
            RunMeanError::OpenCl(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RunMeanError;

    #[test]
    fn runmean_error_status_codes() {
        assert_eq!(RunMeanError::InvalidWidth(0).status_code(), 1);
        assert_eq!(
            RunMeanError::InvalidOption { name: "align", code: 7 }.status_code(),
            1
        );
        assert_eq!(RunMeanError::NullPointer("input").status_code(), 2);
        assert_eq!(RunMeanError::OpenCl("no device".to_string()).status_code(), 3);
    }

    #[test]
    fn runmean_error_display() {
        assert_eq!(
            RunMeanError::InvalidWidth(-3).to_string(),
            "runmean: invalid width -3 (must be >= 1)"
        );
        assert_eq!(
            RunMeanError::InvalidOption { name: "boundary", code: 9 }.to_string(),
            "runmean: invalid boundary code 9"
        );
    }
}
