//! Parsing options and configuration.

/// Options for loading PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for per-page text extraction
    pub error_mode: ErrorMode,

    /// Whether documents of a collection are extracted in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable strict mode (fail on the first unreadable page).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            parallel: true,
        }
    }
}

/// Error handling mode during page text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    Strict,
    /// Substitute empty text for unreadable pages and continue
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().strict().sequential();

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(!options.parallel);
    }

    #[test]
    fn test_error_mode_override() {
        let options = ParseOptions::new().strict().with_error_mode(ErrorMode::Lenient);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.parallel);
    }
}
