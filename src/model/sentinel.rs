//! Diagnostic sentinels
//!
//! When no real disassembly can be produced, the panel shows one of these
//! fixed strings instead. The mapping layer treats any of them as "no valid
//! mapping available".

/// Prefix shared by the toolchain/file-kind sentinels. Any text starting with
/// it is treated as a no-mapping marker, even if it is not one of the exact
/// strings below.
pub const NO_PYTHON_PREFIX: &str = "No Python";

/// A fixed diagnostic shown in place of a disassembly listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// No interpreter could be resolved for the project
    NoToolchain,
    /// No file is selected in the host
    NoFile,
    /// The selected file is not a Python source file
    NotSourceFile,
    /// The host could not hand out the document text
    NoDocument,
    /// The disassembler failed (stderr output, timeout, launch failure)
    CompilationError,
}

impl Sentinel {
    /// Every sentinel, in declaration order
    pub const ALL: [Sentinel; 5] = [
        Sentinel::NoToolchain,
        Sentinel::NoFile,
        Sentinel::NotSourceFile,
        Sentinel::NoDocument,
        Sentinel::CompilationError,
    ];

    /// The exact, case-sensitive panel text for this sentinel
    pub fn as_str(self) -> &'static str {
        match self {
            Sentinel::NoToolchain => "No Python SDK",
            Sentinel::NoFile => "No file",
            Sentinel::NotSourceFile => "No Python file",
            Sentinel::NoDocument => "Cannot get document",
            Sentinel::CompilationError => "Compilation error",
        }
    }

    /// Recognize text that starts with one of the sentinels
    pub fn detect(text: &str) -> Option<Sentinel> {
        Self::ALL
            .into_iter()
            .find(|sentinel| text.starts_with(sentinel.as_str()))
    }

    pub fn to_text(self) -> String {
        self.as_str().to_string()
    }
}

impl std::fmt::Display for Sentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `text` carries no usable line mapping: blank, a known sentinel, or
/// anything starting with the "No Python" prefix.
pub fn is_no_mapping(text: &str) -> bool {
    text.trim().is_empty() || text.starts_with(NO_PYTHON_PREFIX) || Sentinel::detect(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sentinel_strings() {
        assert_eq!(Sentinel::NoToolchain.as_str(), "No Python SDK");
        assert_eq!(Sentinel::NoFile.as_str(), "No file");
        assert_eq!(Sentinel::NotSourceFile.as_str(), "No Python file");
        assert_eq!(Sentinel::NoDocument.as_str(), "Cannot get document");
        assert_eq!(Sentinel::CompilationError.as_str(), "Compilation error");
    }

    #[test]
    fn test_every_sentinel_is_no_mapping() {
        for sentinel in Sentinel::ALL {
            assert!(is_no_mapping(sentinel.as_str()), "{sentinel} should be recognized");
            assert_eq!(Sentinel::detect(sentinel.as_str()), Some(sentinel));
        }
    }

    #[test]
    fn test_prefix_and_blank() {
        assert!(is_no_mapping("No Python interpreter configured"));
        assert!(is_no_mapping(""));
        assert!(is_no_mapping("  \n\t\n"));
        assert!(!is_no_mapping("  1           0 RESUME 0"));
        // Case-sensitive
        assert!(!is_no_mapping("no file"));
    }
}
