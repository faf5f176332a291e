//! Document format detection.

use std::path::Path;

/// Serialization format of a CBOM document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// Format implied by a file extension, if it is a known one.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Format guessed from the document text.
    ///
    /// A leading `{` means JSON. Otherwise the first meaningful line must look
    /// like a YAML mapping key or a document marker.
    #[must_use]
    pub fn sniff(content: &str) -> Option<Self> {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();
        if trimmed.starts_with('{') {
            return Some(Self::Json);
        }
        let first = trimmed
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))?;
        if first == "---" || looks_like_mapping_key(first) {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    /// Extension first, then content.
    #[must_use]
    pub fn detect(path: Option<&Path>, content: &str) -> Option<Self> {
        path.and_then(Self::from_extension)
            .or_else(|| Self::sniff(content))
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn looks_like_mapping_key(line: &str) -> bool {
    match line.split_once(':') {
        Some((key, rest)) => {
            let key = key.trim_matches(|c| c == '"' || c == '\'');
            !key.is_empty()
                && !key.contains(char::is_whitespace)
                && (rest.is_empty() || rest.starts_with(' '))
        }
        None => false,
    }
}
