//! Configuration structures for invoice scanning.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the cufe tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CufeConfig {
    /// Where invoices are read from.
    pub input: InputConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

/// Input folder and file selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Folder holding the invoice PDFs.
    pub folder: PathBuf,

    /// Glob pattern used when scanning the whole folder.
    pub pattern: String,

    /// Match the pattern case-sensitively.
    pub case_sensitive: bool,

    /// File names expected in the folder, processed in this order.
    pub expected_files: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("Facturas"),
            pattern: "*.pdf".to_string(),
            case_sensitive: false,
            expected_files: [
                "E54180324100719R001359975500.PDF",
                "E54180324100737R001359977300.PDF",
                "E54200324101609R001360619800.PDF",
                "E54200324101610R001360620700.PDF",
                "E54240424095827R001365163400.PDF",
                "E54240424095827R001365163600.PDF",
                "E54270424123712R001365720600.PDF",
                "E54300424101133R001366167400.PDF",
                "E54110424120908R001363335100.PDF",
                "E54130324071704R001359470200.PDF",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("invoices.db"),
        }
    }
}

impl CufeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CufeConfig::default();
        assert_eq!(config.input.folder, PathBuf::from("Facturas"));
        assert_eq!(config.input.pattern, "*.pdf");
        assert_eq!(config.input.expected_files.len(), 10);
        assert_eq!(config.store.path, PathBuf::from("invoices.db"));
        assert_eq!(config.input.expected_files[0], "E54180324100719R001359975500.PDF");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CufeConfig =
            serde_json::from_str(r#"{"input": {"folder": "/srv/facturas"}}"#).unwrap();
        assert_eq!(config.input.folder, PathBuf::from("/srv/facturas"));
        assert_eq!(config.input.pattern, "*.pdf");
        assert_eq!(config.store.path, PathBuf::from("invoices.db"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CufeConfig::default();
        config.input.expected_files = vec!["a.pdf".to_string()];
        config.save(&path).unwrap();

        let loaded = CufeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.input.expected_files, vec!["a.pdf".to_string()]);
    }
}
