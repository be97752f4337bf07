//! Parser for rowcheck rule catalogs (YAML/TOML formats).
//!
//! This module turns catalog documents into a compiled [`RuleCatalog`]. The
//! catalog shipped with the tool is embedded at build time and available
//! through [`builtin_catalog`].
//!
//! # Example
//!
//! ```rust
//! use rowcheck_parser::parse_yaml;
//!
//! let yaml = r#"
//! rule_sets:
//!   - name: vendor
//!     fields:
//!       - position: 0
//!         type: str
//!         allow_empty: false
//!         strings: ["N/A"]
//! "#;
//!
//! let catalog = parse_yaml(yaml).expect("Failed to parse catalog");
//! assert_eq!(catalog.names(), vec!["vendor"]);
//! ```

use rowcheck_core::{CatalogDefinition, ConfigError, RuleCatalog};
use std::path::Path;
use thiserror::Error;

/// The catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../catalogs/builtin.toml");

/// Errors that can occur during catalog parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The document parsed but does not describe a valid catalog
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a catalog definition from a YAML string without compiling it.
pub fn parse_yaml_definition(content: &str) -> Result<CatalogDefinition> {
    Ok(serde_yaml_ng::from_str(content)?)
}

/// Parse a catalog definition from a TOML string without compiling it.
pub fn parse_toml_definition(content: &str) -> Result<CatalogDefinition> {
    toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
}

/// Parse and compile a catalog from a YAML string.
pub fn parse_yaml(content: &str) -> Result<RuleCatalog> {
    Ok(RuleCatalog::compile(&parse_yaml_definition(content)?)?)
}

/// Parse and compile a catalog from a TOML string.
///
/// # Example
///
/// ```rust
/// use rowcheck_parser::parse_toml;
///
/// let toml = r#"
/// [[rule_sets]]
/// name = "routing"
///
/// [[rule_sets.fields]]
/// position = 0
/// type = "aba"
/// allow_empty = false
/// validate = true
/// "#;
///
/// let catalog = parse_toml(toml).unwrap();
/// assert!(catalog.get("routing").is_some());
/// ```
pub fn parse_toml(content: &str) -> Result<RuleCatalog> {
    Ok(RuleCatalog::compile(&parse_toml_definition(content)?)?)
}

/// Detect the catalog format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `CatalogFormat::Yaml`
/// * `.toml` → `CatalogFormat::Toml`
pub fn detect_format(path: &Path) -> Result<CatalogFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(CatalogFormat::Yaml),
        "toml" => Ok(CatalogFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a catalog from a file with automatic format detection.
///
/// ```no_run
/// use rowcheck_parser::parse_file;
/// use std::path::Path;
///
/// let catalog = parse_file(Path::new("rules/site.yml")).unwrap();
/// println!("Loaded rule sets: {}", catalog.names().join(" "));
/// ```
pub fn parse_file(path: &Path) -> Result<RuleCatalog> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        CatalogFormat::Yaml => parse_yaml(&content),
        CatalogFormat::Toml => parse_toml(&content),
    }
}

/// Returns the catalog shipped with the tool (`novalidate`, `employee`, `customer`).
pub fn builtin_catalog() -> Result<RuleCatalog> {
    parse_toml(BUILTIN_CATALOG)
}
