use thiserror::Error;

/// Failures surfaced by the upgrade pipeline. One variant per stage: reading
/// the source file, decoding it, and rendering the upgraded document.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// Source file could not be opened or read.
    #[error("unable to open source file: {0}")]
    Read(#[from] std::io::Error),

    /// Source bytes are not valid TOML for the legacy schema.
    #[error("unable to parse source file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Upgraded document could not be encoded as YAML.
    #[error("unable to render destination file: {0}")]
    Serialize(#[from] serde_yaml::Error),
}
