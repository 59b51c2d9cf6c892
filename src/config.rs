//! TOML configuration.
//!
//! Every section is optional; a missing file or table falls back to the
//! defaults below, which reproduce the fixed policy of the router
//! (similarity threshold 0.4, local all-minilm-l6-v2 embeddings, spelling on).

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub spelling: SpellingConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// Minimum cosine similarity (inclusive) for the semantic fallback.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

fn default_similarity_threshold() -> f32 {
    0.4
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_dims")]
    pub dims: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            dims: default_dims(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            url: None,
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}
fn default_dims() -> usize {
    384
}
fn default_batch_size() -> usize {
    64
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpellingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Word list replacing the bundled dictionary, one `word [count]` per line.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
}

impl Default for SpellingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dictionary: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> usize {
    25 * 1024 * 1024
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Loads `path` when it exists, otherwise returns the defaults.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

fn validate(config: &Config) -> Result<()> {
    if !(-1.0..=1.0).contains(&config.routing.similarity_threshold) {
        bail!("routing.similarity_threshold must be in [-1.0, 1.0]");
    }

    if config.embedding.dims == 0 {
        bail!("embedding.dims must be > 0");
    }
    if config.embedding.batch_size == 0 {
        bail!("embedding.batch_size must be > 0");
    }

    match config.embedding.provider.as_str() {
        "hash" | "local" => {}
        "ollama" => {
            if config.embedding.model.is_none() {
                bail!("embedding.model must be specified when provider is 'ollama'");
            }
        }
        other => bail!(
            "Unknown embedding provider: '{}'. Must be hash, ollama, or local.",
            other
        ),
    }

    if config.extract.max_file_bytes == 0 {
        bail!("extract.max_file_bytes must be > 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.routing.similarity_threshold, 0.4);
        assert_eq!(config.embedding.provider, "local");
        assert!(config.embedding.model.is_none());
        assert_eq!(config.embedding.dims, 384);
        assert!(config.spelling.enabled);
        assert!(config.spelling.dictionary.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_or_default(Path::new("/nonexistent/relqa.toml")).unwrap();
        assert_eq!(config.embedding.provider, "local");
    }

    #[test]
    fn parses_all_tables() {
        let file = write_config(
            r#"
[routing]
similarity_threshold = 0.55

[embedding]
provider = "ollama"
model = "nomic-embed-text"
dims = 768
url = "http://10.0.0.2:11434"

[spelling]
enabled = false

[extract]
max_file_bytes = 1024
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.routing.similarity_threshold, 0.55);
        assert_eq!(config.embedding.model.as_deref(), Some("nomic-embed-text"));
        assert_eq!(config.embedding.url.as_deref(), Some("http://10.0.0.2:11434"));
        assert!(!config.spelling.enabled);
        assert_eq!(config.extract.max_file_bytes, 1024);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let file = write_config("[routing]\nsimilarity_threshold = 1.5\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn rejects_unknown_provider() {
        let file = write_config("[embedding]\nprovider = \"openai\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unknown embedding provider"));
    }

    #[test]
    fn ollama_requires_model() {
        let file = write_config("[embedding]\nprovider = \"ollama\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn hash_provider_keeps_other_defaults() {
        let file = write_config("[embedding]\nprovider = \"hash\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.embedding.provider, "hash");
        assert_eq!(config.embedding.dims, 384);
        assert_eq!(config.routing.similarity_threshold, 0.4);
    }

    #[test]
    fn rejects_zero_dims() {
        let file = write_config("[embedding]\ndims = 0\n");
        assert!(load_config(file.path()).is_err());
    }
}
