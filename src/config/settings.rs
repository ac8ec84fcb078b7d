use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::api::providers::Provider;
use crate::session::export::EXPORT_FILE_NAME;
use crate::solver::DEFAULT_LANGUAGE;
use crate::utils::secrets::normalize_api_key;

const APP_DIR_NAME: &str = ".quant_solver";
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Project-scoped config; a plain `config.toml` in a project belongs to someone else.
pub const PROJECT_CONFIG_FILE_NAME: &str = ".quant_solver.toml";
pub const DEFAULT_MODEL: &str = "nvidia/llama-3.1-nemotron-70b-instruct";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: String,
    pub api_key: Option<String>,
    /// Model id passed to the provider
    pub model: Option<String>,
    /// Base URL override for OpenAI-compatible providers
    pub base_url: Option<String>,
    /// Language the solution is requested in and extracted for
    pub language: String,
    /// Request timeout for the model call; none means wait indefinitely
    pub timeout_secs: Option<u64>,
    /// Default file name for transcript exports
    pub export_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: "openrouter".to_string(),
            api_key: None,
            model: Some(DEFAULT_MODEL.to_string()),
            base_url: None,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: None,
            export_file: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl Settings {
    pub fn load_with(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let path = resolve_config_path(project_root, explicit)?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let value: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config TOML at {}", path.display()))?;
        Ok(value)
    }

    pub fn save_with(&self, project_root: Option<&Path>, explicit: Option<&Path>) -> Result<PathBuf> {
        let (dir, path) = resolve_config_dir_and_file(project_root, explicit)?;
        if !dir.exists() {
            fs::create_dir_all(&dir).with_context(|| format!(
                "Failed to create config directory at {}",
                dir.display()
            ))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(path)
    }

    /// Write a default config, refusing to clobber an existing one unless `force`.
    pub fn init_scoped(force: bool, project_root: Option<&Path>) -> Result<PathBuf> {
        let (_, file) = resolve_config_dir_and_file(project_root, None)?;
        if file.exists() && !force {
            bail!("Config already exists at {} (use --force to overwrite)", file.display());
        }
        Self::default().save_with(project_root, None)
    }

    /// `dir` if it holds a project config created by `config init --scope project`.
    pub fn project_root(dir: &Path) -> Option<&Path> {
        dir.join(PROJECT_CONFIG_FILE_NAME).is_file().then_some(dir)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api-key" | "api_key" => self.api_key = Some(normalize_api_key(value)),
            "provider" => {
                Provider::parse(value)?;
                self.provider = value.to_lowercase();
            }
            "model" => self.model = Some(value.to_owned()),
            "base-url" | "base_url" => self.base_url = Some(value.to_owned()),
            "language" => self.language = value.to_owned(),
            "timeout" | "timeout_secs" => {
                let secs = value
                    .parse::<u64>()
                    .with_context(|| format!("Invalid timeout `{}`, expected whole seconds", value))?;
                self.timeout_secs = Some(secs);
            }
            "export-file" | "export_file" => self.export_file = value.to_owned(),
            _ => bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn provider(&self) -> Result<Provider> {
        Provider::parse(&self.provider)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Config key first, then the provider's environment variable.
    pub fn resolve_api_key(&self, provider: Provider) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| provider.api_key_env().and_then(|var| std::env::var(var).ok()))
            .map(|k| normalize_api_key(&k))
            .filter(|k| !k.is_empty())
    }
}

fn config_dir_path() -> Result<PathBuf> {
    let home = home_dir().context("Cannot resolve home directory")?;
    Ok(home.join(APP_DIR_NAME))
}

fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir_path()?.join(CONFIG_FILE_NAME))
}

fn resolve_config_path(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit { return Ok(p.to_path_buf()); }
    if let Some(root) = project_root { return Ok(root.join(PROJECT_CONFIG_FILE_NAME)); }
    config_file_path()
}

fn resolve_config_dir_and_file(project_root: Option<&Path>, explicit: Option<&Path>) -> Result<(PathBuf, PathBuf)> {
    if let Some(p) = explicit {
        let dir = p.parent().unwrap_or_else(|| Path::new("."));
        return Ok((dir.to_path_buf(), p.to_path_buf()));
    }
    if let Some(root) = project_root {
        return Ok((root.to_path_buf(), root.join(PROJECT_CONFIG_FILE_NAME)));
    }
    let dir = config_dir_path()?;
    Ok((dir.clone(), dir.join(CONFIG_FILE_NAME)))
}
