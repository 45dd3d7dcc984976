// crates/embed_code/src/config.rs

use anyhow::{Context, Result};
use cell_renderer::{OutputFormat, RenderOptions};
use image_namer::DEFAULT_TEMPLATE as DEFAULT_IMAGE_NAME_TEMPLATE;
use lang_support::{CommentStyles, DEFAULT_INCLUDED_LANGUAGES};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the vault root when `--vault` is absent.
pub const VAULT_ENV: &str = "EMBED_CODE_VAULT";

/// Rendering settings. Every key is optional in the TOML file; missing
/// keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Comma separated languages accepted as `embed-<lang>`.
    pub included_languages: String,
    pub hide_title: bool,
    pub comment_styles: CommentStyles,
    pub default_start_marker: String,
    pub default_end_marker: String,
    pub jupyter_support: bool,
    pub jupyter_output_format: OutputFormat,
    /// In characters.
    pub max_output_size: usize,
    pub save_images_to_attachments: bool,
    /// Vault-relative folder; empty means the vault root.
    pub images_folder_path: String,
    pub image_name_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            included_languages: DEFAULT_INCLUDED_LANGUAGES.to_string(),
            hide_title: false,
            comment_styles: CommentStyles::default(),
            default_start_marker: "BEGIN_SNIPPET".to_string(),
            default_end_marker: "END_SNIPPET".to_string(),
            jupyter_support: true,
            jupyter_output_format: OutputFormat::Markdown,
            max_output_size: 100_000,
            save_images_to_attachments: false,
            images_folder_path: String::new(),
            image_name_template: DEFAULT_IMAGE_NAME_TEMPLATE.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            output_format: self.jupyter_output_format,
            max_output_size: self.max_output_size,
        }
    }
}

/// Runtime configuration composed from CLI flags and the environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub settings: Settings,
    pub vault_root: PathBuf,
    pub verbose: bool,
}

impl AppConfig {
    /// `--config` file (or defaults), `--vault` then `EMBED_CODE_VAULT` then
    /// the current directory.
    pub fn resolve(config_file: Option<&Path>, vault: Option<&Path>, verbose: bool) -> Result<Self> {
        let settings = match config_file {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let vault_root = match vault {
            Some(dir) => dir.to_path_buf(),
            None => match env::var(VAULT_ENV) {
                Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => env::current_dir().context("Failed to get current directory")?,
            },
        };
        Ok(Self {
            settings,
            vault_root,
            verbose,
        })
    }
}
