//! Scene configuration.
//!
//! Every field has a default, so an empty file (or no file) yields the stock
//! scene. Relative paths resolve against the directory of the config file;
//! the built-in defaults resolve against this crate's `assets/` directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use winit::dpi::LogicalSize;

use tandem_engine::paint::Color;
use tandem_engine::window::RuntimeConfig;

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV: &str = "TANDEM_SCENE_CONFIG";

/// Number of sprites the scene animates.
pub const SPRITE_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,

    /// Straight-alpha RGBA.
    pub clear_color: [f32; 4],

    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,

    /// Sprite images in draw order: the pulsing sprite, then the orbiting one.
    pub sprites: Vec<PathBuf>,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Project 1: Simple 2D Scene".to_string(),
            width: 640,
            height: 480,
            clear_color: [0.1922, 0.549, 0.9059, 1.0],
            vertex_shader: PathBuf::from("shaders/vertex_textured.wgsl"),
            fragment_shader: PathBuf::from("shaders/fragment_textured.wgsl"),
            sprites: vec![
                PathBuf::from("sprites/chrome.png"),
                PathBuf::from("sprites/firefox.png"),
            ],
            base_dir: default_asset_dir(),
        }
    }
}

fn default_asset_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

impl SceneConfig {
    /// Reads the file named by `TANDEM_SCENE_CONFIG`, or returns the defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                log::info!("{CONFIG_ENV} not set; using built-in scene config");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Loads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene config {}", path.display()))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        log::info!("loading scene config {}", path.display());

        Self::from_toml_str(&src, base_dir)
            .with_context(|| format!("invalid scene config {}", path.display()))
    }

    /// Parses TOML; relative paths will resolve against `base_dir`.
    pub fn from_toml_str(src: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config: SceneConfig = toml::from_str(src).context("failed to parse TOML")?;
        config.base_dir = base_dir.into();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.sprites.len() == SPRITE_COUNT,
            "expected {SPRITE_COUNT} sprites, got {}",
            self.sprites.len()
        );
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "window size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        anyhow::ensure!(
            self.clear_color.iter().all(|c| c.is_finite()),
            "clear_color must be finite"
        );
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn vertex_shader_path(&self) -> PathBuf {
        self.resolve(&self.vertex_shader)
    }

    pub fn fragment_shader_path(&self) -> PathBuf {
        self.resolve(&self.fragment_shader)
    }

    pub fn sprite_paths(&self) -> Vec<PathBuf> {
        self.sprites.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn clear_color(&self) -> Color {
        Color::from(self.clear_color).clamped()
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width as f64, self.height as f64),
            resizable: false,
        }
    }
}
