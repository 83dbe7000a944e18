use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Viewer configuration, loaded from JSON with per-field defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Initial window size in logical pixels
    pub window_width: u32,
    pub window_height: u32,
    /// Dimensions of the synthetic remote framebuffer
    pub source_width: usize,
    pub source_height: usize,
    /// Milliseconds between synthetic framebuffer updates
    pub update_interval_ms: u64,
    /// Starting zoom factor
    pub initial_scale: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            source_width: 640,
            source_height: 480,
            update_interval_ms: 200,
            initial_scale: 1.0,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.update_interval_ms, 200);
        assert_eq!(config.initial_scale, 1.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{"source_width": 1024}"#).unwrap();
        assert_eq!(config.source_width, 1024);
        assert_eq!(config.source_height, 480);
    }

    #[test]
    fn test_roundtrip() {
        let config = ViewerConfig { initial_scale: 2.0, ..Default::default() };
        let json = serde_json::to_string(&config).unwrap();
        let back: ViewerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.initial_scale, 2.0);
    }
}
