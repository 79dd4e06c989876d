use crate::detector::{DocumentOptions, StaffParams};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct StaffToolConfig {
    /// One rasterized page per entry, in page order.
    pub inputs: Vec<PathBuf>,
    /// File name prefix of the written crops. Defaults to the first input's
    /// file stem.
    #[serde(default)]
    pub stem: Option<String>,
    #[serde(default)]
    pub params: StaffParams,
    #[serde(default)]
    pub document: DocumentOptions,
    pub output: StaffOutputConfig,
}

impl StaffToolConfig {
    pub fn output_stem(&self) -> String {
        self.stem
            .clone()
            .or_else(|| {
                self.inputs
                    .first()
                    .and_then(|p| p.file_stem())
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "score".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct StaffOutputConfig {
    /// Directory receiving the staff crops, overviews and masks.
    pub dir: PathBuf,
    #[serde(rename = "summary_json", default)]
    pub summary_json: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub save_overview: bool,
    /// Save the opened line mask of every page (debugging aid).
    #[serde(default)]
    pub save_masks: bool,
}

fn default_true() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<StaffToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: StaffToolConfig = serde_json::from_str(
            r#"{ "inputs": ["pages/sonata_1.png"], "output": { "dir": "out" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.params, StaffParams::default());
        assert_eq!(cfg.document, DocumentOptions::default());
        assert!(cfg.output.save_overview);
        assert!(!cfg.output.save_masks);
        assert_eq!(cfg.output_stem(), "sonata_1");
    }

    #[test]
    fn nested_params_override_defaults() {
        let cfg: StaffToolConfig = serde_json::from_str(
            r#"{
                "inputs": [],
                "stem": "etude",
                "params": { "clustering": { "tolerance_px": 12.5 }, "margins": { "top": 10 } },
                "document": { "max_pages": 3, "parallel": false },
                "output": { "dir": "out", "summary_json": "out/summary.json", "save_overview": false }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.params.clustering.tolerance_px, 12.5);
        assert_eq!(cfg.params.clustering.min_lines_per_group, 3);
        assert_eq!(cfg.params.margins.top, 10);
        assert_eq!(cfg.params.margins.left, 30);
        assert_eq!(cfg.document.max_pages, Some(3));
        assert!(!cfg.document.parallel);
        assert!(!cfg.output.save_overview);
        assert_eq!(cfg.output_stem(), "etude");
    }
}
