//! Writes query results to `<output_dir>/<building>-<date>-<begin>-<end>.{json,png}`.

use crate::error::Result;
use crate::model::structs::Building;
use crate::render::{self, RenderMeta, Renderer};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Image,
    Both,
}

impl OutputFormat {
    pub fn json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn image(self) -> bool {
        matches!(self, OutputFormat::Image | OutputFormat::Both)
    }
}

/// File stem shared by the JSON and PNG outputs of one query.
pub fn file_stem(building: Building, date: &str, begin: u8, end: u8) -> String {
    format!("{}-{}-{}-{}", building.file_code(), date, begin, end)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn write_json(dir: &Path, stem: &str, names: &[String]) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(format!("{stem}.json"));
    std::fs::write(&path, serde_json::to_string(names)?)?;
    tracing::info!(path = %path.display(), "wrote json");
    Ok(path)
}

pub fn write_png(
    dir: &Path,
    stem: &str,
    names: &[String],
    meta: &RenderMeta,
    renderer: &Renderer,
) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(format!("{stem}.png"));
    let image = renderer.render_free_classrooms(names, meta);
    std::fs::write(&path, render::encode_png(&image)?)?;
    tracing::info!(path = %path.display(), "wrote image");
    Ok(path)
}

/// Exports one period's result in the selected formats.
pub struct Exporter {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub renderer: Renderer,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat, renderer: Renderer) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            renderer,
        }
    }

    pub fn export(
        &self,
        building: Building,
        date: &str,
        period: u8,
        names: &[String],
    ) -> Result<Vec<PathBuf>> {
        let stem = file_stem(building, date, period, period);
        let mut written = Vec::new();
        if self.format.json() {
            written.push(write_json(&self.output_dir, &stem, names)?);
        }
        if self.format.image() {
            let meta = RenderMeta::new(building, date, period);
            written.push(write_png(&self.output_dir, &stem, names, &meta, &self.renderer)?);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    #[test]
    fn stem_uses_building_code_date_and_range() {
        assert_eq!(file_stem(Building::Engineering, "2025-03-01", 3, 4), "gxg-2025-03-01-3-4");
    }

    #[test]
    fn json_export_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("free-classroom-data");
        let names = vec!["GX101".to_string(), "GX102".to_string()];

        let path = write_json(&dir, "gxg-2025-03-01-1-1", &names).unwrap();
        assert_eq!(path, dir.join("gxg-2025-03-01-1-1.json"));
        let back: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, names);
    }

    #[test]
    fn both_format_writes_json_and_png() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = Renderer::with_font(RenderConfig::default(), None);
        let exporter = Exporter::new(tmp.path(), OutputFormat::Both, renderer);
        let written = exporter
            .export(Building::Engineering, "2025-03-01", 5, &["GX201".to_string()])
            .unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("gxg-2025-03-01-5-5.json"));
        assert!(written[1].ends_with("gxg-2025-03-01-5-5.png"));
        let png = std::fs::read(&written[1]).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
