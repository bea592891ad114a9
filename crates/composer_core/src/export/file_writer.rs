//! File-backed collaborator that writes the snapshot as a printable page.
//!
//! Produces `<output_dir>/<destination stem>.html` with an `@page` rule that
//! carries the page size, orientation and margins, so any print-to-PDF
//! engine can paginate it. Raster scale and density are recorded as meta
//! tags for downstream tools.

use crate::export::bridge::{RasterizeError, Rasterizer};
use crate::export::options::ExportOptions;
use crate::export::snapshot::RenderSnapshot;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};

/// Writes snapshots into one output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFileWriter {
    output_dir: PathBuf,
}

impl SnapshotFileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path written for the given options.
    pub fn output_path(&self, options: &ExportOptions) -> PathBuf {
        self.output_dir
            .join(format!("{}.html", options.destination_stem()))
    }
}

/// Writes synchronously with `std::fs`: one small page per export, and the
/// future never yields, so it runs on any executor without a runtime.
#[async_trait]
impl Rasterizer for SnapshotFileWriter {
    async fn rasterize(
        &self,
        snapshot: RenderSnapshot,
        options: &ExportOptions,
    ) -> Result<(), RasterizeError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(options);
        std::fs::write(&path, printable_page(&snapshot, options))?;
        debug!(
            "event=snapshot_written module=export status=ok bytes={} path={}",
            snapshot.markup().len(),
            path.display()
        );
        Ok(())
    }
}

fn printable_page(snapshot: &RenderSnapshot, options: &ExportOptions) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"raster-scale\" content=\"{scale}\">\n\
         <meta name=\"image-quality\" content=\"{quality}\">\n\
         <style>@page {{ size: {size} {orientation}; margin: {margin}; }}</style>\n\
         </head>\n<body>\n{markup}\n</body>\n</html>\n",
        scale = options.raster_scale,
        quality = options.content_density.quality,
        size = options.page_size.css_name(),
        orientation = options.orientation.css_name(),
        margin = options.margins.css_value(),
        markup = snapshot.markup(),
    )
}
