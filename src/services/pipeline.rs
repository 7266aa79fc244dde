//! Encode side: source image to wire artifact.

use std::io::Write;
use std::path::{Path, PathBuf};

use eink_quant::wire::{self, FrameFormat};
use eink_quant::{FrameQuantizer, IndexGrid, PixelGrid};

use crate::error::{ConfigError, PrepareError};
use crate::models::{AppConfig, PrepareConfig};
use crate::rendering::encode_indexed_png;

/// A quantized frame and its wire bytes.
#[derive(Debug, Clone)]
pub struct PreparedFrame {
    pub bytes: Vec<u8>,
    pub indices: IndexGrid,
}

/// Preprocessor, quantizer and encoder bound to one frame format.
#[derive(Debug, Clone)]
pub struct PreparePipeline {
    format: FrameFormat,
    quantizer: FrameQuantizer,
}

impl PreparePipeline {
    pub fn new(format: FrameFormat, prepare: &PrepareConfig) -> Self {
        let options = prepare
            .preprocess_options()
            .resize(format.width(), format.height());
        let quantizer = FrameQuantizer::new(format.palette().clone())
            .preprocess(options)
            .dither(prepare.dither);
        Self { format, quantizer }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.frame_format()?, &config.prepare))
    }

    pub fn format(&self) -> &FrameFormat {
        &self.format
    }

    /// Decode any supported image file into an RGB grid.
    pub fn load_source(path: &Path) -> Result<PixelGrid, PrepareError> {
        if !path.is_file() {
            return Err(PrepareError::SourceMissing(path.to_path_buf()));
        }

        let image = image::open(path).map_err(|e| PrepareError::SourceCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let rgb = image.into_rgb8();
        let (width, height) = rgb.dimensions();

        tracing::info!(path = %path.display(), width, height, "Loaded source image");

        Ok(PixelGrid::from_rgb_bytes(width, height, rgb.as_raw())?)
    }

    /// Preprocess, quantize and encode an already loaded grid.
    pub fn prepare(&self, source: PixelGrid) -> Result<PreparedFrame, PrepareError> {
        let options = self.quantizer.preprocess_options();
        tracing::debug!(
            brightness = options.brightness,
            contrast = options.contrast,
            resized = source.dimensions() != self.format.dimensions(),
            "Preprocessing source"
        );

        let indices = self.quantizer.quantize(source);
        tracing::info!(
            mode = %self.quantizer.mode(),
            pixels = indices.indices().len(),
            "Quantization finished"
        );

        let bytes = wire::encode(&indices, &self.format)?;
        Ok(PreparedFrame { bytes, indices })
    }

    pub fn prepare_file(&self, path: &Path) -> Result<PreparedFrame, PrepareError> {
        self.prepare(Self::load_source(path)?)
    }

    /// Indexed PNG of what the panel will show.
    pub fn preview_png(&self, frame: &PreparedFrame) -> Result<Vec<u8>, PrepareError> {
        encode_indexed_png(&frame.indices, self.format.palette())
    }
}

/// Write `bytes` to `path` through a sibling temporary file.
///
/// The destination is either left untouched or fully replaced.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), PrepareError> {
    let tmp = temp_sibling(path);
    let result = (|| {
        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        std::fs::rename(&tmp, path)
    })();

    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Artifact written");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
