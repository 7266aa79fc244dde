use eink_quant::wire::FrameFormat;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Response header carrying [`fingerprint`] of the format an artifact was
/// encoded for.
pub const FRAME_FORMAT_HEADER: &str = "x-frame-format";

/// Stable identifier of a frame format.
///
/// Covers width, height and the ordered palette, so any change that would
/// make an artifact unreadable for the other side changes the fingerprint.
pub fn fingerprint(format: &FrameFormat) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"inkframe/v1");
    hasher.update(format.width().to_be_bytes());
    hasher.update(format.height().to_be_bytes());
    hasher.update((format.palette().len() as u32).to_be_bytes());
    for color in format.palette().colors() {
        hasher.update(color.to_bytes());
    }
    let result = hasher.finalize();
    hex::encode(&result[..16])
}

/// Human-readable description of a frame format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatInfo {
    pub width: u32,
    pub height: u32,
    /// Exact artifact length in bytes
    pub byte_len: usize,
    /// Hex colors in pen order
    pub palette: Vec<String>,
    pub fingerprint: String,
}

impl From<&FrameFormat> for FormatInfo {
    fn from(format: &FrameFormat) -> Self {
        Self {
            width: format.width(),
            height: format.height(),
            byte_len: format.byte_len(),
            palette: format
                .palette()
                .colors()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            fingerprint: fingerprint(format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eink_quant::{Palette, Rgb};

    fn format(width: u32, height: u32, colors: &[Rgb]) -> FrameFormat {
        FrameFormat::new(width, height, Palette::new(colors).unwrap()).unwrap()
    }

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn test_fingerprint_deterministic() {
        let a = fingerprint(&format(800, 480, &[BLACK, WHITE]));
        let b = fingerprint(&format(800, 480, &[BLACK, WHITE]));
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_fingerprint_differs_by_dimensions() {
        assert_ne!(
            fingerprint(&format(800, 480, &[BLACK, WHITE])),
            fingerprint(&format(480, 800, &[BLACK, WHITE]))
        );
    }

    #[test]
    fn test_fingerprint_differs_by_palette_order() {
        assert_ne!(
            fingerprint(&format(800, 480, &[BLACK, WHITE])),
            fingerprint(&format(800, 480, &[WHITE, BLACK]))
        );
    }

    #[test]
    fn test_format_info() {
        let info = FormatInfo::from(&format(4, 2, &[BLACK, WHITE]));
        assert_eq!(info.byte_len, 8);
        assert_eq!(info.palette, vec!["#000000", "#FFFFFF"]);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["width"], 4);
    }
}
