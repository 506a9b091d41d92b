//! Fixed-layout certificate rendering.
//!
//! Renders the 1000x700 completion certificate onto an RGBA canvas. Text is
//! drawn with the configured TTF font; when no font file is available the
//! fontless path still produces the full layout (background, borders,
//! signature rule) so certificate generation never hard-fails on a missing
//! asset.

use std::io::Cursor;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use chrono::NaiveDate;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect;

use crate::CertificateError;

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 1000;
/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 700;

const BACKGROUND: Rgba<u8> = Rgba([252, 250, 245, 255]);
const INK: Rgba<u8> = Rgba([30, 41, 59, 255]);
const ACCENT: Rgba<u8> = Rgba([30, 64, 124, 255]);
const MUTED: Rgba<u8> = Rgba([100, 110, 125, 255]);

/// Display fields composited onto the certificate.
#[derive(Debug, Clone)]
pub struct CertificateData {
    /// Recipient display name (first + last, falling back to email).
    pub recipient_name: String,
    /// The session's skill name.
    pub skill_name: String,
    /// The date the session was held.
    pub session_date: NaiveDate,
    /// The date the completion was recorded.
    pub completed_on: NaiveDate,
    /// Trainer display name, when the session has one assigned.
    pub trainer_name: Option<String>,
}

/// A loaded (or absent) certificate font.
///
/// Missing font files degrade to the fontless render path instead of
/// failing the pipeline.
pub struct CertificateFont {
    font: Option<FontVec>,
}

impl CertificateFont {
    /// Load a TTF font from `path`. Returns the fontless fallback when the
    /// file is absent or unparsable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => match FontVec::try_from_vec(bytes) {
                Ok(font) => Self { font: Some(font) },
                Err(_) => {
                    tracing::warn!(path = %path.display(), "Certificate font unparsable, using fontless render");
                    Self { font: None }
                }
            },
            Err(_) => {
                tracing::warn!(path = %path.display(), "Certificate font not found, using fontless render");
                Self { font: None }
            }
        }
    }

    /// A font that always uses the fontless render path.
    pub fn none() -> Self {
        Self { font: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.font.is_some()
    }
}

/// Render the certificate canvas for `data`.
pub fn render_certificate(data: &CertificateData, font: &CertificateFont) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);

    // Double border frame.
    draw_hollow_rect_mut(
        &mut canvas,
        Rect::at(20, 20).of_size(CANVAS_WIDTH - 40, CANVAS_HEIGHT - 40),
        ACCENT,
    );
    draw_hollow_rect_mut(
        &mut canvas,
        Rect::at(28, 28).of_size(CANVAS_WIDTH - 56, CANVAS_HEIGHT - 56),
        ACCENT,
    );

    // Accent bar under the title area.
    draw_filled_rect_mut(&mut canvas, Rect::at(350, 160).of_size(300, 4), ACCENT);

    // Signature placeholder rule, bottom right.
    draw_line_segment_mut(&mut canvas, (620.0, 600.0), (900.0, 600.0), INK);

    if let Some(font) = &font.font {
        draw_centered(&mut canvas, "Certificate of Completion", 90, 52.0, font, ACCENT);
        draw_centered(&mut canvas, "This certifies that", 200, 24.0, font, MUTED);
        draw_centered(&mut canvas, &data.recipient_name, 245, 44.0, font, INK);
        draw_centered(
            &mut canvas,
            "has successfully completed the training session",
            330,
            24.0,
            font,
            MUTED,
        );
        draw_centered(&mut canvas, &data.skill_name, 375, 36.0, font, INK);

        let session_line = format!("Session held on {}", data.session_date.format("%-d %B %Y"));
        draw_centered(&mut canvas, &session_line, 455, 22.0, font, MUTED);

        let completed_line = format!("Completed on {}", data.completed_on.format("%-d %B %Y"));
        draw_centered(&mut canvas, &completed_line, 490, 22.0, font, MUTED);

        if let Some(trainer) = &data.trainer_name {
            let trainer_line = format!("Trainer: {trainer}");
            draw_centered(&mut canvas, &trainer_line, 525, 22.0, font, MUTED);
        }

        draw_text_mut(
            &mut canvas,
            MUTED,
            640,
            610,
            PxScale::from(18.0),
            font,
            "Coordinator signature",
        );
    }

    canvas
}

/// Encode a rendered canvas to PNG bytes.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, CertificateError> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| CertificateError::Render(e.to_string()))?;
    Ok(bytes)
}

/// Draw `text` horizontally centered at vertical offset `y`.
fn draw_centered(
    canvas: &mut RgbaImage,
    text: &str,
    y: i32,
    scale: f32,
    font: &FontVec,
    color: Rgba<u8>,
) {
    let scale = PxScale::from(scale);
    let (w, _) = text_size(scale, font, text);
    let x = (CANVAS_WIDTH.saturating_sub(w) / 2) as i32;
    draw_text_mut(canvas, color, x, y, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> CertificateData {
        CertificateData {
            recipient_name: "Ada Lovelace".to_string(),
            skill_name: "Workplace Safety Basics".to_string(),
            session_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            completed_on: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            trainer_name: Some("Grace Hopper".to_string()),
        }
    }

    #[test]
    fn test_canvas_dimensions_fixed() {
        let canvas = render_certificate(&data(), &CertificateFont::none());
        assert_eq!(canvas.width(), 1000);
        assert_eq!(canvas.height(), 700);
    }

    #[test]
    fn test_fontless_render_still_draws_layout() {
        let canvas = render_certificate(&data(), &CertificateFont::none());
        // The border frame must be present even without a font.
        assert_eq!(canvas.get_pixel(20, 20), &ACCENT);
        // Interior stays background-colored.
        assert_eq!(canvas.get_pixel(500, 650), &BACKGROUND);
    }

    #[test]
    fn test_png_encoding_produces_nonempty_png() {
        let canvas = render_certificate(&data(), &CertificateFont::none());
        let bytes = encode_png(&canvas).expect("encoding should succeed");
        assert!(!bytes.is_empty());
        // PNG magic header.
        assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_missing_font_file_degrades() {
        let font = CertificateFont::load(Path::new("/nonexistent/font.ttf"));
        assert!(!font.is_loaded());
        // Render must still succeed on the fontless path.
        let canvas = render_certificate(&data(), &font);
        assert_eq!(canvas.width(), CANVAS_WIDTH);
    }
}
