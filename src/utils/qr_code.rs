//! QR code rendering for short links.

use base64::Engine as _;
use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

/// Minimum side of the rendered PNG, in pixels.
pub const QR_MIN_SIZE: u32 = 150;

/// Query suffix that routes scans to the QR click counter.
pub const QR_SOURCE_QUERY: &str = "?src=qr";

#[derive(Debug, thiserror::Error)]
pub enum QrRenderError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Builds the URL embedded in a QR code for `short_url`.
pub fn qr_target(short_url: &str) -> String {
    format!("{short_url}{QR_SOURCE_QUERY}")
}

/// Renders `content` as a PNG QR code and returns it as a
/// `data:image/png;base64,...` URI.
pub fn render_png_data_uri(content: &str) -> Result<String, QrRenderError> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::L)?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
        .build();

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(png.into_inner());
    Ok(format!("data:image/png;base64,{encoded}"))
}
