use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::payloads::messages::{ChatMessage, ContentPart};

pub const DEFAULT_VISION_PROMPT: &str = "Extract text from this image.";

const FALLBACK_MIME: &str = "image/png";

/// Encodes raw image bytes as a `data:` URL without re-encoding the image.
///
/// The MIME type is sniffed from the leading bytes; anything unrecognised is
/// labelled `image/png`.
pub fn image_data_url(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", sniff_mime(bytes), STANDARD.encode(bytes))
}

pub fn image_data_url_from_path(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image_data_url(&bytes))
}

pub fn vision_request(data_url: &str, prompt: &str, model: &str) -> Value {
    json!({
        "model": model,
        "messages": [ChatMessage::user_parts(vec![
            ContentPart::text(prompt),
            ContentPart::image_url(data_url),
        ])]
    })
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Bmp) => "image/bmp",
        _ => FALLBACK_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];
    const GIF_HEADER: &[u8] = b"GIF89a\x01\x00\x01\x00";
    const WEBP_HEADER: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
    const BMP_HEADER: &[u8] = b"BM\x3a\x00\x00\x00\x00\x00";

    fn decode(url: &str) -> Vec<u8> {
        let (_, payload) = url
            .split_once(";base64,")
            .expect("data url should contain base64 marker");
        STANDARD.decode(payload).expect("payload should be valid base64")
    }

    #[test]
    fn png_bytes_round_trip_through_data_url() {
        let url = image_data_url(PNG_HEADER);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode(&url), PNG_HEADER);
    }

    #[test]
    fn jpeg_is_labelled_as_jpeg() {
        assert!(image_data_url(JPEG_HEADER).starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn gif_webp_and_bmp_are_sniffed() {
        assert!(image_data_url(GIF_HEADER).starts_with("data:image/gif;base64,"));
        assert!(image_data_url(WEBP_HEADER).starts_with("data:image/webp;base64,"));
        assert!(image_data_url(BMP_HEADER).starts_with("data:image/bmp;base64,"));
        assert_eq!(decode(&image_data_url(WEBP_HEADER)), WEBP_HEADER);
    }

    #[test]
    fn unknown_bytes_fall_back_to_png_and_stay_untouched() {
        let bytes = b"definitely not an image";
        let url = image_data_url(bytes);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode(&url), bytes);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = image_data_url_from_path(Path::new("/nonexistent/invoice.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to read image '/nonexistent/invoice.png'"));
    }

    #[test]
    fn request_has_text_then_image_part() {
        let body = vision_request(
            "data:image/png;base64,AA==",
            DEFAULT_VISION_PROMPT,
            "gpt-4o-mini",
        );
        let content = &body["messages"][0]["content"];
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(content[0], json!({"type": "text", "text": "Extract text from this image."}));
        assert_eq!(
            content[1],
            json!({"type": "image_url", "image_url": {"url": "data:image/png;base64,AA=="}})
        );
    }
}
