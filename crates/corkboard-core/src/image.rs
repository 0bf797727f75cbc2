//! Image format identification from magic bytes, and reconciliation of
//! client-declared MIME types against the detected format.
//!
//! The declared content type of an upload is attacker-controlled and is never
//! trusted for storage metadata; only the format sniffed from the leading
//! bytes is. Detection covers exactly the four raster formats the public
//! bucket accepts.

/// Minimum number of leading bytes required to identify any supported format.
/// WEBP is the longest signature (`RIFF....WEBP`, offsets 0..4 and 8..12).
const SIGNATURE_PREFIX_LEN: usize = 12;

/// Image formats recognized by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageKind {
    /// Identify the image format from a buffer's leading bytes.
    ///
    /// Returns `None` for buffers shorter than 12 bytes or without a known
    /// signature. Pure function of the input; filename and declared type
    /// play no part.
    pub fn detect(bytes: &[u8]) -> Option<ImageKind> {
        if bytes.len() < SIGNATURE_PREFIX_LEN {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if bytes[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Some(ImageKind::Png);
        }

        // JPEG: FF D8 FF
        if bytes[..3] == [0xFF, 0xD8, 0xFF] {
            return Some(ImageKind::Jpeg);
        }

        // GIF87a / GIF89a
        if bytes[..4] == *b"GIF8" && (bytes[4] == 0x37 || bytes[4] == 0x39) && bytes[5] == 0x61 {
            return Some(ImageKind::Gif);
        }

        // WEBP: RIFF container with WEBP fourcc. Bytes 4..8 are the RIFF
        // chunk size and are not part of the signature.
        if bytes[..4] == *b"RIFF" && bytes[8..12] == *b"WEBP" {
            return Some(ImageKind::Webp);
        }

        None
    }

    /// Canonical MIME type for this format. This is the value persisted as
    /// the stored object's content type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
            ImageKind::Webp => "image/webp",
        }
    }

    /// Map a normalized MIME string back to a format.
    pub fn from_mime(mime: &str) -> Option<ImageKind> {
        match mime {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" => Some(ImageKind::Jpeg),
            "image/gif" => Some(ImageKind::Gif),
            "image/webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    /// Conventional file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Gif => "gif",
            ImageKind::Webp => "webp",
        }
    }

    /// True iff the normalized declared MIME names this exact format.
    /// The `image/jpg` alias is folded by [`normalize_mime`] before this
    /// check, so plain equality suffices.
    pub fn matches_declared(&self, normalized_mime: &str) -> bool {
        normalized_mime == self.mime_type()
    }
}

/// Normalize a client-declared MIME type: lower-case and fold the legacy
/// `image/jpg` alias into `image/jpeg`. Everything else passes through.
pub fn normalize_mime(declared: &str) -> String {
    let lowered = declared.to_lowercase();
    if lowered == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        lowered
    }
}

/// Declared MIME types accepted for upload (after normalization).
pub fn is_allowed_mime(normalized: &str) -> bool {
    matches!(
        normalized,
        "image/jpeg" | "image/png" | "image/webp" | "image/gif"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn padded(sig: &[u8]) -> Vec<u8> {
        let mut buf = sig.to_vec();
        buf.resize(16, 0);
        buf
    }

    #[test]
    fn detects_png() {
        assert_eq!(ImageKind::detect(&padded(&PNG_SIG)), Some(ImageKind::Png));
    }

    #[test]
    fn detects_jpeg() {
        assert_eq!(
            ImageKind::detect(&padded(&[0xFF, 0xD8, 0xFF, 0xE0])),
            Some(ImageKind::Jpeg)
        );
    }

    #[test]
    fn detects_gif_87a_and_89a() {
        assert_eq!(
            ImageKind::detect(&padded(b"GIF87a")),
            Some(ImageKind::Gif)
        );
        assert_eq!(
            ImageKind::detect(&padded(b"GIF89a")),
            Some(ImageKind::Gif)
        );
        // GIF88a is not a thing
        assert_eq!(ImageKind::detect(&padded(b"GIF88a")), None);
    }

    #[test]
    fn detects_webp_ignoring_riff_size() {
        let mut buf = b"RIFF".to_vec();
        buf.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]); // arbitrary chunk size
        buf.extend_from_slice(b"WEBP");
        assert_eq!(ImageKind::detect(&buf), Some(ImageKind::Webp));
    }

    #[test]
    fn riff_without_webp_fourcc_is_unknown() {
        let mut buf = b"RIFF".to_vec();
        buf.extend_from_slice(&[0, 0, 0, 0]);
        buf.extend_from_slice(b"WAVE");
        assert_eq!(ImageKind::detect(&buf), None);
    }

    #[test]
    fn short_buffers_are_always_unknown() {
        // Under 12 bytes nothing is detected, even a full PNG signature.
        for len in 0..12 {
            let buf = padded(&PNG_SIG)[..len].to_vec();
            assert_eq!(ImageKind::detect(&buf), None, "len {}", len);
        }
    }

    #[test]
    fn text_bytes_are_unknown() {
        assert_eq!(ImageKind::detect(b"hello world!"), None);
    }

    #[test]
    fn normalize_folds_jpg_alias() {
        assert_eq!(normalize_mime("image/jpg"), "image/jpeg");
        assert_eq!(normalize_mime("image/JPG"), "image/jpeg");
        assert_eq!(normalize_mime("IMAGE/PNG"), "image/png");
        assert_eq!(normalize_mime("text/plain"), "text/plain");
    }

    #[test]
    fn allow_list_is_exactly_the_four_formats() {
        for mime in ["image/jpeg", "image/png", "image/webp", "image/gif"] {
            assert!(is_allowed_mime(mime));
        }
        assert!(!is_allowed_mime("image/jpg")); // alias must be folded first
        assert!(!is_allowed_mime("image/svg+xml"));
        assert!(!is_allowed_mime("application/octet-stream"));
    }

    #[test]
    fn declared_matches_detected_after_normalization() {
        let kind = ImageKind::Jpeg;
        assert!(kind.matches_declared(&normalize_mime("image/jpg")));
        assert!(kind.matches_declared(&normalize_mime("IMAGE/JPEG")));
        assert!(!kind.matches_declared(&normalize_mime("image/png")));
    }

    #[test]
    fn mime_round_trips_through_from_mime() {
        for kind in [
            ImageKind::Png,
            ImageKind::Jpeg,
            ImageKind::Gif,
            ImageKind::Webp,
        ] {
            assert_eq!(ImageKind::from_mime(kind.mime_type()), Some(kind));
        }
        assert_eq!(ImageKind::from_mime("image/jpg"), None);
    }
}
