//! Filesystem storage for uploaded brand assets.
//!
//! Assets are tiny (logos and favicons), so payloads are buffered, hashed
//! and written in one go. The stored path is content-addressed: the sha-256
//! checksum prefixes a slugified rendition of the original filename, which
//! makes re-uploads of the same file land on the same path.

use std::fmt::Write as FmtWrite;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use sha2::{Digest, Sha256};
use slug::slugify;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum UploadStorageError {
    #[error("invalid stored path")]
    InvalidPath,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("uploaded file is empty")]
    EmptyPayload,
    #[error("uploaded file exceeds the configured size limit")]
    PayloadTooLarge,
    #[error("uploaded file is not an svg or png image")]
    UnsupportedType,
    #[error("svg contains scripting and was rejected")]
    UnsafeSvg,
}

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub stored_path: String,
    pub checksum: String,
    pub size_bytes: u64,
}

/// Brand asset storage rooted at the configured uploads directory.
#[derive(Debug)]
pub struct UploadStorage {
    root: PathBuf,
    max_bytes: u64,
}

impl UploadStorage {
    /// Initialise storage, creating the root directory if necessary.
    pub fn new(root: PathBuf, max_bytes: u64) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root, max_bytes })
    }

    /// Validate and store a brand asset, returning where it landed.
    pub async fn store(
        &self,
        original_name: &str,
        data: Bytes,
    ) -> Result<StoredUpload, UploadStorageError> {
        validate_brand_asset(&data, self.max_bytes)?;

        let digest = Sha256::digest(&data);
        let checksum = hex_from_bytes(&digest);
        let stored_path = format!("brand/{}-{}", &checksum[..16], sanitize_filename(original_name));
        let absolute = self.resolve(&stored_path)?;

        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&absolute, &data).await?;

        Ok(StoredUpload {
            stored_path,
            checksum,
            size_bytes: data.len() as u64,
        })
    }

    /// Read a stored asset back into memory.
    pub async fn read(&self, stored_path: &str) -> Result<Bytes, UploadStorageError> {
        let absolute = self.resolve(stored_path)?;
        let data = fs::read(absolute).await?;
        Ok(Bytes::from(data))
    }

    fn resolve(&self, stored_path: &str) -> Result<PathBuf, UploadStorageError> {
        let relative = Path::new(stored_path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|component| matches!(component, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(UploadStorageError::InvalidPath);
        }

        Ok(self.root.join(relative))
    }
}

/// Accept svg (text sniff) and png (magic bytes); reject everything else.
fn validate_brand_asset(data: &Bytes, max_bytes: u64) -> Result<(), UploadStorageError> {
    if data.is_empty() {
        return Err(UploadStorageError::EmptyPayload);
    }
    if data.len() as u64 > max_bytes {
        return Err(UploadStorageError::PayloadTooLarge);
    }

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    if data.starts_with(PNG_MAGIC) {
        return Ok(());
    }

    if looks_like_svg(data) {
        return svg_is_inert(data);
    }

    Err(UploadStorageError::UnsupportedType)
}

/// Reject svgs carrying script elements or inline event handlers. These are
/// served from the site origin, so active content is not acceptable.
fn svg_is_inert(data: &[u8]) -> Result<(), UploadStorageError> {
    let Ok(text) = std::str::from_utf8(data) else {
        return Err(UploadStorageError::UnsupportedType);
    };
    let lowered = text.to_ascii_lowercase();
    if lowered.contains("<script") || lowered.contains("javascript:") {
        return Err(UploadStorageError::UnsafeSvg);
    }
    let has_event_handler = lowered.match_indices("on").any(|(index, _)| {
        let preceded_by_space = index > 0
            && lowered[..index]
                .ends_with(|ch: char| ch.is_ascii_whitespace());
        let rest = &lowered[index + 2..];
        let attr_len = rest
            .find(|ch: char| !ch.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        preceded_by_space && attr_len > 0 && rest[attr_len..].trim_start().starts_with('=')
    });
    if has_event_handler {
        return Err(UploadStorageError::UnsafeSvg);
    }
    Ok(())
}

fn looks_like_svg(data: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(data) else {
        return false;
    };

    // Skip the XML prolog, doctype and comments before the root element.
    let mut rest = text.trim_start_matches('\u{feff}').trim_start();
    loop {
        if rest.starts_with("<?") || rest.starts_with("<!") {
            match rest.find('>') {
                Some(end) => rest = rest[end + 1..].trim_start(),
                None => return false,
            }
        } else {
            break;
        }
    }

    rest.starts_with("<svg")
}

fn sanitize_filename(original: &str) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("asset");
    let mut base = slugify(stem);
    if base.is_empty() {
        base = "asset".to_string();
    }

    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.trim_matches('.').to_ascii_lowercase())
        .filter(|value| !value.is_empty());

    match extension {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}

fn hex_from_bytes(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = FmtWrite::write_fmt(&mut output, format_args!("{byte:02x}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_sniffing_skips_prolog_and_comments() {
        assert!(looks_like_svg(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"));
        assert!(looks_like_svg(
            b"<?xml version=\"1.0\"?>\n<!-- logo -->\n<svg viewBox=\"0 0 1 1\"/>"
        ));
        assert!(!looks_like_svg(b"<html><body>nope</body></html>"));
        assert!(!looks_like_svg(b"plain text"));
    }

    #[test]
    fn scripted_svgs_are_rejected() {
        assert!(matches!(
            validate_brand_asset(
                &Bytes::from_static(b"<svg><script>alert(1)</script></svg>"),
                1024
            ),
            Err(UploadStorageError::UnsafeSvg)
        ));
        assert!(matches!(
            validate_brand_asset(
                &Bytes::from_static(b"<svg onload=\"alert(1)\"><circle r=\"4\"/></svg>"),
                1024
            ),
            Err(UploadStorageError::UnsafeSvg)
        ));
        // Ordinary presentation attributes containing "on" pass.
        assert!(
            validate_brand_asset(
                &Bytes::from_static(b"<svg><circle r=\"4\" stroke=\"none\"/></svg>"),
                1024
            )
            .is_ok()
        );
    }

    #[test]
    fn validation_rejects_oversized_and_foreign_payloads() {
        let svg = Bytes::from_static(b"<svg/>");
        assert!(validate_brand_asset(&svg, 1024).is_ok());
        assert!(matches!(
            validate_brand_asset(&svg, 3),
            Err(UploadStorageError::PayloadTooLarge)
        ));
        assert!(matches!(
            validate_brand_asset(&Bytes::from_static(b"GIF89a"), 1024),
            Err(UploadStorageError::UnsupportedType)
        ));
        assert!(matches!(
            validate_brand_asset(&Bytes::new(), 1024),
            Err(UploadStorageError::EmptyPayload)
        ));
    }

    #[tokio::test]
    async fn stored_assets_round_trip_and_reject_traversal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = UploadStorage::new(dir.path().to_path_buf(), 1024).expect("storage");

        let stored = storage
            .store("Logo Final (v2).svg", Bytes::from_static(b"<svg/>"))
            .await
            .expect("store succeeds");
        assert!(stored.stored_path.starts_with("brand/"));
        assert!(stored.stored_path.ends_with("logo-final-v2.svg"));

        let read_back = storage.read(&stored.stored_path).await.expect("read");
        assert_eq!(read_back.as_ref(), b"<svg/>");

        assert!(matches!(
            storage.read("../outside.svg").await,
            Err(UploadStorageError::InvalidPath)
        ));
    }
}
