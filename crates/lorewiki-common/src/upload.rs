//! Image upload adapter: local file -> data URL -> remote image host.

use std::future::Future;
use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;
use mime_sniffer::MimeTypeSniffer;

use crate::api::UploadImageRequest;
use crate::error::UploadError;

/// An image picked by the author, fully read into memory.
///
/// No size or type limit is enforced here; whatever the author picks is sent.
#[derive(Clone, Debug)]
pub struct ImageFile {
    /// The file name, sent to the host and reused as alt text.
    pub name: String,
    pub data: Bytes,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk.
    #[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::Read {
                path: path.display().to_string(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.png".to_string());
        Ok(Self::new(name, data))
    }

    /// MIME type sniffed from the bytes, falling back to the file extension.
    pub fn mime_type(&self) -> &'static str {
        if let Some(mime) = self.data.sniff_mime_type() {
            if let Some(known) = known_mime(mime) {
                return known;
            }
        }
        mime_from_extension(&self.name).unwrap_or("application/octet-stream")
    }

    /// Encode as a `data:` URL, the same shape a browser file reader produces.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            STANDARD.encode(&self.data)
        )
    }

    /// Build the JSON body for the upload endpoint.
    pub fn to_request(&self) -> UploadImageRequest {
        UploadImageRequest {
            image: self.to_data_url(),
            filename: self.name.clone(),
        }
    }
}

fn known_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/png" => Some("image/png"),
        "image/jpeg" => Some("image/jpeg"),
        "image/gif" => Some("image/gif"),
        "image/webp" => Some("image/webp"),
        "image/bmp" => Some("image/bmp"),
        "image/x-icon" => Some("image/x-icon"),
        _ => None,
    }
}

fn mime_from_extension(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Result of a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedImage {
    /// Where the host serves the image from.
    pub url: String,
    /// File name as picked by the author.
    pub filename: String,
}

/// Something that can store an image and hand back its public URL.
///
/// [`crate::client::WikiClient`] is the HTTP implementation; tests use fakes.
pub trait ImageHost {
    fn upload_image(
        &self,
        file: &ImageFile,
    ) -> impl Future<Output = Result<UploadedImage, UploadError>>;
}

impl<H: ImageHost + ?Sized> ImageHost for &H {
    fn upload_image(
        &self,
        file: &ImageFile,
    ) -> impl Future<Output = Result<UploadedImage, UploadError>> {
        (**self).upload_image(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_data_url_sniffs_png() {
        let file = ImageFile::new("shot.bin", PNG_HEADER.to_vec());
        let url = file.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        let payload = url.split_once(',').unwrap().1;
        assert_eq!(STANDARD.decode(payload).unwrap(), PNG_HEADER);
    }

    #[test]
    fn test_mime_falls_back_to_extension() {
        let file = ImageFile::new("map.WEBP", b"not really an image".to_vec());
        assert_eq!(file.mime_type(), "image/webp");
    }

    #[test]
    fn test_mime_unknown() {
        let file = ImageFile::new("notes", b"plain".to_vec());
        assert_eq!(file.mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_request_carries_filename() {
        let file = ImageFile::new("spawn.png", PNG_HEADER.to_vec());
        let req = file.to_request();
        assert_eq!(req.filename, "spawn.png");
        assert_eq!(req.image, file.to_data_url());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = ImageFile::read("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, UploadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_read_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.png");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let file = ImageFile::read(&path).await.unwrap();
        assert_eq!(file.name, "base.png");
        assert_eq!(&file.data[..], PNG_HEADER);
    }
}
