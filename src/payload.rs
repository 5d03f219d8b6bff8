use crate::error::{Error, Result};
use base64::prelude::*;
use std::path::Path;

/// A printed PDF, as the base64 text the browser hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPayload(String);

impl PdfPayload {
    pub fn from_base64<S: Into<String>>(data: S) -> PdfPayload {
        PdfPayload(data.into())
    }

    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> PdfPayload {
        PdfPayload(BASE64_STANDARD.encode(bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    pub fn into_base64(self) -> String {
        self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64_STANDARD
            .decode(self.0.as_bytes())
            .map_err(|e| Error::print("malformed PDF data", e))
    }

    /// Decode the payload and write it to `target`, replacing anything there.
    ///
    /// The target is only touched once decoding has succeeded.
    pub fn save<P: AsRef<Path>>(&self, target: P) -> Result<()> {
        let bytes = self.decode()?;
        std::fs::write(target.as_ref(), &bytes)?;
        log::info!(
            "wrote {} bytes of PDF to {}",
            bytes.len(),
            target.as_ref().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PDF: &[u8] = b"%PDF-1.4\n%%EOF\n";

    #[test]
    fn saves_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        std::fs::write(&target, b"previous contents that are longer").unwrap();

        PdfPayload::from_bytes(PDF).save(&target).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), PDF);
    }

    #[test]
    fn base64_is_returned_verbatim() {
        let payload = PdfPayload::from_base64("JVBERi0xLjQK");
        assert_eq!(payload.as_base64(), "JVBERi0xLjQK");
        assert_eq!(payload.decode().unwrap(), b"%PDF-1.4\n");
        assert_eq!(payload.into_base64(), "JVBERi0xLjQK");
    }

    #[test]
    fn malformed_payload_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");

        let err = PdfPayload::from_base64("not base64!").save(&target).unwrap_err();
        assert!(matches!(err, Error::Print(_)));
        assert!(!target.exists());
    }

    #[test]
    fn write_failures_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.pdf");

        let err = PdfPayload::from_bytes(PDF).save(&target).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
