use crate::error::Result;
use crate::payload::PdfPayload;
use url::Url;

mod chrome;
pub use chrome::*;

mod options;
pub use options::*;

/// Something that can turn a page at a URL into a PDF.
///
/// Each call owns whatever it starts (browser processes, connections) and
/// releases it before returning, whether printing succeeded or not.
pub trait Printer {
    fn print(&self, page: &Url, options: &PrintOptions) -> Result<PdfPayload>;
}
