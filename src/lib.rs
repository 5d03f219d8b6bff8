//! Render a Jinja-style HTML template with data and print it to PDF using a
//! headless Chrome / Chromium.

mod converter;
mod error;
mod payload;
mod printer;
mod scratch;
mod template;

pub use converter::Template2Pdf;
pub use error::{Error, Result};
pub use payload::PdfPayload;
pub use printer::{
    parse_option, ChromePrinter, ChromePrinterBuilder, ChromePrinterBuilderError, PrintOptions,
    Printer, DEFAULT_IDLE_TIMEOUT,
};
pub use scratch::ScratchPage;
pub use template::{Template, TemplateRef};
