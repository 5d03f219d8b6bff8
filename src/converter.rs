use crate::error::{Error, Result};
use crate::payload::PdfPayload;
use crate::printer::{ChromePrinter, PrintOptions, Printer};
use crate::scratch::ScratchPage;
use crate::template::Template;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Renders a template with data and prints the result to PDF.
///
/// ```no_run
/// # fn main() -> template2pdf::Result<()> {
/// use template2pdf::{PrintOptions, Template2Pdf};
///
/// let mut converter = Template2Pdf::new("templates/invoice.html")?;
/// converter
///     .render(&serde_json::json!({ "name": "Alice" }))?
///     .write_pdf(Some("invoice.pdf".as_ref()), &PrintOptions::empty())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Template2Pdf<P: Printer = ChromePrinter> {
    template: Template,
    printer: P,
    scratch_dir: PathBuf,
    rendered: Option<String>,
}

impl Template2Pdf<ChromePrinter> {
    /// Load the template at `path` and print with a default headless Chrome.
    pub fn new<T: AsRef<Path>>(template: T) -> Result<Self> {
        Template2Pdf::with_printer(template, ChromePrinter::default())
    }
}

impl<P: Printer> Template2Pdf<P> {
    pub fn with_printer<T: AsRef<Path>>(template: T, printer: P) -> Result<Self> {
        Ok(Template2Pdf::from_template(
            Template::load(template, false)?,
            printer,
        ))
    }

    pub fn from_template(template: Template, printer: P) -> Self {
        Template2Pdf {
            template,
            printer,
            scratch_dir: PathBuf::from("."),
            rendered: None,
        }
    }

    /// Directory the intermediate HTML page is written to. Relative links in
    /// the template resolve against it. Defaults to the working directory.
    pub fn scratch_dir<D: Into<PathBuf>>(mut self, dir: D) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// The most recently rendered document, if any.
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Render the template with `data`, replacing any previous rendering.
    pub fn render<T: Serialize>(&mut self, data: &T) -> Result<&mut Self> {
        self.rendered = Some(self.template.render(data)?);
        Ok(self)
    }

    /// Print the rendered document. An empty rendering counts as nothing to
    /// print.
    ///
    /// `options` are layered over the default print options for this call
    /// only. The scratch page is removed before this returns, on success and
    /// on failure.
    pub fn print(&self, options: &PrintOptions) -> Result<PdfPayload> {
        let markup = self
            .rendered
            .as_deref()
            .filter(|markup| !markup.is_empty())
            .ok_or(Error::NothingToPrint)?;
        let options = PrintOptions::default().merge(options);

        let page = ScratchPage::create(&self.scratch_dir, markup)?;
        self.printer.print(&page.url()?, &options)
    }

    /// Print the rendered document and either save it to `target` or, if no
    /// target is given, return the base64-encoded PDF.
    pub fn write_pdf(
        &self,
        target: Option<&Path>,
        options: &PrintOptions,
    ) -> Result<Option<String>> {
        let payload = self.print(options)?;
        match target {
            Some(target) => {
                payload.save(target)?;
                Ok(None)
            }
            None => Ok(Some(payload.into_base64())),
        }
    }
}
