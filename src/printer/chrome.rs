//! Printing through a headless Chrome / Chromium.
//!
//! Every call to [`ChromePrinter::print`] starts its own browser, loads the
//! page, sends a single `Page.printToPDF` command over the DevTools protocol
//! and shuts the browser down again. The browser is killed when its handle
//! drops, so it's gone on every exit path.

use super::{PrintOptions, Printer};
use crate::error::{Error, Result};
use crate::payload::PdfPayload;
use derive_builder::Builder;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// How long the browser may sit without receiving events before the driver
/// gives up on it.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(setter(into))]
pub struct ChromePrinter {
    /// Browser binary. When unset, Chrome / Chromium is looked up on `PATH`.
    #[builder(setter(into, strip_option), default)]
    pub path: Option<PathBuf>,
    /// Disable this when running as root inside containers.
    #[builder(default = "true")]
    pub sandbox: bool,
    #[builder(setter(into, strip_option), default)]
    pub window_size: Option<(u32, u32)>,
    #[builder(default = "DEFAULT_IDLE_TIMEOUT")]
    pub idle_timeout: Duration,
    /// Extra command line arguments for the browser.
    #[builder(setter(each(name = "arg", into)), default)]
    pub args: Vec<OsString>,
}

impl Default for ChromePrinter {
    fn default() -> Self {
        ChromePrinter {
            path: None,
            sandbox: true,
            window_size: None,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            args: Vec::default(),
        }
    }
}

impl ChromePrinter {
    fn launch(&self) -> Result<Browser> {
        let args: Vec<&OsStr> = self.args.iter().map(OsString::as_os_str).collect();
        let mut builder = LaunchOptions::default_builder();
        builder
            .headless(true)
            .sandbox(self.sandbox)
            .path(self.path.clone())
            .idle_browser_timeout(self.idle_timeout)
            .args(args);
        if let Some(size) = self.window_size {
            builder.window_size(Some(size));
        }
        let options = builder
            .build()
            .map_err(|e| Error::print("invalid browser launch options", e))?;

        log::debug!(
            "launching headless browser ({})",
            self.path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "found on PATH".to_string())
        );
        Browser::new(options).map_err(|e| Error::print("failed to launch browser", e))
    }
}

impl Printer for ChromePrinter {
    fn print(&self, page: &Url, options: &PrintOptions) -> Result<PdfPayload> {
        let command = options.to_command()?;

        let browser = self.launch()?;
        let tab = browser
            .new_tab()
            .map_err(|e| Error::print("failed to open a browser tab", e))?;

        log::debug!("navigating to {page}");
        tab.navigate_to(page.as_str())
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| Error::print(&format!("failed to load {page}"), e))?;

        log::debug!("sending Page.printToPDF with {command:?}");
        let result = tab
            .call_method(command)
            .map_err(|e| Error::print("Page.printToPDF failed", e))?;
        if result.data.is_empty() {
            return Err(Error::Print(
                "Page.printToPDF returned no PDF data".to_string(),
            ));
        }

        Ok(PdfPayload::from_base64(result.data))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scratch::ScratchPage;

    #[test]
    fn builder_defaults_match_default() {
        let printer = ChromePrinterBuilder::default().build().unwrap();
        assert_eq!(printer, ChromePrinter::default());
        assert!(printer.sandbox);
        assert_eq!(printer.idle_timeout, DEFAULT_IDLE_TIMEOUT);
    }

    #[test]
    fn builder_collects_args() {
        let printer = ChromePrinterBuilder::default()
            .path("/usr/bin/chromium")
            .sandbox(false)
            .window_size((800, 600))
            .arg("--disable-gpu")
            .arg("--hide-scrollbars")
            .build()
            .unwrap();

        assert_eq!(printer.path, Some(PathBuf::from("/usr/bin/chromium")));
        assert!(!printer.sandbox);
        assert_eq!(printer.window_size, Some((800, 600)));
        assert_eq!(
            printer.args,
            vec![OsString::from("--disable-gpu"), OsString::from("--hide-scrollbars")]
        );
    }

    #[test]
    fn invalid_options_fail_before_launch() {
        let printer = ChromePrinterBuilder::default()
            .path("/definitely/not/a/browser")
            .build()
            .unwrap();
        let mut options = PrintOptions::default();
        options.set("scale", "huge");

        let url = Url::parse("file:///tmp/page.html").unwrap();
        let err = printer.print(&url, &options).unwrap_err();
        match err {
            Error::Print(message) => assert!(message.starts_with("invalid print options")),
            other => panic!("expected print error, got {other:?}"),
        }
    }

    #[test]
    fn missing_browser_is_a_print_error() {
        let printer = ChromePrinterBuilder::default()
            .path("/definitely/not/a/browser")
            .build()
            .unwrap();

        let url = Url::parse("file:///tmp/page.html").unwrap();
        let err = printer.print(&url, &PrintOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Print(_)));
    }

    #[test]
    #[ignore = "requires a Chrome / Chromium installation"]
    fn prints_a_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = ScratchPage::create(dir.path(), "<html><body>hello</body></html>").unwrap();

        let printer = ChromePrinterBuilder::default().sandbox(false).build().unwrap();
        let pdf = printer
            .print(&page.url().unwrap(), &PrintOptions::default())
            .unwrap()
            .decode()
            .unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }
}
