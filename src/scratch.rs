use crate::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use url::Url;

/// A rendered document written to disk so the browser can load it by URL.
///
/// The file has a unique name and is removed when the page is dropped. If
/// the file is already gone by then, nothing happens; any other removal
/// failure is logged and otherwise ignored.
#[derive(Debug)]
pub struct ScratchPage {
    path: Option<TempPath>,
}

impl ScratchPage {
    pub fn create<P: AsRef<Path>>(dir: P, markup: &str) -> Result<ScratchPage> {
        let dir = absolute(dir.as_ref())?;
        let mut file = tempfile::Builder::new()
            .prefix("template2pdf-")
            .suffix(".html")
            .tempfile_in(&dir)?;
        file.write_all(markup.as_bytes())?;
        file.flush()?;

        log::debug!("wrote scratch page to {}", file.path().display());
        Ok(ScratchPage {
            path: Some(file.into_temp_path()),
        })
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or(Path::new(""))
    }

    pub fn url(&self) -> Result<Url> {
        Url::from_file_path(self.path()).map_err(|_| {
            Error::print(
                "failed to build a file URL",
                format!("`{}` is not an absolute path", self.path().display()),
            )
        })
    }
}

impl Drop for ScratchPage {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let display = path.display().to_string();
            log::debug!("removing scratch page {display}");
            if let Err(e) = remove(path) {
                log::warn!("failed to remove scratch page {display}: {e}");
            }
        }
    }
}

/// Delete the file behind `path`. A file that's already gone counts as removed.
fn remove(path: TempPath) -> std::io::Result<()> {
    match path.close() {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}

fn absolute(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}
