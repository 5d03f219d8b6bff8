use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The template could not be found, parsed, or rendered with the given data.
    #[error("failed to resolve template `{}`", template.display())]
    Template {
        template: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("nothing to print: the template must be rendered first")]
    NothingToPrint,

    /// The browser failed to start, navigate, or answer the print command.
    #[error("failed to print PDF: {0}")]
    Print(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn print<E: std::fmt::Display>(context: &str, err: E) -> Error {
        Error::Print(format!("{context}: {err:#}"))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
