use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  /// The input file is missing or unreadable.
  #[error("failed to open {}", path.display())]
  FileAccess {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A field could not be read as a number, or a row had too many fields.
  #[error("failed to parse {}", path.display())]
  Parse {
    path:   PathBuf,
    #[source]
    source: PolarsError,
  },

  /// A row had fewer than two fields.
  #[error("row {row} is missing its `{column}` field")]
  MissingField { row: usize, column: &'static str },

  #[error(transparent)]
  Polars(#[from] PolarsError),

  /// No window, adapter or device could be created.
  #[error("display unavailable: {0}")]
  Display(String),
}

impl Error {
  pub(crate) fn display(err: impl std::fmt::Display) -> Self { Error::Display(err.to_string()) }
}
