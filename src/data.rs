//! Loading of two-column numeric CSV files.

use std::{fs::File, path::Path, sync::Arc};

use polars::prelude::*;

use crate::error::{Error, Result};

/// Ordered `(x, y)` pairs, stored as two non-null `Float64` columns.
#[derive(Clone, Debug)]
pub struct Dataset {
  x: Column,
  y: Column,
}

impl Dataset {
  pub fn empty() -> Dataset {
    Dataset {
      x: Column::new("x".into(), Vec::<f64>::new()),
      y: Column::new("y".into(), Vec::<f64>::new()),
    }
  }

  /// Reads `path` as headerless, comma separated rows of exactly two numbers.
  ///
  /// Blank lines and lines starting with `#` are skipped, and whitespace
  /// around fields is ignored. Non-numeric fields and rows with the wrong
  /// number of fields are errors; nothing is coerced to NaN.
  pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file_access = |source| Error::FileAccess { path: path.to_path_buf(), source };
    let parse = |source: PolarsError| Error::Parse { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(file_access)?;
    if file.metadata().map_err(file_access)?.len() == 0 {
      tracing::debug!(path = %path.display(), "empty input file");
      return Ok(Dataset::empty());
    }

    // Fields are read as text so they can be trimmed before the numeric cast.
    let schema = Schema::from_iter([
      Field::new("x".into(), DataType::String),
      Field::new("y".into(), DataType::String),
    ]);
    let options = CsvReadOptions::default()
      .with_has_header(false)
      .with_raise_if_empty(false)
      .with_schema(Some(Arc::new(schema)))
      .with_parse_options(
        CsvParseOptions::default().with_separator(b',').with_comment_prefix(Some("#")),
      );

    let df = CsvReader::new(file).with_options(options).finish().map_err(parse)?;
    let raw_x = df.column("x")?.as_materialized_series().str()?;
    let raw_y = df.column("y")?.as_materialized_series().str()?;

    let mut xs = Vec::with_capacity(df.height());
    let mut ys = Vec::with_capacity(df.height());
    for (row, (x, y)) in raw_x.into_iter().zip(raw_y.into_iter()).enumerate() {
      let x = x.map(str::trim).filter(|s| !s.is_empty());
      let y = y.map(str::trim).filter(|s| !s.is_empty());

      match (x, y) {
        (None, None) => continue,
        (Some(x), Some(y)) => {
          xs.push(x);
          ys.push(y);
        }
        (None, Some(_)) => return Err(Error::MissingField { row: row + 1, column: "x" }),
        (Some(_), None) => return Err(Error::MissingField { row: row + 1, column: "y" }),
      }
    }

    let x = Series::new("x".into(), xs).strict_cast(&DataType::Float64).map_err(parse)?;
    let y = Series::new("y".into(), ys).strict_cast(&DataType::Float64).map_err(parse)?;
    let dataset = Dataset { x: x.into(), y: y.into() };

    tracing::debug!(path = %path.display(), rows = dataset.len(), "loaded dataset");
    Ok(dataset)
  }

  pub fn len(&self) -> usize { self.x.len() }
  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn x(&self) -> &Column { &self.x }
  pub fn y(&self) -> &Column { &self.y }

  pub fn xs(&self) -> Result<Vec<f64>> { Ok(values(&self.x)?) }
  pub fn ys(&self) -> Result<Vec<f64>> { Ok(values(&self.y)?) }

  pub fn pairs(&self) -> Result<Vec<(f64, f64)>> {
    Ok(self.xs()?.into_iter().zip(self.ys()?).collect())
  }
}

pub(crate) fn values(column: &Column) -> PolarsResult<Vec<f64>> {
  Ok(column.as_materialized_series().f64()?.into_no_null_iter().collect())
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use tempfile::NamedTempFile;

  use super::*;

  fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
  }

  #[test]
  fn loads_rows_in_order() {
    let file = file_with("1,2\n3,4\n5,6\n");
    let data = Dataset::load(file.path()).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data.xs().unwrap(), vec![1.0, 3.0, 5.0]);
    assert_eq!(data.ys().unwrap(), vec![2.0, 4.0, 6.0]);
  }

  #[test]
  fn loads_floats_and_negatives() {
    let file = file_with("-1.5,2.25\n0.125,-3e2\n");
    let data = Dataset::load(file.path()).unwrap();

    assert_eq!(data.pairs().unwrap(), vec![(-1.5, 2.25), (0.125, -300.0)]);
  }

  #[test]
  fn skips_comment_lines() {
    let file = file_with("# x,y\n1,2\n3,4\n");
    let data = Dataset::load(file.path()).unwrap();

    assert_eq!(data.pairs().unwrap(), vec![(1.0, 2.0), (3.0, 4.0)]);
  }

  #[test]
  fn empty_file_is_empty_dataset() {
    let file = file_with("");
    let data = Dataset::load(file.path()).unwrap();

    assert!(data.is_empty());
    assert!(data.xs().unwrap().is_empty());
    assert!(data.ys().unwrap().is_empty());
  }

  #[test]
  fn load_is_idempotent() {
    let file = file_with("0.5,1\n2,-7.75\n");

    let a = Dataset::load(file.path()).unwrap();
    let b = Dataset::load(file.path()).unwrap();
    assert_eq!(a.pairs().unwrap(), b.pairs().unwrap());
  }

  #[test]
  fn written_pairs_load_back() {
    let pairs: Vec<(f64, f64)> =
      (0..50).map(|i| (f64::from(i) * 0.37 - 4.0, (f64::from(i) * 1.3).sin())).collect();

    let contents: String = pairs.iter().map(|(x, y)| format!("{x},{y}\n")).collect();
    let file = file_with(&contents);

    assert_eq!(Dataset::load(file.path()).unwrap().pairs().unwrap(), pairs);
  }

  #[test]
  fn missing_file_is_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dataset::load(dir.path().join("data.txt")).unwrap_err();

    assert!(matches!(err, Error::FileAccess { .. }), "{err:?}");
  }

  #[test]
  fn non_numeric_field_is_an_error() {
    let file = file_with("1,two\n");
    let err = Dataset::load(file.path()).unwrap_err();

    assert!(matches!(err, Error::Parse { .. }), "{err:?}");
  }

  #[test]
  fn extra_field_is_an_error() {
    let file = file_with("1,2\n3,4,5\n");
    let err = Dataset::load(file.path()).unwrap_err();

    assert!(matches!(err, Error::Parse { .. }), "{err:?}");
  }

  #[test]
  fn missing_field_is_an_error() {
    let file = file_with("1,2\n3\n");
    let err = Dataset::load(file.path()).unwrap_err();

    assert!(matches!(err, Error::MissingField { row: 2, column: "y" }), "{err:?}");
  }

  #[test]
  fn empty_trailing_field_is_an_error() {
    let file = file_with("1,\n");
    let err = Dataset::load(file.path()).unwrap_err();

    assert!(matches!(err, Error::MissingField { row: 1, column: "y" }), "{err:?}");
  }

  #[test]
  fn skips_blank_lines() {
    let file = file_with("1,2\n\n3,4\n\n");
    let data = Dataset::load(file.path()).unwrap();

    assert_eq!(data.pairs().unwrap(), vec![(1.0, 2.0), (3.0, 4.0)]);
  }

  #[test]
  fn blank_and_comment_only_files_are_empty() {
    for contents in ["\n", "\n\n", "# only\n"] {
      let file = file_with(contents);

      assert!(Dataset::load(file.path()).unwrap().is_empty(), "{contents:?}");
    }
  }

  #[test]
  fn whitespace_around_fields_is_ignored() {
    let file = file_with("1, 2\n3 ,4\n 5 , 6 \n");
    let data = Dataset::load(file.path()).unwrap();

    assert_eq!(data.pairs().unwrap(), vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
  }
}
