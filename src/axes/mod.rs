mod scatter;

pub use scatter::ScatterAxes;

use polars::prelude::*;

use crate::Plot;

impl Plot {
  /// Adds a scatter series drawing one marker per `(x, y)` row.
  pub fn scatter(&mut self, x: &Column, y: &Column) -> PolarsResult<&mut ScatterAxes> {
    let index = self.axes.len();
    self.axes.push(ScatterAxes::new(x, y)?);
    Ok(&mut self.axes[index])
  }
}
