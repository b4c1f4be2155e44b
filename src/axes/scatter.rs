use kurbo::{Affine, Circle, Point};
use peniko::{Brush, Color};
use polars::prelude::*;

use crate::{Bounds, Range, data::values, render::Render};

pub struct ScatterAxes {
  points:  Vec<Point>,
  options: ScatterOptions,
}

pub(crate) struct ScatterOptions {
  pub size:  f64,
  pub color: Brush,
}

impl Default for ScatterOptions {
  fn default() -> Self {
    ScatterOptions { size: 5.0, color: Brush::Solid(Color::from_rgb8(117, 158, 208)) }
  }
}

impl ScatterAxes {
  pub(crate) fn new(x: &Column, y: &Column) -> PolarsResult<Self> {
    if x.len() != y.len() {
      return Err(PolarsError::ShapeMismatch(
        format!("scatter needs equal lengths, got x: {} and y: {}", x.len(), y.len()).into(),
      ));
    }

    let points =
      values(x)?.into_iter().zip(values(y)?).map(|(x, y)| Point::new(x, y)).collect::<Vec<_>>();

    Ok(ScatterAxes { points, options: ScatterOptions::default() })
  }

  pub fn len(&self) -> usize { self.points.len() }
  pub fn is_empty(&self) -> bool { self.points.is_empty() }

  /// Bounds of the points, or `None` when there are no points.
  pub(crate) fn data_bounds(&self) -> Option<Bounds> {
    Some(Bounds::new(
      Range::covering(self.points.iter().map(|p| p.x))?,
      Range::covering(self.points.iter().map(|p| p.y))?,
    ))
  }

  /// Draws one marker per point, returning how many were drawn.
  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) -> usize {
    for point in self.points.iter().map(|p| transform * *p) {
      render.fill(&Circle::new(point, self.options.size), &self.options.color);
    }

    self.points.len()
  }
}
