use kurbo::{Cap, Line, Point, Stroke};
use peniko::{Brush, Color};

use crate::render::{Align, DrawText, Render};

mod axes;
mod bounds;
mod data;
mod error;
mod render;

pub use axes::ScatterAxes;
pub use bounds::{Bounds, NiceTicksIter, Range};
pub use data::Dataset;
pub use error::{Error, Result};

/// Space between the window edge and the axis spines, in pixels.
const PADDING: f64 = 60.0;
const TICKS: u32 = 10;

#[derive(Default)]
pub struct Plot {
  axes: Vec<ScatterAxes>,
}

impl Plot {
  pub fn new() -> Plot { Plot::default() }

  pub fn axes(&self) -> &[ScatterAxes] { &self.axes }

  /// The data range shown on screen, including margins.
  pub fn data_bounds(&self) -> Bounds {
    self
      .axes
      .iter()
      .filter_map(ScatterAxes::data_bounds)
      .reduce(|a, b| a.union(b))
      .map(|b| b.non_degenerate().expand_by(bounds::MARGIN))
      .unwrap_or(Bounds::unit())
  }

  /// Draws the plot into a `width` by `height` pixel scene, returning the
  /// number of markers drawn.
  pub(crate) fn draw(&self, render: &mut Render, width: u32, height: u32) -> usize {
    const TEXT_COLOR: Brush = Brush::Solid(Color::from_rgb8(32, 32, 32));
    const LINE_COLOR: Brush = Brush::Solid(Color::from_rgb8(128, 128, 128));

    let (width, height) = (f64::from(width), f64::from(height));
    let padding = PADDING.min(width.min(height) / 4.0);
    let viewport = Bounds::new(Range::new(0.0, width), Range::new(height, 0.0)).shrink(padding);

    let border_stroke = Stroke::new(2.0);
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      &LINE_COLOR,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      &LINE_COLOR,
      &border_stroke,
    );

    let data_bounds = self.data_bounds();
    let transform = data_bounds.transform_to(viewport);

    let iter = data_bounds.y.nice_ticks(TICKS);
    let decimals = iter.decimals();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 10.0, vy)),
        &LINE_COLOR,
        &border_stroke.clone().with_start_cap(Cap::Butt),
      );
      render.draw_text(DrawText {
        text: &format!("{y:.decimals$}"),
        size: 12.0,
        position: Point { x: viewport.x.min - 15.0, y: vy },
        brush: TEXT_COLOR,
        horizontal_align: Align::End,
        vertical_align: Align::Center,
      });
    }

    let iter = data_bounds.x.nice_ticks(TICKS);
    let decimals = iter.decimals();
    for (x, vx) in iter
      .map(|v| (v, (transform * Point::new(v, 0.0)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 10.0)),
        &LINE_COLOR,
        &border_stroke.clone().with_start_cap(Cap::Butt),
      );
      render.draw_text(DrawText {
        text: &format!("{x:.decimals$}"),
        size: 12.0,
        position: Point { x: vx, y: viewport.y.min + 15.0 },
        brush: TEXT_COLOR,
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
      });
    }

    self.axes.iter().map(|axes| axes.draw(render, transform)).sum()
  }
}

pub(crate) trait ResultExt<T> {
  /// Logs the error and discards it.
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::error!("{e}");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use polars::prelude::*;

  use super::*;

  fn columns(x: &[f64], y: &[f64]) -> (Column, Column) {
    (Column::new("x".into(), x), Column::new("y".into(), y))
  }

  #[test]
  fn one_marker_per_point() {
    let (x, y) = columns(&[1.0, 3.0, 5.0], &[2.0, 4.0, 6.0]);
    let mut plot = Plot::new();
    plot.scatter(&x, &y).unwrap();

    assert_eq!(plot.axes()[0].len(), 3);
    assert_eq!(plot.draw(&mut Render::new(), 800, 600), 3);
  }

  #[test]
  fn empty_plot_draws_no_markers() {
    let data = Dataset::empty();
    let mut plot = Plot::new();
    plot.scatter(data.x(), data.y()).unwrap();

    assert!(plot.axes()[0].is_empty());
    assert_eq!(plot.data_bounds(), Bounds::unit());
    assert_eq!(plot.draw(&mut Render::new(), 800, 600), 0);
  }

  #[test]
  fn single_point_is_drawn() {
    let (x, y) = columns(&[2.0], &[0.0]);
    let mut plot = Plot::new();
    plot.scatter(&x, &y).unwrap();

    let bounds = plot.data_bounds();
    assert!(bounds.width() > 0.0 && bounds.height() > 0.0);
    assert!(bounds.x.contains(&2.0) && bounds.y.contains(&0.0));
    assert_eq!(plot.draw(&mut Render::new(), 800, 600), 1);
  }

  #[test]
  fn data_bounds_include_margin() {
    let (x, y) = columns(&[0.0, 10.0], &[0.0, 20.0]);
    let mut plot = Plot::new();
    plot.scatter(&x, &y).unwrap();

    let bounds = plot.data_bounds();
    assert_eq!(bounds.x, Range::new(-0.5, 10.5));
    assert_eq!(bounds.y, Range::new(-1.0, 21.0));
  }

  #[test]
  fn mismatched_lengths_are_rejected() {
    let (x, y) = columns(&[1.0, 2.0], &[1.0]);

    assert!(Plot::new().scatter(&x, &y).is_err());
  }

  #[test]
  fn large_values_with_small_spread_finish_drawing() {
    let (x, y) = columns(&[1e16, 1e16 + 2.0], &[1.0, 2.0]);
    let mut plot = Plot::new();
    plot.scatter(&x, &y).unwrap();

    assert_eq!(plot.draw(&mut Render::new(), 800, 600), 2);
  }

  #[test]
  fn tiny_window_still_draws() {
    let (x, y) = columns(&[1.0, 2.0], &[3.0, 4.0]);
    let mut plot = Plot::new();
    plot.scatter(&x, &y).unwrap();

    assert_eq!(plot.draw(&mut Render::new(), 1, 1), 2);
  }
}
