use kurbo::Affine;

/// Fraction of the data range added as padding on each side of an axis.
pub const MARGIN: f64 = 0.05;

/// Upper limit on the ticks a single axis can produce.
const MAX_TICKS: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn unit() -> Self { Bounds { x: Range::unit(), y: Range::unit() } }
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  pub fn width(&self) -> f64 { self.x.size() }
  pub fn height(&self) -> f64 { self.y.size() }

  pub const fn shrink(self, amount: f64) -> Self {
    Bounds { x: self.x.shrink(amount), y: self.y.shrink(amount) }
  }

  pub const fn expand_by(self, fract: f64) -> Self {
    Bounds { x: self.x.expand_by(fract), y: self.y.expand_by(fract) }
  }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  /// Widens zero-sized axes so the bounds can be mapped onto a viewport.
  pub fn non_degenerate(self) -> Self {
    Bounds { x: self.x.non_degenerate(), y: self.y.non_degenerate() }
  }

  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Range {
  pub const fn unit() -> Self { Range { min: 0.0, max: 1.0 } }
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  /// The smallest range containing every value, or `None` for no values.
  pub fn covering(values: impl IntoIterator<Item = f64>) -> Option<Self> {
    values.into_iter().fold(None, |range, v| match range {
      None => Some(Range::new(v, v)),
      Some(r) => Some(Range::new(r.min.min(v), r.max.max(v))),
    })
  }

  pub const fn shrink(self, amount: f64) -> Self { self.expand(-amount) }
  pub const fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }
  pub const fn expand_by(self, fract: f64) -> Self { self.expand(self.size() * fract) }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn union(&self, other: Range) -> Range {
    Range { min: self.min.min(other.min), max: self.max.max(other.max) }
  }

  pub fn non_degenerate(self) -> Self {
    if self.size() != 0.0 {
      return self;
    }

    let half = if self.min == 0.0 { 0.5 } else { self.min.abs() * MARGIN };
    Range::new(self.min - half, self.max + half)
  }

  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let step = (self.max - self.min) / f64::from(count);
    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b < 1.0 => 1.0,
      b if b < 2.0 => 2.0,
      b if b < 2.5 => 2.5,
      b if b < 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let lo = (self.min / step).floor() * step;
    let hi = (self.max / step).ceil() * step;

    let precision = (-k as i32 + 4).max(0) as usize;
    NiceTicksIter::new(lo, hi, step, precision)
  }
}

pub struct NiceTicksIter {
  lo:        f64,
  step:      f64,
  index:     usize,
  count:     usize,
  precision: usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, precision: usize) -> Self {
    // Ticks are computed by index, since `lo + step` can round back to `lo`
    // when the step is below the precision of the values.
    let count = if step > 0.0 && step.is_finite() && (hi - lo).is_finite() {
      ((hi - lo) / step).round().clamp(0.0, MAX_TICKS) as usize + 1
    } else {
      0
    };
    NiceTicksIter { lo, step, index: 0, count, precision }
  }

  pub fn precision(&self) -> usize { self.precision }

  /// Number of decimals needed to print each tick distinctly.
  pub fn decimals(&self) -> usize { self.precision.saturating_sub(3) }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.index < self.count {
      let p = 10f64.powi(self.precision as i32);
      let current = self.lo + self.index as f64 * self.step;
      self.index += 1;
      Some((current * p).round() / p)
    } else {
      None
    }
  }
}
