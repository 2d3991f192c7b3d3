use nalgebra::Point2;

/// Running min/max corner accumulator for the output canvas.
///
/// Starts empty (`min = +inf`, `max = -inf`), grows monotonically with each
/// point and never shrinks, so the final box does not depend on insertion
/// order.
#[derive(Clone, Copy, Debug)]
pub struct Bbox {
    min: Point2<f64>,
    max: Point2<f64>,
}

impl Bbox {
    pub fn new() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn grow(&mut self, p: Point2<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// True until the first `grow`.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn min(&self) -> Point2<f64> {
        self.min
    }
}

impl Default for Bbox {
    fn default() -> Self {
        Self::new()
    }
}
