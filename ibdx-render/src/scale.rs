//! Linear and band scales with "nice" tick generation

/// Maps a data domain linearly onto a pixel range.
///
/// For vertical axes pass the range as `(bottom, top)` so larger values
/// land higher on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// `[0, max]`, or `[0, 1]` when every value is zero
    pub fn zero_based(max: f64, range: (f64, f64)) -> Self {
        let hi = if max > 0.0 && max.is_finite() { max } else { 1.0 };
        Self::new((0.0, hi), range)
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Position of `value` normalized into `[0, 1]` over the domain
    pub fn normalize(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d1 == d0 {
            return 0.0;
        }
        ((value - d0) / (d1 - d0)).clamp(0.0, 1.0)
    }

    pub fn ticks(&self, desired: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        nice_ticks(lo, hi, desired)
    }
}

/// Evenly spaced categorical slots along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub start: f64,
    pub end: f64,
}

impl BandScale {
    pub fn new(count: usize, start: f64, end: f64) -> Self {
        Self { count, start, end }
    }

    pub fn slot_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.end - self.start) / self.count as f64
    }

    pub fn slot_start(&self, index: usize) -> f64 {
        self.start + index as f64 * self.slot_width()
    }

    pub fn center(&self, index: usize) -> f64 {
        self.slot_start(index) + self.slot_width() / 2.0
    }
}

/// Round a step to 1, 2, or 5 x 10^k, never below the raw step
pub fn nice_round_length(x: f64) -> f64 {
    if x <= 0.0 || !x.is_finite() {
        return 1.0;
    }
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let mant = x / base;
    let nice = if mant <= 1.0 {
        1.0
    } else if mant <= 2.0 {
        2.0
    } else if mant <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Tick values at multiples of a nice step covering `[min, max]`
pub fn nice_ticks(min: f64, max: f64, desired: usize) -> Vec<f64> {
    let span = max - min;
    if span <= 0.0 || desired == 0 {
        return vec![min];
    }
    let step = nice_round_length(span / desired as f64);
    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    // multiply instead of accumulating so ticks do not drift
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Tick label with just enough decimals for the step
pub fn format_tick(value: f64, step: f64) -> String {
    if step >= 1.0 || step <= 0.0 {
        format!("{:.0}", value)
    } else {
        let decimals = (-step.log10().floor()) as usize;
        format!("{:.*}", decimals, value)
    }
}
