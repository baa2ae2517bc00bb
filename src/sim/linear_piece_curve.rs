use crate::TexError;
use arrayvec::ArrayVec;

/// Maximum number of `(x, y)` points a curve can hold
pub const MAX_CURVE_POINTS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
struct LinearPiece {
    pub base_x: f32,
    pub base_y: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub x_diff: f32,
    pub y_diff: f32,
}

/// A continuous linear piecewise function, used for the TEx torque curve
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<(f32, f32)>", into = "Vec<(f32, f32)>"))]
pub struct LinearPieceCurve {
    curve: ArrayVec<LinearPiece, MAX_CURVE_POINTS>,
}

impl LinearPieceCurve {
    /// A mapping of `(x, y)` pairs that make up the continuous linear piecewise function
    ///
    /// Points must be sorted by strictly increasing `x`.
    pub fn new(value_mappings: &[(f32, f32)]) -> Result<Self, TexError> {
        let Some(&(first_x, first_y)) = value_mappings.first() else {
            return Err(TexError::InvalidCurve("a curve needs at least one point"));
        };

        if value_mappings.len() > MAX_CURVE_POINTS {
            return Err(TexError::InvalidCurve("too many curve points"));
        }

        if value_mappings
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(TexError::InvalidCurve("curve points must be finite"));
        }

        let mut curve = ArrayVec::new();
        curve.push(LinearPiece {
            base_x: 0.0,
            base_y: 0.0,
            max_x: first_x,
            max_y: first_y,
            x_diff: 0.0,
            y_diff: 0.0,
        });

        for pair in value_mappings.windows(2) {
            let (prev, this) = (pair[0], pair[1]);
            if this.0 <= prev.0 {
                return Err(TexError::InvalidCurve(
                    "curve points must have increasing x values",
                ));
            }

            curve.push(LinearPiece {
                base_x: prev.0,
                base_y: prev.1,
                max_x: this.0,
                max_y: this.1,
                x_diff: this.0 - prev.0,
                y_diff: this.1 - prev.1,
            });
        }

        Ok(Self { curve })
    }

    /// Full output at rest, falling linearly to nothing at full input
    #[must_use]
    pub fn stall_falloff() -> Self {
        let mut curve = ArrayVec::new();
        curve.push(LinearPiece {
            base_x: 0.0,
            base_y: 0.0,
            max_x: 0.0,
            max_y: 1.0,
            x_diff: 0.0,
            y_diff: 0.0,
        });
        curve.push(LinearPiece {
            base_x: 0.0,
            base_y: 1.0,
            max_x: 1.0,
            max_y: 0.0,
            x_diff: 1.0,
            y_diff: -1.0,
        });
        Self { curve }
    }

    /// Returns the output of the curve
    ///
    /// # Arguments
    ///
    /// * `input` - The input to the curve
    #[must_use]
    pub fn get_output(&self, input: f32) -> f32 {
        let first_val_pair = self.curve[0];
        if input <= first_val_pair.max_x {
            return first_val_pair.max_y;
        }

        let Some(pair) = self.curve.iter().skip(1).find(|pair| pair.max_x > input) else {
            return self.curve[self.curve.len() - 1].max_y;
        };

        let interp_frac = (input - pair.base_x) / pair.x_diff;
        pair.y_diff * interp_frac + pair.base_y
    }

    /// Largest output the curve can produce
    #[must_use]
    pub fn max_output(&self) -> f32 {
        self.curve
            .iter()
            .map(|piece| piece.max_y)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// The `(x, y)` points this curve was built from
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.curve.iter().map(|piece| (piece.max_x, piece.max_y))
    }

    /// Checks the curve is a usable torque curve: monotonic (either direction),
    /// within `[0, 1]` on both axes.
    pub fn validate_torque_curve(&self) -> Result<(), TexError> {
        let (mut rising, mut falling) = (false, false);
        let mut prev_y = None;
        for (x, y) in self.points() {
            if !(0.0..=1.0).contains(&x) {
                return Err(TexError::InvalidCurve(
                    "torque curve inputs must lie within [0, 1]",
                ));
            }

            if !(0.0..=1.0).contains(&y) {
                return Err(TexError::InvalidCurve(
                    "torque curve outputs must lie within [0, 1]",
                ));
            }

            if let Some(prev_y) = prev_y {
                rising |= y > prev_y;
                falling |= y < prev_y;
            }
            prev_y = Some(y);
        }

        if rising && falling {
            return Err(TexError::InvalidCurve("torque curve must be monotonic"));
        }

        Ok(())
    }
}

impl TryFrom<Vec<(f32, f32)>> for LinearPieceCurve {
    type Error = TexError;

    fn try_from(value: Vec<(f32, f32)>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<LinearPieceCurve> for Vec<(f32, f32)> {
    fn from(value: LinearPieceCurve) -> Self {
        value.points().collect()
    }
}
