use crate::coordinate::{ordinate_bits, ordinate_eq};
use crate::types::{Dimension, EnvelopeContentsIndicator};
use std::hash::{Hash, Hasher};

/// Axis-aligned bounding extent.
///
/// The all-NaN envelope means "no envelope" and is the identity of [`Envelope::combine`].
/// Ordinate groups the dimensionality lacks are NaN.
#[derive(Clone, Copy, Debug)]
pub struct Envelope {
    dimension: Dimension,
    min_x: f64,
    min_y: f64,
    min_z: f64,
    min_m: f64,
    max_x: f64,
    max_y: f64,
    max_z: f64,
    max_m: f64,
}

impl Envelope {
    pub const fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            min_x: f64::NAN,
            min_y: f64::NAN,
            min_z: f64::NAN,
            min_m: f64::NAN,
            max_x: f64::NAN,
            max_y: f64::NAN,
            max_z: f64::NAN,
            max_m: f64::NAN,
        }
    }

    pub const fn xy(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            dimension: Dimension::Xy,
            min_x,
            min_y,
            max_x,
            max_y,
            ..Self::empty(Dimension::Xy)
        }
    }

    pub const fn xyz(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            dimension: Dimension::Xyz,
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
            ..Self::empty(Dimension::Xyz)
        }
    }

    pub const fn xym(min_x: f64, min_y: f64, min_m: f64, max_x: f64, max_y: f64, max_m: f64) -> Self {
        Self {
            dimension: Dimension::Xym,
            min_x,
            min_y,
            min_m,
            max_x,
            max_y,
            max_m,
            ..Self::empty(Dimension::Xym)
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub const fn xyzm(
        min_x: f64,
        min_y: f64,
        min_z: f64,
        min_m: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
        max_m: f64,
    ) -> Self {
        Self {
            dimension: Dimension::Xyzm,
            min_x,
            min_y,
            min_z,
            min_m,
            max_x,
            max_y,
            max_z,
            max_m,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn has_z(&self) -> bool {
        self.dimension.has_z()
    }

    pub fn has_m(&self) -> bool {
        self.dimension.has_m()
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn min_z(&self) -> Option<f64> {
        self.has_z().then_some(self.min_z)
    }

    pub fn max_z(&self) -> Option<f64> {
        self.has_z().then_some(self.max_z)
    }

    pub fn min_m(&self) -> Option<f64> {
        self.has_m().then_some(self.min_m)
    }

    pub fn max_m(&self) -> Option<f64> {
        self.has_m().then_some(self.max_m)
    }

    fn bounds(&self) -> [f64; 8] {
        [
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_z, self.max_z, self.min_m,
            self.max_m,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.bounds().iter().all(|bound| bound.is_nan())
    }

    pub fn contents_indicator(&self) -> EnvelopeContentsIndicator {
        if self.is_empty() {
            return EnvelopeContentsIndicator::NoEnvelope;
        }
        match self.dimension {
            Dimension::Xy => EnvelopeContentsIndicator::Xy,
            Dimension::Xyz => EnvelopeContentsIndicator::Xyz,
            Dimension::Xym => EnvelopeContentsIndicator::Xym,
            Dimension::Xyzm => EnvelopeContentsIndicator::Xyzm,
        }
    }

    /// `[min_x, max_x, min_y, max_y, (min_z, max_z), (min_m, max_m)]`, or
    /// nothing for the empty envelope.
    pub fn to_array(&self) -> Vec<f64> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut array = vec![self.min_x, self.max_x, self.min_y, self.max_y];
        if self.has_z() {
            array.extend([self.min_z, self.max_z]);
        }
        if self.has_m() {
            array.extend([self.min_m, self.max_m]);
        }
        array
    }

    /// Smallest envelope covering both operands.
    ///
    /// The empty envelope is the identity. Operands of different
    /// dimensionality produce the union of their ordinate groups, and two
    /// empty operands produce the empty envelope of that union.
    pub fn combine(&self, other: &Envelope) -> Envelope {
        let dimension = Dimension::from_flags(
            self.has_z() || other.has_z(),
            self.has_m() || other.has_m(),
        );
        match (self.is_empty(), other.is_empty()) {
            (true, true) => return Envelope::empty(dimension),
            (true, false) => return *other,
            (false, true) => return *self,
            (false, false) => {}
        }
        Envelope {
            dimension,
            min_x: nan_minimum(self.min_x, other.min_x),
            min_y: nan_minimum(self.min_y, other.min_y),
            min_z: nan_minimum(self.min_z, other.min_z),
            min_m: nan_minimum(self.min_m, other.min_m),
            max_x: nan_maximum(self.max_x, other.max_x),
            max_y: nan_maximum(self.max_y, other.max_y),
            max_z: nan_maximum(self.max_z, other.max_z),
            max_m: nan_maximum(self.max_m, other.max_m),
        }
    }
}

// NaN loses to any number; ties between 0.0 and -0.0 resolve the same way in
// either argument order so combine stays commutative.
fn nan_minimum(first: f64, second: f64) -> f64 {
    if first.is_nan() {
        second
    } else if second.is_nan() || first < second || (first == second && first.is_sign_negative()) {
        first
    } else {
        second
    }
}

fn nan_maximum(first: f64, second: f64) -> f64 {
    if first.is_nan() {
        second
    } else if second.is_nan() || first > second || (first == second && first.is_sign_positive()) {
        first
    } else {
        second
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self
                .bounds()
                .iter()
                .zip(other.bounds())
                .all(|(a, b)| ordinate_eq(*a, b))
    }
}

impl Eq for Envelope {}

impl Hash for Envelope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        for bound in self.bounds() {
            ordinate_bits(bound).hash(state);
        }
    }
}
