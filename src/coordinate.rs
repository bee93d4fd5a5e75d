use std::fmt;
use std::hash::{Hash, Hasher};

use crate::byte_io::{ByteCursor, ByteSink};
use crate::envelope::Envelope;
use crate::error::{GeometryError, Result};
use crate::types::{Contents, Dimension};

/// Immutable ordinate tuple. `z` and `m` are present according to the dimensionality.
///
/// A coordinate is empty when every ordinate it carries is NaN; an empty
/// point is stored on the wire exactly that way.
#[derive(Clone, Copy, Debug)]
pub struct Coordinate {
    x: f64,
    y: f64,
    z: Option<f64>,
    m: Option<f64>,
}

impl Coordinate {
    pub const fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    pub const fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }

    pub const fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }

    /// All-NaN coordinate of the given dimensionality.
    pub const fn empty(dimension: Dimension) -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
            z: if dimension.has_z() { Some(f64::NAN) } else { None },
            m: if dimension.has_m() { Some(f64::NAN) } else { None },
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> Option<f64> {
        self.z
    }

    pub fn m(&self) -> Option<f64> {
        self.m
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::from_flags(self.z.is_some(), self.m.is_some())
    }

    /// Ordinates in wire order: X, Y, (Z), (M).
    pub fn ordinates(&self) -> impl Iterator<Item = f64> + '_ {
        [Some(self.x), Some(self.y), self.z, self.m]
            .into_iter()
            .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinates().all(f64::is_nan)
    }

    pub fn contents(&self) -> Contents {
        if self.is_empty() {
            Contents::Empty
        } else {
            Contents::NotEmpty
        }
    }

    /// Envelope covering exactly this coordinate, or the empty envelope.
    pub fn create_envelope(&self) -> Envelope {
        if self.is_empty() {
            return Envelope::empty(self.dimension());
        }
        match (self.z, self.m) {
            (None, None) => Envelope::xy(self.x, self.y, self.x, self.y),
            (Some(z), None) => Envelope::xyz(self.x, self.y, z, self.x, self.y, z),
            (None, Some(m)) => Envelope::xym(self.x, self.y, m, self.x, self.y, m),
            (Some(z), Some(m)) => Envelope::xyzm(self.x, self.y, z, m, self.x, self.y, z, m),
        }
    }

    pub fn write_wkb(&self, sink: &mut ByteSink) {
        for ordinate in self.ordinates() {
            sink.write_f64(ordinate);
        }
    }

    pub fn read_wkb(cursor: &mut ByteCursor<'_>, dimension: Dimension) -> Result<Self> {
        let x = cursor.read_f64()?;
        let y = cursor.read_f64()?;
        let z = if dimension.has_z() {
            Some(cursor.read_f64()?)
        } else {
            None
        };
        let m = if dimension.has_m() {
            Some(cursor.read_f64()?)
        } else {
            None
        };
        Ok(Self { x, y, z, m })
    }
}

/// Boxed-double equality: NaN equals NaN, otherwise compare bits (so `0.0 != -0.0`).
#[inline]
pub(crate) fn ordinate_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

#[inline]
pub(crate) fn ordinate_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

fn optional_ordinate_eq(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ordinate_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        ordinate_eq(self.x, other.x)
            && ordinate_eq(self.y, other.y)
            && optional_ordinate_eq(self.z, other.z)
            && optional_ordinate_eq(self.m, other.m)
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension().hash(state);
        for ordinate in self.ordinates() {
            ordinate_bits(ordinate).hash(state);
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}", self.x, self.y)?;
        if let Some(z) = self.z {
            write!(f, ", {z}")?;
        }
        if let Some(m) = self.m {
            write!(f, ", {m}")?;
        }
        write!(f, ")")
    }
}

/// Every coordinate must carry the declared dimensionality.
pub(crate) fn check_dimension(dimension: Dimension, coordinates: &[Coordinate]) -> Result<()> {
    match coordinates
        .iter()
        .enumerate()
        .find(|(_, coordinate)| coordinate.dimension() != dimension)
    {
        Some((idx, coordinate)) => Err(GeometryError::InvalidArgument(format!(
            "coordinate at index {idx} has dimension {:?}, expected {dimension:?}",
            coordinate.dimension()
        ))),
        None => Ok(()),
    }
}

/// Vertex count followed by raw ordinates, shared by line strings and rings.
pub(crate) fn write_coordinate_list(sink: &mut ByteSink, coordinates: &[Coordinate]) -> Result<()> {
    sink.write_count(coordinates.len())?;
    for coordinate in coordinates {
        coordinate.write_wkb(sink);
    }
    Ok(())
}

pub(crate) fn read_coordinate_list(
    cursor: &mut ByteCursor<'_>,
    dimension: Dimension,
) -> Result<Vec<Coordinate>> {
    let count = cursor.read_count(dimension.size() * 8)?;
    (0..count)
        .map(|_| Coordinate::read_wkb(cursor, dimension))
        .collect()
}

pub(crate) fn envelope_of(dimension: Dimension, coordinates: &[Coordinate]) -> Envelope {
    coordinates
        .iter()
        .fold(Envelope::empty(dimension), |envelope, coordinate| {
            envelope.combine(&coordinate.create_envelope())
        })
}
