use crate::error::{GeometryError, Result, WkbFormatError};

/// Byte order of a WKB geometry, announced by its first byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Marker `0`.
    BigEndian,
    /// Marker `1`.
    #[default]
    LittleEndian,
}

impl Endianness {
    /// The marker byte written in front of every geometry.
    pub const fn marker(self) -> u8 {
        match self {
            Self::BigEndian => 0,
            Self::LittleEndian => 1,
        }
    }

    pub fn from_marker(marker: u8) -> Result<Self> {
        match marker {
            0 => Ok(Self::BigEndian),
            1 => Ok(Self::LittleEndian),
            other => Err(GeometryError::malformed(WkbFormatError::InvalidByteOrder(
                other,
            ))),
        }
    }
}

/// Which ordinates every coordinate of a geometry carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dimension {
    #[default]
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [Self::Xy, Self::Xyz, Self::Xym, Self::Xyzm];

    /// Amount added to the OGC base code to form the extended WKB type code.
    pub const fn type_code_offset(self) -> u32 {
        match self {
            Self::Xy => 0,
            Self::Xyz => 1000,
            Self::Xym => 2000,
            Self::Xyzm => 3000,
        }
    }

    pub const fn has_z(self) -> bool {
        matches!(self, Self::Xyz | Self::Xyzm)
    }

    pub const fn has_m(self) -> bool {
        matches!(self, Self::Xym | Self::Xyzm)
    }

    /// Number of ordinates per coordinate.
    pub const fn size(self) -> usize {
        match self {
            Self::Xy => 2,
            Self::Xyz | Self::Xym => 3,
            Self::Xyzm => 4,
        }
    }

    pub(crate) const fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Self::Xy,
            (true, false) => Self::Xyz,
            (false, true) => Self::Xym,
            (true, true) => Self::Xyzm,
        }
    }
}

/// OGC simple-feature geometry kinds and their base type codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum GeometryType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryType {
    pub const ALL: [GeometryType; 7] = [
        Self::Point,
        Self::LineString,
        Self::Polygon,
        Self::MultiPoint,
        Self::MultiLineString,
        Self::MultiPolygon,
        Self::GeometryCollection,
    ];

    /// Base type code, independent of dimensionality.
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Point),
            2 => Some(Self::LineString),
            3 => Some(Self::Polygon),
            4 => Some(Self::MultiPoint),
            5 => Some(Self::MultiLineString),
            6 => Some(Self::MultiPolygon),
            7 => Some(Self::GeometryCollection),
            _ => None,
        }
    }

    /// Canonical OGC name, e.g. `MultiLineString`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }
}

/// Whether a coordinate or geometry holds any data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Contents {
    Empty,
    NotEmpty,
}

/// Which envelope, if any, a GeoPackage binary header carries.
///
/// The codec only computes this; `gpkg` writes it into bits 1-3 of the header flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnvelopeContentsIndicator {
    NoEnvelope,
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl EnvelopeContentsIndicator {
    pub const fn code(self) -> u8 {
        match self {
            Self::NoEnvelope => 0,
            Self::Xy => 1,
            Self::Xyz => 2,
            Self::Xym => 3,
            Self::Xyzm => 4,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoEnvelope),
            1 => Some(Self::Xy),
            2 => Some(Self::Xyz),
            3 => Some(Self::Xym),
            4 => Some(Self::Xyzm),
            _ => None,
        }
    }

    /// Number of doubles in the serialized envelope.
    pub const fn array_size(self) -> usize {
        match self {
            Self::NoEnvelope => 0,
            Self::Xy => 4,
            Self::Xyz | Self::Xym => 6,
            Self::Xyzm => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dimension, Endianness, EnvelopeContentsIndicator, GeometryType};
    use crate::error::{GeometryError, WkbFormatError};

    #[test]
    fn geometry_type_codes_roundtrip() {
        for (idx, geometry_type) in GeometryType::ALL.into_iter().enumerate() {
            assert_eq!(geometry_type.code(), idx as u32 + 1);
            assert_eq!(GeometryType::from_code(geometry_type.code()), Some(geometry_type));
        }
        assert_eq!(GeometryType::from_code(0), None);
        assert_eq!(GeometryType::from_code(8), None);
    }

    #[test]
    fn envelope_indicator_sizes() {
        assert_eq!(EnvelopeContentsIndicator::NoEnvelope.array_size(), 0);
        assert_eq!(EnvelopeContentsIndicator::Xy.array_size(), 4);
        assert_eq!(EnvelopeContentsIndicator::Xyz.array_size(), 6);
        assert_eq!(EnvelopeContentsIndicator::Xym.array_size(), 6);
        assert_eq!(EnvelopeContentsIndicator::Xyzm.array_size(), 8);
        assert_eq!(
            EnvelopeContentsIndicator::from_code(4),
            Some(EnvelopeContentsIndicator::Xyzm)
        );
        assert_eq!(EnvelopeContentsIndicator::from_code(5), None);
    }

    #[test]
    fn dimension_flags() {
        assert_eq!(Dimension::from_flags(true, true), Dimension::Xyzm);
        assert!(Dimension::Xym.has_m());
        assert!(!Dimension::Xym.has_z());
        assert_eq!(Dimension::Xyzm.size(), 4);
    }

    #[test]
    fn rejects_unknown_byte_order_marker() {
        assert_eq!(Endianness::from_marker(0).ok(), Some(Endianness::BigEndian));
        let err = Endianness::from_marker(7).expect_err("marker 7 is invalid");
        assert!(matches!(
            err,
            GeometryError::MalformedWellKnownBinary(WkbFormatError::InvalidByteOrder(7))
        ));
    }
}
