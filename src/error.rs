use std::error::Error;
use std::fmt;

use crate::types::{Dimension, GeometryType};

/// Reasons a byte sequence is not valid extended WKB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WkbFormatError {
    /// Fewer bytes remain than a read demands.
    BufferUnderflow {
        position: usize,
        requested: usize,
        remaining: usize,
    },
    /// The byte order marker was neither 0 (big endian) nor 1 (little endian).
    InvalidByteOrder(u8),
    /// The type code does not decompose into a geometry kind and dimensionality.
    UnrecognizedTypeCode(u32),
    /// A kind-specific reader was handed another kind's header.
    UnexpectedGeometryType {
        expected: GeometryType,
        type_code: u32,
    },
    /// A collection member's dimensionality disagrees with its parent.
    DimensionMismatch {
        index: usize,
        expected: Dimension,
        actual: Dimension,
    },
    /// A ring, vertex or element count was negative.
    NegativeCount(i32),
    /// Geometries nest deeper than [`MAX_NESTING_DEPTH`](crate::MAX_NESTING_DEPTH).
    NestingTooDeep { depth: usize },
}

impl fmt::Display for WkbFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferUnderflow {
                position,
                requested,
                remaining,
            } => write!(
                f,
                "buffer underflow at offset {position}: requested {requested} bytes, {remaining} remaining"
            ),
            Self::InvalidByteOrder(marker) => {
                write!(f, "invalid byte order marker: {marker:#04x}")
            }
            Self::UnrecognizedTypeCode(code) => write!(f, "unrecognized geometry type code {code}"),
            Self::UnexpectedGeometryType {
                expected,
                type_code,
            } => write!(
                f,
                "expected a {} geometry, got type code {type_code}",
                expected.name()
            ),
            Self::DimensionMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "geometry at index {index} has dimension {actual:?}, its parent collection is {expected:?}"
            ),
            Self::NegativeCount(count) => write!(f, "negative count: {count}"),
            Self::NestingTooDeep { depth } => {
                write!(f, "geometry nesting depth {depth} exceeds the limit")
            }
        }
    }
}

/// Crate error type for geometry encoding, decoding and GeoPackage storage.
#[derive(Debug)]
pub enum GeometryError {
    /// A constructor received arguments that violate a geometry invariant.
    InvalidArgument(String),
    /// The input bytes are not well-formed extended WKB.
    MalformedWellKnownBinary(WkbFormatError),
    /// The decode registry has no entry for this type code.
    Unsupported { type_code: u32 },
    /// Wraps errors returned by `rusqlite`.
    Sql(rusqlite::Error),
    /// GeoPackage geometry blob does not start with `GP`.
    InvalidGpkgGeometryMagic([u8; 2]),
    /// Invalid GeoPackage geometry flags byte.
    InvalidGpkgGeometryFlags(u8),
    /// GeoPackage geometry blob is too short for the fixed header.
    InvalidGpkgGeometryLength { len: usize, minimum: usize },
    /// GeoPackage geometry blob is too short for the declared envelope payload.
    InvalidGpkgGeometryEnvelope { len: usize, required: usize },
}

impl GeometryError {
    pub(crate) fn malformed(reason: WkbFormatError) -> Self {
        Self::MalformedWellKnownBinary(reason)
    }

    /// `true` for any decode failure caused by the bytes themselves.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedWellKnownBinary(_))
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::MalformedWellKnownBinary(reason) => {
                write!(f, "malformed well-known binary: {reason}")
            }
            Self::Unsupported { type_code } => write!(
                f,
                "no decoder registered for geometry type code {type_code}"
            ),
            Self::Sql(err) => write!(f, "{err}"),
            Self::InvalidGpkgGeometryMagic(magic) => {
                write!(f, "invalid gpkg geometry magic: {magic:02x?}")
            }
            Self::InvalidGpkgGeometryFlags(flags) => {
                write!(f, "invalid gpkg geometry flags: {flags:#04x}")
            }
            Self::InvalidGpkgGeometryLength { len, minimum } => {
                write!(
                    f,
                    "invalid gpkg geometry length: got {len} bytes, expected at least {minimum}"
                )
            }
            Self::InvalidGpkgGeometryEnvelope { len, required } => {
                write!(
                    f,
                    "invalid gpkg geometry envelope length: got {len} bytes, required {required}"
                )
            }
        }
    }
}

impl Error for GeometryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sql(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for GeometryError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sql(err)
    }
}

impl From<WkbFormatError> for GeometryError {
    fn from(err: WkbFormatError) -> Self {
        Self::MalformedWellKnownBinary(err)
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
