//! Concrete geometry kinds and the contract they share.
//!
//! Every kind is parameterized by a [`Dimension`] instead of having one type
//! per dimensionality; the type code written on the wire is the OGC base code
//! plus 0/1000/2000/3000.

mod convert;
mod geometry_collection;
mod line_string;
mod multi_line_string;
mod multi_point;
mod multi_polygon;
mod point;
mod polygon;

pub use geometry_collection::GeometryCollection;
pub use line_string::LineString;
pub use multi_line_string::MultiLineString;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;

use crate::byte_io::{ByteCursor, ByteSink, WriteOptions};
use crate::conversions::{dimension_from_type_code, split_type_code, type_code};
use crate::envelope::Envelope;
use crate::error::{GeometryError, Result, WkbFormatError};
use crate::factory::default_factory;
use crate::types::{Contents, Dimension, Endianness, GeometryType};

/// Byte order marker plus type code.
pub(crate) const WKB_HEADER_SIZE: usize = 5;

/// The header every WKB geometry starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WkbHeader {
    pub endianness: Endianness,
    pub type_code: u32,
}

impl WkbHeader {
    /// Read the header and switch the cursor to the announced byte order.
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let endianness = Endianness::from_marker(cursor.read_u8()?)?;
        cursor.set_endianness(endianness);
        let type_code = cursor.read_u32()?;
        Ok(Self {
            endianness,
            type_code,
        })
    }

    /// Read the header, then rewind so a type-specific reader can read it again.
    pub fn peek(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let mark = cursor.mark();
        let header = Self::read(cursor);
        cursor.restore(mark);
        header
    }

    pub fn dimension(&self) -> Result<Dimension> {
        dimension_from_type_code(self.type_code)
    }

    pub fn write(sink: &mut ByteSink, type_code: u32) {
        sink.write_u8(sink.endianness().marker());
        sink.write_u32(type_code);
    }

    /// Read a header that must belong to `expected`; returns its dimensionality.
    pub(crate) fn read_expecting(
        cursor: &mut ByteCursor<'_>,
        expected: GeometryType,
    ) -> Result<Dimension> {
        let header = Self::read(cursor)?;
        let (geometry_type, dimension) = split_type_code(header.type_code)?;
        if geometry_type != expected {
            return Err(GeometryError::malformed(
                WkbFormatError::UnexpectedGeometryType {
                    expected,
                    type_code: header.type_code,
                },
            ));
        }
        Ok(dimension)
    }
}

/// Operations shared by every geometry kind.
pub trait WkbGeometry {
    fn geometry_type(&self) -> GeometryType;

    fn dimension(&self) -> Dimension;

    fn is_empty(&self) -> bool;

    fn create_envelope(&self) -> Envelope;

    /// Everything after the header.
    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()>;

    fn type_code(&self) -> u32 {
        type_code(self.geometry_type(), self.dimension())
    }

    fn type_name(&self) -> &'static str {
        self.geometry_type().name()
    }

    fn contents(&self) -> Contents {
        if self.is_empty() {
            Contents::Empty
        } else {
            Contents::NotEmpty
        }
    }

    /// Write the self-describing form: order marker, type code, body.
    fn write_wkb(&self, sink: &mut ByteSink) -> Result<()> {
        WkbHeader::write(sink, self.type_code());
        self.write_wkb_body(sink)
    }

    fn to_wkb(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        let mut sink = ByteSink::with_options(options);
        self.write_wkb(&mut sink)?;
        Ok(sink.into_bytes())
    }
}

/// Any geometry this crate decodes; the element type of geometry collections.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

macro_rules! dispatch {
    ($self:expr, $geometry:ident => $body:expr) => {
        match $self {
            Geometry::Point($geometry) => $body,
            Geometry::LineString($geometry) => $body,
            Geometry::Polygon($geometry) => $body,
            Geometry::MultiPoint($geometry) => $body,
            Geometry::MultiLineString($geometry) => $body,
            Geometry::MultiPolygon($geometry) => $body,
            Geometry::GeometryCollection($geometry) => $body,
        }
    };
}

impl WkbGeometry for Geometry {
    fn geometry_type(&self) -> GeometryType {
        dispatch!(self, geometry => geometry.geometry_type())
    }

    fn dimension(&self) -> Dimension {
        dispatch!(self, geometry => geometry.dimension())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, geometry => geometry.is_empty())
    }

    fn create_envelope(&self) -> Envelope {
        dispatch!(self, geometry => geometry.create_envelope())
    }

    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()> {
        dispatch!(self, geometry => geometry.write_wkb_body(sink))
    }
}

impl Geometry {
    /// Decode with the default factory, which knows all 28 type codes.
    pub fn from_wkb(bytes: &[u8]) -> Result<Self> {
        default_factory().read_wkb(bytes)
    }
}

macro_rules! impl_from_kind {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for Geometry {
                fn from(geometry: $kind) -> Self {
                    Geometry::$kind(geometry)
                }
            }
        )*
    };
}

impl_from_kind!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);

pub(crate) fn check_member_dimensions<G: WkbGeometry>(
    dimension: Dimension,
    members: &[G],
) -> Result<()> {
    match members
        .iter()
        .enumerate()
        .find(|(_, member)| member.dimension() != dimension)
    {
        Some((idx, member)) => Err(GeometryError::InvalidArgument(format!(
            "{} at index {idx} has dimension {:?}, expected {dimension:?}",
            member.type_name(),
            member.dimension()
        ))),
        None => Ok(()),
    }
}

pub(crate) fn envelope_of_members<G: WkbGeometry>(dimension: Dimension, members: &[G]) -> Envelope {
    members
        .iter()
        .fold(Envelope::empty(dimension), |envelope, member| {
            envelope.combine(&member.create_envelope())
        })
}

/// Element count, then each member's full self-describing WKB.
pub(crate) fn write_members<G: WkbGeometry>(sink: &mut ByteSink, members: &[G]) -> Result<()> {
    sink.write_count(members.len())?;
    members.iter().try_for_each(|member| member.write_wkb(sink))
}

/// Read a member list, checking each member's header against the parent's
/// dimensionality before handing it to `read_member`.
pub(crate) fn read_members<'a, T, F>(
    cursor: &mut ByteCursor<'a>,
    dimension: Dimension,
    mut read_member: F,
) -> Result<Vec<T>>
where
    F: FnMut(&mut ByteCursor<'a>) -> Result<T>,
{
    let count = cursor.read_count(WKB_HEADER_SIZE)?;
    let mut members = Vec::with_capacity(count);
    for index in 0..count {
        let actual = WkbHeader::peek(cursor)?.dimension()?;
        if actual != dimension {
            log::debug!(
                "member {index} at offset {} is {actual:?} inside a {dimension:?} parent",
                cursor.position()
            );
            return Err(GeometryError::malformed(WkbFormatError::DimensionMismatch {
                index,
                expected: dimension,
                actual,
            }));
        }
        members.push(read_member(cursor)?);
    }
    Ok(members)
}
