use super::{
    Geometry, WkbGeometry, WkbHeader, check_member_dimensions, envelope_of_members, read_members,
    write_members,
};
use crate::byte_io::{ByteCursor, ByteSink};
use crate::envelope::Envelope;
use crate::error::{GeometryError, Result, WkbFormatError};
use crate::factory::GeometryFactory;
use crate::types::{Dimension, GeometryType};

/// Heterogeneous members, decoded through a [`GeometryFactory`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeometryCollection {
    dimension: Dimension,
    geometries: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn new<I>(dimension: Dimension, geometries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Geometry>,
    {
        let geometries: Vec<Geometry> = geometries.into_iter().collect();
        check_member_dimensions(dimension, &geometries)?;
        Ok(Self {
            dimension,
            geometries,
        })
    }

    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            geometries: Vec::new(),
        }
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Each member is dispatched through `factory` on its own type code, so
    /// a factory missing a member's code fails with `Unsupported`. A member
    /// whose decoded dimensionality differs from the collection's is a
    /// `DimensionMismatch`, whatever its header said.
    pub fn read_wkb(cursor: &mut ByteCursor<'_>, factory: &GeometryFactory) -> Result<Self> {
        let dimension = WkbHeader::read_expecting(cursor, GeometryType::GeometryCollection)?;
        let mut index = 0;
        let geometries = read_members(cursor, dimension, |cursor| {
            let member = factory.read_geometry(cursor)?;
            let actual = member.dimension();
            if actual != dimension {
                log::debug!(
                    "decoder returned {actual:?} for member {index} of a {dimension:?} collection"
                );
                return Err(GeometryError::malformed(WkbFormatError::DimensionMismatch {
                    index,
                    expected: dimension,
                    actual,
                }));
            }
            index += 1;
            Ok(member)
        })?;
        Ok(Self {
            dimension,
            geometries,
        })
    }
}

impl WkbGeometry for GeometryCollection {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::GeometryCollection
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    fn create_envelope(&self) -> Envelope {
        envelope_of_members(self.dimension, &self.geometries)
    }

    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()> {
        write_members(sink, &self.geometries)
    }
}
