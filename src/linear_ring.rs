use crate::byte_io::{ByteCursor, ByteSink};
use crate::coordinate::{
    Coordinate, check_dimension, envelope_of, read_coordinate_list, write_coordinate_list,
};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::Dimension;

/// Ordered vertex list bounding a polygon.
///
/// Rings are not geometries on the wire: they carry a vertex count but no
/// byte order or type code. Closure is not checked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinearRing {
    dimension: Dimension,
    coordinates: Vec<Coordinate>,
}

impl LinearRing {
    pub fn new<I>(dimension: Dimension, coordinates: I) -> Result<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let coordinates: Vec<Coordinate> = coordinates.into_iter().collect();
        check_dimension(dimension, &coordinates)?;
        Ok(Self {
            dimension,
            coordinates,
        })
    }

    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            coordinates: Vec::new(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn create_envelope(&self) -> Envelope {
        envelope_of(self.dimension, &self.coordinates)
    }

    pub fn write_wkb(&self, sink: &mut ByteSink) -> Result<()> {
        write_coordinate_list(sink, &self.coordinates)
    }

    pub fn read_wkb(cursor: &mut ByteCursor<'_>, dimension: Dimension) -> Result<Self> {
        Ok(Self {
            dimension,
            coordinates: read_coordinate_list(cursor, dimension)?,
        })
    }
}
