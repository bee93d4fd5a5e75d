use super::{WkbGeometry, WkbHeader};
use crate::byte_io::{ByteCursor, ByteSink};
use crate::coordinate::{
    Coordinate, check_dimension, envelope_of, read_coordinate_list, write_coordinate_list,
};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::{Dimension, GeometryType};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineString {
    dimension: Dimension,
    coordinates: Vec<Coordinate>,
}

impl LineString {
    /// Fails with `InvalidArgument` when a vertex has another dimensionality.
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

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn read_wkb(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let dimension = WkbHeader::read_expecting(cursor, GeometryType::LineString)?;
        Ok(Self {
            dimension,
            coordinates: read_coordinate_list(cursor, dimension)?,
        })
    }
}

impl WkbGeometry for LineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    fn create_envelope(&self) -> Envelope {
        envelope_of(self.dimension, &self.coordinates)
    }

    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()> {
        write_coordinate_list(sink, &self.coordinates)
    }
}
