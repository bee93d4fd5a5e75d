use super::{
    Point, WkbGeometry, WkbHeader, check_member_dimensions, envelope_of_members, read_members,
    write_members,
};
use crate::byte_io::{ByteCursor, ByteSink};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::{Dimension, GeometryType};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MultiPoint {
    dimension: Dimension,
    points: Vec<Point>,
}

impl MultiPoint {
    pub fn new<I>(dimension: Dimension, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let points: Vec<Point> = points.into_iter().collect();
        check_member_dimensions(dimension, &points)?;
        Ok(Self { dimension, points })
    }

    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            points: Vec::new(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn read_wkb(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let dimension = WkbHeader::read_expecting(cursor, GeometryType::MultiPoint)?;
        let points = read_members(cursor, dimension, Point::read_wkb)?;
        Ok(Self { dimension, points })
    }
}

impl WkbGeometry for MultiPoint {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPoint
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn create_envelope(&self) -> Envelope {
        envelope_of_members(self.dimension, &self.points)
    }

    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()> {
        write_members(sink, &self.points)
    }
}
