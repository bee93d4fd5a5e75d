use super::{
    Polygon, WkbGeometry, WkbHeader, check_member_dimensions, envelope_of_members, read_members,
    write_members,
};
use crate::byte_io::{ByteCursor, ByteSink};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::{Dimension, GeometryType};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MultiPolygon {
    dimension: Dimension,
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new<I>(dimension: Dimension, polygons: I) -> Result<Self>
    where
        I: IntoIterator<Item = Polygon>,
    {
        let polygons: Vec<Polygon> = polygons.into_iter().collect();
        check_member_dimensions(dimension, &polygons)?;
        Ok(Self {
            dimension,
            polygons,
        })
    }

    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            polygons: Vec::new(),
        }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn read_wkb(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let dimension = WkbHeader::read_expecting(cursor, GeometryType::MultiPolygon)?;
        let polygons = read_members(cursor, dimension, Polygon::read_wkb)?;
        Ok(Self {
            dimension,
            polygons,
        })
    }
}

impl WkbGeometry for MultiPolygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    fn create_envelope(&self) -> Envelope {
        envelope_of_members(self.dimension, &self.polygons)
    }

    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()> {
        write_members(sink, &self.polygons)
    }
}

#[cfg(test)]
mod tests {
    use super::MultiPolygon;
    use crate::byte_io::{ByteCursor, WriteOptions};
    use crate::coordinate::Coordinate;
    use crate::envelope::Envelope;
    use crate::error::Result;
    use crate::geometry::{Polygon, WkbGeometry};
    use crate::linear_ring::LinearRing;
    use crate::types::{Dimension, Endianness};

    fn triangle(offset: f64) -> Result<Polygon> {
        let ring = LinearRing::new(
            Dimension::Xyz,
            [
                Coordinate::xyz(offset, 0.0, 1.0),
                Coordinate::xyz(offset + 1.0, 0.0, 2.0),
                Coordinate::xyz(offset, 1.0, 3.0),
                Coordinate::xyz(offset, 0.0, 1.0),
            ],
        )?;
        Polygon::new(ring, [])
    }

    #[test]
    fn roundtrips_big_endian_with_envelope() -> Result<()> {
        let multi = MultiPolygon::new(Dimension::Xyz, [triangle(0.0)?, triangle(10.0)?])?;
        assert_eq!(
            multi.create_envelope(),
            Envelope::xyz(0.0, 0.0, 1.0, 11.0, 1.0, 3.0)
        );

        let options = WriteOptions {
            endianness: Endianness::BigEndian,
            ..Default::default()
        };
        let bytes = multi.to_wkb(&options)?;
        assert_eq!(&bytes[..5], &[0, 0, 0, 0x03, 0xee]);
        assert_eq!(MultiPolygon::read_wkb(&mut ByteCursor::new(&bytes))?, multi);
        Ok(())
    }

    #[test]
    fn empty_multi_polygon() -> Result<()> {
        let empty = MultiPolygon::empty(Dimension::Xyzm);
        assert!(empty.is_empty());
        assert_eq!(empty.type_code(), 3006);
        let bytes = empty.to_wkb(&WriteOptions::default())?;
        assert_eq!(bytes.len(), 9);
        assert_eq!(MultiPolygon::read_wkb(&mut ByteCursor::new(&bytes))?, empty);
        Ok(())
    }
}
