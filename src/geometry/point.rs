use super::{WkbGeometry, WkbHeader};
use crate::byte_io::{ByteCursor, ByteSink};
use crate::coordinate::Coordinate;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::{Dimension, GeometryType};

/// A single position. The empty point is encoded as all-NaN ordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    coordinate: Coordinate,
}

impl Point {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(Coordinate::xy(x, y))
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(Coordinate::xyz(x, y, z))
    }

    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Self::new(Coordinate::xym(x, y, m))
    }

    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self::new(Coordinate::xyzm(x, y, z, m))
    }

    pub fn empty(dimension: Dimension) -> Self {
        Self::new(Coordinate::empty(dimension))
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn x(&self) -> f64 {
        self.coordinate.x()
    }

    pub fn y(&self) -> f64 {
        self.coordinate.y()
    }

    pub fn z(&self) -> Option<f64> {
        self.coordinate.z()
    }

    pub fn m(&self) -> Option<f64> {
        self.coordinate.m()
    }

    pub fn read_wkb(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let dimension = WkbHeader::read_expecting(cursor, GeometryType::Point)?;
        Ok(Self::new(Coordinate::read_wkb(cursor, dimension)?))
    }
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate)
    }
}

impl WkbGeometry for Point {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn dimension(&self) -> Dimension {
        self.coordinate.dimension()
    }

    fn is_empty(&self) -> bool {
        self.coordinate.is_empty()
    }

    fn create_envelope(&self) -> Envelope {
        self.coordinate.create_envelope()
    }

    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()> {
        self.coordinate.write_wkb(sink);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Point;
    use crate::byte_io::{ByteCursor, WriteOptions};
    use crate::envelope::Envelope;
    use crate::error::Result;
    use crate::geometry::WkbGeometry;
    use crate::types::{Contents, Dimension, Endianness};

    #[test]
    fn encodes_xy_point_little_endian() -> Result<()> {
        let bytes = Point::xy(1.0, 2.0).to_wkb(&WriteOptions::default())?;
        let mut expected = vec![1u8, 1, 0, 0, 0];
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        expected.extend_from_slice(&2.0f64.to_le_bytes());
        assert_eq!(bytes, expected);
        Ok(())
    }

    #[test]
    fn encodes_xyzm_point_big_endian() -> Result<()> {
        let options = WriteOptions {
            endianness: Endianness::BigEndian,
            ..Default::default()
        };
        let bytes = Point::xyzm(1.0, 2.0, 3.0, 4.0).to_wkb(&options)?;
        assert_eq!(bytes.len(), 5 + 32);
        assert_eq!(&bytes[..5], &[0, 0, 0, 0x0b, 0xb9]);
        assert_eq!(&bytes[29..37], &4.0f64.to_be_bytes());
        Ok(())
    }

    #[test]
    fn empty_point_roundtrips_as_nan() -> Result<()> {
        let empty = Point::empty(Dimension::Xyz);
        assert!(empty.is_empty());
        assert_eq!(empty.contents(), Contents::Empty);
        assert_eq!(empty.type_code(), 1001);
        assert!(empty.create_envelope().is_empty());

        let bytes = empty.to_wkb(&WriteOptions::default())?;
        assert_eq!(bytes.len(), 5 + 24);
        let decoded = Point::read_wkb(&mut ByteCursor::new(&bytes))?;
        assert!(decoded.x().is_nan());
        assert!(decoded.z().is_some_and(f64::is_nan));
        assert_eq!(decoded, empty);
        Ok(())
    }

    #[test]
    fn envelope_is_degenerate_box() {
        assert_eq!(
            Point::xy(3.0, -4.0).create_envelope(),
            Envelope::xy(3.0, -4.0, 3.0, -4.0)
        );
        assert_eq!(Point::xym(1.0, 2.0, 9.0).dimension(), Dimension::Xym);
    }
}
