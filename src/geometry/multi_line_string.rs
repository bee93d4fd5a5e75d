use super::{
    LineString, WkbGeometry, WkbHeader, check_member_dimensions, envelope_of_members,
    read_members, write_members,
};
use crate::byte_io::{ByteCursor, ByteSink};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::types::{Dimension, GeometryType};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MultiLineString {
    dimension: Dimension,
    line_strings: Vec<LineString>,
}

impl MultiLineString {
    pub fn new<I>(dimension: Dimension, line_strings: I) -> Result<Self>
    where
        I: IntoIterator<Item = LineString>,
    {
        let line_strings: Vec<LineString> = line_strings.into_iter().collect();
        check_member_dimensions(dimension, &line_strings)?;
        Ok(Self {
            dimension,
            line_strings,
        })
    }

    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            line_strings: Vec::new(),
        }
    }

    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }

    pub fn read_wkb(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let dimension = WkbHeader::read_expecting(cursor, GeometryType::MultiLineString)?;
        let line_strings = read_members(cursor, dimension, LineString::read_wkb)?;
        Ok(Self {
            dimension,
            line_strings,
        })
    }
}

impl WkbGeometry for MultiLineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiLineString
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn is_empty(&self) -> bool {
        self.line_strings.is_empty()
    }

    fn create_envelope(&self) -> Envelope {
        envelope_of_members(self.dimension, &self.line_strings)
    }

    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()> {
        write_members(sink, &self.line_strings)
    }
}

#[cfg(test)]
mod tests {
    use super::MultiLineString;
    use crate::byte_io::{ByteCursor, WriteOptions};
    use crate::coordinate::Coordinate;
    use crate::envelope::Envelope;
    use crate::error::{GeometryError, Result, WkbFormatError};
    use crate::geometry::{LineString, Point, WkbGeometry};
    use crate::types::Dimension;

    #[test]
    fn envelope_spans_every_line() -> Result<()> {
        let multi = MultiLineString::new(
            Dimension::Xym,
            [
                LineString::new(
                    Dimension::Xym,
                    [Coordinate::xym(0.0, 0.0, 1.0), Coordinate::xym(1.0, 1.0, 2.0)],
                )?,
                LineString::new(Dimension::Xym, [Coordinate::xym(-4.0, 9.0, 0.5)])?,
                LineString::empty(Dimension::Xym),
            ],
        )?;
        assert_eq!(
            multi.create_envelope(),
            Envelope::xym(-4.0, 0.0, 0.5, 1.0, 9.0, 2.0)
        );

        let bytes = multi.to_wkb(&WriteOptions::default())?;
        assert_eq!(MultiLineString::read_wkb(&mut ByteCursor::new(&bytes))?, multi);
        Ok(())
    }

    #[test]
    fn rejects_members_of_another_kind() -> Result<()> {
        let mut bytes = MultiLineString::new(Dimension::Xy, [LineString::empty(Dimension::Xy)])?
            .to_wkb(&WriteOptions::default())?;
        // Swap the member for a point of the same dimensionality.
        bytes.truncate(9);
        bytes.extend(Point::xy(1.0, 1.0).to_wkb(&WriteOptions::default())?);

        let err = MultiLineString::read_wkb(&mut ByteCursor::new(&bytes)).expect_err("point member");
        assert!(matches!(
            err,
            GeometryError::MalformedWellKnownBinary(WkbFormatError::UnexpectedGeometryType {
                type_code: 1,
                ..
            })
        ));
        Ok(())
    }
}
