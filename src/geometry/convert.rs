use geo_traits::{
    CoordTrait, Dimensions, GeometryCollectionTrait, GeometryTrait, GeometryType as GeoType,
    LineStringTrait, MultiLineStringTrait, MultiPointTrait, MultiPolygonTrait, PointTrait,
    PolygonTrait,
};

use super::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::coordinate::Coordinate;
use crate::error::{GeometryError, Result};
use crate::linear_ring::LinearRing;
use crate::types::Dimension;

impl Geometry {
    /// Build a codec geometry from any geo-traits producer (`geo_types`,
    /// `wkt::Wkt`, `wkb::reader::Wkb`, ...).
    ///
    /// A point without a coordinate becomes the all-NaN empty point. Rect,
    /// Triangle and Line have no extended WKB encoding and are rejected.
    pub fn from_geo_traits<G: GeometryTrait<T = f64>>(geometry: &G) -> Result<Self> {
        let dimension = dimension_of(geometry.dim())?;
        let geometry: Geometry = match geometry.as_type() {
            GeoType::Point(point) => point_from(point, dimension)?.into(),
            GeoType::LineString(line) => line_string_from(line, dimension)?.into(),
            GeoType::Polygon(polygon) => polygon_from(polygon, dimension)?.into(),
            GeoType::MultiPoint(multi) => MultiPoint::new(
                dimension,
                multi
                    .points()
                    .map(|point| point_from(&point, dimension))
                    .collect::<Result<Vec<_>>>()?,
            )?
            .into(),
            GeoType::MultiLineString(multi) => MultiLineString::new(
                dimension,
                multi
                    .line_strings()
                    .map(|line| line_string_from(&line, dimension))
                    .collect::<Result<Vec<_>>>()?,
            )?
            .into(),
            GeoType::MultiPolygon(multi) => MultiPolygon::new(
                dimension,
                multi
                    .polygons()
                    .map(|polygon| polygon_from(&polygon, dimension))
                    .collect::<Result<Vec<_>>>()?,
            )?
            .into(),
            GeoType::GeometryCollection(collection) => GeometryCollection::new(
                dimension,
                collection
                    .geometries()
                    .map(|member| Geometry::from_geo_traits(&member))
                    .collect::<Result<Vec<_>>>()?,
            )?
            .into(),
            GeoType::Rect(_) => return Err(no_encoding("Rect")),
            GeoType::Triangle(_) => return Err(no_encoding("Triangle")),
            GeoType::Line(_) => return Err(no_encoding("Line")),
        };
        Ok(geometry)
    }

    /// Parse WKT (for example `POINT Z (1 2 3)`) through the `wkt` crate.
    #[cfg(feature = "wkt")]
    pub fn from_wkt(text: &str) -> Result<Self> {
        use std::str::FromStr;

        let wkt = wkt::Wkt::<f64>::from_str(text)
            .map_err(|err| GeometryError::InvalidArgument(format!("invalid WKT: {err}")))?;
        Self::from_geo_traits(&wkt)
    }
}

fn no_encoding(kind: &str) -> GeometryError {
    GeometryError::InvalidArgument(format!("{kind} has no extended WKB encoding"))
}

fn dimension_of(dim: Dimensions) -> Result<Dimension> {
    match dim {
        Dimensions::Xy | Dimensions::Unknown(2) => Ok(Dimension::Xy),
        Dimensions::Xyz | Dimensions::Unknown(3) => Ok(Dimension::Xyz),
        Dimensions::Xym => Ok(Dimension::Xym),
        Dimensions::Xyzm | Dimensions::Unknown(4) => Ok(Dimension::Xyzm),
        Dimensions::Unknown(size) => Err(GeometryError::InvalidArgument(format!(
            "cannot map {size} ordinates to a dimensionality"
        ))),
    }
}

fn coordinate_from<C: CoordTrait<T = f64>>(coord: &C, dimension: Dimension) -> Result<Coordinate> {
    let nth = |n: usize| {
        coord.nth(n).ok_or_else(|| {
            GeometryError::InvalidArgument(format!(
                "coordinate lacks ordinate {n} required by {dimension:?}"
            ))
        })
    };
    let (x, y) = coord.x_y();
    Ok(match dimension {
        Dimension::Xy => Coordinate::xy(x, y),
        Dimension::Xyz => Coordinate::xyz(x, y, nth(2)?),
        Dimension::Xym => Coordinate::xym(x, y, nth(2)?),
        Dimension::Xyzm => Coordinate::xyzm(x, y, nth(2)?, nth(3)?),
    })
}

fn point_from<P: PointTrait<T = f64>>(point: &P, dimension: Dimension) -> Result<Point> {
    match point.coord() {
        Some(coord) => Ok(Point::new(coordinate_from(&coord, dimension)?)),
        None => Ok(Point::empty(dimension)),
    }
}

fn coordinates_from<L: LineStringTrait<T = f64>>(
    line: &L,
    dimension: Dimension,
) -> Result<Vec<Coordinate>> {
    line.coords()
        .map(|coord| coordinate_from(&coord, dimension))
        .collect()
}

fn line_string_from<L: LineStringTrait<T = f64>>(
    line: &L,
    dimension: Dimension,
) -> Result<LineString> {
    LineString::new(dimension, coordinates_from(line, dimension)?)
}

fn polygon_from<P: PolygonTrait<T = f64>>(polygon: &P, dimension: Dimension) -> Result<Polygon> {
    let Some(exterior) = polygon.exterior() else {
        return Ok(Polygon::empty(dimension));
    };
    let exterior = LinearRing::new(dimension, coordinates_from(&exterior, dimension)?)?;
    let interiors = polygon
        .interiors()
        .map(|ring| LinearRing::new(dimension, coordinates_from(&ring, dimension)?))
        .collect::<Result<Vec<_>>>()?;
    Polygon::new(exterior, interiors)
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::str::FromStr;

    use crate::byte_io::WriteOptions;
    use crate::envelope::Envelope;
    use crate::error::{GeometryError, Result};
    use crate::geometry::{Geometry, WkbGeometry};
    use crate::types::{Dimension, Endianness, GeometryType};
    use wkt::Wkt;

    type TestResult = std::result::Result<(), Box<dyn Error>>;

    fn from_wkt(text: &str) -> Result<Geometry> {
        let wkt = Wkt::<f64>::from_str(text)
            .map_err(|err| GeometryError::InvalidArgument(err.to_string()))?;
        Geometry::from_geo_traits(&wkt)
    }

    #[test]
    fn from_geo_types() -> Result<()> {
        let polygon = geo_types::Polygon::new(
            geo_types::LineString::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 3.0), (0.0, 0.0)]),
            vec![],
        );
        let geometry = Geometry::from_geo_traits(&polygon)?;
        assert_eq!(geometry.geometry_type(), GeometryType::Polygon);
        assert_eq!(geometry.dimension(), Dimension::Xy);
        assert_eq!(geometry.create_envelope(), Envelope::xy(0.0, 0.0, 2.0, 3.0));

        let rect = geo_types::Rect::new((0.0, 0.0), (1.0, 1.0));
        assert!(matches!(
            Geometry::from_geo_traits(&rect),
            Err(GeometryError::InvalidArgument(_))
        ));
        Ok(())
    }

    #[test]
    fn from_wkt_keeps_dimensionality() -> Result<()> {
        let point = from_wkt("POINT Z (1 2 3)")?;
        assert_eq!(point.type_code(), 1001);
        assert_eq!(point.create_envelope(), Envelope::xyz(1.0, 2.0, 3.0, 1.0, 2.0, 3.0));

        let line = from_wkt("LINESTRING M (0 0 5, 1 1 7)")?;
        assert_eq!(line.type_code(), 2002);
        assert_eq!(line.create_envelope().max_m(), Some(7.0));

        let collection =
            from_wkt("GEOMETRYCOLLECTION ZM (POINT ZM (1 2 3 4), LINESTRING ZM (0 0 0 0, 1 1 1 1))")?;
        assert_eq!(collection.type_code(), 3007);
        Ok(())
    }

    #[test]
    fn empty_wkt_point_becomes_nan_point() -> Result<()> {
        let point = from_wkt("POINT EMPTY")?;
        assert!(point.is_empty());
        assert_eq!(point.type_code(), 1);
        let bytes = point.to_wkb(&WriteOptions::default())?;
        assert_eq!(bytes.len(), 21);
        assert!(Geometry::from_wkb(&bytes)?.is_empty());
        Ok(())
    }

    #[test]
    fn decodes_bytes_written_by_the_wkb_crate() -> TestResult {
        let multi = geo_types::MultiLineString(vec![
            geo_types::LineString::from(vec![(0.0, 0.0), (2.0, 1.0)]),
            geo_types::LineString::from(vec![(-3.0, 4.0), (-1.0, 2.0)]),
        ]);
        let mut buf = Vec::new();
        wkb::writer::write_geometry(&mut buf, &multi, &Default::default())?;

        let decoded = Geometry::from_wkb(&buf)?;
        assert_eq!(decoded, Geometry::from_geo_traits(&multi)?);
        assert_eq!(decoded.create_envelope(), Envelope::xy(-3.0, 0.0, 2.0, 4.0));
        Ok(())
    }

    #[test]
    fn wkb_crate_reads_our_bytes() -> TestResult {
        for text in [
            "POLYGON ((0 0, 4 0, 4 4, 0 0), (1 1, 2 1, 2 2, 1 1))",
            "MULTIPOINT Z ((1 2 3), (4 5 6))",
            "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1))",
        ] {
            let geometry = from_wkt(text)?;
            for endianness in [Endianness::BigEndian, Endianness::LittleEndian] {
                let options = WriteOptions {
                    endianness,
                    ..Default::default()
                };
                let bytes = geometry.to_wkb(&options)?;
                let parsed = wkb::reader::Wkb::try_new(&bytes)?;
                assert_eq!(Geometry::from_geo_traits(&parsed)?, geometry, "{text}");
            }
        }
        Ok(())
    }
}
