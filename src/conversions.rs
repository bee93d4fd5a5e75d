use crate::error::{GeometryError, Result, WkbFormatError};
use crate::types::{Dimension, GeometryType};

/// Extended WKB type code: OGC base code plus the dimensionality offset.
#[inline]
pub fn type_code(geometry_type: GeometryType, dimension: Dimension) -> u32 {
    geometry_type.code() + dimension.type_code_offset()
}

/// Dimensionality encoded in a type code, for any geometry kind including ones
/// this crate does not decode itself.
#[inline]
pub fn dimension_from_type_code(type_code: u32) -> Result<Dimension> {
    match type_code / 1000 {
        0 => Ok(Dimension::Xy),
        1 => Ok(Dimension::Xyz),
        2 => Ok(Dimension::Xym),
        3 => Ok(Dimension::Xyzm),
        _ => Err(GeometryError::malformed(
            WkbFormatError::UnrecognizedTypeCode(type_code),
        )),
    }
}

/// Split a type code into kind and dimensionality.
#[inline]
pub fn split_type_code(type_code: u32) -> Result<(GeometryType, Dimension)> {
    let dimension = dimension_from_type_code(type_code)?;
    let geometry_type = GeometryType::from_code(type_code % 1000).ok_or_else(|| {
        GeometryError::malformed(WkbFormatError::UnrecognizedTypeCode(type_code))
    })?;
    Ok((geometry_type, dimension))
}

/// Upper-case name used in `gpkg_geometry_columns.geometry_type_name`.
#[inline]
pub fn geometry_type_to_str(geometry_type: GeometryType) -> &'static str {
    match geometry_type {
        GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        GeometryType::Point => "POINT",
        GeometryType::LineString => "LINESTRING",
        GeometryType::Polygon => "POLYGON",
        GeometryType::MultiPoint => "MULTIPOINT",
        GeometryType::MultiLineString => "MULTILINESTRING",
        GeometryType::MultiPolygon => "MULTIPOLYGON",
    }
}

/// Look up a geometry kind by name, ignoring case.
#[inline]
pub fn geometry_type_from_str(geometry_type_str: &str) -> Result<GeometryType> {
    GeometryType::ALL
        .into_iter()
        .find(|geometry_type| geometry_type.name().eq_ignore_ascii_case(geometry_type_str))
        .ok_or_else(|| {
            GeometryError::InvalidArgument(format!(
                "unknown geometry type name: {geometry_type_str}"
            ))
        })
}

impl GeometryType {
    pub fn from_name(name: &str) -> Result<Self> {
        geometry_type_from_str(name)
    }

    pub fn sql_name(self) -> &'static str {
        geometry_type_to_str(self)
    }
}

#[inline]
pub fn dimension_to_zm(dimension: Dimension) -> (i8, i8) {
    match dimension {
        Dimension::Xy => (0, 0),
        Dimension::Xyz => (1, 0),
        Dimension::Xym => (0, 1),
        Dimension::Xyzm => (1, 1),
    }
}

#[inline]
pub fn dimension_from_zm(z: i8, m: i8) -> Result<Dimension> {
    match (z, m) {
        (0, 0) => Ok(Dimension::Xy),
        (1, 0) => Ok(Dimension::Xyz),
        (0, 1) => Ok(Dimension::Xym),
        (1, 1) => Ok(Dimension::Xyzm),
        // 2 means "optional" in gpkg_geometry_columns, which has no single dimensionality.
        _ => Err(GeometryError::InvalidArgument(format!(
            "invalid or mixed geometry dimension (z={z}, m={m})"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_code_is_base_plus_offset_for_every_combination() {
        for geometry_type in GeometryType::ALL {
            for dimension in Dimension::ALL {
                let code = type_code(geometry_type, dimension);
                assert_eq!(code, geometry_type.code() + dimension.type_code_offset());
                assert_eq!(split_type_code(code).ok(), Some((geometry_type, dimension)));
            }
        }
        assert_eq!(type_code(GeometryType::MultiPolygon, Dimension::Xym), 2006);
    }

    #[test]
    fn rejects_unknown_type_codes() {
        for code in [0, 8, 1000, 3008, 4001] {
            let err = split_type_code(code).expect_err("unknown code");
            assert!(matches!(
                err,
                GeometryError::MalformedWellKnownBinary(WkbFormatError::UnrecognizedTypeCode(c)) if c == code
            ));
        }
        // Curves are not decoded here, but their dimensionality is still readable.
        assert_eq!(dimension_from_type_code(1009).ok(), Some(Dimension::Xyz));
    }

    #[test]
    fn looks_up_names_case_insensitively() -> Result<()> {
        assert_eq!(GeometryType::from_name("multipolygon")?, GeometryType::MultiPolygon);
        assert_eq!(GeometryType::from_name("LINESTRING")?, GeometryType::LineString);
        assert_eq!(GeometryType::GeometryCollection.sql_name(), "GEOMETRYCOLLECTION");
        assert!(GeometryType::from_name("CircularString").is_err());
        Ok(())
    }

    #[test]
    fn zm_flags_roundtrip() -> Result<()> {
        for dimension in Dimension::ALL {
            let (z, m) = dimension_to_zm(dimension);
            assert_eq!(dimension_from_zm(z, m)?, dimension);
        }
        assert!(dimension_from_zm(2, 0).is_err());
        Ok(())
    }
}
