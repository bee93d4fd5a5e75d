use crate::envelope::Envelope;
use crate::error::Result;
use crate::geometry::{Geometry, WkbGeometry};
use crate::gpkg::GpkgGeometry;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, Error};

/// Register all spatial SQL helper functions in the provided connection.
///
/// Each takes a GeoPackage geometry BLOB and returns NULL for a NULL argument.
///
/// Example:
/// ```no_run
/// use rusqlite::Connection;
/// use gpkg_wkb::register_spatial_functions;
///
/// let conn = Connection::open_in_memory()?;
/// register_spatial_functions(&conn)?;
/// # Ok::<(), gpkg_wkb::GeometryError>(())
/// ```
pub fn register_spatial_functions(conn: &Connection) -> Result<()> {
    register_envelope_component(conn, "ST_MinX", Envelope::min_x)?;
    register_envelope_component(conn, "ST_MinY", Envelope::min_y)?;
    register_envelope_component(conn, "ST_MaxX", Envelope::max_x)?;
    register_envelope_component(conn, "ST_MaxY", Envelope::max_y)?;
    register_st_isempty(conn)?;
    register_st_geometrytype(conn)?;
    Ok(())
}

fn register_st_isempty(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "ST_IsEmpty",
        1,
        FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let geometry = geometry_from_ctx(ctx)?;
            Ok(geometry.map(|geometry| i64::from(geometry.is_empty())))
        },
    )?;
    Ok(())
}

fn register_st_geometrytype(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "ST_GeometryType",
        1,
        FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let geometry = geometry_from_ctx(ctx)?;
            Ok(geometry.map(|geometry| geometry.geometry_type().sql_name()))
        },
    )?;
    Ok(())
}

/// NULL when the geometry has no envelope.
fn register_envelope_component<F>(conn: &Connection, name: &str, f: F) -> Result<()>
where
    F: Fn(&Envelope) -> f64 + Copy + Send + Sync + 'static,
{
    conn.create_scalar_function(name, 1, FunctionFlags::SQLITE_DETERMINISTIC, move |ctx| {
        let Some(geometry) = geometry_from_ctx(ctx)? else {
            return Ok(None);
        };
        let envelope = geometry.create_envelope();
        Ok((!envelope.is_empty()).then(|| f(&envelope)))
    })?;
    Ok(())
}

fn geometry_from_ctx(ctx: &Context<'_>) -> std::result::Result<Option<Geometry>, Error> {
    match ctx.get_raw(0) {
        ValueRef::Null => Ok(None),
        ValueRef::Blob(blob) => {
            let stored =
                GpkgGeometry::from_blob(blob).map_err(|err| Error::UserFunctionError(Box::new(err)))?;
            Ok(Some(stored.geometry))
        }
        _ => Err(Error::InvalidFunctionParameterType(0, Type::Blob)),
    }
}

#[cfg(test)]
mod tests {
    use super::register_spatial_functions;
    use crate::byte_io::WriteOptions;
    use crate::coordinate::Coordinate;
    use crate::geometry::{
        Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, Point,
    };
    use crate::gpkg::{GpkgGeometry, wkb_to_gpkg_geometry};
    use crate::types::{Dimension, Endianness};
    use rusqlite::{Connection, params};

    fn connection() -> crate::Result<Connection> {
        let conn = Connection::open_in_memory()?;
        register_spatial_functions(&conn)?;
        Ok(conn)
    }

    fn bounds(conn: &Connection, stored: &GpkgGeometry) -> crate::Result<(f64, f64, f64, f64)> {
        Ok(conn.query_row(
            "SELECT ST_MinX(?1), ST_MaxX(?1), ST_MinY(?1), ST_MaxY(?1)",
            params![stored],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?)
    }

    #[test]
    fn st_bounds_for_point() -> crate::Result<()> {
        let conn = connection()?;
        let stored = GpkgGeometry::new(4326, Point::xy(1.5, -2.0));

        let (empty, kind): (i64, String) = conn.query_row(
            "SELECT ST_IsEmpty(?1), ST_GeometryType(?1)",
            params![stored],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        assert_eq!(bounds(&conn, &stored)?, (1.5, 1.5, -2.0, -2.0));
        assert_eq!(empty, 0);
        assert_eq!(kind, "POINT");
        Ok(())
    }

    #[test]
    fn st_is_empty_for_empty_linestring() -> crate::Result<()> {
        let conn = connection()?;
        let stored = GpkgGeometry::new(4326, LineString::empty(Dimension::Xy));

        let (minx, empty): (Option<f64>, i64) =
            conn.query_row("SELECT ST_MinX(?1), ST_IsEmpty(?1)", params![stored], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?;
        assert!(minx.is_none());
        assert_eq!(empty, 1);
        Ok(())
    }

    #[test]
    fn st_bounds_for_multi_geometries() -> crate::Result<()> {
        let conn = connection()?;

        let multi_point = MultiPoint::new(
            Dimension::Xy,
            [Point::xy(1.0, 5.0), Point::xy(-2.0, 3.0)],
        )?;
        assert_eq!(
            bounds(&conn, &GpkgGeometry::new(4326, multi_point))?,
            (-2.0, 1.0, 3.0, 5.0)
        );

        let multi_line = MultiLineString::new(
            Dimension::Xyz,
            [
                LineString::new(
                    Dimension::Xyz,
                    [Coordinate::xyz(0.0, 0.0, 9.0), Coordinate::xyz(2.0, 1.0, 9.0)],
                )?,
                LineString::new(
                    Dimension::Xyz,
                    [Coordinate::xyz(-3.0, 4.0, 9.0), Coordinate::xyz(-1.0, 2.0, 9.0)],
                )?,
            ],
        )?;
        assert_eq!(
            bounds(&conn, &GpkgGeometry::new(4326, multi_line))?,
            (-3.0, 2.0, 0.0, 4.0)
        );
        Ok(())
    }

    #[test]
    fn st_bounds_for_geometry_collection() -> crate::Result<()> {
        let conn = connection()?;
        let collection = GeometryCollection::new(
            Dimension::Xy,
            [
                Geometry::from(Point::xy(5.0, -1.0)),
                Geometry::from(LineString::new(
                    Dimension::Xy,
                    [Coordinate::xy(-2.0, 2.0), Coordinate::xy(1.0, 3.0)],
                )?),
            ],
        )?;
        let stored = GpkgGeometry::new(4326, collection);
        assert_eq!(bounds(&conn, &stored)?, (-2.0, 5.0, -1.0, 3.0));

        let kind: String =
            conn.query_row("SELECT ST_GeometryType(?1)", params![stored], |row| row.get(0))?;
        assert_eq!(kind, "GEOMETRYCOLLECTION");
        Ok(())
    }

    #[test]
    fn accepts_big_endian_blobs_and_null() -> crate::Result<()> {
        let conn = connection()?;
        let options = WriteOptions {
            endianness: Endianness::BigEndian,
            ..Default::default()
        };
        let blob = wkb_to_gpkg_geometry(&Point::xy(7.0, 8.0), 0, &options)?;
        let maxy: f64 = conn.query_row("SELECT ST_MaxY(?1)", params![blob], |row| row.get(0))?;
        assert_eq!(maxy, 8.0);

        let (minx, empty): (Option<f64>, Option<i64>) =
            conn.query_row("SELECT ST_MinX(NULL), ST_IsEmpty(NULL)", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?;
        assert!(minx.is_none());
        assert!(empty.is_none());
        Ok(())
    }

    #[test]
    fn rejects_non_blob_and_corrupt_arguments() -> crate::Result<()> {
        let conn = connection()?;
        assert!(
            conn.query_row("SELECT ST_MinX('POINT (1 2)')", [], |row| {
                row.get::<_, Option<f64>>(0)
            })
            .is_err()
        );
        assert!(
            conn.query_row("SELECT ST_IsEmpty(X'4750')", [], |row| {
                row.get::<_, Option<i64>>(0)
            })
            .is_err()
        );
        Ok(())
    }
}
