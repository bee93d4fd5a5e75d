//! Extended WKB geometry codec for GeoPackage feature data.
//!
//! ## Overview
//!
//! - `Point`, `LineString`, `Polygon`, `MultiPoint`, `MultiLineString`,
//!   `MultiPolygon` and `GeometryCollection` are the seven geometry kinds. Each
//!   is parameterized by a `Dimension` (`Xy`, `Xyz`, `Xym`, `Xyzm`).
//! - `Geometry` is the enum of all seven; collections hold `Geometry` members.
//! - `WkbGeometry` is the shared contract: type code, emptiness, envelope and
//!   encoding.
//! - `Envelope` is the bounding box, `combine`d with NaN-aware min/max.
//! - `GeometryFactory` maps type codes to decoders.
//!
//! The wire format is ISO "extended" WKB: the dimensionality is encoded by
//! adding 0/1000/2000/3000 to the OGC type code, and every geometry (including
//! each collection member) starts with its own byte order marker.
//!
//! ## Encoding and decoding
//!
//! ```
//! use gpkg_wkb::{Geometry, Point, WkbGeometry, WriteOptions};
//!
//! let point = Point::xyz(1.0, 2.0, 3.0);
//! let bytes = point.to_wkb(&WriteOptions::default())?;
//! assert_eq!(&bytes[..5], &[1, 0xe9, 0x03, 0, 0]); // little endian, type code 1001
//!
//! let decoded = Geometry::from_wkb(&bytes)?;
//! assert_eq!(decoded, Geometry::Point(point));
//! # Ok::<(), gpkg_wkb::GeometryError>(())
//! ```
//!
//! Collections decode their members through the factory they were read
//! with. Restrict the accepted codes by building your own:
//!
//! ```
//! use gpkg_wkb::{
//!     Dimension, Geometry, GeometryCollection, GeometryError, GeometryFactory, Point,
//!     WkbGeometry, WriteOptions,
//! };
//!
//! let collection = GeometryCollection::new(Dimension::Xy, [Geometry::from(Point::xy(0.0, 1.0))])?;
//! let bytes = collection.to_wkb(&WriteOptions::default())?;
//!
//! let mut factory = GeometryFactory::for_dimension(Dimension::Xy);
//! factory.unregister(1);
//! assert!(matches!(
//!     factory.read_wkb(&bytes),
//!     Err(GeometryError::Unsupported { type_code: 1 })
//! ));
//! # Ok::<(), gpkg_wkb::GeometryError>(())
//! ```
//!
//! Any `geo_traits::GeometryTrait<T = f64>` (for example `geo_types::Point` or
//! `wkt::Wkt`) converts with `Geometry::from_geo_traits`.
//!
//! ## GeoPackage BLOBs
//!
//! `GpkgGeometry` binds to and reads from SQLite as a GeoPackage geometry BLOB
//! (`GP` header, envelope, then extended WKB). `register_spatial_functions`
//! adds `ST_MinX`, `ST_MaxX`, `ST_MinY`, `ST_MaxY`, `ST_IsEmpty` and
//! `ST_GeometryType`.
//!
//! ```no_run
//! use gpkg_wkb::{GpkgGeometry, Point, register_spatial_functions};
//! use rusqlite::{Connection, params};
//!
//! let conn = Connection::open("data.gpkg")?;
//! register_spatial_functions(&conn)?;
//! conn.execute(
//!     "INSERT INTO points (geom) VALUES (?1)",
//!     params![GpkgGeometry::new(4326, Point::xy(1.0, 2.0))],
//! )?;
//! let minx: f64 = conn.query_row("SELECT ST_MinX(geom) FROM points", [], |row| row.get(0))?;
//! # Ok::<(), gpkg_wkb::GeometryError>(())
//! ```
mod byte_io;
mod conversions;
mod coordinate;
mod envelope;
mod error;
mod factory;
mod geometry;
mod gpkg;
mod linear_ring;
mod sql_functions;
mod types;

pub use byte_io::{ByteCursor, ByteSink, CursorMark, MAX_NESTING_DEPTH, WriteOptions};
pub use conversions::{
    dimension_from_type_code, dimension_from_zm, dimension_to_zm, geometry_type_from_str,
    geometry_type_to_str, split_type_code, type_code,
};
pub use coordinate::Coordinate;
pub use envelope::Envelope;
pub use error::{GeometryError, Result, WkbFormatError};
pub use factory::{GeometryFactory, GeometryReader, default_factory, read_wkb};
pub use geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, WkbGeometry, WkbHeader,
};
pub use gpkg::{
    GpkgBinaryHeader, GpkgBinaryType, GpkgGeometry, gpkg_geometry_to_wkb, wkb_to_gpkg_geometry,
};
pub use linear_ring::LinearRing;
pub use sql_functions::register_spatial_functions;
pub use types::{Contents, Dimension, Endianness, EnvelopeContentsIndicator, GeometryType};
