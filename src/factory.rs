//! Type-code dispatch for decoding.
//!
//! A [`GeometryFactory`] maps extended WKB type codes to decoders. Collections
//! hand each member to the factory they were decoded with, so a caller can
//! restrict which kinds and dimensionalities are accepted.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::byte_io::ByteCursor;
use crate::conversions::{dimension_from_type_code, type_code};
use crate::error::{GeometryError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, WkbHeader,
};
use crate::types::{Dimension, GeometryType};

/// Decoder for one type code. The cursor is positioned at the geometry's
/// byte order marker.
pub type GeometryReader =
    Arc<dyn Fn(&mut ByteCursor<'_>, &GeometryFactory) -> Result<Geometry> + Send + Sync>;

static DEFAULT_FACTORY: LazyLock<GeometryFactory> = LazyLock::new(GeometryFactory::default);

/// Factory covering all 28 type codes, shared by the whole process.
pub fn default_factory() -> &'static GeometryFactory {
    &DEFAULT_FACTORY
}

/// Decode one geometry with the default factory.
pub fn read_wkb(bytes: &[u8]) -> Result<Geometry> {
    default_factory().read_wkb(bytes)
}

#[derive(Clone)]
pub struct GeometryFactory {
    readers: HashMap<u32, GeometryReader>,
}

impl GeometryFactory {
    /// A factory that knows no type codes.
    pub fn new() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }

    /// A factory for the seven kinds of a single dimensionality.
    pub fn for_dimension(dimension: Dimension) -> Self {
        let mut factory = Self::new();
        factory.register_builtin(dimension);
        factory
    }

    fn register_builtin(&mut self, dimension: Dimension) {
        for geometry_type in GeometryType::ALL {
            let reader: GeometryReader = match geometry_type {
                GeometryType::Point => Arc::new(read_point),
                GeometryType::LineString => Arc::new(read_line_string),
                GeometryType::Polygon => Arc::new(read_polygon),
                GeometryType::MultiPoint => Arc::new(read_multi_point),
                GeometryType::MultiLineString => Arc::new(read_multi_line_string),
                GeometryType::MultiPolygon => Arc::new(read_multi_polygon),
                GeometryType::GeometryCollection => Arc::new(read_geometry_collection),
            };
            self.readers.insert(type_code(geometry_type, dimension), reader);
        }
    }

    /// Register (or replace) the decoder for `type_code`. Returns the previous one.
    pub fn register<F>(&mut self, type_code: u32, reader: F) -> Option<GeometryReader>
    where
        F: Fn(&mut ByteCursor<'_>, &GeometryFactory) -> Result<Geometry> + Send + Sync + 'static,
    {
        self.readers.insert(type_code, Arc::new(reader))
    }

    pub fn unregister(&mut self, type_code: u32) -> Option<GeometryReader> {
        self.readers.remove(&type_code)
    }

    pub fn contains(&self, type_code: u32) -> bool {
        self.readers.contains_key(&type_code)
    }

    /// Registered type codes in ascending order.
    pub fn type_codes(&self) -> Vec<u32> {
        let mut codes: Vec<u32> = self.readers.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Decode the geometry at the cursor, dispatching on its type code.
    ///
    /// A code with no registered decoder is `Unsupported`, unless its
    /// dimensionality offset is not one of 0/1000/2000/3000, which makes it
    /// malformed. Geometries nested deeper than
    /// [`MAX_NESTING_DEPTH`](crate::MAX_NESTING_DEPTH) fail with `NestingTooDeep`.
    pub fn read_geometry(&self, cursor: &mut ByteCursor<'_>) -> Result<Geometry> {
        let header = WkbHeader::peek(cursor)?;
        match self.readers.get(&header.type_code) {
            Some(reader) => {
                log::trace!(
                    "decoding type code {} at offset {}",
                    header.type_code,
                    cursor.position()
                );
                cursor.enter_geometry()?;
                let geometry = reader(cursor, self);
                cursor.leave_geometry();
                geometry
            }
            None => {
                dimension_from_type_code(header.type_code)?;
                log::debug!("no decoder registered for type code {}", header.type_code);
                Err(GeometryError::Unsupported {
                    type_code: header.type_code,
                })
            }
        }
    }

    pub fn read_wkb(&self, bytes: &[u8]) -> Result<Geometry> {
        self.read_geometry(&mut ByteCursor::new(bytes))
    }
}

macro_rules! builtin_reader {
    ($name:ident, $kind:ident) => {
        fn $name(cursor: &mut ByteCursor<'_>, _: &GeometryFactory) -> Result<Geometry> {
            $kind::read_wkb(cursor).map(Geometry::from)
        }
    };
}

builtin_reader!(read_point, Point);
builtin_reader!(read_line_string, LineString);
builtin_reader!(read_polygon, Polygon);
builtin_reader!(read_multi_point, MultiPoint);
builtin_reader!(read_multi_line_string, MultiLineString);
builtin_reader!(read_multi_polygon, MultiPolygon);

fn read_geometry_collection(
    cursor: &mut ByteCursor<'_>,
    factory: &GeometryFactory,
) -> Result<Geometry> {
    GeometryCollection::read_wkb(cursor, factory).map(Geometry::from)
}

impl Default for GeometryFactory {
    /// All seven kinds in all four dimensionalities.
    fn default() -> Self {
        let mut factory = Self::new();
        for dimension in Dimension::ALL {
            factory.register_builtin(dimension);
        }
        factory
    }
}

impl fmt::Debug for GeometryFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryFactory")
            .field("type_codes", &self.type_codes())
            .finish()
    }
}
