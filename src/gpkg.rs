//! GeoPackage geometry BLOBs: a `GP` binary header followed by extended WKB.
//!
//! cf. https://www.geopackage.org/spec140/index.html#gpb_format

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};

use crate::byte_io::{ByteCursor, ByteSink, WriteOptions};
use crate::envelope::Envelope;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometry, WkbGeometry};
use crate::types::{Contents, Dimension, Endianness, EnvelopeContentsIndicator};

const GPKG_MAGIC: [u8; 2] = *b"GP";
/// Version byte 0 means GeoPackage binary version 1.
const DEFAULT_VERSION: u8 = 0;
/// Magic, version, flags and the int32 srs id.
const FIXED_HEADER_SIZE: usize = 8;

const FLAG_LITTLE_ENDIAN: u8 = 0b0000_0001;
const FLAG_ENVELOPE_MASK: u8 = 0b0000_1110;
const FLAG_EMPTY: u8 = 0b0001_0000;
const FLAG_EXTENDED: u8 = 0b0010_0000;

/// Bit 5 of the flags: standard geometry types or an extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GpkgBinaryType {
    #[default]
    Standard,
    Extended,
}

/// Header of a GeoPackage geometry BLOB.
///
/// Its byte order applies to the srs id and envelope only; the WKB that
/// follows announces its own.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GpkgBinaryHeader {
    pub version: u8,
    pub binary_type: GpkgBinaryType,
    pub contents: Contents,
    pub endianness: Endianness,
    pub srs_id: i32,
    /// Empty when the header carries no envelope.
    pub envelope: Envelope,
}

impl GpkgBinaryHeader {
    /// Header describing `geometry`: its envelope (none when empty) and emptiness.
    pub fn for_geometry<G: WkbGeometry>(geometry: &G, srs_id: i32, endianness: Endianness) -> Self {
        Self {
            version: DEFAULT_VERSION,
            binary_type: GpkgBinaryType::Standard,
            contents: geometry.contents(),
            endianness,
            srs_id,
            envelope: geometry.create_envelope(),
        }
    }

    pub fn envelope_contents_indicator(&self) -> EnvelopeContentsIndicator {
        self.envelope.contents_indicator()
    }

    pub fn flags(&self) -> u8 {
        let mut flags = self.envelope_contents_indicator().code() << 1;
        if self.endianness == Endianness::LittleEndian {
            flags |= FLAG_LITTLE_ENDIAN;
        }
        if self.contents == Contents::Empty {
            flags |= FLAG_EMPTY;
        }
        if self.binary_type == GpkgBinaryType::Extended {
            flags |= FLAG_EXTENDED;
        }
        flags
    }

    /// Header length in bytes, i.e. the offset of the WKB payload.
    pub fn byte_size(&self) -> usize {
        FIXED_HEADER_SIZE + 8 * self.envelope_contents_indicator().array_size()
    }

    pub fn read(blob: &[u8]) -> Result<Self> {
        if blob.len() < FIXED_HEADER_SIZE {
            return Err(GeometryError::InvalidGpkgGeometryLength {
                len: blob.len(),
                minimum: FIXED_HEADER_SIZE,
            });
        }
        if blob[..2] != GPKG_MAGIC {
            return Err(GeometryError::InvalidGpkgGeometryMagic([blob[0], blob[1]]));
        }

        let version = blob[2];
        let flags = blob[3];
        let indicator = EnvelopeContentsIndicator::from_code((flags & FLAG_ENVELOPE_MASK) >> 1)
            .ok_or(GeometryError::InvalidGpkgGeometryFlags(flags))?;
        let endianness = if flags & FLAG_LITTLE_ENDIAN == 0 {
            Endianness::BigEndian
        } else {
            Endianness::LittleEndian
        };

        let required = FIXED_HEADER_SIZE + 8 * indicator.array_size();
        if blob.len() < required {
            return Err(GeometryError::InvalidGpkgGeometryEnvelope {
                len: blob.len(),
                required,
            });
        }

        let mut cursor = ByteCursor::with_endianness(&blob[4..required], endianness);
        let srs_id = cursor.read_i32()?;
        let bounds = (0..indicator.array_size())
            .map(|_| cursor.read_f64())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version,
            binary_type: if flags & FLAG_EXTENDED == 0 {
                GpkgBinaryType::Standard
            } else {
                GpkgBinaryType::Extended
            },
            contents: if flags & FLAG_EMPTY == 0 {
                Contents::NotEmpty
            } else {
                Contents::Empty
            },
            endianness,
            srs_id,
            envelope: envelope_from_array(indicator, &bounds),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut sink = ByteSink::with_capacity(self.endianness, self.byte_size());
        sink.write_bytes(&GPKG_MAGIC);
        sink.write_u8(self.version);
        sink.write_u8(self.flags());
        sink.write_i32(self.srs_id);
        for bound in self.envelope.to_array() {
            sink.write_f64(bound);
        }
        sink.into_bytes()
    }
}

// Stored as [minx, maxx, miny, maxy, (minz, maxz), (minm, maxm)].
fn envelope_from_array(indicator: EnvelopeContentsIndicator, b: &[f64]) -> Envelope {
    match indicator {
        EnvelopeContentsIndicator::NoEnvelope => Envelope::empty(Dimension::Xy),
        EnvelopeContentsIndicator::Xy => Envelope::xy(b[0], b[2], b[1], b[3]),
        EnvelopeContentsIndicator::Xyz => Envelope::xyz(b[0], b[2], b[4], b[1], b[3], b[5]),
        EnvelopeContentsIndicator::Xym => Envelope::xym(b[0], b[2], b[4], b[1], b[3], b[5]),
        EnvelopeContentsIndicator::Xyzm => {
            Envelope::xyzm(b[0], b[2], b[4], b[6], b[1], b[3], b[5], b[7])
        }
    }
}

/// Strip the GeoPackage header and envelope to access the raw WKB.
pub fn gpkg_geometry_to_wkb(blob: &[u8]) -> Result<&[u8]> {
    let header = GpkgBinaryHeader::read(blob)?;
    Ok(&blob[header.byte_size()..])
}

/// Encode `geometry` as a GeoPackage BLOB. Header and WKB share `options.endianness`.
pub fn wkb_to_gpkg_geometry<G: WkbGeometry>(
    geometry: &G,
    srs_id: i32,
    options: &WriteOptions,
) -> Result<Vec<u8>> {
    let mut blob = GpkgBinaryHeader::for_geometry(geometry, srs_id, options.endianness).to_bytes();
    blob.extend(geometry.to_wkb(options)?);
    Ok(blob)
}

/// A geometry together with its spatial reference system id, bound to and
/// read from SQLite as a GeoPackage BLOB.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GpkgGeometry {
    pub srs_id: i32,
    pub geometry: Geometry,
}

impl GpkgGeometry {
    pub fn new(srs_id: i32, geometry: impl Into<Geometry>) -> Self {
        Self {
            srs_id,
            geometry: geometry.into(),
        }
    }

    pub fn from_blob(blob: &[u8]) -> Result<Self> {
        let header = GpkgBinaryHeader::read(blob)?;
        Ok(Self {
            srs_id: header.srs_id,
            geometry: Geometry::from_wkb(&blob[header.byte_size()..])?,
        })
    }

    pub fn to_blob(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        wkb_to_gpkg_geometry(&self.geometry, self.srs_id, options)
    }
}

impl ToSql for GpkgGeometry {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let blob = self
            .to_blob(&WriteOptions::default())
            .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
        Ok(ToSqlOutput::Owned(Value::Blob(blob)))
    }
}

impl FromSql for GpkgGeometry {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let blob = value.as_blob()?;
        Self::from_blob(blob).map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}
