use super::{WkbGeometry, WkbHeader};
use crate::byte_io::{ByteCursor, ByteSink};
use crate::envelope::Envelope;
use crate::error::{GeometryError, Result};
use crate::linear_ring::LinearRing;
use crate::types::{Dimension, GeometryType};

/// Bytes taken by the smallest ring on the wire: an empty vertex count.
const MIN_RING_SIZE: usize = 4;

/// An exterior ring followed by zero or more interior rings.
///
/// The polygon is empty when it holds no rings or its exterior ring has no
/// vertices. Every ring held is written, so an empty exterior followed by
/// interiors survives a round trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polygon {
    dimension: Dimension,
    rings: Vec<LinearRing>,
}

impl Polygon {
    pub fn new<I>(exterior: LinearRing, interiors: I) -> Result<Self>
    where
        I: IntoIterator<Item = LinearRing>,
    {
        let dimension = exterior.dimension();
        let rings: Vec<LinearRing> = std::iter::once(exterior).chain(interiors).collect();
        if let Some((idx, ring)) = rings
            .iter()
            .enumerate()
            .find(|(_, ring)| ring.dimension() != dimension)
        {
            return Err(GeometryError::InvalidArgument(format!(
                "ring {idx} has dimension {:?}, expected {dimension:?}",
                ring.dimension()
            )));
        }
        Ok(Self { dimension, rings })
    }

    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            rings: Vec::new(),
        }
    }

    pub fn exterior(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    pub fn interiors(&self) -> &[LinearRing] {
        self.rings.get(1..).unwrap_or_default()
    }

    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }

    pub fn read_wkb(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let dimension = WkbHeader::read_expecting(cursor, GeometryType::Polygon)?;
        let count = cursor.read_count(MIN_RING_SIZE)?;
        let rings = (0..count)
            .map(|_| LinearRing::read_wkb(cursor, dimension))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { dimension, rings })
    }
}

impl WkbGeometry for Polygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn is_empty(&self) -> bool {
        self.exterior().is_none_or(LinearRing::is_empty)
    }

    fn create_envelope(&self) -> Envelope {
        self.rings
            .iter()
            .fold(Envelope::empty(self.dimension), |envelope, ring| {
                envelope.combine(&ring.create_envelope())
            })
    }

    fn write_wkb_body(&self, sink: &mut ByteSink) -> Result<()> {
        sink.write_count(self.rings.len())?;
        self.rings.iter().try_for_each(|ring| ring.write_wkb(sink))
    }
}
