//! Byte-order aware sink and cursor used by every WKB reader and writer.

use byteorder::{BE, ByteOrder, LE};

use crate::error::{GeometryError, Result, WkbFormatError};
use crate::types::Endianness;

const DEFAULT_INITIAL_CAPACITY: usize = 32;

/// Deepest geometry nesting a cursor will decode. Each level of a
/// self-nested collection costs only nine bytes, so the limit bounds
/// recursion rather than input size.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Options for encoding geometries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Byte order of every header, count and ordinate written.
    pub endianness: Endianness,
    /// Bytes reserved up front by the sink.
    pub initial_capacity: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            endianness: Endianness::LittleEndian,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// Growable byte writer bound to a single byte order.
///
/// Writers take `&mut ByteSink`; the bytes are released with [`ByteSink::into_bytes`].
#[derive(Debug, Clone)]
pub struct ByteSink {
    buf: Vec<u8>,
    endianness: Endianness,
}

impl ByteSink {
    pub fn new(endianness: Endianness) -> Self {
        Self::with_capacity(endianness, DEFAULT_INITIAL_CAPACITY)
    }

    pub fn with_capacity(endianness: Endianness, capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            endianness,
        }
    }

    pub fn with_options(options: &WriteOptions) -> Self {
        Self::with_capacity(options.endianness, options.initial_capacity)
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u32(&mut self, value: u32) {
        let mut bytes = [0u8; 4];
        match self.endianness {
            Endianness::BigEndian => BE::write_u32(&mut bytes, value),
            Endianness::LittleEndian => LE::write_u32(&mut bytes, value),
        }
        self.buf.extend_from_slice(&bytes);
    }

    pub fn write_i32(&mut self, value: i32) {
        let mut bytes = [0u8; 4];
        match self.endianness {
            Endianness::BigEndian => BE::write_i32(&mut bytes, value),
            Endianness::LittleEndian => LE::write_i32(&mut bytes, value),
        }
        self.buf.extend_from_slice(&bytes);
    }

    /// Write an IEEE-754 double, NaN payload included.
    pub fn write_f64(&mut self, value: f64) {
        let mut bytes = [0u8; 8];
        match self.endianness {
            Endianness::BigEndian => BE::write_f64(&mut bytes, value),
            Endianness::LittleEndian => LE::write_f64(&mut bytes, value),
        }
        self.buf.extend_from_slice(&bytes);
    }

    /// Write a ring, vertex or element count as a non-negative int32.
    pub fn write_count(&mut self, count: usize) -> Result<()> {
        let count = i32::try_from(count).map_err(|_| {
            GeometryError::InvalidArgument(format!("count {count} does not fit in an int32"))
        })?;
        self.write_i32(count);
        Ok(())
    }

    /// Copy of the bytes accumulated so far.
    pub fn snapshot(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Consume the sink and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Saved cursor state, see [`ByteCursor::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorMark {
    position: usize,
    endianness: Endianness,
}

/// Positioned reader over a fixed byte buffer.
///
/// The byte order changes whenever a geometry header is read, because every
/// geometry (including collection members) announces its own.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    position: usize,
    endianness: Endianness,
    depth: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_endianness(buf, Endianness::default())
    }

    pub fn with_endianness(buf: &'a [u8], endianness: Endianness) -> Self {
        Self {
            buf,
            position: 0,
            endianness,
            depth: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.position)
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    /// Save the current position and byte order.
    pub fn mark(&self) -> CursorMark {
        CursorMark {
            position: self.position,
            endianness: self.endianness,
        }
    }

    /// Rewind to a previously saved mark. A mark past the end of this
    /// buffer leaves the cursor at the end.
    pub fn restore(&mut self, mark: CursorMark) {
        self.position = mark.position.min(self.buf.len());
        self.endianness = mark.endianness;
    }

    /// Number of geometries currently being decoded around the cursor.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter_geometry(&mut self) -> Result<()> {
        let depth = self.depth + 1;
        if depth > MAX_NESTING_DEPTH {
            return Err(GeometryError::malformed(WkbFormatError::NestingTooDeep {
                depth,
            }));
        }
        self.depth = depth;
        Ok(())
    }

    pub(crate) fn leave_geometry(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn take(&mut self, requested: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if remaining < requested {
            return Err(GeometryError::malformed(WkbFormatError::BufferUnderflow {
                position: self.position,
                requested,
                remaining,
            }));
        }
        let bytes = &self.buf[self.position..self.position + requested];
        self.position += requested;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(match self.endianness {
            Endianness::BigEndian => BE::read_u32(bytes),
            Endianness::LittleEndian => LE::read_u32(bytes),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.take(4)?;
        Ok(match self.endianness {
            Endianness::BigEndian => BE::read_i32(bytes),
            Endianness::LittleEndian => LE::read_i32(bytes),
        })
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.take(8)?;
        Ok(match self.endianness {
            Endianness::BigEndian => BE::read_f64(bytes),
            Endianness::LittleEndian => LE::read_f64(bytes),
        })
    }

    /// Read a count whose elements each occupy at least `min_element_size` bytes.
    ///
    /// A count that cannot fit in the rest of the buffer fails here, before
    /// anything is allocated for it.
    pub fn read_count(&mut self, min_element_size: usize) -> Result<usize> {
        let position = self.position;
        let count = self.read_i32()?;
        let count = usize::try_from(count)
            .map_err(|_| GeometryError::malformed(WkbFormatError::NegativeCount(count)))?;

        let requested = count.saturating_mul(min_element_size);
        let remaining = self.remaining();
        if requested > remaining {
            return Err(GeometryError::malformed(WkbFormatError::BufferUnderflow {
                position,
                requested,
                remaining,
            }));
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteCursor, ByteSink, MAX_NESTING_DEPTH, WriteOptions};
    use crate::error::{GeometryError, Result, WkbFormatError};
    use crate::types::Endianness;

    #[test]
    fn writes_in_the_sink_byte_order() {
        let mut big = ByteSink::new(Endianness::BigEndian);
        big.write_u32(1);
        big.write_f64(1.0);
        assert_eq!(
            big.into_bytes(),
            vec![0, 0, 0, 1, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0]
        );

        let mut little = ByteSink::with_options(&WriteOptions::default());
        little.write_u32(1);
        little.write_f64(1.0);
        assert_eq!(
            little.into_bytes(),
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xf0, 0x3f]
        );
    }

    #[test]
    fn snapshot_keeps_accumulating() {
        let mut sink = ByteSink::new(Endianness::LittleEndian);
        sink.write_u8(7);
        let first = sink.snapshot();
        sink.write_u8(8);
        assert_eq!(first, vec![7]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn mark_and_restore_rewinds_position_and_order() -> Result<()> {
        let bytes = [1u8, 2, 0, 0, 0];
        let mut cursor = ByteCursor::with_endianness(&bytes, Endianness::BigEndian);
        let mark = cursor.mark();

        assert_eq!(cursor.read_u8()?, 1);
        cursor.set_endianness(Endianness::LittleEndian);
        assert_eq!(cursor.read_u32()?, 2);
        assert_eq!(cursor.remaining(), 0);

        cursor.restore(mark);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.endianness(), Endianness::BigEndian);
        Ok(())
    }

    #[test]
    fn restore_clamps_marks_from_longer_buffers() {
        let long = [0u8; 16];
        let mut other = ByteCursor::new(&long);
        other.read_bytes(12).expect("twelve of sixteen bytes");
        let mark = other.mark();

        let short = [1u8, 2, 3, 4];
        let mut cursor = ByteCursor::new(&short);
        cursor.restore(mark);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.remaining(), 0);
        assert!(matches!(
            cursor.read_u8(),
            Err(GeometryError::MalformedWellKnownBinary(
                WkbFormatError::BufferUnderflow { remaining: 0, .. }
            ))
        ));
    }

    #[test]
    fn nesting_depth_is_bounded() -> Result<()> {
        let mut cursor = ByteCursor::new(&[]);
        for _ in 0..MAX_NESTING_DEPTH {
            cursor.enter_geometry()?;
        }
        assert_eq!(cursor.depth(), MAX_NESTING_DEPTH);
        assert!(matches!(
            cursor.enter_geometry(),
            Err(GeometryError::MalformedWellKnownBinary(
                WkbFormatError::NestingTooDeep { depth }
            )) if depth == MAX_NESTING_DEPTH + 1
        ));
        cursor.leave_geometry();
        assert_eq!(cursor.depth(), MAX_NESTING_DEPTH - 1);
        Ok(())
    }

    #[test]
    fn reports_underflow() {
        let bytes = [0u8; 7];
        let mut cursor = ByteCursor::new(&bytes);
        let err = cursor.read_f64().expect_err("seven bytes cannot hold a double");
        assert!(matches!(
            err,
            GeometryError::MalformedWellKnownBinary(WkbFormatError::BufferUnderflow {
                position: 0,
                requested: 8,
                remaining: 7
            })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn rejects_negative_and_oversized_counts() {
        let mut sink = ByteSink::new(Endianness::LittleEndian);
        sink.write_i32(-1);
        let bytes = sink.into_bytes();
        let err = ByteCursor::new(&bytes)
            .read_count(16)
            .expect_err("negative count");
        assert!(matches!(
            err,
            GeometryError::MalformedWellKnownBinary(WkbFormatError::NegativeCount(-1))
        ));

        let mut sink = ByteSink::new(Endianness::LittleEndian);
        sink.write_i32(1_000_000);
        sink.write_f64(0.0);
        let bytes = sink.into_bytes();
        let err = ByteCursor::new(&bytes)
            .read_count(16)
            .expect_err("count exceeds buffer");
        assert!(matches!(
            err,
            GeometryError::MalformedWellKnownBinary(WkbFormatError::BufferUnderflow { .. })
        ));
    }
}
