use super::error::CursorError;
use crate::sink::ByteRange;

/// Bounds-checked, forward-only view over `buf[offset..offset + remaining]`.
///
/// Every successful read advances the view. No read ever touches bytes
/// outside the window the cursor was created with; nested records get their
/// own cursor through [`ByteCursor::sub_cursor`].
///
/// # Examples
/// ```
/// use isis_clv_core::ByteCursor;
///
/// let buf = [0x01, 0x80, 0x00];
/// let mut cursor = ByteCursor::whole(&buf);
/// assert_eq!(cursor.read_u8()?, 0x01);
/// assert_eq!(cursor.peek_u16_be()?, 0x8000);
/// assert_eq!(cursor.remaining(), 2);
/// # Ok::<(), isis_clv_core::CursorError>(())
/// ```
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
    remaining: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8], offset: usize, length: usize) -> Result<Self, CursorError> {
        let end = offset.checked_add(length);
        if end.is_none_or(|end| end > buf.len()) {
            return Err(CursorError::InvalidRegion {
                offset,
                length,
                available: buf.len(),
            });
        }
        Ok(Self {
            buf,
            offset,
            remaining: length,
        })
    }

    pub fn whole(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            remaining: buf.len(),
        }
    }

    /// Absolute position of the next unread byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Byte range covering everything not yet consumed.
    pub fn remaining_range(&self) -> ByteRange {
        ByteRange::new(self.offset, self.remaining)
    }

    pub fn require(&self, needed: usize) -> Result<(), CursorError> {
        if needed > self.remaining {
            return Err(CursorError::OutOfBounds {
                needed,
                remaining: self.remaining,
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        self.require(n)?;
        let bytes = self
            .buf
            .get(self.offset..self.offset + n)
            .ok_or(CursorError::OutOfBounds {
                needed: n,
                remaining: self.remaining,
            })?;
        self.offset += n;
        self.remaining -= n;
        Ok(bytes)
    }

    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.offset..self.offset + self.remaining];
        self.offset += self.remaining;
        self.remaining = 0;
        rest
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn peek_u16_be(&self) -> Result<u16, CursorError> {
        self.require(2)?;
        Ok(u16::from_be_bytes([
            self.buf[self.offset],
            self.buf[self.offset + 1],
        ]))
    }

    pub fn read_u16_be(&mut self) -> Result<u16, CursorError> {
        let bytes = self.read_array::<2>()?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Split off the next `length` bytes as an independent cursor.
    ///
    /// The parent advances past the whole window no matter how much of it
    /// the child ends up consuming.
    pub fn sub_cursor(&mut self, length: usize) -> Result<ByteCursor<'a>, CursorError> {
        self.require(length)?;
        let child = ByteCursor {
            buf: self.buf,
            offset: self.offset,
            remaining: length,
        };
        self.offset += length;
        self.remaining -= length;
        Ok(child)
    }
}
