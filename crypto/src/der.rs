//! The DER subset needed for ECDSA signatures
//!
//! An ECDSA signature in DER is
//!
//! ```text
//! 0x30 <total len> 0x02 <r len> <r ...> 0x02 <s len> <s ...>
//! ```
//!
//! where each INTEGER is a minimal two's complement big-endian number. Since `r` and `s` are
//! positive, an INTEGER whose first magnitude byte has the top bit set carries one extra `0x00`.
//! The wire format of this crate carries plain magnitudes, so [`encode_signature`] adds that byte
//! where needed and [`decode_signature`] removes it again.
//!
//! Only short-form lengths are handled: with 256 bit scalars a signature never exceeds 72 bytes.

/// Largest magnitude accepted for `r` or `s` (secp256k1 scalars are 32 bytes).
pub const MAX_MAGNITUDE_LENGTH: usize = 32;

const SHORT_FORM_LIMIT: usize = 0x80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    Integer = 0x02,
    Sequence = 0x30,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DerError {
    #[error("truncated at offset {offset}: {needed} more bytes needed")]
    Truncated { offset: usize, needed: usize },
    #[error("expected {expected:?} tag, found 0x{found:02x}")]
    UnexpectedTag { expected: Tag, found: u8 },
    #[error("long-form length byte 0x{0:02x} is not supported")]
    LongFormLength(u8),
    #[error("value of {0} bytes does not fit a short-form length")]
    ValueTooLong(usize),
    #[error("{0} trailing bytes after the last element")]
    TrailingBytes(usize),
    #[error("integer without content")]
    EmptyInteger,
    #[error("integer is zero")]
    ZeroInteger,
    #[error("integer is negative")]
    NegativeInteger,
    #[error("integer is not minimally encoded")]
    NonMinimalInteger,
    #[error("integer magnitude of {0} bytes exceeds {MAX_MAGNITUDE_LENGTH}")]
    IntegerTooLong(usize),
}

/// One tag-length-value element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub tag: Tag,
    pub length: usize,
    pub value: &'a [u8],
}

impl<'a> Tlv<'a> {
    pub fn new(tag: Tag, value: &'a [u8]) -> Self {
        Self {
            tag,
            length: value.len(),
            value,
        }
    }

    pub fn encoded_len(&self) -> usize {
        2 + self.length
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), DerError> {
        if self.length >= SHORT_FORM_LIMIT {
            return Err(DerError::ValueTooLong(self.length));
        }
        out.push(self.tag as u8);
        out.push(self.length as u8);
        out.extend_from_slice(self.value);
        Ok(())
    }
}

/// Bounds-checked cursor handing out consecutive [`Tlv`]s.
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DerError> {
        let available = self.bytes.len() - self.pos;
        if n > available {
            return Err(DerError::Truncated {
                offset: self.pos,
                needed: n - available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read the next element, which must carry the `expected` tag.
    pub fn read(&mut self, expected: Tag) -> Result<Tlv<'a>, DerError> {
        let found = self.take(1)?[0];
        if found != expected as u8 {
            return Err(DerError::UnexpectedTag { expected, found });
        }
        let length = self.take(1)?[0];
        if usize::from(length) >= SHORT_FORM_LIMIT {
            return Err(DerError::LongFormLength(length));
        }
        let length = usize::from(length);
        let value = self.take(length)?;
        Ok(Tlv {
            tag: expected,
            length,
            value,
        })
    }

    /// Require that all input has been consumed.
    pub fn finish(self) -> Result<(), DerError> {
        match self.bytes.len() - self.pos {
            0 => Ok(()),
            n => Err(DerError::TrailingBytes(n)),
        }
    }
}

/// INTEGER content octets for a positive magnitude.
///
/// A magnitude that already carries the sign byte (as legacy envelopes do) yields the same encoding
/// as the bare one. Any other leading zero is rejected, so each signature has one wire form.
pub fn integer_content(magnitude: &[u8]) -> Result<Vec<u8>, DerError> {
    if magnitude.is_empty() {
        return Err(DerError::EmptyInteger);
    }
    if magnitude.iter().all(|b| *b == 0) {
        return Err(DerError::ZeroInteger);
    }
    let magnitude = match magnitude {
        [0, next, ..] if next & 0x80 != 0 => &magnitude[1..],
        [0, ..] => return Err(DerError::NonMinimalInteger),
        _ => magnitude,
    };
    if magnitude.len() > MAX_MAGNITUDE_LENGTH {
        return Err(DerError::IntegerTooLong(magnitude.len()));
    }
    let mut content = Vec::with_capacity(magnitude.len() + 1);
    if magnitude[0] & 0x80 != 0 {
        content.push(0);
    }
    content.extend_from_slice(magnitude);
    Ok(content)
}

/// Positive magnitude held by INTEGER content octets, rejecting anything non-canonical.
pub fn integer_magnitude(content: &[u8]) -> Result<&[u8], DerError> {
    let (first, rest) = content.split_first().ok_or(DerError::EmptyInteger)?;
    if first & 0x80 != 0 {
        return Err(DerError::NegativeInteger);
    }
    let magnitude = if *first == 0 {
        match rest.first() {
            None => return Err(DerError::ZeroInteger),
            Some(b) if b & 0x80 == 0 => return Err(DerError::NonMinimalInteger),
            Some(_) => rest,
        }
    } else {
        content
    };
    if magnitude.len() > MAX_MAGNITUDE_LENGTH {
        return Err(DerError::IntegerTooLong(magnitude.len()));
    }
    Ok(magnitude)
}

/// Build `SEQUENCE { INTEGER r, INTEGER s }` from the two magnitudes.
pub fn encode_signature(r: &[u8], s: &[u8]) -> Result<Vec<u8>, DerError> {
    let r = integer_content(r)?;
    let s = integer_content(s)?;
    let r = Tlv::new(Tag::Integer, &r);
    let s = Tlv::new(Tag::Integer, &s);

    let mut body = Vec::with_capacity(r.encoded_len() + s.encoded_len());
    r.encode_into(&mut body)?;
    s.encode_into(&mut body)?;

    let sequence = Tlv::new(Tag::Sequence, &body);
    let mut out = Vec::with_capacity(sequence.encoded_len());
    sequence.encode_into(&mut out)?;
    Ok(out)
}

/// Split a DER signature into the magnitudes of `r` and `s`.
pub fn decode_signature(der: &[u8]) -> Result<(Vec<u8>, Vec<u8>), DerError> {
    let mut outer = Reader::new(der);
    let sequence = outer.read(Tag::Sequence)?;
    outer.finish()?;

    let mut inner = Reader::new(sequence.value);
    let r = inner.read(Tag::Integer)?;
    let s = inner.read(Tag::Integer)?;
    inner.finish()?;

    Ok((
        integer_magnitude(r.value)?.to_vec(),
        integer_magnitude(s.value)?.to_vec(),
    ))
}
