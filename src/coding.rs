//! ndnb wire constants and an encoder for building ndnb objects.
//!
//! Every token starts with a variable-length number in big-endian base 128.
//! Continuation bytes have the high bit clear; the terminal byte has it set
//! and packs 4 more value bits above a 3-bit token type:
//!
//! ```text
//!   0vvvvvvv ... 0vvvvvvv 1vvvvttt
//! ```
//!
//! A single `0x00` byte closes the innermost open element.

use crate::error::EncodeError;
use bytes::{BufMut, Bytes, BytesMut};

/// Width of the token-type field of a terminal byte.
pub const TT_BITS: u32 = 3;
pub const TT_MASK: u8 = (1 << TT_BITS) - 1;
/// Largest value that fits in the terminal byte alone.
pub const MAX_TINY: u8 = (1 << (7 - TT_BITS)) - 1;
/// High bit: set on the terminal byte of a number.
pub const TT_HBIT: u8 = 1 << 7;
/// Structural close of the innermost element.
pub const CLOSE: u8 = 0;

/// Token type carried in the low bits of a terminal byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tt {
    /// Extension element, content type implicit.
    Ext = 0,
    /// Element with a literal tag name of `value + 1` bytes.
    Tag = 1,
    /// Element with a dictionary-coded tag.
    DTag = 2,
    /// Attribute with a literal name of `value + 1` bytes.
    Attr = 3,
    /// Attribute with a dictionary-coded name.
    DAttr = 4,
    /// Binary payload of `value` bytes.
    Blob = 5,
    /// UTF-8 payload of `value` bytes.
    UData = 6,
    /// Not a wire token; reported by the decoder for a close.
    NoToken = 7,
}

impl Tt {
    /// Decode the type field of a terminal byte.
    pub fn from_bits(bits: u8) -> Tt {
        match bits & TT_MASK {
            0 => Tt::Ext,
            1 => Tt::Tag,
            2 => Tt::DTag,
            3 => Tt::Attr,
            4 => Tt::DAttr,
            5 => Tt::Blob,
            6 => Tt::UData,
            _ => Tt::NoToken,
        }
    }
}

/// Append a token header: `val` followed by token type `tt`.
pub fn append_tt(buf: &mut BytesMut, val: usize, tt: Tt) {
    // 1 terminal byte plus at most ceil((usize::BITS - 4) / 7) continuation bytes.
    let mut tmp = [0u8; 1 + (usize::BITS as usize + 6) / 7];
    let mut at = tmp.len() - 1;
    tmp[at] = TT_HBIT | (((val & MAX_TINY as usize) as u8) << TT_BITS) | (tt as u8 & TT_MASK);
    let mut rest = val >> (7 - TT_BITS);
    while rest != 0 {
        at -= 1;
        tmp[at] = (rest as u8) & !TT_HBIT;
        rest >>= 7;
    }
    buf.put_slice(&tmp[at..]);
}

pub fn append_closer(buf: &mut BytesMut) {
    buf.put_u8(CLOSE);
}

/// Builder for ndnb objects that tracks element nesting.
#[derive(Debug, Default)]
pub struct NdnbEncoder {
    buf: BytesMut,
    depth: usize,
}

impl NdnbEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            depth: 0,
        }
    }

    /// Number of elements opened and not yet closed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Open an element with a literal tag name.
    pub fn open_tag(&mut self, name: &str) -> Result<&mut Self, EncodeError> {
        if name.is_empty() {
            return Err(EncodeError::EmptyName);
        }
        append_tt(&mut self.buf, name.len() - 1, Tt::Tag);
        self.buf.put_slice(name.as_bytes());
        self.depth += 1;
        Ok(self)
    }

    /// Open an element with a dictionary-coded tag.
    pub fn open_dtag(&mut self, dtag: usize) -> &mut Self {
        append_tt(&mut self.buf, dtag, Tt::DTag);
        self.depth += 1;
        self
    }

    /// Open an extension element.
    pub fn open_ext(&mut self, val: usize) -> &mut Self {
        append_tt(&mut self.buf, val, Tt::Ext);
        self.depth += 1;
        self
    }

    /// Attribute with a literal name; must directly follow an element open.
    pub fn attr(&mut self, name: &str, value: &str) -> Result<&mut Self, EncodeError> {
        if name.is_empty() {
            return Err(EncodeError::EmptyName);
        }
        append_tt(&mut self.buf, name.len() - 1, Tt::Attr);
        self.buf.put_slice(name.as_bytes());
        Ok(self.udata(value))
    }

    /// Attribute with a dictionary-coded name.
    pub fn dattr(&mut self, dattr: usize, value: &str) -> &mut Self {
        append_tt(&mut self.buf, dattr, Tt::DAttr);
        self.udata(value)
    }

    pub fn blob(&mut self, data: &[u8]) -> &mut Self {
        append_tt(&mut self.buf, data.len(), Tt::Blob);
        self.buf.put_slice(data);
        self
    }

    pub fn udata(&mut self, text: &str) -> &mut Self {
        append_tt(&mut self.buf, text.len(), Tt::UData);
        self.buf.put_slice(text.as_bytes());
        self
    }

    /// `<dtag>blob</dtag>`, the common shape of leaf fields.
    pub fn tagged_blob(&mut self, dtag: usize, data: &[u8]) -> &mut Self {
        append_tt(&mut self.buf, dtag, Tt::DTag);
        self.blob(data);
        append_closer(&mut self.buf);
        self
    }

    pub fn close(&mut self) -> Result<&mut Self, EncodeError> {
        if self.depth == 0 {
            return Err(EncodeError::Unbalanced);
        }
        self.depth -= 1;
        append_closer(&mut self.buf);
        Ok(self)
    }

    /// Take the encoded bytes; fails if elements are still open.
    pub fn finish(self) -> Result<Bytes, EncodeError> {
        if self.depth != 0 {
            return Err(EncodeError::Unbalanced);
        }
        Ok(self.buf.freeze())
    }
}
