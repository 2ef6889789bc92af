//! ObjectFramer: splits a byte stream into complete top-level ndnb objects.
//!
//! Bytes are appended as they arrive; the skeleton decoder scans only the
//! bytes not seen before, so each byte is examined once no matter how the
//! stream is fragmented.

use crate::error::FrameError;
use crate::skeleton::SkeletonDecoder;
use bytes::{Bytes, BytesMut};
use tracing::{trace, warn};

/// Largest object accepted by default.
pub const MAX_OBJECT_SIZE: usize = 8800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramerConfig {
    pub max_object_size: usize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            max_object_size: MAX_OBJECT_SIZE,
        }
    }
}

#[derive(Debug, Default)]
pub struct ObjectFramer {
    buf: BytesMut,
    scanned: usize,
    decoder: SkeletonDecoder,
    config: FramerConfig,
}

impl ObjectFramer {
    pub fn new(config: FramerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Bytes received and not yet returned as part of an object.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Discard buffered bytes and any decode error.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.scanned = 0;
        self.decoder = SkeletonDecoder::new();
    }

    /// Next complete object, or `Ok(None)` until more bytes arrive.
    ///
    /// Decode errors are sticky until `reset`.
    pub fn next_object(&mut self) -> Result<Option<Bytes>, FrameError> {
        if let Some(err) = self.decoder.error() {
            return Err(err.into());
        }
        let used = self.decoder.decode(&self.buf[self.scanned..]);
        self.scanned += used;
        if let Some(err) = self.decoder.error() {
            warn!(error = %err, offset = self.decoder.index(), "malformed ndnb stream");
            return Err(err.into());
        }
        if self.scanned > self.config.max_object_size {
            warn!(
                size = self.scanned,
                limit = self.config.max_object_size,
                "ndnb object too large"
            );
            return Err(FrameError::Oversized {
                size: self.scanned,
                limit: self.config.max_object_size,
            });
        }
        if self.scanned > 0 && self.decoder.is_final() {
            let object = self.buf.split_to(self.scanned).freeze();
            self.scanned = 0;
            self.decoder = SkeletonDecoder::new();
            trace!(len = object.len(), "framed ndnb object");
            return Ok(Some(object));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::NdnbEncoder;
    use crate::error::DecodeError;

    fn object(payload: &[u8]) -> Bytes {
        let mut enc = NdnbEncoder::new();
        enc.open_dtag(64).tagged_blob(19, payload);
        enc.close().unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn whole_objects_come_out_in_order() {
        let a = object(b"first");
        let b = object(b"second");
        let mut f = ObjectFramer::default();
        f.extend(&a);
        f.extend(&b);
        assert_eq!(f.next_object().unwrap(), Some(a));
        assert_eq!(f.next_object().unwrap(), Some(b));
        assert_eq!(f.next_object().unwrap(), None);
        assert_eq!(f.buffered(), 0);
    }

    #[test]
    fn partial_object_waits_for_more() {
        let a = object(b"payload");
        let mut f = ObjectFramer::default();
        f.extend(&a[..3]);
        assert_eq!(f.next_object().unwrap(), None);
        f.extend(&a[3..]);
        assert_eq!(f.next_object().unwrap(), Some(a));
    }

    #[test]
    fn decode_error_is_sticky_until_reset() {
        let mut f = ObjectFramer::default();
        f.extend(&[0x00]);
        assert_eq!(
            f.next_object().unwrap_err(),
            FrameError::Decode(DecodeError::Nest)
        );
        f.extend(&object(b"x"));
        assert!(f.next_object().is_err());
        f.reset();
        f.extend(&object(b"x"));
        assert!(f.next_object().unwrap().is_some());
    }

    #[test]
    fn oversized_object_rejected() {
        let mut f = ObjectFramer::new(FramerConfig {
            max_object_size: 16,
        });
        f.extend(&object(&[7u8; 64]));
        assert!(matches!(
            f.next_object(),
            Err(FrameError::Oversized { limit: 16, .. })
        ));
    }
}
