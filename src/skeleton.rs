//! Skeleton decoder: finds token and object boundaries in ndnb data without
//! building anything.
//!
//! The decoder is its own state. Feed it input in chunks of any size with
//! [`SkeletonDecoder::decode`]; it keeps only counters and offsets between
//! calls, never references into the input.
//!
//! In the default mode a call returns when the input runs out, an error
//! state is entered, or the outermost element closes, which makes it a
//! convenient way to pull whole objects out of a byte stream. With
//! [`SkeletonDecoder::set_pause`] it additionally returns right after each
//! token header and each close, reporting the token type through
//! [`SkeletonDecoder::paused_token`] (`Tt::NoToken` for a close). The pause
//! flag persists, so test for the end of an object with
//! [`SkeletonDecoder::is_final`].

use crate::coding::{Tt, CLOSE, MAX_TINY, TT_BITS, TT_HBIT};
use crate::error::DecodeError;
use tracing::debug;

/// Primary decoder state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum DState {
    #[default]
    Initial,
    NewToken,
    NumVal,
    UData,
    TagName,
    AttrName,
    Blob,
    ErrOverflow,
    ErrAttr,
    ErrCoding,
    ErrNest,
    ErrBug,
}

impl DState {
    pub fn is_error(self) -> bool {
        self.error().is_some()
    }

    pub fn error(self) -> Option<DecodeError> {
        match self {
            DState::ErrOverflow => Some(DecodeError::Overflow),
            DState::ErrAttr => Some(DecodeError::Attr),
            DState::ErrCoding => Some(DecodeError::Coding),
            DState::ErrNest => Some(DecodeError::Nest),
            DState::ErrBug => Some(DecodeError::Bug),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SkeletonDecoder {
    state: DState,
    pause: bool,
    // 0: none, 1: inside an open tag, 2: attribute value open, 3: attribute name done
    tagstate: u8,
    nest: usize,
    numval: usize,
    index: usize,
    token_index: usize,
    element_index: usize,
    paused_token: Option<Tt>,
}

impl SkeletonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh decoder in pause mode.
    pub fn with_pause() -> Self {
        Self {
            pause: true,
            ..Self::default()
        }
    }

    pub fn state(&self) -> DState {
        self.state
    }
    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }
    pub fn error(&self) -> Option<DecodeError> {
        self.state.error()
    }

    /// True at a quiescent point: no token in progress and no open element.
    pub fn is_final(&self) -> bool {
        self.state == DState::Initial && self.nest == 0
    }

    pub fn pause(&self) -> bool {
        self.pause
    }
    pub fn set_pause(&mut self, pause: bool) {
        self.pause = pause;
    }

    /// Token type recognized when the last call paused, if it did.
    pub fn paused_token(&self) -> Option<Tt> {
        self.paused_token
    }

    pub fn tagstate(&self) -> u8 {
        self.tagstate
    }
    /// Current element nesting depth.
    pub fn nest(&self) -> usize {
        self.nest
    }
    /// Number under construction, or bytes still expected by a payload state.
    pub fn numval(&self) -> usize {
        self.numval
    }
    /// Total bytes consumed since the decoder was created.
    pub fn index(&self) -> usize {
        self.index
    }
    /// Stream offset of the token most recently started.
    pub fn token_index(&self) -> usize {
        self.token_index
    }
    /// Stream offset of the innermost element opened most recently.
    pub fn element_index(&self) -> usize {
        self.element_index
    }

    /// Consume as much of `p` as the current mode allows; returns the
    /// number of bytes consumed.
    pub fn decode(&mut self, p: &[u8]) -> usize {
        let entry_state = self.state;
        let mut state = self.state;
        let mut tagstate = self.tagstate;
        let mut numval = self.numval;
        let mut n = p.len();
        let mut i = 0;
        self.paused_token = None;

        while i < n {
            match state {
                DState::Initial | DState::NewToken => {
                    self.token_index = self.index + i;
                    if tagstate > 1 {
                        // 2 closes an attribute value, 3 opens one
                        tagstate -= 1;
                    }
                    if p[i] == CLOSE {
                        i += 1;
                        if self.nest == 0 || tagstate > 1 {
                            state = DState::ErrNest;
                            continue;
                        }
                        tagstate = 0;
                        self.nest -= 1;
                        if self.nest == 0 {
                            state = DState::Initial;
                            n = i;
                        }
                        if self.pause {
                            self.paused_token = Some(Tt::NoToken);
                            n = i;
                        }
                        continue;
                    }
                    numval = 0;
                    state = DState::NumVal;
                }
                DState::NumVal => {
                    let c = p[i];
                    i += 1;
                    if c & TT_HBIT == 0 {
                        if numval > (usize::MAX >> (7 + TT_BITS)) {
                            state = DState::ErrOverflow;
                        }
                        numval = (numval << 7) + (c & 0x7F) as usize;
                        continue;
                    }
                    numval = (numval << (7 - TT_BITS)) + ((c >> TT_BITS) & MAX_TINY) as usize;
                    let tt = Tt::from_bits(c);
                    state = match tt {
                        Tt::Ext => {
                            if tagstate == 1 {
                                tagstate = 0;
                            }
                            self.nest += 1;
                            self.element_index = self.token_index;
                            DState::NewToken
                        }
                        Tt::DTag => {
                            self.nest += 1;
                            self.element_index = self.token_index;
                            tagstate = 1;
                            DState::NewToken
                        }
                        Tt::Blob | Tt::UData => {
                            if tagstate == 1 {
                                tagstate = 0;
                            }
                            match (numval, tt) {
                                (0, _) => DState::NewToken,
                                (_, Tt::Blob) => DState::Blob,
                                _ => DState::UData,
                            }
                        }
                        Tt::DAttr if tagstate == 1 => {
                            tagstate = 3;
                            DState::NewToken
                        }
                        Tt::Attr if tagstate == 1 => match numval.checked_add(1) {
                            Some(len) => {
                                numval = len;
                                DState::AttrName
                            }
                            None => DState::ErrOverflow,
                        },
                        Tt::DAttr | Tt::Attr => DState::ErrAttr,
                        Tt::Tag => {
                            if tagstate == 1 {
                                tagstate = 0;
                            }
                            self.nest += 1;
                            self.element_index = self.token_index;
                            match numval.checked_add(1) {
                                Some(len) => {
                                    numval = len;
                                    DState::TagName
                                }
                                None => DState::ErrOverflow,
                            }
                        }
                        Tt::NoToken => DState::ErrCoding,
                    };
                    if self.pause && !state.is_error() {
                        self.paused_token = Some(tt);
                        n = i;
                    }
                }
                DState::TagName | DState::AttrName | DState::UData | DState::Blob => {
                    let chunk = (n - i).min(numval);
                    if chunk == 0 {
                        state = DState::ErrBug;
                        continue;
                    }
                    numval -= chunk;
                    i += chunk;
                    if numval == 0 {
                        state = match state {
                            DState::TagName if self.nest == 0 => DState::ErrNest,
                            DState::TagName => {
                                tagstate = 1;
                                DState::NewToken
                            }
                            DState::AttrName if self.nest == 0 => DState::ErrAttr,
                            DState::AttrName => {
                                tagstate = 3;
                                DState::NewToken
                            }
                            _ => DState::NewToken,
                        };
                    }
                }
                // error states are sticky
                _ => break,
            }
        }

        if state.is_error() {
            tagstate = 0;
            self.pause = false;
            if !entry_state.is_error() {
                debug!(state = ?state, offset = self.index + i, "ndnb decode error");
            }
        }
        self.state = state;
        self.tagstate = tagstate;
        self.numval = numval;
        self.index += i;
        i
    }
}
