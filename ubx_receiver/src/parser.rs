pub(crate) mod checksum;

use alloc::vec::Vec;
use log::{debug, trace, warn};

use crate::{
    constants::{
        NMEA_DEFAULT_TALKER_PREFIX, NMEA_END_CHAR_2, NMEA_SYNC_CHAR, UBX_FRAME_HEADER_LEN,
        UBX_FRAME_OVERHEAD, UBX_LENGTH_OFFSET, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
    },
    error::{DecodeFailure, ParserError},
    message::{Message, NmeaMessage, UbxMessage},
};

/// What the parser yields for every frame it delimits
pub type ParseResult = Result<Message, DecodeFailure>;

/// State of the frame detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Looking for `0xB5 0x62` or `$` followed by a talker prefix
    #[default]
    Idle,
    /// Collecting class, id, length, payload and checksum of a UBX frame
    CollectingUbx,
    /// Collecting an NMEA sentence up to and including the line feed
    CollectingNmea,
}

/// Tunables of the [Parser]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    nmea_talker_prefix: Option<u8>,
    max_payload_len: u16,
    max_sentence_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            nmea_talker_prefix: Some(NMEA_DEFAULT_TALKER_PREFIX),
            max_payload_len: u16::MAX,
            max_sentence_len: usize::MAX,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Character that must follow `$` for a sentence to be collected.
    ///
    /// `Some(b'G')` (the default) only picks up GNSS talkers (`$GP`, `$GN`, ...),
    /// `None` accepts any uppercase ASCII letter.
    pub fn with_nmea_talker_prefix(mut self, prefix: Option<u8>) -> Self {
        self.nmea_talker_prefix = prefix;
        self
    }

    /// UBX frames declaring a longer payload are reported as
    /// [ParserError::PayloadTooLong] once their length field has been read
    pub fn with_max_payload_len(mut self, max_payload_len: u16) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    /// NMEA sentences (`$` and line terminator included) that get longer are
    /// reported as [ParserError::SentenceTooLong] before their line feed arrives.
    ///
    /// [NMEA_MAX_SENTENCE_LEN](crate::constants::NMEA_MAX_SENTENCE_LEN) is the
    /// NMEA 0183 limit. A stray `$G` in binary data then swallows at most that
    /// many bytes instead of everything up to the next `0x0a`.
    pub fn with_max_sentence_len(mut self, max_sentence_len: usize) -> Self {
        self.max_sentence_len = max_sentence_len;
        self
    }

    pub fn nmea_talker_prefix(&self) -> Option<u8> {
        self.nmea_talker_prefix
    }

    pub fn max_payload_len(&self) -> u16 {
        self.max_payload_len
    }

    pub fn max_sentence_len(&self) -> usize {
        self.max_sentence_len
    }

    fn starts_sentence(&self, byte: u8) -> bool {
        match self.nmea_talker_prefix {
            Some(prefix) => byte == prefix,
            None => byte.is_ascii_uppercase(),
        }
    }
}

/// Incremental frame detector for a mixed UBX/NMEA byte stream.
///
/// Bytes are fed one at a time ([Parser::consume_byte]) or in chunks
/// ([Parser::consume]); every completed frame yields exactly one result, an
/// incomplete frame yields nothing. The parser never blocks, waiting for more
/// data is up to whoever owns the byte source.
///
/// A frame that never completes (e.g. the source went away mid-frame) keeps
/// the parser in its collecting state until [Parser::reset] is called.
///
/// ```
/// use ubx_receiver::{Message, Parser};
///
/// let mut parser = Parser::default();
/// let data = b"\xb5\x62\x05\x01\x02\x00\x04\x05\x11\x38";
/// for result in parser.consume(data) {
///     match result {
///         Ok(Message::Ubx(msg)) => assert_eq!(msg.msg_name(), "ACK"),
///         Ok(Message::Nmea(_)) => unreachable!(),
///         Err(failure) => eprintln!("Malformed frame: {failure}"),
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    config: ParserConfig,
    state: ParserState,
    buf: Vec<u8>,
    last_byte: Option<u8>,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Number of bytes collected for the frame in flight
    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Abandon the frame in flight and go back to looking for a start sequence
    pub fn reset(&mut self) {
        if self.state != ParserState::Idle {
            debug!(
                "Abandoning {:?} frame after {} bytes",
                self.state,
                self.buf.len()
            );
        }
        self.state = ParserState::Idle;
        self.buf.clear();
        self.last_byte = None;
    }

    /// Feed a single byte, returns the result of the frame it completes, if any
    pub fn consume_byte(&mut self, byte: u8) -> Option<ParseResult> {
        trace!("state: {:?}, byte: {:#04x}", self.state, byte);
        match self.state {
            ParserState::Idle => {
                self.detect_start(byte);
                None
            },
            ParserState::CollectingUbx => {
                self.buf.push(byte);
                self.ubx_progress()
            },
            ParserState::CollectingNmea => {
                self.buf.push(byte);
                if byte == NMEA_END_CHAR_2 {
                    Some(self.complete_frame(|raw| {
                        NmeaMessage::from_sentence(raw).map(Message::Nmea)
                    }))
                } else if self.buf.len() + 1 >= self.config.max_sentence_len {
                    // `$` is not collected, the line feed is still missing
                    let error = ParserError::SentenceTooLong {
                        max: self.config.max_sentence_len,
                    };
                    Some(self.complete_frame(|_| Err(error)))
                } else {
                    None
                }
            },
        }
    }

    /// Feed a chunk of bytes. The returned iterator consumes them lazily and
    /// yields one result per completed frame, in stream order.
    ///
    /// Bytes the iterator does not get to are not consumed, see
    /// [ParserIter::remaining].
    #[must_use = "bytes are only consumed as the iterator advances"]
    pub fn consume<'a>(&'a mut self, data: &'a [u8]) -> ParserIter<'a> {
        ParserIter {
            parser: self,
            data: data.iter(),
        }
    }

    fn detect_start(&mut self, byte: u8) {
        match self.last_byte {
            Some(UBX_SYNC_CHAR_1) if byte == UBX_SYNC_CHAR_2 => {
                trace!("Received UBX start sequence");
                self.state = ParserState::CollectingUbx;
                self.buf.clear();
            },
            Some(NMEA_SYNC_CHAR) if self.config.starts_sentence(byte) => {
                trace!("Received NMEA start sequence");
                self.state = ParserState::CollectingNmea;
                self.buf.clear();
                self.buf.push(byte);
            },
            _ => {},
        }
        self.last_byte = Some(byte);
    }

    fn ubx_progress(&mut self) -> Option<ParseResult> {
        if self.buf.len() < UBX_FRAME_HEADER_LEN {
            return None;
        }
        let declared = u16::from_le_bytes([
            self.buf[UBX_LENGTH_OFFSET],
            self.buf[UBX_LENGTH_OFFSET + 1],
        ]);
        if declared > self.config.max_payload_len {
            // Checked once, right when the length field is complete
            let error = ParserError::PayloadTooLong {
                declared: usize::from(declared),
                max: usize::from(self.config.max_payload_len),
            };
            return Some(self.complete_frame(|_| Err(error)));
        }
        if self.buf.len() < usize::from(declared) + UBX_FRAME_OVERHEAD {
            return None;
        }
        Some(self.complete_frame(|raw| UbxMessage::from_collected(raw).map(Message::Ubx)))
    }

    fn complete_frame<F>(&mut self, decode: F) -> ParseResult
    where
        F: FnOnce(&[u8]) -> Result<Message, ParserError>,
    {
        let result = match decode(&self.buf) {
            Ok(msg) => {
                debug!("Decoded {}", msg);
                Ok(msg)
            },
            Err(error) => {
                warn!("Malformed {:?} frame, ignore it; cause {}", self.state, error);
                Err(DecodeFailure {
                    error,
                    raw: self.buf.clone(),
                })
            },
        };
        self.state = ParserState::Idle;
        self.buf.clear();
        self.last_byte = None;
        result
    }
}

/// Iterator over the frames completed by a chunk of bytes, see [Parser::consume]
pub struct ParserIter<'a> {
    parser: &'a mut Parser,
    data: core::slice::Iter<'a, u8>,
}

impl<'a> ParserIter<'a> {
    /// Bytes of the chunk not consumed yet
    pub fn remaining(&self) -> &'a [u8] {
        self.data.as_slice()
    }
}

impl Iterator for ParserIter<'_> {
    type Item = ParseResult;

    fn next(&mut self) -> Option<Self::Item> {
        for &byte in self.data.by_ref() {
            if let Some(result) = self.parser.consume_byte(byte) {
                return Some(result);
            }
        }
        None
    }
}
