use alloc::{string::String, vec::Vec};
use core::fmt;

/// Error that possible during frame decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// UBX Fletcher checksum mismatch, both values packed as `ck_a | ck_b << 8`
    InvalidChecksum { expect: u16, got: u16 },
    /// NMEA XOR checksum mismatch
    InvalidNmeaChecksum { expect: u8, got: u8 },
    /// UBX frame carries more bytes than its length field declares
    InvalidPacketLen { expect: usize, got: usize },
    /// UBX length field implies more bytes than the frame holds
    IncompletePayload { declared: usize, available: usize },
    /// UBX length field is above the configured maximum, the frame is dropped
    PayloadTooLong { declared: usize, max: usize },
    /// NMEA sentence got longer than the configured maximum without a line feed
    SentenceTooLong { max: usize },
    /// NMEA sentence is not decodable at all
    InvalidSentence(&'static str),
}

impl ParserError {
    /// Whether the frame was complete but failed its integrity check
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(
            self,
            ParserError::InvalidChecksum { .. } | ParserError::InvalidNmeaChecksum { .. }
        )
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::InvalidChecksum { expect, got } => write!(
                f,
                "Not valid packet's checksum, expect {:x}, got {:x}",
                expect, got
            ),
            ParserError::InvalidNmeaChecksum { expect, got } => write!(
                f,
                "Not valid sentence's checksum, expect {:02X}, got {:02X}",
                expect, got
            ),
            ParserError::InvalidPacketLen { expect, got } => write!(
                f,
                "Invalid payload length, expect {}, got {}",
                expect, got
            ),
            ParserError::IncompletePayload {
                declared,
                available,
            } => write!(
                f,
                "Incomplete payload, length field declares {} bytes but only {} available",
                declared, available
            ),
            ParserError::PayloadTooLong { declared, max } => write!(
                f,
                "Payload length {} exceeds the configured maximum {}",
                declared, max
            ),
            ParserError::SentenceTooLong { max } => write!(
                f,
                "Sentence exceeds the configured maximum of {} characters",
                max
            ),
            ParserError::InvalidSentence(reason) => write!(f, "Invalid NMEA sentence: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParserError {}

/// A frame the stream parser delimited but could not decode.
///
/// Carries the offending bytes as they were collected, the UBX sync chars and
/// the NMEA `$` are not part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    pub error: ParserError,
    pub raw: Vec<u8>,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} raw bytes)", self.error, self.raw.len())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Error that possible while building an outbound command.
/// Nothing is written to the receiver when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    UnknownConfigKey(String),
    OddArgumentCount(usize),
    PayloadTooLong(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownConfigKey(name) => {
                write!(f, "Unknown configuration key '{}'", name)
            },
            BuildError::OddArgumentCount(count) => write!(
                f,
                "Number of key/value arguments must be even, got {}",
                count
            ),
            BuildError::PayloadTooLong(len) => write!(
                f,
                "Payload of {} bytes does not fit the 16-bit length field",
                len
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {}
