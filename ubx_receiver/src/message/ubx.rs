use alloc::vec::Vec;
use core::fmt;

use crate::{
    builder::encode_frame,
    constants::{
        UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_FRAME_HEADER_LEN, UBX_FRAME_OVERHEAD,
        UBX_LENGTH_OFFSET, UBX_MSG_ID_OFFSET, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2,
    },
    error::ParserError,
    parser::checksum::UbxChecksumCalc,
    registry::{class_name, msg_name, UNKNOWN_NAME},
};

/// A checksum-verified UBX message.
///
/// Only constructed through [UbxMessage::from_frame], so holding one means the
/// frame passed both the checksum and the length checks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UbxMessage {
    class: u8,
    class_name: &'static str,
    msg_id: u8,
    msg_name: &'static str,
    length: u16,
    payload: Vec<u8>,
}

impl UbxMessage {
    /// Decode a complete frame, with or without the leading sync chars.
    ///
    /// The frame must end with the two checksum bytes and hold exactly the
    /// payload its length field declares.
    pub fn from_frame(frame: &[u8]) -> Result<Self, ParserError> {
        match frame {
            [UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2, rest @ ..] => Self::from_collected(rest),
            _ => Self::from_collected(frame),
        }
    }

    /// Decode class..checksum as collected by the stream parser, where a leading
    /// `0xb5 0x62` is a class and id, not sync chars
    pub(crate) fn from_collected(data: &[u8]) -> Result<Self, ParserError> {
        if data.len() < UBX_FRAME_OVERHEAD {
            return Err(ParserError::IncompletePayload {
                declared: declared_len(data).unwrap_or(0),
                available: data.len().saturating_sub(UBX_FRAME_HEADER_LEN + UBX_CHECKSUM_LEN),
            });
        }

        let (body, checksum) = data.split_at(data.len() - UBX_CHECKSUM_LEN);
        let mut calc = UbxChecksumCalc::new();
        calc.update(body);
        calc.validate_result(checksum[0], checksum[1])?;

        let class = body[UBX_CLASS_OFFSET];
        let msg_id = body[UBX_MSG_ID_OFFSET];
        let length = u16::from_le_bytes([body[UBX_LENGTH_OFFSET], body[UBX_LENGTH_OFFSET + 1]]);
        let payload = &body[UBX_FRAME_HEADER_LEN..];
        let declared = usize::from(length);
        if payload.len() < declared {
            return Err(ParserError::IncompletePayload {
                declared,
                available: payload.len(),
            });
        }
        if payload.len() != declared {
            return Err(ParserError::InvalidPacketLen {
                expect: declared,
                got: payload.len(),
            });
        }

        Ok(Self {
            class,
            class_name: class_name(class).unwrap_or(UNKNOWN_NAME),
            msg_id,
            msg_name: msg_name(class, msg_id).unwrap_or(UNKNOWN_NAME),
            length,
            payload: payload.to_vec(),
        })
    }

    pub fn class(&self) -> u8 {
        self.class
    }

    /// Class name from the registry, `"unknown"` if not registered
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    pub fn msg_id(&self) -> u8 {
        self.msg_id
    }

    /// Message name from the registry, `"unknown"` if not registered
    pub fn msg_name(&self) -> &'static str {
        self.msg_name
    }

    /// Value of the length field, always equal to `payload().len()`
    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Re-encode the message as it appeared on the wire, sync chars included
    pub fn to_frame(&self) -> Vec<u8> {
        encode_frame(self.class, self.msg_id, self.length, &self.payload)
    }
}

fn declared_len(data: &[u8]) -> Option<usize> {
    let bytes = data.get(UBX_LENGTH_OFFSET..UBX_LENGTH_OFFSET + 2)?;
    Some(usize::from(u16::from_le_bytes([bytes[0], bytes[1]])))
}

impl fmt::Display for UbxMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UBX-{}-{} (class: 0x{:02x}, id: 0x{:02x}, payload length: {})",
            self.class_name, self.msg_name, self.class, self.msg_id, self.length
        )
    }
}
