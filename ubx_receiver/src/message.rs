mod nmea;
mod ubx;

use core::fmt;

pub use nmea::NmeaMessage;
pub use ubx::UbxMessage;

/// A decoded frame of either protocol
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Message {
    Ubx(UbxMessage),
    Nmea(NmeaMessage),
}

impl Message {
    pub fn as_ubx(&self) -> Option<&UbxMessage> {
        match self {
            Message::Ubx(msg) => Some(msg),
            Message::Nmea(_) => None,
        }
    }

    pub fn as_nmea(&self) -> Option<&NmeaMessage> {
        match self {
            Message::Nmea(msg) => Some(msg),
            Message::Ubx(_) => None,
        }
    }
}

impl From<UbxMessage> for Message {
    fn from(msg: UbxMessage) -> Self {
        Message::Ubx(msg)
    }
}

impl From<NmeaMessage> for Message {
    fn from(msg: NmeaMessage) -> Self {
        Message::Nmea(msg)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Ubx(msg) => fmt::Display::fmt(msg, f),
            Message::Nmea(msg) => fmt::Display::fmt(msg, f),
        }
    }
}
