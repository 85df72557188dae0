//! Static lookup tables: UBX class/message names and configuration keys.
//!
//! Everything in here is immutable `'static` data, so it can be shared by any
//! number of readers without synchronization.

mod cfg_key;

pub use cfg_key::{lookup_cfg_key, CfgKey, KeyId, StorageSize};

/// Name a decoded message falls back to when its class or id is not registered
pub const UNKNOWN_NAME: &str = "unknown";

/// One UBX message class and the message ids registered for it
#[derive(Debug)]
pub struct UbxClassEntry {
    pub class: u8,
    pub name: &'static str,
    pub messages: &'static [(u8, &'static str)],
}

macro_rules! ubx_classes {
  (
    $(
      $class:literal => $class_name:literal {
        $( $msg_id:literal => $msg_name:literal, )*
      },
    )*
  ) => {
    /// Every UBX class known to the registry, ordered by class byte
    pub static UBX_CLASSES: &[UbxClassEntry] = &[
      $(
        UbxClassEntry {
          class: $class,
          name: $class_name,
          messages: &[ $( ($msg_id, $msg_name), )* ],
        },
      )*
    ];
  };
}

ubx_classes! {
  0x01 => "NAV" {
    0x01 => "POSECEF",
    0x02 => "POSLLH",
    0x03 => "STATUS",
    0x04 => "DOP",
    0x07 => "PVT",
    0x12 => "VELNED",
    0x20 => "TIMEGPS",
    0x21 => "TIMEUTC",
    0x35 => "SAT",
    0x43 => "SIG",
  },
  0x02 => "RXM" {
    0x13 => "SFRBX",
    0x14 => "MEASX",
    0x15 => "RAWX",
    0x41 => "PMREQ",
    0x59 => "RLM",
  },
  0x04 => "INF" {
    0x00 => "ERROR",
    0x01 => "WARNING",
    0x02 => "NOTICE",
    0x03 => "TEST",
    0x04 => "DEBUG",
  },
  0x05 => "ACK" {
    0x00 => "NAK",
    0x01 => "ACK",
  },
  0x06 => "CFG" {
    0x00 => "PRT",
    0x01 => "MSG",
    0x04 => "RST",
    0x08 => "RATE",
    0x24 => "NAV5",
    0x8a => "VALSET",
    0x8b => "VALGET",
    0x8c => "VALDEL",
  },
  0x09 => "UPD" {},
  0x0a => "MON" {
    0x04 => "VER",
    0x09 => "HW",
    0x38 => "RF",
  },
  0x0b => "AID" {},
  0x0d => "TIM" {
    0x01 => "TP",
    0x03 => "TM2",
    0x04 => "SVIN",
  },
  0x10 => "ESF" {},
  0x13 => "MGA" {},
  0x21 => "LOG" {},
  0x27 => "SEC" {},
  0x28 => "HNR" {},
}

fn class_entry(class: u8) -> Option<&'static UbxClassEntry> {
    UBX_CLASSES.iter().find(|entry| entry.class == class)
}

/// Name of a UBX class, `None` if the class byte is not registered
pub fn class_name(class: u8) -> Option<&'static str> {
    class_entry(class).map(|entry| entry.name)
}

/// Name of a UBX message, `None` if either the class or the id within
/// the class is not registered. Many classes only register their name.
pub fn msg_name(class: u8, msg_id: u8) -> Option<&'static str> {
    class_entry(class)?
        .messages
        .iter()
        .find(|(id, _)| *id == msg_id)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_class_and_message() {
        assert_eq!(class_name(0x02), Some("RXM"));
        assert_eq!(msg_name(0x02, 0x15), Some("RAWX"));
        assert_eq!(msg_name(0x05, 0x00), Some("NAK"));
    }

    #[test]
    fn class_without_registered_ids() {
        assert_eq!(class_name(0x13), Some("MGA"));
        assert_eq!(msg_name(0x13, 0x00), None);
    }

    #[test]
    fn unknown_class_is_not_an_error() {
        assert_eq!(class_name(0xfe), None);
        assert_eq!(msg_name(0xfe, 0x01), None);
    }

    #[test]
    fn classes_are_sorted_and_unique() {
        assert!(UBX_CLASSES.windows(2).all(|w| w[0].class < w[1].class));
    }
}
