use alloc::string::ToString;
use core::{fmt, str::FromStr};

use crate::error::BuildError;

/// 32-bit configuration key identifier as used by UBX-CFG-VALSET/VALGET
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSize {
    OneBit,
    OneByte,
    TwoBytes,
    FourBytes,
    EightBytes,
}

impl StorageSize {
    pub const fn to_usize(self) -> usize {
        match self {
            Self::OneBit | Self::OneByte => 1,
            Self::TwoBytes => 2,
            Self::FourBytes => 4,
            Self::EightBytes => 8,
        }
    }
}

impl KeyId {
    pub const SIZE: usize = 4;

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Size of the value that follows the key on the wire, encoded in bits 28..30
    pub const fn value_size(&self) -> Option<StorageSize> {
        match (self.0 >> 28) & 0b111 {
            1 => Some(StorageSize::OneBit),
            2 => Some(StorageSize::OneByte),
            3 => Some(StorageSize::TwoBytes),
            4 => Some(StorageSize::FourBytes),
            5 => Some(StorageSize::EightBytes),
            _ => None,
        }
    }

    pub const fn group_id(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn item_id(&self) -> u16 {
        (self.0 & 0x0fff) as u16
    }

    pub const fn to_le_bytes(self) -> [u8; Self::SIZE] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

macro_rules! cfg_keys {
  (
    $(
      $(#[$doc:meta])*
      $cfg_item:ident, $name:literal, $cfg_key_id:expr, $is_msg_out:literal,
    )*
  ) => {
    /// Symbolic configuration keys understood by the command builder
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum CfgKey {
      $(
        $(#[$doc])*
        $cfg_item,
      )*
    }

    impl CfgKey {
      pub const ALL: &'static [CfgKey] = &[ $( CfgKey::$cfg_item, )* ];

      /// Symbolic name, as accepted by [lookup_cfg_key]
      pub const fn name(self) -> &'static str {
        match self {
          $( CfgKey::$cfg_item => $name, )*
        }
      }

      pub const fn key_id(self) -> KeyId {
        match self {
          $( CfgKey::$cfg_item => KeyId($cfg_key_id), )*
        }
      }

      /// Whether the key is an output-rate toggle for a message or sentence
      pub const fn is_msg_output(self) -> bool {
        match self {
          $( CfgKey::$cfg_item => $is_msg_out, )*
        }
      }

      pub fn from_name(name: &str) -> Option<CfgKey> {
        match name {
          $( $name => Some(CfgKey::$cfg_item), )*
          _ => None,
        }
      }
    }
  }
}

cfg_keys! {
  // CFG-MSGOUT-NMEA_ID_*_UART1
  GllUart1,   "GLL_UART1",   0x209100ca, true,
  GsvUart1,   "GSV_UART1",   0x209100c5, true,
  GgaUart1,   "GGA_UART1",   0x209100bb, true,
  GsaUart1,   "GSA_UART1",   0x209100c0, true,
  GstUart1,   "GST_UART1",   0x209100d4, true,
  RmcUart1,   "RMC_UART1",   0x209100ac, true,
  ZdaUart1,   "ZDA_UART1",   0x209100d9, true,
  VtgUart1,   "VTG_UART1",   0x209100b1, true,
  // CFG-MSGOUT-UBX_RXM_*_UART1
  RawxUart1,  "RAWX_UART1",  0x209102a5, true,
  SfrbxUart1, "SFRBX_UART1", 0x20910232, true,

  // CFG-MSGOUT-NMEA_ID_*_UART2
  GllUart2,   "GLL_UART2",   0x209100cb, true,
  GsvUart2,   "GSV_UART2",   0x209100c6, true,
  GgaUart2,   "GGA_UART2",   0x209100bc, true,
  GsaUart2,   "GSA_UART2",   0x209100c1, true,
  GstUart2,   "GST_UART2",   0x209100d5, true,
  RmcUart2,   "RMC_UART2",   0x209100ad, true,
  ZdaUart2,   "ZDA_UART2",   0x209100da, true,
  VtgUart2,   "VTG_UART2",   0x209100b2, true,
  // CFG-MSGOUT-UBX_RXM_*_UART2
  RawxUart2,  "RAWX_UART2",  0x209102a6, true,
  SfrbxUart2, "SFRBX_UART2", 0x20910233, true,

  // CFG-MSGOUT-NMEA_ID_*_USB
  GllUsb,     "GLL_USB",     0x209100cc, true,
  GsvUsb,     "GSV_USB",     0x209100c7, true,
  GgaUsb,     "GGA_USB",     0x209100bd, true,
  GsaUsb,     "GSA_USB",     0x209100c2, true,
  GstUsb,     "GST_USB",     0x209100d6, true,
  RmcUsb,     "RMC_USB",     0x209100ae, true,
  ZdaUsb,     "ZDA_USB",     0x209100db, true,
  VtgUsb,     "VTG_USB",     0x209100b3, true,
  // CFG-MSGOUT-UBX_RXM_*_USB
  RawxUsb,    "RAWX_USB",    0x209102a7, true,
  SfrbxUsb,   "SFRBX_USB",   0x20910234, true,

  /// CFG-NAVSPG-DYNMODEL, dynamic platform model
  NavspgDynmodel, "NAVSPG-DYNMODEL", 0x20110021, false,
}

impl FromStr for CfgKey {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CfgKey::from_name(s).ok_or_else(|| BuildError::UnknownConfigKey(s.to_string()))
    }
}

impl fmt::Display for CfgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a symbolic configuration key name to its 4-byte key id
pub fn lookup_cfg_key(name: &str) -> Result<KeyId, BuildError> {
    name.parse::<CfgKey>().map(CfgKey::key_id)
}
