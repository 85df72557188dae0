//! Outbound UBX commands: generic frames, CFG-RST and CFG-VALSET.
//!
//! Everything here only produces bytes; writing them to the receiver is up to
//! the caller. On error nothing is produced.

use alloc::vec::Vec;
use bitflags::bitflags;
use log::debug;

use crate::{
    constants::{
        CFG_CLASS, CFG_RST_ID, CFG_VALSET_ID, CFG_VALSET_VERSION, UBX_FRAME_OVERHEAD,
        UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2, UBX_SYNC_SIZE,
    },
    error::BuildError,
    parser::checksum::UbxChecksumCalc,
    registry::{CfgKey, KeyId},
};

bitflags! {
    /// Configuration layers a CFG-VALSET is applied to
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CfgLayer: u8 {
        const RAM = 0b001;
        const BBR = 0b010;
        const FLASH = 0b100;
    }
}

impl Default for CfgLayer {
    fn default() -> Self {
        Self::RAM
    }
}

/// Which parts of the receiver state survive a [build_reset_with] command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetType {
    /// The fastest, clears only the SV data.
    Hot,

    /// Clears the ephemeris.
    Warm,

    /// Clears everything. This takes the longest.
    Cold,
}

impl ResetType {
    /// navBbrMask field of UBX-CFG-RST
    pub const fn nav_bbr_mask(self) -> u16 {
        match self {
            ResetType::Hot => 0x0000,
            ResetType::Warm => 0x0001,
            ResetType::Cold => 0xffff,
        }
    }
}

/// Dynamic platform model, value of `NAVSPG-DYNMODEL`
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynamicModel {
    #[default]
    Portable = 0,
    Stationary = 2,
    Pedestrian = 3,
    Automotive = 4,
    Sea = 5,
    AirborneWithLess1gAcceleration = 6,
    AirborneWithLess2gAcceleration = 7,
    AirborneWithLess4gAcceleration = 8,
    /// not supported before protocol version 18
    WristWornWatch = 9,
    Bike = 10,
}

/// One argument of a CFG-VALSET key/value list.
///
/// Names are resolved through the configuration-key table, raw bytes are
/// copied as they are and a single byte stands for a one-byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfgArg<'a> {
    Bytes(&'a [u8]),
    Byte(u8),
    Name(&'a str),
    Key(KeyId),
}

impl CfgArg<'_> {
    fn extend_into(&self, payload: &mut Vec<u8>) -> Result<(), BuildError> {
        match self {
            CfgArg::Bytes(bytes) => payload.extend_from_slice(bytes),
            CfgArg::Byte(byte) => payload.push(*byte),
            CfgArg::Name(name) => {
                let key: CfgKey = name.parse()?;
                payload.extend_from_slice(&key.key_id().to_le_bytes());
            },
            CfgArg::Key(key) => payload.extend_from_slice(&key.to_le_bytes()),
        }
        Ok(())
    }
}

impl<'a> From<&'a [u8]> for CfgArg<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        CfgArg::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for CfgArg<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        CfgArg::Bytes(bytes)
    }
}

impl From<u8> for CfgArg<'_> {
    fn from(byte: u8) -> Self {
        CfgArg::Byte(byte)
    }
}

impl<'a> From<&'a str> for CfgArg<'a> {
    fn from(name: &'a str) -> Self {
        CfgArg::Name(name)
    }
}

impl From<KeyId> for CfgArg<'_> {
    fn from(key: KeyId) -> Self {
        CfgArg::Key(key)
    }
}

impl From<CfgKey> for CfgArg<'_> {
    fn from(key: CfgKey) -> Self {
        CfgArg::Key(key.key_id())
    }
}

/// Frame `payload` as a UBX message: sync chars, class, id, little-endian
/// length, payload and Fletcher checksum over class..payload
pub fn build_ubx_command(class: u8, msg_id: u8, payload: &[u8]) -> Result<Vec<u8>, BuildError> {
    let length =
        u16::try_from(payload.len()).map_err(|_| BuildError::PayloadTooLong(payload.len()))?;

    let frame = encode_frame(class, msg_id, length, payload);
    debug!(
        "Built UBX command class 0x{:02x} id 0x{:02x}, {} payload bytes",
        class,
        msg_id,
        payload.len()
    );
    Ok(frame)
}

/// UBX-CFG-RST with an all-zero payload: hot start, hardware reset
pub fn build_reset() -> Vec<u8> {
    cfg_rst(&[0; 4])
}

/// UBX-CFG-RST performing a controlled software reset of the given kind
pub fn build_reset_with(reset: ResetType) -> Vec<u8> {
    const CONTROLLED_SOFTWARE_RESET: u8 = 0x01;
    let [mask_lo, mask_hi] = reset.nav_bbr_mask().to_le_bytes();
    cfg_rst(&[mask_lo, mask_hi, CONTROLLED_SOFTWARE_RESET, 0x00])
}

/// UBX-CFG-VALSET applied to the RAM layer.
///
/// `args` alternate between keys and values, see [CfgArg]. Fails on an odd
/// number of arguments or a name missing from the key table.
pub fn build_set_values<'a, I, A>(args: I) -> Result<Vec<u8>, BuildError>
where
    I: IntoIterator<Item = A>,
    A: Into<CfgArg<'a>>,
{
    build_set_values_in(CfgLayer::default(), args)
}

/// UBX-CFG-VALSET applied to `layers`
pub fn build_set_values_in<'a, I, A>(layers: CfgLayer, args: I) -> Result<Vec<u8>, BuildError>
where
    I: IntoIterator<Item = A>,
    A: Into<CfgArg<'a>>,
{
    let args: Vec<CfgArg<'a>> = args.into_iter().map(Into::into).collect();
    if args.len() % 2 != 0 {
        return Err(BuildError::OddArgumentCount(args.len()));
    }

    let mut payload = Vec::with_capacity(4 + args.len() * KeyId::SIZE);
    payload.extend_from_slice(&[CFG_VALSET_VERSION, layers.bits(), 0x00, 0x00]);
    for arg in &args {
        arg.extend_into(&mut payload)?;
    }
    build_ubx_command(CFG_CLASS, CFG_VALSET_ID, &payload)
}

/// Set each named output key to 1
pub fn enable_sentences(names: &[&str]) -> Result<Vec<u8>, BuildError> {
    set_outputs(names, 1)
}

/// Set each named output key to 0
pub fn disable_sentences(names: &[&str]) -> Result<Vec<u8>, BuildError> {
    set_outputs(names, 0)
}

/// Turn on every message output the key table knows about
pub fn enable_all() -> Result<Vec<u8>, BuildError> {
    set_all_outputs(1)
}

/// Turn off every message output the key table knows about
pub fn disable_all() -> Result<Vec<u8>, BuildError> {
    set_all_outputs(0)
}

pub fn build_dynamic_model(model: DynamicModel) -> Result<Vec<u8>, BuildError> {
    build_set_values([
        CfgArg::from(CfgKey::NavspgDynmodel),
        CfgArg::Byte(model as u8),
    ])
}

fn set_outputs(names: &[&str], rate: u8) -> Result<Vec<u8>, BuildError> {
    build_set_values(
        names
            .iter()
            .flat_map(|name| [CfgArg::Name(*name), CfgArg::Byte(rate)]),
    )
}

fn set_all_outputs(rate: u8) -> Result<Vec<u8>, BuildError> {
    build_set_values(
        CfgKey::ALL
            .iter()
            .filter(|key| key.is_msg_output())
            .flat_map(|key| [CfgArg::from(*key), CfgArg::Byte(rate)]),
    )
}

pub(crate) fn encode_frame(class: u8, msg_id: u8, length: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(UBX_SYNC_SIZE + UBX_FRAME_OVERHEAD + payload.len());
    frame.extend_from_slice(&[UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2, class, msg_id]);
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(payload);

    let mut calc = UbxChecksumCalc::new();
    calc.update(&frame[UBX_SYNC_SIZE..]);
    let (ck_a, ck_b) = calc.result();
    frame.extend_from_slice(&[ck_a, ck_b]);
    frame
}

fn cfg_rst(payload: &[u8; 4]) -> Vec<u8> {
    debug!("Built UBX-CFG-RST {:02x?}", payload);
    encode_frame(CFG_CLASS, CFG_RST_ID, 4, payload)
}
