pub const UBX_SYNC_CHAR_1: u8 = 0xb5;
pub const UBX_SYNC_CHAR_2: u8 = 0x62;
pub(crate) const UBX_SYNC_SIZE: usize = 2;
pub(crate) const UBX_PAYLOAD_SIZE_LEN: usize = 2;
pub(crate) const UBX_CLASS_LEN: usize = 1;
pub(crate) const UBX_ID_LEN: usize = 1;
/// Class, id and the length field; the sync chars are not part of a collected frame
pub(crate) const UBX_FRAME_HEADER_LEN: usize = UBX_CLASS_LEN + UBX_ID_LEN + UBX_PAYLOAD_SIZE_LEN;
pub(crate) const UBX_CHECKSUM_LEN: usize = 2;
/// Everything of a frame (sync chars excluded) that is not payload
pub(crate) const UBX_FRAME_OVERHEAD: usize = UBX_FRAME_HEADER_LEN + UBX_CHECKSUM_LEN;

pub(crate) const UBX_CLASS_OFFSET: usize = 0;
pub(crate) const UBX_MSG_ID_OFFSET: usize = 1; // After CLASS
pub(crate) const UBX_LENGTH_OFFSET: usize = 2; // After MSG_ID

pub const NMEA_SYNC_CHAR: u8 = 0x24; // '$'
pub const NMEA_CHECKSUM_DELIMITER: u8 = 0x2a; // '*'
pub const NMEA_END_CHAR_1: u8 = 0x0d; // '\r' (<CR>)
pub const NMEA_END_CHAR_2: u8 = 0x0a; // '\n' (<LF>)
pub(crate) const NMEA_TALKER_ID_LEN: usize = 2;
pub(crate) const NMEA_SENTENCE_TYPE_LEN: usize = 3;
/// Talker id + sentence type
pub(crate) const NMEA_HEADER_LEN: usize = NMEA_TALKER_ID_LEN + NMEA_SENTENCE_TYPE_LEN;
/// Default character expected after `$`, GNSS talkers (GP, GL, GA, GB, GN) all start with it
pub const NMEA_DEFAULT_TALKER_PREFIX: u8 = b'G';
/// Longest sentence NMEA 0183 allows, `$` through <CR><LF>
pub const NMEA_MAX_SENTENCE_LEN: usize = 82;

pub const CFG_CLASS: u8 = 0x06;
pub const CFG_RST_ID: u8 = 0x04;
pub const CFG_VALSET_ID: u8 = 0x8a;
pub(crate) const CFG_VALSET_VERSION: u8 = 0x00;
