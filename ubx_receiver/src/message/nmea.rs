use alloc::{
    format,
    string::{String, ToString},
};
use core::{fmt, str::FromStr};

use crate::{
    constants::{NMEA_HEADER_LEN, NMEA_TALKER_ID_LEN},
    error::ParserError,
    parser::checksum::NmeaChecksumCalc,
};

/// A checksum-verified NMEA 0183 sentence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NmeaMessage {
    talker_id: String,
    sentence_type: String,
    fields: String,
    checksum: String,
}

impl NmeaMessage {
    /// Decode one sentence, e.g. `$GNGGA,...*5B\r\n`.
    ///
    /// The leading `$` and the line terminator are optional, so the bytes the
    /// stream parser collects (starting at the talker id) decode as well.
    pub fn from_sentence(data: &[u8]) -> Result<Self, ParserError> {
        let text = core::str::from_utf8(data)
            .map_err(|_| ParserError::InvalidSentence("not valid UTF-8"))?;
        text.parse()
    }

    /// Two character talker id, e.g. `GN`
    pub fn talker_id(&self) -> &str {
        &self.talker_id
    }

    /// Three character sentence type, e.g. `GGA`
    pub fn sentence_type(&self) -> &str {
        &self.sentence_type
    }

    /// Everything between the header comma and the `*`
    pub fn fields(&self) -> &str {
        &self.fields
    }

    /// Comma-separated data fields, empty fields included
    pub fn field_iter(&self) -> impl Iterator<Item = &str> {
        self.fields.split(',')
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.field_iter().nth(index)
    }

    /// Checksum field as received, two hex digits
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn checksum_value(&self) -> u8 {
        // Validated to be two hex digits on construction
        u8::from_str_radix(&self.checksum, 16).unwrap_or_default()
    }

    /// Re-encode the sentence with `$` and `\r\n`
    pub fn to_sentence(&self) -> String {
        format!(
            "${}{},{}*{}\r\n",
            self.talker_id, self.sentence_type, self.fields, self.checksum
        )
    }
}

impl FromStr for NmeaMessage {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sentence = s.strip_prefix('$').unwrap_or(s);
        let sentence = sentence.trim_end_matches(['\r', '\n']);
        let (body, checksum) = sentence
            .split_once('*')
            .ok_or(ParserError::InvalidSentence("missing checksum delimiter"))?;
        if checksum.len() != 2 || !checksum.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParserError::InvalidSentence("malformed checksum field"));
        }
        let expected = u8::from_str_radix(checksum, 16)
            .map_err(|_| ParserError::InvalidSentence("malformed checksum field"))?;

        let mut calc = NmeaChecksumCalc::new();
        calc.update(body.as_bytes());
        calc.validate_result(expected)?;

        if !body.is_ascii() {
            return Err(ParserError::InvalidSentence("non-ASCII characters"));
        }
        if body.len() < NMEA_HEADER_LEN {
            return Err(ParserError::InvalidSentence("header too short"));
        }
        // Address field must be exactly talker id and sentence type, e.g. not `$PUBX,`
        let fields = body[NMEA_HEADER_LEN..]
            .strip_prefix(',')
            .ok_or(ParserError::InvalidSentence("missing header delimiter"))?;

        Ok(Self {
            talker_id: body[..NMEA_TALKER_ID_LEN].to_string(),
            sentence_type: body[NMEA_TALKER_ID_LEN..NMEA_HEADER_LEN].to_string(),
            fields: fields.to_string(),
            checksum: checksum.to_string(),
        })
    }
}

impl fmt::Display for NmeaMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NMEA {}{} [{}] (checksum: {})",
            self.talker_id, self.sentence_type, self.fields, self.checksum
        )
    }
}
