use crate::error::ParserError;

/// UBX [Fletcher-16 checksum](https://en.wikipedia.org/wiki/Fletcher%27s_checksum) calculator supporting both streaming and single-shot validation
#[derive(Debug, Default, Clone, Copy)]
pub struct UbxChecksumCalc {
    ck_a: u8,
    ck_b: u8,
}

impl UbxChecksumCalc {
    pub const fn new() -> Self {
        Self { ck_a: 0, ck_b: 0 }
    }

    /// Update checksum with new bytes
    pub const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub const fn update_byte(&mut self, byte: u8) {
        self.ck_a = self.ck_a.wrapping_add(byte);
        self.ck_b = self.ck_b.wrapping_add(self.ck_a);
    }

    /// Get the current checksum result
    pub const fn result(self) -> (u8, u8) {
        (self.ck_a, self.ck_b)
    }

    /// Validate checksum and return result
    pub const fn validate_result(
        self,
        received_ck_a: u8,
        received_ck_b: u8,
    ) -> Result<(), ParserError> {
        if self.is_valid(received_ck_a, received_ck_b) {
            Ok(())
        } else {
            Err(ParserError::InvalidChecksum {
                expect: u16::from_le_bytes([received_ck_a, received_ck_b]),
                got: u16::from_le_bytes([self.ck_a, self.ck_b]),
            })
        }
    }

    const fn is_valid(&self, received_ck_a: u8, received_ck_b: u8) -> bool {
        self.ck_a == received_ck_a && self.ck_b == received_ck_b
    }
}

/// The checksum is calculated over the packet, starting and including the CLASS field,
/// up until, but excluding, the Checksum Field.
/// So slice should start with the class id. Returns `(ck_a, ck_b)`.
pub const fn ubx_checksum(data: &[u8]) -> (u8, u8) {
    let mut calc = UbxChecksumCalc::new();
    calc.update(data);
    calc.result()
}

/// NMEA 0183 checksum: XOR of every character strictly between `$` and `*`
#[derive(Debug, Default, Clone, Copy)]
pub struct NmeaChecksumCalc {
    value: u8,
}

impl NmeaChecksumCalc {
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.value = bytes.iter().fold(self.value, |acc, b| acc ^ b);
    }

    pub const fn result(self) -> u8 {
        self.value
    }

    pub const fn validate_result(self, received: u8) -> Result<(), ParserError> {
        if self.value == received {
            Ok(())
        } else {
            Err(ParserError::InvalidNmeaChecksum {
                expect: received,
                got: self.value,
            })
        }
    }
}

/// Checksum of a sentence body, the text between `$` and `*`
pub fn nmea_checksum(body: &[u8]) -> u8 {
    let mut calc = NmeaChecksumCalc::new();
    calc.update(body);
    calc.result()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK_LEN: u8 = 2;
    const VALID_CK_A: u8 = 0x11;
    const VALID_CK_B: u8 = 0x38;
    // UBX-ACK-ACK packet: Class=0x05, ID=0x01, Length=0x0002, Payload=[0x04, 0x05], Checksum=[0x11, 0x38]
    const VALID_UBX_PACKET: [u8; 10] = [
        crate::constants::UBX_SYNC_CHAR_1,
        crate::constants::UBX_SYNC_CHAR_2, // Sync chars (not included in checksum)
        0x05,
        0x01, // Class and Message ID
        PACK_LEN,
        0x00, // Length (2 bytes)
        0x04,
        0x05, // Payload
        VALID_CK_A,
        VALID_CK_B, // Checksum
    ];

    #[test]
    fn test_streaming_checksum_valid() {
        let mut calc = UbxChecksumCalc::new();
        calc.update(&VALID_UBX_PACKET[2..8]);
        assert!(calc
            .validate_result(VALID_UBX_PACKET[8], VALID_UBX_PACKET[9])
            .is_ok());
    }

    #[test]
    fn test_streaming_checksum_invalid() {
        let mut packet = VALID_UBX_PACKET;
        packet[9] = packet[9].wrapping_add(1);
        let mut calc = UbxChecksumCalc::new();
        calc.update(&packet[2..8]);

        let result = calc.validate_result(packet[8], packet[9]);
        assert_eq!(
            result,
            Err(ParserError::InvalidChecksum {
                expect: 0x3911,
                got: 0x3811
            })
        );
    }

    #[test]
    fn test_streaming_checksum_incremental() {
        let mut calc = UbxChecksumCalc::new();
        for byte in &VALID_UBX_PACKET[2..8] {
            calc.update_byte(*byte);
        }
        assert_eq!(calc.result(), (VALID_CK_A, VALID_CK_B));
    }

    #[test]
    fn test_streaming_checksum_chunks() {
        let mut calc = UbxChecksumCalc::new();
        calc.update(&VALID_UBX_PACKET[2..4]); // Class and ID
        calc.update(&VALID_UBX_PACKET[4..6]); // Length
        calc.update(&VALID_UBX_PACKET[6..8]); // Payload
        assert_eq!(calc.validate_result(VALID_CK_A, VALID_CK_B), Ok(()));
    }

    #[test]
    fn test_single_shot_matches_streaming() {
        assert_eq!(
            ubx_checksum(&VALID_UBX_PACKET[2..8]),
            (VALID_CK_A, VALID_CK_B)
        );
    }

    #[test]
    fn test_cfg_rst_checksum() {
        // CFG-RST with an all-zero payload
        assert_eq!(
            ubx_checksum(&[0x06, 0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]),
            (0x0e, 0x64)
        );
    }

    #[test]
    fn test_accumulators_wrap() {
        let (ck_a, ck_b) = ubx_checksum(&[0xff, 0xff, 0xff]);
        assert_eq!(ck_a, 0xfd);
        // 0xff + 0xfe + 0xfd = 0x2fa
        assert_eq!(ck_b, 0xfa);
    }

    #[test]
    fn test_const_checksum_computation() {
        const CK: (u8, u8) = ubx_checksum(&[0x05, 0x01, PACK_LEN, 0x00, 0x04, 0x05]);
        assert_eq!(CK, (VALID_CK_A, VALID_CK_B));
    }

    #[test]
    fn test_nmea_checksum_known_sentence() {
        let body = b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
        assert_eq!(nmea_checksum(body), 0x47);
    }

    #[test]
    fn test_nmea_checksum_empty_body() {
        assert_eq!(nmea_checksum(b""), 0);
    }

    #[test]
    fn test_nmea_validate_mismatch() {
        let mut calc = NmeaChecksumCalc::new();
        calc.update(b"GNTXT");
        let got = calc.result();
        assert_eq!(
            calc.validate_result(got ^ 0x01),
            Err(ParserError::InvalidNmeaChecksum {
                expect: got ^ 0x01,
                got
            })
        );
    }
}
