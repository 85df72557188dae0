#[macro_use]
extern crate afl;
extern crate ubx_receiver;

use ubx_receiver::{constants::NMEA_MAX_SENTENCE_LEN, Message, Parser, ParserConfig};

fn parse(max_payload_len: u16, chunksize: usize, data: &[u8]) {
    let config = ParserConfig::new()
        .with_max_payload_len(max_payload_len)
        .with_max_sentence_len(NMEA_MAX_SENTENCE_LEN)
        .with_nmea_talker_prefix(None);
    let mut parser = Parser::new(config);
    for chunk in data.chunks(chunksize) {
        for result in parser.consume(chunk) {
            match result {
                Ok(Message::Ubx(msg)) => {
                    assert!(msg.length() <= max_payload_len);
                    assert_eq!(usize::from(msg.length()), msg.payload().len());
                },
                Ok(Message::Nmea(sentence)) => {
                    assert_eq!(sentence.talker_id().len(), 2);
                    assert_eq!(sentence.sentence_type().len(), 3);
                    assert!(sentence.fields().len() < NMEA_MAX_SENTENCE_LEN);
                },
                Err(_) => {
                    // The stream might contain any of a variety of errors
                },
            }
        }
    }

    // Whatever frame the data left unfinished is abandoned
    parser.reset();
    let ack_ack = [0xb5, 0x62, 0x5, 0x1, 0x2, 0x0, 0x4, 0x5, 0x11, 0x38];
    let mut it = parser.consume(&ack_ack);
    match it.next() {
        Some(Ok(Message::Ubx(msg))) => {
            assert_eq!((msg.class(), msg.msg_id()), (0x05, 0x01));
        },
        _ => panic!(),
    }
    assert!(it.next().is_none());
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 3 {
            // At least room for the ACK-ACK probe
            let max_payload_len = u16::from_le_bytes([data[0], data[1]]).max(2);
            let chunksize = data[2] as usize;
            if chunksize != 0 {
                parse(max_payload_len, chunksize, &data[3..]);
            }
        }
    });
}
