use ubx_receiver::{Message, ParseResult, Parser, ParserConfig, ParserError, ParserIter, ParserState};

macro_rules! my_vec {
        ($($x:expr),*) => {{
            let v: Vec<Result<(u8, u8), ParserError>> =  vec![$($x),*];
            v
        }}
    }

fn extract_only_ack_ack(it: ParserIter) -> Vec<Result<(u8, u8), ParserError>> {
    let mut ret = vec![];
    for pack in it {
        match pack {
            Ok(Message::Ubx(msg)) if msg.class() == 0x05 && msg.msg_id() == 0x01 => {
                let payload = msg.payload();
                ret.push(Ok((payload[0], payload[1])));
            },
            Err(failure) => ret.push(Err(failure.error)),
            _ => panic!(),
        }
    }
    ret
}

fn collect(parser: &mut Parser, data: &[u8]) -> Vec<ParseResult> {
    parser.consume(data).collect()
}

static FULL_ACK_ACK_PACK: [u8; 10] = [0xb5, 0x62, 0x5, 0x1, 0x2, 0x0, 0x6, 0x1, 0xf, 0x38];

const GNGGA: &[u8] =
    b"$GNGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,,*45\r\n";

#[test]
fn test_parse_empty_buffer() {
    let mut parser = Parser::default();
    assert!(parser.is_buffer_empty());
    assert_eq!(my_vec![], extract_only_ack_ack(parser.consume(&[])));
    assert!(parser.is_buffer_empty());
    assert_eq!(parser.state(), ParserState::Idle);
}

#[test]
fn test_parse_ack_ack_byte_by_byte() {
    let mut parser = Parser::default();
    for b in FULL_ACK_ACK_PACK.iter().take(FULL_ACK_ACK_PACK.len() - 1) {
        assert_eq!(my_vec![], extract_only_ack_ack(parser.consume(&[*b])));
    }
    assert_eq!(parser.buffer_len(), FULL_ACK_ACK_PACK.len() - 3);
    let last_byte = FULL_ACK_ACK_PACK[FULL_ACK_ACK_PACK.len() - 1];
    assert_eq!(
        my_vec![Ok((6, 1))],
        extract_only_ack_ack(parser.consume(&[last_byte])),
    );
    assert!(parser.is_buffer_empty());
}

#[test]
fn test_parse_ack_ack_in_one_go() {
    let mut parser = Parser::default();
    assert_eq!(
        my_vec![Ok((6, 1))],
        extract_only_ack_ack(parser.consume(&FULL_ACK_ACK_PACK)),
    );
    assert!(parser.is_buffer_empty());
}

#[test]
fn test_parse_ack_ack_bad_checksum() {
    let mut parser = Parser::default();
    let mut bad_pack = FULL_ACK_ACK_PACK;
    bad_pack[bad_pack.len() - 3] = 5;
    assert_eq!(
        my_vec![Err(ParserError::InvalidChecksum {
            expect: 0x380f,
            got: 0x3c13
        })],
        extract_only_ack_ack(parser.consume(&bad_pack)),
    );
    assert_eq!(0, parser.buffer_len());

    let mut two_packs = FULL_ACK_ACK_PACK.to_vec();
    two_packs.extend_from_slice(&FULL_ACK_ACK_PACK);
    assert_eq!(
        my_vec![Ok((6, 1)), Ok((6, 1))],
        extract_only_ack_ack(parser.consume(&two_packs)),
    );
    assert_eq!(0, parser.buffer_len());
}

#[test]
fn test_parse_ack_ack_split_across_chunks() {
    let mut parser = Parser::default();
    for split in 1..FULL_ACK_ACK_PACK.len() {
        let (first, second) = FULL_ACK_ACK_PACK.split_at(split);
        assert_eq!(my_vec![], extract_only_ack_ack(parser.consume(first)));
        assert_eq!(
            my_vec![Ok((6, 1))],
            extract_only_ack_ack(parser.consume(second)),
        );
    }
}

#[test]
fn test_parse_garbage_before_and_after() {
    let mut data = vec![0x00, 0xb5, 0x00, 0x62, 0x24, 0x47];
    data.extend_from_slice(&[0xff; 3]);
    data.extend_from_slice(&FULL_ACK_ACK_PACK);
    data.extend_from_slice(&[0x01, 0x02, 0xb5]);

    let mut parser = Parser::default();
    // "$G" starts a sentence that swallows the bytes up to the next line feed
    let results = collect(&mut parser, &data);
    assert!(results.is_empty());
    assert_eq!(parser.state(), ParserState::CollectingNmea);

    parser.reset();
    let data = &data[6..];
    assert_eq!(
        my_vec![Ok((6, 1))],
        extract_only_ack_ack(parser.consume(data)),
    );
    assert_eq!(parser.state(), ParserState::Idle);
}

#[test]
fn test_parse_nmea_sentence() {
    let mut parser = Parser::default();
    let results = collect(&mut parser, GNGGA);
    assert_eq!(results.len(), 1);
    let Ok(Message::Nmea(sentence)) = &results[0] else {
        panic!("Expected an NMEA sentence, got {:?}", results[0]);
    };
    assert_eq!(sentence.talker_id(), "GN");
    assert_eq!(sentence.sentence_type(), "GGA");
    assert_eq!(sentence.field(0), Some("092725.00"));
    assert_eq!(sentence.checksum(), "45");
}

#[test]
fn test_parse_nmea_bad_checksum_then_good() {
    let mut bad = GNGGA.to_vec();
    let star = bad.iter().position(|b| *b == b'*').unwrap();
    bad[star + 2] = b'C';
    bad.extend_from_slice(GNGGA);

    let mut parser = Parser::default();
    let results = collect(&mut parser, &bad);
    assert_eq!(results.len(), 2);
    let Err(failure) = &results[0] else {
        panic!("Expected a decode failure");
    };
    assert_eq!(
        failure.error,
        ParserError::InvalidNmeaChecksum {
            expect: 0x4c,
            got: 0x45
        }
    );
    assert_eq!(failure.raw, bad[1..GNGGA.len()].to_vec());
    assert!(results[1].is_ok());
}

#[test]
fn test_interleaved_ubx_and_nmea() {
    let mut data = vec![];
    for _ in 0..3 {
        data.extend_from_slice(GNGGA);
        data.extend_from_slice(&FULL_ACK_ACK_PACK);
    }

    let mut parser = Parser::default();
    let kinds: Vec<&str> = collect(&mut parser, &data)
        .iter()
        .map(|res| match res {
            Ok(Message::Ubx(_)) => "ubx",
            Ok(Message::Nmea(_)) => "nmea",
            Err(_) => "err",
        })
        .collect();
    assert_eq!(kinds, ["nmea", "ubx", "nmea", "ubx", "nmea", "ubx"]);
}

#[test]
fn test_non_gnss_talker_needs_config() {
    let txt = b"$BDTXT,01,01,02,hello*3E\r\n";

    let mut parser = Parser::default();
    assert!(collect(&mut parser, txt).is_empty());

    let mut parser = Parser::new(ParserConfig::new().with_nmea_talker_prefix(None));
    let results = collect(&mut parser, txt);
    assert!(matches!(&results[..], [Ok(Message::Nmea(s))] if s.talker_id() == "BD"));

    let mut parser = Parser::new(ParserConfig::new().with_nmea_talker_prefix(Some(b'B')));
    assert_eq!(collect(&mut parser, txt).len(), 1);
    assert!(collect(&mut parser, GNGGA).is_empty());
}

#[test]
fn test_proprietary_sentence_is_reported_not_truncated() {
    let pubx = b"$PUBX,00,081350.00,4717.113210,N*5B\r\n";
    let mut parser = Parser::new(ParserConfig::new().with_nmea_talker_prefix(None));
    let mut data = pubx.to_vec();
    data.extend_from_slice(GNGGA);

    let results = collect(&mut parser, &data);
    assert_eq!(results.len(), 2);
    let Err(failure) = &results[0] else {
        panic!("Expected a decode failure, got {:?}", results[0]);
    };
    assert_eq!(
        failure.error,
        ParserError::InvalidSentence("missing header delimiter")
    );
    // Nothing of the sentence is lost
    assert_eq!(failure.raw, pubx[1..].to_vec());
    assert!(matches!(&results[1], Ok(Message::Nmea(s)) if s.sentence_type() == "GGA"));
}

#[test]
fn test_max_payload_len() {
    let mut parser = Parser::new(ParserConfig::new().with_max_payload_len(1));
    let results = collect(&mut parser, &FULL_ACK_ACK_PACK);
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].as_ref().unwrap_err().error,
        ParserError::PayloadTooLong {
            declared: 2,
            max: 1
        }
    );
    // Payload and checksum of the rejected frame are skipped as noise
    assert_eq!(parser.state(), ParserState::Idle);

    let mut parser = Parser::new(ParserConfig::new().with_max_payload_len(2));
    assert_eq!(
        my_vec![Ok((6, 1))],
        extract_only_ack_ack(parser.consume(&FULL_ACK_ACK_PACK)),
    );
}

#[test]
fn test_parse_ack_ack_with_display() {
    let mut parser = Parser::default();
    let results = collect(&mut parser, &FULL_ACK_ACK_PACK);
    assert_eq!(
        results[0].as_ref().unwrap().to_string(),
        "UBX-ACK-ACK (class: 0x05, id: 0x01, payload length: 2)"
    );
}
