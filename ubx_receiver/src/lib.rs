//! # ubx_receiver
//!
//! Framing for u-blox GNSS receivers that interleave binary UBX messages and
//! ASCII NMEA sentences on one serial link: checksums, a stream parser that
//! delimits and verifies frames, and a builder for outbound UBX commands.
//!
//! Opening the port and moving bytes is left to the caller. The
//! `demos/ubx-device` crate of this repository shows a serial port wrapper.
//!
//! Parsing
//! =======
//!
//! Feed whatever bytes are available to a [Parser]; one result comes out per
//! completed frame, in stream order, while incomplete frames are kept until
//! the next call:
//! ```
//! use ubx_receiver::{Message, Parser};
//!
//! let mut parser = Parser::default();
//! let my_raw_data = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
//! for result in parser.consume(my_raw_data) {
//!     match result {
//!         Ok(Message::Nmea(sentence)) => assert_eq!(sentence.sentence_type(), "GGA"),
//!         Ok(Message::Ubx(_)) => {},
//!         Err(failure) => {
//!             // Malformed frame, the parser already moved on
//!             let _ = failure.error;
//!         },
//!     }
//! }
//! ```
//!
//! Building commands
//! =================
//!
//! ```
//! let reset = ubx_receiver::build_reset();
//! assert_eq!(&reset[..4], &[0xb5, 0x62, 0x06, 0x04]);
//!
//! let enable = ubx_receiver::enable_sentences(&["GGA_UART1", "RMC_UART1"]).unwrap();
//! assert_eq!(&enable[2..4], &[0x06, 0x8a]);
//! ```
//!
//! no_std Support
//! ==============
//!
//! Without the default `std` feature the crate only needs `alloc`; the
//! `std::error::Error` impls are the only thing that goes away.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    builder::{
        build_dynamic_model, build_reset, build_reset_with, build_set_values,
        build_set_values_in, build_ubx_command, disable_all, disable_sentences, enable_all,
        enable_sentences, CfgArg, CfgLayer, DynamicModel, ResetType,
    },
    error::{BuildError, DecodeFailure, ParserError},
    message::{Message, NmeaMessage, UbxMessage},
    parser::{
        checksum::{nmea_checksum, ubx_checksum, NmeaChecksumCalc, UbxChecksumCalc},
        ParseResult, Parser, ParserConfig, ParserIter, ParserState,
    },
    registry::{
        class_name, lookup_cfg_key, msg_name, CfgKey, KeyId, StorageSize, UbxClassEntry,
        UBX_CLASSES, UNKNOWN_NAME,
    },
};

mod builder;
pub mod constants;
mod error;
mod message;
mod parser;
pub mod registry;
