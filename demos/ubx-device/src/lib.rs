use std::{
    io::{self, Read, Write},
    time::{Duration, Instant},
};

use anyhow::Context;
use log::{debug, info, warn};

pub mod cli;
pub use ubx_receiver;
use ubx_receiver::{
    build_dynamic_model, build_reset, build_reset_with, build_set_values, disable_all,
    disable_sentences, enable_all, enable_sentences, CfgArg, DynamicModel, Message, Parser,
    ParserConfig, ResetType,
};

const ACK_CLASS: u8 = 0x05;
const ACK_NAK_ID: u8 = 0x00;
const ACK_ACK_ID: u8 = 0x01;

pub trait MessageHandler {
    fn handle(&mut self, _msg: Message) {}
}

/// Implement handler for simple callbacks / closures
impl<F: FnMut(Message)> MessageHandler for F {
    fn handle(&mut self, msg: Message) {
        self(msg)
    }
}

/// Outcome of waiting for the receiver to acknowledge a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Ack,
    Nak,
    TimedOut,
}

/// A receiver behind anything readable and writable, usually a serial port.
///
/// The port is released when the device is dropped.
pub struct Device<T: Read + Write = Box<dyn serialport::SerialPort>> {
    port: T,
    parser: Parser,
}

impl<T: Read + Write> Device<T> {
    pub fn new(port: T) -> Device<T> {
        Self::with_parser_config(port, ParserConfig::default())
    }

    pub fn with_parser_config(port: T, config: ParserConfig) -> Device<T> {
        Device {
            port,
            parser: Parser::new(config),
        }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Drop any partially received frame, e.g. after the link was interrupted
    pub fn reset_parser(&mut self) {
        self.parser.reset();
    }

    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.port.write_all(data)
    }

    /// Write a complete command and flush it to the receiver
    pub fn send(&mut self, command: &[u8]) -> io::Result<()> {
        debug!("Sending {} bytes", command.len());
        self.port.write_all(command)?;
        self.port.flush()
    }

    pub fn on_data_available<F: FnMut(Message)>(&mut self, mut callback: F) -> io::Result<()> {
        self.process(&mut callback)
    }

    /// Read and decode everything the port has to offer right now.
    ///
    /// Returns once a read yields no data; malformed frames are logged and skipped.
    pub fn process(&mut self, handler: &mut impl MessageHandler) -> io::Result<()> {
        loop {
            const READ_CHUNK_LEN: usize = 1240;
            let mut local_buf = [0; READ_CHUNK_LEN];
            let nbytes = self.read_port(&mut local_buf)?;
            if nbytes == 0 {
                break;
            }

            for result in self.parser.consume(&local_buf[..nbytes]) {
                match result {
                    Ok(msg) => handler.handle(msg),
                    Err(e) => warn!("Malformed frame, ignore it; cause {e}"),
                }
            }
        }
        Ok(())
    }

    /// Plain UBX-CFG-RST with an all-zero payload
    pub fn reset(&mut self) -> io::Result<()> {
        info!("Resetting receiver");
        self.send(&build_reset())
    }

    pub fn reset_with(&mut self, reset: ResetType) -> io::Result<()> {
        info!("Resetting receiver ({reset:?} start)");
        self.send(&build_reset_with(reset))
    }

    /// Send a UBX-CFG-VALSET built from alternating keys and values
    pub fn set_values<'a, I, A>(&mut self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<CfgArg<'a>>,
    {
        let command = build_set_values(args).context("Invalid configuration values")?;
        self.send(&command)?;
        Ok(())
    }

    pub fn enable(&mut self, names: &[&str]) -> anyhow::Result<()> {
        let command = enable_sentences(names)
            .with_context(|| format!("Cannot enable {}", names.join(", ")))?;
        self.send(&command)?;
        Ok(())
    }

    pub fn disable(&mut self, names: &[&str]) -> anyhow::Result<()> {
        let command = disable_sentences(names)
            .with_context(|| format!("Cannot disable {}", names.join(", ")))?;
        self.send(&command)?;
        Ok(())
    }

    pub fn enable_all(&mut self) -> anyhow::Result<()> {
        self.send(&enable_all()?)?;
        Ok(())
    }

    pub fn disable_all(&mut self) -> anyhow::Result<()> {
        self.send(&disable_all()?)?;
        Ok(())
    }

    pub fn set_dynamic_model(&mut self, model: DynamicModel) -> anyhow::Result<()> {
        self.send(&build_dynamic_model(model)?)?;
        Ok(())
    }

    /// Wait for UBX-ACK-ACK or UBX-ACK-NAK of the command `class`/`msg_id`.
    ///
    /// Every other message received meanwhile goes to `handler`.
    pub fn wait_for_ack(
        &mut self,
        class: u8,
        msg_id: u8,
        timeout: Duration,
        handler: &mut impl MessageHandler,
    ) -> io::Result<Ack> {
        let start = Instant::now();
        let mut ack = None;
        while ack.is_none() {
            self.on_data_available(|msg| match acknowledged(&msg, class, msg_id) {
                Some(result) => ack = Some(result),
                None => handler.handle(msg),
            })?;

            if ack.is_none() && start.elapsed() > timeout {
                warn!("Did not receive ACK message for request 0x{class:02x} 0x{msg_id:02x}");
                return Ok(Ack::TimedOut);
            }
        }
        Ok(ack.unwrap_or(Ack::TimedOut))
    }

    /// Reads the serial port, converting timeouts into "no data received"
    fn read_port(&mut self, output: &mut [u8]) -> io::Result<usize> {
        match self.port.read(output) {
            Ok(b) => Ok(b),
            Err(e) => {
                if e.kind() == io::ErrorKind::TimedOut {
                    Ok(0)
                } else {
                    Err(e)
                }
            },
        }
    }
}

impl<T: Read + Write> Drop for Device<T> {
    fn drop(&mut self) {
        if let Err(e) = self.port.flush() {
            warn!("Could not flush port on close: {e}");
        }
        debug!("Device closed");
    }
}

fn acknowledged(msg: &Message, class: u8, msg_id: u8) -> Option<Ack> {
    let ubx = msg.as_ubx()?;
    if ubx.class() != ACK_CLASS || ubx.payload() != [class, msg_id] {
        return None;
    }
    match ubx.msg_id() {
        ACK_ACK_ID => Some(Ack::Ack),
        ACK_NAK_ID => Some(Ack::Nak),
        _ => None,
    }
}
