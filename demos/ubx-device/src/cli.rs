use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches};
use serialport::{FlowControl as SerialFlowControl, SerialPort};
use std::time::Duration;
use ubx_receiver::ParserConfig;

pub struct CommandBuilder {
    command: clap::Command,
}

pub struct Command;

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuilder {
    pub fn new() -> Self {
        let command = clap::Command::new("u-blox receiver device arguments")
            .about("Talks UBX and NMEA to a u-blox receiver on a serial port")
            .arg_required_else_help(true)
            .arg(
                Arg::new("port")
                    .value_name("port")
                    .short('p')
                    .long("port")
                    .required(true)
                    .help("Serial port to open to connect to the receiver"),
            )
            .arg(
                Arg::new("baud")
                    .value_name("baud")
                    .short('s')
                    .long("baud")
                    .required(false)
                    .default_value("9600")
                    .value_parser(value_parser!(u32))
                    .help("Baud rate for the selected port"),
            )
            .arg(
                Arg::new("stop-bits")
                    .long("stop-bits")
                    .help("Number of stop bits for the selected port")
                    .required(false)
                    .value_parser(["1", "2"])
                    .default_value("1"),
            )
            .arg(
                Arg::new("data-bits")
                    .long("data-bits")
                    .help("Number of data bits for the selected port")
                    .required(false)
                    .value_parser(["7", "8"])
                    .default_value("8"),
            )
            .arg(
                Arg::new("parity")
                    .long("parity")
                    .help("Parity to use for selected port")
                    .required(false)
                    .value_parser(["even", "odd"]),
            )
            .arg(
                Arg::new("any-talker")
                    .long("any-talker")
                    .action(clap::ArgAction::SetTrue)
                    .help("Pick up NMEA sentences of every talker, not only GNSS ones ($G...)"),
            )
            .arg(
                Arg::new("max-payload")
                    .long("max-payload")
                    .required(false)
                    .value_parser(value_parser!(u16))
                    .help("Drop UBX frames declaring a longer payload"),
            )
            .arg(
                Arg::new("max-sentence")
                    .long("max-sentence")
                    .required(false)
                    .value_parser(value_parser!(usize))
                    .help("Drop NMEA sentences longer than this (82 per NMEA 0183)"),
            );
        Self { command }
    }

    pub fn build(&self) -> clap::Command {
        self.command.clone()
    }
}

impl Command {
    pub fn arg_baud(cli: &ArgMatches) -> u32 {
        cli.get_one::<u32>("baud").cloned().unwrap_or(9600)
    }

    pub fn serialport(cli: &ArgMatches) -> Result<Box<dyn SerialPort>> {
        let port = cli
            .get_one::<String>("port")
            .context("Expected required 'port' cli argument")?;

        let baud = Self::arg_baud(cli);
        let stop_bits = match cli.get_one::<String>("stop-bits").map(|s| s.as_str()) {
            Some("2") => serialport::StopBits::Two,
            _ => serialport::StopBits::One,
        };
        let data_bits = match cli.get_one::<String>("data-bits").map(|s| s.as_str()) {
            Some("7") => serialport::DataBits::Seven,
            _ => serialport::DataBits::Eight,
        };
        let parity = match cli.get_one::<String>("parity").map(|s| s.as_str()) {
            Some("odd") => serialport::Parity::Odd,
            Some("even") => serialport::Parity::Even,
            _ => serialport::Parity::None,
        };

        let builder = serialport::new(port, baud)
            .stop_bits(stop_bits)
            .data_bits(data_bits)
            .timeout(Duration::from_millis(10))
            .parity(parity)
            .flow_control(SerialFlowControl::None);

        log::debug!("{:?}", &builder);
        builder
            .open()
            .with_context(|| format!("Failed to open port: {}", port))
    }

    pub fn parser_config(cli: &ArgMatches) -> ParserConfig {
        let mut config = ParserConfig::new();
        if cli.get_flag("any-talker") {
            config = config.with_nmea_talker_prefix(None);
        }
        if let Some(max) = cli.get_one::<u16>("max-payload") {
            config = config.with_max_payload_len(*max);
        }
        if let Some(max) = cli.get_one::<usize>("max-sentence") {
            config = config.with_max_sentence_len(*max);
        }
        config
    }
}
