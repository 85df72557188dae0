use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{value_parser, Arg, ArgAction, ArgMatches};
use log::{info, warn};
use ubx_device::{
    cli::{Command, CommandBuilder},
    Ack, Device,
};
use ubx_receiver::{
    constants::{CFG_CLASS, CFG_VALSET_ID},
    DynamicModel, Message, ResetType,
};

const ACK_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .format_timestamp(None)
        .format_target(false)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let cli = CommandBuilder::default()
        .build()
        .about(clap::crate_description!())
        .name(clap::crate_name!())
        .author(clap::crate_authors!())
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_parser(["text", "json"])
                .default_value("text")
                .help("How decoded messages are printed"),
        )
        .subcommand(
            clap::Command::new("reset")
                .about("Reset the receiver before streaming")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["hot", "warm", "cold"])
                        .help("Controlled software reset of this kind instead of the plain reset"),
                ),
        )
        .subcommand(
            clap::Command::new("enable")
                .about("Enable output of the given configuration keys, e.g. GGA_UART1")
                .arg(Arg::new("keys").required(true).action(ArgAction::Append)),
        )
        .subcommand(
            clap::Command::new("disable")
                .about("Disable output of the given configuration keys, e.g. GSV_UART1")
                .arg(Arg::new("keys").required(true).action(ArgAction::Append)),
        )
        .subcommand(clap::Command::new("enable-all").about("Enable every known message output"))
        .subcommand(
            clap::Command::new("disable-all").about("Disable every known message output"),
        )
        .subcommand(
            clap::Command::new("dynmodel")
                .about("Set the dynamic platform model")
                .arg(
                    Arg::new("model")
                        .required(true)
                        .value_parser(value_parser!(String))
                        .help("portable, stationary, pedestrian, automotive, sea, airborne1g, airborne2g, airborne4g, wrist or bike"),
                ),
        )
        .get_matches();

    let format = match cli.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    let port = Command::serialport(&cli)?;
    let mut device = Device::with_parser_config(port, Command::parser_config(&cli));

    let mut print = |msg: Message| print_message(&msg, format);
    apply_subcommand(&mut device, &cli, &mut print)?;

    info!("Opened u-blox receiver, waiting for messages...");
    loop {
        device
            .on_data_available(&mut print)
            .context("Reading from the receiver failed")?;
    }
}

fn apply_subcommand(
    device: &mut Device,
    cli: &ArgMatches,
    print: &mut impl FnMut(Message),
) -> Result<()> {
    match cli.subcommand() {
        Some(("reset", sub)) => {
            match sub.get_one::<String>("type").map(|s| s.as_str()) {
                Some("hot") => device.reset_with(ResetType::Hot)?,
                Some("warm") => device.reset_with(ResetType::Warm)?,
                Some("cold") => device.reset_with(ResetType::Cold)?,
                _ => device.reset()?,
            }
            // No ACK for a reset, the receiver restarts instead
            return Ok(());
        },
        Some(("enable", sub)) => device.enable(&keys(sub))?,
        Some(("disable", sub)) => device.disable(&keys(sub))?,
        Some(("enable-all", _)) => device.enable_all()?,
        Some(("disable-all", _)) => device.disable_all()?,
        Some(("dynmodel", sub)) => {
            let name = sub.get_one::<String>("model").map(|s| s.as_str());
            device.set_dynamic_model(parse_dynamic_model(name.unwrap_or_default())?)?
        },
        _ => return Ok(()),
    }

    match device.wait_for_ack(CFG_CLASS, CFG_VALSET_ID, ACK_TIMEOUT, print)? {
        Ack::Ack => info!("Configuration accepted"),
        Ack::Nak => warn!("Configuration rejected by the receiver"),
        Ack::TimedOut => warn!("No answer to the configuration request"),
    }
    Ok(())
}

fn keys(sub: &ArgMatches) -> Vec<&str> {
    sub.get_many::<String>("keys")
        .map(|keys| keys.map(|s| s.as_str()).collect())
        .unwrap_or_default()
}

fn parse_dynamic_model(name: &str) -> Result<DynamicModel> {
    let model = match name {
        "portable" => DynamicModel::Portable,
        "stationary" => DynamicModel::Stationary,
        "pedestrian" => DynamicModel::Pedestrian,
        "automotive" => DynamicModel::Automotive,
        "sea" => DynamicModel::Sea,
        "airborne1g" => DynamicModel::AirborneWithLess1gAcceleration,
        "airborne2g" => DynamicModel::AirborneWithLess2gAcceleration,
        "airborne4g" => DynamicModel::AirborneWithLess4gAcceleration,
        "wrist" => DynamicModel::WristWornWatch,
        "bike" => DynamicModel::Bike,
        other => bail!("Unknown dynamic model '{other}'"),
    };
    Ok(model)
}

fn print_message(msg: &Message, format: OutputFormat) {
    let now = Utc::now();
    match format {
        OutputFormat::Text => println!("{} {msg}", now.format("%H:%M:%S%.3f")),
        OutputFormat::Json => {
            let record = serde_json::json!({
                "time": now.to_rfc3339(),
                "message": msg,
            });
            println!("{record}");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_model_names() {
        assert_eq!(
            parse_dynamic_model("automotive").unwrap(),
            DynamicModel::Automotive
        );
        assert!(parse_dynamic_model("submarine").is_err());
    }
}
