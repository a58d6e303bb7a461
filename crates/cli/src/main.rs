//! stickctl - Extreme 3D Pro inspection CLI
//!
//! Lists HID devices, prints one normalized joystick sample, or streams a
//! summary line for every fresh report.

#![deny(static_mut_refs)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hidapi::HidApi;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flight_stick_hid_extreme3d_protocol::ids;
use openstick_extreme3d::{Extreme3d, OpenOptions};
use openstick_hid_common::HidDeviceInfo;

#[derive(Parser)]
#[command(name = "stickctl")]
#[command(about = "Inspect a Logitech Extreme 3D Pro joystick over HID")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OpenArgs {
    /// Vendor ID (hex, e.g. 0x046D)
    #[arg(long, value_parser = parse_hex_u16, default_value = "0x046D")]
    vid: u16,

    /// Product ID (hex, e.g. 0xC215)
    #[arg(long, value_parser = parse_hex_u16, default_value = "0xC215")]
    pid: u16,

    /// Open by serial number instead of the first VID/PID match
    #[arg(long)]
    serial: Option<String>,

    /// Open by platform device path (wins over --serial)
    #[arg(long)]
    path: Option<String>,

    /// How long the initial blocking read may wait, in milliseconds
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// List all connected HID devices
    List,
    /// Print one normalized sample and exit
    Read(OpenArgs),
    /// Poll and print a summary line for every fresh report
    Watch {
        #[command(flatten)]
        open: OpenArgs,

        /// Stop after this many seconds (0 = run until interrupted)
        #[arg(long, default_value = "0")]
        duration: u64,
    },
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(s, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}

fn open_device(api: &HidApi, args: &OpenArgs) -> Result<Extreme3d> {
    let mut options = OpenOptions::new()
        .vendor_id(args.vid)
        .product_id(args.pid)
        .init_timeout(Duration::from_millis(args.timeout_ms));
    if let Some(serial) = &args.serial {
        options = options.serial(serial.clone());
    }
    if let Some(path) = &args.path {
        options = options.path(path.clone());
    }
    Extreme3d::open(api, options).with_context(|| {
        format!(
            "failed to open joystick VID=0x{:04X} PID=0x{:04X}",
            args.vid, args.pid
        )
    })
}

fn list_devices(api: &HidApi, json: bool) -> Result<()> {
    let devices: Vec<HidDeviceInfo> = api
        .device_list()
        .map(|dev| {
            let mut info = HidDeviceInfo::new(dev.vendor_id(), dev.product_id())
                .with_path(dev.path().to_string_lossy());
            if let Some(serial) = dev.serial_number() {
                info = info.with_serial(serial);
            }
            if let Some(product) = dev.product_string() {
                info = info.with_product(product);
            }
            info
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No HID devices found.");
        return Ok(());
    }
    println!("{:<8} {:<8} {:<26} Product", "VID", "PID", "Serial");
    println!("{}", "-".repeat(72));
    for info in &devices {
        let marker = if info.matches(ids::LOGITECH_VENDOR_ID, ids::EXTREME_3D_PRO_PRODUCT_ID) {
            " *"
        } else {
            ""
        };
        println!(
            "{:<8} {:<8} {:<26} {}{marker}",
            format!("0x{:04X}", info.vendor_id),
            format!("0x{:04X}", info.product_id),
            info.serial_number.as_deref().unwrap_or("(none)"),
            info.label(),
        );
    }
    Ok(())
}

fn read_once(api: &HidApi, args: &OpenArgs, json: bool) -> Result<()> {
    let device = open_device(api, args)?;
    if json {
        let input = device.input();
        let value = serde_json::json!({
            "device": device.device_info(),
            "stick": { "x": input.stick.0, "y": input.stick.1 },
            "hat": { "x": input.hat.x, "y": input.hat.y },
            "twist": input.twist,
            "slider": input.slider,
            "buttons": device.pressed_buttons(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", device.summary());
    }
    Ok(())
}

fn watch(api: &HidApi, args: &OpenArgs, duration_secs: u64) -> Result<()> {
    let mut device = open_device(api, args)?;
    info!(device = %device.device_info().label(), "watching for input reports");
    println!("{}", device.summary());

    let start = Instant::now();
    let deadline = Duration::from_secs(duration_secs);
    loop {
        if duration_secs != 0 && start.elapsed() >= deadline {
            return Ok(());
        }
        if device.update()? {
            println!("{}", device.summary());
        } else {
            // No report pending; yield briefly
            std::thread::sleep(Duration::from_millis(1));
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let api = HidApi::new().context("failed to initialize HID backend")?;

    match &cli.command {
        Commands::List => list_devices(&api, cli.json),
        Commands::Read(args) => read_once(&api, args, cli.json),
        Commands::Watch { open, duration } => watch(&api, open, *duration),
    }
}
