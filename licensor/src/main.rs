//! License Key Manager
//!
//! Issues and checks hardware-bound license keys.
//!
//! Usage:
//!   license-manager init [--config licensor.json]
//!   license-manager generate [--config licensor.json] [--mac AA:BB:..] [--output license.json]
//!   license-manager verify [--license license.json] [--mac AA:BB:..]
//!   license-manager namespace
//!
//! Without `--mac`, the identifier is read from the `br-lan` interface or the
//! first active non-loopback interface.
//!
//! Exit status: 0 on success or a VALID license, 1 for an INVALID license,
//! 2 when the command fails (unreadable or garbled files, no identifier).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hwlicense_cli::{
    DEFAULT_CONFIG, DEFAULT_LICENSE, exit_status, generate_license, init_config, new_namespace,
    resolve_device_id, verify_license,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "license-manager")]
#[command(about = "License Key Manager")]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize licensor configuration with new keys
    Init {
        /// Configuration file path
        #[arg(long, env = "LICENSOR_CONFIG", default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Generate a license key for a device
    Generate {
        /// Configuration file path
        #[arg(long, env = "LICENSOR_CONFIG", default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// MAC address (detected automatically if not provided)
        #[arg(long)]
        mac: Option<String>,

        /// Output license file
        #[arg(long, default_value = DEFAULT_LICENSE)]
        output: PathBuf,
    },

    /// Verify a license key
    Verify {
        /// License file to verify
        #[arg(long, default_value = DEFAULT_LICENSE)]
        license: PathBuf,

        /// MAC address to check (detected automatically if not provided)
        #[arg(long)]
        mac: Option<String>,
    },

    /// Generate a new namespace UUID
    Namespace,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = run(cli.command);
    if let Err(err) = &outcome {
        eprintln!("Error: {err:#}");
    }
    ExitCode::from(exit_status(&outcome))
}

/// Runs one command. `Ok(false)` means `verify` found an INVALID license.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Init { config } => {
            let keypair = init_config(&config)?;
            println!("License issuer configuration initialized successfully.");
            println!("Configuration saved to: {}", config.display());
            println!("Namespace UUID: {}", keypair.namespace());
            println!("Public Key: {}", keypair.public_key_hex());
            println!(
                "\nKeep your private key secure. It will be needed to generate valid license keys."
            );
        }
        Command::Generate { config, mac, output } => {
            let device_id = resolve_device_id(mac)?;
            let record = generate_license(&config, &device_id, &output)?;
            println!("License generated successfully:");
            println!("  Device ID: {}", record.device_id);
            println!("  Device UUID: {}", record.device_uuid);
            println!("  License Key: {}", record.license_key);
            println!("  License file saved to: {}", output.display());
        }
        Command::Verify { license, mac } => {
            let device_id = resolve_device_id(mac)?;
            let report = verify_license(&license, &device_id)?;
            println!("MAC Address: {}", report.device_id);
            println!("Device UUID: {}", report.device_uuid);
            if !report.valid {
                println!("License verification: INVALID");
                return Ok(false);
            }
            println!("License verification: VALID");
        }
        Command::Namespace => {
            let namespace = new_namespace()?;
            println!("Generated new namespace UUID:");
            println!("{namespace}");
        }
    }

    Ok(true)
}

/// Logs go to stderr so command output stays scriptable. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
