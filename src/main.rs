use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Arg, Command};

use upswatch::core::config::Config;
use upswatch::core::monitor::{MonitorRuntime, UpsDevice};
use upswatch::init_logging;

fn main() -> Result<()> {
    let matches = Command::new("upswatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("UPS power monitor with SMS alerting over SNMP")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to the configuration file"),
        )
        .subcommand(Command::new("check").about("Query the UPS once and print the reading"))
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    if matches.subcommand_matches("check").is_some() {
        // One-shot query: log to stderr regardless of the file sink
        init_logging(None)?;
        return check_once(&config);
    }

    init_logging(config.log_file.as_deref())?;
    run_service(config)
}

fn run_service(config: Config) -> Result<()> {
    log::info!("Service started.");

    let runtime = MonitorRuntime::new(Arc::new(config))?;

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .context("Failed to install Ctrl-C handler")?;

    stop_rx
        .recv()
        .context("Shutdown channel closed unexpectedly")?;

    runtime.shutdown();
    log::info!("Service stopped.");
    Ok(())
}

fn check_once(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let device = UpsDevice::new(config.ups_addr(), config.snmp_community.clone());
    let reading = runtime.block_on(device.query())?;

    println!("power source: {}", reading.power_source);
    match reading.battery_minutes {
        Some(minutes) => println!("battery minutes remaining: {}", minutes),
        None => println!("battery minutes remaining: unknown"),
    }
    Ok(())
}
