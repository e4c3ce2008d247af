// crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, Command};
use mcsync_config::{
    Credentials, LocalLayout, SyncSettings, TargetsFile, DEFAULT_TARGETS_FILE,
};
use mcsync_sync_engine::{
    FlatMapping, FtpRemote, MappingStrategy, StructuredMapping, SyncConfig, SyncEngine,
    SyncReport, SyncTarget,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod progress;

use progress::ConsoleReporter;

fn build_cli() -> Command {
    Command::new("mcsync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Syncs memory card images between a MemCard PRO 2 and this machine")
        .arg(
            Arg::new("ftp_host")
                .short('f')
                .long("ftp-host")
                .value_name("HOST")
                .help("Address of the card's FTP server, host or host:port")
                .required(true),
        )
        .arg(
            Arg::new("local")
                .short('l')
                .long("local")
                .value_name("DIR")
                .help("Local directory the card images sync into")
                .default_value("."),
        )
        .arg(
            Arg::new("targets")
                .short('t')
                .long("targets")
                .value_name("FILE")
                .help("File listing the card images to sync, in order")
                .default_value(DEFAULT_TARGETS_FILE),
        )
        .arg(
            Arg::new("flat")
                .long("flat")
                .help("Use the legacy flat local naming layout")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("plain")
                .long("plain")
                .help("Plain output: summary lines only, no progress bar")
                .action(clap::ArgAction::SetTrue),
        )
}

fn read_settings(matches: &clap::ArgMatches) -> Result<SyncSettings> {
    let ftp_host = matches
        .get_one::<String>("ftp_host")
        .cloned()
        .unwrap_or_default();

    let local = matches.get_one::<String>("local").cloned().unwrap_or_else(|| ".".to_string());
    let local_root = std::path::absolute(Path::new(&local))
        .with_context(|| format!("could not resolve local directory {local}"))?;

    let targets_file = matches
        .get_one::<String>("targets")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGETS_FILE));

    let layout = if matches.get_flag("flat") {
        LocalLayout::Flat
    } else {
        LocalLayout::Structured
    };

    Ok(SyncSettings {
        ftp_host,
        local_root,
        targets_file,
        layout,
        plain_output: matches.get_flag("plain"),
    })
}

fn strategy_for(layout: LocalLayout) -> Box<dyn MappingStrategy> {
    match layout {
        LocalLayout::Structured => Box::new(StructuredMapping),
        LocalLayout::Flat => Box::new(FlatMapping),
    }
}

async fn run() -> Result<SyncReport> {
    let matches = build_cli().get_matches();
    let settings = read_settings(&matches)?;
    settings.validate()?;

    // Credentials are a precondition: fail before anything touches the
    // network.
    let credentials = Credentials::from_env()?;

    let target_list = TargetsFile::load(&settings.targets_file)?;
    let strategy = strategy_for(settings.layout);
    let targets = SyncTarget::build_all(
        &target_list.targets,
        &settings.local_root,
        strategy.as_ref(),
    )
    .context("target list validation failed")?;

    if targets.is_empty() {
        println!("Nothing to sync: the target list is empty");
        return Ok(SyncReport::default());
    }

    let mut remote = FtpRemote::connect(
        &settings.ftp_host,
        &credentials.user,
        &credentials.password,
    )
    .await
    .with_context(|| format!("could not open FTP session to {}", settings.ftp_host))?;

    // Ctrl-C flips the flag; the engine stops after the current chunk.
    let cancel = Arc::new(AtomicBool::new(false));
    let interrupt_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, stopping");
            interrupt_flag.store(true, Ordering::Relaxed);
        }
    });

    let reporter = ConsoleReporter::new(settings.plain_output);
    let engine = SyncEngine::new(SyncConfig::default());
    let report = engine.run(&mut remote, &targets, &reporter, &cancel).await;

    // The session closes on every exit path; engine errors never escape
    // its run loop.
    remote.close().await;

    if report.cancelled {
        println!("Sync cancelled");
    }
    if report.failed > 0 {
        println!("{} target(s) failed; see messages above", report.failed);
    }
    println!("Finished in {:.3}s", report.duration.as_secs_f64());

    Ok(report)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(report) if report.failed == 0 && !report.cancelled => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Failed to sync: {err:#}");
            ExitCode::from(2)
        }
    }
}
