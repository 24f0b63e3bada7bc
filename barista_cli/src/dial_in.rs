//! `dial-in` and `smart` commands: input resolution, shot timing, and reporting.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use barista_core::{
    BrewDefaults, BrewMeasurement, DialInError, DialInResult, DrinkType, RoastCategory,
    RoastDescriptor, RoastLevel, SmartDialInResult, Stopwatch, TargetWindow, extraction_window,
    resolve_window, try_dial_in, try_smart_dial_in,
};
use barista_store::{FileStore, Repository};
use barista_traits::{Clock, MonotonicClock};
use crossbeam_channel as xch;
use serde_json::json;

use crate::cli::CategoryArg;
use crate::output::{emit, timestamp_ms};

/// Arguments of `dial-in` after clap parsing.
pub struct DialInArgs {
    pub dose: Option<f64>,
    pub yield_g: Option<f64>,
    pub time: f64,
    pub roast: Option<u8>,
    pub category: Option<CategoryArg>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub no_save: bool,
}

/// Roast named on the command line, if any.
fn flag_roast(
    roast: Option<u8>,
    category: Option<CategoryArg>,
) -> Result<Option<RoastDescriptor>, DialInError> {
    if let Some(n) = roast {
        return Ok(Some(RoastLevel::try_from(n)?.into()));
    }
    Ok(category.map(|c| RoastCategory::from(c).into()))
}

pub fn run_dial_in(
    repo: &mut Repository<FileStore>,
    defaults: &BrewDefaults,
    args: DialInArgs,
) -> eyre::Result<()> {
    let prefill = repo.settings()?.prefill(defaults);
    let m = BrewMeasurement::new(
        args.dose.unwrap_or(prefill.dose_g),
        args.yield_g.unwrap_or(prefill.yield_g),
        args.time,
    );
    m.validate()?;

    // Explicit window, then explicit roast, then config override / active bean / default.
    let window = if let (Some(min), Some(max)) = (args.min, args.max) {
        TargetWindow::new(min, max)?
    } else if let Some(roast) = flag_roast(args.roast, args.category)? {
        extraction_window(roast)
    } else {
        let bean_roast = repo.active_bean()?.and_then(|b| b.roast_descriptor());
        resolve_window(defaults, bean_roast)
    };
    tracing::debug!(min = window.min_s(), max = window.max_s(), "window resolved");

    let result = try_dial_in(&m, window)?;
    let saved = if args.no_save {
        None
    } else {
        Some(repo.record_dial_in(&m, &result)?)
    };

    emit(
        json!({
            "timestamp": timestamp_ms(),
            "dose": m.dose_g,
            "yield": m.yield_g,
            "time": m.time_s,
            "ratio": result.ratio,
            "target_min": result.target_min,
            "target_max": result.target_max,
            "feedback": result.feedback,
            "message": result.message,
            "advice": result.advice,
            "saved_id": saved.as_ref().map(|r| r.id),
        }),
        || print_dial_in(&m, &result),
    );
    Ok(())
}

fn print_dial_in(m: &BrewMeasurement, r: &DialInResult) {
    println!(
        "{:.1} g in, {:.1} g out, {:.1} s (ratio 1:{:.2})",
        m.dose_g, m.yield_g, m.time_s, r.ratio
    );
    println!("Target window: {:.0}-{:.0} s", r.target_min, r.target_max);
    println!("{}", r.message);
    if !r.advice.is_empty() {
        println!("Advice: {}", r.advice);
    }
}

/// Arguments of `smart` after clap parsing.
pub struct SmartArgs {
    pub drink: Option<DrinkType>,
    pub roast: Option<u8>,
    pub time: Option<f64>,
}

pub fn run_smart(
    repo: &Repository<FileStore>,
    defaults: &BrewDefaults,
    args: SmartArgs,
    shutdown: Arc<AtomicBool>,
) -> eyre::Result<()> {
    let drink = args.drink.unwrap_or(defaults.default_drink);
    let roast = match args.roast {
        Some(n) => RoastLevel::try_from(n)?,
        None => repo
            .active_bean()?
            .and_then(|b| b.roast_level)
            .unwrap_or(defaults.roast_level),
    };
    let time = match args.time {
        Some(t) => t,
        None => time_shot(Stopwatch::new(MonotonicClock::new()), &shutdown)?,
    };

    let result = try_smart_dial_in(drink, roast, time)?;
    emit(
        json!({
            "timestamp": timestamp_ms(),
            "drink_type": result.drink_type,
            "roast_level": result.roast_level,
            "target_time": result.target_time,
            "actual_time": result.actual_time,
            "deviation_pct": result.deviation_pct,
            "feedback": result.feedback,
            "message": result.message,
            "advice": result.advice,
        }),
        || print_smart(&result),
    );
    Ok(())
}

fn print_smart(r: &SmartDialInResult) {
    println!(
        "{} at roast {}: target {:.0} s, actual {:.1} s ({:.1}% off)",
        r.drink_type, r.roast_level, r.target_time, r.actual_time, r.deviation_pct
    );
    println!("{}", r.message);
    if !r.advice.is_empty() {
        println!("Advice: {}", r.advice);
    }
}

/// Drive the stopwatch from stdin: Enter starts, Enter stops. Ctrl-C or EOF cancels.
fn time_shot<C: Clock>(watch: Stopwatch<C>, shutdown: &AtomicBool) -> eyre::Result<f64> {
    let (tx, rx) = xch::bounded::<()>(1);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            if line.is_err() || tx.send(()).is_err() {
                break;
            }
        }
    });

    eprintln!("Press Enter to start the shot timer...");
    run_presses(watch, &rx, shutdown)
}

/// First press starts the watch, second press stops it and returns the time.
fn run_presses<C: Clock>(
    mut watch: Stopwatch<C>,
    presses_rx: &xch::Receiver<()>,
    shutdown: &AtomicBool,
) -> eyre::Result<f64> {
    let mut presses = 0u8;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            eyre::bail!("timing cancelled by signal");
        }
        match presses_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(()) => {
                presses += 1;
                if presses == 1 {
                    watch.start();
                    tracing::info!("stopwatch started");
                    eprintln!("Timing... press Enter to stop.");
                } else if let Some(t) = watch.stop() {
                    eprintln!();
                    tracing::info!(elapsed_s = t, "stopwatch stopped");
                    return Ok(t);
                }
            }
            Err(xch::RecvTimeoutError::Timeout) => {
                if presses == 1 {
                    eprint!("\r{:6.1} s", watch.elapsed_s());
                }
            }
            Err(xch::RecvTimeoutError::Disconnected) => {
                eyre::bail!("timing cancelled: input closed before the stopwatch was stopped");
            }
        }
    }
}
