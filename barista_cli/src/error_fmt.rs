//! Human-readable error descriptions, exit codes, and structured JSON errors.

use barista_core::{DialInError, InputField, RecordError};
use barista_store::StoreError;

pub const EXIT_GENERIC: i32 = 1;
pub const EXIT_INSUFFICIENT_INPUT: i32 = 3;
pub const EXIT_INVALID_VALUE: i32 = 4;
pub const EXIT_STORE: i32 = 5;
pub const EXIT_NOT_FOUND: i32 = 6;

fn humanize_dial_in(e: &DialInError) -> String {
    match e {
        DialInError::InsufficientInput(field) => {
            let fix = match field {
                InputField::Dose => "Pass a positive --dose in grams (e.g. `--dose 18`).",
                InputField::Yield => "Pass --yield as a number of grams (e.g. `--yield 36`).",
                InputField::Time => "Pass a positive --time in seconds, or stop the stopwatch after starting it.",
                InputField::TargetMin | InputField::TargetMax => {
                    "Give both --min and --max as positive seconds, or fix [window] in the config."
                }
            };
            format!(
                "What happened: Not enough data to classify the shot ({field} must be a positive number).\nLikely causes: A field was left at zero, negative, or not a number.\nHow to fix: {fix}"
            )
        }
        DialInError::RoastLevelOutOfRange(v) => format!(
            "What happened: Roast level {v} is not on the 1-5 scale.\nLikely causes: A typo, or a level from a different roast scale.\nHow to fix: Use 1 (lightest) through 5 (darkest), or --category light|medium|dark."
        ),
        DialInError::InvertedWindow { min, max } => format!(
            "What happened: The target window is inverted (min {min}s > max {max}s).\nLikely causes: --min and --max swapped, or [window] misconfigured.\nHow to fix: Make min_s <= max_s."
        ),
    }
}

fn humanize_record(e: &RecordError) -> String {
    format!(
        "What happened: The record was rejected ({e}).\nLikely causes: A required name was blank or a number was negative.\nHow to fix: Fill in the field and try again."
    )
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(de) = err.downcast_ref::<DialInError>() {
        return humanize_dial_in(de);
    }
    if let Some(re) = err.downcast_ref::<RecordError>() {
        return humanize_record(re);
    }
    if let Some(se) = err.downcast_ref::<StoreError>() {
        return match se {
            StoreError::NotFound { kind, id } => format!(
                "What happened: No {kind} with id {id}.\nLikely causes: The id was mistyped or the {kind} was removed.\nHow to fix: List the saved records to find the right id."
            ),
            StoreError::Record(re) => humanize_record(re),
            other => format!(
                "What happened: Could not read or write saved data ({other}).\nLikely causes: The data directory is not writable or the disk is full.\nHow to fix: Check --data-dir / storage.data_dir and its permissions."
            ),
        };
    }

    // String-based heuristics for errors coming from config or CSV loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("bean csv must have headers") {
        return "Invalid headers in bean CSV. Expected 'roaster,bean,grind,roast_level'.".to_string();
    }

    if lower.contains("invalid configuration") || lower.contains("parse config") {
        return format!(
            "What happened: Configuration is invalid.\nLikely causes: Out-of-range values or a typo in the TOML.\nHow to fix: Edit the config file and try again. Detail: {}",
            err.root_cause()
        );
    }

    if lower.contains("timing cancelled") {
        return "What happened: The shot timer was cancelled.\nLikely causes: Ctrl-C, or input closed before the stopwatch was stopped.\nHow to fix: Run again and press Enter to start and stop, or pass --time.".to_string();
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes; usage errors (2) are produced by clap before we get here.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(de) = err.downcast_ref::<DialInError>() {
        return if de.is_insufficient_input() {
            EXIT_INSUFFICIENT_INPUT
        } else {
            EXIT_INVALID_VALUE
        };
    }
    if err.downcast_ref::<RecordError>().is_some() {
        return EXIT_INVALID_VALUE;
    }
    if let Some(se) = err.downcast_ref::<StoreError>() {
        return match se {
            StoreError::NotFound { .. } => EXIT_NOT_FOUND,
            StoreError::Record(_) => EXIT_INVALID_VALUE,
            _ => EXIT_STORE,
        };
    }
    EXIT_GENERIC
}

/// Short machine-readable name for the error class.
pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(de) = err.downcast_ref::<DialInError>() {
        return match de {
            DialInError::InsufficientInput(_) => "InsufficientInput",
            DialInError::RoastLevelOutOfRange(_) => "RoastLevelOutOfRange",
            DialInError::InvertedWindow { .. } => "InvertedWindow",
        };
    }
    if err.downcast_ref::<RecordError>().is_some() {
        return "InvalidRecord";
    }
    if let Some(se) = err.downcast_ref::<StoreError>() {
        return match se {
            StoreError::NotFound { .. } => "NotFound",
            StoreError::Record(_) => "InvalidRecord",
            _ => "Store",
        };
    }
    "Error"
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(DialInError::InsufficientInput(field)) = err.downcast_ref::<DialInError>() {
        return json!({
            "reason": reason_name(err),
            "details": { "field": field.to_string() },
            "message": humanize(err),
        })
        .to_string();
    }
    json!({ "reason": reason_name(err), "message": humanize(err) }).to_string()
}
