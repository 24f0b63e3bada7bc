#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse errors and validation errors are fine; panics are not.
    let Ok(cfg) = barista_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_ok() {
        // A validated config must always convert into engine defaults.
        let defaults = barista_core::BrewDefaults::try_from(&cfg);
        assert!(defaults.is_ok(), "validated config rejected: {defaults:?}");
    }
});
