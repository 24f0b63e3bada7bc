use barista_config::{DrinkCfg, RoastScaleCfg, load_toml};
use rstest::rstest;

#[test]
fn empty_config_uses_defaults_and_validates() {
    let cfg = load_toml("").expect("parse TOML");
    cfg.validate().expect("defaults should pass");
    assert_eq!(cfg.brew.default_dose_g, 18.0);
    assert_eq!(cfg.brew.target_ratio, 2.0);
    assert_eq!(cfg.brew.default_roast_level, 3);
    assert_eq!(cfg.brew.roast_scale, RoastScaleCfg::FiveLevel);
    assert_eq!(cfg.smart.default_drink, DrinkCfg::Espresso);
    assert_eq!(cfg.storage.history_cap, 50);
    assert_eq!(cfg.maintenance.filter_overdue_days, 90);
    assert!(cfg.window.is_none());
}

#[test]
fn accepts_full_config() {
    let toml = r#"
[brew]
default_dose_g = 20.0
target_ratio = 2.2
roast_scale = "three_category"
default_roast_level = 4

[window]
min_s = 25
max_s = 32

[smart]
default_drink = "lungo"

[storage]
data_dir = "/tmp/barista"
history_cap = 20

[maintenance]
filter_overdue_days = 60

[logging]
file = "barista.log"
level = "debug"
rotation = "daily"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.brew.roast_scale, RoastScaleCfg::ThreeCategory);
    assert_eq!(cfg.smart.default_drink, DrinkCfg::Lungo);
    let w = cfg.window.expect("window present");
    assert_eq!((w.min_s, w.max_s), (25.0, 32.0));
}

#[rstest]
#[case("[brew]\ndefault_dose_g = 0.0", "default_dose_g must be > 0")]
#[case("[brew]\ntarget_ratio = -1.0", "target_ratio must be > 0")]
#[case("[brew]\ndefault_roast_level = 6", "default_roast_level must be in [1, 5]")]
#[case("[brew]\ndefault_roast_level = 0", "default_roast_level must be in [1, 5]")]
#[case("[window]\nmin_s = 0\nmax_s = 30", "window.min_s must be > 0")]
#[case("[window]\nmin_s = 25\nmax_s = -3", "window.max_s must be > 0")]
#[case("[window]\nmin_s = 31\nmax_s = 30", "window.min_s must be <= window.max_s")]
#[case("[storage]\nhistory_cap = 0", "history_cap must be >= 1")]
#[case("[maintenance]\nfilter_overdue_days = 0", "filter_overdue_days must be >= 1")]
#[case("[logging]\nrotation = \"weekly\"", "rotation must be one of")]
fn rejects_invalid_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject");
    assert!(
        format!("{err}").contains(needle),
        "expected '{needle}' in '{err}'"
    );
}

#[test]
fn unknown_roast_scale_fails_to_parse() {
    assert!(load_toml("[brew]\nroast_scale = \"seven_level\"").is_err());
}
