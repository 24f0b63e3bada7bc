#![no_main]
use barista_core::{DrinkType, RoastLevel, calculate_dial_in, calculate_smart_dial_in};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (f64, f64, f64, u8, u8)| {
    let (dose, yield_g, time, roast, drink) = input;
    let Ok(level) = RoastLevel::try_from(roast % 5 + 1) else {
        return;
    };
    if let Some(r) = calculate_dial_in(dose, yield_g, time, level) {
        assert!(r.target_min <= r.target_max);
        // Finite inputs can still overflow to an infinite ratio; it is never rounded.
        assert_eq!(r.ratio, yield_g / dose);
    }
    let drink = match drink % 3 {
        0 => DrinkType::Ristretto,
        1 => DrinkType::Espresso,
        _ => DrinkType::Lungo,
    };
    if let Some(r) = calculate_smart_dial_in(drink, level, time) {
        assert!(r.deviation_pct >= 0.0);
    }
});
