pub mod calendar;
pub mod clock;

pub use calendar::{Calendar, SystemCalendar};
pub use clock::{Clock, MonotonicClock};

/// String key-value persistence (the on-device storage port).
///
/// Values are opaque serialized documents; a missing key reads as `None`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;
    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn remove(&mut self, key: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
