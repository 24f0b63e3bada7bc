//! Records the application persists around the dial-in engine.
//!
//! Everything here is plain data plus small pure helpers; storage lives in
//! `barista_store`.

pub mod bean;
pub mod history;
pub mod maintenance;
pub mod recipe;
pub mod settings;

pub use bean::{
    BeanPatch, FLAVOR_TAGS, NewBean, SavedBean, group_by_roaster, insert_roastery, price_per_kg,
};
pub use history::{DEFAULT_HISTORY_CAP, DialInRecord, HistoryLog};
pub use maintenance::{DEFAULT_FILTER_OVERDUE_DAYS, MaintenanceDates, MaintenanceTask};
pub use recipe::{DrinkRecipe, MilkType, Person, RECIPE_DRINKS};
pub use settings::{GeneralSettings, Prefill};
