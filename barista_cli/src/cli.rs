//! CLI argument definitions and shared statics.

use barista_core::records::{FLAVOR_TAGS, MaintenanceTask, MilkType};
use barista_core::{DrinkType, RoastCategory};
use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[inline]
pub fn json_mode() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

#[derive(Parser, Debug)]
#[command(name = "barista", version, about = "Espresso dial-in assistant")]
pub struct Cli {
    /// Path to config TOML (a missing file means defaults)
    #[arg(long, value_name = "FILE", default_value = "etc/barista.toml")]
    pub config: PathBuf,

    /// Directory holding saved beans, history and settings
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print results and errors as JSON, log as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Legacy roast categories as accepted on the command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CategoryArg {
    Light,
    Medium,
    Dark,
}

impl From<CategoryArg> for RoastCategory {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Light => RoastCategory::Light,
            CategoryArg::Medium => RoastCategory::Medium,
            CategoryArg::Dark => RoastCategory::Dark,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum DrinkArg {
    #[value(alias = "short", alias = "short-shot")]
    Ristretto,
    #[value(alias = "standard", alias = "standard-shot")]
    Espresso,
    #[value(alias = "long", alias = "long-shot")]
    Lungo,
}

impl From<DrinkArg> for DrinkType {
    fn from(d: DrinkArg) -> Self {
        match d {
            DrinkArg::Ristretto => DrinkType::Ristretto,
            DrinkArg::Espresso => DrinkType::Espresso,
            DrinkArg::Lungo => DrinkType::Lungo,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a shot by ratio and extraction window
    DialIn {
        /// Dry coffee in grams (defaults to saved settings, then config)
        #[arg(long, value_name = "GRAMS")]
        dose: Option<f64>,
        /// Liquid espresso in grams (defaults to dose x target ratio)
        #[arg(long = "yield", value_name = "GRAMS")]
        yield_g: Option<f64>,
        /// Extraction time in seconds
        #[arg(long, value_name = "SECS")]
        time: f64,
        /// Roast level 1 (lightest) to 5 (darkest)
        #[arg(long, value_name = "LEVEL", conflicts_with_all = ["category", "min"])]
        roast: Option<u8>,
        /// Legacy three-category roast
        #[arg(long, value_enum, conflicts_with = "min")]
        category: Option<CategoryArg>,
        /// Lower bound of a custom window in seconds
        #[arg(long, value_name = "SECS", requires = "max")]
        min: Option<f64>,
        /// Upper bound of a custom window in seconds
        #[arg(long, value_name = "SECS", requires = "min")]
        max: Option<f64>,
        /// Do not append the result to history
        #[arg(long = "no-save", action = ArgAction::SetTrue)]
        no_save: bool,
    },
    /// Classify a timed shot against the drink's target time
    Smart {
        /// Drink type (defaults to config smart.default_drink)
        #[arg(long, value_enum)]
        drink: Option<DrinkArg>,
        /// Roast level 1..=5 (defaults to active bean, then config)
        #[arg(long, value_name = "LEVEL")]
        roast: Option<u8>,
        /// Measured time in seconds; without it a stopwatch runs (Enter to start/stop)
        #[arg(long, value_name = "SECS")]
        time: Option<f64>,
    },
    /// Show or clear recent dial-in results
    History {
        /// Show at most this many records
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
        /// Delete all history
        #[arg(long, action = ArgAction::SetTrue)]
        clear: bool,
    },
    /// Manage saved beans
    #[command(subcommand)]
    Beans(BeansCmd),
    /// Manage people
    #[command(subcommand)]
    People(PeopleCmd),
    /// Manage a person's drink recipes
    #[command(subcommand)]
    Recipes(RecipesCmd),
    /// Machine maintenance log
    #[command(subcommand)]
    Maintenance(MaintenanceCmd),
    /// General settings (defaults for dose and ratio, machine name)
    #[command(subcommand)]
    Settings(SettingsCmd),
    /// Known roasteries
    #[command(subcommand)]
    Roasteries(RoasteriesCmd),
    /// Health check for operational monitoring
    Health,
}

#[derive(Args, Debug)]
pub struct BeanFields {
    /// Roast level 1..=5
    #[arg(long, value_name = "LEVEL")]
    pub roast: Option<u8>,
    #[arg(long, value_name = "SETTING")]
    pub grind: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Flavor tag (repeatable)
    #[arg(long = "tag", value_name = "TAG", value_parser = PossibleValuesParser::new(FLAVOR_TAGS))]
    pub tags: Vec<String>,
    /// Price paid for the bag
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<f64>,
    /// Bag weight in grams
    #[arg(long, value_name = "GRAMS")]
    pub weight: Option<f64>,
    /// Date the bag was opened (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub opened: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum BeansCmd {
    /// List beans grouped by roaster
    List,
    /// Save a new bean
    Add {
        #[arg(long)]
        roaster: String,
        #[arg(long)]
        bean: String,
        #[command(flatten)]
        fields: BeanFields,
    },
    /// Change fields of a saved bean
    Update {
        id: Uuid,
        #[arg(long)]
        roaster: Option<String>,
        #[arg(long)]
        bean: Option<String>,
        #[command(flatten)]
        fields: BeanFields,
    },
    Remove {
        id: Uuid,
    },
    /// Use this bean's roast for dial-in and smart by default
    Activate {
        id: Uuid,
    },
    /// Import beans from CSV (roaster,bean,grind,roast_level)
    Import {
        #[arg(value_name = "CSV")]
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum PeopleCmd {
    List,
    Add { name: String },
    Remove { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum RecipesCmd {
    /// Add a recipe, or replace it when --id names an existing one
    Set {
        #[arg(long, value_name = "ID")]
        person: Uuid,
        #[arg(long, value_name = "ID")]
        id: Option<Uuid>,
        #[arg(long, default_value = "espresso")]
        drink: String,
        #[arg(long, default_value = "none")]
        milk: MilkType,
        #[arg(long = "milk-ml", value_name = "ML", default_value_t = 0)]
        milk_ml: u32,
        #[arg(long, default_value = "")]
        syrup: String,
        #[arg(long, default_value = "")]
        ice: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Remove {
        #[arg(long, value_name = "ID")]
        person: Uuid,
        #[arg(long, value_name = "ID")]
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum MaintenanceCmd {
    Show,
    /// Record a task as done today
    Done {
        /// group-head | backflush | descaling | water-filter
        task: MaintenanceTask,
    },
    /// Set (or with no date, clear) the last-done date of a task
    Set {
        task: MaintenanceTask,
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCmd {
    Show,
    Set {
        #[arg(long = "machine-name")]
        machine_name: Option<String>,
        #[arg(long = "default-dose", value_name = "GRAMS")]
        default_dose: Option<f64>,
        #[arg(long = "target-ratio", value_name = "RATIO")]
        target_ratio: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoasteriesCmd {
    List,
    Add { name: String },
}
