//! Typed access to the documents the app keeps on device.
//!
//! Every collection is a single JSON document under a fixed key. A missing
//! document reads as empty; a corrupt one is logged and also read as empty,
//! so the next write replaces it.

use barista_core::records::{
    BeanPatch, DialInRecord, DrinkRecipe, GeneralSettings, HistoryLog, MaintenanceDates,
    MaintenanceTask, NewBean, Person, SavedBean, insert_roastery,
};
use barista_core::{BrewMeasurement, DialInResult, RetentionCfg};
use barista_traits::{Calendar, KeyValueStore, SystemCalendar};
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{Result, StoreError};

pub const KEY_PEOPLE: &str = "barista-mate-people";
pub const KEY_HISTORY: &str = "barista-mate-dial-in-history";
pub const KEY_BEANS: &str = "barista-mate-saved-beans";
pub const KEY_MAINTENANCE: &str = "barista-mate-maintenance";
pub const KEY_SETTINGS: &str = "barista-mate-settings";
pub const KEY_MACHINE_NAME: &str = "barista-mate-machine-name";
pub const KEY_ROASTERIES: &str = "coffee-roasteries";

pub struct Repository<S: KeyValueStore, K: Calendar = SystemCalendar> {
    store: S,
    calendar: K,
    retention: RetentionCfg,
}

impl<S: KeyValueStore> Repository<S, SystemCalendar> {
    pub fn new(store: S) -> Self {
        Self::with_calendar(store, SystemCalendar)
    }
}

impl<S: KeyValueStore, K: Calendar> Repository<S, K> {
    pub fn with_calendar(store: S, calendar: K) -> Self {
        Self {
            store,
            calendar,
            retention: RetentionCfg::default(),
        }
    }

    pub fn with_retention(mut self, retention: RetentionCfg) -> Self {
        self.retention = retention;
        self
    }

    pub fn retention(&self) -> RetentionCfg {
        self.retention
    }

    pub fn today(&self) -> NaiveDate {
        self.calendar.today()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &'static str) -> Result<T> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Ok(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored document is corrupt; treating as empty");
                Ok(T::default())
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .map_err(|source| StoreError::Serialize { key, source })?;
        self.store.set(key, &json)?;
        Ok(())
    }

    // ── Beans ────────────────────────────────────────────────────────────────

    pub fn beans(&self) -> Result<Vec<SavedBean>> {
        self.load(KEY_BEANS)
    }

    pub fn bean(&self, id: Uuid) -> Result<SavedBean> {
        self.beans()?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::not_found("bean", id))
    }

    /// Save a new bean and remember its roaster.
    pub fn add_bean(&mut self, new: NewBean) -> Result<SavedBean> {
        let bean = new.into_saved(Uuid::new_v4(), self.calendar.now_utc())?;
        let mut beans = self.beans()?;
        beans.push(bean.clone());
        self.save(KEY_BEANS, &beans)?;
        self.add_roastery(&bean.roaster_name)?;
        tracing::info!(id = %bean.id, roaster = %bean.roaster_name, bean = %bean.bean_name, "bean saved");
        Ok(bean)
    }

    /// Import several beans in one write. Invalid rows abort the whole import.
    pub fn import_beans(&mut self, rows: Vec<NewBean>) -> Result<Vec<SavedBean>> {
        let now = self.calendar.now_utc();
        let added = rows
            .into_iter()
            .map(|n| n.into_saved(Uuid::new_v4(), now))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut beans = self.beans()?;
        beans.extend(added.iter().cloned());
        self.save(KEY_BEANS, &beans)?;
        let mut roasteries = self.roasteries()?;
        let mut changed = false;
        for b in &added {
            changed |= insert_roastery(&mut roasteries, &b.roaster_name);
        }
        if changed {
            self.save(KEY_ROASTERIES, &roasteries)?;
        }
        tracing::info!(count = added.len(), "beans imported");
        Ok(added)
    }

    pub fn update_bean(&mut self, id: Uuid, patch: BeanPatch) -> Result<SavedBean> {
        let mut beans = self.beans()?;
        let slot = beans
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::not_found("bean", id))?;
        patch.apply(slot)?;
        let updated = slot.clone();
        self.save(KEY_BEANS, &beans)?;
        tracing::info!(%id, "bean updated");
        Ok(updated)
    }

    /// Remove a bean; clears the active selection if it pointed at it.
    pub fn remove_bean(&mut self, id: Uuid) -> Result<SavedBean> {
        let mut beans = self.beans()?;
        let idx = beans
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| StoreError::not_found("bean", id))?;
        let removed = beans.remove(idx);
        self.save(KEY_BEANS, &beans)?;

        let mut settings = self.settings()?;
        if settings.active_bean_id == Some(id) {
            settings.active_bean_id = None;
            settings.active_bean_opened_date = None;
            self.save_settings(&settings)?;
        }
        tracing::info!(%id, "bean removed");
        Ok(removed)
    }

    /// Make `id` the active bean. The opened date is the bean's own, or today.
    pub fn activate_bean(&mut self, id: Uuid) -> Result<SavedBean> {
        let bean = self.bean(id)?;
        let mut settings = self.settings()?;
        settings.active_bean_id = Some(id);
        settings.active_bean_opened_date = Some(bean.opened_date.unwrap_or_else(|| self.today()));
        self.save_settings(&settings)?;
        tracing::info!(%id, "active bean set");
        Ok(bean)
    }

    /// The active bean, if one is selected and still exists.
    pub fn active_bean(&self) -> Result<Option<SavedBean>> {
        let Some(id) = self.settings()?.active_bean_id else {
            return Ok(None);
        };
        Ok(self.beans()?.into_iter().find(|b| b.id == id))
    }

    // ── People and recipes ───────────────────────────────────────────────────

    pub fn people(&self) -> Result<Vec<Person>> {
        self.load(KEY_PEOPLE)
    }

    pub fn add_person(&mut self, name: &str) -> Result<Person> {
        let person = Person::new(Uuid::new_v4(), name)?;
        let mut people = self.people()?;
        people.push(person.clone());
        self.save(KEY_PEOPLE, &people)?;
        tracing::info!(id = %person.id, name = %person.name, "person added");
        Ok(person)
    }

    pub fn remove_person(&mut self, id: Uuid) -> Result<Person> {
        let mut people = self.people()?;
        let idx = people
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("person", id))?;
        let removed = people.remove(idx);
        self.save(KEY_PEOPLE, &people)?;
        tracing::info!(%id, "person removed");
        Ok(removed)
    }

    /// Returns true when an existing recipe was replaced.
    pub fn upsert_recipe(&mut self, person_id: Uuid, recipe: DrinkRecipe) -> Result<bool> {
        let mut people = self.people()?;
        let person = people
            .iter_mut()
            .find(|p| p.id == person_id)
            .ok_or_else(|| StoreError::not_found("person", person_id))?;
        let replaced = person.upsert_recipe(recipe);
        self.save(KEY_PEOPLE, &people)?;
        Ok(replaced)
    }

    pub fn remove_recipe(&mut self, person_id: Uuid, recipe_id: Uuid) -> Result<()> {
        let mut people = self.people()?;
        let person = people
            .iter_mut()
            .find(|p| p.id == person_id)
            .ok_or_else(|| StoreError::not_found("person", person_id))?;
        if !person.remove_recipe(recipe_id) {
            return Err(StoreError::not_found("recipe", recipe_id));
        }
        self.save(KEY_PEOPLE, &people)
    }

    // ── History ──────────────────────────────────────────────────────────────

    /// Newest first, at most `history_cap` entries.
    pub fn history(&self) -> Result<Vec<DialInRecord>> {
        let records: Vec<DialInRecord> = self.load(KEY_HISTORY)?;
        Ok(HistoryLog::from_records(records, self.retention.history_cap).into_records())
    }

    pub fn record_dial_in(
        &mut self,
        m: &BrewMeasurement,
        result: &DialInResult,
    ) -> Result<DialInRecord> {
        let record = DialInRecord::from_result(Uuid::new_v4(), m, result, self.calendar.now_utc());
        let mut log = HistoryLog::from_records(self.load(KEY_HISTORY)?, self.retention.history_cap);
        log.push(record.clone());
        self.save(KEY_HISTORY, log.records())?;
        tracing::info!(id = %record.id, feedback = %record.feedback, "dial-in recorded");
        Ok(record)
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.store.remove(KEY_HISTORY)?;
        tracing::info!("history cleared");
        Ok(())
    }

    // ── Maintenance ──────────────────────────────────────────────────────────

    pub fn maintenance(&self) -> Result<MaintenanceDates> {
        self.load(KEY_MAINTENANCE)
    }

    pub fn set_maintenance(
        &mut self,
        task: MaintenanceTask,
        date: Option<NaiveDate>,
    ) -> Result<MaintenanceDates> {
        let mut dates = self.maintenance()?;
        dates.set(task, date);
        self.save(KEY_MAINTENANCE, &dates)?;
        tracing::info!(task = task.key(), ?date, "maintenance date set");
        Ok(dates)
    }

    pub fn mark_done(&mut self, task: MaintenanceTask) -> Result<MaintenanceDates> {
        let today = self.today();
        self.set_maintenance(task, Some(today))
    }

    pub fn is_filter_overdue(&self) -> Result<bool> {
        Ok(self
            .maintenance()?
            .is_filter_overdue(self.today(), self.retention.filter_overdue_days))
    }

    // ── Settings ─────────────────────────────────────────────────────────────

    pub fn settings(&self) -> Result<GeneralSettings> {
        self.load(KEY_SETTINGS)
    }

    pub fn save_settings(&mut self, settings: &GeneralSettings) -> Result<()> {
        self.save(KEY_SETTINGS, settings)
    }

    pub fn machine_name(&self) -> Result<Option<String>> {
        let name: Option<String> = self.load(KEY_MACHINE_NAME)?;
        Ok(name.or(self.settings()?.machine_name))
    }

    pub fn set_machine_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            self.store.remove(KEY_MACHINE_NAME)?;
        } else {
            self.save(KEY_MACHINE_NAME, name)?;
        }
        Ok(())
    }

    // ── Roasteries ───────────────────────────────────────────────────────────

    pub fn roasteries(&self) -> Result<Vec<String>> {
        self.load(KEY_ROASTERIES)
    }

    /// Returns false when the name was blank or already known.
    pub fn add_roastery(&mut self, name: &str) -> Result<bool> {
        let mut list = self.roasteries()?;
        if !insert_roastery(&mut list, name) {
            return Ok(false);
        }
        self.save(KEY_ROASTERIES, &list)?;
        Ok(true)
    }
}
