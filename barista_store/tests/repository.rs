use barista_core::records::{BeanPatch, DrinkRecipe, MaintenanceTask, MilkType, NewBean};
use barista_core::{BrewMeasurement, RetentionCfg, RoastLevel, calculate_dial_in};
use barista_store::repository::{KEY_BEANS, KEY_HISTORY};
use barista_store::{MemoryStore, Repository, StoreError};
use barista_traits::KeyValueStore;
use barista_traits::calendar::FixedCalendar;
use chrono::NaiveDate;
use rstest::{fixture, rstest};
use uuid::Uuid;

type Repo = Repository<MemoryStore, FixedCalendar>;

fn fresh_repo() -> Repo {
    Repository::with_calendar(MemoryStore::new(), FixedCalendar::on(2026, 4, 1))
}

#[fixture]
fn repo() -> Repo {
    fresh_repo()
}

fn new_bean(roaster: &str, bean: &str) -> NewBean {
    NewBean {
        roaster_name: roaster.into(),
        bean_name: bean.into(),
        grind_setting: "12".into(),
        roast_level: Some(RoastLevel::MEDIUM),
        ..NewBean::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
fn empty_store_reads_as_empty(repo: Repo) {
    assert!(repo.beans().unwrap().is_empty());
    assert!(repo.people().unwrap().is_empty());
    assert!(repo.history().unwrap().is_empty());
    assert!(repo.maintenance().unwrap().is_empty());
    assert!(repo.roasteries().unwrap().is_empty());
    assert_eq!(repo.machine_name().unwrap(), None);
}

#[rstest]
fn bean_lifecycle(mut repo: Repo) {
    let saved = repo.add_bean(new_bean(" Onyx ", "Geometry")).unwrap();
    assert_eq!(saved.roaster_name, "Onyx");
    assert_eq!(repo.roasteries().unwrap(), vec!["Onyx".to_string()]);

    let updated = repo
        .update_bean(
            saved.id,
            BeanPatch {
                grind_setting: Some("10".into()),
                ..BeanPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.grind_setting, "10");
    assert_eq!(repo.bean(saved.id).unwrap().grind_setting, "10");

    repo.activate_bean(saved.id).unwrap();
    let settings = repo.settings().unwrap();
    assert_eq!(settings.active_bean_id, Some(saved.id));
    assert_eq!(settings.active_bean_opened_date, Some(date(2026, 4, 1)));
    assert_eq!(repo.active_bean().unwrap().map(|b| b.id), Some(saved.id));

    repo.remove_bean(saved.id).unwrap();
    assert!(repo.beans().unwrap().is_empty());
    assert_eq!(repo.settings().unwrap().active_bean_id, None);
}

#[rstest]
fn missing_bean_is_not_found(mut repo: Repo) {
    let id = Uuid::new_v4();
    assert!(matches!(repo.bean(id), Err(StoreError::NotFound { kind: "bean", .. })));
    assert!(matches!(repo.remove_bean(id), Err(StoreError::NotFound { .. })));
    assert!(matches!(repo.activate_bean(id), Err(StoreError::NotFound { .. })));
}

#[rstest]
fn invalid_bean_is_rejected(mut repo: Repo) {
    let err = repo.add_bean(new_bean("Onyx", "  ")).unwrap_err();
    assert!(matches!(err, StoreError::Record(_)));
    assert!(repo.beans().unwrap().is_empty());
}

#[rstest]
fn import_adds_all_rows_and_roasters(mut repo: Repo) {
    let added = repo
        .import_beans(vec![
            new_bean("Square Mile", "Red Brick"),
            new_bean("Onyx", "Geometry"),
            new_bean("Onyx", "Southern Weather"),
        ])
        .unwrap();
    assert_eq!(added.len(), 3);
    assert_eq!(repo.beans().unwrap().len(), 3);
    assert_eq!(
        repo.roasteries().unwrap(),
        vec!["Onyx".to_string(), "Square Mile".to_string()]
    );
}

#[test]
fn history_is_capped_newest_first() {
    let cap = RetentionCfg {
        history_cap: 3,
        ..RetentionCfg::default()
    };
    let mut repo = fresh_repo().with_retention(cap);
    for t in [20.0, 25.0, 27.0, 30.0, 35.0] {
        let m = BrewMeasurement::new(18.0, 36.0, t);
        let r = calculate_dial_in(18.0, 36.0, t, RoastLevel::MEDIUM).unwrap();
        repo.record_dial_in(&m, &r).unwrap();
    }
    let times: Vec<f64> = repo.history().unwrap().iter().map(|r| r.time).collect();
    assert_eq!(times, vec![35.0, 30.0, 27.0]);

    repo.clear_history().unwrap();
    assert!(repo.history().unwrap().is_empty());
}

#[rstest]
fn recipes_upsert_and_remove(mut repo: Repo) {
    let person = repo.add_person("Sam").unwrap();
    let mut recipe = DrinkRecipe::new(Uuid::new_v4());
    recipe.drink = "Flat White".into();
    recipe.milk = MilkType::Oat;
    assert!(!repo.upsert_recipe(person.id, recipe.clone()).unwrap());

    recipe.milk_amount_ml = 120;
    assert!(repo.upsert_recipe(person.id, recipe.clone()).unwrap());
    let stored = &repo.people().unwrap()[0];
    assert_eq!(stored.recipes.len(), 1);
    assert_eq!(stored.recipes[0].milk_amount_ml, 120);

    repo.remove_recipe(person.id, recipe.id).unwrap();
    assert!(matches!(
        repo.remove_recipe(person.id, recipe.id),
        Err(StoreError::NotFound { kind: "recipe", .. })
    ));
    repo.remove_person(person.id).unwrap();
    assert!(repo.people().unwrap().is_empty());
}

#[rstest]
fn person_name_required(mut repo: Repo) {
    assert!(matches!(repo.add_person("   "), Err(StoreError::Record(_))));
}

#[rstest]
fn maintenance_and_filter_overdue(mut repo: Repo) {
    repo.mark_done(MaintenanceTask::Backflush).unwrap();
    assert_eq!(repo.maintenance().unwrap().last_backflush, Some(date(2026, 4, 1)));

    repo.set_maintenance(MaintenanceTask::WaterFilter, Some(date(2026, 1, 1)))
        .unwrap();
    assert!(!repo.is_filter_overdue().unwrap());
    repo.set_maintenance(MaintenanceTask::WaterFilter, Some(date(2025, 12, 31)))
        .unwrap();
    assert!(repo.is_filter_overdue().unwrap());
}

#[rstest]
fn roasteries_are_sorted_and_unique(mut repo: Repo) {
    assert!(repo.add_roastery("Onyx").unwrap());
    assert!(repo.add_roastery("Koppi").unwrap());
    assert!(!repo.add_roastery("Onyx").unwrap());
    assert!(!repo.add_roastery(" ").unwrap());
    assert_eq!(repo.roasteries().unwrap(), vec!["Koppi", "Onyx"]);
}

#[rstest]
fn machine_name_round_trips(mut repo: Repo) {
    repo.set_machine_name("Linea Mini").unwrap();
    assert_eq!(repo.machine_name().unwrap().as_deref(), Some("Linea Mini"));
    repo.set_machine_name("").unwrap();
    assert_eq!(repo.machine_name().unwrap(), None);
}

#[test]
fn corrupt_documents_read_as_empty() {
    let mut store = MemoryStore::new();
    store.set(KEY_BEANS, "{not json").unwrap();
    store.set(KEY_HISTORY, "42").unwrap();
    let repo = Repository::with_calendar(store, FixedCalendar::on(2026, 4, 1));
    assert!(repo.beans().unwrap().is_empty());
    assert!(repo.history().unwrap().is_empty());
}
