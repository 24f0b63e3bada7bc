//! Record management commands: beans, people and recipes, history,
//! maintenance, settings and roasteries.

use barista_core::records::{
    BeanPatch, DrinkRecipe, MaintenanceTask, NewBean, SavedBean, group_by_roaster,
};
use barista_core::{BrewDefaults, RecordError, RoastLevel};
use barista_store::{FileStore, Repository};
use eyre::WrapErr;
use serde_json::json;
use uuid::Uuid;

use crate::cli::{
    BeanFields, BeansCmd, MaintenanceCmd, PeopleCmd, RecipesCmd, RoasteriesCmd, SettingsCmd,
};
use crate::output::{emit, timestamp_ms};

type Repo = Repository<FileStore>;

fn roast_level(n: Option<u8>) -> eyre::Result<Option<RoastLevel>> {
    Ok(n.map(RoastLevel::try_from).transpose()?)
}

fn describe_bean(b: &SavedBean, active: bool, today: chrono::NaiveDate) -> String {
    let mut line = format!("  {} {}", if active { "*" } else { " " }, b.bean_name);
    if let Some(level) = b.roast_level {
        line.push_str(&format!(" [roast {level}]"));
    }
    if !b.grind_setting.is_empty() {
        line.push_str(&format!(" grind {}", b.grind_setting));
    }
    if let Some(ppk) = b.price_per_kg() {
        line.push_str(&format!(" {ppk:.2}/kg"));
    }
    if let Some(days) = b.days_open(today) {
        line.push_str(&format!(" open {days}d"));
    }
    if !b.flavor_tags.is_empty() {
        line.push_str(&format!(" ({})", b.flavor_tags.join(", ")));
    }
    line.push_str(&format!("  {}", b.id));
    line
}

pub fn run_beans(repo: &mut Repo, cmd: BeansCmd) -> eyre::Result<()> {
    match cmd {
        BeansCmd::List => {
            let beans = repo.beans()?;
            let active = repo.settings()?.active_bean_id;
            let today = repo.today();
            let payload = json!({
                "timestamp": timestamp_ms(),
                "beans": beans,
                "active_bean_id": active,
            });
            emit(payload, || {
                if beans.is_empty() {
                    println!("No saved beans.");
                    return;
                }
                for (roaster, group) in group_by_roaster(&beans) {
                    println!("{roaster}");
                    for b in group {
                        println!("{}", describe_bean(b, active == Some(b.id), today));
                    }
                }
            });
        }
        BeansCmd::Add {
            roaster,
            bean,
            fields,
        } => {
            let new = NewBean {
                roaster_name: roaster,
                bean_name: bean,
                grind_setting: fields.grind.unwrap_or_default(),
                roast_level: roast_level(fields.roast)?,
                bean_description: fields.description,
                flavor_tags: fields.tags,
                price_paid: fields.price,
                bag_weight_grams: fields.weight,
                opened_date: fields.opened,
            };
            let saved = repo.add_bean(new)?;
            emit(json!({ "timestamp": timestamp_ms(), "bean": saved }), || {
                println!("Saved {} / {} ({})", saved.roaster_name, saved.bean_name, saved.id);
            });
        }
        BeansCmd::Update {
            id,
            roaster,
            bean,
            fields,
        } => {
            let patch = patch_from(roaster, bean, fields)?;
            let updated = repo.update_bean(id, patch)?;
            emit(json!({ "timestamp": timestamp_ms(), "bean": updated }), || {
                println!("Updated {} / {}", updated.roaster_name, updated.bean_name);
            });
        }
        BeansCmd::Remove { id } => {
            let removed = repo.remove_bean(id)?;
            emit(json!({ "timestamp": timestamp_ms(), "removed": removed.id }), || {
                println!("Removed {} / {}", removed.roaster_name, removed.bean_name);
            });
        }
        BeansCmd::Activate { id } => {
            let bean = repo.activate_bean(id)?;
            emit(json!({ "timestamp": timestamp_ms(), "active_bean_id": bean.id }), || {
                println!("Active bean: {} / {}", bean.roaster_name, bean.bean_name);
            });
        }
        BeansCmd::Import { path } => {
            let rows = barista_config::load_beans_csv(&path)?;
            let beans = rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    NewBean::try_from(row).wrap_err_with(|| format!("bean CSV row {}", i + 2))
                })
                .collect::<eyre::Result<Vec<_>>>()?;
            let added = repo.import_beans(beans)?;
            emit(json!({ "timestamp": timestamp_ms(), "imported": added.len() }), || {
                println!("Imported {} beans from {}", added.len(), path.display());
            });
        }
    }
    Ok(())
}

fn patch_from(
    roaster: Option<String>,
    bean: Option<String>,
    fields: BeanFields,
) -> eyre::Result<BeanPatch> {
    Ok(BeanPatch {
        roaster_name: roaster,
        bean_name: bean,
        grind_setting: fields.grind,
        roast_level: roast_level(fields.roast)?,
        bean_description: fields.description,
        flavor_tags: (!fields.tags.is_empty()).then_some(fields.tags),
        price_paid: fields.price,
        bag_weight_grams: fields.weight,
        opened_date: fields.opened,
    })
}

pub fn run_people(repo: &mut Repo, cmd: PeopleCmd) -> eyre::Result<()> {
    match cmd {
        PeopleCmd::List => {
            let people = repo.people()?;
            emit(json!({ "timestamp": timestamp_ms(), "people": people }), || {
                if people.is_empty() {
                    println!("No people saved.");
                }
                for p in &people {
                    println!("{} ({})", p.name, p.id);
                    for r in &p.recipes {
                        let mut line = format!("  - {}", r.drink);
                        if r.milk_amount_ml > 0 {
                            let milk = r.milk.as_str();
                            line.push_str(&format!(", {} ml {milk} milk", r.milk_amount_ml));
                        }
                        for extra in [&r.sugar_syrup, &r.ice, &r.notes] {
                            if !extra.is_empty() {
                                line.push_str(&format!(", {extra}"));
                            }
                        }
                        println!("{line}  {}", r.id);
                    }
                }
            });
        }
        PeopleCmd::Add { name } => {
            let person = repo.add_person(&name)?;
            emit(json!({ "timestamp": timestamp_ms(), "person": person }), || {
                println!("Added {} ({})", person.name, person.id);
            });
        }
        PeopleCmd::Remove { id } => {
            let removed = repo.remove_person(id)?;
            emit(json!({ "timestamp": timestamp_ms(), "removed": removed.id }), || {
                println!("Removed {}", removed.name);
            });
        }
    }
    Ok(())
}

pub fn run_recipes(repo: &mut Repo, cmd: RecipesCmd) -> eyre::Result<()> {
    match cmd {
        RecipesCmd::Set {
            person,
            id,
            drink,
            milk,
            milk_ml,
            syrup,
            ice,
            notes,
        } => {
            let recipe = DrinkRecipe {
                drink: drink.trim().to_string(),
                milk,
                milk_amount_ml: milk_ml,
                sugar_syrup: syrup,
                ice,
                notes,
                ..DrinkRecipe::new(id.unwrap_or_else(Uuid::new_v4))
            };
            let recipe_id = recipe.id;
            let replaced = repo.upsert_recipe(person, recipe)?;
            emit(
                json!({ "timestamp": timestamp_ms(), "recipe_id": recipe_id, "replaced": replaced }),
                || {
                    let verb = if replaced { "Updated" } else { "Added" };
                    println!("{verb} recipe {recipe_id}");
                },
            );
        }
        RecipesCmd::Remove { person, id } => {
            repo.remove_recipe(person, id)?;
            emit(json!({ "timestamp": timestamp_ms(), "removed": id }), || {
                println!("Removed recipe {id}");
            });
        }
    }
    Ok(())
}

pub fn run_history(repo: &mut Repo, limit: Option<usize>, clear: bool) -> eyre::Result<()> {
    if clear {
        repo.clear_history()?;
        emit(json!({ "timestamp": timestamp_ms(), "cleared": true }), || {
            println!("History cleared.");
        });
        return Ok(());
    }
    let mut records = repo.history()?;
    if let Some(n) = limit {
        records.truncate(n);
    }
    emit(json!({ "timestamp": timestamp_ms(), "history": records }), || {
        if records.is_empty() {
            println!("No dial-in history yet.");
        }
        for r in &records {
            println!(
                "{}  {:.1} g -> {:.1} g in {:.1} s  1:{:.2}  {}",
                r.created_at.format("%Y-%m-%d %H:%M"),
                r.dose,
                r.yield_g,
                r.time,
                r.ratio,
                r.feedback
            );
        }
    });
    Ok(())
}

pub fn run_maintenance(repo: &mut Repo, cmd: MaintenanceCmd) -> eyre::Result<()> {
    let dates = match cmd {
        MaintenanceCmd::Show => repo.maintenance()?,
        MaintenanceCmd::Done { task } => repo.mark_done(task)?,
        MaintenanceCmd::Set { task, date } => repo.set_maintenance(task, date)?,
    };
    let today = repo.today();
    let overdue = dates.is_filter_overdue(today, repo.retention().filter_overdue_days);
    if overdue {
        tracing::warn!("water filter is overdue for replacement");
    }
    emit(
        json!({ "timestamp": timestamp_ms(), "maintenance": dates, "filter_overdue": overdue }),
        || {
            if dates.is_empty() {
                println!("No maintenance logged yet.");
                return;
            }
            for task in MaintenanceTask::ALL {
                match (dates.get(task), dates.days_since(task, today)) {
                    (Some(d), Some(days)) => println!("{:<20} {d} ({days} days ago)", task.label()),
                    _ => println!("{:<20} never", task.label()),
                }
            }
            if overdue {
                println!("Water filter is overdue; replace it.");
            }
        },
    );
    Ok(())
}

pub fn run_settings(
    repo: &mut Repo,
    defaults: &BrewDefaults,
    cmd: SettingsCmd,
) -> eyre::Result<()> {
    if let SettingsCmd::Set {
        machine_name,
        default_dose,
        target_ratio,
    } = cmd
    {
        for (field, v) in [("default dose", default_dose), ("target ratio", target_ratio)] {
            if let Some(x) = v
                && !(x.is_finite() && x > 0.0)
            {
                return Err(RecordError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {x}"),
                }
                .into());
            }
        }
        let mut settings = repo.settings()?;
        if default_dose.is_some() {
            settings.default_dose = default_dose;
        }
        if target_ratio.is_some() {
            settings.target_ratio = target_ratio;
        }
        repo.save_settings(&settings)?;
        if let Some(name) = machine_name {
            repo.set_machine_name(&name)?;
        }
    }

    let settings = repo.settings()?;
    let machine = repo.machine_name()?;
    let prefill = settings.prefill(defaults);
    emit(
        json!({
            "timestamp": timestamp_ms(),
            "settings": settings,
            "machine_name": machine,
            "prefill": prefill,
        }),
        || {
            println!("Machine: {}", machine.as_deref().unwrap_or("(unnamed)"));
            println!("Default dose: {:.1} g", prefill.dose_g);
            println!("Expected yield: {:.1} g", prefill.yield_g);
            match settings.active_bean_id {
                Some(id) => println!("Active bean: {id}"),
                None => println!("Active bean: none"),
            }
        },
    );
    Ok(())
}

pub fn run_roasteries(repo: &mut Repo, cmd: RoasteriesCmd) -> eyre::Result<()> {
    match cmd {
        RoasteriesCmd::List => {
            let list = repo.roasteries()?;
            emit(json!({ "timestamp": timestamp_ms(), "roasteries": list }), || {
                for r in &list {
                    println!("{r}");
                }
            });
        }
        RoasteriesCmd::Add { name } => {
            let added = repo.add_roastery(&name)?;
            emit(json!({ "timestamp": timestamp_ms(), "added": added }), || {
                if added {
                    println!("Added {}", name.trim());
                } else {
                    println!("{} is already known", name.trim());
                }
            });
        }
    }
    Ok(())
}
