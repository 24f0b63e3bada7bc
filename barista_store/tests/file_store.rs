use barista_core::records::NewBean;
use barista_store::repository::KEY_BEANS;
use barista_store::{FileStore, Repository};
use barista_traits::KeyValueStore;
use tempfile::tempdir;

#[test]
fn missing_key_reads_none_and_remove_is_idempotent() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("data"));
    assert_eq!(store.get("barista-mate-settings").unwrap(), None);
    store.remove("barista-mate-settings").unwrap();
    assert!(!dir.path().join("data").exists());
}

#[test]
fn writes_one_file_per_key_without_leftovers() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set("coffee-roasteries", r#"["Onyx"]"#).unwrap();
    store.set("coffee-roasteries", r#"["Koppi","Onyx"]"#).unwrap();

    let path = dir.path().join("coffee-roasteries.json");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"["Koppi","Onyx"]"#);
    assert!(!dir.path().join("coffee-roasteries.json.tmp").exists());
    assert_eq!(
        store.get("coffee-roasteries").unwrap().as_deref(),
        Some(r#"["Koppi","Onyx"]"#)
    );
}

#[test]
fn repeated_overwrites_leave_only_the_document() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    let mut store = FileStore::new(&data);
    for n in 0..5 {
        store.set("barista-mate-history", &format!("[{n}]")).unwrap();
    }
    let names: Vec<String> = std::fs::read_dir(&data)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["barista-mate-history.json".to_string()]);
    assert_eq!(store.get("barista-mate-history").unwrap().as_deref(), Some("[4]"));
}

#[test]
fn repository_data_survives_reopen() {
    let dir = tempdir().unwrap();
    let bean_id = {
        let mut repo = Repository::new(FileStore::new(dir.path()));
        repo.add_bean(NewBean {
            roaster_name: "Square Mile".into(),
            bean_name: "Red Brick".into(),
            ..NewBean::default()
        })
        .unwrap()
        .id
    };
    assert!(dir.path().join(format!("{KEY_BEANS}.json")).exists());

    let repo = Repository::new(FileStore::new(dir.path()));
    let bean = repo.bean(bean_id).unwrap();
    assert_eq!(bean.bean_name, "Red Brick");
    assert_eq!(repo.roasteries().unwrap(), vec!["Square Mile"]);
}

#[test]
fn corrupt_file_is_replaced_on_next_write() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{KEY_BEANS}.json")), "[{broken").unwrap();
    let mut repo = Repository::new(FileStore::new(dir.path()));
    assert!(repo.beans().unwrap().is_empty());
    repo.add_bean(NewBean {
        roaster_name: "Onyx".into(),
        bean_name: "Geometry".into(),
        ..NewBean::default()
    })
    .unwrap();
    assert_eq!(repo.beans().unwrap().len(), 1);
}
