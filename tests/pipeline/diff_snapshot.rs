//! Diff snapshots and incremental restriction.

use langslide::lang::{Category, LangMap, diff, load_language_set, loader, sort_locales};

use crate::common::Project;

#[test]
/// What: A snapshot of new keys restricts the sorted sequences.
///
/// Inputs:
/// - Old reference file without tuff and the netherite upgrade; current fixture file.
///
/// Output:
/// - Snapshot holds only new tracked keys; restricted block sequences hold tuff only.
fn snapshot_drives_incremental_runs() {
    let project = Project::new();
    let settings = project.settings();
    let new = loader::load_locale_file("en_us", &settings.language_dir()).expect("new");
    let mut old: LangMap = new.clone();
    old.remove("block.minecraft.tuff");
    old.remove("upgrade.minecraft.netherite_upgrade");
    old.remove("gui.done");

    let added = diff::diff_keys(&old, &new);
    assert_eq!(
        added.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["block.minecraft.tuff", "upgrade.minecraft.netherite_upgrade"]
    );

    let path = settings.diff_path();
    assert_eq!(path, project.root().join("en_us_diff.json"));
    diff::write_snapshot(&path, &added).expect("write");
    let snapshot = diff::read_snapshot(&path).expect("read");

    let set = load_language_set(&settings).expect("load");
    let mut sorted = sort_locales(&set, &[Category::Block]).expect("sort");
    sorted.restrict_to(&snapshot);
    assert_eq!(sorted.len(), 1);
    assert_eq!(sorted.reference()[0].0, "block.minecraft.tuff");
    assert_eq!(sorted.get("zh_cn").expect("zh_cn")[0].1, "凝灰岩");
}

#[test]
/// What: Reading a snapshot that was never written fails clearly.
///
/// Inputs:
/// - Fresh fixture project.
///
/// Output:
/// - Error naming the snapshot file.
fn missing_snapshot_is_reported() {
    let project = Project::new();
    let err = diff::read_snapshot(&project.settings().diff_path()).expect_err("must fail");
    assert!(err.to_string().contains("en_us_diff.json"));
}

#[test]
/// What: New companion names keep the composite entries built from them.
///
/// Inputs:
/// - Snapshot holding only `upgrade.minecraft.netherite_upgrade` and
///   `trim_pattern.minecraft.coast`.
///
/// Output:
/// - Restricted item sequences hold the netherite and coast templates, aligned
///   across locales.
fn companion_keys_keep_composites() {
    let project = Project::new();
    let settings = project.settings();
    let snapshot: LangMap = [
        ("upgrade.minecraft.netherite_upgrade", "Netherite Upgrade"),
        ("trim_pattern.minecraft.coast", "Coast Armor Trim"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let set = load_language_set(&settings).expect("load");
    let mut sorted = sort_locales(&set, &[Category::Item]).expect("sort");
    sorted.restrict_to(&snapshot);

    let keys: Vec<&str> = sorted.reference().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "item.minecraft.coast_armor_trim_smithing_template",
            "item.minecraft.netherite_upgrade_smithing_template",
        ]
    );
    let zh: Vec<&str> = sorted
        .get("zh_cn")
        .expect("zh_cn")
        .iter()
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(zh, vec!["海岸盔甲纹饰锻造模板", "下界合金升级锻造模板"]);
}
