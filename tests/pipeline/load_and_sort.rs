//! Loading, normalization and cross-locale alignment.

use std::fs;

use langslide::lang::normalize::{
    BANNER_PATTERN_AGGREGATE, MUSIC_DISC_AGGREGATE, NETHERITE_TEMPLATE,
};
use langslide::lang::{Category, SortError, load_language_set, sort_locales};

use crate::common::Project;

#[test]
/// What: Loaded locales are normalized with their own join style and supplemented.
///
/// Inputs:
/// - Fixture project with `en_us` (spaced) and `zh_cn` (concatenated).
///
/// Output:
/// - Composite templates, aggregates, deprecated keys removed, supplement merged.
fn loads_and_normalizes_locales() {
    let project = Project::new();
    let set = load_language_set(&project.settings()).expect("load");

    let en = &set.reference().strings;
    assert_eq!(set.reference_code(), "en_us");
    assert_eq!(
        en.get("item.minecraft.coast_armor_trim_smithing_template").map(String::as_str),
        Some("Coast Armor Trim Smithing Template")
    );
    assert_eq!(
        en.get(NETHERITE_TEMPLATE).map(String::as_str),
        Some("Netherite Upgrade Smithing Template")
    );
    assert_eq!(en.get(MUSIC_DISC_AGGREGATE).map(String::as_str), Some("Music Disc"));
    assert_eq!(en.get(BANNER_PATTERN_AGGREGATE).map(String::as_str), Some("Banner Pattern"));
    assert!(!en.contains_key("item.minecraft.music_disc_13"));
    assert!(!en.contains_key("item.minecraft.mojang_banner_pattern.desc"));
    assert!(!en.contains_key("item.minecraft.smithing_template"));

    let zh = &set.get("zh_cn").expect("zh_cn").strings;
    assert_eq!(
        zh.get("item.minecraft.coast_armor_trim_smithing_template").map(String::as_str),
        Some("海岸盔甲纹饰锻造模板")
    );
    assert_eq!(zh.get(NETHERITE_TEMPLATE).map(String::as_str), Some("下界合金升级锻造模板"));
    assert_eq!(zh.get("block.minecraft.tuff").map(String::as_str), Some("凝灰岩"));
}

#[test]
/// What: Every locale is aligned on the reference order.
///
/// Inputs:
/// - Fixture project; block and item categories.
///
/// Output:
/// - Equal lengths and keys per index; reference values ascending.
fn sorted_locales_are_aligned() {
    let project = Project::new();
    let set = load_language_set(&project.settings()).expect("load");
    for category in [Category::Block, Category::Item, Category::Effect] {
        let sorted = sort_locales(&set, &[category]).expect("sort");
        let reference = sorted.reference();
        let zh = sorted.get("zh_cn").expect("zh_cn");
        assert_eq!(reference.len(), zh.len());
        for (a, b) in reference.iter().zip(zh) {
            assert_eq!(a.0, b.0);
        }
        assert!(reference.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    let blocks = sort_locales(&set, &[Category::Block]).expect("sort");
    let keys: Vec<&str> = blocks.reference().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["block.minecraft.stone", "block.minecraft.tuff"]);
}

#[test]
/// What: A key missing from a non-reference locale stops the sort.
///
/// Inputs:
/// - Fixture project without the supplement file.
///
/// Output:
/// - `SortError::MissingKey` naming `zh_cn` and the tuff block.
fn missing_translation_is_reported() {
    let project = Project::new();
    fs::remove_file(project.root().join("lang").join("supplements.json")).expect("remove");
    let set = load_language_set(&project.settings()).expect("load");
    let err = sort_locales(&set, &[Category::Block]).expect_err("must fail");
    assert_eq!(
        err,
        SortError::MissingKey {
            locale: "zh_cn".to_string(),
            key: "block.minecraft.tuff".to_string(),
        }
    );
}

#[test]
/// What: A missing locale file is reported with its path.
///
/// Inputs:
/// - Fixture project with `zh_cn.json` removed.
///
/// Output:
/// - Error message naming the file.
fn missing_locale_file_is_reported() {
    let project = Project::new();
    fs::remove_file(project.root().join("lang").join("zh_cn.json")).expect("remove");
    let err = load_language_set(&project.settings()).expect_err("must fail");
    assert!(err.to_string().contains("zh_cn.json"));
}
