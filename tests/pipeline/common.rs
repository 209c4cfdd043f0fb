//! Shared fixture: a project folder with a configuration and two locales.

use std::fs;
use std::path::{Path, PathBuf};

use langslide::config::Settings;
use tempfile::TempDir;

/// Configuration used by every fixture.
const CONFIG: &str = r#"
[language]
reference = "en_us"
locales = ["en_us", "zh_cn"]

[language.join_style]
en_us = "spaced"
zh_cn = "concatenated"

[category]
ignore_biome = true

[slide.font]
source = "Minecraft Seven"
translation_key = "Consolas"
zh_cn = "Noto Sans SC"

[slide.size]
source = 40.0
zh_cn = 28.0

[slide.bold]
zh_cn = true
"#;

/// English strings, raw.
const EN_US: &str = r#"{
    "block.minecraft.stone": "Stone",
    "block.minecraft.tuff": "Tuff",
    "block.minecraft.bed.occupied": "This bed is occupied",
    "block.minecraft.set_spawn": "Respawn point set",
    "item.minecraft.stick": "Stick",
    "item.minecraft.smithing_template": "Smithing Template",
    "item.minecraft.coast_armor_trim_smithing_template": "Smithing Template",
    "trim_pattern.minecraft.coast": "Coast Armor Trim",
    "upgrade.minecraft.netherite_upgrade": "Netherite Upgrade",
    "item.minecraft.music_disc_5": "Music Disc",
    "item.minecraft.music_disc_13": "Music Disc",
    "item.minecraft.music_disc_13.desc": "C418 - 13",
    "item.minecraft.mojang_banner_pattern": "Banner Pattern",
    "item.minecraft.mojang_banner_pattern.desc": "Thing",
    "effect.minecraft.speed": "Speed",
    "gui.done": "Done"
}"#;

/// Simplified Chinese strings, raw; `block.minecraft.tuff` comes from supplements.
const ZH_CN: &str = r#"{
    "block.minecraft.stone": "石头",
    "block.minecraft.bed.occupied": "该床已被占用",
    "block.minecraft.set_spawn": "已设置重生点",
    "item.minecraft.stick": "木棍",
    "item.minecraft.smithing_template": "锻造模板",
    "item.minecraft.coast_armor_trim_smithing_template": "锻造模板",
    "trim_pattern.minecraft.coast": "海岸盔甲纹饰",
    "upgrade.minecraft.netherite_upgrade": "下界合金升级",
    "item.minecraft.music_disc_5": "音乐唱片",
    "item.minecraft.music_disc_13": "音乐唱片",
    "item.minecraft.music_disc_13.desc": "C418 - 13",
    "item.minecraft.mojang_banner_pattern": "旗帜图案",
    "item.minecraft.mojang_banner_pattern.desc": "Mojang代表",
    "effect.minecraft.speed": "迅捷",
    "gui.done": "完成"
}"#;

/// Supplement strings for the non-reference locale.
const SUPPLEMENTS: &str = r#"{ "zh_cn": { "block.minecraft.tuff": "凝灰岩" } }"#;

/// A project folder living as long as the test.
pub struct Project {
    /// Temporary root; dropped with the fixture.
    pub dir: TempDir,
}

impl Project {
    /// What: Write the configuration, both locales and the supplements.
    ///
    /// Output:
    /// - Project rooted at a fresh temporary directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let lang = dir.path().join("lang");
        fs::create_dir_all(&lang).expect("mkdir lang");
        fs::write(dir.path().join("langslide.toml"), CONFIG).expect("write config");
        fs::write(lang.join("en_us.json"), EN_US).expect("write en_us");
        fs::write(lang.join("zh_cn.json"), ZH_CN).expect("write zh_cn");
        fs::write(lang.join("supplements.json"), SUPPLEMENTS).expect("write supplements");
        Self { dir }
    }

    /// Root of the project.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.root().join("langslide.toml")
    }

    /// Settings loaded through discovery with an explicit path.
    pub fn settings(&self) -> Settings {
        Settings::load(Some(&self.config_path())).expect("load settings")
    }
}
