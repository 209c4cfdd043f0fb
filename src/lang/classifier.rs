//! Localization key classification.
//!
//! Membership of a key in a category is decided by a declarative rule table.
//! Each category owns one or more [`Rule`]s; a key belongs to the category when
//! any of its rules accepts it. One generic evaluator ([`Rule::accepts`])
//! interprets every rule.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Top-level grouping of localization keys, one slide deck per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// `block.*`
    Block,
    /// `entity.minecraft.*`
    Entity,
    /// `item.minecraft.*` and explorer maps (`filled_map.*`).
    Item,
    /// `effect.minecraft.*`
    Effect,
    /// `enchantment.minecraft.*`
    Enchantment,
    /// `biome.*`
    Biome,
    /// `advancements.*.title`
    Advancement,
}

impl Category {
    /// Every category in deck order.
    pub const ALL: [Self; 7] = [
        Self::Block,
        Self::Entity,
        Self::Item,
        Self::Effect,
        Self::Enchantment,
        Self::Biome,
        Self::Advancement,
    ];

    /// Folder name used for decks and images (`block`, `item`, `advancements`, ...).
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Entity => "entity",
            Self::Item => "item",
            Self::Effect => "effect",
            Self::Enchantment => "enchantment",
            Self::Biome => "biome",
            Self::Advancement => "advancements",
        }
    }

    /// What: Decide whether `key` belongs to this category.
    ///
    /// Inputs:
    /// - `key`: Dotted localization key.
    ///
    /// Output:
    /// - `true` when any rule of the category accepts the key.
    #[must_use]
    pub fn accepts(self, key: &str) -> bool {
        RULES
            .iter()
            .filter(|(category, _)| *category == self)
            .any(|(_, rule)| rule.accepts(key))
    }

    /// Declared key prefixes of this category.
    #[must_use]
    pub fn prefixes(self) -> Vec<&'static str> {
        RULES
            .iter()
            .filter(|(category, _)| *category == self)
            .map(|(_, rule)| rule.prefix)
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "entity" => Ok(Self::Entity),
            "item" => Ok(Self::Item),
            "effect" => Ok(Self::Effect),
            "enchantment" => Ok(Self::Enchantment),
            "biome" => Ok(Self::Biome),
            "advancement" | "advancements" => Ok(Self::Advancement),
            other => Err(format!(
                "unknown category '{other}' (expected one of: block, entity, item, effect, \
                 enchantment, biome, advancement)"
            )),
        }
    }
}

/// One membership rule.
#[derive(Debug)]
pub struct Rule {
    /// Key must start with this.
    prefix: &'static str,
    /// Key must also match this, when set.
    required: Option<Regex>,
    /// Keys matching this are variant sub-keys and rejected.
    exclusion: Option<Regex>,
    /// Hand-maintained false positives.
    excluded_keys: &'static [&'static str],
    /// Keys containing any of these are rejected.
    excluded_substrings: &'static [&'static str],
    /// Keys matching this are accepted even if otherwise rejected.
    inclusion_override: Option<Regex>,
}

impl Rule {
    /// What: Evaluate the rule against a key.
    ///
    /// Inputs:
    /// - `key`: Dotted localization key.
    ///
    /// Output:
    /// - `true` when accepted.
    ///
    /// Details:
    /// - The inclusion override is consulted last, so it can rescue a key that
    ///   the exclusion pattern, the excluded keys or the excluded substrings reject.
    #[must_use]
    pub fn accepts(&self, key: &str) -> bool {
        let base = key.starts_with(self.prefix)
            && self.required.as_ref().is_none_or(|re| re.is_match(key))
            && !self.exclusion.as_ref().is_some_and(|re| re.is_match(key))
            && !self.excluded_keys.contains(&key)
            && !self.excluded_substrings.iter().any(|s| key.contains(s));
        base || self
            .inclusion_override
            .as_ref()
            .is_some_and(|re| re.is_match(key))
    }
}

/// Compile a rule pattern. Patterns are literals in this file.
fn pattern(re: &str) -> Option<Regex> {
    Some(Regex::new(re).expect("classifier pattern must compile"))
}

/// The rule table.
static RULES: LazyLock<Vec<(Category, Rule)>> = LazyLock::new(|| {
    vec![
        (
            Category::Block,
            Rule {
                prefix: "block.",
                required: None,
                exclusion: pattern(r"^block\.minecraft\..*\."),
                excluded_keys: &["block.minecraft.set_spawn"],
                excluded_substrings: &[],
                inclusion_override: None,
            },
        ),
        (
            Category::Entity,
            Rule {
                prefix: "entity.minecraft.",
                required: None,
                exclusion: pattern(r"^entity\.minecraft\..*\."),
                excluded_keys: &["entity.minecraft.falling_block_type"],
                excluded_substrings: &[],
                inclusion_override: None,
            },
        ),
        (
            Category::Item,
            Rule {
                prefix: "item.minecraft.",
                required: None,
                exclusion: pattern(r"^item\.minecraft\..*\."),
                excluded_keys: &[],
                excluded_substrings: &["pottery_shard"],
                inclusion_override: pattern(r"^item\.minecraft\..*\.effect"),
            },
        ),
        (
            Category::Item,
            Rule {
                prefix: "filled_map.",
                required: None,
                exclusion: None,
                excluded_keys: &[
                    "filled_map.id",
                    "filled_map.level",
                    "filled_map.locked",
                    "filled_map.scale",
                    "filled_map.unknown",
                ],
                excluded_substrings: &[],
                inclusion_override: None,
            },
        ),
        (
            Category::Effect,
            Rule {
                prefix: "effect.minecraft.",
                required: None,
                exclusion: None,
                excluded_keys: &[],
                excluded_substrings: &[],
                inclusion_override: None,
            },
        ),
        (
            Category::Enchantment,
            Rule {
                prefix: "enchantment.minecraft.",
                required: None,
                exclusion: None,
                excluded_keys: &[],
                excluded_substrings: &[],
                inclusion_override: None,
            },
        ),
        (
            Category::Biome,
            Rule {
                prefix: "biome.",
                required: None,
                exclusion: None,
                excluded_keys: &[],
                excluded_substrings: &[],
                inclusion_override: None,
            },
        ),
        (
            Category::Advancement,
            Rule {
                prefix: "advancements.",
                required: pattern(r"^advancements\..*\.title$"),
                exclusion: None,
                excluded_keys: &[],
                excluded_substrings: &[],
                inclusion_override: None,
            },
        ),
    ]
});

/// Prefixes of keys that feed composite entries and are tracked by the diff.
const COMPANION_PREFIXES: [&str; 2] = ["trim_pattern.", "upgrade."];

/// What: Decide whether `key` belongs to any of `categories`.
///
/// Inputs:
/// - `key`: Dotted localization key.
/// - `categories`: Categories to test.
///
/// Output:
/// - `true` when at least one category accepts the key.
#[must_use]
pub fn is_valid(key: &str, categories: &[Category]) -> bool {
    categories.iter().any(|c| c.accepts(key))
}

/// What: Union classifier used for snapshot diffs.
///
/// Inputs:
/// - `key`: Dotted localization key.
///
/// Output:
/// - `true` when any category accepts the key, or when it is a companion
///   string (`trim_pattern.*`, `upgrade.*`) used to build composite entries.
#[must_use]
pub fn is_tracked(key: &str) -> bool {
    is_valid(key, &Category::ALL) || COMPANION_PREFIXES.iter().any(|p| key.starts_with(p))
}
