//! Locale normalization: deprecated key removal and composite entries.

use std::sync::LazyLock;

use regex::Regex;

use crate::lang::{JoinStyle, LangMap};

/// Aggregate standing for every music disc.
pub const MUSIC_DISC_AGGREGATE: &str = "item.minecraft.music_disc_*";
/// Aggregate standing for every banner pattern.
pub const BANNER_PATTERN_AGGREGATE: &str = "item.minecraft.*_banner_pattern";
/// Composite netherite upgrade template.
pub const NETHERITE_TEMPLATE: &str = "item.minecraft.netherite_upgrade_smithing_template";

/// Template noun; removed from the output once captured.
const SMITHING_TEMPLATE: &str = "item.minecraft.smithing_template";
/// Head of the netherite composite.
const NETHERITE_UPGRADE: &str = "upgrade.minecraft.netherite_upgrade";
/// Source of the music disc aggregate label.
const MUSIC_DISC_LABEL: &str = "item.minecraft.music_disc_5";
/// Source of the banner pattern aggregate label.
const BANNER_PATTERN_LABEL: &str = "item.minecraft.mojang_banner_pattern";
/// Marker of per-pattern armor trim templates.
const TRIM_TEMPLATE_MARKER: &str = "trim_smithing_template";
/// Prefix of per-song music disc keys.
const MUSIC_DISC_PREFIX: &str = "item.minecraft.music_disc";
/// Prefix of armor trim pattern names.
const TRIM_PATTERN_PREFIX: &str = "trim_pattern.minecraft.";

/// Per-pattern banner keys.
static BANNER_PATTERN_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^item\.minecraft\..*_banner_pattern").expect("banner pattern regex must compile")
});

/// Normalizes one raw locale mapping.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    /// How composite strings are joined.
    join: JoinStyle,
    /// Fixed aggregate strings for this locale, if configured.
    literals: Option<&'a LangMap>,
}

/// Strings captured before any key is removed.
struct Companions {
    /// `Smithing Template`
    template_noun: Option<String>,
    /// `Netherite Upgrade`
    netherite_upgrade: Option<String>,
    /// `Music Disc`
    music_disc: Option<String>,
    /// `Banner Pattern`
    banner_pattern: Option<String>,
}

impl<'a> Normalizer<'a> {
    /// What: Create a normalizer for one locale.
    ///
    /// Inputs:
    /// - `join`: The locale's join style.
    /// - `literals`: Aggregate display strings that override the derived ones.
    #[must_use]
    pub const fn new(join: JoinStyle, literals: Option<&'a LangMap>) -> Self {
        Self { join, literals }
    }

    /// What: Produce the normalized mapping for a raw locale dump.
    ///
    /// Inputs:
    /// - `raw`: Strings exactly as read from disk.
    ///
    /// Output:
    /// - New mapping with trim templates rewritten, deprecated keys removed
    ///   and aggregate keys inserted.
    ///
    /// Details:
    /// - Companion strings are captured before deletion, so the template noun is
    ///   still available for composites although its own key is removed.
    /// - Feeding the output back in is not supported: the template noun is gone
    ///   by then and the composites would not be rebuilt. Normalize raw data once.
    /// - Missing companions skip the affected entry and log a warning.
    #[must_use]
    pub fn normalize(&self, raw: &LangMap) -> LangMap {
        let companions = Companions {
            template_noun: raw.get(SMITHING_TEMPLATE).cloned(),
            netherite_upgrade: raw.get(NETHERITE_UPGRADE).cloned(),
            music_disc: raw.get(MUSIC_DISC_LABEL).cloned(),
            banner_pattern: raw.get(BANNER_PATTERN_LABEL).cloned(),
        };

        let mut out: LangMap = raw
            .iter()
            .filter(|(key, _)| !is_deprecated(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let removed = raw.len() - out.len();

        let rewritten = self.rewrite_trim_templates(raw, &mut out, &companions);
        self.insert_aggregates(&mut out, &companions);

        tracing::debug!(removed, rewritten, keys = out.len(), "normalized locale");
        out
    }

    /// Rewrite `<pattern>_armor_trim_smithing_template` values as pattern + noun.
    fn rewrite_trim_templates(
        &self,
        raw: &LangMap,
        out: &mut LangMap,
        companions: &Companions,
    ) -> usize {
        let Some(noun) = companions.template_noun.as_deref() else {
            if raw.keys().any(|k| k.contains(TRIM_TEMPLATE_MARKER)) {
                tracing::warn!(
                    key = SMITHING_TEMPLATE,
                    "template noun missing; trim templates left unchanged"
                );
            }
            return 0;
        };

        let mut rewritten = 0;
        for (key, value) in out.iter_mut() {
            if !key.contains(TRIM_TEMPLATE_MARKER) {
                continue;
            }
            let Some(variant) = trim_variant(key) else {
                tracing::warn!(key = %key, "trim template key has no variant segment");
                continue;
            };
            let pattern_key = format!("{TRIM_PATTERN_PREFIX}{variant}");
            match raw.get(&pattern_key) {
                Some(pattern) => {
                    *value = self.join.join(pattern, noun);
                    rewritten += 1;
                }
                None => {
                    tracing::warn!(key = %key, missing = %pattern_key, "trim pattern missing");
                }
            }
        }
        rewritten
    }

    /// Insert the music disc, banner pattern and netherite template entries.
    fn insert_aggregates(&self, out: &mut LangMap, companions: &Companions) {
        let aggregates = [
            (MUSIC_DISC_AGGREGATE, companions.music_disc.clone()),
            (BANNER_PATTERN_AGGREGATE, companions.banner_pattern.clone()),
            (
                NETHERITE_TEMPLATE,
                companions
                    .netherite_upgrade
                    .as_deref()
                    .zip(companions.template_noun.as_deref())
                    .map(|(head, noun)| self.join.join(head, noun)),
            ),
        ];
        for (key, derived) in aggregates {
            let literal = self.literals.and_then(|l| l.get(key)).cloned();
            match literal.or(derived) {
                Some(value) => {
                    out.insert(key.to_string(), value);
                }
                None => tracing::warn!(key, "no source for aggregate entry; skipped"),
            }
        }
    }
}

/// What: Composite keys whose display string is built from `key`.
///
/// Inputs:
/// - `key`: Raw localization key, e.g. from a diff snapshot.
///
/// Output:
/// - `NETHERITE_TEMPLATE` for the netherite upgrade name,
///   `item.minecraft.<v>_armor_trim_smithing_template` for `trim_pattern.minecraft.<v>`,
///   nothing otherwise.
#[must_use]
pub fn composites_fed_by(key: &str) -> Vec<String> {
    if key == NETHERITE_UPGRADE {
        return vec![NETHERITE_TEMPLATE.to_string()];
    }
    key.strip_prefix(TRIM_PATTERN_PREFIX)
        .filter(|variant| !variant.is_empty())
        .map(|variant| vec![format!("item.minecraft.{variant}_armor_trim_smithing_template")])
        .unwrap_or_default()
}

/// Keys dropped from every locale.
fn is_deprecated(key: &str) -> bool {
    key == SMITHING_TEMPLATE
        || key.starts_with(MUSIC_DISC_PREFIX)
        || BANNER_PATTERN_KEY.is_match(key)
}

/// Pattern name of a trim template key: third segment up to its first `_`.
fn trim_variant(key: &str) -> Option<&str> {
    key.split('.').nth(2)?.split('_').next()
}
