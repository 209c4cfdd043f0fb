//! Slide plans: everything a deck writer needs to fill one category deck.
//!
//! A deck is produced from `slide/<category>/template.pptx`, duplicated into
//! `copied.pptx` once per entry, then filled and saved as `output.pptx`. The
//! plan describes that fill without touching the presentation file:
//!
//! - two placeholder substitutions (`Source String`, `Translation Key`);
//! - one table cell per non-reference locale;
//! - the entry image scaled into the picture area, for image categories;
//! - frame and icon overlays, for advancements.

pub mod layout;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Settings, TextStyle};
use crate::lang::{Category, LangMap, LoadError, SortedLocales, loader};
use crate::wiki::{IMAGE_CATEGORIES, candidates};

pub use layout::{ADVANCEMENT_FRAME, ADVANCEMENT_ICON, Placement, fit_image};

/// Placeholder replaced by the reference display string.
pub const SOURCE_PLACEHOLDER: &str = "Source String";
/// Placeholder replaced by the localization key.
pub const KEY_PLACEHOLDER: &str = "Translation Key";
/// Column of the localization table receiving the strings.
const TABLE_COLUMN: usize = 1;

/// Errors raised while building or writing a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Advancement data could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The plan could not be serialized.
    #[error("failed to serialize plan: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The plan could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Frame and icon of one advancement, as stored in `advancements_data.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdvancementData {
    /// Frame image stem (`task`, `goal`, `challenge`).
    pub frame: String,
    /// Item or block id shown inside the frame.
    pub icon: String,
}

/// Text placed into a placeholder text box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFill {
    /// Placeholder text identifying the box.
    pub placeholder: &'static str,
    /// Replacement text.
    pub text: String,
    /// Font settings.
    pub style: TextStyle,
}

/// Text placed into one localization table cell. Cells are centred horizontally
/// and anchored to the middle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    /// Row, starting at 1 below the header.
    pub row: usize,
    /// Column.
    pub column: usize,
    /// Locale shown in this row.
    pub locale: String,
    /// Display string.
    pub text: String,
    /// Font settings.
    pub style: TextStyle,
}

/// A picture and where it goes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Picture {
    /// Image file.
    pub path: PathBuf,
    /// Geometry in centimetres.
    pub placement: Placement,
}

/// Advancement frame with its icon on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    /// Frame picture.
    pub frame: Picture,
    /// Icon picture, when the icon id resolves to an item or block.
    pub icon: Option<Picture>,
}

/// Fill of one slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlidePlan {
    /// Zero-based slide index.
    pub index: usize,
    /// Localization key shown on the slide.
    pub key: String,
    /// Placeholder substitutions.
    pub texts: Vec<TextFill>,
    /// Localization table cells.
    pub table: Vec<TableCell>,
    /// Entry image, for image categories.
    pub image: Option<Picture>,
    /// Frame and icon, for advancements.
    pub overlay: Option<Overlay>,
}

/// Fill of one category deck.
#[derive(Debug, Clone, Serialize)]
pub struct DeckPlan {
    /// Deck category.
    pub category: Category,
    /// Number of slides the template must be duplicated to.
    pub slide_count: usize,
    /// Single-slide template.
    pub template: PathBuf,
    /// Template duplicated `slide_count` times.
    pub copied: PathBuf,
    /// Filled deck.
    pub output: PathBuf,
    /// One entry per slide, in slide order.
    pub slides: Vec<SlidePlan>,
    /// Images referenced by the plan that are not on disk.
    pub missing_images: Vec<PathBuf>,
}

/// Template, copy and output files of a deck.
#[must_use]
pub fn deck_files(slide_dir: &Path, category: Category) -> (PathBuf, PathBuf, PathBuf) {
    let dir = slide_dir.join(category.folder());
    (
        dir.join("template.pptx"),
        dir.join("copied.pptx"),
        dir.join("output.pptx"),
    )
}

/// Location of a deck's plan file.
#[must_use]
pub fn plan_path(slide_dir: &Path, category: Category) -> PathBuf {
    slide_dir.join(category.folder()).join("plan.json")
}

/// What: Load advancement frame/icon data.
///
/// Inputs:
/// - `path`: `advancements_data.json`.
///
/// Output:
/// - Advancement title key -> frame and icon.
///
/// # Errors
/// - `LoadError::NotFound` when the file is missing
/// - `LoadError::Parse` when it is not an object of `{frame, icon}` objects
pub fn load_advancement_data(path: &Path) -> Result<BTreeMap<String, AdvancementData>, LoadError> {
    let contents = loader::read_existing(path)?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Inputs shared by every slide of a deck.
struct DeckContext<'a> {
    /// Run configuration.
    settings: &'a Settings,
    /// Resolved image folder.
    image_dir: PathBuf,
    /// Every normalized reference string, for icon lookups.
    reference: &'a LangMap,
    /// Advancement data, for advancement decks.
    advancements: Option<BTreeMap<String, AdvancementData>>,
    /// Images found missing so far.
    missing: Vec<PathBuf>,
}

/// What: Build the plan of one category deck.
///
/// Inputs:
/// - `category`: Deck to plan.
/// - `sorted`: Aligned locales restricted to `category`.
/// - `reference`: Every normalized reference string (for advancement icons).
/// - `settings`: Folders and font table.
///
/// Output:
/// - `DeckPlan` with one slide per aligned entry.
///
/// # Errors
/// - `PlanError::Load` when advancement data is needed but cannot be read.
///
/// Details:
/// - Missing or unreadable images are listed in `missing_images` and logged;
///   the slide is planned without a picture.
pub fn build_deck_plan(
    category: Category,
    sorted: &SortedLocales,
    reference: &LangMap,
    settings: &Settings,
) -> Result<DeckPlan, PlanError> {
    let advancements = if category == Category::Advancement {
        Some(load_advancement_data(&settings.advancements_data_path())?)
    } else {
        None
    };
    let mut ctx = DeckContext {
        settings,
        image_dir: settings.image_dir(),
        reference,
        advancements,
        missing: Vec::new(),
    };

    let slides: Vec<SlidePlan> = sorted
        .reference()
        .iter()
        .enumerate()
        .map(|(index, (key, value))| plan_slide(&mut ctx, category, sorted, index, key, value))
        .collect();

    let (template, copied, output) = deck_files(&settings.slide_dir(), category);
    info!(
        category = %category,
        slides = slides.len(),
        missing_images = ctx.missing.len(),
        "deck planned"
    );
    Ok(DeckPlan {
        category,
        slide_count: slides.len(),
        template,
        copied,
        output,
        slides,
        missing_images: ctx.missing,
    })
}

/// Plan slide `index`.
fn plan_slide(
    ctx: &mut DeckContext<'_>,
    category: Category,
    sorted: &SortedLocales,
    index: usize,
    key: &str,
    value: &str,
) -> SlidePlan {
    let slide = &ctx.settings.slide;
    let texts = vec![
        TextFill {
            placeholder: SOURCE_PLACEHOLDER,
            text: value.to_string(),
            style: slide.style("source"),
        },
        TextFill {
            placeholder: KEY_PLACEHOLDER,
            text: key.to_string(),
            style: slide.style("translation_key"),
        },
    ];

    let table = sorted
        .locales()
        .iter()
        .filter(|(code, _)| code != sorted.reference_code())
        .enumerate()
        .filter_map(|(i, (code, entries))| {
            entries.get(index).map(|(_, text)| TableCell {
                row: i + 1,
                column: TABLE_COLUMN,
                locale: code.clone(),
                text: text.clone(),
                style: slide.style(code),
            })
        })
        .collect();

    let image = if IMAGE_CATEGORIES.contains(&category) {
        let path = candidates::image_path(&ctx.image_dir, category, value);
        ctx.picture(path, fit_image)
    } else {
        None
    };

    let overlay = if category == Category::Advancement {
        ctx.overlay(key)
    } else {
        None
    };

    SlidePlan {
        index,
        key: key.to_string(),
        texts,
        table,
        image,
        overlay,
    }
}

impl DeckContext<'_> {
    /// Place the picture at `path`, or record it as missing.
    fn picture(
        &mut self,
        path: PathBuf,
        place: impl FnOnce(u32, u32) -> Placement,
    ) -> Option<Picture> {
        match image::image_dimensions(&path) {
            Ok((width, height)) => {
                debug!(path = %path.display(), width, height, "image measured");
                Some(Picture {
                    placement: place(width, height),
                    path,
                })
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "image unavailable");
                self.missing.push(path);
                None
            }
        }
    }

    /// What: Frame and icon of advancement `key`.
    ///
    /// Details:
    /// - Icons resolve as `item.minecraft.<icon>` first, then
    ///   `block.minecraft.<icon>`; the image lives under that category's folder.
    fn overlay(&mut self, key: &str) -> Option<Overlay> {
        let Some(data) = self.advancements.as_ref().and_then(|d| d.get(key)).cloned() else {
            warn!(key, "no advancement data; overlay skipped");
            return None;
        };
        let frame_path = self
            .image_dir
            .join(Category::Advancement.folder())
            .join(candidates::image_file_name(&data.frame));
        let frame = self.picture(frame_path, |_, _| ADVANCEMENT_FRAME)?;

        let icon = [Category::Item, Category::Block]
            .into_iter()
            .find_map(|category| {
                let prefix = if category == Category::Item { "item" } else { "block" };
                self.reference
                    .get(&format!("{prefix}.minecraft.{}", data.icon))
                    .map(|display| candidates::image_path(&self.image_dir, category, display))
            });
        let icon = match icon {
            Some(path) => self.picture(path, |_, _| ADVANCEMENT_ICON),
            None => {
                warn!(key, icon = %data.icon, "icon is neither an item nor a block");
                None
            }
        };
        Some(Overlay { frame, icon })
    }
}

/// What: Write a plan as pretty JSON next to the deck.
///
/// Inputs:
/// - `slide_dir`: Configured slide folder.
/// - `plan`: Plan to write.
///
/// Output:
/// - Path of the written `plan.json`.
///
/// # Errors
/// - `PlanError::Io` when the folder or file cannot be written.
pub fn write_plan(slide_dir: &Path, plan: &DeckPlan) -> Result<PathBuf, PlanError> {
    let path = plan_path(slide_dir, plan.category);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PlanError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut json = serde_json::to_string_pretty(plan)?;
    json.push('\n');
    fs::write(&path, json).map_err(|source| PlanError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
