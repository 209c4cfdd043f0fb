//! Slide plans built from the fixture project.

use std::fs;

use langslide::lang::{Category, load_language_set, sort_locales};
use langslide::slide::{self, KEY_PLACEHOLDER, SOURCE_PLACEHOLDER};

use crate::common::Project;

#[test]
/// What: The item deck plan covers every item with styled text and table cells.
///
/// Inputs:
/// - Fixture project, item category, `Stick.png` on disk.
///
/// Output:
/// - One slide per item, the stick slide with a picture, the rest listed missing,
///   `plan.json` written under the item deck folder.
fn item_plan_is_written() {
    let project = Project::new();
    let settings = project.settings();
    let stick = settings.image_dir().join("item").join("Stick.png");
    fs::create_dir_all(stick.parent().expect("parent")).expect("mkdir");
    image::RgbaImage::new(160, 160).save(&stick).expect("png");

    let set = load_language_set(&settings).expect("load");
    let sorted = sort_locales(&set, &[Category::Item]).expect("sort");
    let plan = slide::build_deck_plan(Category::Item, &sorted, &set.reference().strings, &settings)
        .expect("plan");

    assert_eq!(plan.slide_count, sorted.len());
    assert_eq!(plan.slide_count, 5);
    assert_eq!(plan.missing_images.len(), 4);

    let stick_slide = plan
        .slides
        .iter()
        .find(|s| s.key == "item.minecraft.stick")
        .expect("stick slide");
    assert_eq!(stick_slide.texts[0].placeholder, SOURCE_PLACEHOLDER);
    assert_eq!(stick_slide.texts[0].text, "Stick");
    assert_eq!(stick_slide.texts[0].style.size, Some(40.0));
    assert_eq!(stick_slide.texts[1].placeholder, KEY_PLACEHOLDER);
    assert_eq!(stick_slide.texts[1].style.font.as_deref(), Some("Consolas"));
    assert_eq!(stick_slide.table[0].text, "木棍");
    assert_eq!(stick_slide.table[0].style.size, Some(28.0));
    assert!(stick_slide.image.is_some());

    let path = slide::write_plan(&settings.slide_dir(), &plan).expect("write");
    assert_eq!(path, project.root().join("slide").join("item").join("plan.json"));
    let text = fs::read_to_string(path).expect("read");
    assert!(text.contains("\"slide_count\": 5"));
    assert!(text.contains("木棍"));
}
