//! Slide geometry, in centimetres on a 33.867 x 19.05 cm (16:9) slide.

use serde::Serialize;

/// Slide height in centimetres.
const SLIDE_HEIGHT_CM: f64 = 19.05;
/// Template pixels per slide height.
const SLIDE_HEIGHT_PX: f64 = 720.0;
/// Horizontal centre of the image area.
const IMAGE_CENTER_X: f64 = 28.57;
/// Vertical offset below the title band.
const IMAGE_OFFSET_Y: f64 = 0.38;
/// Height above which an image is shrunk.
const MAX_HEIGHT: f64 = 12.0;
/// Height a tall image is shrunk to.
const FIT_HEIGHT: f64 = 11.5;
/// Widest allowed image.
const MAX_WIDTH: f64 = 8.0;

/// Position and size of a picture on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Distance from the left edge.
    pub left: f64,
    /// Distance from the top edge.
    pub top: f64,
    /// Picture width.
    pub width: f64,
    /// Picture height.
    pub height: f64,
}

/// Advancement frame, behind the icon.
pub const ADVANCEMENT_FRAME: Placement = Placement {
    left: 25.82,
    top: 7.3,
    width: 5.2,
    height: 5.2,
};

/// Advancement icon, centred in the frame.
pub const ADVANCEMENT_ICON: Placement = Placement {
    left: 26.82,
    top: 8.3,
    width: 3.2,
    height: 3.2,
};

/// Convert template pixels to centimetres.
fn px_to_cm(px: u32) -> f64 {
    f64::from(px) / SLIDE_HEIGHT_PX * SLIDE_HEIGHT_CM
}

/// What: Scale an image into the picture area and centre it.
///
/// Inputs:
/// - `width_px`, `height_px`: Pixel size of the image file.
///
/// Output:
/// - `Placement` in centimetres.
///
/// Details:
/// - Images taller than 12 cm are shrunk to 11.5 cm, then images wider than
///   8 cm are shrunk to 8 cm; both keep the aspect ratio.
/// - The result is centred on x = 28.57 cm and vertically on the slide,
///   0.38 cm lower to clear the title band.
#[must_use]
pub fn fit_image(width_px: u32, height_px: u32) -> Placement {
    let mut width = px_to_cm(width_px);
    let mut height = px_to_cm(height_px);
    if height > MAX_HEIGHT {
        width = width * FIT_HEIGHT / height;
        height = FIT_HEIGHT;
    }
    if width > MAX_WIDTH {
        height = height * MAX_WIDTH / width;
        width = MAX_WIDTH;
    }
    Placement {
        left: IMAGE_CENTER_X - width / 2.0,
        top: (SLIDE_HEIGHT_CM - height) / 2.0 + IMAGE_OFFSET_Y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Float comparison at 1e-9 cm.
    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    /// What: Small images keep their size and are centred.
    ///
    /// Inputs:
    /// - 150 x 150 px sprite.
    ///
    /// Output:
    /// - 3.96875 cm square centred on the image area.
    fn small_image_is_centred() {
        let p = fit_image(150, 150);
        assert!(close(p.width, 3.968_75));
        assert!(close(p.height, 3.968_75));
        assert!(close(p.left, 28.57 - 3.968_75 / 2.0));
        assert!(close(p.top, (19.05 - 3.968_75) / 2.0 + 0.38));
    }

    #[test]
    /// What: Tall images are shrunk to 11.5 cm.
    ///
    /// Inputs:
    /// - 200 x 600 px render (15.875 cm tall).
    ///
    /// Output:
    /// - Height 11.5 cm, width scaled by the same factor.
    fn tall_image_is_shrunk() {
        let p = fit_image(200, 600);
        assert!(close(p.height, 11.5));
        assert!(close(p.width, 200.0 / 600.0 * 11.5));
    }

    #[test]
    /// What: Wide images are shrunk to 8 cm after the height rule.
    ///
    /// Inputs:
    /// - 720 x 360 px render (19.05 x 9.525 cm).
    ///
    /// Output:
    /// - Width 8 cm, height 4 cm, never taller than 11.5 cm.
    fn wide_image_is_shrunk() {
        let p = fit_image(720, 360);
        assert!(close(p.width, 8.0));
        assert!(close(p.height, 4.0));
        for (w, h) in [(2000, 2000), (100, 5000), (5000, 100)] {
            let p = fit_image(w, h);
            assert!(p.width <= MAX_WIDTH + 1e-9 && p.height <= MAX_HEIGHT);
        }
    }
}
