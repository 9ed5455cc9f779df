//! Presentation operations: brightness remapping for the current display
//! mode, frame/offset addressing, and dispatch to the display driver.

use fugit::MicrosDurationU32;
use log::trace;

use crate::display::{AnimationStyle, DisplayAdapter, DisplayMode, Presentation, DISPLAY_SIZE};
use crate::image::ManagedImage;

/// Conventional delay between animation steps when the caller has no
/// particular preference.
pub const DEFAULT_INTERVAL: MicrosDurationU32 = MicrosDurationU32::millis(400);

/// In greyscale mode the hardware renders every lit pixel at one uniform
/// level, so graded intensities are collapsed to the display's configured
/// brightness before handoff. Lossy and in-place, but only ever on storage
/// private to this handle: the promotion leaves aliased handles untouched.
fn remap_for_mode<D: DisplayAdapter>(display: &D, image: &mut ManagedImage) {
    if display.mode() != DisplayMode::Greyscale {
        return;
    }
    image.make_writable();
    let level = display.brightness();
    for y in 0..image.height() as i32 {
        for x in 0..image.width() as i32 {
            if image.pixel_brightness(x, y) > 0 {
                image.set_pixel_brightness(x, y, level);
            }
        }
    }
}

/// Plots `image` statically. A positive `x_offset` shifts the visible window
/// rightward across the image, so the dispatched position is `-x_offset`.
pub fn plot_image<D: DisplayAdapter>(display: &mut D, image: &mut ManagedImage, x_offset: i32) {
    remap_for_mode(display, image);
    trace!("plot image at x offset {}", x_offset);
    display.present(Presentation {
        image: image.clone(),
        x: -x_offset,
        interval: MicrosDurationU32::millis(0),
        style: AnimationStyle::Static,
    });
}

/// Like [`plot_image`], but asks the driver to animate the image at
/// `interval` per step. Returns once the request is issued; the driver owns
/// the timing loop.
pub fn show_image<D: DisplayAdapter>(
    display: &mut D,
    image: &mut ManagedImage,
    x_offset: i32,
    interval: MicrosDurationU32,
) {
    remap_for_mode(display, image);
    trace!("show image at x offset {} every {}", x_offset, interval);
    display.present(Presentation {
        image: image.clone(),
        x: -x_offset,
        interval,
        style: AnimationStyle::Timed,
    });
}

/// Plots frame `frame` of a multi-frame strip.
pub fn plot_frame<D: DisplayAdapter>(display: &mut D, image: &mut ManagedImage, frame: i32) {
    plot_image(display, image, frame * DISPLAY_SIZE as i32);
}

/// Shows frame `frame` of a multi-frame strip, animated at `interval`.
pub fn show_frame<D: DisplayAdapter>(
    display: &mut D,
    image: &mut ManagedImage,
    frame: i32,
    interval: MicrosDurationU32,
) {
    show_image(display, image, frame * DISPLAY_SIZE as i32, interval);
}

/// Requests a continuous horizontal scroll, `frame_offset` pixels per step.
/// The remap happens once up front; the driver owns the stepping loop.
pub fn scroll_image<D: DisplayAdapter>(
    display: &mut D,
    image: &mut ManagedImage,
    frame_offset: i32,
    interval: MicrosDurationU32,
) {
    remap_for_mode(display, image);
    trace!("scroll image by {} every {}", frame_offset, interval);
    display.present(Presentation {
        image: image.clone(),
        x: 0,
        interval,
        style: AnimationStyle::Scroll { step: frame_offset },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    struct MockDisplay {
        mode: DisplayMode,
        brightness: u8,
        presented: Vec<Presentation>,
    }

    impl MockDisplay {
        fn new(mode: DisplayMode, brightness: u8) -> Self {
            Self {
                mode,
                brightness,
                presented: Vec::new(),
            }
        }

        fn last(&self) -> &Presentation {
            self.presented.last().expect("nothing presented")
        }
    }

    impl DisplayAdapter for MockDisplay {
        fn mode(&self) -> DisplayMode {
            self.mode
        }

        fn brightness(&self) -> u8 {
            self.brightness
        }

        fn present(&mut self, request: Presentation) {
            self.presented.push(request);
        }

        fn clear(&mut self) {
            self.presented.clear();
        }
    }

    static GRADED: [u8; 3] = [0, 10, 255];

    #[test]
    fn normal_mode_passes_buffer_through() {
        let mut display = MockDisplay::new(DisplayMode::Normal, 128);
        let mut img = ManagedImage::from_literal(3, 1, &GRADED);

        plot_image(&mut display, &mut img, 3);

        let sent = display.last();
        assert_eq!(sent.x, -3);
        assert_eq!(sent.style, AnimationStyle::Static);
        // untouched: still the read-only literal
        assert!(sent.image.shares_buffer_with(&img));
        assert!(img.buffer().is_read_only());
        assert_eq!(img.buffer().pixels(), &GRADED);
    }

    #[test]
    fn greyscale_mode_collapses_brightness() {
        let mut display = MockDisplay::new(DisplayMode::Greyscale, 128);
        let mut img = ManagedImage::from_literal(3, 1, &GRADED);

        plot_image(&mut display, &mut img, 0);

        assert_eq!(img.pixel_brightness(0, 0), 0);
        assert_eq!(img.pixel_brightness(1, 0), 128);
        assert_eq!(img.pixel_brightness(2, 0), 128);
        // the driver sees the collapsed buffer, not a second copy
        assert!(display.last().image.shares_buffer_with(&img));
    }

    #[test]
    fn greyscale_remap_leaves_aliases_intact() {
        let mut display = MockDisplay::new(DisplayMode::Greyscale, 7);
        let mut img = ManagedImage::from_literal(3, 1, &GRADED);
        let alias = img.clone();

        show_image(&mut display, &mut img, 0, DEFAULT_INTERVAL);

        assert!(!img.shares_buffer_with(&alias));
        assert_eq!(alias.pixel_brightness(1, 0), 10);
        assert_eq!(img.pixel_brightness(1, 0), 7);
    }

    #[test]
    fn frame_addressing_matches_direct_offset() {
        let mut display = MockDisplay::new(DisplayMode::Normal, 255);
        let mut strip = ManagedImage::new(3 * DISPLAY_SIZE, DISPLAY_SIZE);

        plot_frame(&mut display, &mut strip, 1);
        plot_image(&mut display, &mut strip, DISPLAY_SIZE as i32);

        let by_frame = &display.presented[0];
        let by_offset = &display.presented[1];
        assert_eq!(by_frame.x, -(DISPLAY_SIZE as i32));
        assert_eq!(by_frame.x, by_offset.x);
        assert!(by_frame.image.shares_buffer_with(&by_offset.image));
    }

    #[test]
    fn show_carries_interval_and_style() {
        let mut display = MockDisplay::new(DisplayMode::Normal, 255);
        let mut img = ManagedImage::new(DISPLAY_SIZE, DISPLAY_SIZE);

        show_frame(&mut display, &mut img, 2, MicrosDurationU32::millis(150));

        let sent = display.last();
        assert_eq!(sent.x, -(2 * DISPLAY_SIZE as i32));
        assert_eq!(sent.interval, MicrosDurationU32::millis(150));
        assert_eq!(sent.style, AnimationStyle::Timed);
    }

    #[test]
    fn scroll_carries_step() {
        let mut display = MockDisplay::new(DisplayMode::Normal, 255);
        let mut img = ManagedImage::new(2 * DISPLAY_SIZE, DISPLAY_SIZE);

        scroll_image(&mut display, &mut img, 2, MicrosDurationU32::millis(200));

        let sent = display.last();
        assert_eq!(sent.style, AnimationStyle::Scroll { step: 2 });
        assert_eq!(sent.interval, MicrosDurationU32::millis(200));
    }
}
