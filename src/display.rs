//! Boundary types for the hardware-facing display driver.

use fugit::MicrosDurationU32;

use crate::image::ManagedImage;

/// Edge length of the square panel, and therefore the width of one frame in
/// a multi-frame sprite strip.
pub const DISPLAY_SIZE: usize = 16;

/// Rendering mode the display is currently in. Queried at presentation time;
/// owned by the driver, not by this crate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DisplayMode {
    Normal,
    Greyscale,
}

/// How the driver should advance a presented image over time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnimationStyle {
    /// Draw once and hold.
    Static,
    /// Advance by one frame width per interval.
    Timed,
    /// Continuous horizontal scroll by `step` pixels per interval.
    Scroll { step: i32 },
}

/// One fire-and-forget presentation request.
///
/// The image handle inside the request shares its buffer with the caller;
/// copy-on-write keeps an in-flight presentation intact if the caller keeps
/// drawing on its own handle.
#[derive(Clone, Debug)]
pub struct Presentation {
    pub image: ManagedImage,
    /// Panel column at which the image's left edge lands. Negative values
    /// shift the visible window rightward across the image.
    pub x: i32,
    /// Delay between animation steps; ignored for `Static`.
    pub interval: MicrosDurationU32,
    pub style: AnimationStyle,
}

/// The display driver as seen from the sprite core.
///
/// `present` must not block: the driver records the request, takes over the
/// timing loop, and a new request replaces whatever is currently on screen.
pub trait DisplayAdapter {
    /// Current rendering mode.
    fn mode(&self) -> DisplayMode;

    /// Configured global intensity for lit pixels, 0-255.
    fn brightness(&self) -> u8;

    /// Replaces the on-screen content with `request`.
    fn present(&mut self, request: Presentation);

    /// Drops any active presentation and blanks the panel.
    fn clear(&mut self);
}
