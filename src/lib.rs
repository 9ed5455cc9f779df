//! Sprite images and presentation for IKEA's OBEGRÄNSAD LED matrix.
//!
//! Images are reference-counted, copy-on-write pixel buffers: cloning a
//! [`ManagedImage`] aliases the same storage, and any write first promotes
//! the writing handle to a private writable copy. Presentation operations
//! ([`plot_image`], [`show_image`], [`scroll_image`] and the frame-strip
//! variants) remap pixel brightness for the display's current mode and hand
//! the buffer to a [`DisplayAdapter`] together with placement and timing.
//! [`ObegraensadPanel`] is the adapter for the panel itself; the hosting
//! firmware drives it from its alarm loop:
//!
//! ```
//! use obegraensad_sprites::{plot_frame, ManagedImage, ObegraensadPanel, DISPLAY_SIZE};
//!
//! static ARROWS: [u8; 2 * DISPLAY_SIZE * DISPLAY_SIZE] = [0; 2 * DISPLAY_SIZE * DISPLAY_SIZE];
//!
//! let mut panel = ObegraensadPanel::new();
//! let mut strip = ManagedImage::from_literal(2 * DISPLAY_SIZE, DISPLAY_SIZE, &ARROWS);
//! plot_frame(&mut panel, &mut strip, 1);
//! let frame_duration = panel.tick();
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod display;
mod image;
mod panel;
mod present;

pub use display::{AnimationStyle, DisplayAdapter, DisplayMode, Presentation, DISPLAY_SIZE};
pub use image::{ImageBuffer, ManagedImage};
pub use panel::{ObegraensadPanel, PanelPins, BYTE_COUNT};
pub use present::{
    plot_frame, plot_image, scroll_image, show_frame, show_image, DEFAULT_INTERVAL,
};
