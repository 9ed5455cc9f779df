//! Driver for the OBEGRÄNSAD panel itself: a 1-bit frame with the serpentine
//! wiring of the SCT2024 chain, the presentation state machine, and the
//! shift-register writer.

use embedded_hal::digital::OutputPin;
use fugit::MicrosDurationU32;
use log::debug;

use crate::display::{AnimationStyle, DisplayAdapter, DisplayMode, Presentation, DISPLAY_SIZE};
use crate::present::DEFAULT_INTERVAL;

const BIT_COUNT: usize = DISPLAY_SIZE * DISPLAY_SIZE;
pub const BYTE_COUNT: usize = BIT_COUNT / 8;

static PIXEL_TO_BIT: [u8; BIT_COUNT] = [
    16, 17, 18, 19, 20, 21, 22, 23, 0, 1, 2, 3, 4, 5, 6, 7,
    31, 30, 29, 28, 27, 26, 25, 24, 15, 14, 13, 12, 11, 10, 9, 8,
    32, 33, 34, 35, 36, 37, 38, 39, 48, 49, 50, 51, 52, 53, 54, 55,
    47, 46, 45, 44, 43, 42, 41, 40, 63, 62, 61, 60, 59, 58, 57, 56,
    80, 81, 82, 83, 84, 85, 86, 87, 64, 65, 66, 67, 68, 69, 70, 71,
    95, 94, 93, 92, 91, 90, 89, 88, 79, 78, 77, 76, 75, 74, 73, 72,
    96, 97, 98, 99, 100, 101, 102, 103, 112, 113, 114, 115, 116, 117, 118, 119,
    111, 110, 109, 108, 107, 106, 105, 104, 127, 126, 125, 124, 123, 122, 121, 120,
    144, 145, 146, 147, 148, 149, 150, 151, 128, 129, 130, 131, 132, 133, 134, 135,
    159, 158, 157, 156, 155, 154, 153, 152, 143, 142, 141, 140, 139, 138, 137, 136,
    160, 161, 162, 163, 164, 165, 166, 167, 176, 177, 178, 179, 180, 181, 182, 183,
    175, 174, 173, 172, 171, 170, 169, 168, 191, 190, 189, 188, 187, 186, 185, 184,
    208, 209, 210, 211, 212, 213, 214, 215, 192, 193, 194, 195, 196, 197, 198, 199,
    223, 222, 221, 220, 219, 218, 217, 216, 207, 206, 205, 204, 203, 202, 201, 200,
    224, 225, 226, 227, 228, 229, 230, 231, 240, 241, 242, 243, 244, 245, 246, 247,
    239, 238, 237, 236, 235, 234, 233, 232, 255, 254, 253, 252, 251, 250, 249, 248,
];

struct ActivePresentation {
    request: Presentation,
    /// Leftmost image column currently mapped to panel column 0.
    window: i32,
}

impl ActivePresentation {
    fn new(request: Presentation) -> Self {
        let window = match request.style {
            // Scrolled images enter from the edge, one panel off-screen.
            AnimationStyle::Scroll { .. } => -(DISPLAY_SIZE as i32),
            _ => -request.x,
        };
        Self { request, window }
    }

    /// Advances one animation step. Static content stays put; timed strips
    /// jump one frame width; scrolls move by their step and wrap once the
    /// image has fully left the panel.
    fn advance(&mut self) -> MicrosDurationU32 {
        let width = self.request.image.width() as i32;
        match self.request.style {
            AnimationStyle::Static => DEFAULT_INTERVAL,
            AnimationStyle::Timed => {
                self.window = (self.window + DISPLAY_SIZE as i32).rem_euclid(width);
                self.request.interval
            }
            AnimationStyle::Scroll { step } => {
                let span = width + DISPLAY_SIZE as i32;
                let mut window = self.window + step;
                while window >= width {
                    window -= span;
                }
                while window < -(DISPLAY_SIZE as i32) {
                    window += span;
                }
                self.window = window;
                self.request.interval
            }
        }
    }
}

/// The physical 16x16 panel.
///
/// Holds at most one active presentation; a new [`DisplayAdapter::present`]
/// replaces whatever is on screen. The hosting firmware calls [`tick`] from
/// its alarm loop and shifts the resulting frame out via [`PanelPins`].
///
/// [`tick`]: ObegraensadPanel::tick
pub struct ObegraensadPanel {
    mode: DisplayMode,
    brightness: u8,
    frame: [u8; BYTE_COUNT],
    active: Option<ActivePresentation>,
}

impl ObegraensadPanel {
    pub fn new() -> Self {
        Self {
            mode: DisplayMode::Normal,
            brightness: 255,
            frame: [0; BYTE_COUNT],
            active: None,
        }
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    /// Re-renders the current window, advances the animation state, and
    /// returns the duration this frame should be displayed for.
    pub fn tick(&mut self) -> MicrosDurationU32 {
        let interval = match &mut self.active {
            Some(active) => active.advance(),
            None => DEFAULT_INTERVAL,
        };
        self.render_active();
        interval
    }

    pub fn to_output_buffer(&self, buffer: &mut [u8; BYTE_COUNT]) {
        buffer.copy_from_slice(&self.frame);
    }

    fn render_active(&mut self) {
        self.frame = [0; BYTE_COUNT];
        let (image, window) = match &self.active {
            Some(active) => (active.request.image.clone(), active.window),
            None => return,
        };
        for y in 0..DISPLAY_SIZE {
            for x in 0..DISPLAY_SIZE {
                // columns outside the image read 0 and stay dark
                if image.pixel_brightness(x as i32 + window, y as i32) > 0 {
                    self.set_frame_pixel(x as u8, y as u8);
                }
            }
        }
    }

    fn set_frame_pixel(&mut self, x: u8, y: u8) {
        if x >= DISPLAY_SIZE as u8 || y >= DISPLAY_SIZE as u8 {
            return;
        }
        let pixel_index = ((y as usize) << 4) | x as usize;
        let bit_index = PIXEL_TO_BIT[pixel_index];
        let byte_index = bit_index >> 3;
        let bit_in_byte = bit_index & 0b0000_0111;
        self.frame[byte_index as usize] |= 1 << bit_in_byte;
    }
}

impl DisplayAdapter for ObegraensadPanel {
    fn mode(&self) -> DisplayMode {
        self.mode
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn present(&mut self, request: Presentation) {
        debug!("present {:?} at x {}", request.style, request.x);
        self.active = Some(ActivePresentation::new(request));
        self.render_active();
    }

    fn clear(&mut self) {
        self.active = None;
        self.frame = [0; BYTE_COUNT];
    }
}

/// The three control lines of the SCT2024 chain.
pub struct PanelPins<DI, CLK, LAT> {
    pub data: DI,
    pub clock: CLK,
    pub latch: LAT,
}

impl<E, DI, CLK, LAT> PanelPins<DI, CLK, LAT>
where
    DI: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    LAT: OutputPin<Error = E>,
{
    /// Shifts a frame out MSB-first, then latches it onto the LEDs.
    pub fn write_frame(&mut self, buffer: &[u8; BYTE_COUNT]) -> Result<(), E> {
        self.latch.set_low()?;
        for &byte in buffer {
            for bit in (0..8).rev() {
                self.clock.set_low()?;
                if byte & (1 << bit) != 0 {
                    self.data.set_high()?;
                } else {
                    self.data.set_low()?;
                }
                // data is sampled on the rising clock edge
                self.clock.set_high()?;
            }
        }
        self.latch.set_high()?;
        Ok(())
    }
}
