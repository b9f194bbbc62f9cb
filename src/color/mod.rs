//! Color conversion engine
//!
//! Pure functions mapping protocol color inputs (chromaticity, hue/saturation,
//! color temperature) onto strip channel intensities. Intermediate math is done
//! in `f32` and clamped before truncation, so no input is ever rejected.

mod kelvin;
mod utils;
mod wwa;

pub use kelvin::{
    MIREDS_COLDEST, MIREDS_DEFAULT, MIREDS_WARMEST, blackbody_to_rgb, mireds_to_kelvin,
};
pub use utils::{clamp_u8, hsv_to_rgb, scale_color, xy_to_rgb};
pub use wwa::{WWA_KELVIN_MAX, WWA_KELVIN_MIN, WarmColdAmber, kelvin_to_wwa};
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Physical lamp topology used when mapping color temperature onto the strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CctMapping {
    /// Strip is wired red=warm, green=cold, blue=amber.
    #[default]
    WarmColdAmber,
    /// Plain RGB strip, approximated with the blackbody curve.
    Blackbody,
}

impl CctMapping {
    /// Convert a color temperature in mireds into channel intensities.
    pub fn mireds_to_channels(self, mireds: u16) -> Rgb {
        let kelvin = mireds_to_kelvin(mireds);
        match self {
            Self::WarmColdAmber => kelvin_to_wwa(kelvin).to_channels(),
            Self::Blackbody => blackbody_to_rgb(kelvin),
        }
    }
}
