use super::{Rgb, clamp_u8};

/// Warmest Kelvin the warm/cold pair can reproduce
pub const WWA_KELVIN_MIN: f32 = 2200.0;
/// Coldest Kelvin the warm/cold pair can reproduce
pub const WWA_KELVIN_MAX: f32 = 6500.0;
/// Below this temperature the amber channel is blended in
const AMBER_KELVIN_START: f32 = 3000.0;

/// Channel intensities of a warm/cold/amber strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarmColdAmber {
    pub warm: u8,
    pub cold: u8,
    pub amber: u8,
}

impl WarmColdAmber {
    /// Map onto the strip channels (red=warm, green=cold, blue=amber).
    pub const fn to_channels(self) -> Rgb {
        Rgb {
            r: self.warm,
            g: self.cold,
            b: self.amber,
        }
    }
}

/// Convert a color temperature into warm/cold/amber intensities
///
/// Warm and cold are interpolated linearly over 2200K..6500K, amber ramps
/// up from 0 at 3000K to full at 2200K. Kelvin outside the range saturates.
pub fn kelvin_to_wwa(kelvin: f32) -> WarmColdAmber {
    let kelvin = kelvin.clamp(WWA_KELVIN_MIN, WWA_KELVIN_MAX);
    let t = (kelvin - WWA_KELVIN_MIN) / (WWA_KELVIN_MAX - WWA_KELVIN_MIN);

    let amber = if kelvin < AMBER_KELVIN_START {
        (AMBER_KELVIN_START - kelvin) / (AMBER_KELVIN_START - WWA_KELVIN_MIN) * 255.0
    } else {
        0.0
    };

    WarmColdAmber {
        warm: clamp_u8((1.0 - t) * 255.0),
        cold: clamp_u8(t * 255.0),
        amber: clamp_u8(amber),
    }
}
