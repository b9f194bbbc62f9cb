use super::{Rgb, clamp_u8};

/// Coldest color temperature the lamp reports (~6500K)
pub const MIREDS_COLDEST: u16 = 153;
/// Warmest color temperature the lamp reports (~2200K)
pub const MIREDS_WARMEST: u16 = 454;
/// Color temperature used before anything was stored
pub const MIREDS_DEFAULT: u16 = 250;

const BLACKBODY_KELVIN_MIN: f32 = 1000.0;
const BLACKBODY_KELVIN_MAX: f32 = 40000.0;

/// Convert mireds into Kelvin.
///
/// Zero mireds is treated as one, so the result is always finite.
#[inline]
pub fn mireds_to_kelvin(mireds: u16) -> f32 {
    1_000_000.0 / f32::from(mireds.max(1))
}

/// Approximate the color of a blackbody radiator at `kelvin`
///
/// Uses the piecewise log/power fit (separate branches above and below
/// 6600K). Input is clamped to 1000K..40000K.
pub fn blackbody_to_rgb(kelvin: f32) -> Rgb {
    let temp = kelvin.clamp(BLACKBODY_KELVIN_MIN, BLACKBODY_KELVIN_MAX) / 100.0;

    let (red, green) = if temp <= 66.0 {
        (255.0, 99.470_8 * libm::logf(temp) - 161.119_57)
    } else {
        let shifted = temp - 60.0;
        (
            329.698_73 * libm::powf(shifted, -0.133_204_76),
            288.122_17 * libm::powf(shifted, -0.075_514_85),
        )
    };

    let blue = if temp >= 66.0 {
        255.0
    } else if temp <= 19.0 {
        0.0
    } else {
        138.517_73 * libm::logf(temp - 10.0) - 305.044_8
    };

    Rgb {
        r: clamp_u8(red),
        g: clamp_u8(green),
        b: clamp_u8(blue),
    }
}
