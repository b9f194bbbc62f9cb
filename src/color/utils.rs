use super::Rgb;

/// Full scale of the 16-bit chromaticity encoding
const XY_SCALE: f32 = 65535.0;

/// Clamp a float channel into `0..=255` and truncate it
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

/// Scale every channel by `numerator / denominator`
///
/// Used to ramp the color during fades. A zero denominator yields black.
#[allow(clippy::cast_possible_truncation)]
pub fn scale_color(color: Rgb, numerator: u32, denominator: u32) -> Rgb {
    if denominator == 0 {
        return Rgb::default();
    }
    let numerator = numerator.min(denominator);
    let scale = |c: u8| (u32::from(c) * numerator / denominator) as u8;
    Rgb {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}

/// Convert CIE 1931 chromaticity into sRGB at full brightness
///
/// `x` and `y` use the 16-bit encoding (`65535` = 1.0). Luminance is fixed
/// at `Y = 1`. When `y` is zero the tristimulus values are undefined, so the
/// result is black instead of a division by zero.
pub fn xy_to_rgb(x: u16, y: u16) -> Rgb {
    if y == 0 {
        return Rgb::default();
    }
    let x = f32::from(x) / XY_SCALE;
    let y = f32::from(y) / XY_SCALE;

    let big_x = x / y;
    let big_y = 1.0;
    let big_z = (1.0 - x - y) / y;

    // XYZ -> linear sRGB (D65)
    let r = 3.240_479 * big_x - 1.537_150 * big_y - 0.498_535 * big_z;
    let g = -0.969_256 * big_x + 1.875_992 * big_y + 0.041_556 * big_z;
    let b = 0.055_648 * big_x - 0.204_043 * big_y + 1.057_311 * big_z;

    Rgb {
        r: clamp_u8(r.clamp(0.0, 1.0) * 255.0),
        g: clamp_u8(g.clamp(0.0, 1.0) * 255.0),
        b: clamp_u8(b.clamp(0.0, 1.0) * 255.0),
    }
}

/// Convert 8-bit hue/saturation into RGB with value at maximum
///
/// Hue `0..=255` covers the full color wheel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hue: u8, sat: u8) -> Rgb {
    let h = f32::from(hue) / 255.0 * 360.0;
    let s = f32::from(sat) / 255.0;
    let v = 1.0;

    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - libm::fabsf(libm::fmodf(sector, 2.0) - 1.0));
    let m = v - c;

    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb {
        r: clamp_u8((r + m) * 255.0),
        g: clamp_u8((g + m) * 255.0),
        b: clamp_u8((b + m) * 255.0),
    }
}
