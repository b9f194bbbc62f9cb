use crate::state::{Frame, LightState};

/// Current drawn by one pixel channel at full brightness
pub const CHANNEL_CURRENT_MA: f32 = 20.0;

/// Estimate the current the strip draws for `frame`, in mA
pub fn estimate_current_ma(frame: &Frame) -> f32 {
    if frame.lit_count == 0 {
        return 0.0;
    }
    let channels = f32::from(frame.color.r) + f32::from(frame.color.g) + f32::from(frame.color.b);
    #[allow(clippy::cast_precision_loss)]
    let lit = frame.lit_count as f32;
    lit * CHANNEL_CURRENT_MA * channels / 255.0
}

/// Log the estimated strip current for `state`
pub fn report(state: &LightState, led_count: usize) {
    let frame = state.frame(led_count);
    let current = estimate_current_ma(&frame);
    log::info!(
        "Power estimate: {:.1} mA (lit={}, level={}, rgb={},{},{})",
        current,
        frame.lit_count,
        state.level,
        state.color.r,
        state.color.g,
        state.color.b
    );
}
