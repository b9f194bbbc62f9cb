use crate::OutputDriver;
use crate::color::Rgb;
use crate::error::RenderError;
use crate::state::{Frame, LightState};

const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Frame renderer - pushes derived frames to the strip
///
/// Every render writes all pixels: the lit range in the frame color, black
/// everywhere else, followed by a single flush.
pub struct FrameRenderer<D> {
    driver: D,
    led_count: usize,
}

impl<D: OutputDriver> FrameRenderer<D> {
    pub const fn new(driver: D, led_count: usize) -> Self {
        Self { driver, led_count }
    }

    /// Render the frame derived from `state`
    pub fn render(&mut self, state: &LightState) -> Result<Frame, RenderError<D::Error>> {
        let frame = state.frame(self.led_count);
        self.render_frame(frame)?;
        Ok(frame)
    }

    /// Write `frame` to the strip and flush it
    pub fn render_frame(&mut self, frame: Frame) -> Result<(), RenderError<D::Error>> {
        let range = frame.range(self.led_count);
        for index in 0..self.led_count {
            let color = if range.contains(index) {
                frame.color
            } else {
                BLACK
            };
            self.driver
                .set_pixel(index, color)
                .map_err(|source| RenderError::Pixel { index, source })?;
        }
        self.driver.flush().map_err(RenderError::Flush)
    }

    /// Render `frame`, logging a device failure instead of returning it
    ///
    /// Returns `true` if the frame reached the strip.
    pub fn present(&mut self, frame: Frame) -> bool {
        match self.render_frame(frame) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Frame dropped: {}", e);
                false
            }
        }
    }

    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
