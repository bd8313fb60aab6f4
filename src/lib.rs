// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

// External crate imports
use chrono::Timelike;
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

mod config;
pub use config::FaceConfig;

// ============================================================================
// SCREEN GEOMETRY
// ============================================================================

/// Framebuffer width in pixels.
pub const WIDTH: usize = 144;
/// Framebuffer height in pixels.
pub const HEIGHT: usize = 168;

pub const CENTER_X: i32 = 72;
pub const CENTER_Y: i32 = 84;

const HOUR_RADIUS: i32 = 23;
const MINUTE_RADIUS: i32 = 46;
const SECOND_RADIUS: i32 = 70;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// The two colors the face can paint. The display model is one bit deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const fn inverted(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    const fn rgba(self) -> [u8; 4] {
        match self {
            Color::Black => [0x00, 0x00, 0x00, 0xff],
            Color::White => [0xff, 0xff, 0xff, 0xff],
        }
    }
}

// ============================================================================
// FIXED-POINT TRIGONOMETRY (scaled by 1000)
// ============================================================================

// One entry per minute position, clockwise from 12 o'clock. Hour positions
// use every 5th entry. Exact zeros at entries 0, 15, 30 and 45 keep the
// vertical-hand special cases exact.
const POSITIONS: i32 = 60;

const SIN_1000: [i32; POSITIONS as usize] = [
    0, 105, 208, 309, 407, 500, 588, 669, 743, 809, 866, 914, 951, 978, 995,
    1000, 995, 978, 951, 914, 866, 809, 743, 669, 588, 500, 407, 309, 208,
    105, 0, -105, -208, -309, -407, -500, -588, -669, -743, -809, -866, -914,
    -951, -978, -995, -1000, -995, -978, -951, -914, -866, -809, -743, -669,
    -588, -500, -407, -309, -208, -105,
];

const COS_1000: [i32; POSITIONS as usize] = [
    1000, 995, 978, 951, 914, 866, 809, 743, 669, 588, 500, 407, 309, 208,
    105, 0, -105, -208, -309, -407, -500, -588, -669, -743, -809, -866, -914,
    -951, -978, -995, -1000, -995, -978, -951, -914, -866, -809, -743, -669,
    -588, -500, -407, -309, -208, -105, 0, 105, 208, 309, 407, 500, 588, 669,
    743, 809, 866, 914, 951, 978, 995,
];

// ============================================================================
// HAND MODEL
// ============================================================================

/// A clock hand reduced to what the classifier needs: a scale-1000 unit
/// vector pointing from the clock center toward the hand's tip, plus the
/// slope of the line it lies on.
#[derive(Debug, Clone, Copy)]
pub struct Hand {
    pub x: i32,
    pub y: i32,
    slope_times_1000: i32,
    slope_is_undefined: bool,
}

impl Hand {
    /// Build the hand for `value` out of `max_value` positions around the
    /// dial (12 for the hour hand, 60 for the minute and second hands).
    pub fn new(value: i32, max_value: i32) -> Self {
        let step = value.rem_euclid(max_value) * POSITIONS / max_value;
        // Screen y grows downward, so 12 o'clock is -cos.
        let x = SIN_1000[step as usize];
        let y = -COS_1000[step as usize];
        let slope_is_undefined = x == 0;
        let slope_times_1000 = if slope_is_undefined { 0 } else { y * 1000 / x };
        Self {
            x,
            y,
            slope_times_1000,
            slope_is_undefined,
        }
    }
}

// ============================================================================
// PIXEL CLASSIFIER
// ============================================================================

// Quarters of the dial in clockwise order: 0 is 12-to-3, 1 is 3-to-6,
// 2 is 6-to-9, 3 is 9-to-12. The boundary convention (x >= 0, y > 0) is the
// same for pixel offsets and hand directions.
fn quarter(x: i32, y: i32) -> i32 {
    match (x >= 0, y > 0) {
        (true, false) => 0,
        (true, true) => 1,
        (false, true) => 2,
        (false, false) => 3,
    }
}

/// Decide the color of the pixel at offset `(dx, dy)` from the clock center.
///
/// The hand sweeps a pie slice clockwise from 12 o'clock to its current
/// position; pixels inside the slice are black, the rest white. `reversed`
/// flips the result.
pub fn hand_color(hand: &Hand, dx: i32, dy: i32, reversed: bool) -> Color {
    let color = if hand.slope_is_undefined {
        if hand.y < 0 {
            // Hand at 12: nothing has been swept yet.
            Color::White
        } else if dx > 0 {
            // Hand at 6: exactly the right half has been swept.
            Color::Black
        } else {
            Color::White
        }
    } else {
        let below_line = dy * 1000 > dx * hand.slope_times_1000;
        // Swept iff the pixel's quarter was fully passed by the hand, or it
        // shares the hand's quarter and sits on the already-swept side of
        // the hand's line. For a right-half hand the swept side is above
        // the line, for a left-half hand below it.
        let swept = quarter(dx, dy) < quarter(hand.x, hand.y)
            || (quarter(dx, dy) == quarter(hand.x, hand.y) && below_line == (hand.x < 0));
        if swept {
            Color::Black
        } else {
            Color::White
        }
    };
    if reversed {
        color.inverted()
    } else {
        color
    }
}

// ============================================================================
// FRAME RENDERER
// ============================================================================

/// Integer wall-clock time, as delivered by the host once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceTime {
    /// 0-23; values of 12 and above invert the hour ring.
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Render context handed into the sweep: a borrowed RGBA frame plus its
/// dimensions.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.frame[idx..idx + 4].copy_from_slice(&color.rgba());
        }
    }
}

/// Paint one complete frame of the face for the given time.
///
/// Every pixel is classified independently against three concentric rings:
/// the inner disk belongs to the hour hand, the middle ring to the minute
/// hand, the outer ring to the second hand. Everything outside the outer
/// ring stays white.
pub fn render_face(canvas: &mut Canvas, time: FaceTime) {
    let hour = Hand::new(time.hour as i32, 12);
    let minute = Hand::new(time.minute as i32, 60);
    let second = Hand::new(time.second as i32, 60);

    for y in 0..canvas.height as i32 {
        for x in 0..canvas.width as i32 {
            let dx = x - CENTER_X;
            let dy = y - CENTER_Y;
            // Capped at the outer radius; capped pixels fall through every
            // strict ring comparison below.
            let r2 = (dx * dx + dy * dy).min(SECOND_RADIUS * SECOND_RADIUS);

            let color = if r2 < HOUR_RADIUS * HOUR_RADIUS {
                hand_color(&hour, dx, dy, time.hour >= 12)
            } else if r2 < MINUTE_RADIUS * MINUTE_RADIUS {
                hand_color(&minute, dx, dy, time.hour % 2 == 1)
            } else if r2 < SECOND_RADIUS * SECOND_RADIUS {
                hand_color(&second, dx, dy, time.minute % 2 == 1)
            } else {
                Color::White
            };
            canvas.set_pixel(x as usize, y as usize, color);
        }
    }
}

fn local_time() -> FaceTime {
    let now = chrono::Local::now();
    FaceTime {
        hour: now.hour(),
        minute: now.minute(),
        second: now.second(),
    }
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for driving the face from an external time source.
#[derive(Debug, Clone)]
pub enum FaceCommand {
    SetTime(FaceTime),
}

/// Main watch-face struct - the primary public interface.
#[derive(Debug, Clone)]
pub struct WatchFace {
    config: FaceConfig,
}

impl WatchFace {
    pub fn new(config: FaceConfig) -> Self {
        Self { config }
    }

    /// Open the window and tick along with the system clock (or the
    /// configured frozen time) until the window is closed.
    pub fn show(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(None)
    }

    /// Open the window and take the displayed time from `receiver` instead
    /// of the system clock. Each tick drains the channel and keeps the most
    /// recent command.
    pub fn show_with_commands(
        &self,
        receiver: Receiver<FaceCommand>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(Some(receiver))
    }

    fn run_window(
        &self,
        receiver: Option<Receiver<FaceCommand>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let scale = self.config.scale.max(1) as usize;
        let tick_period = self.config.tick_period;
        let frozen_time = self.config.frozen_time;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                (WIDTH * scale) as f64,
                (HEIGHT * scale) as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        // The buffer stays at the face's native resolution; pixels scales it
        // up to the surface.
        let mut pixels = Pixels::new(WIDTH as u32, HEIGHT as u32, surface_texture)?;

        let mut displayed = frozen_time.unwrap_or_else(local_time);
        let mut last_tick = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            while let Ok(FaceCommand::SetTime(time)) = receiver.try_recv() {
                                displayed = time;
                            }
                        } else if frozen_time.is_none() {
                            displayed = local_time();
                        }

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, WIDTH, HEIGHT);
                        render_face(&mut canvas, displayed);
                        let _ = pixels.render();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_tick.elapsed() >= tick_period {
                        window_clone.request_redraw();
                        last_tick = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(time: FaceTime) -> Vec<u8> {
        let mut frame = vec![0u8; WIDTH * HEIGHT * 4];
        let mut canvas = Canvas::new(&mut frame, WIDTH, HEIGHT);
        render_face(&mut canvas, time);
        frame
    }

    fn pixel(frame: &[u8], x: i32, y: i32) -> Color {
        if frame[((y as usize) * WIDTH + x as usize) * 4] == 0x00 {
            Color::Black
        } else {
            Color::White
        }
    }

    fn black_count(frame: &[u8]) -> usize {
        frame.chunks_exact(4).filter(|px| px[0] == 0x00).count()
    }

    #[test]
    fn direction_is_a_unit_vector_at_every_position() {
        for max_value in [12, 60] {
            for value in 0..max_value {
                let hand = Hand::new(value, max_value);
                let mag2 = hand.x * hand.x + hand.y * hand.y;
                assert!(
                    (mag2 - 1_000_000).abs() <= 2_000,
                    "hand {value}/{max_value}: |direction|^2 = {mag2}"
                );
            }
        }
    }

    #[test]
    fn twelve_o_clock_points_exactly_up() {
        for max_value in [12, 60] {
            let hand = Hand::new(0, max_value);
            assert_eq!((hand.x, hand.y), (0, -1000));
            assert!(hand.slope_is_undefined);
        }
    }

    #[test]
    fn value_wraps_around_the_dial() {
        let a = Hand::new(23, 12);
        let b = Hand::new(11, 12);
        assert_eq!((a.x, a.y), (b.x, b.y));
    }

    #[test]
    fn hand_at_twelve_sweeps_nothing() {
        let hand = Hand::new(0, 60);
        for dy in -70..=70 {
            for dx in -70..=70 {
                assert_eq!(hand_color(&hand, dx, dy, false), Color::White);
            }
        }
    }

    #[test]
    fn hand_at_six_sweeps_the_right_half() {
        let hand = Hand::new(30, 60);
        assert_eq!((hand.x, hand.y), (0, 1000));
        for dy in -70..=70 {
            for dx in -70..=70 {
                let expected = if dx > 0 { Color::Black } else { Color::White };
                assert_eq!(hand_color(&hand, dx, dy, false), expected, "({dx},{dy})");
            }
        }
    }

    #[test]
    fn second_quarter_hand_splits_only_its_own_quarter() {
        // 20 minutes: direction (866, 500), pointing into the 3-to-6 quarter.
        let hand = Hand::new(20, 60);
        assert!(hand.x > 0 && hand.y > 0);
        let slope = hand.y * 1000 / hand.x;
        for dy in -70i32..=70 {
            for dx in -70i32..=70 {
                let color = hand_color(&hand, dx, dy, false);
                if dx >= 0 && dy <= 0 {
                    // 12-to-3 quarter: fully swept.
                    assert_eq!(color, Color::Black, "({dx},{dy})");
                } else if dx < 0 {
                    // 6-to-9 and 9-to-12 quarters: untouched.
                    assert_eq!(color, Color::White, "({dx},{dy})");
                } else {
                    let below_line = dy * 1000 > dx * slope;
                    let expected = if below_line { Color::White } else { Color::Black };
                    assert_eq!(color, expected, "({dx},{dy})");
                }
            }
        }
    }

    #[test]
    fn reversed_is_a_pure_inversion() {
        let hands = [
            (0, 60),
            (7, 60),
            (20, 60),
            (30, 60),
            (44, 60),
            (53, 60),
            (3, 12),
            (9, 12),
        ];
        for (value, max_value) in hands {
            let hand = Hand::new(value, max_value);
            for dy in (-70i32..=70).step_by(7) {
                for dx in (-70i32..=70).step_by(7) {
                    assert_eq!(
                        hand_color(&hand, dx, dy, true),
                        hand_color(&hand, dx, dy, false).inverted()
                    );
                }
            }
        }
    }

    #[test]
    fn midnight_renders_an_all_white_screen() {
        let frame = rendered(FaceTime {
            hour: 0,
            minute: 0,
            second: 0,
        });
        assert_eq!(black_count(&frame), 0);
    }

    #[test]
    fn half_past_midnight_fills_the_right_half_of_the_minute_ring() {
        let frame = rendered(FaceTime {
            hour: 0,
            minute: 30,
            second: 0,
        });
        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let dx = x - CENTER_X;
                let dy = y - CENTER_Y;
                let r2 = dx * dx + dy * dy;
                let expected = if (529..2116).contains(&r2) && dx > 0 {
                    Color::Black
                } else {
                    Color::White
                };
                assert_eq!(pixel(&frame, x, y), expected, "({x},{y})");
            }
        }
    }

    #[test]
    fn hour_disk_excludes_its_boundary() {
        // At 06:00:00 only the hour hand has swept anything, so black pixels
        // mark the right half of the hour disk exactly.
        let frame = rendered(FaceTime {
            hour: 6,
            minute: 0,
            second: 0,
        });
        assert_eq!(pixel(&frame, CENTER_X + 22, CENTER_Y), Color::Black);
        // 23 pixels out is r^2 = 529 exactly, which already belongs to the
        // (empty) minute ring.
        assert_eq!(pixel(&frame, CENTER_X + 23, CENTER_Y), Color::White);
        assert_eq!(black_count(&frame), 802);
    }

    #[test]
    fn noon_inverts_the_whole_hour_disk() {
        // Hour hand back at 12 with the PM flag set: the zero-length sweep
        // inverts to a fully black hour disk, 1649 pixels.
        let frame = rendered(FaceTime {
            hour: 12,
            minute: 0,
            second: 0,
        });
        assert_eq!(black_count(&frame), 1649);
        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let dx = x - CENTER_X;
                let dy = y - CENTER_Y;
                let expected = if dx * dx + dy * dy < 529 {
                    Color::Black
                } else {
                    Color::White
                };
                assert_eq!(pixel(&frame, x, y), expected, "({x},{y})");
            }
        }
    }

    #[test]
    fn afternoon_minute_ring_uses_the_odd_hour_flag() {
        // 13:15:00 - minute hand a quarter turn in, hour odd, so the minute
        // ring renders inverted: the swept 12-to-3 quarter shows white.
        let frame = rendered(FaceTime {
            hour: 13,
            minute: 15,
            second: 0,
        });
        assert_eq!(pixel(&frame, CENTER_X + 30, CENTER_Y - 20), Color::White);
        assert_eq!(pixel(&frame, CENTER_X - 30, CENTER_Y + 20), Color::Black);
    }
}
