//! Headless host
//!
//! In-memory stand-ins for the canvas, the page chrome and the frame
//! scheduler. Used by tests and by the native demo binary.

use crate::demo::Autopilot;
use crate::game::{FrameHandle, FrameScheduler, Hud, Shooter, StartControl};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::WorldSnapshot;

/// Nominal 60 Hz frame interval used by [`run_demo`]
pub const DEMO_FRAME_MS: f64 = 1000.0 / 60.0;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        font: String,
        color: String,
    },
}

/// Surface that records what is currently on screen
///
/// A clear wipes the record, so `commands` always describes the visible
/// frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Frames cleared so far
    pub clears: usize,
}

impl RecordingSurface {
    pub fn rects_with_color<'a>(
        &'a self,
        color: &'a str,
    ) -> impl Iterator<Item = &'a DrawCommand> + 'a {
        self.commands
            .iter()
            .filter(move |cmd| matches!(cmd, DrawCommand::Rect { color: c, .. } if c == color))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.clears += 1;
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }

    fn fill_text_centered(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color: color.to_string(),
        });
    }
}

/// Scheduler whose frames fire only when the caller says so
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Vec<FrameHandle>,
    /// Total frames ever requested
    pub requested: usize,
    pub cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pop the oldest booked frame, as the host would when it fires
    pub fn take_next(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        Some(handle)
    }

    /// Cancelling a handle that already fired does nothing, like the browser
    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() < before {
            self.cancelled.push(handle);
        }
    }
}

/// HUD that remembers every score it was shown and the current control
#[derive(Debug, Clone, Default)]
pub struct HudLog {
    pub scores: Vec<u32>,
    pub start_control: Option<StartControl>,
}

impl Hud for HudLog {
    fn set_score(&mut self, score: u32) {
        self.scores.push(score);
    }

    fn show_start_control(&mut self, control: StartControl) {
        self.start_control = Some(control);
    }

    fn hide_start_control(&mut self) {
        self.start_control = None;
    }
}

/// Headless shooter type
pub type HeadlessShooter = Shooter<RecordingSurface, HudLog, ManualScheduler>;

/// Play one run with the autopilot at a steady 60 Hz
///
/// Stops at game over or after `max_frames` frames, whichever comes first.
pub fn run_demo(settings: Settings, seed: u64, max_frames: u64) -> WorldSnapshot {
    let mut shooter: HeadlessShooter = Shooter::new(
        settings,
        seed,
        RecordingSurface::default(),
        HudLog::default(),
        ManualScheduler::default(),
    );
    let pilot = Autopilot::new();
    shooter.start();

    let mut frame = 0;
    while frame < max_frames && shooter.scheduler_mut().take_next().is_some() {
        let input = pilot.decide(shooter.world());
        shooter.set_held(input);
        shooter.on_frame(frame as f64 * DEMO_FRAME_MS);
        frame += 1;
    }

    let snapshot = shooter.world().snapshot();
    log::info!(
        "Demo finished after {frame} frames: {:?}, score {}",
        snapshot.run_state,
        snapshot.score
    );
    snapshot
}
