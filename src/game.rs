//! Run lifecycle and the frame loop
//!
//! [`Shooter`] owns the world and drives it from a host frame scheduler:
//! each scheduled frame samples the keys, ticks, renders and books the next
//! frame while the run lasts. The host supplies the surface, the HUD and the
//! scheduler; nothing here touches a browser directly.

use crate::consts::*;
use crate::input::KeyState;
use crate::renderer::{Surface, render_frame, render_game_over};
use crate::settings::Settings;
use crate::sim::{GameEvent, RunState, TickInput, World, tick};

/// Host id of a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Something that calls back once per display refresh
pub trait FrameScheduler {
    /// Book one frame callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Drop a booked callback before it fires
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Appearance of the start control when shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartControl {
    pub label: &'static str,
    pub background: &'static str,
}

impl StartControl {
    pub const START: StartControl = StartControl {
        label: START_LABEL,
        background: START_BACKGROUND,
    };

    pub const REPLAY: StartControl = StartControl {
        label: REPLAY_LABEL,
        background: REPLAY_BACKGROUND,
    };
}

/// Page chrome around the canvas
pub trait Hud {
    fn set_score(&mut self, score: u32);
    fn show_start_control(&mut self, control: StartControl);
    fn hide_start_control(&mut self);
}

/// The shooter: world, input table and host collaborators
pub struct Shooter<S, H, F> {
    world: World,
    keys: KeyState,
    surface: S,
    hud: H,
    scheduler: F,
    /// The single outstanding frame callback, if any
    pending_frame: Option<FrameHandle>,
    /// Host timestamp of the previous frame (ms)
    last_frame_ms: Option<f64>,
    /// Terminal overlay already drawn for this run
    overlay_shown: bool,
}

impl<S: Surface, H: Hud, F: FrameScheduler> Shooter<S, H, F> {
    /// Build an idle shooter and draw the idle scene
    pub fn new(settings: Settings, seed: u64, surface: S, hud: H, scheduler: F) -> Self {
        log::info!("Shooter created with seed {seed}");
        let mut shooter = Self {
            world: World::new(settings, seed),
            keys: KeyState::new(),
            surface,
            hud,
            scheduler,
            pending_frame: None,
            last_frame_ms: None,
            overlay_shown: false,
        };
        shooter.reset();
        shooter
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Record a key-down. Returns true when the host should suppress the
    /// key's default action.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.keys.key_down(code);
        self.world.settings.controls.suppresses_default(code)
    }

    pub fn key_up(&mut self, code: &str) {
        self.keys.key_up(code);
    }

    /// Forget every held key (focus lost)
    pub fn release_keys(&mut self) {
        self.keys.clear();
    }

    /// Hold exactly the controls in `input`
    pub fn set_held(&mut self, input: TickInput) {
        self.keys.apply(&self.world.settings.controls, input);
    }

    /// Fresh idle world, idle scene, score 0 and the start control
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.world.reset();
        self.last_frame_ms = None;
        self.overlay_shown = false;

        render_frame(&self.world, &mut self.surface);
        self.hud.set_score(0);
        self.hud.show_start_control(StartControl::START);
        log::debug!("World reset");
    }

    /// Begin a run. Does nothing while a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.world.is_running() {
            log::debug!("Start ignored: already running");
            return false;
        }
        self.reset();
        self.world.begin_run();
        self.hud.hide_start_control();
        self.schedule_next();
        log::info!("Run started");
        true
    }

    /// End the run: cancel the booked frame, draw the overlay over the last
    /// frame and offer a replay. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.cancel_pending();
        if self.world.run_state == RunState::Idle || self.overlay_shown {
            return;
        }
        self.world.run_state = RunState::GameOver;
        self.overlay_shown = true;

        render_game_over(&self.world, &mut self.surface);
        self.hud.show_start_control(StartControl::REPLAY);
        log::info!("Game over, final score {}", self.world.score);
    }

    /// Frame callback; `now_ms` is the host's frame timestamp
    pub fn on_frame(&mut self, now_ms: f64) {
        // Normally the booked handle is the one firing and cancelling it is a
        // no-op; an out-of-band call must not leave it alive next to a new one
        self.cancel_pending();
        if !self.world.is_running() {
            log::warn!("Stray frame at {now_ms:.1} ms ignored");
            return;
        }

        let dt = self
            .last_frame_ms
            .map_or(0.0, |last| ((now_ms - last) / 1000.0) as f32);
        self.last_frame_ms = Some(now_ms);

        let input = self.keys.sample(&self.world.settings.controls);
        let events = tick(&mut self.world, &input, dt);

        let mut over = false;
        for event in &events {
            match event {
                GameEvent::EnemyDestroyed { score, .. } => self.hud.set_score(*score),
                GameEvent::GameOver(_) => over = true,
                GameEvent::ProjectileFired { .. } | GameEvent::EnemySpawned { .. } => {}
            }
        }

        render_frame(&self.world, &mut self.surface);

        if over {
            self.stop();
        } else {
            self.schedule_next();
        }
    }

    fn schedule_next(&mut self) {
        debug_assert!(self.pending_frame.is_none());
        self.pending_frame = self.scheduler.request_frame();
        if self.pending_frame.is_none() {
            log::error!("Host refused a frame callback; the loop has stalled");
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
            log::trace!("Cancelled frame {handle:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{HudLog, ManualScheduler, RecordingSurface};
    use crate::sim::Enemy;
    use glam::Vec2;

    type TestShooter = Shooter<RecordingSurface, HudLog, ManualScheduler>;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn quiet_shooter() -> TestShooter {
        let mut settings = Settings::default();
        settings.enemy.spawn_chance = 0.0;
        Shooter::new(
            settings,
            1,
            RecordingSurface::default(),
            HudLog::default(),
            ManualScheduler::default(),
        )
    }

    /// Fire the booked frame, if any
    fn step(shooter: &mut TestShooter, now_ms: f64) -> bool {
        match shooter.scheduler_mut().take_next() {
            Some(_) => {
                shooter.on_frame(now_ms);
                true
            }
            None => false,
        }
    }

    fn drop_enemy(shooter: &mut TestShooter, x: f32, y: f32) {
        let world = shooter.world_mut();
        let id = world.next_entity_id();
        world.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(20.0, 15.0),
            speed: 1.0,
        });
    }

    #[test]
    fn test_new_shooter_shows_idle_scene() {
        let shooter = quiet_shooter();
        assert_eq!(shooter.world().run_state, RunState::Idle);
        assert_eq!(shooter.hud().scores, vec![0]);
        assert_eq!(shooter.hud().start_control, Some(StartControl::START));
        assert_eq!(shooter.surface().rects_with_color(PLAYER_COLOR).count(), 1);
        assert!(!shooter.has_pending_frame());
        assert_eq!(shooter.scheduler().requested, 0);
    }

    #[test]
    fn test_start_books_one_frame() {
        let mut shooter = quiet_shooter();
        assert!(shooter.start());
        assert_eq!(shooter.world().run_state, RunState::Running);
        assert_eq!(shooter.hud().start_control, None);
        assert_eq!(shooter.scheduler().pending_count(), 1);
    }

    #[test]
    fn test_double_start_is_noop() {
        let mut shooter = quiet_shooter();
        shooter.start();
        step(&mut shooter, 0.0);
        shooter.set_held(TickInput {
            left: true,
            ..Default::default()
        });
        step(&mut shooter, FRAME_MS);
        let x = shooter.world().player.pos.x;

        assert!(!shooter.start());
        assert_eq!(shooter.scheduler().pending_count(), 1);
        assert_eq!(shooter.world().player.pos.x, x);
    }

    #[test]
    fn test_each_frame_books_exactly_one_more() {
        let mut shooter = quiet_shooter();
        shooter.start();
        for i in 0..100 {
            assert!(step(&mut shooter, i as f64 * FRAME_MS));
            assert_eq!(shooter.scheduler().pending_count(), 1);
        }
        assert_eq!(shooter.world().ticks, 100);
    }

    #[test]
    fn test_frame_without_taking_booked_handle_keeps_one_pending() {
        let mut shooter = quiet_shooter();
        shooter.start();
        // Host delivers a frame while the booked one is still outstanding
        shooter.on_frame(0.0);
        assert_eq!(shooter.scheduler().pending_count(), 1);
        shooter.on_frame(FRAME_MS);
        assert_eq!(shooter.scheduler().pending_count(), 1);
        assert_eq!(shooter.scheduler().cancelled.len(), 2);
        assert!(shooter.has_pending_frame());
        assert_eq!(shooter.world().ticks, 2);
    }

    #[test]
    fn test_floor_breach_stops_loop_and_shows_overlay() {
        let mut shooter = quiet_shooter();
        shooter.start();
        drop_enemy(&mut shooter, 100.0, 590.0);

        step(&mut shooter, 0.0);
        assert_eq!(shooter.world().run_state, RunState::GameOver);
        assert!(!shooter.has_pending_frame());
        assert_eq!(shooter.scheduler().pending_count(), 0);
        assert_eq!(shooter.hud().start_control, Some(StartControl::REPLAY));

        // Overlay sits on top of the final frame
        let surface = shooter.surface();
        assert_eq!(surface.rects_with_color(ENEMY_COLOR).count(), 1);
        assert_eq!(surface.texts(), vec!["DESTROYED!", "Score: 0"]);
    }

    #[test]
    fn test_external_stop_cancels_booked_frame() {
        let mut shooter = quiet_shooter();
        shooter.start();
        step(&mut shooter, 0.0);
        assert_eq!(shooter.scheduler().pending_count(), 1);

        shooter.stop();
        assert_eq!(shooter.world().run_state, RunState::GameOver);
        assert_eq!(shooter.scheduler().pending_count(), 0);
        assert_eq!(shooter.scheduler().cancelled.len(), 1);

        // A callback the host delivers anyway does nothing
        let ticks = shooter.world().ticks;
        shooter.on_frame(FRAME_MS);
        assert_eq!(shooter.world().ticks, ticks);
        assert!(!shooter.has_pending_frame());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut shooter = quiet_shooter();
        shooter.start();
        step(&mut shooter, 0.0);
        shooter.stop();
        shooter.stop();
        assert_eq!(shooter.surface().texts().len(), 2);
        assert_eq!(shooter.scheduler().cancelled.len(), 1);
    }

    #[test]
    fn test_stop_while_idle_does_nothing() {
        let mut shooter = quiet_shooter();
        shooter.stop();
        assert_eq!(shooter.world().run_state, RunState::Idle);
        assert!(shooter.surface().texts().is_empty());
        assert_eq!(shooter.hud().start_control, Some(StartControl::START));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut shooter = quiet_shooter();
        shooter.start();
        shooter.world_mut().score = 5;
        drop_enemy(&mut shooter, 100.0, 590.0);
        step(&mut shooter, 0.0);
        assert_eq!(shooter.world().run_state, RunState::GameOver);

        assert!(shooter.start());
        assert_eq!(shooter.world().run_state, RunState::Running);
        assert_eq!(shooter.world().score, 0);
        assert!(shooter.world().enemies.is_empty());
        assert_eq!(shooter.hud().scores.last(), Some(&0));
        assert_eq!(shooter.scheduler().pending_count(), 1);
        assert!(shooter.surface().texts().is_empty());
    }

    #[test]
    fn test_reset_twice_matches_reset_once() {
        let mut shooter = quiet_shooter();
        shooter.start();
        step(&mut shooter, 0.0);
        shooter.reset();
        let once = (shooter.world().snapshot(), shooter.world().player.clone());
        shooter.reset();
        let twice = (shooter.world().snapshot(), shooter.world().player.clone());
        assert_eq!(once, twice);
        assert_eq!(once.0.run_state, RunState::Idle);
        assert_eq!(shooter.scheduler().pending_count(), 0);
    }

    #[test]
    fn test_kill_updates_score_display() {
        let mut shooter = quiet_shooter();
        shooter.start();
        drop_enemy(&mut shooter, 240.0, 300.0);
        shooter.set_held(TickInput {
            fire: true,
            ..Default::default()
        });

        let mut now = 0.0;
        while shooter.world().score == 0 && step(&mut shooter, now) {
            now += FRAME_MS;
        }
        assert_eq!(shooter.world().score, 1);
        assert_eq!(shooter.hud().scores, vec![0, 0, 1]);
        assert_eq!(shooter.world().run_state, RunState::Running);
    }

    #[test]
    fn test_fire_cadence_follows_frame_timestamps() {
        let mut shooter = quiet_shooter();
        shooter.start();
        shooter.set_held(TickInput {
            fire: true,
            ..Default::default()
        });
        // 30 frames at 120 Hz span ~242 ms: shots at 0 ms and ~200 ms
        for i in 0..30 {
            step(&mut shooter, i as f64 * (1000.0 / 120.0));
        }
        assert_eq!(shooter.world().projectiles.len(), 2);
    }

    #[test]
    fn test_scroll_keys_report_suppression() {
        let mut shooter = quiet_shooter();
        assert!(shooter.key_down("Space"));
        assert!(shooter.key_down("KeyS"));
        assert!(!shooter.key_down("ArrowLeft"));
    }
}
