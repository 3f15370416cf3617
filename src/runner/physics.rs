//! Player physics, lives and camera follow.

use super::types::{Camera, Controls, Facing, Features, Player};
use crate::constants::*;

/// Outcome of an obstacle hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Invulnerable: the hit is ignored entirely.
    Ignored,
    /// A life was lost and the grace window started.
    Damaged,
    /// The last life was lost.
    Fatal,
}

impl Player {
    /// Try to jump. Accepted only while jumps remain; each accepted jump gets
    /// a fresh impulse, which is what makes the double jump work.
    pub fn request_jump(&mut self) -> bool {
        if self.jumps_used >= self.max_jumps {
            return false;
        }
        self.jumping = true;
        self.jumps_used += 1;
        self.velocity = -self.jump_impulse;
        true
    }

    /// Jump button released: clip the rise for a short hop.
    pub fn release_jump(&mut self) {
        if self.velocity < JUMP_RELEASE_VELOCITY {
            self.velocity = JUMP_RELEASE_VELOCITY;
        }
    }

    /// Gravity integration for one frame. `y` stays within `[0, floor]`.
    pub fn integrate(&mut self) {
        if !self.jumping && self.is_on_ground() {
            return;
        }

        self.velocity += self.gravity;
        self.y += self.velocity;

        let floor = self.floor_y();
        if self.y >= floor {
            self.y = floor;
            self.jumping = false;
            self.velocity = 0.0;
            self.jumps_used = 0;
        }

        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
    }

    /// Horizontal movement for one frame, clamped to the visible window.
    pub fn steer(&mut self, controls: &Controls, camera: &Camera, features: &Features) {
        let dx = if features.steering && controls.left_held && !controls.right_held {
            self.facing = Facing::Left;
            -self.speed
        } else if features.steering && controls.right_held && !controls.left_held {
            self.facing = Facing::Right;
            self.speed
        } else if features.camera_scroll {
            // Treadmill: keep drifting forward so the camera keeps moving
            self.speed * TREADMILL_FACTOR
        } else {
            0.0
        };

        let min_x = camera.x + CAMERA_LEFT_MARGIN;
        let max_x = camera.x + VIEWPORT_WIDTH - self.width;
        self.x = (self.x + dx).clamp(min_x, max_x);
    }

    /// Advance the run animation. Two frames, flipped every few ticks on the
    /// ground.
    pub fn animate(&mut self, frame_count: u64) {
        if self.is_on_ground() && frame_count % RUN_ANIM_PERIOD == 0 {
            self.anim_frame = (self.anim_frame + 1) % RUN_ANIM_FRAMES;
        }
    }

    /// Clear the grace window once its duration has elapsed on the run clock.
    pub fn update_invulnerability(&mut self, now_ms: u64) {
        if self.invulnerable
            && now_ms.saturating_sub(self.invulnerable_since_ms) >= self.invulnerability_ms
        {
            self.invulnerable = false;
        }
    }

    pub fn take_hit(&mut self, now_ms: u64) -> HitOutcome {
        if self.invulnerable || self.lives == 0 {
            return HitOutcome::Ignored;
        }
        self.lives -= 1;
        if self.lives == 0 {
            self.died_at_ms = Some(now_ms);
            return HitOutcome::Fatal;
        }
        self.invulnerable = true;
        self.invulnerable_since_ms = now_ms;
        HitOutcome::Damaged
    }

    /// Add a life if below the cap. Returns true if a life was added.
    pub fn gain_life(&mut self) -> bool {
        if self.lives >= MAX_LIVES {
            return false;
        }
        self.lives += 1;
        true
    }
}

impl Camera {
    /// Scroll forward so the player never sits right of the follow line.
    pub fn follow(&mut self, player_x: f64, viewport_width: f64) {
        let screen_x = player_x - self.x;
        let threshold = viewport_width * CAMERA_FOLLOW_THRESHOLD;
        if screen_x > threshold {
            self.x += screen_x - threshold;
        }
    }

    pub fn to_screen_x(&self, world_x: f64) -> f64 {
        world_x - self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::types::Difficulty;

    fn player(difficulty: Difficulty) -> Player {
        Player::new(difficulty, Features::default())
    }

    #[test]
    fn test_jump_sets_impulse() {
        let mut p = player(Difficulty::Normal);
        assert!(p.request_jump());
        assert!((p.velocity + 15.0).abs() < f64::EPSILON);
        assert!(p.jumping);
        assert_eq!(p.jumps_used, 1);
    }

    #[test]
    fn test_double_jump_refreshes_impulse() {
        let mut p = player(Difficulty::Normal);
        p.request_jump();
        for _ in 0..10 {
            p.integrate();
        }
        assert!(p.velocity > -15.0);
        assert!(p.request_jump());
        assert!((p.velocity + 15.0).abs() < f64::EPSILON);
        assert_eq!(p.jumps_used, 2);
        // Third jump rejected
        let v = p.velocity;
        assert!(!p.request_jump());
        assert!((p.velocity - v).abs() < f64::EPSILON);
        assert_eq!(p.jumps_used, 2);
    }

    #[test]
    fn test_release_clips_rise() {
        let mut p = player(Difficulty::Easy);
        p.request_jump();
        p.release_jump();
        assert!((p.velocity - JUMP_RELEASE_VELOCITY).abs() < f64::EPSILON);

        // Release while already slower than the clip is a no-op
        p.velocity = -3.0;
        p.release_jump();
        assert!((p.velocity + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_landing_resets_jump_state() {
        let mut p = player(Difficulty::Normal);
        p.request_jump();
        for _ in 0..200 {
            p.integrate();
        }
        assert!(p.is_on_ground());
        assert!(!p.jumping);
        assert_eq!(p.jumps_used, 0);
        assert!((p.velocity).abs() < f64::EPSILON);
        assert!((p.y - p.floor_y()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut p = player(Difficulty::Normal);
        p.jumping = true;
        p.y = 2.0;
        p.velocity = -10.0;
        p.integrate();
        assert!((p.y).abs() < f64::EPSILON);
        assert!((p.velocity).abs() < f64::EPSILON);
    }

    #[test]
    fn test_double_jump_at_apex_stops_at_ceiling() {
        // Two full Easy jumps would rise ~400 units, more than the screen
        let mut p = player(Difficulty::Easy);
        assert!(p.request_jump());
        while p.velocity < 0.0 {
            p.integrate();
        }
        assert!(p.request_jump());
        let mut min_y = p.y;
        for _ in 0..120 {
            p.integrate();
            min_y = min_y.min(p.y);
        }
        assert!(min_y >= 0.0, "rose above the ceiling: {}", min_y);
        assert!(p.is_on_ground());
    }

    #[test]
    fn test_steer_clamps_to_camera_window() {
        let mut p = player(Difficulty::Normal);
        let camera = Camera { x: 100.0 };
        let features = Features::default();
        let left = Controls {
            left_held: true,
            ..Default::default()
        };
        p.x = 105.0;
        p.steer(&left, &camera, &features);
        assert!((p.x - (100.0 + CAMERA_LEFT_MARGIN)).abs() < f64::EPSILON);
        assert_eq!(p.facing, Facing::Left);

        let right = Controls {
            right_held: true,
            ..Default::default()
        };
        p.x = 100.0 + VIEWPORT_WIDTH - p.width - 1.0;
        p.steer(&right, &camera, &features);
        assert!((p.x - (100.0 + VIEWPORT_WIDTH - p.width)).abs() < f64::EPSILON);
        assert_eq!(p.facing, Facing::Right);
    }

    #[test]
    fn test_treadmill_advances_without_input() {
        let mut p = player(Difficulty::Normal);
        let x = p.x;
        p.steer(&Controls::default(), &Camera::default(), &Features::default());
        assert!((p.x - (x + 6.0 * TREADMILL_FACTOR)).abs() < 1e-9);

        // Fixed screen: no drift
        let mut p = player(Difficulty::Normal);
        p.steer(&Controls::default(), &Camera::default(), &Features::classic());
        assert!((p.x - x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_steering_disabled_ignores_arrows() {
        let mut p = player(Difficulty::Normal);
        let features = Features {
            steering: false,
            camera_scroll: false,
            ..Default::default()
        };
        let right = Controls {
            right_held: true,
            ..Default::default()
        };
        let x = p.x;
        p.steer(&right, &Camera::default(), &features);
        assert!((p.x - x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_camera_follow_pins_player_at_threshold() {
        let mut camera = Camera::default();
        camera.follow(100.0, VIEWPORT_WIDTH);
        assert!((camera.x).abs() < f64::EPSILON);

        camera.follow(600.0, VIEWPORT_WIDTH);
        assert!((camera.x - 40.0).abs() < 1e-9);
        assert!((camera.to_screen_x(600.0) - 560.0).abs() < 1e-9);

        // Moving back never scrolls backward
        camera.follow(0.0, VIEWPORT_WIDTH);
        assert!((camera.x - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_then_invulnerability_window() {
        let mut p = player(Difficulty::Normal);
        assert_eq!(p.take_hit(1_000), HitOutcome::Damaged);
        assert_eq!(p.lives, STARTING_LIVES - 1);
        assert!(p.invulnerable);

        assert_eq!(p.take_hit(1_500), HitOutcome::Ignored);
        assert_eq!(p.lives, STARTING_LIVES - 1);

        p.update_invulnerability(1_000 + INVULNERABILITY_MS - 1);
        assert!(p.invulnerable);
        p.update_invulnerability(1_000 + INVULNERABILITY_MS);
        assert!(!p.invulnerable);
    }

    #[test]
    fn test_last_life_is_fatal() {
        let mut p = player(Difficulty::Normal);
        p.lives = 1;
        assert_eq!(p.take_hit(4_000), HitOutcome::Fatal);
        assert_eq!(p.lives, 0);
        assert_eq!(p.died_at_ms, Some(4_000));
        assert_eq!(p.take_hit(4_100), HitOutcome::Ignored);
        assert_eq!(p.lives, 0);
    }

    #[test]
    fn test_gain_life_caps_at_max() {
        let mut p = player(Difficulty::Normal);
        p.lives = MAX_LIVES - 1;
        assert!(p.gain_life());
        assert_eq!(p.lives, MAX_LIVES);
        assert!(!p.gain_life());
        assert_eq!(p.lives, MAX_LIVES);
    }
}
