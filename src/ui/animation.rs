use std::collections::HashMap;

/// Easing function for animations: linear (constant speed) or ease-out
/// (decelerate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed interpolation.
    Linear,
    /// Cubic ease-out: fast start, slow end (deceleration).
    EaseOut,
}

/// A single active animation interpolating an f32 value over frames.
struct Animation {
    from: f32,
    to: f32,
    start: u64,
    frames: u32,
    easing: Easing,
}

impl Animation {
    fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.start)
    }

    fn done(&self, now: u64) -> bool {
        self.frames == 0 || self.elapsed(now) >= u64::from(self.frames)
    }
}

/// Frame-driven f32 interpolation keyed by string.
///
/// Animations advance on the menu's frame counter, not wall-clock time, so
/// a replayed input sequence renders identically.
pub struct Animator {
    animations: HashMap<String, Animation>,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
        }
    }

    /// Start (or restart) an animation. Overwrites any existing animation
    /// with the same key.
    pub fn start(&mut self, key: &str, from: f32, to: f32, frames: u32, easing: Easing, now: u64) {
        self.animations.insert(
            key.to_string(),
            Animation {
                from,
                to,
                start: now,
                frames,
                easing,
            },
        );
    }

    /// Get the current interpolated value. Returns `None` if no animation
    /// exists for this key. Returns the `to` value once complete.
    pub fn get(&self, key: &str, now: u64) -> Option<f32> {
        let anim = self.animations.get(key)?;
        if anim.done(now) {
            return Some(anim.to);
        }
        let t = anim.elapsed(now) as f32 / anim.frames as f32;
        let eased = ease(t, anim.easing);
        Some(anim.from + (anim.to - anim.from) * eased)
    }

    /// Returns true if the animation exists and has not yet completed.
    pub fn is_active(&self, key: &str, now: u64) -> bool {
        self.animations
            .get(key)
            .is_some_and(|anim| !anim.done(now))
    }

    /// Remove completed animations to prevent unbounded growth.
    /// Call once per frame.
    pub fn gc(&mut self, now: u64) {
        self.animations.retain(|_, anim| !anim.done(now));
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply an easing function to a linear progress value `t` in [0, 1].
fn ease(t: f32, easing: Easing) -> f32 {
    match easing {
        Easing::Linear => t,
        Easing::EaseOut => {
            // Cubic ease-out: 1-(1-t)³
            let f = 1.0 - t;
            1.0 - f * f * f
        }
    }
}
