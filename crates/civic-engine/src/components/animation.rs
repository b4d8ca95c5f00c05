//! Sprite frame animation.
//!
//! A clip is a list of frame indices into the entity's texture strip, played
//! at a fixed rate and always looping. A single-frame clip is a still pose.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    pub frames: Vec<u32>,
    pub fps: f32,
}

impl AnimationDef {
    /// Hold one frame.
    pub fn still(frame: u32) -> Self {
        Self {
            frames: vec![frame],
            fps: 1.0,
        }
    }

    /// Frames `first..=last` in order.
    pub fn strip(first: u32, last: u32, fps: f32) -> Self {
        Self {
            frames: (first..=last).collect(),
            fps,
        }
    }

    /// Frames `first..=last` and back, without doubling the turning frames:
    /// `yoyo(0, 3, _)` plays 0,1,2,3,2,1.
    pub fn yoyo(first: u32, last: u32, fps: f32) -> Self {
        let up = first..=last;
        let down = (first + 1..last).rev();
        Self {
            frames: up.chain(down).collect(),
            fps,
        }
    }

    /// Seconds for one pass through the clip.
    fn cycle(&self) -> f32 {
        self.frames.len() as f32 / self.fps
    }

    fn frame_at(&self, clock: f32) -> usize {
        ((clock * self.fps) as usize) % self.frames.len().max(1)
    }
}

/// Named clips plus the playhead of the current one.
#[derive(Debug, Clone, Default)]
pub struct AnimationComponent {
    pub clips: HashMap<String, AnimationDef>,
    /// Name of the clip playing now; empty before the first `play`.
    pub current: String,
    clock: f32,
}

impl AnimationComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, def: AnimationDef) -> Self {
        self.clips.insert(name.into(), def);
        self
    }

    /// Restart `name` from its first frame. Unknown names leave the current
    /// clip playing.
    pub fn play(&mut self, name: &str) {
        if !self.clips.contains_key(name) {
            log::warn!("no animation clip named `{name}`");
            return;
        }
        self.current = name.to_owned();
        self.clock = 0.0;
    }

    /// `play`, unless `name` is already playing.
    pub fn play_if_different(&mut self, name: &str) {
        if self.current != name {
            self.play(name);
        }
    }

    fn clip(&self) -> Option<&AnimationDef> {
        self.clips.get(&self.current)
    }

    /// Position within the current clip's frame list.
    pub fn frame_index(&self) -> usize {
        self.clip().map_or(0, |clip| clip.frame_at(self.clock))
    }

    /// Texture frame to show now.
    pub fn current_frame(&self) -> Option<u32> {
        self.clip()
            .and_then(|clip| clip.frames.get(clip.frame_at(self.clock)))
            .copied()
    }

    /// Advance the playhead. Returns true when the shown frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(clip) = self.clips.get(&self.current) else {
            return false;
        };
        if clip.frames.len() < 2 || clip.fps <= 0.0 {
            return false;
        }
        let before = clip.frame_at(self.clock);
        self.clock = (self.clock + dt) % clip.cycle();
        clip.frame_at(self.clock) != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yoyo_does_not_repeat_turning_frames() {
        assert_eq!(AnimationDef::yoyo(0, 3, 6.0).frames, vec![0, 1, 2, 3, 2, 1]);
        assert_eq!(AnimationDef::yoyo(0, 1, 6.0).frames, vec![0, 1]);
    }

    #[test]
    fn strip_advances_and_wraps() {
        let mut anim = AnimationComponent::new().with("walk", AnimationDef::strip(0, 3, 10.0));
        anim.play("walk");
        assert_eq!(anim.current_frame(), Some(0));

        assert!(anim.tick(0.15));
        assert_eq!(anim.current_frame(), Some(1));

        anim.tick(0.3);
        assert_eq!(anim.frame_index(), 0);
    }

    #[test]
    fn still_never_advances() {
        let mut anim = AnimationComponent::new().with("idle", AnimationDef::still(0));
        anim.play("idle");
        assert!(!anim.tick(5.0));
        assert_eq!(anim.current_frame(), Some(0));
    }

    #[test]
    fn unknown_clip_is_ignored() {
        let mut anim = AnimationComponent::new().with("idle", AnimationDef::still(2));
        anim.play("idle");
        anim.play("dance");
        assert_eq!(anim.current, "idle");
        assert_eq!(anim.current_frame(), Some(2));
    }

    #[test]
    fn play_if_different_keeps_the_playhead() {
        let mut anim = AnimationComponent::new()
            .with("idle", AnimationDef::still(0))
            .with("walk", AnimationDef::strip(0, 3, 8.0));

        anim.play("walk");
        anim.tick(0.3);
        let frame = anim.frame_index();
        assert_ne!(frame, 0);
        anim.play_if_different("walk");
        assert_eq!(anim.frame_index(), frame);

        anim.play_if_different("idle");
        assert_eq!(anim.current, "idle");
        assert_eq!(anim.frame_index(), 0);
    }
}
