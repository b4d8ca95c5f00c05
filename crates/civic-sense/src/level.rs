/// Level rules, selected by the mission's level number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// One stationary trash; tap it once.
    TapTrash,
    /// Three trash pieces dragged into a bin.
    DragToBin,
    /// Not built yet; shows a placeholder and never scores.
    Unsupported(u32),
}

impl Level {
    pub fn from_number(level: u32) -> Self {
        match level {
            0 | 1 => Level::TapTrash,
            2 => Level::DragToBin,
            n => Level::Unsupported(n),
        }
    }

    /// Score needed to complete the level. 0 for unsupported levels.
    pub fn max_score(&self) -> u32 {
        match self {
            Level::TapTrash => 1,
            Level::DragToBin => 3,
            Level::Unsupported(_) => 0,
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            Level::TapTrash => "Tap the RED trash to clean!",
            Level::DragToBin => "Drag the RED wrappers to the GREEN bin!",
            Level::Unsupported(_) => "Advanced levels coming soon...\nPress EXIT to go back.",
        }
    }
}

/// Progress toward the level's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreProgress {
    earned: u32,
    max: u32,
}

impl ScoreProgress {
    pub fn new(max: u32) -> Self {
        Self { earned: 0, max }
    }

    /// Count one scoring interaction. Returns true when the target is reached.
    pub fn record(&mut self) -> bool {
        self.earned += 1;
        self.is_complete()
    }

    /// A zero target is never complete.
    pub fn is_complete(&self) -> bool {
        self.max > 0 && self.earned >= self.max
    }

    pub fn earned(&self) -> u32 {
        self.earned
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch() {
        assert_eq!(Level::from_number(0), Level::TapTrash);
        assert_eq!(Level::from_number(1), Level::TapTrash);
        assert_eq!(Level::from_number(2), Level::DragToBin);
        assert_eq!(Level::from_number(5), Level::Unsupported(5));
        assert_eq!(Level::from_number(3).max_score(), 0);
    }

    #[test]
    fn progress_completes_at_max() {
        let mut p = ScoreProgress::new(Level::DragToBin.max_score());
        assert!(!p.record());
        assert!(!p.record());
        assert!(p.record());
        assert_eq!(p.earned(), 3);
    }

    #[test]
    fn unsupported_never_completes() {
        let mut p = ScoreProgress::new(Level::Unsupported(4).max_score());
        assert!(!p.is_complete());
        assert!(!p.record());
    }
}
