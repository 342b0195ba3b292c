use passlock_core::{CoverTransition, LockId, PresentationSurface, Screen};

/// Text-mode presentation surface: keeps a screen stack and a log of what
/// it was asked to do, which the caller prints after each event.
pub struct ConsoleSurface {
    stack: Vec<Screen>,
    log: Vec<String>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Content],
            log: Vec::new(),
        }
    }

    pub fn drain_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

impl PresentationSurface for ConsoleSurface {
    fn insert_cover(&mut self) {
        self.log.push("cover inserted".into());
    }

    fn remove_cover(&mut self, transition: CoverTransition) {
        match transition {
            CoverTransition::Immediate => self.log.push("cover removed".into()),
            CoverTransition::Fade => self.log.push("cover faded out".into()),
        }
    }

    fn show(&mut self, lock: LockId) {
        self.stack.push(Screen::Lock(lock));
        self.log.push("lock shown".into());
    }

    fn dismiss(&mut self, lock: LockId, animated: bool) {
        self.stack.retain(|s| *s != Screen::Lock(lock));
        if animated {
            self.log.push("lock dismissed (animated)".into());
        } else {
            self.log.push("lock dismissed".into());
        }
    }

    fn topmost_visible(&self) -> Option<Screen> {
        self.stack.last().copied()
    }
}
