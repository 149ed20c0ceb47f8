//! Headless window backend
//!
//! Renders into a [`RecordingContext`] and replays a script of key states and
//! platform events keyed by frame number. Frame `n` is the `n`-th call to
//! `poll_events`, which the runner makes once at the start of every frame.
//!
//! Meant for bounded runs: set a frame limit, or enable the rolling log so
//! the recording only ever holds the frame in progress.

use std::ops::Range;

use super::{AppEvent, WindowBackend};
use crate::input::{KeyCode, KeyboardSnapshot, KeyboardState};
use crate::render::{GraphicsContext, RecordingContext};

/// Window backend without a display
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    context: RecordingContext,
    keyboard: KeyboardSnapshot,
    size: (u32, u32),
    key_script: Vec<(KeyCode, Range<u64>)>,
    event_script: Vec<(u64, AppEvent)>,
    frame_limit: Option<u64>,
    rolling_log: bool,
    frames_polled: u64,
    should_close: bool,
    disposed: bool,
}

impl HeadlessWindow {
    /// Create a backend with the given client size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            context: RecordingContext::new(),
            keyboard: KeyboardSnapshot::new(),
            size: (width, height),
            key_script: Vec::new(),
            event_script: Vec::new(),
            frame_limit: None,
            rolling_log: false,
            frames_polled: 0,
            should_close: false,
            disposed: false,
        }
    }

    /// Hold `key` down during the given frames
    #[must_use]
    pub fn with_key_held(mut self, key: KeyCode, frames: Range<u64>) -> Self {
        self.key_script.push((key, frames));
        self
    }

    /// Hold Escape from `frame` onwards
    #[must_use]
    pub fn with_escape_at(self, frame: u64) -> Self {
        self.with_key_held(KeyCode::Escape, frame..u64::MAX)
    }

    /// Deliver `event` at the start of `frame`
    #[must_use]
    pub fn with_event_at(mut self, frame: u64, event: AppEvent) -> Self {
        self.event_script.push((frame, event));
        self
    }

    /// Report close after `frames` frames
    #[must_use]
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Drop the previous frame's commands and primitives at the start of each frame
    #[must_use]
    pub fn with_rolling_log(mut self) -> Self {
        self.rolling_log = true;
        self
    }

    /// The recording context frames were rendered into
    pub fn context(&self) -> &RecordingContext {
        &self.context
    }

    /// Whether [`WindowBackend::dispose`] has run
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Frames started so far
    pub fn frames_polled(&self) -> u64 {
        self.frames_polled
    }
}

impl WindowBackend for HeadlessWindow {
    fn graphics(&mut self) -> &mut dyn GraphicsContext {
        &mut self.context
    }

    fn keyboard(&self) -> &dyn KeyboardState {
        &self.keyboard
    }

    fn poll_events(&mut self) -> Vec<AppEvent> {
        let frame = self.frames_polled;
        self.frames_polled += 1;
        if self.rolling_log {
            self.context.clear_log();
        }

        self.keyboard.release_all();
        for (key, frames) in &self.key_script {
            if frames.contains(&frame) {
                self.keyboard.set(*key, true);
            }
        }

        let events: Vec<AppEvent> = self
            .event_script
            .iter()
            .filter(|(at, _)| *at == frame)
            .map(|(_, event)| *event)
            .collect();
        for event in &events {
            if let AppEvent::WindowResized { width, height } = *event {
                self.size = (width, height);
            }
        }
        events
    }

    fn client_size(&self) -> (u32, u32) {
        self.size
    }

    fn should_close(&self) -> bool {
        self.should_close
            || self
                .frame_limit
                .is_some_and(|limit| self.frames_polled >= limit)
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn dispose(&mut self) {
        if self.disposed {
            log::debug!("Headless window already disposed");
            return;
        }
        log::debug!("Disposing headless window after {} frames", self.frames_polled);
        self.disposed = true;
    }
}
