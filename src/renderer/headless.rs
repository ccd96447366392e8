//! Presenter for runs without a display
//!
//! Logs a one-line summary every `report_every` ticks and keeps the most
//! recent frame so the caller can inspect or dump it after the run.

use super::{Frame, Presenter, SpriteKind};
use crate::sim::RunState;

pub struct HeadlessPresenter {
    report_every: u64,
    last: Option<Frame>,
}

impl HeadlessPresenter {
    /// `report_every` of 0 disables periodic summaries
    pub fn new(report_every: u64) -> Self {
        Self {
            report_every,
            last: None,
        }
    }

    pub fn into_last_frame(self) -> Option<Frame> {
        self.last
    }

    fn summarize(frame: &Frame) {
        let enemies = frame.count(|k| matches!(k, SpriteKind::Enemy { .. }));
        let bombs = frame.count(|k| matches!(k, SpriteKind::Bomb { .. }));
        let beams = frame.count(|k| matches!(k, SpriteKind::Beam));
        log::info!(
            "tick {:>6} | score {:>5} | enemies {:>2} | bombs {:>2} | beams {:>3}{}",
            frame.tick,
            frame.score,
            enemies,
            bombs,
            beams,
            if frame.flash { " | EMP" } else { "" }
        );
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: &Frame) {
        if frame.status == RunState::Terminated {
            log::info!("Game over at tick {} with score {}", frame.tick, frame.score);
        } else if self.report_every > 0 && frame.tick % self.report_every == 0 {
            Self::summarize(frame);
        }
        self.last = Some(frame.clone());
    }
}
