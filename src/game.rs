//! Fixed-rate game loop
//!
//! Owns the world and its seeded RNG. Each iteration polls one input, runs one
//! simulation tick, presents the resulting frame and waits out the tick period.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::{Clock, FrameLimiter, InputSource};
use crate::renderer::{Frame, Presenter};
use crate::settings::Settings;
use crate::sim::{TickInput, TickOutcome, TickRules, World, tick};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Player hit outside hyper mode
    Defeated,
    /// Quit signal from the input source
    Quit,
    /// `max_ticks` reached
    TickLimit,
}

/// Final result of `Game::run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameExit {
    pub reason: ExitReason,
    pub score: u32,
    pub ticks: u64,
}

pub struct Game {
    world: World,
    rng: Pcg32,
    seed: u64,
    rules: TickRules,
    frame_rate: u32,
    defeat_pause: Duration,
    max_ticks: Option<u64>,
}

impl Game {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            world: World::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            rules: settings.rules(),
            frame_rate: settings.frame_rate(),
            defeat_pause: settings.defeat_pause(),
            max_ticks: settings.max_ticks,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Advance the simulation by one tick without any pacing
    pub fn step(&mut self, input: &TickInput) -> TickOutcome {
        tick(&mut self.world, input, &self.rules, &mut self.rng)
    }

    fn exit(&self, reason: ExitReason) -> GameExit {
        GameExit {
            reason,
            score: self.world.score,
            ticks: self.world.tick,
        }
    }

    /// Run until defeat, quit or the tick limit
    ///
    /// On defeat the final frame is presented and held for the defeat pause
    /// before returning. A quit returns immediately.
    pub fn run<I, P, C>(&mut self, input: &mut I, presenter: &mut P, clock: &mut C) -> GameExit
    where
        I: InputSource + ?Sized,
        P: Presenter + ?Sized,
        C: Clock + ?Sized,
    {
        let mut limiter = FrameLimiter::new(self.frame_rate);
        log::info!(
            "Game started (seed {}, {} ticks/s)",
            self.seed,
            self.frame_rate
        );

        loop {
            if self.max_ticks.is_some_and(|limit| self.world.tick >= limit) {
                log::info!("Tick limit reached (score {})", self.world.score);
                return self.exit(ExitReason::TickLimit);
            }

            let tick_input = input.poll(&self.world);
            match self.step(&tick_input) {
                TickOutcome::Running(report) => {
                    if report.enemies_shot > 0 {
                        log::debug!(
                            "tick {}: {} enemies shot, score {}",
                            self.world.tick,
                            report.enemies_shot,
                            self.world.score
                        );
                    }
                    presenter.present(&Frame::capture(&self.world));
                    limiter.wait(clock);
                }
                TickOutcome::Defeated => {
                    presenter.present(&Frame::capture(&self.world));
                    clock.sleep(self.defeat_pause);
                    return self.exit(ExitReason::Defeated);
                }
                TickOutcome::Quit => {
                    log::info!("Quit at tick {} (score {})", self.world.tick, self.world.score);
                    return self.exit(ExitReason::Quit);
                }
            }
        }
    }
}
