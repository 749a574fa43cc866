//! Cooperative repeating timer
//!
//! Everything runs on the calling thread. The timer is re-armed only when a
//! tick reports [`TickOutcome::Rearm`], so stopping just clears the
//! controller's running flag and lets at most one pending tick fire.

use super::{Controller, TickOutcome, UiEvent};
use crate::render::Renderer;
use anyhow::Result;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Start the controller and keep ticking until it halts
    pub fn run_until_halt<R: Renderer>(&self, controller: &mut Controller<R>) -> Result<()> {
        let mut outcome = controller.start()?;
        while outcome == TickOutcome::Rearm {
            std::thread::sleep(self.interval);
            outcome = controller.tick()?;
        }
        Ok(())
    }

    /// Interleave external events with timer ticks
    ///
    /// Returns on [`UiEvent::Quit`] or once the event source disconnects.
    pub fn run<R: Renderer>(
        &self,
        controller: &mut Controller<R>,
        events: &Receiver<UiEvent>,
    ) -> Result<()> {
        let mut next_tick: Option<Instant> = None;

        loop {
            let event = match next_tick {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match events.recv_timeout(wait) {
                        Ok(event) => Some(event),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match events.recv() {
                    Ok(event) => Some(event),
                    Err(_) => break,
                },
            };

            match event {
                Some(UiEvent::Quit) => break,
                Some(event) => {
                    if controller.handle(event)? == Some(TickOutcome::Rearm) {
                        next_tick.get_or_insert_with(|| Instant::now() + self.interval);
                    }
                }
                None => {
                    next_tick = match controller.tick()? {
                        TickOutcome::Rearm => Some(Instant::now() + self.interval),
                        TickOutcome::Halt => None,
                    };
                }
            }
        }

        controller.stop();
        log::debug!("Scheduler finished at generation {}", controller.grid().generation());
        Ok(())
    }
}
