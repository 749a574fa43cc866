//! Translates UI events into grid operations and redraws after each one

pub mod scheduler;

pub use scheduler::Scheduler;

use crate::config::Settings;
use crate::error::GridError;
use crate::game_of_life::{CellState, Grid};
use crate::render::{Frame, Renderer};
use anyhow::{Context, Result};
use std::str::FromStr;

/// Events produced by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Click { i: usize, j: usize },
    Start,
    Stop,
    Tick,
    Reset,
    ToggleCounts,
    Quit,
}

impl FromStr for UiEvent {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_ascii_lowercase();

        let event = match command.as_str() {
            "click" | "c" => {
                let i = parts.next().context("click needs a column")?;
                let j = parts.next().context("click needs a row")?;
                UiEvent::Click {
                    i: i.parse::<usize>().with_context(|| format!("Invalid column '{}'", i))?,
                    j: j.parse::<usize>().with_context(|| format!("Invalid row '{}'", j))?,
                }
            }
            "start" => UiEvent::Start,
            "stop" => UiEvent::Stop,
            "tick" | "step" => UiEvent::Tick,
            "reset" => UiEvent::Reset,
            "count" => UiEvent::ToggleCounts,
            "quit" | "exit" => UiEvent::Quit,
            "" => anyhow::bail!("Empty command"),
            other => anyhow::bail!("Unknown command '{}'", other),
        };

        if let Some(extra) = parts.next() {
            anyhow::bail!("Unexpected argument '{}'", extra);
        }
        Ok(event)
    }
}

/// Whether the repeating timer should fire again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Rearm,
    Halt,
}

/// Owns the grid and the presentation flags around it
pub struct Controller<R: Renderer> {
    grid: Grid,
    renderer: R,
    running: bool,
    show_counts: bool,
    max_generations: Option<u64>,
}

impl<R: Renderer> Controller<R> {
    pub fn new(grid: Grid, renderer: R) -> Self {
        Self {
            grid,
            renderer,
            running: false,
            show_counts: false,
            max_generations: None,
        }
    }

    /// Build the grid and flags described by `settings`
    pub fn from_settings(settings: &Settings, renderer: R) -> Result<Self> {
        let grid = Grid::new(settings.grid.width, settings.grid.height)
            .context("Failed to create grid")?;
        Ok(Self::new(grid, renderer)
            .with_show_counts(settings.controller.show_counts)
            .with_max_generations(settings.controller.max_generations))
    }

    pub fn with_show_counts(mut self, show_counts: bool) -> Self {
        self.show_counts = show_counts;
        self
    }

    /// Stop running once the grid reaches `limit` generations
    pub fn with_max_generations(mut self, limit: Option<u64>) -> Self {
        self.max_generations = limit;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn show_counts(&self) -> bool {
        self.show_counts
    }

    /// Push queued notifications and a full frame to the renderer
    pub fn refresh(&mut self) -> Result<()> {
        for change in self.grid.drain_notifications() {
            self.renderer.cell_changed(&change);
        }
        let frame = Frame::from_grid(&self.grid, self.show_counts, self.running);
        self.renderer.render(&frame)
    }

    pub fn toggle(&mut self, i: usize, j: usize) -> Result<CellState> {
        let state = self.grid.toggle(i, j)?;
        self.refresh()?;
        Ok(state)
    }

    /// Whether the grid has reached the generation limit, if one is set
    pub fn limit_reached(&self) -> bool {
        self.max_generations
            .is_some_and(|limit| self.grid.generation() >= limit)
    }

    /// Advance once unless the limit is reached; stops the run on reaching it
    fn step_within_limit(&mut self) {
        if self.limit_reached() {
            log::debug!("Generation limit reached, not advancing");
        } else {
            self.grid.advance_generation();
        }

        if self.limit_reached() && self.running {
            log::info!("Reached generation limit {}", self.grid.generation());
            self.running = false;
        }
    }

    /// Single manual step
    pub fn advance_generation(&mut self) -> Result<()> {
        self.step_within_limit();
        self.refresh()
    }

    /// Start running and fire the first tick immediately
    pub fn start(&mut self) -> Result<TickOutcome> {
        if self.running {
            log::debug!("Already running");
            return Ok(TickOutcome::Rearm);
        }
        if self.limit_reached() {
            log::warn!("Not starting: generation limit reached");
            return Ok(TickOutcome::Halt);
        }
        self.running = true;
        log::info!("Started at generation {}", self.grid.generation());
        self.tick()
    }

    /// Clear the running flag; an already scheduled tick may still fire
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Stopped at generation {}", self.grid.generation());
        }
        self.running = false;
    }

    /// Timer callback
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.step_within_limit();
        self.refresh()?;
        Ok(if self.running {
            TickOutcome::Rearm
        } else {
            TickOutcome::Halt
        })
    }

    pub fn reset(&mut self) -> Result<()> {
        self.grid.reset();
        self.refresh()
    }

    /// Flip whether neighbor counts are drawn; grid state is untouched
    pub fn toggle_count_display(&mut self) -> Result<()> {
        self.show_counts = !self.show_counts;
        self.refresh()
    }

    /// Dispatch one UI event; returns the timer outcome when the event started a run
    pub fn handle(&mut self, event: UiEvent) -> Result<Option<TickOutcome>> {
        match event {
            UiEvent::Click { i, j } => match self.toggle(i, j) {
                Ok(_) => {}
                Err(e) if matches!(e.downcast_ref::<GridError>(), Some(GridError::OutOfBounds { .. })) => {
                    log::warn!("Ignoring click: {}", e);
                }
                Err(e) => return Err(e),
            },
            UiEvent::Start => return self.start().map(Some),
            UiEvent::Stop | UiEvent::Quit => self.stop(),
            UiEvent::Tick => self.advance_generation()?,
            UiEvent::Reset => self.reset()?,
            UiEvent::ToggleCounts => self.toggle_count_display()?,
        }
        Ok(None)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::game_of_life::StateChanged;

    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub frames: Vec<Frame>,
        pub changes: Vec<StateChanged>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, frame: &Frame) -> Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn cell_changed(&mut self, change: &StateChanged) {
            self.changes.push(*change);
        }
    }

    fn controller(width: usize, height: usize) -> Controller<RecordingRenderer> {
        Controller::new(Grid::new(width, height).unwrap(), RecordingRenderer::default())
    }

    #[test]
    fn test_parse_events() {
        assert_eq!("click 3 4".parse::<UiEvent>().unwrap(), UiEvent::Click { i: 3, j: 4 });
        assert_eq!("  START ".parse::<UiEvent>().unwrap(), UiEvent::Start);
        assert_eq!("step".parse::<UiEvent>().unwrap(), UiEvent::Tick);
        assert_eq!("count".parse::<UiEvent>().unwrap(), UiEvent::ToggleCounts);
        assert_eq!("quit".parse::<UiEvent>().unwrap(), UiEvent::Quit);

        assert!("click 3".parse::<UiEvent>().is_err());
        assert!("click -1 2".parse::<UiEvent>().is_err());
        assert!("reset now".parse::<UiEvent>().is_err());
        assert!("jump".parse::<UiEvent>().is_err());
        assert!("".parse::<UiEvent>().is_err());
    }

    #[test]
    fn test_toggle_notifies_and_renders() {
        let mut controller = controller(5, 5);
        assert_eq!(controller.toggle(2, 3).unwrap(), CellState::Alive);
        assert_eq!(controller.toggle(2, 3).unwrap(), CellState::Dead);

        let renderer = controller.renderer();
        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(
            renderer.changes,
            vec![
                StateChanged { i: 2, j: 3, state: CellState::Alive },
                StateChanged { i: 2, j: 3, state: CellState::Dead },
            ]
        );
        assert_eq!(renderer.frames[0].cell(2, 3).unwrap().state, CellState::Alive);
        assert_eq!(renderer.frames[0].cell(1, 3).unwrap().neighbor_count, 1);
    }

    #[test]
    fn test_out_of_range_click_is_ignored() {
        let mut controller = controller(3, 3);
        assert_eq!(controller.handle(UiEvent::Click { i: 3, j: 0 }).unwrap(), None);
        assert!(controller.renderer().frames.is_empty());
        assert!(controller.grid().is_empty());

        // Direct calls still report the error
        assert!(controller.toggle(0, 9).is_err());
    }

    #[test]
    fn test_manual_step() {
        let mut controller = controller(5, 5);
        controller.handle(UiEvent::Click { i: 1, j: 1 }).unwrap();
        controller.handle(UiEvent::Click { i: 1, j: 2 }).unwrap();
        controller.handle(UiEvent::Tick).unwrap();

        assert!(!controller.is_running());
        let frame = controller.renderer().frames.last().unwrap();
        assert_eq!(frame.generation, 1);
        assert_eq!(frame.living_count(), 4);
        assert_eq!(frame.cell(0, 1).unwrap().state, CellState::Alive);
    }

    #[test]
    fn test_start_ticks_immediately() {
        let mut controller = controller(4, 4);
        assert_eq!(controller.handle(UiEvent::Start).unwrap(), Some(TickOutcome::Rearm));
        assert!(controller.is_running());
        assert_eq!(controller.grid().generation(), 1);

        // Starting twice does not tick again
        assert_eq!(controller.start().unwrap(), TickOutcome::Rearm);
        assert_eq!(controller.grid().generation(), 1);

        controller.handle(UiEvent::Stop).unwrap();
        assert!(!controller.is_running());
        // A tick that was already scheduled still runs once, then halts
        assert_eq!(controller.tick().unwrap(), TickOutcome::Halt);
        assert_eq!(controller.grid().generation(), 2);
    }

    #[test]
    fn test_generation_limit() {
        let mut controller = controller(4, 4).with_max_generations(Some(3));
        assert_eq!(controller.start().unwrap(), TickOutcome::Rearm);
        assert_eq!(controller.tick().unwrap(), TickOutcome::Rearm);
        assert_eq!(controller.tick().unwrap(), TickOutcome::Halt);
        assert!(!controller.is_running());
        assert!(!controller.renderer().frames.last().unwrap().running);
    }

    #[test]
    fn test_manual_steps_respect_generation_limit() {
        let mut controller = controller(4, 4).with_max_generations(Some(2));
        assert_eq!(controller.start().unwrap(), TickOutcome::Rearm);
        controller.handle(UiEvent::Tick).unwrap();
        assert_eq!(controller.grid().generation(), 2);
        assert!(!controller.is_running());

        controller.handle(UiEvent::Tick).unwrap();
        assert_eq!(controller.tick().unwrap(), TickOutcome::Halt);
        assert_eq!(controller.grid().generation(), 2);

        // Starting at the limit neither runs nor advances
        assert_eq!(controller.start().unwrap(), TickOutcome::Halt);
        assert!(!controller.is_running());
        assert_eq!(controller.grid().generation(), 2);

        // Reset clears the generation count, so a new run can start
        controller.reset().unwrap();
        assert_eq!(controller.start().unwrap(), TickOutcome::Rearm);
        assert_eq!(controller.grid().generation(), 1);
    }

    #[test]
    fn test_count_display_leaves_grid_alone() {
        let mut controller = controller(3, 3);
        controller.toggle(0, 0).unwrap();
        let before = controller.grid().snapshot();

        controller.handle(UiEvent::ToggleCounts).unwrap();
        assert!(controller.show_counts());
        assert!(controller.renderer().frames.last().unwrap().show_counts);
        controller.handle(UiEvent::ToggleCounts).unwrap();
        assert!(!controller.show_counts());

        assert_eq!(controller.grid().snapshot(), before);
    }

    #[test]
    fn test_reset() {
        let mut controller = controller(3, 3);
        controller.toggle(1, 1).unwrap();
        controller.advance_generation().unwrap();
        controller.handle(UiEvent::Reset).unwrap();

        assert!(controller.grid().is_empty());
        let frame = controller.renderer().frames.last().unwrap();
        assert_eq!(frame.generation, 0);
        assert_eq!(frame.living_count(), 0);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.controller.show_counts = true;
        settings.controller.max_generations = Some(1);

        let mut controller = Controller::from_settings(&settings, RecordingRenderer::default()).unwrap();
        assert_eq!(controller.grid().dimensions(), (30, 20));
        assert!(controller.show_counts());
        assert_eq!(controller.start().unwrap(), TickOutcome::Halt);

        settings.grid.width = 0;
        assert!(Controller::from_settings(&settings, RecordingRenderer::default()).is_err());
    }
}
