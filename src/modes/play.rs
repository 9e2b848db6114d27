use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{self, Interval};

use crate::game::{GameConfig, GameMachine, GamePhase};
use crate::input::{InputHandler, KeyAction};
use crate::render::{interpolate, Renderer};
use crate::storage::HighScoreStore;

/// A tick schedule whose first fire comes a full period from now
fn schedule_ticks(period: Duration) -> Interval {
    time::interval_at(time::Instant::now() + period, period)
}

pub struct PlayMode {
    machine: GameMachine,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    last_tick: Instant,
}

impl PlayMode {
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        Self {
            machine: GameMachine::new(config, store),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            last_tick: Instant::now(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation cadence follows the selected difficulty; the timer is
        // rebuilt whenever the cadence must restart from a full interval
        let mut tick_timer = schedule_ticks(self.machine.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = time::interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) {
                            tick_timer = schedule_ticks(self.machine.tick_interval());
                        }
                    }
                }

                // Game logic tick; stale fires outside Playing do nothing
                _ = tick_timer.tick() => {
                    if self.machine.phase() == GamePhase::Playing {
                        self.machine.tick();
                        self.last_tick = Instant::now();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let progress = if self.machine.phase() == GamePhase::Playing {
                        interpolate::progress(self.last_tick.elapsed(), self.machine.tick_interval())
                    } else {
                        1.0
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.machine.snapshot(), progress);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one terminal event; returns true when the tick schedule must
    /// be rebuilt (run started or resumed, pace changed)
    fn handle_event(&mut self, event: Event) -> bool {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return false;
            }

            let action = self.input_handler.handle_key_event(key);

            match action {
                KeyAction::Turn(direction) => {
                    self.machine.request_direction(direction);
                }
                KeyAction::Start => {
                    let before = self.machine.phase();
                    self.machine.start();
                    return before == GamePhase::Ready
                        && self.machine.phase() == GamePhase::Playing;
                }
                KeyAction::TogglePause => {
                    self.machine.toggle_pause();
                    // Resuming grants a fresh full interval
                    return self.machine.phase() == GamePhase::Playing;
                }
                KeyAction::SetDifficulty(difficulty) => {
                    let changed = difficulty != self.machine.difficulty();
                    self.machine.set_difficulty(difficulty);
                    return changed && self.machine.phase() == GamePhase::Playing;
                }
                KeyAction::Restart => {
                    // Back to Ready; the next start rebuilds the schedule
                    self.machine.restart();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        false
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
