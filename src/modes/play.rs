use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

use super::tui::{Tui, restore_terminal, setup_terminal};
use crate::game::{Command, GameConfig, GameEngine, PacingConfig, SimulationState};
use crate::input::{InputHandler, KeyAction};
use crate::leaderboard::{Leaderboard, ScoreSubmitter, SkipReason, Submission};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::scheduler::TickScheduler;

/// Interactive player loop. Owns the only engine and state for the local
/// game; ticks speed up with the score.
pub struct PlayMode<L> {
    engine: GameEngine,
    state: SimulationState,
    pacing: PacingConfig,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    submitter: ScoreSubmitter<L>,
    notice: Option<String>,
    should_quit: bool,
}

impl<L: Leaderboard> PlayMode<L> {
    pub fn new(
        config: GameConfig,
        pacing: PacingConfig,
        submitter: ScoreSubmitter<L>,
        seed: Option<u64>,
    ) -> Self {
        let mut engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.reset();

        log::info!(
            "New {} game on a {}x{} grid",
            state.policy.as_str(),
            state.grid_size,
            state.grid_size
        );

        Self {
            engine,
            state,
            pacing,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            submitter,
            notice: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    /// Status line shown after the last game ended
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn tick_interval(&self) -> Duration {
        self.pacing.tick_interval(self.state.score)
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut scheduler = TickScheduler::new(self.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = scheduler.tick() => {
                    self.update_game().await;
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render_play(
                            frame,
                            &self.state,
                            &self.metrics,
                            self.notice.as_deref(),
                        );
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Score changes and restarts both move the pace
            scheduler.set_period(self.tick_interval());
        }

        scheduler.cancel();
        log::info!(
            "Leaving play mode after {} games (best {})",
            self.metrics.games_played,
            self.metrics.high_score
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => self.handle_command(command),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        let was_paused = self.state.paused;
        self.state = self.engine.apply(self.state.clone(), command);

        match command {
            Command::Restart => {
                self.metrics.on_game_start();
                self.notice = None;
            }
            Command::TogglePause if self.state.paused != was_paused => {
                self.metrics.on_pause_changed(self.state.paused);
            }
            _ => {}
        }
    }

    async fn update_game(&mut self) {
        let result = self.engine.step(self.state.clone());
        self.state = result.state;

        if result.info.ate_food {
            log::debug!("Score {} (tick {:?})", self.state.score, self.tick_interval());
        }

        if let Some(collision) = result.info.collision {
            log::info!("Game over ({:?}) with score {}", collision, self.state.score);
            self.metrics.on_game_over(self.state.score);

            let outcome = self.submitter.on_game_over(&self.state).await;
            if let Submission::Submitted(_) = outcome {
                self.metrics.on_score_submitted();
            }
            self.notice = Some(describe_submission(&outcome));
        }
    }
}

fn describe_submission(outcome: &Submission) -> String {
    match outcome {
        Submission::Submitted(entry) => format!(
            "Score {} saved to the {} leaderboard",
            entry.score,
            entry.policy.as_str()
        ),
        Submission::Skipped(SkipReason::ZeroScore) => "No points this time".to_string(),
        Submission::Skipped(SkipReason::Anonymous) => {
            "Start with --user to save your score".to_string()
        }
        Submission::Skipped(SkipReason::NotTerminal) => String::new(),
        Submission::Failed(err) => format!("Could not save score: {}", err),
    }
}
