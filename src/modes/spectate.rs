use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use super::tui::{Tui, restore_terminal, setup_terminal};
use crate::feed::{ActivePlayer, ActivePlayerFeed};
use crate::input::{InputHandler, SpectatorKey};
use crate::render::Renderer;
use crate::scheduler::TickScheduler;
use crate::settings::Settings;
use crate::spectator::{Autopilot, SpectatorReplica};

/// Lists active players and follows one of them with a local replica
pub struct SpectateMode<F> {
    feed: F,
    grid_size: usize,
    turn_probability: f64,
    tick: Duration,
    refresh: Duration,
    seed: Option<u64>,
    players: Vec<ActivePlayer>,
    selected: usize,
    replica: Option<SpectatorReplica>,
    status: String,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<F: ActivePlayerFeed> SpectateMode<F> {
    pub fn new(feed: F, settings: &Settings, seed: Option<u64>) -> Self {
        Self {
            feed,
            grid_size: settings.game.grid_size,
            turn_probability: settings.turn_probability,
            tick: settings.spectator_tick(),
            refresh: settings.feed_refresh(),
            seed,
            players: Vec::new(),
            selected: 0,
            replica: None,
            status: "Loading players...".to_string(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub fn players(&self) -> &[ActivePlayer] {
        &self.players
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn replica(&self) -> Option<&SpectatorReplica> {
        self.replica.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut scheduler = TickScheduler::new(self.tick);

        // First tick fires immediately and loads the list
        let mut refresh_timer = interval(self.refresh);
        refresh_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event).await;
                    }
                }

                _ = scheduler.tick() => {
                    self.advance();
                }

                _ = refresh_timer.tick() => {
                    self.refresh().await;
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render_spectate(
                            frame,
                            &self.players,
                            self.selected,
                            self.replica.as_ref(),
                            &self.status,
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
        }

        scheduler.cancel();
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_spectator_key(key) {
                SpectatorKey::Next => self.select_next(),
                SpectatorKey::Previous => self.select_previous(),
                SpectatorKey::Watch => self.watch_selected(),
                SpectatorKey::Refresh => self.refresh().await,
                SpectatorKey::Quit => self.should_quit = true,
                SpectatorKey::None => {}
            }
        }
    }

    pub fn select_next(&mut self) {
        if !self.players.is_empty() {
            self.selected = (self.selected + 1) % self.players.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.players.is_empty() {
            self.selected = (self.selected + self.players.len() - 1) % self.players.len();
        }
    }

    /// Start following the highlighted player
    pub fn watch_selected(&mut self) {
        let Some(snapshot) = self.players.get(self.selected) else {
            self.status = "No active players".to_string();
            return;
        };

        match SpectatorReplica::from_snapshot(snapshot, self.grid_size, self.seed) {
            Ok(replica) => {
                let autopilot = match self.seed {
                    Some(seed) => Autopilot::seeded(self.turn_probability, seed),
                    None => Autopilot::new(self.turn_probability),
                };
                log::info!("Watching {} ({})", snapshot.username, snapshot.id);
                self.status = format!("Watching {}", snapshot.username);
                self.replica = Some(replica.with_autopilot(autopilot));
            }
            Err(err) => {
                log::warn!("Cannot watch {}: {:#}", snapshot.id, err);
                self.status = format!("Cannot watch {}: {}", snapshot.username, err);
            }
        }
    }

    /// Reload the player list and resync the watched replica
    pub async fn refresh(&mut self) {
        let players = match self.feed.active_players().await {
            Ok(players) => players,
            Err(err) => {
                log::warn!("Feed refresh failed: {:#}", err);
                self.status = format!("Feed unavailable: {}", err);
                return;
            }
        };

        self.players = players;
        self.selected = self.selected.min(self.players.len().saturating_sub(1));

        let Some(replica) = self.replica.as_mut() else {
            self.status = format!("{} active players", self.players.len());
            return;
        };

        match self.players.iter().find(|p| p.id == replica.player_id()) {
            Some(snapshot) => {
                if let Err(err) = replica.resync(snapshot) {
                    log::warn!("Dropping replica of {}: {:#}", snapshot.id, err);
                    self.status = format!("Lost {}: {}", snapshot.username, err);
                    self.replica = None;
                }
            }
            None => {
                log::info!("{} left the game", replica.username());
                self.status = format!("{} left the game", replica.username());
                self.replica = None;
            }
        }
    }

    pub fn advance(&mut self) {
        if let Some(replica) = self.replica.as_mut() {
            replica.advance();
        }
    }
}
