use std::time::{Duration, Instant};

/// Per-session statistics shown next to the grid. The game clock stops
/// while paused and freezes on game over.
pub struct GameMetrics {
    start_time: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
    finished: bool,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub scores_submitted: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            paused_at: None,
            paused_total: Duration::ZERO,
            finished: false,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            scores_submitted: 0,
        }
    }

    pub fn update(&mut self) {
        if self.finished {
            return;
        }

        let now = self.paused_at.unwrap_or_else(Instant::now);
        self.elapsed_time = now
            .saturating_duration_since(self.start_time)
            .saturating_sub(self.paused_total);
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.finished = false;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause_changed(&mut self, paused: bool) {
        match (paused, self.paused_at) {
            (true, None) => self.paused_at = Some(Instant::now()),
            (false, Some(since)) => {
                self.paused_total += since.elapsed();
                self.paused_at = None;
            }
            _ => {}
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.finished = true;
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn on_score_submitted(&mut self) {
        self.scores_submitted += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
