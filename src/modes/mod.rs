pub mod leaderboard;
pub mod play;
pub mod spectate;
mod tui;

pub use leaderboard::print_leaderboard;
pub use play::PlayMode;
pub use spectate::SpectateMode;
