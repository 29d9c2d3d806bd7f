//! Session context
//!
//! A session owns at most one running game, and only one game may run in the
//! whole process at a time. The host creates one session, starts a game in
//! it and drives that game every frame.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{GameError, GameResult};
use crate::settings::Settings;
use crate::sim::Game;
use crate::tuning::Tuning;

/// Set while some session holds a running game
static GAME_RUNNING: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Default)]
pub struct Session {
    game: Option<Game>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the field and start a game.
    ///
    /// Refuses with [`GameError::AlreadyRunning`] while another game is
    /// active, in this session or any other; the running game is left
    /// untouched.
    pub fn start(&mut self, settings: Settings, tuning: Tuning) -> GameResult<&mut Game> {
        if self.game.is_some()
            || GAME_RUNNING
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
        {
            log::error!("Refusing to start a second game while one is running");
            return Err(GameError::AlreadyRunning);
        }

        log::info!(
            "Starting game (seed {:#x}, palette {:?})",
            tuning.seed,
            settings.palette
        );
        Ok(self.game.insert(Game::new(settings, tuning)))
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    pub fn is_running(&self) -> bool {
        self.game.is_some()
    }

    /// Stop the running game and hand it back
    pub fn end(&mut self) -> Option<Game> {
        let game = self.game.take();
        if let Some(game) = &game {
            GAME_RUNNING.store(false, Ordering::Release);
            log::info!(
                "Game ended after {} ticks with score {}",
                game.time_ticks(),
                game.score()
            );
        }
        game
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.game.is_some() {
            GAME_RUNNING.store(false, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Contact, ContactKind};
    use glam::Vec2;
    use std::sync::{Mutex, MutexGuard};

    // Sessions share one process-wide slot; tests that start games take turns
    static SLOT: Mutex<()> = Mutex::new(());

    fn claim_slot() -> MutexGuard<'static, ()> {
        SLOT.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_second_start_is_refused() {
        let _slot = claim_slot();
        let mut session = Session::new();
        let game = session
            .start(Settings::default(), Tuning::default())
            .unwrap();
        game.resolve_contact(
            0,
            Contact {
                other: ContactKind::Block(0),
                normal: Vec2::Y,
                penetration: 0.0,
            },
        );
        let score = game.score();
        assert!(score > 0);

        let err = session.start(Settings::default(), Tuning::default());
        assert!(matches!(err, Err(GameError::AlreadyRunning)));
        assert_eq!(session.game().map(Game::score), Some(score));
    }

    #[test]
    fn test_second_session_is_refused() {
        let _slot = claim_slot();
        let mut first = Session::new();
        let mut second = Session::new();
        assert!(first.start(Settings::default(), Tuning::default()).is_ok());

        let err = second.start(Settings::default(), Tuning::default());
        assert!(matches!(err, Err(GameError::AlreadyRunning)));
        assert!(first.is_running());
        assert!(!second.is_running());

        first.end();
        assert!(second.start(Settings::default(), Tuning::default()).is_ok());
    }

    #[test]
    fn test_dropping_a_session_frees_the_slot() {
        let _slot = claim_slot();
        {
            let mut session = Session::new();
            assert!(session.start(Settings::default(), Tuning::default()).is_ok());
        }
        let mut session = Session::new();
        assert!(session.start(Settings::default(), Tuning::default()).is_ok());
    }

    #[test]
    fn test_restart_after_end() {
        let _slot = claim_slot();
        let mut session = Session::new();
        assert!(!session.is_running());
        assert!(session.end().is_none());

        session
            .start(Settings::default(), Tuning::default())
            .unwrap();
        assert!(session.is_running());
        let ended = session.end().unwrap();
        assert_eq!(ended.score(), 0);
        assert!(!session.is_running());

        assert!(session.start(Settings::default(), Tuning::default()).is_ok());
        assert!(session.game_mut().is_some());
    }
}
