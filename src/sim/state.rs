//! Session state and core types
//!
//! Everything a single play session owns lives in `GameSession`; a restart
//! rebuilds it in place.

use serde::{Deserialize, Serialize};

use super::anim::{Animation, Animator};
use super::hold::{HoldGenerator, HoldQueue, HoldSource, Side, init_queue};
use super::timer::TurnTimer;
use crate::settings::Settings;

/// How a resolved turn plays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Correct side: climb, then scroll
    Climb,
    /// Wrong side or timeout: fall, then game over
    Fall,
}

/// Current phase of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for a move; the countdown runs
    Ready,
    /// Playing the climb or fall animation
    Resolving(Resolution),
    /// Wall advancing by one hold
    Scrolling,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// UI-facing signals raised while handling input and ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Correct move; score is the new total
    Climbed { score: u32 },
    /// Wrong move
    Slipped { pressed: Side },
    /// Countdown ran out
    TimedOut,
    /// Wall finished scrolling, next turn is ready
    ScrollFinished,
    /// Fall finished
    GameOver { final_score: u32 },
    /// Session reinitialized
    Restarted,
    DayNightToggled { is_day: bool },
}

/// Wall scroll for the current advance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Pixels scrolled so far, within [0, hold_spacing]
    pub offset: f32,
    /// Pixels still to go
    pub remaining: f32,
}

/// One play session: wall, countdown, climber and score
#[derive(Debug, Clone)]
pub struct GameSession<S: HoldSource = HoldGenerator> {
    pub(crate) settings: Settings,
    pub(crate) source: S,
    pub(crate) holds: HoldQueue,
    pub(crate) phase: TurnPhase,
    pub(crate) timer: TurnTimer,
    pub(crate) scroll: ScrollState,
    pub(crate) animation: Animation,
    pub(crate) score: u32,
    /// Holds scrolled past this run
    pub(crate) holds_passed: u32,
    pub(crate) final_score: Option<u32>,
    pub(crate) is_day: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession<HoldGenerator> {
    /// New session with a seeded random wall
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::new(settings, HoldGenerator::new(seed))
    }
}

impl<S: HoldSource> GameSession<S> {
    /// Create a session in the Ready phase
    pub fn new(settings: Settings, mut source: S) -> Self {
        let holds = init_queue(&mut source, settings.hold_queue_len());
        let timer = TurnTimer::new(settings.max_time_ms);
        let animation = Animation::from_settings(&settings);
        let is_day = settings.start_in_day;
        log::info!(
            "Session created: {} holds, {:?} style",
            holds.len(),
            settings.style
        );
        Self {
            settings,
            source,
            holds,
            phase: TurnPhase::Ready,
            timer,
            scroll: ScrollState::default(),
            animation,
            score: 0,
            holds_passed: 0,
            final_score: None,
            is_day,
            events: Vec::new(),
        }
    }

    /// Full reinitialization; the day/night choice carries over
    pub fn restart(&mut self) {
        self.holds = init_queue(&mut self.source, self.settings.hold_queue_len());
        self.phase = TurnPhase::Ready;
        self.timer.reset();
        self.scroll = ScrollState::default();
        self.animation.reset();
        self.score = 0;
        self.holds_passed = 0;
        self.final_score = None;
        self.events.clear();
        self.events.push(GameEvent::Restarted);
        log::info!("Session restarted");
        self.check_invariants();
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score frozen at game over
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Whether a move would be evaluated right now
    pub fn accepts_input(&self) -> bool {
        self.phase == TurnPhase::Ready
    }

    /// Total wall distance climbed (px), including the scroll in flight
    pub fn ascent(&self) -> f32 {
        self.holds_passed as f32 * self.settings.hold_spacing + self.scroll.offset
    }

    pub fn holds(&self) -> &HoldQueue {
        &self.holds
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Flip the cosmetic day/night theme; no gameplay effect
    pub fn on_toggle_day_night(&mut self) {
        self.is_day = !self.is_day;
        self.events
            .push(GameEvent::DayNightToggled { is_day: self.is_day });
    }

    pub fn on_restart(&mut self) {
        self.restart();
    }

    /// Queue length must never change after construction
    pub(crate) fn check_invariants(&self) {
        debug_assert_eq!(
            self.holds.len(),
            self.settings.hold_queue_len(),
            "hold queue length drifted"
        );
        debug_assert!(self.scroll.offset >= 0.0 && self.scroll.offset <= self.settings.hold_spacing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::anim::Pose;
    use crate::sim::hold::ScriptedHolds;

    #[test]
    fn test_new_session_is_ready() {
        let session = GameSession::with_seed(Settings::default(), 1);
        assert_eq!(session.phase(), TurnPhase::Ready);
        assert_eq!(session.score(), 0);
        assert_eq!(session.holds().len(), 8);
        assert_eq!(session.timer().time_left(), 3000.0);
        assert!(session.is_day());
        assert!(session.accepts_input());
    }

    #[test]
    fn test_toggle_day_night_is_cosmetic() {
        let mut session = GameSession::new(
            Settings::default(),
            ScriptedHolds::from_sides(&[Side::Left]),
        );
        session.on_toggle_day_night();
        assert!(!session.is_day());
        assert_eq!(session.phase(), TurnPhase::Ready);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::DayNightToggled { is_day: false }]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "hold queue length drifted")]
    fn test_move_checks_queue_length() {
        let mut session = GameSession::new(
            Settings::default(),
            ScriptedHolds::from_sides(&[Side::Left]),
        );
        session.holds = init_queue(&mut session.source, 3);
        session.on_move(Side::Left);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "hold queue length drifted")]
    fn test_game_over_checks_queue_length() {
        let mut session = GameSession::new(
            Settings::default(),
            ScriptedHolds::from_sides(&[Side::Left]),
        );
        session.on_move(Side::Right);
        session.holds = init_queue(&mut session.source, 3);
        // Arms are already at rest, so the fall ends on this tick
        session.advance(16.0);
    }

    #[test]
    fn test_restart_keeps_theme_and_resets_pose() {
        let mut session = GameSession::with_seed(Settings::default(), 9);
        session.on_toggle_day_night();
        session.score = 5;
        session.phase = TurnPhase::GameOver;
        session.restart();
        assert!(!session.is_day());
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), TurnPhase::Ready);
        assert_eq!(session.animation().pose(), Pose::Arms { left: 0.0, right: 0.0 });
        assert_eq!(session.drain_events(), vec![GameEvent::Restarted]);
    }
}
