//! Turn resolution and per-frame advance
//!
//! Moves resolve instantly when received; everything time-based happens in
//! `advance`, once per display refresh.

use super::anim::{Animator, Sequence};
use super::hold::{HoldSource, Side};
use super::state::{GameEvent, GameSession, Resolution, ScrollState, TurnPhase};
use super::timer::TimerStatus;

/// Scroll distance (px) treated as arrived, absorbs f32 drift
const SCROLL_EPSILON: f32 = 1e-3;

/// Commands gathered for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move toward the left or right hold
    pub movement: Option<Side>,
    /// Day/night theme toggle
    pub toggle_day_night: bool,
    /// Start over
    pub restart: bool,
}

impl TickInput {
    /// Forget the one-shot commands once a frame has consumed them
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Apply this frame's commands, then advance the session by `dt` ms
pub fn tick<S: HoldSource>(session: &mut GameSession<S>, input: &TickInput, dt: f64) {
    if input.restart {
        session.on_restart();
    }
    if input.toggle_day_night {
        session.on_toggle_day_night();
    }
    if let Some(side) = input.movement {
        session.on_move(side);
    }
    session.advance(dt);
}

impl<S: HoldSource> GameSession<S> {
    /// Player chose a side. Ignored unless the turn is Ready.
    pub fn on_move(&mut self, side: Side) {
        if self.phase != TurnPhase::Ready {
            return;
        }

        let active = *self.holds.active();
        self.timer.reset();
        if active.side == side {
            self.score += 1;
            self.phase = TurnPhase::Resolving(Resolution::Climb);
            self.animation.play(Sequence::Climb(side));
            self.events.push(GameEvent::Climbed { score: self.score });
            log::debug!("Climbed {:?}, score {}", side, self.score);
        } else {
            self.phase = TurnPhase::Resolving(Resolution::Fall);
            self.animation.play(Sequence::Fall(Some(side)));
            self.events.push(GameEvent::Slipped { pressed: side });
            log::debug!("Slipped: pressed {:?}, hold was {:?}", side, active.side);
        }
        self.check_invariants();
    }

    /// Advance timers, animation and scroll by `dt` milliseconds
    pub fn advance(&mut self, dt: f64) {
        if self.phase == TurnPhase::GameOver {
            return;
        }
        let dt = dt.max(0.0);

        // Countdown; an expiry starts the fall with the time left over
        let mut anim_dt = dt;
        let running = self.phase == TurnPhase::Ready;
        if let TimerStatus::Expired { overshoot } = self.timer.tick(dt, running) {
            self.timer.reset();
            self.phase = TurnPhase::Resolving(Resolution::Fall);
            self.animation.play(Sequence::Fall(None));
            self.events.push(GameEvent::TimedOut);
            log::debug!("Timed out at score {}", self.score);
            anim_dt = overshoot;
        }

        self.animation.advance(anim_dt);

        if let TurnPhase::Resolving(resolution) = self.phase {
            if let Some(done) = self.animation.take_completed() {
                match resolution {
                    Resolution::Climb => self.begin_scroll(),
                    Resolution::Fall => self.end_run(),
                }
                log::trace!("{:?} finished", done);
            }
            // Scrolling starts on the next frame
            return;
        }

        if self.phase == TurnPhase::Scrolling {
            self.advance_scroll(dt);
        }
    }

    fn begin_scroll(&mut self) {
        self.phase = TurnPhase::Scrolling;
        self.scroll = ScrollState {
            offset: 0.0,
            remaining: self.settings.hold_spacing,
        };
        self.check_invariants();
    }

    fn advance_scroll(&mut self, dt: f64) {
        let step = (self.settings.scroll_speed() * dt) as f32;
        let dist = step.min(self.scroll.remaining);
        self.scroll.offset += dist;
        self.scroll.remaining -= dist;

        if self.scroll.remaining <= SCROLL_EPSILON {
            self.finish_scroll();
        }
    }

    /// Rotate the wall by one hold and hand control back to the player
    fn finish_scroll(&mut self) {
        let fresh = self.source.next_hold();
        self.holds.advance(fresh);
        self.holds_passed += 1;
        self.scroll = ScrollState::default();
        self.animation.settle();
        self.timer.reset();
        self.phase = TurnPhase::Ready;
        self.events.push(GameEvent::ScrollFinished);
        self.check_invariants();
    }

    fn end_run(&mut self) {
        self.phase = TurnPhase::GameOver;
        self.final_score = Some(self.score);
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!("Game over, final score {}", self.score);
        self.check_invariants();
    }
}
