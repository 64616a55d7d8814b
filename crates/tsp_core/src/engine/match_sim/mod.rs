//! Match Simulation Engine
//!
//! Fixed-tick simulator for a live match. Each tick derives the next
//! [`MatchSnapshot`] from the previous one and swaps it in whole, so readers
//! holding an `Arc` always see a complete state.
//!
//! ## Tick order (LIVE)
//!
//! ```text
//!  1. queued human requests      -> actions::resolve_action
//!  2. last tick's AI decision    -> actions::resolve_action
//!  3. ball integration           -> ball_physics::integrate   (goal ends the tick)
//!  4. possession                 -> ball_physics::resolve_possession
//!  5. off-ball movement          -> movement::apply_movement
//!  6. has_ball flags             -> ball_physics::sync_possession_flags
//!  7. autonomous holder decides  -> action_decision::decide_action (applied next tick)
//!  8. clock + tick counter, snapshot swap
//! ```
//!
//! During GOAL_CELEBRATION a tick only counts down the restart. When it
//! fires, the roster is rebuilt (`kickoff`) and play is LIVE again.
//!
//! ## Sub-modules
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `action_decision` | Autonomous holder policy |
//! | `actions` | Action resolution (pass/shoot/dribble) |
//! | `ball_physics` | Ball integration, goals, possession |
//! | `interactive_session` | Press-and-hold power charging |
//! | `kickoff` | Roster/ball reconstruction |
//! | `match_phase` | Phase state machine |
//! | `movement` | Off-ball targets and steps |
//! | `user_command` | Human request queue |

pub mod action_decision;
pub mod actions;
pub mod ball_physics;
pub mod interactive_session;
pub mod kickoff;
pub mod match_phase;
pub mod movement;
pub mod user_command;

#[cfg(test)]
pub mod test_fixtures;

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use action_decision::decide_action;
pub use actions::ActionRequest;
pub use interactive_session::{InputSession, PressTarget};
pub use match_phase::{MatchPhase, PhaseTrigger};
pub use user_command::{UserCommand, UserCommandQueue};

use ball_physics::BallOutcome;

use crate::engine::config::EngineConfig;
use crate::engine::snapshot::{MatchSnapshot, Score};
use crate::error::Result;
use crate::models::{MatchEvent, MatchSetup, TeamSide};
use crate::tactics::TeamStrategy;

// ============================================
// StepResult: Per-tick result
// ============================================

/// Result of a single engine tick.
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// Waiting for `start_match`.
    NotStarted,

    /// Live tick (including the tick a restart kickoff fires on).
    Tick(TickData),

    /// Goal celebration; the restart fires when the countdown reaches zero.
    Celebration { ticks_until_kickoff: u64 },

    /// The engine was shut down.
    Stopped,
}

impl StepResult {
    pub fn events(&self) -> &[MatchEvent] {
        match self {
            StepResult::Tick(data) => &data.events,
            _ => &[],
        }
    }
}

/// Data returned for each live tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickData {
    pub tick: u64,
    /// Match clock in seconds.
    pub elapsed: f32,
    pub score: Score,
    /// Events that occurred during this tick, in order.
    pub events: Vec<MatchEvent>,
}

/// Restart armed by a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingKickoff {
    side: TeamSide,
    ticks_remaining: u64,
}

pub struct MatchEngine {
    setup: MatchSetup,
    config: EngineConfig,
    rng: ChaCha8Rng,
    snapshot: Arc<MatchSnapshot>,
    commands: UserCommandQueue,
    /// Decision taken last tick, applied at the start of the next one.
    pending_decision: Option<ActionRequest>,
    pending_kickoff: Option<PendingKickoff>,
    stopped: bool,
}

impl MatchEngine {
    /// Validate configuration and formations; the match starts in PRE_MATCH.
    pub fn new(setup: MatchSetup, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        setup.home_formation.validate(&config.pitch)?;
        setup.away_formation.validate(&config.pitch)?;

        let rng = ChaCha8Rng::seed_from_u64(setup.seed);
        let snapshot = Arc::new(MatchSnapshot::pre_match(setup.home_strategy));
        log::info!(
            "match engine ready: seed={} human_side={:?} tick_ms={}",
            setup.seed,
            setup.human_side,
            config.timing.tick_ms
        );

        Ok(Self {
            setup,
            config,
            rng,
            snapshot,
            commands: UserCommandQueue::new(),
            pending_decision: None,
            pending_kickoff: None,
            stopped: false,
        })
    }

    pub fn setup(&self) -> &MatchSetup {
        &self.setup
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current published snapshot.
    pub fn snapshot(&self) -> Arc<MatchSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn phase(&self) -> MatchPhase {
        self.snapshot.phase
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Ticks left before a pending restart kickoff fires.
    pub fn ticks_until_kickoff(&self) -> Option<u64> {
        self.pending_kickoff.map(|k| k.ticks_remaining)
    }

    /// PRE_MATCH -> LIVE with `kicking` on the ball.
    pub fn start_match(&mut self, kicking: TeamSide) -> Result<MatchEvent> {
        match_phase::transition(self.snapshot.phase, PhaseTrigger::StartCommand)?;
        let (next, event) =
            kickoff::kickoff_snapshot(&self.snapshot, kicking, &self.setup, &self.config.pitch, &mut self.rng)?;
        self.snapshot = Arc::new(next);
        self.stopped = false;
        Ok(event)
    }

    /// Queue a human request for the next live tick.
    ///
    /// Returns `false` when the engine is stopped. Whether the request is
    /// valid is only known when it is applied; invalid ones are dropped then.
    pub fn request_action(&mut self, request: ActionRequest) -> bool {
        if self.stopped {
            return false;
        }
        let seq = self.commands.next_seq();
        self.commands.enqueue(UserCommand { seq, request })
    }

    /// Queue an already sequenced command (replayed seqs are dropped).
    pub fn submit_user_command(&mut self, cmd: UserCommand) -> bool {
        !self.stopped && self.commands.enqueue(cmd)
    }

    pub fn set_home_strategy(&mut self, strategy: TeamStrategy) {
        self.setup.home_strategy = strategy;
        Arc::make_mut(&mut self.snapshot).home_strategy = strategy;
    }

    pub fn set_global_pressing(&mut self, pressing: bool) {
        Arc::make_mut(&mut self.snapshot).is_global_pressing = pressing;
    }

    /// Stop simulating and cancel any pending restart.
    pub fn shutdown(&mut self) {
        if self.pending_kickoff.take().is_some() {
            log::debug!("pending kickoff cancelled");
        }
        self.pending_decision = None;
        self.commands.clear();
        self.stopped = true;
    }

    /// Advance the match by one tick.
    ///
    /// Only a roster rebuild failure at a restart kickoff is an error.
    pub fn tick(&mut self) -> Result<StepResult> {
        if self.stopped {
            return Ok(StepResult::Stopped);
        }
        match self.snapshot.phase {
            MatchPhase::PreMatch => Ok(StepResult::NotStarted),
            MatchPhase::GoalCelebration => self.celebration_tick(),
            MatchPhase::Live => Ok(StepResult::Tick(self.live_tick())),
        }
    }

    fn celebration_tick(&mut self) -> Result<StepResult> {
        let Some(mut pending) = self.pending_kickoff else {
            return Ok(StepResult::Stopped);
        };
        pending.ticks_remaining = pending.ticks_remaining.saturating_sub(1);
        if pending.ticks_remaining > 0 {
            self.pending_kickoff = Some(pending);
            return Ok(StepResult::Celebration { ticks_until_kickoff: pending.ticks_remaining });
        }

        match_phase::transition(self.snapshot.phase, PhaseTrigger::CelebrationElapsed)?;
        let (next, event) = kickoff::kickoff_snapshot(
            &self.snapshot,
            pending.side,
            &self.setup,
            &self.config.pitch,
            &mut self.rng,
        )?;
        self.pending_kickoff = None;
        self.pending_decision = None;
        self.commands.clear();

        let data = TickData {
            tick: next.tick,
            elapsed: next.elapsed,
            score: next.score,
            events: vec![event],
        };
        self.snapshot = Arc::new(next);
        Ok(StepResult::Tick(data))
    }

    fn live_tick(&mut self) -> TickData {
        let mut next = (*self.snapshot).clone();
        let mut events = Vec::new();

        // 1. Human requests
        for cmd in self.commands.drain() {
            let Some(human) = self.setup.human_side else { continue };
            if next.possessing_side() != Some(human) {
                continue;
            }
            if let Some(event) =
                actions::resolve_action(&mut next, &cmd.request, &self.config.pitch, &self.config.actions, &mut self.rng)
            {
                events.push(event);
            }
        }

        // 2. Deferred autonomous decision
        if let Some(request) = self.pending_decision.take() {
            let autonomous_holder =
                next.holder().is_some_and(|h| self.setup.is_autonomous(h.side));
            if autonomous_holder {
                if let Some(event) =
                    actions::resolve_action(&mut next, &request, &self.config.pitch, &self.config.actions, &mut self.rng)
                {
                    events.push(event);
                }
            }
        }
        if let Some(last) = events.last() {
            next.last_action_summary = last.description();
        }

        // 3. Ball
        if let BallOutcome::Goal { scorer } =
            ball_physics::integrate(&mut next.ball, &self.config.pitch, &self.config.ball)
        {
            let event = self.score_goal(&mut next, scorer);
            events.push(event);
            let data =
                TickData { tick: next.tick, elapsed: next.elapsed, score: next.score, events };
            self.snapshot = Arc::new(next);
            return data;
        }

        // 4-6. Possession, movement, flags
        ball_physics::resolve_possession(&mut next, &self.config.ball);
        movement::apply_movement(&mut next, &self.config.pitch, &self.config.movement);
        ball_physics::sync_possession_flags(&mut next);

        // 7. Autonomous holder decides for next tick
        if let Some(holder) = next.holder() {
            if holder.can_act() && self.setup.is_autonomous(holder.side) {
                let request = decide_action(holder, &next, &self.config.pitch, &mut self.rng);
                self.pending_decision = Some(request);
            }
        }

        // 8. Clock
        next.elapsed += self.config.timing.tick_seconds();
        next.tick += 1;

        let data = TickData { tick: next.tick, elapsed: next.elapsed, score: next.score, events };
        self.snapshot = Arc::new(next);
        data
    }

    /// Count the goal, enter celebration and arm the restart for the
    /// conceding side.
    fn score_goal(&mut self, next: &mut MatchSnapshot, scorer: TeamSide) -> MatchEvent {
        next.score.add_goal(scorer);
        // Live -> GoalCelebration is always valid here.
        next.phase = match_phase::next_phase(next.phase, PhaseTrigger::GoalScored)
            .unwrap_or(MatchPhase::GoalCelebration);
        let conceded = scorer.opponent();
        next.last_conceded = Some(conceded);

        let event = MatchEvent::goal(next.tick, next.elapsed, scorer);
        next.last_action_summary = event.description();

        self.pending_decision = None;
        self.pending_kickoff = Some(PendingKickoff {
            side: conceded,
            ticks_remaining: self.config.timing.celebration_ticks(),
        });
        log::info!(
            "GOAL {} at {} ({}-{})",
            scorer,
            next.clock_label(),
            next.score.home,
            next.score.away
        );
        event
    }

    #[cfg(test)]
    pub(crate) fn install_snapshot(&mut self, snapshot: MatchSnapshot) {
        self.snapshot = Arc::new(snapshot);
    }
}
