//! Live Match Runner
//!
//! Drives a [`MatchEngine`] on its own thread at the configured tick period.
//! Readers get the latest snapshot through a copy-on-write handoff: the
//! runner swaps in a new `Arc<MatchSnapshot>` after every tick, so a reader
//! never sees a half-built state and never blocks the loop for longer than
//! an `Arc` clone.
//!
//! Input arrives as [`MatchCommand`]s over a channel and is applied at the
//! start of the next tick. Stopping (or dropping) the runner shuts the engine
//! down, which cancels a pending restart kickoff.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::commentary::{CommentaryDesk, NarrationLine};
use crate::engine::match_sim::{ActionRequest, MatchEngine, StepResult};
use crate::engine::snapshot::MatchSnapshot;
use crate::error::Result;
use crate::models::{MatchEvent, TeamSide};
use crate::tactics::TeamStrategy;

/// Input accepted by a running match.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchCommand {
    Start(TeamSide),
    Action(ActionRequest),
    SetStrategy(TeamStrategy),
    SetPressing(bool),
}

type SharedSnapshot = Arc<RwLock<Arc<MatchSnapshot>>>;

pub struct LiveMatch {
    commands: Sender<MatchCommand>,
    snapshot: SharedSnapshot,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    desk: Option<CommentaryDesk>,
}

impl LiveMatch {
    /// Spawn the runner thread. Events are forwarded to `desk` when given.
    pub fn spawn(engine: MatchEngine, desk: Option<CommentaryDesk>) -> Result<Self> {
        let (commands, receiver) = mpsc::channel();
        let snapshot: SharedSnapshot = Arc::new(RwLock::new(engine.snapshot()));
        let stop = Arc::new(AtomicBool::new(false));

        let runner = Runner {
            engine,
            receiver,
            published: Arc::clone(&snapshot),
            stop: Arc::clone(&stop),
            narration: desk.as_ref().and_then(CommentaryDesk::sender),
        };
        let worker = thread::Builder::new()
            .name("tsp-match".to_string())
            .spawn(move || runner.run())?;

        Ok(Self { commands, snapshot, stop, worker: Some(worker), desk })
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<MatchSnapshot> {
        let guard = self.snapshot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Latest commentary line, when a desk is attached.
    pub fn commentary(&self) -> Option<NarrationLine> {
        self.desk.as_ref().map(CommentaryDesk::latest)
    }

    /// Queue a command for the next tick. `false` once the runner is gone.
    pub fn send(&self, command: MatchCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn start(&self, kicking: TeamSide) -> bool {
        self.send(MatchCommand::Start(kicking))
    }

    pub fn request_action(&self, request: ActionRequest) -> bool {
        self.send(MatchCommand::Action(request))
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Stop the runner and wait for it. Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::error!("match runner panicked");
            }
        }
        if let Some(desk) = self.desk.as_mut() {
            desk.shutdown();
        }
    }
}

impl Drop for LiveMatch {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Runner {
    engine: MatchEngine,
    receiver: Receiver<MatchCommand>,
    published: SharedSnapshot,
    stop: Arc<AtomicBool>,
    narration: Option<Sender<MatchEvent>>,
}

impl Runner {
    fn run(mut self) {
        let period = Duration::from_millis(self.engine.config().timing.tick_ms);
        let mut deadline = Instant::now() + period;
        log::debug!("match runner started ({}ms ticks)", period.as_millis());

        while !self.stop.load(Ordering::SeqCst) {
            if !self.apply_commands() {
                break;
            }

            match self.engine.tick() {
                Ok(StepResult::Stopped) => break,
                Ok(step) => {
                    for event in step.events() {
                        self.narrate(event);
                    }
                }
                Err(err) => {
                    log::error!("match aborted: {}", err);
                    break;
                }
            }
            self.publish();

            let now = Instant::now();
            match deadline.checked_duration_since(now) {
                Some(wait) => thread::sleep(wait),
                // Fell behind; restart the schedule instead of bursting.
                None => deadline = now,
            }
            deadline += period;
        }

        self.engine.shutdown();
        self.publish();
        log::debug!("match runner stopped at tick {}", self.engine.snapshot().tick);
    }

    /// Apply queued commands. `false` when every sender is gone.
    fn apply_commands(&mut self) -> bool {
        loop {
            let command = match self.receiver.try_recv() {
                Ok(command) => command,
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            };
            match command {
                MatchCommand::Start(side) => match self.engine.start_match(side) {
                    Ok(event) => self.narrate(&event),
                    Err(err) => log::warn!("start ignored: {}", err),
                },
                MatchCommand::Action(request) => {
                    self.engine.request_action(request);
                }
                MatchCommand::SetStrategy(strategy) => self.engine.set_home_strategy(strategy),
                MatchCommand::SetPressing(on) => self.engine.set_global_pressing(on),
            }
        }
    }

    fn narrate(&self, event: &MatchEvent) {
        if let Some(tx) = &self.narration {
            // A closed desk only means no more commentary.
            let _ = tx.send(event.clone());
        }
    }

    fn publish(&self) {
        let next = self.engine.snapshot();
        let mut slot = self.published.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::Narrator;
    use crate::engine::config::EngineConfig;
    use crate::engine::match_sim::MatchPhase;
    use crate::models::MatchSetup;

    fn fast_engine(seed: u64) -> MatchEngine {
        let mut config = EngineConfig::default();
        config.timing.tick_ms = 2;
        MatchEngine::new(MatchSetup::autoplay(seed), config).unwrap()
    }

    fn wait_for(live: &LiveMatch, pred: impl Fn(&MatchSnapshot) -> bool) -> bool {
        let until = Instant::now() + Duration::from_secs(5);
        while Instant::now() < until {
            if pred(live.snapshot().as_ref()) {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn test_runner_ticks_after_start() {
        let mut live = LiveMatch::spawn(fast_engine(4), None).unwrap();
        assert_eq!(live.snapshot().phase, MatchPhase::PreMatch);

        assert!(live.start(TeamSide::Home));
        assert!(wait_for(&live, |s| s.tick >= 10));
        let snap = live.snapshot();
        assert_eq!(snap.players.len(), 22);
        assert!(snap.possession_count() <= 1);

        live.stop();
        assert!(!live.is_running());
        assert!(!live.start(TeamSide::Away));
    }

    #[test]
    fn test_settings_reach_snapshot() {
        let mut live = LiveMatch::spawn(fast_engine(9), None).unwrap();
        live.start(TeamSide::Away);
        live.send(MatchCommand::SetStrategy(TeamStrategy::Defensive));
        live.send(MatchCommand::SetPressing(true));

        assert!(wait_for(&live, |s| s.is_global_pressing
            && s.home_strategy == TeamStrategy::Defensive));
        live.stop();
    }

    #[test]
    fn test_kickoff_reaches_commentary() {
        let desk = CommentaryDesk::spawn(Narrator::offline(Default::default()), 2);
        let mut live = LiveMatch::spawn(fast_engine(1), Some(desk)).unwrap();
        live.start(TeamSide::Home);
        assert!(wait_for(&live, |s| s.phase == MatchPhase::Live));

        // Stopping drains the desk.
        live.stop();
        let line = live.commentary().unwrap();
        assert_ne!(line.text, crate::commentary::WELCOME_LINE);
    }
}
