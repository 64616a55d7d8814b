//! Asynchronous commentary desk
//!
//! Events are handed to a worker thread over a channel; the worker runs the
//! [`Narrator`] and publishes the newest line behind a lock. Submitting never
//! blocks the caller, so a slow remote generator cannot stall the tick loop.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use super::narrator::{NarrationLine, Narrator};
use crate::models::MatchEvent;

pub struct CommentaryDesk {
    sender: Option<Sender<MatchEvent>>,
    latest: Arc<RwLock<NarrationLine>>,
    worker: Option<JoinHandle<()>>,
}

impl CommentaryDesk {
    /// Start the worker. `seed` drives fallback line selection.
    pub fn spawn(mut narrator: Narrator, seed: u64) -> Self {
        let (sender, receiver) = mpsc::channel::<MatchEvent>();
        let latest = Arc::new(RwLock::new(NarrationLine::welcome()));
        let published = Arc::clone(&latest);

        let worker = thread::Builder::new()
            .name("tsp-commentary".to_string())
            .spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                while let Ok(event) = receiver.recv() {
                    let Some(line) = narrator.narrate(&event, Instant::now(), &mut rng) else {
                        continue;
                    };
                    debug!(category = ?line.category, source = ?line.source, "narration: {}", line.text);
                    let mut slot = published.write().unwrap_or_else(|poisoned| poisoned.into_inner());
                    *slot = line;
                }
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(%err, "commentary worker failed to start, narration disabled");
                None
            }
        };
        let sender = worker.as_ref().map(|_| sender);
        Self { sender, latest, worker }
    }

    /// Hand `event` to the worker. Returns `false` once the desk is closed.
    pub fn submit(&self, event: MatchEvent) -> bool {
        self.sender.as_ref().is_some_and(|tx| tx.send(event).is_ok())
    }

    /// Extra submission handle for another thread. The worker only finishes
    /// once every handle is dropped.
    pub fn sender(&self) -> Option<Sender<MatchEvent>> {
        self.sender.clone()
    }

    /// Newest line on display.
    pub fn latest(&self) -> NarrationLine {
        self.latest.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Close the channel and wait for queued events to be narrated.
    pub fn shutdown(&mut self) {
        self.sender = None;
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("commentary worker panicked");
            }
        }
    }
}

impl Drop for CommentaryDesk {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::lines::{NarrationCategory, WELCOME_LINE};
    use crate::engine::config::NarrationConfig;
    use crate::models::TeamSide;

    #[test]
    fn test_starts_with_welcome_line() {
        let desk = CommentaryDesk::spawn(Narrator::offline(NarrationConfig::default()), 1);
        assert_eq!(desk.latest().text, WELCOME_LINE);
    }

    #[test]
    fn test_goal_line_published() {
        let mut desk = CommentaryDesk::spawn(Narrator::offline(NarrationConfig::default()), 1);
        assert!(desk.submit(MatchEvent::goal(10, 0.4, TeamSide::Home)));
        desk.shutdown();

        let line = desk.latest();
        assert_eq!(line.category, NarrationCategory::Goal);
        assert!(NarrationCategory::Goal.lines().contains(&line.text.as_str()));
        assert!(!desk.submit(MatchEvent::kickoff(11, 0.44, TeamSide::Away)));
    }
}
