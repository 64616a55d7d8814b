//! Narration policy
//!
//! Decides whether an event gets a fresh line and where the line comes from.
//! Goals and kickoffs always get one; other events are throttled to one
//! request per `min_interval_ms`. The remote generator is used when present
//! and not silenced; a quota error silences it for `breaker_ms`. Any failure
//! falls back to the static lines of the event's category.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::lines::{NarrationCategory, WELCOME_LINE};
use crate::engine::config::NarrationConfig;
use crate::models::MatchEvent;

/// Remote text generation failures. These never leave the commentary module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("quota exceeded")]
    Quota,

    #[error("generator unavailable: {0}")]
    Unavailable(String),

    #[error("empty response")]
    EmptyResponse,
}

/// Remote short-text generator (e.g. a hosted language model).
pub trait TextGenerator: Send {
    fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSource {
    Remote,
    Fallback,
}

/// A line ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationLine {
    pub text: String,
    pub category: NarrationCategory,
    pub source: LineSource,
    pub issued_at: DateTime<Utc>,
}

impl NarrationLine {
    pub fn welcome() -> Self {
        Self {
            text: WELCOME_LINE.to_string(),
            category: NarrationCategory::Default,
            source: LineSource::Fallback,
            issued_at: Utc::now(),
        }
    }
}

/// Prompt sent to the remote generator.
pub fn prompt_for(description: &str) -> String {
    format!(
        "You are a professional football commentator. Describe this event passionately \
         and VERY briefly (10 words max): {}. Do not mention that you are an AI.",
        description
    )
}

pub struct Narrator {
    config: NarrationConfig,
    generator: Option<Box<dyn TextGenerator>>,
    last_request: Option<Instant>,
    breaker_until: Option<Instant>,
}

impl Narrator {
    pub fn new(config: NarrationConfig, generator: Option<Box<dyn TextGenerator>>) -> Self {
        Self { config, generator, last_request: None, breaker_until: None }
    }

    /// Static lines only.
    pub fn offline(config: NarrationConfig) -> Self {
        Self::new(config, None)
    }

    pub fn breaker_open(&self, now: Instant) -> bool {
        self.breaker_until.is_some_and(|until| now < until)
    }

    /// Whether `event` gets a fresh line at `now`.
    pub fn should_narrate(&self, event: &MatchEvent, now: Instant) -> bool {
        if event.is_priority() {
            return true;
        }
        let interval = Duration::from_millis(self.config.min_interval_ms);
        self.last_request
            .map_or(true, |last| now.saturating_duration_since(last) > interval)
    }

    /// Produce a line for `event`, or `None` when throttled.
    pub fn narrate<R: Rng + ?Sized>(
        &mut self,
        event: &MatchEvent,
        now: Instant,
        rng: &mut R,
    ) -> Option<NarrationLine> {
        if !self.should_narrate(event, now) {
            return None;
        }
        self.last_request = Some(now);

        let category = NarrationCategory::for_event(event);
        let (text, source) = match self.remote_line(&event.description(), now) {
            Some(text) => (text, LineSource::Remote),
            None => (category.pick(rng).to_string(), LineSource::Fallback),
        };
        Some(NarrationLine { text, category, source, issued_at: Utc::now() })
    }

    fn remote_line(&mut self, description: &str, now: Instant) -> Option<String> {
        if self.breaker_open(now) {
            debug!("narration breaker open, using fallback line");
            return None;
        }
        let generator = self.generator.as_ref()?;

        let result = generator.generate(&prompt_for(description)).and_then(|text| {
            let text = text.trim();
            if text.is_empty() {
                Err(GeneratorError::EmptyResponse)
            } else {
                Ok(text.to_string())
            }
        });

        match result {
            Ok(text) => Some(text),
            Err(GeneratorError::Quota) => {
                self.breaker_until = Some(now + Duration::from_millis(self.config.breaker_ms));
                warn!(
                    breaker_ms = self.config.breaker_ms,
                    "narration quota exceeded, silencing remote generator"
                );
                None
            }
            Err(err) => {
                debug!(%err, "remote narration failed, using fallback line");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventType, PlayerId, TeamSide};
    use rand::rngs::mock::StepRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Scripted {
        reply: Result<String, GeneratorError>,
        calls: Arc<AtomicUsize>,
    }

    impl TextGenerator for Scripted {
        fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
            assert!(prompt.contains("10 words"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn scripted(reply: Result<String, GeneratorError>) -> (Narrator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let gen = Scripted { reply, calls: Arc::clone(&calls) };
        (Narrator::new(NarrationConfig::default(), Some(Box::new(gen))), calls)
    }

    fn pass_event() -> MatchEvent {
        MatchEvent {
            tick: 40,
            elapsed: 1.6,
            event_type: EventType::Pass,
            side: TeamSide::Home,
            player_id: Some(PlayerId(6)),
            details: None,
        }
    }

    #[test]
    fn test_non_priority_throttled() {
        let mut narrator = Narrator::offline(NarrationConfig::default());
        let mut rng = StepRng::new(0, 0);
        let t0 = Instant::now();

        assert!(narrator.narrate(&pass_event(), t0, &mut rng).is_some());
        assert!(narrator.narrate(&pass_event(), t0 + Duration::from_secs(5), &mut rng).is_none());
        assert!(narrator.narrate(&pass_event(), t0 + Duration::from_secs(13), &mut rng).is_some());
    }

    #[test]
    fn test_goal_overrides_interval() {
        let mut narrator = Narrator::offline(NarrationConfig::default());
        let mut rng = StepRng::new(0, 0);
        let t0 = Instant::now();
        narrator.narrate(&pass_event(), t0, &mut rng);

        let goal = MatchEvent::goal(41, 1.64, TeamSide::Home);
        let line = narrator.narrate(&goal, t0 + Duration::from_millis(10), &mut rng).unwrap();
        assert_eq!(line.category, NarrationCategory::Goal);
        assert_eq!(line.source, LineSource::Fallback);
        assert_eq!(line.text, NarrationCategory::Goal.lines()[0]);
    }

    #[test]
    fn test_remote_text_is_trimmed() {
        let (mut narrator, calls) = scripted(Ok("  What a strike!  ".to_string()));
        let line = narrator
            .narrate(&MatchEvent::goal(0, 0.0, TeamSide::Away), Instant::now(), &mut StepRng::new(0, 0))
            .unwrap();
        assert_eq!(line.text, "What a strike!");
        assert_eq!(line.source, LineSource::Remote);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_quota_arms_breaker() {
        let (mut narrator, calls) = scripted(Err(GeneratorError::Quota));
        let mut rng = StepRng::new(0, 0);
        let t0 = Instant::now();
        let goal = MatchEvent::goal(0, 0.0, TeamSide::Home);

        let line = narrator.narrate(&goal, t0, &mut rng).unwrap();
        assert_eq!(line.source, LineSource::Fallback);
        assert!(narrator.breaker_open(t0 + Duration::from_secs(59)));

        // Silenced: the generator is not called again.
        narrator.narrate(&goal, t0 + Duration::from_secs(30), &mut rng);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(!narrator.breaker_open(t0 + Duration::from_secs(61)));
        narrator.narrate(&goal, t0 + Duration::from_secs(61), &mut rng);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_other_failures_fall_back_without_breaker() {
        for err in [GeneratorError::EmptyResponse, GeneratorError::Unavailable("timeout".into())] {
            let (mut narrator, _) = scripted(Err(err));
            let t0 = Instant::now();
            let line = narrator
                .narrate(&MatchEvent::kickoff(0, 0.0, TeamSide::Home), t0, &mut StepRng::new(0, 0))
                .unwrap();
            assert_eq!(line.source, LineSource::Fallback);
            assert_eq!(line.category, NarrationCategory::Midfield);
            assert!(!narrator.breaker_open(t0));
        }

        let (mut narrator, _) = scripted(Ok("   ".to_string()));
        let line = narrator
            .narrate(&MatchEvent::goal(0, 0.0, TeamSide::Home), Instant::now(), &mut StepRng::new(0, 0))
            .unwrap();
        assert_eq!(line.source, LineSource::Fallback);
    }
}
