//! Headless match runner
//!
//! Builds an engine from a seed and an optional config file, plays a number
//! of ticks either as fast as possible or on the wall clock, and reports a
//! JSON-friendly summary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use tsp_core::commentary::{CommentaryDesk, Narrator};
use tsp_core::{
    EngineConfig, EventType, LiveMatch, MatchEngine, MatchEvent, MatchPhase, MatchSetup, Score,
    StepResult, TeamSide,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub seed: u64,
    pub ticks: u64,
    pub config: Option<PathBuf>,
    /// Both sides autonomous; otherwise HOME waits for input that never comes.
    pub autoplay: bool,
    /// Run on the wall clock through the background runner.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { seed: 42, ticks: 1500, config: None, autoplay: true, realtime: false }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalRecord {
    pub tick: u64,
    pub clock: String,
    pub side: TeamSide,
}

/// Summary printed at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: Score,
    pub phase: MatchPhase,
    pub elapsed: f32,
    pub clock: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<GoalRecord>,
    /// Resolved actions by kind.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub actions: BTreeMap<&'static str, u32>,
    pub last_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    /// RFC3339
    pub finished_at: String,
}

/// Engine config from `path`, or the environment/default when absent.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load engine config: {}", path.display())),
        None => Ok(EngineConfig::from_env_or_default()),
    }
}

fn setup_for(opts: &RunOptions) -> MatchSetup {
    if opts.autoplay {
        MatchSetup::autoplay(opts.seed)
    } else {
        MatchSetup::with_seed(opts.seed)
    }
}

fn action_key(event_type: EventType) -> Option<&'static str> {
    match event_type {
        EventType::Pass => Some("pass"),
        EventType::Shot => Some("shot"),
        EventType::Dribble => Some("dribble"),
        EventType::Clearance => Some("clearance"),
        EventType::KickOff | EventType::Goal => None,
    }
}

pub fn run(opts: &RunOptions) -> Result<MatchSummary> {
    if opts.realtime {
        run_realtime(opts)
    } else {
        run_headless(opts)
    }
}

/// Goals and resolved actions seen while playing.
#[derive(Debug, Default)]
struct Tally {
    ticks: u64,
    goals: Vec<GoalRecord>,
    actions: BTreeMap<&'static str, u32>,
}

/// Tick `engine` up to `ticks` times, stopping early once it reports
/// [`StepResult::Stopped`]. Only ticks that ran are counted.
fn play(engine: &mut MatchEngine, ticks: u64) -> Result<Tally> {
    let mut tally = Tally::default();
    for _ in 0..ticks {
        let step = engine.tick()?;
        if matches!(step, StepResult::Stopped) {
            break;
        }
        tally.ticks += 1;
        for event in step.events() {
            record(event, &mut tally.goals, &mut tally.actions);
        }
    }
    Ok(tally)
}

/// Play `opts.ticks` ticks back to back.
pub fn run_headless(opts: &RunOptions) -> Result<MatchSummary> {
    let config = load_config(opts.config.as_deref())?;
    let mut engine = MatchEngine::new(setup_for(opts), config).context("Invalid match setup")?;
    engine.start_match(TeamSide::Home)?;

    let Tally { ticks, goals, actions } = play(&mut engine, opts.ticks)?;
    if ticks < opts.ticks {
        info!(requested = opts.ticks, simulated = ticks, "engine stopped early");
    }

    let snap = engine.snapshot();
    info!(
        home = snap.score.home,
        away = snap.score.away,
        clock = %snap.clock_label(),
        "headless run finished"
    );
    Ok(MatchSummary {
        seed: opts.seed,
        ticks,
        score: snap.score,
        phase: snap.phase,
        elapsed: snap.elapsed,
        clock: snap.clock_label(),
        goals,
        actions,
        last_action: snap.last_action_summary.clone(),
        commentary: None,
        finished_at: chrono::Utc::now().to_rfc3339(),
    })
}

fn record(
    event: &MatchEvent,
    goals: &mut Vec<GoalRecord>,
    actions: &mut BTreeMap<&'static str, u32>,
) {
    if event.event_type == EventType::Goal {
        let secs = event.elapsed.max(0.0) as u64;
        goals.push(GoalRecord {
            tick: event.tick,
            clock: format!("{:02}:{:02}", secs / 60, secs % 60),
            side: event.side,
        });
    } else if let Some(key) = action_key(event.event_type) {
        *actions.entry(key).or_default() += 1;
    }
}

/// Play for `opts.ticks` tick periods of wall time with live commentary.
pub fn run_realtime(opts: &RunOptions) -> Result<MatchSummary> {
    let config = load_config(opts.config.as_deref())?;
    let period = Duration::from_millis(config.timing.tick_ms);
    let desk = CommentaryDesk::spawn(Narrator::offline(config.narration.clone()), opts.seed);
    let engine = MatchEngine::new(setup_for(opts), config).context("Invalid match setup")?;

    let mut live = LiveMatch::spawn(engine, Some(desk)).context("Failed to start match runner")?;
    live.start(TeamSide::Home);
    let run_for = period.saturating_mul(u32::try_from(opts.ticks).unwrap_or(u32::MAX));
    info!(seconds = run_for.as_secs_f32(), "running in real time");
    thread::sleep(run_for);
    live.stop();

    let snap = live.snapshot();
    Ok(MatchSummary {
        seed: opts.seed,
        ticks: snap.tick,
        score: snap.score,
        phase: snap.phase,
        elapsed: snap.elapsed,
        clock: snap.clock_label(),
        goals: Vec::new(),
        actions: BTreeMap::new(),
        last_action: snap.last_action_summary.clone(),
        commentary: live.commentary().map(|line| line.text),
        finished_at: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_headless_run_counts_events() {
        let summary = run(&RunOptions { ticks: 2000, ..RunOptions::default() }).unwrap();
        assert_eq!(summary.goals.len() as u32, summary.score.total());
        assert!(!summary.actions.is_empty());
        assert!(summary.elapsed > 0.0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["seed"], 42);
        assert!(json["score"]["home"].is_number());
        assert_eq!(summary.ticks, 2000);
    }

    #[test]
    fn test_stopped_engine_reports_simulated_ticks() {
        let mut engine =
            MatchEngine::new(MatchSetup::autoplay(3), EngineConfig::default()).unwrap();
        engine.start_match(TeamSide::Home).unwrap();

        let tally = play(&mut engine, 25).unwrap();
        assert_eq!(tally.ticks, 25);

        engine.shutdown();
        let tally = play(&mut engine, 25).unwrap();
        assert_eq!(tally.ticks, 0);
        assert!(tally.goals.is_empty() && tally.actions.is_empty());
    }

    #[test]
    fn test_headless_runs_are_reproducible() {
        let opts = RunOptions { seed: 9, ticks: 800, ..RunOptions::default() };
        let a = run_headless(&opts).unwrap();
        let b = run_headless(&opts).unwrap();
        assert_eq!(a.score, b.score);
        assert_eq!(a.actions, b.actions);
        assert_eq!(a.last_action, b.last_action);
    }

    #[test]
    fn test_config_file_is_applied() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "timing:\n  tick_ms: 20").unwrap();

        let opts = RunOptions {
            ticks: 50,
            config: Some(file.path().to_path_buf()),
            ..RunOptions::default()
        };
        let summary = run_headless(&opts).unwrap();
        if summary.phase == MatchPhase::Live && summary.goals.is_empty() {
            assert!((summary.elapsed - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let opts = RunOptions {
            config: Some(PathBuf::from("/nonexistent/engine.yaml")),
            ..RunOptions::default()
        };
        let err = run_headless(&opts).unwrap_err();
        assert!(err.to_string().contains("Failed to load engine config"));
    }

    #[test]
    fn test_human_side_without_input_still_runs() {
        let opts = RunOptions { autoplay: false, ticks: 300, ..RunOptions::default() };
        let summary = run_headless(&opts).unwrap();
        assert_eq!(summary.score.total() as usize, summary.goals.len());
    }
}
