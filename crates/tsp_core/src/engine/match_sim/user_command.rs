//! User command queue
//!
//! Human on-ball requests are queued here and drained at the start of the
//! next live tick, so input never mutates a snapshot mid-step.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::actions::ActionRequest;

/// Queued request from the input boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCommand {
    /// Command sequence number, used to drop duplicates
    pub seq: u32,

    #[serde(flatten)]
    pub request: ActionRequest,
}

/// User command queue (FIFO)
#[derive(Debug, Default)]
pub struct UserCommandQueue {
    queue: VecDeque<UserCommand>,
    last_seq: Option<u32>,
}

impl UserCommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. Replayed or stale sequence numbers are dropped.
    pub fn enqueue(&mut self, cmd: UserCommand) -> bool {
        if self.last_seq.is_some_and(|last| cmd.seq <= last) {
            return false;
        }
        self.last_seq = Some(cmd.seq);
        self.queue.push_back(cmd);
        true
    }

    /// Sequence number the next locally issued command should use.
    pub fn next_seq(&self) -> u32 {
        self.last_seq.map_or(0, |s| s.wrapping_add(1))
    }

    pub fn pop_front(&mut self) -> Option<UserCommand> {
        self.queue.pop_front()
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<UserCommand> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop pending commands; the sequence guard is kept.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Position;
    use crate::models::ActionKind;

    fn cmd(seq: u32) -> UserCommand {
        UserCommand { seq, request: ActionRequest::pass(Position::new(70.0, 40.0), 40.0) }
    }

    #[test]
    fn test_user_command_queue_new() {
        let queue = UserCommandQueue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert_eq!(queue.next_seq(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = UserCommandQueue::new();
        assert!(queue.enqueue(cmd(1)));
        assert!(queue.enqueue(cmd(2)));
        assert_eq!(queue.pop_front().map(|c| c.seq), Some(1));
        assert_eq!(queue.drain().iter().map(|c| c.seq).collect::<Vec<_>>(), vec![2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rejects_replayed_seq() {
        let mut queue = UserCommandQueue::new();
        assert!(queue.enqueue(cmd(5)));
        assert!(!queue.enqueue(cmd(5)));
        assert!(!queue.enqueue(cmd(3)));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_seq(), 6);
    }

    #[test]
    fn test_clear_keeps_sequence_guard() {
        let mut queue = UserCommandQueue::new();
        queue.enqueue(cmd(9));
        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.enqueue(cmd(9)));
    }

    #[test]
    fn test_command_json_is_flat() {
        let json = serde_json::to_value(cmd(4)).unwrap();
        assert_eq!(json["seq"], 4);
        assert_eq!(json["kind"], "pass");

        let parsed: UserCommand = serde_json::from_str(
            r#"{"seq":7,"kind":"dribble","target":{"x":50.0,"y":30.0},"power":45.0}"#,
        )
        .unwrap();
        assert_eq!(parsed.request.kind, ActionKind::Dribble);
    }
}
