//! Rebuild per-thread call nesting from interleaved entry/exit events.
//!
//! Every thread id gets its own LIFO stack of open calls. An exit is matched
//! against the innermost open frame with the same method signature, so the
//! stack of one thread never influences another.
//!
//! Example (one thread):
//!   `> A` `> B` `< A`  =>  A completes, B was never closed and is dropped.

use crate::parser::{AbsoluteTime, Direction, TraceEvent};
use clap::ValueEnum;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do with open frames sitting above the frame an exit matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Drop them. Their exits are assumed lost.
    #[default]
    Discard,
    /// Put them back on the stack, still open, in their original order.
    Retain,
}

/// One open call on a thread's stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    pub method: String,
    pub start_time: AbsoluteTime,
}

/// A matched entry/exit pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCall {
    pub method: String,
    pub duration_ms: u64,
}

/// Result of applying one event to the stacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackOutcome {
    /// A frame was pushed
    Entered,

    /// The exit matched an open frame. `orphaned` frames above it were
    /// dropped (always 0 under `OrphanPolicy::Retain`).
    Completed { call: CompletedCall, orphaned: usize },

    /// No open frame on this thread had the exit's method
    UnmatchedExit,

    /// The exit matched but its time precedes the entry; nothing recorded
    NegativeDuration { method: String, orphaned: usize },
}

/// Open call stacks keyed by thread id
#[derive(Debug, Default)]
pub struct ThreadStacks {
    stacks: HashMap<String, Vec<CallFrame>>,
    policy: OrphanPolicy,
}

impl ThreadStacks {
    pub fn new(policy: OrphanPolicy) -> Self {
        Self {
            stacks: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> OrphanPolicy {
        self.policy
    }

    /// Get the stack for a thread, creating an empty one on first use
    pub fn stack_mut(&mut self, thread_id: &str) -> &mut Vec<CallFrame> {
        self.stacks.entry(thread_id.to_string()).or_default()
    }

    /// Open frames for a thread, innermost last
    pub fn frames(&self, thread_id: &str) -> &[CallFrame] {
        self.stacks.get(thread_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of frames still open across all threads
    pub fn open_frames(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }

    /// Number of thread ids seen so far
    pub fn thread_count(&self) -> usize {
        self.stacks.len()
    }

    /// Apply a parsed event at its normalized time
    ///
    /// **Public** - main entry point for stack reconstruction
    pub fn apply(&mut self, event: &TraceEvent, at: AbsoluteTime) -> StackOutcome {
        match event.direction {
            Direction::Entry => {
                self.enter(&event.thread_id, &event.method, at);
                StackOutcome::Entered
            }
            Direction::Exit => self.exit(&event.thread_id, &event.method, at),
        }
    }

    /// Push a new open frame
    pub fn enter(&mut self, thread_id: &str, method: &str, at: AbsoluteTime) {
        self.stack_mut(thread_id).push(CallFrame {
            method: method.to_string(),
            start_time: at,
        });
    }

    /// Close the innermost open frame for `method` on `thread_id`
    ///
    /// # Algorithm
    /// 1. Search the stack from the top for the first frame with the same method
    /// 2. If none, drop the exit and leave the stack untouched
    /// 3. Remove the match; frames above it are dropped or kept per policy
    /// 4. Emit the interval unless it is negative
    pub fn exit(&mut self, thread_id: &str, method: &str, at: AbsoluteTime) -> StackOutcome {
        let policy = self.policy;

        // Only look up, never create, so unmatched exits leave no trace
        let Some(stack) = self.stacks.get_mut(thread_id) else {
            trace!("{}: exit {} with no open frames", thread_id, method);
            return StackOutcome::UnmatchedExit;
        };

        let Some(index) = stack.iter().rposition(|frame| frame.method == method) else {
            trace!("{}: exit {} matches no open frame", thread_id, method);
            return StackOutcome::UnmatchedExit;
        };

        let above = stack.split_off(index + 1);
        let frame = stack.remove(index);

        let orphaned = match policy {
            OrphanPolicy::Discard => {
                if !above.is_empty() {
                    debug!(
                        "{}: exit {} dropped {} unclosed frame(s)",
                        thread_id,
                        method,
                        above.len()
                    );
                }
                above.len()
            }
            OrphanPolicy::Retain => {
                stack.extend(above);
                0
            }
        };

        if at < frame.start_time {
            debug!(
                "{}: {} exit at {} precedes entry at {}, discarding",
                thread_id, method, at, frame.start_time
            );
            return StackOutcome::NegativeDuration {
                method: frame.method,
                orphaned,
            };
        }

        StackOutcome::Completed {
            call: CompletedCall {
                method: frame.method,
                duration_ms: at - frame.start_time,
            },
            orphaned,
        }
    }
}
