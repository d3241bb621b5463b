//! Iterative backtracking search over layer orientations.
//!
//! The search keeps an explicit stack of frames instead of recursing: each
//! frame records how many tour moves its layer has taken. A layer is
//! restored automatically when its frame pops, because the tour's closing
//! move returns the layer to the orientation it entered with, so no
//! separate undo bookkeeping is needed on any exit path.

use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::Arc;

use crate::cube::{Move, ORIENTATION_TOUR};
use crate::stack::{Puzzle, Stack};

/// How a finished search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every lateral side of the stack shows each palette color exactly
    /// once.
    Solved,
    /// Every orientation assignment was tried without success. The stack is
    /// back in the state it was searched from.
    Exhausted,
    /// The cancellation flag was observed. The stack may be mid-rotation;
    /// callers that need a known state must rebuild it.
    Cancelled,
}

/// One observable unit of search progress, emitted synchronously.
///
/// A driver can render the stack after every `Move` and update a counter
/// display on every `Leaf`; the search does nothing with the driver's
/// reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A quarter-turn was applied to the given layer.
    Move { layer: usize, mv: Move },
    /// A fully-oriented stack was checked against the win condition.
    Leaf { attempts: u64 },
}

/// Everything a finished search reports back.
#[derive(Clone, Debug)]
pub struct Report {
    pub outcome: SolveOutcome,
    pub stack: Stack,
    pub attempts: u64,
}

/// Per-layer backtracking state: how many tour moves the layer has taken.
struct Frame {
    applied: usize,
}

/// A suspendable depth-first search over layer orientations.
///
/// Each call to [`Search::step`] performs exactly one move application or
/// one leaf evaluation and then returns, so a driver can interleave
/// rendering or throttling between mutations. Layers are tried bottom-up;
/// at each layer the current orientation is tried as-is before any
/// rotation, then the layer walks the orientation tour one move at a time,
/// re-attempting the deeper layers after every move. Two runs over the
/// same stack produce identical step sequences and attempt counts.
pub struct Search {
    puzzle: Puzzle,
    stack: Stack,
    cancel: Arc<AtomicBool>,
    frames: Vec<Frame>,
    descending: bool,
    attempts: u64,
    outcome: Option<SolveOutcome>,
}

impl Search {
    pub fn new(puzzle: Puzzle, stack: Stack, cancel: Arc<AtomicBool>) -> Self {
        Self {
            puzzle,
            stack,
            cancel,
            frames: Vec::new(),
            descending: true,
            attempts: 0,
            outcome: None,
        }
    }

    /// The stack as the search currently sees it.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Leaf evaluations so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// The final outcome, once the search has finished.
    pub fn outcome(&self) -> Option<SolveOutcome> {
        self.outcome
    }

    /// Advances the search by one unit of work.
    ///
    /// Returns `None` once the search has finished; [`Search::outcome`]
    /// then says how it ended. The cancellation flag is polled before every
    /// unit of work; once observed, the search finishes without restoring
    /// the stack.
    pub fn step(&mut self) -> Option<Step> {
        if self.outcome.is_some() {
            return None;
        }
        loop {
            if self.cancel.load(Relaxed) {
                self.outcome = Some(SolveOutcome::Cancelled);
                return None;
            }
            if self.descending {
                if self.frames.len() == self.puzzle.height() {
                    // Every layer is oriented; evaluate the win condition.
                    self.attempts += 1;
                    self.descending = false;
                    if self.puzzle.is_solved(&self.stack) {
                        self.outcome = Some(SolveOutcome::Solved);
                    }
                    return Some(Step::Leaf {
                        attempts: self.attempts,
                    });
                }
                // Deeper layers are tried with their current orientation
                // first; no move is applied on the way down.
                self.frames.push(Frame { applied: 0 });
            } else {
                if self.frames.is_empty() {
                    // The bottom layer closed its tour: nothing left to try.
                    self.outcome = Some(SolveOutcome::Exhausted);
                    return None;
                }
                let layer = self.frames.len() - 1;
                let frame = self.frames.last_mut().unwrap();
                let mv = ORIENTATION_TOUR[frame.applied];
                frame.applied += 1;
                self.stack.layer_mut(layer).apply(mv);
                if frame.applied == ORIENTATION_TOUR.len() {
                    // The closing move restored the layer's entry
                    // orientation; fail upward without another check.
                    self.frames.pop();
                } else {
                    self.descending = true;
                }
                return Some(Step::Move { layer, mv });
            }
        }
    }

    /// Runs the search to completion, reporting each step to `on_step`.
    pub fn run(mut self, mut on_step: impl FnMut(&Step)) -> Report {
        while let Some(step) = self.step() {
            on_step(&step);
        }
        let outcome = self.outcome.expect("finished search has an outcome");
        Report {
            outcome,
            stack: self.stack,
            attempts: self.attempts,
        }
    }
}

impl Iterator for Search {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering::Relaxed;

    use super::*;
    use crate::cube::{Color, Layer};
    use crate::stack::classic;

    fn instance(palette: &str, layers: &[&str]) -> (Puzzle, Stack) {
        let puzzle =
            Puzzle::new(layers.len(), palette.chars().map(Color).collect()).expect("valid palette");
        let layers: Vec<Layer> = layers
            .iter()
            .map(|spec| spec.parse().expect("valid layer"))
            .collect();
        let stack = puzzle.stack(layers).expect("valid stack");
        (puzzle, stack)
    }

    #[test]
    fn test_classic_instance_solves() {
        let (puzzle, stack) = classic();
        let report = Search::new(puzzle.clone(), stack, Arc::default()).run(|_| {});
        assert_eq!(report.outcome, SolveOutcome::Solved);
        assert!(puzzle.is_solved(&report.stack));
        assert_eq!(report.attempts, 14_426);
    }

    #[test]
    fn test_search_is_deterministic() {
        let (puzzle, stack) = classic();
        let first = Search::new(puzzle.clone(), stack.clone(), Arc::default()).run(|_| {});
        let second = Search::new(puzzle, stack, Arc::default()).run(|_| {});
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.attempts, second.attempts);
        assert_eq!(first.stack, second.stack);
    }

    #[test]
    fn test_already_solved_stack_needs_no_moves() {
        let (puzzle, stack) = instance("RG", &["RRRRRR", "GGGGGG"]);
        let mut moves = 0u64;
        let report = Search::new(puzzle, stack, Arc::default()).run(|step| {
            if matches!(step, Step::Move { .. }) {
                moves += 1;
            }
        });
        assert_eq!(report.outcome, SolveOutcome::Solved);
        assert_eq!(report.attempts, 1);
        assert_eq!(moves, 0);
    }

    #[test]
    fn test_first_step_checks_the_unrotated_stack() {
        let (puzzle, stack) = classic();
        let mut search = Search::new(puzzle, stack, Arc::default());
        assert_eq!(search.step(), Some(Step::Leaf { attempts: 1 }));
    }

    #[test]
    fn test_unsolvable_instance_exhausts_and_restores() {
        // All four cubes are pure red: no lateral side can ever show four
        // distinct colors, so the whole 24^4 space is searched.
        let (puzzle, stack) = instance("RGWB", &["RRRRRR", "RRRRRR", "RRRRRR", "RRRRRR"]);
        let report = Search::new(puzzle, stack.clone(), Arc::default()).run(|_| {});
        assert_eq!(report.outcome, SolveOutcome::Exhausted);
        assert_eq!(report.attempts, 331_776);
        assert_eq!(report.stack, stack, "failed search must restore the stack");
    }

    #[test]
    fn test_cancel_before_start_reports_cancelled() {
        let (puzzle, stack) = classic();
        let cancel = Arc::new(AtomicBool::new(true));
        let mut events = 0u64;
        let report = Search::new(puzzle, stack, cancel).run(|_| events += 1);
        assert_eq!(report.outcome, SolveOutcome::Cancelled);
        assert_eq!(report.attempts, 0);
        assert_eq!(events, 0);
    }

    #[test]
    fn test_cancel_mid_search_stops_at_next_step() {
        let (puzzle, stack) = classic();
        let cancel = Arc::new(AtomicBool::new(false));
        let mut search = Search::new(puzzle, stack, cancel.clone());
        for _ in 0..100 {
            search.step();
        }
        cancel.store(true, Relaxed);
        assert_eq!(search.step(), None);
        assert_eq!(search.outcome(), Some(SolveOutcome::Cancelled));
    }

    #[test]
    fn test_step_is_fused_after_completion() {
        let (puzzle, stack) = instance("RG", &["RRRRRR", "GGGGGG"]);
        let mut search = Search::new(puzzle, stack, Arc::default());
        while search.step().is_some() {}
        assert_eq!(search.outcome(), Some(SolveOutcome::Solved));
        assert_eq!(search.step(), None);
        assert_eq!(search.step(), None);
    }
}
