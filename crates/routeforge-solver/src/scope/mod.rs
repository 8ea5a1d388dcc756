//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use routeforge_core::PlanningSolution;
use routeforge_scoring::ScoreDirector;

/// State shared by the phases of one solving run.
///
/// Owns the score director (and through it the working solution), the best
/// solution found since the last fact change, and the seeded RNG.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    best_solution: Option<S>,
    best_score: Option<S::Score>,
    best_changed: bool,
    rng: ChaCha8Rng,
    start_time: Option<Instant>,
    total_step_count: u64,
    unimproved_step_count: u64,
    terminate_early_flag: Option<Arc<AtomicBool>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    pub fn new(score_director: D) -> Self {
        Self::with_rng(score_director, ChaCha8Rng::from_os_rng())
    }

    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self::with_rng(score_director, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(score_director: D, rng: ChaCha8Rng) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            best_changed: false,
            rng,
            start_time: None,
            total_step_count: 0,
            unimproved_step_count: 0,
            terminate_early_flag: None,
        }
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
        self.unimproved_step_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    /// The working solution together with the RNG, for selectors that need both.
    pub fn working_solution_and_rng(&mut self) -> (&S, &mut ChaCha8Rng) {
        (self.score_director.working_solution(), &mut self.rng)
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best_score.as_ref()
    }

    /// Adopts the working solution as best if it is better.
    ///
    /// An initialized solution always beats an uninitialized one, whatever
    /// the scores say. Returns true when the best solution changed.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.calculate_score();
        let current_initialized = self.score_director.working_solution().is_initialized();
        let is_better = match (&self.best_solution, &self.best_score) {
            (Some(best), Some(best_score)) => {
                let best_initialized = best.is_initialized();
                if current_initialized != best_initialized {
                    current_initialized
                } else {
                    current_score > *best_score
                }
            }
            _ => true,
        };

        if is_better {
            self.best_solution = Some(self.score_director.clone_working_solution());
            self.best_score = Some(current_score);
            self.best_changed = true;
            self.unimproved_step_count = 0;
        }
        is_better
    }

    /// Replaces the best solution with the working solution unconditionally.
    ///
    /// Used after fact changes, when earlier bests describe a different problem.
    pub fn reset_best_solution(&mut self) {
        let score = self.score_director.calculate_score();
        self.best_solution = Some(self.score_director.clone_working_solution());
        self.best_score = Some(score);
        self.best_changed = true;
        self.unimproved_step_count = 0;
    }

    /// Returns the best solution if it changed since the last call.
    pub fn take_best_if_changed(&mut self) -> Option<&S> {
        if std::mem::take(&mut self.best_changed) {
            self.best_solution.as_ref()
        } else {
            None
        }
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Counts a finished step. `improved` steps reset the unimproved counter.
    pub fn record_step(&mut self, improved: bool) -> u64 {
        self.total_step_count += 1;
        if improved {
            self.unimproved_step_count = 0;
        } else {
            self.unimproved_step_count += 1;
        }
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    pub fn unimproved_step_count(&self) -> u64 {
        self.unimproved_step_count
    }

    pub fn take_best_or_working_solution(self) -> S {
        self.best_solution
            .unwrap_or_else(|| self.score_director.clone_working_solution())
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}
