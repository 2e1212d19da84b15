use shape_schema::{Milliseconds, Point, RoundRecord, ShapeKind};
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::gameplay::rank::{resolve_rank, LeaderboardProvider};
use crate::gameplay::score::{evaluate, Evaluation, ScoreTier};
use crate::input::events::{PointerEvent, PointerKind};
use crate::input::PointerQueue;
use crate::time::clock::HostClock;
use crate::time::timer::{Scheduler, TimerHandle, TimerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    Idle,
    Countdown,
    Drawing,
    Results,
    Timeout,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::Countdown => "countdown",
            RoundPhase::Drawing => "drawing",
            RoundPhase::Results => "results",
            RoundPhase::Timeout => "timeout",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub evaluation: Evaluation,
    pub rank: u32,
    pub tier: ScoreTier,
    pub elapsed_ms: Milliseconds,
}

#[derive(Debug, Default)]
struct RoundTimers {
    countdown: Option<TimerHandle>,
    poll: Option<TimerHandle>,
    budget: Option<TimerHandle>,
}

/// One shape attempt: idle -> countdown -> drawing -> results | timeout.
///
/// The round owns its path and every timer it schedules; timers are released
/// on each phase exit and when the round is dropped. Input that does not fit
/// the current phase is ignored.
pub struct Round<S: Scheduler, L: LeaderboardProvider> {
    shape: ShapeKind,
    config: GameConfig,
    scheduler: S,
    clock: HostClock,
    leaderboard: L,

    phase: RoundPhase,
    path: Vec<Point>,
    pointer_down: bool,
    countdown_remaining: u32,
    start_ms: Milliseconds,
    elapsed_display_ms: Milliseconds,
    timers: RoundTimers,
    outcome: Option<RoundOutcome>,
}

impl<S: Scheduler, L: LeaderboardProvider> Round<S, L> {
    pub fn new(shape: ShapeKind, config: GameConfig, scheduler: S, clock: HostClock, leaderboard: L) -> Self {
        Self {
            shape,
            config,
            scheduler,
            clock,
            leaderboard,
            phase: RoundPhase::Idle,
            path: Vec::new(),
            pointer_down: false,
            countdown_remaining: 0,
            start_ms: 0.0,
            elapsed_display_ms: 0.0,
            timers: RoundTimers::default(),
            outcome: None,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    /// UI-only elapsed time, refreshed by the poll timer.
    pub fn elapsed_display_ms(&self) -> Milliseconds {
        self.elapsed_display_ms
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    pub fn record(&self) -> Option<RoundRecord> {
        let outcome = self.outcome.as_ref()?;
        Some(RoundRecord {
            shape: self.shape,
            score: outcome.evaluation.score,
            rank: outcome.rank,
            tier: outcome.tier.as_str().to_string(),
            completeness: outcome
                .evaluation
                .metrics
                .map(|m| m.completeness)
                .unwrap_or(0.0),
            average_deviation: outcome.evaluation.average_deviation,
            elapsed_ms: outcome.elapsed_ms,
            point_count: self.path.len(),
        })
    }

    /// Changes the target shape between rounds.
    pub fn select_shape(&mut self, shape: ShapeKind) {
        match self.phase {
            RoundPhase::Countdown | RoundPhase::Drawing => {
                trace!(phase = ?self.phase, "shape change ignored mid-round");
            }
            _ => {
                self.reset();
                self.shape = shape;
            }
        }
    }

    pub fn start(&mut self) {
        if self.phase != RoundPhase::Idle {
            trace!(phase = ?self.phase, "start ignored");
            return;
        }

        self.countdown_remaining = self.config.round.countdown_ticks;
        if self.countdown_remaining == 0 {
            self.enter_drawing();
            return;
        }

        self.timers.countdown = Some(self.scheduler.schedule(
            TimerKind::Countdown,
            self.config.round.countdown_tick_ms,
            true,
        ));
        self.set_phase(RoundPhase::Countdown);
    }

    pub fn on_timer(&mut self, handle: TimerHandle) {
        let handle = Some(handle);

        if handle == self.timers.countdown && self.phase == RoundPhase::Countdown {
            self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
            debug!(remaining = self.countdown_remaining, "countdown tick");
            if self.countdown_remaining == 0 {
                self.teardown();
                self.enter_drawing();
            }
        } else if handle == self.timers.poll && self.phase == RoundPhase::Drawing {
            self.elapsed_display_ms = self.clock.now_ms() - self.start_ms;
        } else if handle == self.timers.budget && self.phase == RoundPhase::Drawing {
            debug!(shape = %self.shape, points = self.path.len(), "draw budget exhausted");
            self.pointer_down = false;
            self.teardown();
            self.set_phase(RoundPhase::Timeout);
        } else {
            trace!(?handle, phase = ?self.phase, "stale timer ignored");
        }
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event.kind {
            PointerKind::Down => self.pointer_down(event.position),
            PointerKind::Move => self.pointer_move(event.position),
            PointerKind::Up => self.pointer_up(),
            PointerKind::Leave => self.pointer_leave(),
        }
    }

    /// Applies every queued event in arrival order, returning how many were taken.
    pub fn drain(&mut self, queue: &PointerQueue) -> usize {
        let mut n = 0;
        while let Some(event) = queue.pop() {
            self.apply(event);
            n += 1;
        }
        n
    }

    pub fn pointer_down(&mut self, position: Point) {
        if self.phase != RoundPhase::Drawing || self.pointer_down {
            trace!(phase = ?self.phase, "pointer down ignored");
            return;
        }
        self.pointer_down = true;
        self.path.clear();
        self.path.push(position);
    }

    pub fn pointer_move(&mut self, position: Point) {
        if self.phase != RoundPhase::Drawing || !self.pointer_down {
            return;
        }
        self.path.push(position);
    }

    pub fn pointer_up(&mut self) {
        if self.phase != RoundPhase::Drawing || !self.pointer_down {
            trace!(phase = ?self.phase, "pointer up ignored");
            return;
        }
        self.finish();
    }

    /// Leaving the canvas with the pointer held ends the stroke.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Back to idle from results or timeout, optionally straight into a new countdown.
    pub fn play_again(&mut self, direct_to_countdown: bool) {
        if !matches!(self.phase, RoundPhase::Results | RoundPhase::Timeout) {
            trace!(phase = ?self.phase, "play again ignored");
            return;
        }
        self.reset();
        if direct_to_countdown {
            self.start();
        }
    }

    /// Abandons the round from any phase.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn enter_drawing(&mut self) {
        self.path.clear();
        self.pointer_down = false;
        self.start_ms = self.clock.now_ms();
        self.elapsed_display_ms = 0.0;

        let round = &self.config.round;
        let poll_ms = round.elapsed_poll_ms;
        let budget_ms = round.draw_budget_for(self.shape);
        self.timers.poll = Some(self.scheduler.schedule(TimerKind::ElapsedPoll, poll_ms, true));
        self.timers.budget = Some(self.scheduler.schedule(TimerKind::DrawBudget, budget_ms, false));

        self.set_phase(RoundPhase::Drawing);
    }

    fn finish(&mut self) {
        self.pointer_down = false;
        self.teardown();

        let elapsed_ms = self.clock.now_ms() - self.start_ms;
        self.elapsed_display_ms = elapsed_ms;

        let evaluation = evaluate(&self.path, self.shape, elapsed_ms, &self.config.scoring);
        let rank = resolve_rank(evaluation.score, self.leaderboard.entries(self.shape));
        let tier = ScoreTier::from_score(evaluation.score);

        self.outcome = Some(RoundOutcome {
            evaluation,
            rank,
            tier,
            elapsed_ms,
        });
        self.set_phase(RoundPhase::Results);
    }

    fn reset(&mut self) {
        self.teardown();
        self.path.clear();
        self.pointer_down = false;
        self.countdown_remaining = 0;
        self.start_ms = 0.0;
        self.elapsed_display_ms = 0.0;
        self.outcome = None;
        self.set_phase(RoundPhase::Idle);
    }

    fn teardown(&mut self) {
        let timers = std::mem::take(&mut self.timers);
        for handle in [timers.countdown, timers.poll, timers.budget].into_iter().flatten() {
            self.scheduler.cancel(handle);
        }
    }

    fn set_phase(&mut self, phase: RoundPhase) {
        if self.phase != phase {
            debug!(shape = %self.shape, from = ?self.phase, to = ?phase, "round phase");
            self.phase = phase;
        }
    }
}

impl<S: Scheduler, L: LeaderboardProvider> Drop for Round<S, L> {
    fn drop(&mut self) {
        self.teardown();
    }
}
