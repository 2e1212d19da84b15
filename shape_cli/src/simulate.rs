use shape_core::config::GameConfig;
use shape_core::gameplay::round::{Round, RoundPhase};
use shape_core::input::events::PointerEvent;
use shape_core::input::PointerQueue;
use shape_core::time::clock::HostClock;
use shape_core::time::timer::ManualScheduler;
use shape_schema::{DrawingTape, Leaderboard, RoundRecord};

struct Replay {
    round: Round<ManualScheduler, Leaderboard>,
    scheduler: ManualScheduler,
    clock: HostClock,
    queue: PointerQueue,
    last_phase: RoundPhase,
}

impl Replay {
    fn advance_to(&mut self, now_ms: f64) {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            self.clock.set(fired.due_ms);
            self.round.on_timer(fired.handle);
            self.report(fired.due_ms);
        }
        self.scheduler.set_now(now_ms);
        self.clock.set(self.clock.now_ms().max(now_ms));
    }

    fn report(&mut self, t_ms: f64) {
        let phase = self.round.phase();
        let countdown_changed = phase == RoundPhase::Countdown;
        if phase == self.last_phase && !countdown_changed {
            return;
        }
        self.last_phase = phase;

        let info = match phase {
            RoundPhase::Countdown => format!("countdown {}", self.round.countdown_remaining()),
            RoundPhase::Drawing => "go".to_string(),
            RoundPhase::Results => match self.round.outcome() {
                Some(o) => format!(
                    "score {:.1}, rank {}, {} points",
                    o.evaluation.score,
                    o.rank,
                    self.round.path().len()
                ),
                None => String::new(),
            },
            RoundPhase::Timeout => format!("{} points discarded", self.round.path().len()),
            RoundPhase::Idle => String::new(),
        };
        println!("{:8.0} | {:<9} | {}", t_ms, phase.as_str(), info);
    }

    /// Hands everything queued so far to the round, reporting any phase change at `t_ms`.
    fn deliver(&mut self, t_ms: f64) {
        self.round.drain(&self.queue);
        if self.round.phase() != self.last_phase {
            self.report(t_ms);
        }
    }

    fn settled(&self) -> bool {
        !matches!(self.round.phase(), RoundPhase::Countdown | RoundPhase::Drawing)
    }
}

/// Replays a tape from t=0 (round start) and returns the record, or `None` on timeout.
pub fn run_simulation(tape: &DrawingTape, config: GameConfig, board: Leaderboard) -> Option<RoundRecord> {
    let poll_ms = config.round.elapsed_poll_ms;
    let scheduler = ManualScheduler::new();
    let clock = HostClock::starting_at(0.0);
    let round = Round::new(tape.shape, config, scheduler.clone(), clock.clone(), board);

    let mut replay = Replay {
        round,
        scheduler,
        clock,
        queue: PointerQueue::new(),
        last_phase: RoundPhase::Idle,
    };

    println!("Simulation Start ({}, {} events)", tape.shape, tape.events.len());
    println!("Time(ms) | Phase     | Info");
    println!("---------|-----------|------------------");

    replay.round.start();
    replay.report(0.0);

    // Samples sharing a timestamp are queued and drained as one batch.
    let input = replay.queue.sender();
    let mut samples = tape.events.iter().peekable();
    while let Some(first) = samples.next() {
        let t_ms = first.t_ms;
        replay.advance_to(t_ms);
        let _ = input.send(PointerEvent::from(*first));
        while let Some(sample) = samples.next_if(|s| s.t_ms <= t_ms) {
            let _ = input.send(PointerEvent::from(*sample));
        }
        replay.deliver(t_ms);
    }

    // Let a stroke that was never released run into the draw budget.
    let mut t = replay.clock.now_ms();
    while !replay.settled() {
        t += poll_ms;
        replay.advance_to(t);
    }

    replay.round.record()
}
