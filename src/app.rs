//! Running quiz session
//!
//! Couples the pure [`GameState`] with a clock and the countdown [`Ticker`].
//! Input events and due ticks are fed through [`App::dispatch`] one at a
//! time, so the state only ever changes on one serial path.

use crate::platform::{Clock, Ticker};
use crate::report::Report;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, step};

pub struct App<C: Clock> {
    pub state: GameState,
    pub settings: Settings,
    /// Report of the most recently finished round
    pub report: Option<Report>,
    /// First visible row of the report table
    pub report_scroll: usize,
    pub should_quit: bool,
    ticker: Ticker,
    clock: C,
}

impl<C: Clock> App<C> {
    pub fn new(settings: Settings, clock: C) -> Self {
        let seed = settings.resolve_seed();
        Self {
            state: GameState::new(seed),
            settings,
            report: None,
            report_scroll: 0,
            should_quit: false,
            ticker: Ticker::default(),
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Apply one event and whatever timer change it asks for
    pub fn dispatch(&mut self, event: GameEvent) {
        let now = self.clock.now_ms();
        let before = self.state.phase;
        if let Some(cmd) = step(&mut self.state, event, now) {
            self.ticker.apply(cmd, now);
        }

        if before != GamePhase::Finished && self.state.phase == GamePhase::Finished {
            self.report = Some(Report::build(&self.state.results, self.state.total_secs));
            self.report_scroll = 0;
        }
    }

    /// Feed every tick that has come due since the last call
    pub fn pump_ticks(&mut self) {
        let now = self.clock.now_ms();
        while self.ticker.poll_tick(now) {
            self.dispatch(GameEvent::Tick);
        }
    }

    pub fn scroll_report(&mut self, delta: isize) {
        let rows = self.report.as_ref().map_or(0, |r| r.rows.len());
        let max = rows.saturating_sub(1);
        self.report_scroll = self.report_scroll.saturating_add_signed(delta).min(max);
    }
}
