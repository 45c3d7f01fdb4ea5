//! Interactive scorekeeping session.
//!
//! Holds the latest game and turns key commands into throws. All rule checks happen
//! in the engine; this layer only resolves sheet notation against the current rack
//! and keeps the last message for the status area.

use crate::adapter::SinkHealth;
use crate::core::{GameState, Roster, ScoreKeeper, ScoreSink, Scoreboard, ThrowOutcome};
use crate::input::{Entry, KeyCommand};
use crate::term::{FrameBuffer, SheetView, SinkStatusView, Viewport};

pub struct Session {
    roster: Roster,
    keeper: ScoreKeeper,
    sink_health: Option<SinkHealth>,
    notice: Option<String>,
}

impl Session {
    pub fn new(roster: Roster) -> Self {
        let keeper = ScoreKeeper::new(GameState::with_roster(roster.clone()));
        Self {
            roster,
            keeper,
            sink_health: None,
            notice: None,
        }
    }

    /// Report every accepted throw to `sink`. `health` tracks what the sink could not deliver.
    pub fn with_sink<S: ScoreSink + Send + 'static>(
        mut self,
        sink: S,
        health: Option<SinkHealth>,
    ) -> Self {
        self.keeper = self.keeper.with_sink(sink);
        self.sink_health = health;
        self
    }

    pub fn state(&self) -> &GameState {
        self.keeper.state()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.keeper.state().scoreboard()
    }

    pub fn sink_status(&self) -> Option<SinkStatusView> {
        if !self.keeper.has_sink() {
            return None;
        }
        let late = self.sink_health.as_ref().map(SinkHealth::failed).unwrap_or(0);
        Some(SinkStatusView {
            enabled: true,
            failures: self.keeper.sink_failures() + late,
        })
    }

    /// Apply one key command. Problems end up in [`notice`](Self::notice).
    pub fn handle(&mut self, cmd: KeyCommand) -> Option<ThrowOutcome> {
        match cmd {
            KeyCommand::Throw(entry) => self.throw(entry),
            KeyCommand::NewGame => {
                self.keeper
                    .replace_state(GameState::with_roster(self.roster.clone()));
                self.notice = Some(String::from("New game"));
                log::info!("new game for {:?}", self.roster.names());
                None
            }
        }
    }

    fn throw(&mut self, entry: Entry) -> Option<ThrowOutcome> {
        let Some(rack) = self.keeper.state().rack() else {
            self.notice = Some(String::from("Game over: n for a new game, q to quit"));
            return None;
        };

        let result = entry
            .resolve(rack)
            .map_err(|e| e.to_string())
            .and_then(|pins| self.keeper.submit_throw(pins).map_err(|e| e.to_string()));

        match result {
            Ok(outcome) => {
                self.notice = None;
                Some(outcome)
            }
            Err(msg) => {
                self.notice = Some(msg);
                None
            }
        }
    }

    pub fn render_into(&self, view: &SheetView, viewport: Viewport, fb: &mut FrameBuffer) {
        let sink = self.sink_status();
        view.render_into_with_status(
            &self.scoreboard(),
            sink.as_ref(),
            self.notice(),
            viewport,
            fb,
        );
    }
}
