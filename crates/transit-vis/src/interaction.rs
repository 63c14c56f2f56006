//! Pointer interaction: turns presses into placements and connections.
//!
//! The pointer position and the station currently selected for the next
//! connection are explicit state, owned by whoever drives the session.

use serde::{Deserialize, Serialize};
use tracing::debug;
use transit_graph::{EdgeId, Point, StationId};

use crate::error::Result;
use crate::events::{PendingLine, RenderSnapshot};
use crate::session::Session;

/// Which pointer button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Select a station, or connect the selection to it
    Primary,
    /// Create a station
    Secondary,
}

/// What a press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PressOutcome {
    /// A station became the selection.
    Selected { station: StationId },
    /// The selection was connected to the pressed station, which is now selected.
    Connected {
        from: StationId,
        to: StationId,
        edge: Option<EdgeId>,
    },
    /// A new station was placed and selected, connected to the previous
    /// selection if there was one.
    Placed {
        station: StationId,
        edge: Option<EdgeId>,
    },
    /// The press missed every station; selection cleared.
    Deselected,
    /// Nothing changed.
    Ignored,
}

/// Pointer state for one interactive client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    pointer: Point,
    selected: Option<StationId>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_moved(&mut self, position: Point) {
        self.pointer = position;
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn selected(&self) -> Option<StationId> {
        self.selected
    }

    /// Handle a button press at `position`.
    pub fn press(
        &mut self,
        session: &mut Session,
        button: PointerButton,
        position: Point,
    ) -> Result<PressOutcome> {
        self.pointer = position;
        let radius = session.config().node_radius;
        let edge_color = session.config().edge_color;
        let hit = session.graph().station_at(position, radius);

        let outcome = match (button, hit) {
            (PointerButton::Primary, None) => {
                self.selected = None;
                PressOutcome::Deselected
            }
            (PointerButton::Primary, Some(station)) => match self.selected {
                None => {
                    self.selected = Some(station);
                    PressOutcome::Selected { station }
                }
                Some(current) if current == station => PressOutcome::Ignored,
                Some(from) => {
                    let connected = session.connect(from, station, edge_color)?;
                    self.selected = Some(station);
                    PressOutcome::Connected {
                        from,
                        to: station,
                        edge: connected.edge(),
                    }
                }
            },
            (PointerButton::Secondary, Some(_)) => PressOutcome::Ignored,
            (PointerButton::Secondary, None) => {
                let color = session.config().station_color;
                let Some(station) = session.place_station(position, color) else {
                    return Ok(PressOutcome::Ignored);
                };
                let edge = match self.selected {
                    Some(from) => session.connect(from, station, edge_color)?.edge(),
                    None => None,
                };
                self.selected = Some(station);
                PressOutcome::Placed { station, edge }
            }
        };

        debug!(?button, x = position.x, y = position.y, ?outcome, "press handled");
        Ok(outcome)
    }

    /// Line from the selected station to the pointer, while one is selected.
    pub fn preview(&self, session: &Session) -> Option<PendingLine> {
        let from = session.graph().station(self.selected?)?.position;
        Some(PendingLine {
            from,
            to: self.pointer,
        })
    }

    /// Snapshot of the session with this client's pending line filled in.
    pub fn render(&self, session: &Session) -> RenderSnapshot {
        let mut snapshot = session.snapshot_for_render();
        snapshot.pending = self.preview(session);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_graph::Color;

    fn press(
        ui: &mut Interaction,
        session: &mut Session,
        button: PointerButton,
        x: f32,
        y: f32,
    ) -> PressOutcome {
        ui.press(session, button, Point::new(x, y)).unwrap()
    }

    #[test]
    fn secondary_press_chains_new_stations() {
        let mut session = Session::default();
        let mut ui = Interaction::new();

        let first = press(&mut ui, &mut session, PointerButton::Secondary, 10.0, 10.0);
        let PressOutcome::Placed { station: a, edge: None } = first else {
            panic!("expected placement, got {first:?}");
        };

        let second = press(&mut ui, &mut session, PointerButton::Secondary, 100.0, 10.0);
        let PressOutcome::Placed { station: b, edge: Some(_) } = second else {
            panic!("expected connected placement, got {second:?}");
        };

        assert_eq!(ui.selected(), Some(b));
        assert!(session.graph().index().contains(a, b));
        assert_eq!(session.motion().len(), 3);
    }

    #[test]
    fn secondary_press_on_station_is_ignored() {
        let mut session = Session::default();
        let mut ui = Interaction::new();
        press(&mut ui, &mut session, PointerButton::Secondary, 10.0, 10.0);

        let outcome = press(&mut ui, &mut session, PointerButton::Secondary, 12.0, 11.0);
        assert_eq!(outcome, PressOutcome::Ignored);
        assert_eq!(session.graph().station_count(), 1);
    }

    #[test]
    fn primary_press_selects_then_connects() {
        let mut session = Session::default();
        let a = session.place_station(Point::new(0.0, 0.0), Color::WHITE).unwrap();
        let b = session.place_station(Point::new(50.0, 0.0), Color::WHITE).unwrap();
        let mut ui = Interaction::new();

        let outcome = press(&mut ui, &mut session, PointerButton::Primary, 1.0, 1.0);
        assert_eq!(outcome, PressOutcome::Selected { station: a });

        let outcome = press(&mut ui, &mut session, PointerButton::Primary, 49.0, 0.0);
        let PressOutcome::Connected { from, to, edge } = outcome else {
            panic!("expected connection, got {outcome:?}");
        };
        assert_eq!((from, to), (a, b));
        assert!(edge.is_some());
        assert_eq!(ui.selected(), Some(b));

        // Going back over the same pair creates nothing new.
        let outcome = press(&mut ui, &mut session, PointerButton::Primary, 0.0, 0.0);
        assert_eq!(outcome, PressOutcome::Connected { from: b, to: a, edge: None });
        assert_eq!(session.graph().edge_count(), 1);
    }

    #[test]
    fn primary_press_on_selected_station_is_ignored() {
        let mut session = Session::default();
        session.place_station(Point::new(0.0, 0.0), Color::WHITE).unwrap();
        let mut ui = Interaction::new();

        press(&mut ui, &mut session, PointerButton::Primary, 0.0, 0.0);
        let outcome = press(&mut ui, &mut session, PointerButton::Primary, 1.0, 0.0);
        assert_eq!(outcome, PressOutcome::Ignored);
        assert_eq!(session.graph().edge_count(), 0);
    }

    #[test]
    fn primary_press_on_empty_space_clears_selection() {
        let mut session = Session::default();
        let mut ui = Interaction::new();
        press(&mut ui, &mut session, PointerButton::Secondary, 10.0, 10.0);
        assert!(ui.selected().is_some());

        let outcome = press(&mut ui, &mut session, PointerButton::Primary, 300.0, 300.0);
        assert_eq!(outcome, PressOutcome::Deselected);
        assert_eq!(ui.selected(), None);
        assert!(ui.preview(&session).is_none());
    }

    #[test]
    fn preview_follows_pointer() {
        let mut session = Session::default();
        let mut ui = Interaction::new();
        press(&mut ui, &mut session, PointerButton::Secondary, 10.0, 20.0);
        ui.pointer_moved(Point::new(200.0, 220.0));

        let line = ui.preview(&session).unwrap();
        assert_eq!(line.from, Point::new(10.0, 20.0));
        assert_eq!(line.to, Point::new(200.0, 220.0));
        assert_eq!(ui.render(&session).pending, Some(line));
    }
}
