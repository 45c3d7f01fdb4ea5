//! SheetView: maps a `core::Scoreboard` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{PlayerRow, Scoreboard};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{FrameTotal, Mark, FRAME_COUNT};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the status area shows about the score sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinkStatusView {
    pub enabled: bool,
    pub failures: u32,
}

const NAME_W: u16 = 10;
const FRAME_W: u16 = 3;
const LAST_FRAME_W: u16 = 5;
const TOTAL_W: u16 = 5;

/// Name, ten frames, total.
const COLUMNS: usize = FRAME_COUNT + 2;

/// Width of the whole sheet including borders.
pub const SHEET_W: u16 =
    NAME_W + FRAME_W * (FRAME_COUNT as u16 - 1) + LAST_FRAME_W + TOTAL_W + COLUMNS as u16 + 1;

const BORDER: CellStyle = CellStyle::fg(Rgb::new(150, 150, 160));
const HEADER: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const TEXT: CellStyle = CellStyle::PLAIN;
const PENDING: CellStyle = CellStyle::fg(Rgb::new(140, 140, 140)).dim();
const ACTIVE: CellStyle = CellStyle::fg(Rgb::new(250, 220, 90)).bold();
const CURSOR_BG: Rgb = Rgb::new(50, 50, 80);
const STRIKE: CellStyle = CellStyle::fg(Rgb::new(230, 90, 90)).bold();
const SPARE: CellStyle = CellStyle::fg(Rgb::new(90, 170, 240)).bold();
const WINNER: CellStyle = CellStyle::fg(Rgb::new(110, 220, 120)).bold();
const NOTICE: CellStyle = CellStyle::fg(Rgb::new(240, 120, 80));
const HELP: CellStyle = CellStyle::fg(Rgb::new(120, 120, 130)).dim();

/// Paper-style score sheet renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetView {
    show_help: bool,
}

impl Default for SheetView {
    fn default() -> Self {
        Self { show_help: true }
    }
}

impl SheetView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    /// Rows the sheet needs for `players` bowlers, status lines excluded.
    pub fn sheet_height(players: usize) -> u16 {
        // Top rule, header, rule, then two rows and a rule per player.
        3 + 3 * players.max(1) as u16
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, board: &Scoreboard, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_status(board, None, None, viewport, fb);
    }

    pub fn render_into_with_status(
        &self,
        board: &Scoreboard,
        sink: Option<&SinkStatusView>,
        notice: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::PLAIN.into_cell(' '));

        let x0 = viewport.width.saturating_sub(SHEET_W) / 2;
        let mut y = 0;

        fb.put_str(x0, y, "TEN-PIN SCORE SHEET", HEADER);
        y += 1;

        let widths = column_widths();
        self.draw_rule(fb, x0, y, ('┌', '┬', '┐'), &widths);
        y += 1;
        self.draw_header(fb, x0, y, &widths);
        y += 1;

        if board.players.is_empty() {
            self.draw_rule(fb, x0, y, ('└', '┴', '┘'), &widths);
            y += 1;
        }
        for (i, row) in board.players.iter().enumerate() {
            self.draw_rule(fb, x0, y, ('├', '┼', '┤'), &widths);
            y += 1;
            self.draw_player(fb, x0, y, row, board, &widths);
            y += 2;
            if i + 1 == board.players.len() {
                self.draw_rule(fb, x0, y, ('└', '┴', '┘'), &widths);
                y += 1;
            }
        }

        y += 1;
        fb.put_str(x0, y, &status_line(board), status_style(board));
        y += 1;

        if let Some(sink) = sink {
            fb.put_str(x0, y, &sink_line(sink), TEXT);
            y += 1;
        }
        if let Some(notice) = notice {
            fb.put_str(x0, y, notice, NOTICE);
            y += 1;
        }
        if self.show_help {
            y += 1;
            fb.put_str(
                x0,
                y,
                "0-9 / X - record a ball   n new game   q quit",
                HELP,
            );
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, board: &Scoreboard, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(board, viewport, &mut fb);
        fb
    }

    fn draw_rule(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y: u16,
        (left, mid, right): (char, char, char),
        widths: &[u16; COLUMNS],
    ) {
        let mut x = x0;
        fb.put_char(x, y, left, BORDER);
        for (i, &w) in widths.iter().enumerate() {
            fb.fill_rect(x + 1, y, w, 1, '─', BORDER);
            x += w + 1;
            let joint = if i + 1 == COLUMNS { right } else { mid };
            fb.put_char(x, y, joint, BORDER);
        }
    }

    /// Draw the column separators of one row and return each column's inner x.
    fn draw_separators(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y: u16,
        widths: &[u16; COLUMNS],
    ) -> [u16; COLUMNS] {
        let mut starts = [0; COLUMNS];
        let mut x = x0;
        fb.put_char(x, y, '│', BORDER);
        for (start, &w) in starts.iter_mut().zip(widths) {
            *start = x + 1;
            x += w + 1;
            fb.put_char(x, y, '│', BORDER);
        }
        starts
    }

    fn draw_header(&self, fb: &mut FrameBuffer, x0: u16, y: u16, widths: &[u16; COLUMNS]) {
        let starts = self.draw_separators(fb, x0, y, widths);
        fb.put_str(starts[0], y, "Player", HEADER);
        for frame in 0..FRAME_COUNT {
            let col = frame + 1;
            let label = (frame + 1).to_string();
            fb.put_str_right(starts[col], y, widths[col], &label, HEADER);
        }
        fb.put_str(starts[COLUMNS - 1], y, "Total", HEADER);
    }

    fn draw_player(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y: u16,
        row: &PlayerRow,
        board: &Scoreboard,
        widths: &[u16; COLUMNS],
    ) {
        let starts = self.draw_separators(fb, x0, y, widths);
        self.draw_separators(fb, x0, y + 1, widths);

        let turn = board.turn.filter(|t| t.player == row.id);
        let winner = board.winners.contains(&row.id);

        let name_style = if winner {
            WINNER
        } else if turn.is_some() {
            ACTIVE
        } else {
            TEXT
        };
        let marker = if turn.is_some() { '>' } else { ' ' };
        let name: String = std::iter::once(marker)
            .chain(row.name.chars())
            .take(NAME_W as usize)
            .collect();
        fb.put_str(starts[0], y, &name, name_style);

        for frame in 0..FRAME_COUNT {
            let col = frame + 1;
            let (x, w) = (starts[col], widths[col]);

            if turn.is_some_and(|t| t.frame_index as usize == frame) {
                fb.fill_rect(x, y, w, 1, ' ', TEXT.on(CURSOR_BG));
            }

            let bg = fb.get(x, y).map(|c| c.style.bg).unwrap_or_default();
            for (i, mark) in row.marks[frame].iter().enumerate() {
                fb.put_char(x + 2 * i as u16, y, mark.as_char(), mark_style(*mark).on(bg));
            }

            match row.totals[frame] {
                FrameTotal::Resolved(total) => {
                    fb.put_str_right(x, y + 1, w, &total.to_string(), TEXT)
                }
                FrameTotal::Pending => fb.put_str_right(x, y + 1, w, "...", PENDING),
                FrameTotal::Unplayed => {}
            }
        }

        let total_col = COLUMNS - 1;
        let total_style = if winner { WINNER } else { HEADER };
        fb.put_str_right(
            starts[total_col],
            y,
            widths[total_col],
            &row.total.to_string(),
            total_style,
        );
    }
}

fn column_widths() -> [u16; COLUMNS] {
    let mut widths = [FRAME_W; COLUMNS];
    widths[0] = NAME_W;
    widths[COLUMNS - 2] = LAST_FRAME_W;
    widths[COLUMNS - 1] = TOTAL_W;
    widths
}

fn mark_style(mark: Mark) -> CellStyle {
    match mark {
        Mark::Strike => STRIKE,
        Mark::Spare => SPARE,
        Mark::Skip => PENDING,
        Mark::Pins(_) => TEXT,
    }
}

fn status_style(board: &Scoreboard) -> CellStyle {
    if board.game_over {
        WINNER
    } else {
        ACTIVE
    }
}

/// Whose ball it is, or who won.
fn status_line(board: &Scoreboard) -> String {
    if board.game_over {
        let names = board.winner_names().join(", ");
        let score = board
            .winners
            .first()
            .and_then(|w| board.players.get(w.index()))
            .map(|row| row.total)
            .unwrap_or(0);
        return if board.winners.len() > 1 {
            format!("Tie: {} with {}", names, score)
        } else {
            format!("Winner: {} with {}", names, score)
        };
    }

    match (board.current_player(), board.turn) {
        (Some(row), Some(turn)) => {
            let standing = board.rack.map(|r| r.standing).unwrap_or(0);
            format!(
                "{} to bowl: frame {}, ball {}, {} pins standing",
                row.name,
                turn.frame_number(),
                turn.throw_index + 1,
                standing
            )
        }
        _ => String::from("No players"),
    }
}

fn sink_line(sink: &SinkStatusView) -> String {
    match (sink.enabled, sink.failures) {
        (false, _) => String::from("Sink: off"),
        (true, 0) => String::from("Sink: on"),
        (true, n) => format!("Sink: on, {} report(s) failed", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn viewport() -> Viewport {
        Viewport::new(SHEET_W, 24)
    }

    fn find_row(fb: &FrameBuffer, needle: &str) -> Option<u16> {
        (0..fb.height()).find(|&y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn sheet_fits_standard_terminal() {
        assert_eq!(SHEET_W, 60);
        assert!(SheetView::sheet_height(5) + 5 <= 24);
    }

    #[test]
    fn header_numbers_every_frame() {
        let board = GameState::new(["Alice"]).unwrap().scoreboard();
        let fb = SheetView::new().render(&board, viewport());
        let header = fb.row_text(2);
        assert!(header.starts_with("│Player    │  1│  2│"));
        assert!(header.contains("│   10│Total│"));
    }

    #[test]
    fn marks_and_totals_follow_the_game() {
        let mut state = GameState::new(["Alice", "Bob"]).unwrap();
        for pins in [10, 4, 5, 7] {
            state.apply_throw(pins).unwrap();
        }
        let fb = SheetView::new().render(&state.scoreboard(), viewport());

        let alice = find_row(&fb, ">Alice").unwrap();
        let marks = fb.row_text(alice);
        assert!(marks.contains("│X -│7  │"));
        let totals = fb.row_text(alice + 1);
        assert!(totals.contains("│...│...│"));

        let bob = find_row(&fb, " Bob").unwrap();
        assert!(fb.row_text(bob).contains("│4 5│"));
        assert!(fb.row_text(bob + 1).contains("│  9│"));
        assert!(fb.row_text(bob).ends_with("    9│"));
    }

    #[test]
    fn current_frame_is_highlighted() {
        let mut state = GameState::new(["Alice"]).unwrap();
        state.apply_throw(3).unwrap();
        let fb = SheetView::new().render(&state.scoreboard(), viewport());

        let y = find_row(&fb, ">Alice").unwrap();
        // Name column: border + 10 wide + border; frame 1 starts right after.
        let cell = fb.get(NAME_W + 2, y).unwrap();
        assert_eq!(cell.ch, '3');
        assert_eq!(cell.style.bg, CURSOR_BG);
    }

    #[test]
    fn status_names_next_bowler() {
        let mut state = GameState::new(["Alice", "Bob"]).unwrap();
        state.apply_throw(6).unwrap();
        let fb = SheetView::new().render(&state.scoreboard(), viewport());
        assert!(find_row(&fb, "Alice to bowl: frame 1, ball 2, 4 pins standing").is_some());
    }

    #[test]
    fn status_announces_winner_and_tie() {
        let state = GameState::replay(["Solo"], &[10; 12]).unwrap();
        let fb = SheetView::new().render(&state.scoreboard(), viewport());
        assert!(find_row(&fb, "Winner: Solo with 300").is_some());
        assert!(find_row(&fb, "│X X X│  300│").is_some());

        let state = GameState::replay(["A", "B"], &[0; 40]).unwrap();
        let fb = SheetView::new().render(&state.scoreboard(), viewport());
        assert!(find_row(&fb, "Tie: A, B with 0").is_some());
    }

    #[test]
    fn sink_status_and_notice_lines() {
        let board = GameState::new(["Alice"]).unwrap().scoreboard();
        let mut fb = FrameBuffer::new(1, 1);
        let sink = SinkStatusView {
            enabled: true,
            failures: 2,
        };
        SheetView::new().with_help(false).render_into_with_status(
            &board,
            Some(&sink),
            Some("only 4 pins standing"),
            viewport(),
            &mut fb,
        );
        assert_eq!(fb.width(), SHEET_W);
        assert!(find_row(&fb, "Sink: on, 2 report(s) failed").is_some());
        assert!(find_row(&fb, "only 4 pins standing").is_some());
        assert!(find_row(&fb, "q quit").is_none());
    }

    #[test]
    fn long_names_are_truncated() {
        let board = GameState::new(["Bartholomew Jones"]).unwrap().scoreboard();
        let fb = SheetView::new().render(&board, viewport());
        assert!(find_row(&fb, "│>Bartholom│").is_some());
    }
}
