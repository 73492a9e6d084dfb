/// Presentation layer: full-redraw text renderer.
///
/// Every frame clears the screen and prints the board top-to-bottom:
///   1. Grid rows, one glyph per cell, separated by spaces
///   2. Legend (player / goal / bomb / obstacle)
///   3. Collected-items counter
///   4. Last notice, if any
///
/// All commands are batched with `queue!` and flushed once at the end.
/// The game loop is prompt-driven, so nothing here touches raw mode.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType, SetTitle},
};

use crate::domain::cell::Cell;
use crate::sim::session::Snapshot;

const GOAL_COLOR: Color = Color::DarkGreen;
const BOMB_COLOR: Color = Color::DarkRed;
const ITEM_COLOR: Color = Color::DarkCyan;

pub trait Renderer {
    /// Clear the screen and draw one frame.
    fn draw(&mut self, frame: &Snapshot<'_>) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
    /// Print a full line.
    fn message(&mut self, text: &str) -> io::Result<()>;
    /// Print without a newline and flush, leaving the cursor for input.
    fn prompt(&mut self, text: &str) -> io::Result<()>;
}

pub struct TerminalRenderer<W: Write> {
    writer: BufWriter<W>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalRenderer::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        TerminalRenderer {
            writer: BufWriter::with_capacity(4096, out),
        }
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        queue!(self.writer, SetTitle(title))?;
        self.writer.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(e) => panic!("flush failed: {e}"),
        }
    }

    fn cell_color(cell: Cell, player: Color) -> Option<Color> {
        match cell {
            Cell::Item => Some(ITEM_COLOR),
            Cell::Bomb => Some(BOMB_COLOR),
            Cell::Player => Some(player),
            Cell::Goal => Some(GOAL_COLOR),
            _ => None,
        }
    }

    fn compose_grid(&mut self, frame: &Snapshot<'_>, player: Color) -> io::Result<()> {
        for row in frame.grid.rows() {
            for &cell in row {
                match Self::cell_color(cell, player) {
                    Some(color) => queue!(
                        self.writer,
                        SetForegroundColor(color),
                        Print(cell.glyph()),
                        ResetColor,
                        Print(' ')
                    )?,
                    None => queue!(self.writer, Print(cell.glyph()), Print(' '))?,
                }
            }
            queue!(self.writer, Print("\n"))?;
        }
        Ok(())
    }

    fn compose_legend(&mut self, player: Color) -> io::Result<()> {
        queue!(
            self.writer,
            SetForegroundColor(player),
            Print("P is the player.\n"),
            SetForegroundColor(GOAL_COLOR),
            Print("G is the goal.\n"),
            SetForegroundColor(BOMB_COLOR),
            Print("B is a bomb.\n"),
            ResetColor,
            Print("# is an obstacle.\n")
        )
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, frame: &Snapshot<'_>) -> io::Result<()> {
        let player = Color::AnsiValue(frame.player_color);

        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        self.compose_grid(frame, player)?;
        self.compose_legend(player)?;
        queue!(
            self.writer,
            Print(format!("Total items collected: {}\n", frame.items_collected))
        )?;
        if let Some(notice) = frame.notice {
            queue!(self.writer, Print(notice), Print("\n"))?;
        }

        self.writer.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        self.writer.flush()
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        queue!(self.writer, Print(text), Print("\n"))?;
        self.writer.flush()
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        queue!(self.writer, Print(text))?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Grid;

    /// Drop escape sequences so tests can read the visible text.
    fn visible(bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        let mut out = String::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // CSI: ESC [ ... final byte in '@'..='~'
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for n in chars.by_ref() {
                        if ('@'..='~').contains(&n) {
                            break;
                        }
                    }
                // OSC: ESC ] ... BEL
                } else if chars.peek() == Some(&']') {
                    for n in chars.by_ref() {
                        if n == '\x07' {
                            break;
                        }
                    }
                }
                continue;
            }
            out.push(c);
        }
        out
    }

    fn render(frame: &Snapshot<'_>) -> String {
        let mut r = TerminalRenderer::new(Vec::new());
        r.draw(frame).unwrap();
        visible(&r.into_inner())
    }

    #[test]
    fn frame_has_grid_legend_and_counter() {
        let grid = Grid::from_rows(&["P#", "IG"]);
        let frame = Snapshot { grid: &grid, items_collected: 3, player_color: 99, notice: None };
        let text = render(&frame);
        assert!(text.contains("P # \nI G \n"), "got {text:?}");
        assert!(text.contains("P is the player.\nG is the goal.\nB is a bomb.\n# is an obstacle.\n"));
        assert!(text.ends_with("Total items collected: 3\n"));
    }

    #[test]
    fn notice_follows_counter() {
        let grid = Grid::from_rows(&["P.", ".G"]);
        let frame = Snapshot {
            grid: &grid,
            items_collected: 0,
            player_color: 20,
            notice: Some("Oops! You bumped into an obstacle."),
        };
        let text = render(&frame);
        assert!(text.ends_with("Total items collected: 0\nOops! You bumped into an obstacle.\n"));
    }

    #[test]
    fn colored_cells_carry_escape_codes() {
        let grid = Grid::from_rows(&["PB", ".G"]);
        let frame = Snapshot { grid: &grid, items_collected: 0, player_color: 77, notice: None };
        let mut r = TerminalRenderer::new(Vec::new());
        r.draw(&frame).unwrap();
        let raw = String::from_utf8(r.into_inner()).unwrap();
        assert!(raw.contains("\x1b[38;5;77m"));
    }

    #[test]
    fn prompt_has_no_newline() {
        let mut r = TerminalRenderer::new(Vec::new());
        r.prompt("Enter the grid size: ").unwrap();
        assert_eq!(visible(&r.into_inner()), "Enter the grid size: ");
    }
}
