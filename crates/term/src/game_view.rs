//! GameView: draws a `Game` into a framebuffer.
//!
//! Pure (no I/O), so layout and glyph choices are unit-testable. The view
//! shows the visible board only; shape cells still inside the hidden spawn
//! buffer are clipped at the top border.

use blockfall_core::{Game, Shape};
use blockfall_types::PieceKind;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Columns reserved right of the playfield for the next-shape preview.
const PANEL_W: u16 = 12;

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Total surface this view needs for the given game: bordered
    /// playfield plus the preview panel.
    pub fn surface_size(&self, game: &Game) -> (u16, u16) {
        let board = game.game_board().board();
        let frame_w = board.width() as u16 * self.cell_w + 2;
        let frame_h = board.height() as u16 * self.cell_h + 2;
        (frame_w + 2 + PANEL_W, frame_h)
    }

    /// Render the game into an existing framebuffer, resizing it to fit.
    /// Callers reuse one framebuffer across frames.
    pub fn render_into(&self, game: &Game, paused: bool, fb: &mut FrameBuffer) {
        let (surface_w, surface_h) = self.surface_size(game);
        fb.resize(surface_w, surface_h);
        fb.clear(Cell::default());

        let board = game.game_board().board();
        let frame_w = board.width() as u16 * self.cell_w + 2;
        let frame_h = board.height() as u16 * self.cell_h + 2;

        self.draw_frame(fb, frame_w, frame_h);

        // Locked cells.
        for v in 0..board.height() {
            for h in 0..board.width() {
                match board.get(v, h) {
                    Some(block) => self.draw_cell(fb, v, h, glyph_for(block.kind())),
                    None => self.draw_cell(fb, v, h, EMPTY_GLYPH),
                }
            }
        }

        // Ghost outline at the landing position, then the falling shape on
        // top of it.
        if let Some(shape) = game.game_board().current_shape() {
            let ghost = game.game_board().where_would_land();
            for (pos, _) in shape.blocks() {
                let at = ghost + *pos;
                self.draw_cell(fb, at.vertical, at.horizontal, GHOST_GLYPH);
            }

            let anchor = game.game_board().position();
            for (pos, block) in shape.blocks() {
                let at = anchor + *pos;
                self.draw_cell(fb, at.vertical, at.horizontal, glyph_for(block.kind()));
            }
        }

        self.draw_preview(fb, game.next_shape(), frame_w);

        if game.is_game_over() {
            self.draw_overlay(fb, frame_w, frame_h, "GAME OVER");
        } else if paused {
            self.draw_overlay(fb, frame_w, frame_h, "PAUSED");
        }
    }

    /// Convenience helper that allocates a fresh framebuffer.
    pub fn render(&self, game: &Game, paused: bool) -> FrameBuffer {
        let (w, h) = self.surface_size(game);
        let mut fb = FrameBuffer::new(w, h);
        self.render_into(game, paused, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, w: u16, h: u16) {
        let style = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };

        fb.put_char(0, 0, '┌', style);
        fb.put_char(w - 1, 0, '┐', style);
        fb.put_char(0, h - 1, '└', style);
        fb.put_char(w - 1, h - 1, '┘', style);
        for x in 1..w - 1 {
            fb.put_char(x, 0, '─', style);
            fb.put_char(x, h - 1, '─', style);
        }
        for y in 1..h - 1 {
            fb.put_char(0, y, '│', style);
            fb.put_char(w - 1, y, '│', style);
        }
    }

    /// Paint one board cell. Coordinates above the visible board (the
    /// hidden buffer) or otherwise outside it are dropped.
    fn draw_cell(&self, fb: &mut FrameBuffer, vertical: i32, horizontal: i32, glyph: Glyph) {
        if vertical < 0 || horizontal < 0 {
            return;
        }
        let x = 1 + horizontal as u16 * self.cell_w;
        let y = 1 + vertical as u16 * self.cell_h;
        // Clip to the playfield: fill_rect would happily spill into the
        // border and panel otherwise.
        if x + self.cell_w > fb.width() || y >= fb.height() - 1 {
            return;
        }
        fb.fill_rect(x, y, self.cell_w, self.cell_h, glyph.ch, glyph.style);
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, next: Option<&Shape>, frame_w: u16) {
        let panel_x = frame_w + 2;
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        fb.put_str(panel_x, 1, "NEXT", label);

        let Some(shape) = next else {
            fb.put_str(panel_x, 3, "-", CellStyle::default());
            return;
        };
        for (pos, block) in shape.blocks() {
            let glyph = glyph_for(block.kind());
            let x = panel_x + pos.horizontal as u16 * self.cell_w;
            let y = 3 + pos.vertical as u16 * self.cell_h;
            fb.fill_rect(x, y, self.cell_w, self.cell_h, glyph.ch, glyph.style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame_w: u16, frame_h: u16, text: &str) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..CellStyle::default()
        };
        let text_w = text.chars().count() as u16;
        let x = frame_w.saturating_sub(text_w) / 2;
        fb.put_str(x, frame_h / 2, text, style);
    }
}

struct Glyph {
    ch: char,
    style: CellStyle,
}

const EMPTY_GLYPH: Glyph = Glyph {
    ch: '·',
    style: CellStyle {
        fg: Rgb::new(90, 90, 100),
        bg: Rgb::new(0, 0, 0),
        bold: false,
        dim: true,
    },
};

const GHOST_GLYPH: Glyph = Glyph {
    ch: '░',
    style: CellStyle {
        fg: Rgb::new(140, 140, 140),
        bg: Rgb::new(0, 0, 0),
        bold: false,
        dim: true,
    },
};

fn glyph_for(kind: PieceKind) -> Glyph {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    Glyph {
        ch: '█',
        style: CellStyle {
            fg,
            bold: true,
            ..CellStyle::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::{Board, GameBoard};
    use blockfall_types::{Block, Coords};

    fn view_game(height: i32, width: i32, hidden: i32) -> Game {
        let catalog =
            vec![Shape::new(1, vec![(Coords::new(0, 0), Block::new(PieceKind::O))]).unwrap()];
        Game::new(
            GameBoard::new(Board::new(height, width).unwrap(), hidden),
            catalog,
            7,
        )
        .unwrap()
    }

    #[test]
    fn test_frame_corners() {
        let game = view_game(4, 3, 0);
        let view = GameView::new(2, 1);
        let fb = view.render(&game, false);

        // frame is 3*2+2 = 8 wide, 4+2 = 6 tall
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(7, 0).unwrap().ch, '┐');
        assert_eq!(fb.get(0, 5).unwrap().ch, '└');
        assert_eq!(fb.get(7, 5).unwrap().ch, '┘');
    }

    #[test]
    fn test_falling_shape_drawn_at_anchor() {
        let mut game = view_game(4, 3, 0);
        game.new_game();
        let view = GameView::new(2, 1);
        let fb = view.render(&game, false);

        // Single-cell shape spawns at (0, 0): terminal cells (1, 1)-(2, 1).
        assert_eq!(fb.get(1, 1).unwrap().ch, '█');
        assert_eq!(fb.get(2, 1).unwrap().ch, '█');
    }

    #[test]
    fn test_ghost_marks_landing_row() {
        let mut game = view_game(4, 3, 0);
        game.new_game();
        let fb = GameView::new(2, 1).render(&game, false);

        // Lands on the bottom row: terminal row 1 + 3.
        assert_eq!(fb.get(1, 4).unwrap().ch, '░');
    }

    #[test]
    fn test_hidden_buffer_cells_clipped() {
        // A full 2x2 square is rotation-invariant, so its lowest occupied
        // row is always 1 and it spawns with its top half in the buffer.
        let square = Shape::new(
            2,
            vec![
                (Coords::new(0, 0), Block::new(PieceKind::O)),
                (Coords::new(0, 1), Block::new(PieceKind::O)),
                (Coords::new(1, 0), Block::new(PieceKind::O)),
                (Coords::new(1, 1), Block::new(PieceKind::O)),
            ],
        )
        .unwrap();
        let mut game = Game::new(
            GameBoard::new(Board::new(4, 3).unwrap(), 2),
            vec![square],
            7,
        )
        .unwrap();
        game.new_game();
        let fb = GameView::new(2, 1).render(&game, false);

        // The visible half sits on board row 0; the buffered half must not
        // bleed into the top border.
        assert_eq!(fb.get(1, 1).unwrap().ch, '█');
        assert_eq!(fb.get(1, 0).unwrap().ch, '─');
    }

    #[test]
    fn test_preview_shows_lookahead() {
        let mut game = view_game(4, 3, 0);
        game.new_game();
        let fb = GameView::new(2, 1).render(&game, false);

        let panel_x = 8 + 2;
        assert_eq!(fb.get(panel_x, 1).unwrap().ch, 'N');
        // Single-cell lookahead at bbox origin.
        assert_eq!(fb.get(panel_x, 3).unwrap().ch, '█');
    }

    #[test]
    fn test_overlays() {
        let mut game = view_game(4, 3, 0);
        game.new_game();
        let view = GameView::new(2, 1);

        let paused = view.render(&game, true);
        let row: String = (0..paused.width())
            .filter_map(|x| paused.get(x, 3).map(|c| c.ch))
            .collect();
        assert!(row.contains("PAUSED"));
    }
}
