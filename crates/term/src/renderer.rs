//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Full-frame redraws only. The playfield is small enough that diffing
//! against the previous frame buys nothing at 60 columns.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch the terminal into game mode: raw input, alternate screen,
    /// hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo `enter`. Safe to call on a renderer that never entered.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame_into(fb, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw as a crossterm command sequence, without
/// touching stdout. Style changes are emitted only at run boundaries.
pub fn encode_frame_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<CellStyle> = None;
    for y in 0..fb.height() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_emits_every_cell() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "abc", CellStyle::default());
        fb.put_str(0, 1, "def", CellStyle::default());

        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for ch in ["a", "b", "c", "d", "e", "f"] {
            assert!(text.contains(ch));
        }
    }

    #[test]
    fn test_style_runs_are_coalesced() {
        let plain = CellStyle::default();
        let bold = CellStyle { bold: true, ..plain };

        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "ab", plain);
        fb.put_str(2, 0, "cd", bold);

        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // One bold toggle for the run, not one per cell. Bold is SGR 1.
        let bold_seq = "\x1b[1m";
        assert_eq!(text.matches(bold_seq).count(), 1);
    }
}
