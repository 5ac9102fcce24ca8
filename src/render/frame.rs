//! Output sinks for rendered frames.
//!
//! [`TerminalSink`] is a full-screen renderer with:
//! - cached chrome (title bar / bottom rule), rebuilt only on resize
//! - a persistent copy of the previous grid for row diffing
//! - one contiguous write per frame (cursor moves + dirty rows)
//!
//! [`PlainSink`] appends frames as plain text to any writer.

use std::io::{self, Stdout, Write, stdout};

use crate::{
    core::{color::Tint, error::FrameFault},
    render::{
        driver::{FrameSink, FrameSnapshot, Outcome, RunReport},
        grid::Grid,
    },
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;

// Box-drawing glyphs
const TL: &str = "┌";
const TR: &str = "┐";
const BL: &str = "└";
const BR: &str = "┘";
const H: &str = "─";
const V: &str = "│";

const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
const CLEAR_SCREEN: &[u8] = b"\x1b[2J";

// Screen rows (1-based)
const TITLE_ROW: usize = 1;
const STATUS_ROW: usize = 2;
const GRID_ROW: usize = 3;

// --- Helpers ---

/// Write centred tinted text between horizontal rules.
fn push_centered(buf: &mut String, text: &str, width: usize, tint: &Tint) {
    let inner = width.saturating_sub(TITLE_PADDING);
    let len = text.chars().count();
    if len == 0 || len > inner {
        buf.push_str(&H.repeat(width));
        return;
    }
    let pad_left = (inner - len) / 2;
    let pad_right = inner - len - pad_left;

    buf.push_str(&H.repeat(pad_left));
    buf.push_str("  "); // 2-char left padding
    buf.push_str(&tint.paint(text));
    buf.push(' '); // 1-char right padding
    buf.push_str(&H.repeat(pad_right));
}

/// Pad with spaces or cut so `text` is exactly `width` chars.
fn fit_line(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

#[inline]
fn push_usize_dec(buf: &mut Vec<u8>, mut n: usize) {
    // enough for 64-bit usize (20 digits max)
    let mut tmp = [0u8; 20];
    let mut i = tmp.len();

    // write digits in reverse
    loop {
        i -= 1;
        #[allow(clippy::cast_possible_truncation)]
        let digit = (n % 10) as u8;
        tmp[i] = b'0' + digit;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    buf.extend_from_slice(&tmp[i..]);
}

/// `ESC[{row};1H`
#[inline]
fn push_goto(buf: &mut Vec<u8>, row: usize) {
    buf.extend_from_slice(b"\x1b[");
    push_usize_dec(buf, row);
    buf.extend_from_slice(b";1H");
}

fn status_text(f: &FrameSnapshot<'_>) -> String {
    format!(
        " frame {}/{} │ {}×{} │ t={:.2} │ {:.1}%",
        f.index + 1,
        f.total,
        f.grid.width(),
        f.grid.height(),
        f.t,
        f.progress_pct()
    )
}

fn stats_text(f: &FrameSnapshot<'_>) -> String {
    format!(
        " converged {:.1}% │ mean escape {:.3} │ noise {}",
        f.stats.converged_pct(),
        f.stats.mean_escape,
        f.stats.noised
    )
}

fn notice_text(report: &RunReport) -> String {
    match report.outcome {
        Outcome::Completed => format!(
            "done: {} frames shown, {} skipped",
            report.emitted, report.faulted
        ),
        Outcome::Interrupted => format!(
            "interrupted after {} frames ({} skipped)",
            report.emitted, report.faulted
        ),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Replace every row of the field
    Full,
    /// Replace only the rows that changed.
    Delta,
}

pub struct TerminalSink<W: Write = Stdout> {
    out: W,
    strat: Strategy,
    first_frame: bool,
    title: String,
    subtitle: Option<String>,
    tint: Tint,
    width: usize,
    height: usize,

    // cached chrome (top and bottom)
    chrome_top: Vec<u8>,
    chrome_bot: Vec<u8>,

    // what is currently on screen
    prev: Option<Grid>,
    // reused per-frame output buffer
    buf: Vec<u8>,
}

impl TerminalSink<Stdout> {
    #[must_use]
    pub fn stdout(strat: Strategy, width: usize, height: usize) -> Self {
        Self::new(stdout(), strat, width, height)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, strat: Strategy, width: usize, height: usize) -> Self {
        Self {
            out,
            strat,
            first_frame: true,
            title: String::from("Julia Field"),
            subtitle: None,
            tint: Tint::default(),
            width,
            height,
            chrome_top: Vec::new(),
            chrome_bot: Vec::new(),
            prev: None,
            buf: Vec::new(),
        }
    }

    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self.chrome_top.clear();
        self
    }

    #[must_use]
    pub fn subtitle(mut self, s: impl Into<String>) -> Self {
        self.subtitle = Some(s.into());
        self.chrome_top.clear();
        self
    }

    #[must_use]
    pub fn tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    /// Underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn stats_row(&self) -> usize {
        GRID_ROW + self.height
    }

    fn refresh_chrome(&mut self) {
        let inner = self.width;

        // --- top ---
        let mut top = String::new();
        top.push_str(TL);
        push_centered(&mut top, &self.title, inner, &self.tint);
        top.push_str(TR);

        self.chrome_top.clear();
        self.chrome_top.extend_from_slice(top.as_bytes());

        // --- bottom ---
        let mut bot = String::new();
        bot.push_str(BL);
        if let Some(sub) = &self.subtitle {
            push_centered(&mut bot, sub, inner, &self.tint);
        } else {
            bot.push_str(&H.repeat(inner));
        }
        bot.push_str(BR);

        self.chrome_bot.clear();
        self.chrome_bot.extend_from_slice(bot.as_bytes());
    }

    /// Clear the screen and draw the chrome once.
    fn prime(&mut self) {
        let stale = self.chrome_top.is_empty();
        if stale {
            self.refresh_chrome();
        }
        if self.first_frame {
            self.buf.extend_from_slice(CLEAR_SCREEN);
            self.first_frame = false;
        }
        if stale || self.prev.is_none() {
            let bottom = self.stats_row() + 1;
            push_goto(&mut self.buf, TITLE_ROW);
            self.buf.extend_from_slice(&self.chrome_top);
            push_goto(&mut self.buf, bottom);
            self.buf.extend_from_slice(&self.chrome_bot);
        }
    }

    fn push_boxed_line(&mut self, row: usize, text: &str) {
        push_goto(&mut self.buf, row);
        self.buf.extend_from_slice(V.as_bytes());
        self.buf
            .extend_from_slice(fit_line(text, self.width).as_bytes());
        self.buf.extend_from_slice(V.as_bytes());
    }

    fn push_grid_row(&mut self, grid: &Grid, y: usize) {
        push_goto(&mut self.buf, GRID_ROW + y);
        self.buf.extend_from_slice(V.as_bytes());
        self.buf.extend_from_slice(self.tint.open().as_bytes());
        let mut tmp = [0u8; 4];
        for c in grid.row(y) {
            self.buf
                .extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
        }
        self.buf.extend_from_slice(self.tint.close().as_bytes());
        self.buf.extend_from_slice(V.as_bytes());
    }

    /// Rows that differ from what is on screen (all of them for `Full`, the
    /// first frame, or a size change).
    fn dirty_rows(&self, grid: &Grid) -> Vec<usize> {
        let all = || -> Vec<usize> { (0..grid.height()).collect() };
        match (&self.strat, &self.prev) {
            (Strategy::Delta, Some(prev))
                if prev.width() == grid.width() && prev.height() == grid.height() =>
            {
                let dirty: Vec<usize> = (0..grid.height())
                    .filter(|&y| prev.row(y) != grid.row(y))
                    .collect();
                // >50% dirty → full redraw
                if dirty.len() * 2 > grid.height() {
                    all()
                } else {
                    dirty
                }
            }
            _ => all(),
        }
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        let res = self
            .out
            .write_all(&self.buf)
            .and_then(|()| self.out.flush());
        self.buf.clear();
        res
    }

    fn park_cursor(&mut self) {
        let below = self.stats_row() + 2;
        push_goto(&mut self.buf, below);
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn emit(&mut self, f: &FrameSnapshot<'_>) -> io::Result<()> {
        if f.grid.width() != self.width || f.grid.height() != self.height {
            self.width = f.grid.width();
            self.height = f.grid.height();
            self.chrome_top.clear();
            self.prev = None;
            self.first_frame = true;
        }
        self.buf.extend_from_slice(HIDE_CURSOR);
        self.prime();

        self.push_boxed_line(STATUS_ROW, &status_text(f));
        for y in self.dirty_rows(f.grid) {
            self.push_grid_row(f.grid, y);
        }
        self.push_boxed_line(self.stats_row(), &stats_text(f));

        self.park_cursor();
        self.buf.extend_from_slice(SHOW_CURSOR);

        match &mut self.prev {
            Some(prev) => prev.clone_from(f.grid),
            None => self.prev = Some(f.grid.clone()),
        }
        self.flush_buf()
    }

    fn fault(&mut self, index: usize, fault: &FrameFault) {
        self.prime();
        let msg = format!(" ⚠ frame {} skipped: {fault}", index + 1);
        self.push_boxed_line(self.stats_row(), &msg);
        self.park_cursor();
        let _ = self.flush_buf();
    }

    fn finish(&mut self, report: &RunReport) {
        self.park_cursor();
        self.buf.extend_from_slice(SHOW_CURSOR);
        self.buf.extend_from_slice(notice_text(report).as_bytes());
        self.buf.push(b'\n');
        let _ = self.flush_buf();
    }
}

/// Always leave the cursor visible.
impl<W: Write> Drop for TerminalSink<W> {
    fn drop(&mut self) {
        let _ = self.out.write_all(SHOW_CURSOR);
        let _ = self.out.flush();
    }
}

/// Frames one after another as plain text.
pub struct PlainSink<W: Write> {
    out: W,
}

impl<W: Write> PlainSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for PlainSink<W> {
    fn emit(&mut self, f: &FrameSnapshot<'_>) -> io::Result<()> {
        let rule = "=".repeat(f.grid.width());
        writeln!(self.out, "{}", status_text(f).trim_start())?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "{}", f.grid)?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "{}", stats_text(f).trim_start())?;
        self.out.flush()
    }

    fn fault(&mut self, index: usize, fault: &FrameFault) {
        let _ = writeln!(self.out, "! frame {} skipped: {fault}", index + 1);
    }

    fn finish(&mut self, report: &RunReport) {
        let _ = writeln!(self.out, "{}", notice_text(report));
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::field::FrameStats;

    fn snapshot(grid: &Grid, index: usize) -> FrameSnapshot<'_> {
        FrameSnapshot {
            index,
            total: 4,
            t: 0.2 * index as f64,
            grid,
            stats: FrameStats::default(),
        }
    }

    fn count(hay: &[u8], needle: &[u8]) -> usize {
        hay.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn fit_line_pads_and_truncates() {
        assert_eq!(fit_line("ab", 4), "ab  ");
        assert_eq!(fit_line("abcdef", 3), "abc");
        assert_eq!(fit_line("·░", 2), "·░");
    }

    #[test]
    fn centered_title_spans_the_width() {
        let mut s = String::new();
        push_centered(&mut s, "hi", 11, &Tint::Plain);
        assert_eq!(s.chars().count(), 11);
        assert!(s.contains("  hi "));
    }

    #[test]
    fn delta_rewrites_only_changed_rows() {
        let mut sink = TerminalSink::new(Vec::new(), Strategy::Delta, 4, 6).tint(Tint::Plain);
        let mut g = Grid::new(4, 6, ' ');
        sink.emit(&snapshot(&g, 0)).unwrap();
        let first = sink.get_ref().len();
        assert!(count(sink.get_ref(), b"\x1b[2J") == 1);

        g.set(1, 2, '#');
        sink.emit(&snapshot(&g, 1)).unwrap();
        let second = &sink.get_ref()[first..];
        assert_eq!(count(second, b"\x1b[2J"), 0);
        // grid row 2 sits on screen row 5
        assert_eq!(count(second, b"\x1b[5;1H"), 1);
        assert_eq!(count(second, b"\x1b[4;1H"), 0);
        assert_eq!(count(second, "│ #  │".as_bytes()), 1);
    }

    #[test]
    fn full_rewrites_every_row() {
        let mut sink = TerminalSink::new(Vec::new(), Strategy::Full, 4, 6).tint(Tint::Plain);
        let g = Grid::new(4, 6, '.');
        sink.emit(&snapshot(&g, 0)).unwrap();
        let first = sink.get_ref().len();
        sink.emit(&snapshot(&g, 1)).unwrap();
        let second = &sink.get_ref()[first..];
        assert_eq!(count(second, "│....│".as_bytes()), 6);
    }

    #[test]
    fn custom_title_lands_in_the_top_rule() {
        let mut sink = TerminalSink::new(Vec::new(), Strategy::Full, 24, 2)
            .title("Julia Field · ascii")
            .tint(Tint::Plain);
        sink.emit(&snapshot(&Grid::new(24, 2, ' '), 0)).unwrap();
        let text = String::from_utf8_lossy(sink.get_ref()).into_owned();
        assert!(text.contains("┌─  Julia Field · ascii ─┐"));
    }

    #[test]
    fn interrupt_notice_is_printed() {
        let mut sink = TerminalSink::new(Vec::new(), Strategy::Full, 4, 4);
        sink.finish(&RunReport {
            outcome: Outcome::Interrupted,
            emitted: 2,
            faulted: 0,
            render_time: std::time::Duration::ZERO,
            emit_time: std::time::Duration::ZERO,
        });
        let text = String::from_utf8_lossy(sink.get_ref()).into_owned();
        assert!(text.contains("interrupted after 2 frames"));
    }

    #[test]
    fn plain_sink_layout() {
        let mut g = Grid::new(3, 2, ' ');
        g.set(0, 0, '█');
        let mut sink = PlainSink::new(Vec::new());
        sink.emit(&snapshot(&g, 1)).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "frame 2/4 │ 3×2 │ t=0.20 │ 50.0%");
        assert_eq!(lines[1], "===");
        assert_eq!(lines[2], "█  ");
        assert_eq!(lines[3], "   ");
        assert_eq!(lines[4], "===");
        assert!(lines[5].starts_with("converged 0.0%"));
    }
}
