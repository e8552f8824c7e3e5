use super::ChartView;
use crate::session::Frame;
use crate::simulator::clock::HORIZON;
use anyhow::Context;
use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

const PLOT_WIDTH: usize = 61;
const PLOT_HEIGHT: usize = 21;
const Y_MAX: f64 = 2.5; // liters

const BASELINE_MARK: char = '*';
const ANH_MARK: char = '+';
const OVERLAP_MARK: char = '#';

/// Holds the terminal in chart mode (alternate screen, raw input, hidden
/// cursor) and restores it when dropped.
pub struct DisplayGuard {
    out: Stdout,
}

impl DisplayGuard {
    pub fn acquire() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide, cursor::MoveTo(0, 0))?;
        Ok(Self { out })
    }
}

impl Drop for DisplayGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Text line chart of both curves on shared axes.
#[derive(Debug, Default)]
pub struct TerminalChart;

impl TerminalChart {
    pub fn new() -> Self {
        Self
    }

    /// Lays out one full screen for `frame`.
    pub fn plot(&self, frame: &Frame) -> Vec<String> {
        let mut grid = vec![vec![' '; PLOT_WIDTH]; PLOT_HEIGHT];
        for sample in &frame.history {
            let col = column(sample.time);
            mark(&mut grid[row(sample.without_anh)][col], BASELINE_MARK);
            mark(&mut grid[row(sample.with_anh)][col], ANH_MARK);
        }

        let mut lines = Vec::with_capacity(PLOT_HEIGHT + 10);
        lines.push("Blood Loss Simulation".to_string());
        lines.push(format!(
            "[{}]  [{}]    s: start  g: media  q: quit",
            frame.start_label, frame.media_label
        ));
        lines.push(String::new());
        lines.push("RBC Volume (L)".to_string());

        for (i, cells) in grid.iter().enumerate() {
            let axis = if i % 5 == 0 {
                let value = Y_MAX * (1.0 - i as f64 / (PLOT_HEIGHT - 1) as f64);
                format!("{:>5.1} |", value)
            } else {
                "      |".to_string()
            };
            lines.push(format!("{}{}", axis, cells.iter().collect::<String>()));
        }

        lines.push(format!("      +{}", "-".repeat(PLOT_WIDTH)));
        let mut ticks = " ".repeat(PLOT_WIDTH + 7);
        for hour in 0..=HORIZON as usize {
            let label = format!("{:.1}", hour as f64);
            let start = (7 + column(hour as f64)).min(ticks.len() - label.len());
            ticks.replace_range(start..start + label.len(), &label);
        }
        lines.push(ticks.trim_end().to_string());
        lines.push(format!("{:>width$}", "Time (hours)", width = 7 + PLOT_WIDTH / 2 + 6));
        lines.push(String::new());
        lines.push(format!(
            "{} Without ANH   {} With ANH   {} both",
            BASELINE_MARK, ANH_MARK, OVERLAP_MARK
        ));

        if let Some(last) = frame.history.last() {
            lines.push(format!(
                "t = {:.1} h   without ANH {:.3} L   with ANH {:.3} L",
                last.time, last.without_anh, last.with_anh
            ));
        }

        if frame.media_visible {
            lines.push(String::new());
            lines.push(format!("Blood Loss Simulation GIF: {}", frame.media_asset.display()));
        }

        lines
    }
}

impl ChartView for TerminalChart {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        queue!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))
            .context("failed to clear terminal")?;
        for (i, line) in self.plot(frame).iter().enumerate() {
            queue!(out, cursor::MoveTo(0, i as u16), Print(line))?;
        }
        out.flush().context("failed to flush terminal")?;
        Ok(())
    }
}

fn column(time: f64) -> usize {
    let fraction = (time / HORIZON).clamp(0.0, 1.0);
    (fraction * (PLOT_WIDTH - 1) as f64).round() as usize
}

fn row(volume: f64) -> usize {
    let fraction = (volume / Y_MAX).clamp(0.0, 1.0);
    ((1.0 - fraction) * (PLOT_HEIGHT - 1) as f64).round() as usize
}

fn mark(cell: &mut char, symbol: char) {
    *cell = if *cell == ' ' || *cell == symbol {
        symbol
    } else {
        OVERLAP_MARK
    };
}
