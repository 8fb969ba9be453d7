//! Temperature sparkline widget for the hourly strip

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different temperatures (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline showing one block per hourly slot
///
/// Values are scaled between their own minimum and maximum, so the curve
/// keeps its shape in either temperature unit. Each value is centered in an
/// equal share of the area width, lining up with the hourly columns above.
pub struct TemperatureSparkline<'a> {
    temperatures: &'a [i32],
    /// Slot drawn with the highlight style
    highlight: Option<usize>,
    style: Style,
    highlight_style: Style,
}

impl<'a> TemperatureSparkline<'a> {
    pub fn new(temperatures: &'a [i32]) -> Self {
        Self {
            temperatures,
            highlight: None,
            style: Style::default().fg(Color::Yellow),
            highlight_style: Style::default().fg(Color::Red),
        }
    }

    /// Highlights the slot at `index` (the day's peak, for instance)
    pub fn highlight(mut self, index: usize) -> Self {
        self.highlight = Some(index);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn temperature_to_block(&self, value: i32) -> char {
        let min = self.temperatures.iter().copied().min().unwrap_or(value);
        let max = self.temperatures.iter().copied().max().unwrap_or(value);
        if max == min {
            return BLOCKS[3];
        }
        let normalized = ((value - min) as f64 / (max - min) as f64).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TemperatureSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.temperatures.is_empty() {
            return;
        }

        let slot_width = area.width / self.temperatures.len() as u16;
        if slot_width == 0 {
            return;
        }

        for (i, value) in self.temperatures.iter().enumerate() {
            let block = self.temperature_to_block(*value);
            let x = area.x + i as u16 * slot_width + slot_width / 2;
            let y = area.y;

            let style = if self.highlight == Some(i) {
                self.highlight_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}
