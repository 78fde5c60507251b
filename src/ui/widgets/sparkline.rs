//! Mini sparkline widget for inline metrics

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

const BAR_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A compact inline sparkline (single line), scaled to the data's maximum
pub struct MiniSparkline<'a> {
    data: &'a [u64],
    style: Style,
}

impl<'a> MiniSparkline<'a> {
    pub fn new(data: &'a [u64]) -> Self {
        Self {
            data,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl<'a> Widget for MiniSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.data.is_empty() {
            return;
        }

        let max = self.data.iter().copied().max().unwrap_or(1).max(1);

        // Take the last N values that fit in the area
        let data_len = self.data.len().min(area.width as usize);
        let data_start = self.data.len().saturating_sub(data_len);

        for (i, &value) in self.data[data_start..].iter().enumerate() {
            let x = area.x + i as u16;
            let scaled = ((value as f64 / max as f64) * 7.0).round() as usize;
            buf.get_mut(x, area.y)
                .set_char(BAR_CHARS[scaled.min(7)])
                .set_style(self.style);
        }
    }
}
