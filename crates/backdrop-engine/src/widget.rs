//! Presents a [`PixelCanvas`] in the terminal with half-block cells.

use ratatui::{buffer::Buffer, layout::Rect as Area, widgets::Widget};

use crate::surface::PixelCanvas;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '\u{2580}';

impl Widget for &PixelCanvas {
    fn render(self, area: Area, buf: &mut Buffer) {
        let cols = area.width.min(u16::try_from(self.pixel_width()).unwrap_or(u16::MAX));
        let rows = area.height.min(u16::try_from(self.pixel_height() / 2).unwrap_or(u16::MAX));

        for row in 0..rows {
            let top_y = u32::from(row) * 2;
            for col in 0..cols {
                let x = u32::from(col);
                let (Some(top), Some(bottom)) = (self.pixel(x, top_y), self.pixel(x, top_y + 1))
                else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(top.to_color())
                        .set_bg(bottom.to_color());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::surface::{Paint, Rect, Surface};
    use backdrop_core::Rgba;
    use ratatui::style::Color;

    #[test]
    fn test_cell_carries_both_pixels() {
        let mut canvas = PixelCanvas::new(2, 4);
        canvas.fill_rect(Rect::new(0.0, 0.0, 2.0, 1.0), &Paint::Solid(Rgba::WHITE));
        let area = Area::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "\u{2580}");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(1, 1)].fg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_smaller_canvas_leaves_rest_untouched() {
        let mut canvas = PixelCanvas::new(1, 2);
        canvas.fill_circle(Vec2::new(0.5, 0.5), 1.0, Rgba::WHITE);
        let area = Area::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "\u{2580}");
        assert_eq!(buf[(2, 2)].symbol(), " ");
    }
}
