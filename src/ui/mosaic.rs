use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Terminal stand-in for a pixelated picture. Colors are derived from the
/// image id so each level has its own recognisable pattern, and shrinking
/// the block size refines the same picture instead of replacing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mosaic {
    seed: u32,
    block: u16,
}

impl Mosaic {
    /// `pixel_size` is the obscuring block size of the current attempt
    pub fn new(image_id: u32, pixel_size: u16) -> Self {
        Self {
            seed: image_id,
            block: cells_per_block(pixel_size),
        }
    }

    pub fn unblurred(image_id: u32) -> Self {
        Self {
            seed: image_id,
            block: 1,
        }
    }

    pub fn block(&self) -> u16 {
        self.block
    }

    /// Color of the underlying picture at cell offset (x, y)
    pub fn color_at(&self, x: u16, y: u16) -> Color {
        let phase = f64::from(self.seed % 360).to_radians();
        let fx = 0.11 + f64::from(self.seed % 7) * 0.03;
        let fy = 0.17 + f64::from(self.seed % 5) * 0.04;
        let (x, y) = (f64::from(x), f64::from(y));

        let channel = |offset: f64| {
            let wave = ((x * fx + y * fy * 0.5 + phase + offset).sin()
                + (y * fy - x * fx * 0.3 + phase * 2.0 + offset).cos())
                / 2.0;
            (127.5 + wave * 127.5).round().clamp(0.0, 255.0) as u8
        };

        Color::Rgb(channel(0.0), channel(2.1), channel(4.2))
    }
}

/// Scale browser pixel sizes to terminal cells
pub fn cells_per_block(pixel_size: u16) -> u16 {
    (pixel_size / 5).max(1)
}

impl Widget for Mosaic {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for dy in 0..area.height {
            for dx in 0..area.width {
                // sample each block at its top-left corner
                let sx = dx - dx % self.block;
                let sy = dy - dy % self.block;
                let color = self.color_at(sx, sy);
                if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }
}
