// Software surface: an RGBA byte buffer the size of the canvas. Circles are
// rasterized by testing pixel centres against the radius and blended
// source-over, and the finished frame goes to the canvas with putImageData.

use crate::color::Color;
use crate::renderer::Surface;
use std::convert::Infallible;
use vecmath::Vector2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

pub struct PixelSurface {
    width: u32,
    height: u32,
    pixel_data: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> PixelSurface {
        PixelSurface {
            width,
            height,
            pixel_data: vec![0x00; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    // Reallocates only when the size actually changes
    pub fn resize(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height {
            *self = PixelSurface::new(width, height);
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.get_pixel_index(x, y).map(|idx| Color {
            r: self.pixel_data[idx],
            g: self.pixel_data[idx + 1],
            b: self.pixel_data[idx + 2],
            a: self.pixel_data[idx + 3],
        })
    }

    pub fn blit(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        let image_data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&self.pixel_data[..]),
            self.width,
            self.height,
        )?;

        ctx.put_image_data(&image_data, 0.0, 0.0)
    }

    fn get_pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(mut dst) = self.get_pixel(x, y) {
            dst.blend_over(color);
            if let Some(idx) = self.get_pixel_index(x, y) {
                self.pixel_data[idx] = dst.r;
                self.pixel_data[idx + 1] = dst.g;
                self.pixel_data[idx + 2] = dst.b;
                self.pixel_data[idx + 3] = dst.a;
            }
        }
    }
}

impl Surface for PixelSurface {
    type Error = Infallible;

    // The buffer always spans the whole surface, so the requested area is ignored
    fn clear(&mut self, _width: f32, _height: f32) -> Result<(), Infallible> {
        for byte in self.pixel_data.iter_mut() {
            *byte = 0x00;
        }
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f32>,
        radius: f32,
        color: Color,
    ) -> Result<(), Infallible> {
        if radius <= 0.0 || color.a == 0 {
            return Ok(());
        }
        let [cx, cy] = center;
        let min_x = (cx - radius).floor() as i32;
        let max_x = (cx + radius).ceil() as i32;
        let min_y = (cy - radius).floor() as i32;
        let max_y = (cy + radius).ceil() as i32;
        let radius_sq = radius * radius;

        for pixel_y in min_y..=max_y {
            let dy = pixel_y as f32 + 0.5 - cy;
            for pixel_x in min_x..=max_x {
                let dx = pixel_x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(pixel_x, pixel_y, color);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::LIGHT_PALETTE;

    #[test]
    fn circle_covers_centre_but_not_corners() {
        let mut surface = PixelSurface::new(20, 20);
        surface.fill_circle([10.0, 10.0], 3.0, LIGHT_PALETTE[0]).unwrap();

        assert_eq!(surface.get_pixel(10, 10), Some(LIGHT_PALETTE[0]));
        assert_eq!(surface.get_pixel(9, 9), Some(LIGHT_PALETTE[0]));
        assert_eq!(surface.get_pixel(13, 13), Some(Color::from_u32(0)));
        assert_eq!(surface.get_pixel(0, 0), Some(Color::from_u32(0)));
    }

    #[test]
    fn circles_hanging_off_the_edge_are_cropped() {
        let mut surface = PixelSurface::new(8, 8);
        surface.fill_circle([0.0, 0.0], 4.0, LIGHT_PALETTE[1]).unwrap();
        surface.fill_circle([8.0, 8.0], 4.0, LIGHT_PALETTE[2]).unwrap();

        assert_eq!(surface.get_pixel(0, 0), Some(LIGHT_PALETTE[1]));
        assert_eq!(surface.get_pixel(7, 7), Some(LIGHT_PALETTE[2]));
        assert_eq!(surface.get_pixel(-1, 0), None);
        assert_eq!(surface.pixel_data().len(), 8 * 8 * 4);
    }

    #[test]
    fn translucent_fill_blends_and_clear_wipes() {
        let mut surface = PixelSurface::new(4, 4);
        let half = LIGHT_PALETTE[0].with_opacity(0.5);
        surface.fill_circle([2.0, 2.0], 1.0, half).unwrap();
        assert_eq!(surface.get_pixel(1, 1).map(|c| c.a), Some(127));

        surface.fill_circle([2.0, 2.0], 1.0, half).unwrap();
        let stacked = surface.get_pixel(1, 1).map(|c| c.a).unwrap_or(0);
        assert!(stacked > 127);

        surface.clear(4.0, 4.0).unwrap();
        assert!(surface.pixel_data().iter().all(|b| *b == 0));
    }

    #[test]
    fn resize_reallocates_only_on_change() {
        let mut surface = PixelSurface::new(4, 4);
        surface.fill_circle([2.0, 2.0], 2.0, LIGHT_PALETTE[0]).unwrap();

        surface.resize(4, 4);
        assert_eq!(surface.get_pixel(2, 2), Some(LIGHT_PALETTE[0]));

        surface.resize(6, 2);
        assert_eq!((surface.width(), surface.height()), (6, 2));
        assert!(surface.pixel_data().iter().all(|b| *b == 0));
    }

    #[test]
    fn last_pixel_of_a_wide_buffer_ends_the_data() {
        let mut surface = PixelSurface::new(70_000, 3);
        assert_eq!(surface.pixel_data().len(), 70_000 * 3 * 4);

        surface.blend_pixel(69_999, 2, LIGHT_PALETTE[3]);
        let tail = &surface.pixel_data()[surface.pixel_data().len() - 4..];
        let c = LIGHT_PALETTE[3];
        assert_eq!(tail, &[c.r, c.g, c.b, c.a][..]);

        assert_eq!(surface.get_pixel(70_000, 0), None);
        assert_eq!(surface.get_pixel(0, 3), None);
        assert_eq!(surface.get_pixel(-1, -1), None);
    }
}
