//! Image drawing and pixel access.

use super::CanvasRenderingContext2D;
use crate::raster::image::{Image, ImageData};
use crate::style::BlendMode;
use crate::util::all_finite;

impl CanvasRenderingContext2D {
    /// Draw an image at its natural size.
    pub fn draw_image(&mut self, image: &Image, dx: f32, dy: f32) {
        self.draw_image_with_size(image, dx, dy, image.width() as f32, image.height() as f32);
    }

    /// Draw an image scaled into the destination rectangle.
    pub fn draw_image_with_size(&mut self, image: &Image, dx: f32, dy: f32, dw: f32, dh: f32) {
        self.draw_image_sub_rect(
            image,
            0.0,
            0.0,
            image.width() as f32,
            image.height() as f32,
            dx,
            dy,
            dw,
            dh,
        );
    }

    /// Draw a source sub-rectangle of an image scaled into the
    /// destination rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_image_sub_rect(
        &mut self,
        image: &Image,
        sx: f32,
        sy: f32,
        sw: f32,
        sh: f32,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) {
        if !all_finite(&[sx, sy, sw, sh, dx, dy, dw, dh]) {
            return;
        }
        log::debug!(target: "canvas", "drawImage {} {} {} {}", dx, dy, dw, dh);
        self.canvas.draw_image_rect(
            image,
            Some((sx, sy, sw, sh)),
            (dx, dy, dw, dh),
            self.state.global_alpha,
            self.state.blend_mode,
        );
    }

    /// A transparent-black pixel buffer of the given size.
    pub fn create_image_data(&self, width: u32, height: u32) -> ImageData {
        ImageData::new(width, height)
    }

    /// A transparent-black buffer with another buffer's dimensions.
    pub fn create_image_data_like(&self, other: &ImageData) -> ImageData {
        ImageData::new(other.width, other.height)
    }

    /// Read back a device-space rectangle as unpremultiplied RGBA.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Option<ImageData> {
        let data = self.canvas.read_pixels(x, y, width, height)?;
        Some(ImageData {
            data,
            width,
            height,
        })
    }

    /// Write a pixel buffer at `(x, y)` in device space.
    pub fn put_image_data(&mut self, image_data: &ImageData, x: f32, y: f32) {
        self.put_image_data_dirty(
            image_data,
            x,
            y,
            0.0,
            0.0,
            image_data.width as f32,
            image_data.height as f32,
        );
    }

    /// Write a sub-rectangle of a pixel buffer at `(x, y)` in device
    /// space, normalising the dirty rectangle as the contract specifies:
    /// <https://html.spec.whatwg.org/multipage/canvas.html#dom-context-2d-putimagedata>
    #[allow(clippy::too_many_arguments)]
    pub fn put_image_data_dirty(
        &mut self,
        image_data: &ImageData,
        x: f32,
        y: f32,
        mut dirty_x: f32,
        mut dirty_y: f32,
        mut dirty_width: f32,
        mut dirty_height: f32,
    ) {
        if !all_finite(&[x, y, dirty_x, dirty_y, dirty_width, dirty_height]) {
            return;
        }
        if dirty_width < 0.0 {
            dirty_x += dirty_width;
            dirty_width = dirty_width.abs();
        }
        if dirty_height < 0.0 {
            dirty_y += dirty_height;
            dirty_height = dirty_height.abs();
        }
        if dirty_x < 0.0 {
            dirty_width += dirty_x;
            dirty_x = 0.0;
        }
        if dirty_y < 0.0 {
            dirty_height += dirty_y;
            dirty_y = 0.0;
        }
        if dirty_width <= 0.0 || dirty_height <= 0.0 {
            return;
        }

        let Ok(image) = Image::from_rgba(&image_data.data, image_data.width, image_data.height)
        else {
            return;
        };

        // placement is device-space: undo the CTM around the blit
        self.canvas.save();
        if let Some(inverted) = self.state.transform.invert() {
            self.canvas.concat(&inverted);
        }
        self.canvas.draw_image_rect(
            &image,
            Some((dirty_x, dirty_y, dirty_width, dirty_height)),
            (x + dirty_x, y + dirty_y, dirty_width, dirty_height),
            1.0,
            BlendMode::SourceOver,
        );
        self.canvas.restore();
    }
}
