//! The host surface: owns a drawing context and exposes the engine
//! factories application code expects to find next to it.

use crate::context::CanvasRenderingContext2D;
use crate::error::CanvasResult;
use crate::path2d::Path2D;
use crate::raster::image::Image;

/// A drawable surface with a 2D context.
///
/// The surface owns the context (and through it the pixel buffer); the
/// context is created once per surface and dropped with it.
pub struct HtmlCanvas {
    context: CanvasRenderingContext2D,
}

impl HtmlCanvas {
    /// A surface backed by the system font database.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::with_font_db(width, height, db)
    }

    /// A surface with a caller-supplied font database (headless and
    /// deterministic use).
    pub fn with_font_db(width: u32, height: u32, db: fontdb::Database) -> CanvasResult<Self> {
        Ok(Self {
            context: CanvasRenderingContext2D::new(width, height, db)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.context.width()
    }

    pub fn height(&self) -> u32 {
        self.context.height()
    }

    /// The 2D drawing context for this surface.
    pub fn get_context(&mut self) -> &mut CanvasRenderingContext2D {
        &mut self.context
    }

    /// Decode encoded image bytes into a drawable image. A decode
    /// failure is a reported, recoverable result.
    pub fn decode_image(&self, data: &[u8]) -> CanvasResult<Image> {
        Image::decode(data)
    }

    /// Register a typeface. It becomes matchable through the font
    /// database by the family/style/weight descriptors carried in the
    /// font file.
    pub fn load_font(&mut self, data: Vec<u8>) {
        self.context.font_system.db_mut().load_font_data(data);
    }

    /// A fresh reusable path.
    pub fn make_path2d(&self) -> Path2D {
        Path2D::new()
    }

    /// Encode the surface contents to PNG.
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        self.context.canvas.encode_png()
    }
}
