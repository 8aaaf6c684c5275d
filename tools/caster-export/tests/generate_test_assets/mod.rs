//! Test asset generators for integration tests.

use image::{ImageFormat, RgbaImage};
use std::io::Result;
use std::path::Path;

/// Unit cube: 8 positions, 4 uvs, 12 triangles.
/// Uses mixed whitespace, comments and normal indices the way exporters write them.
pub const CUBE_OBJ: &str = "\
# cube exported for tests
o Cube
v 1.0 1.0 -1.0
v 1.0 -1.0 -1.0
v 1.0 1.0 1.0
v 1.0 -1.0 1.0
v -1.0 1.0 -1.0
v -1.0 -1.0 -1.0
v -1.0 1.0 1.0
v -1.0 -1.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 1.0 0.0
s off
f 5/1/1 3/2/1 1/3/1
f 3/1/1 8/2/1 4/3/1
f 7/1/1 6/2/1 8/3/1
f 2/1/1 8/2/1 6/3/1
f 1/1/1 4/2/1 2/3/1
f 5/1/1 2/2/1 6/3/1
f\t5/1/1\t7/4/1\t3/2/1
f 3/1/1  7/4/1  8/2/1
f 7/1/1 5/4/1 6/2/1
f 2/1/1 4/4/1 8/2/1
f 1/1/1 3/4/1 4/2/1
f 5/1/1 1/4/1 2/2/1
";

/// Single textured triangle
pub const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0.25\nf 1/1 2/1 3/1\n";

/// Generate the cube OBJ
pub fn generate_cube_obj(path: &Path) -> Result<()> {
    std::fs::write(path, CUBE_OBJ)
}

/// Generate the single-triangle OBJ
pub fn generate_triangle_obj(path: &Path) -> Result<()> {
    std::fs::write(path, TRIANGLE_OBJ)
}

/// Generate a 4x4 checkerboard PNG (opaque white / transparent black)
pub fn generate_checkerboard_png(path: &Path) -> image::ImageResult<()> {
    let img = RgbaImage::from_fn(4, 4, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    img.save_with_format(path, ImageFormat::Png)
}
