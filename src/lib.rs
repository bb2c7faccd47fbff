//! Software 2D rendering core: scan conversion and Porter-Duff compositing.
//!
//! Main features:
//!  - Convex polygon and non-zero winding path fill with curve flattening
//!  - Porter-Duff blend modes with source alpha fast paths
//!  - Solid, gradient, bitmap and triangle mesh shaders
//!  - SVG path parsing and generation
//!

mod blend;
pub mod canvas;
mod color;
mod curve;
pub mod edge;
mod geometry;
mod grad;
mod image;
mod mesh;
mod path;
mod pattern;
pub mod rasterize;
mod shader;
mod svg;
mod utils;

pub use blend::{BlendMode, BlendModeError, BlendProc, div255, modulate};
pub use canvas::{Canvas, Paint};
pub use color::{Color, ColorError, Pixel};
pub use curve::{Cubic, Curve, CurveFlattenIter, FLATTEN_TOLERANCE, Line, MAX_SEGMENTS, Quad};
pub use edge::Edge;
pub use geometry::{EPSILON, PI, Point, Rect, Scalar, Transform, scalar_fmt};
pub use grad::{GradStop, GradStops, LinearGradient, RadialGradient};
pub use image::{
    Bitmap, Image, ImageIter, ImageMut, ImageMutRef, ImageOwned, ImageRef, Shape, Size,
};
pub use mesh::{
    Mesh, MeshError, MeshTriangle, ModulateShader, QuadMesh, TriColorShader, texture_transform,
};
pub use path::{
    Direction, LineCap, Path, PathEdge, PathEdgeIter, Verb, chop_cubic_at, chop_quad_at,
};
pub use pattern::{BilerpShader, BitmapShader};
pub use shader::{ColorShader, ProxyShader, Shader, TileMode};
pub use svg::{SvgParserError, SvgPathCmd, SvgPathParser};
