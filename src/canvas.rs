//! Drawing of primitives into a pixel buffer
//!
//! Every draw call transforms its geometry into the device space, clips it
//! against the destination bounds, converts it into spans and composites source
//! pixels over each span with the blend mode of the [`Paint`].
use crate::{
    BlendMode, Color, Edge, Image, ImageMut, Mesh, ModulateShader, Path, PathEdge, Pixel, Point,
    ProxyShader, QuadMesh, Rect, Shader, Transform, TriColorShader,
    edge::{clip, clip_curve, clip_polygon},
    mesh::texture_transform,
    rasterize::{fill_convex_edges, fill_winding_edges},
    utils::round_to_int,
};
use std::fmt;

/// Describes how pixels of a primitive are produced and composited
pub struct Paint {
    /// Used when there is no shader
    pub color: Color,
    pub shader: Option<Box<dyn Shader>>,
    pub blend_mode: BlendMode,
}

impl Paint {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_shader(self, shader: impl Shader + 'static) -> Self {
        Self {
            shader: Some(Box::new(shader)),
            ..self
        }
    }

    pub fn with_blend_mode(self, blend_mode: BlendMode) -> Self {
        Self { blend_mode, ..self }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            shader: None,
            blend_mode: BlendMode::default(),
        }
    }
}

impl fmt::Debug for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paint")
            .field("color", &self.color)
            .field("shader", &self.shader.is_some())
            .field("blend_mode", &self.blend_mode)
            .finish()
    }
}

#[derive(Clone, Copy)]
enum Source<'a> {
    Solid(Pixel),
    Shaded(&'a dyn Shader),
}

/// Bind paint to the transformation, `None` if the draw must be skipped
fn paint_source<'a>(paint: &'a mut Paint, ctm: &Transform) -> Option<Source<'a>> {
    match paint.shader.as_deref_mut() {
        None => Some(Source::Solid(paint.color.into())),
        Some(shader) => {
            if !shader.set_context(ctm) {
                tracing::trace!("skipped: shader context is not invertible");
                return None;
            }
            Some(Source::Shaded(shader))
        }
    }
}

/// Composites source pixels over horizontal spans of the destination
struct Blitter<'a, I: ?Sized> {
    dst: &'a mut I,
    blend_mode: BlendMode,
    source: Source<'a>,
    // scratch row of shaded pixels reused across spans
    row: Vec<Pixel>,
}

impl<'a, I> Blitter<'a, I>
where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    /// Create blitter, `None` if the blend mode leaves destination untouched
    fn new(dst: &'a mut I, blend_mode: BlendMode, source: Source<'a>) -> Option<Self> {
        let src_alpha = match source {
            Source::Solid(pixel) => Some(pixel.alpha()),
            Source::Shaded(shader) if shader.is_opaque() => Some(255),
            Source::Shaded(_) => None,
        };
        if src_alpha.map(|alpha| blend_mode.reduce(alpha)) == Some(BlendMode::Dst) {
            tracing::trace!(?blend_mode, "skipped: blend mode is reduced to dst");
            return None;
        }
        Some(Self {
            dst,
            blend_mode,
            source,
            row: Vec::new(),
        })
    }

    /// Composite span `[left, right)` of the scanline `y`, span is clamped to the destination
    fn blit(&mut self, y: i32, left: i32, right: i32) {
        let width = self.dst.width() as i32;
        let height = self.dst.height() as i32;
        let left = left.max(0);
        let right = right.min(width);
        if y < 0 || y >= height || left >= right {
            return;
        }
        let Some(row) = self.dst.row_mut(y as usize) else {
            return;
        };
        let dst = &mut row[left as usize..right as usize];
        match self.source {
            Source::Solid(pixel) => self.blend_mode.blend_span(pixel, dst),
            Source::Shaded(shader) => {
                self.row.resize(dst.len(), Pixel::TRANSPARENT);
                shader.shade_row(left, y, &mut self.row);
                self.blend_mode.blend_row(&self.row, dst);
            }
        }
    }
}

fn device_bounds<I: Image + ?Sized>(dst: &I) -> Rect {
    Rect::from_size(dst.width(), dst.height())
}

/// Fill axis aligned rectangle
///
/// If the transformation keeps the rectangle axis aligned, it is filled directly,
/// otherwise it is filled as a convex polygon with the same result.
pub fn fill_rect<I>(dst: &mut I, ctm: &Transform, rect: Rect, paint: &mut Paint)
where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    if !ctm.is_scale_translate() {
        return fill_convex(dst, ctm, &rect.corners(), paint);
    }
    let _span = tracing::trace_span!("fill_rect", ?rect).entered();
    if rect.is_empty() {
        tracing::trace!("skipped: empty rect");
        return;
    }
    let corners = rect.corners().map(|corner| ctm.apply(corner));
    let Some(device) = Rect::from_points(&corners) else {
        return;
    };
    if !corners.iter().all(|corner| corner.is_finite()) {
        tracing::trace!("skipped: non-finite geometry");
        return;
    }
    let top = round_to_int(device.top()).max(0);
    let bottom = round_to_int(device.bottom()).min(dst.height() as i32);
    let left = round_to_int(device.left());
    let right = round_to_int(device.right());

    let blend_mode = paint.blend_mode;
    let Some(source) = paint_source(paint, ctm) else {
        return;
    };
    let Some(mut blitter) = Blitter::new(dst, blend_mode, source) else {
        return;
    };
    for y in top..bottom {
        blitter.blit(y, left, right);
    }
}

/// Fill convex polygon, last point is connected to the first one
///
/// Polygon must be convex, for arbitrary shapes use [`fill_path`].
pub fn fill_convex<I>(dst: &mut I, ctm: &Transform, points: &[Point], paint: &mut Paint)
where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    let _span = tracing::trace_span!("fill_convex", points = points.len()).entered();
    if points.len() < 3 {
        tracing::trace!("skipped: less than three points");
        return;
    }
    let device: Vec<Point> = points.iter().map(|point| ctm.apply(*point)).collect();
    if !device.iter().all(|point| point.is_finite()) {
        tracing::trace!("skipped: non-finite geometry");
        return;
    }
    let mut edges = Vec::with_capacity(device.len() + 2);
    clip_polygon(&device, &device_bounds(dst), &mut edges);
    if edges.len() < 2 {
        tracing::trace!("skipped: no visible edges");
        return;
    }

    let blend_mode = paint.blend_mode;
    let Some(source) = paint_source(paint, ctm) else {
        return;
    };
    let Some(mut blitter) = Blitter::new(dst, blend_mode, source) else {
        return;
    };
    fill_convex_edges(edges, |y, left, right| blitter.blit(y, left, right));
}

/// Fill path with the non-zero winding rule, contours are closed implicitly
pub fn fill_path<I>(dst: &mut I, ctm: &Transform, path: &Path, paint: &mut Paint)
where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    let _span = tracing::trace_span!("fill_path", points = path.count_points()).entered();
    if !path.points().iter().all(|point| ctm.apply(*point).is_finite()) {
        tracing::trace!("skipped: non-finite geometry");
        return;
    }
    let bounds = device_bounds(dst);
    let mut edges = Vec::new();
    for edge in path.edges() {
        match edge.transform(ctm) {
            PathEdge::Line(line) => {
                let [p0, p1] = line.points();
                clip(p0, p1, &bounds, &mut edges);
            }
            PathEdge::Quad(quad) => clip_curve(quad, &bounds, &mut edges),
            PathEdge::Cubic(cubic) => clip_curve(cubic, &bounds, &mut edges),
        }
    }
    if edges.len() < 2 {
        tracing::trace!("skipped: no visible edges");
        return;
    }
    tracing::trace!(edges = edges.len());

    let blend_mode = paint.blend_mode;
    let Some(source) = paint_source(paint, ctm) else {
        return;
    };
    let bottom = dst.height() as i32;
    let Some(mut blitter) = Blitter::new(dst, blend_mode, source) else {
        return;
    };
    fill_winding_edges(edges, bottom, |y, left, right| blitter.blit(y, left, right));
}

/// Fill the whole destination with the paint
pub fn fill_paint<I>(dst: &mut I, ctm: &Transform, paint: &mut Paint)
where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    let _span = tracing::trace_span!("fill_paint").entered();
    let width = dst.width() as i32;
    let height = dst.height() as i32;
    let blend_mode = paint.blend_mode;
    let Some(source) = paint_source(paint, ctm) else {
        return;
    };
    let Some(mut blitter) = Blitter::new(dst, blend_mode, source) else {
        return;
    };
    for y in 0..height {
        blitter.blit(y, 0, width);
    }
}

/// Fill triangle mesh
///
/// Vertex colors are interpolated across each triangle. Texture coordinates
/// are in the local space of the paint shader and are ignored without it.
/// When both are present, interpolated color is multiplied by the texture.
/// Without either the paint is used as is. Invalid mesh is skipped.
pub fn fill_mesh<I>(
    dst: &mut I,
    ctm: &Transform,
    vertices: &[Point],
    colors: Option<&[Color]>,
    tex_coords: Option<&[Point]>,
    indices: Option<&[usize]>,
    paint: &mut Paint,
) where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    let _span = tracing::trace_span!("fill_mesh", vertices = vertices.len()).entered();
    match Mesh::new(vertices, colors, tex_coords, indices) {
        Ok(mesh) => fill_mesh_triangles(dst, ctm, mesh, paint),
        Err(error) => tracing::trace!(%error, "skipped: invalid mesh"),
    }
}

/// Fill quad tessellated into a grid of `(level + 2) x (level + 2)` vertices
///
/// Corners and their attributes are ordered top-left, top-right, bottom-right,
/// bottom-left. Colors and texture coordinates are handled as in [`fill_mesh`].
pub fn fill_quad<I>(
    dst: &mut I,
    ctm: &Transform,
    corners: [Point; 4],
    colors: Option<[Color; 4]>,
    tex_coords: Option<[Point; 4]>,
    level: usize,
    paint: &mut Paint,
) where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    let _span = tracing::trace_span!("fill_quad", level).entered();
    let quad = QuadMesh::new(corners, colors, tex_coords, level);
    fill_mesh_triangles(dst, ctm, quad.as_mesh(), paint);
}

fn fill_mesh_triangles<I>(dst: &mut I, ctm: &Transform, mesh: Mesh<'_>, paint: &mut Paint)
where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    let bounds = device_bounds(dst);
    let blend_mode = paint.blend_mode;
    for triangle in mesh.triangles() {
        let device = triangle.vertices.map(|vertex| ctm.apply(vertex));
        if !device.iter().all(|point| point.is_finite()) {
            tracing::trace!("skipped triangle: non-finite geometry");
            continue;
        }
        let mut edges = Vec::with_capacity(6);
        clip_polygon(&device, &bounds, &mut edges);
        if edges.len() < 2 {
            continue;
        }

        let textured = triangle.tex_coords.is_some() && paint.shader.is_some();
        if triangle.colors.is_none() && !textured {
            let Some(source) = paint_source(paint, ctm) else {
                return;
            };
            if let Some(mut blitter) = Blitter::new(&mut *dst, blend_mode, source) {
                fill_convex_edges(edges, |y, left, right| blitter.blit(y, left, right));
            }
            continue;
        }

        let texture = match (triangle.tex_coords, paint.shader.as_deref_mut()) {
            (Some(tex_coords), Some(shader)) => {
                match texture_transform(triangle.vertices, tex_coords) {
                    Some(extra) => Some(ProxyShader::new(shader, extra)),
                    None => {
                        tracing::trace!("skipped triangle: degenerate texture coordinates");
                        continue;
                    }
                }
            }
            _ => None,
        };
        match (triangle.colors, texture) {
            (Some(colors), Some(texture)) => {
                let colors = TriColorShader::new(triangle.vertices, colors);
                let mut shader = ModulateShader::new(colors, texture);
                fill_shaded_edges(&mut *dst, ctm, edges, blend_mode, &mut shader);
            }
            (Some(colors), None) => {
                let mut shader = TriColorShader::new(triangle.vertices, colors);
                fill_shaded_edges(&mut *dst, ctm, edges, blend_mode, &mut shader);
            }
            (None, Some(mut texture)) => {
                fill_shaded_edges(&mut *dst, ctm, edges, blend_mode, &mut texture);
            }
            (None, None) => {}
        }
    }
}

fn fill_shaded_edges<I>(
    dst: &mut I,
    ctm: &Transform,
    edges: Vec<Edge>,
    blend_mode: BlendMode,
    shader: &mut dyn Shader,
) where
    I: ImageMut<Pixel = Pixel> + ?Sized,
{
    if !shader.set_context(ctm) {
        tracing::trace!("skipped triangle: degenerate geometry");
        return;
    }
    if let Some(mut blitter) = Blitter::new(dst, blend_mode, Source::Shaded(shader)) {
        fill_convex_edges(edges, |y, left, right| blitter.blit(y, left, right));
    }
}

/// Drawing surface with the current transformation matrix (CTM)
///
/// Transformation applies to the geometry and the shaders of all draw calls.
#[derive(Debug)]
pub struct Canvas<I> {
    dst: I,
    ctm: Transform,
    stack: Vec<Transform>,
}

impl<I> Canvas<I>
where
    I: ImageMut<Pixel = Pixel>,
{
    pub fn new(dst: I) -> Self {
        Self {
            dst,
            ctm: Transform::identity(),
            stack: Vec::new(),
        }
    }

    pub fn image(&self) -> &I {
        &self.dst
    }

    pub fn image_mut(&mut self) -> &mut I {
        &mut self.dst
    }

    pub fn into_image(self) -> I {
        self.dst
    }

    /// Current transformation matrix
    pub fn transform(&self) -> Transform {
        self.ctm
    }

    pub fn set_transform(&mut self, tr: Transform) {
        self.ctm = tr;
    }

    /// Apply `tr` before the current transformation
    pub fn concat(&mut self, tr: &Transform) {
        self.ctm = self.ctm * *tr;
    }

    /// Remember current transformation
    pub fn save(&mut self) {
        self.stack.push(self.ctm);
    }

    /// Restore transformation remembered by the matching [`Canvas::save`]
    pub fn restore(&mut self) {
        match self.stack.pop() {
            Some(ctm) => self.ctm = ctm,
            None => tracing::trace!("restore without matching save"),
        }
    }

    /// Number of saved transformations
    pub fn save_count(&self) -> usize {
        self.stack.len()
    }

    pub fn fill_rect(&mut self, rect: Rect, paint: &mut Paint) {
        fill_rect(&mut self.dst, &self.ctm, rect, paint)
    }

    pub fn fill_convex(&mut self, points: &[Point], paint: &mut Paint) {
        fill_convex(&mut self.dst, &self.ctm, points, paint)
    }

    pub fn fill_path(&mut self, path: &Path, paint: &mut Paint) {
        fill_path(&mut self.dst, &self.ctm, path, paint)
    }

    pub fn fill_paint(&mut self, paint: &mut Paint) {
        fill_paint(&mut self.dst, &self.ctm, paint)
    }

    pub fn fill_mesh(
        &mut self,
        vertices: &[Point],
        colors: Option<&[Color]>,
        tex_coords: Option<&[Point]>,
        indices: Option<&[usize]>,
        paint: &mut Paint,
    ) {
        fill_mesh(
            &mut self.dst,
            &self.ctm,
            vertices,
            colors,
            tex_coords,
            indices,
            paint,
        )
    }

    pub fn fill_quad(
        &mut self,
        corners: [Point; 4],
        colors: Option<[Color; 4]>,
        tex_coords: Option<[Point; 4]>,
        level: usize,
        paint: &mut Paint,
    ) {
        fill_quad(
            &mut self.dst,
            &self.ctm,
            corners,
            colors,
            tex_coords,
            level,
            paint,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bitmap, BitmapShader, Direction, ImageOwned, LinearGradient, Size, TileMode};

    const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    fn bitmap(width: usize, height: usize) -> Bitmap {
        ImageOwned::new_default(Size { width, height })
    }

    /// Positions of all non transparent pixels
    fn covered(image: &Bitmap) -> Vec<(usize, usize)> {
        let mut result = Vec::new();
        for row in 0..image.height() {
            for col in 0..image.width() {
                if image.get(row, col).is_some_and(|p| *p != Pixel::TRANSPARENT) {
                    result.push((row, col));
                }
            }
        }
        result
    }

    #[test]
    fn test_fill_rect_exact() {
        let mut canvas = Canvas::new(bitmap(10, 10));
        canvas.fill_rect(Rect::from_ltrb(2.0, 3.0, 5.0, 5.0), &mut Paint::new(RED));
        let expected: Vec<_> = (3..5)
            .flat_map(|row| (2..5).map(move |col| (row, col)))
            .collect();
        assert_eq!(covered(canvas.image()), expected);
        assert_eq!(canvas.image().get(3, 2), Some(&Pixel::from(RED)));
    }

    #[test]
    fn test_fill_rect_matches_convex() {
        let rects = [
            Rect::from_ltrb(2.0, 3.0, 5.0, 5.0),
            Rect::from_ltrb(1.3, 0.7, 7.6, 4.5),
            Rect::from_ltrb(-4.0, -2.0, 6.2, 30.0),
            Rect::from_ltrb(12.0, 2.0, 30.0, 4.0),
        ];
        let transforms = [
            Transform::identity(),
            Transform::new_translate(0.25, 1.5).scale(1.5, 0.5),
            Transform::new_scale(-1.0, 1.0).translate(-10.0, 0.0),
        ];
        for rect in rects {
            for tr in transforms {
                let mut fast = bitmap(16, 16);
                fill_rect(&mut fast, &tr, rect, &mut Paint::new(RED));
                let mut convex = bitmap(16, 16);
                fill_convex(&mut convex, &tr, &rect.corners(), &mut Paint::new(RED));
                assert_eq!(fast.data(), convex.data(), "{:?} {:?}", rect, tr);
            }
        }
    }

    #[test]
    fn test_fill_rect_rotated() {
        // quarter turn around the center keeps square in place
        let tr = Transform::new_translate(8.0, 8.0)
            .rotate(crate::PI / 2.0)
            .translate(-8.0, -8.0);
        let mut canvas = Canvas::new(bitmap(16, 16));
        canvas.concat(&tr);
        canvas.fill_rect(Rect::from_ltrb(4.0, 4.0, 12.0, 12.0), &mut Paint::new(RED));
        assert_eq!(covered(canvas.image()).len(), 64);
    }

    #[test]
    fn test_fill_path_winding() {
        let triangle = [
            Point::new(1.0, 1.0),
            Point::new(14.0, 2.0),
            Point::new(4.0, 13.0),
        ];
        let mut reversed = triangle;
        reversed.reverse();

        let mut single = bitmap(16, 16);
        let mut path = Path::new();
        path.add_polygon(&triangle);
        fill_path(&mut single, &Transform::identity(), &path, &mut Paint::new(RED));
        assert!(!covered(&single).is_empty());

        // opposite orientation cancels out
        let mut both = bitmap(16, 16);
        path.add_polygon(&reversed);
        fill_path(&mut both, &Transform::identity(), &path, &mut Paint::new(RED));
        assert!(covered(&both).is_empty());

        // the same as convex fill
        let mut convex = bitmap(16, 16);
        fill_convex(&mut convex, &Transform::identity(), &triangle, &mut Paint::new(RED));
        assert_eq!(single.data(), convex.data());
    }

    #[test]
    fn test_fill_path_circle() {
        let mut canvas = Canvas::new(bitmap(32, 32));
        let mut path = Path::new();
        path.add_circle(Point::new(16.0, 16.0), 10.0, Direction::Clockwise);
        // hole in the opposite direction
        path.add_circle(Point::new(16.0, 16.0), 5.0, Direction::CounterClockwise);
        canvas.fill_path(&path, &mut Paint::new(BLUE));
        let image = canvas.image();
        assert_eq!(image.get(16, 16), Some(&Pixel::TRANSPARENT));
        assert_eq!(image.get(16, 8), Some(&Pixel::from(BLUE)));
        assert_eq!(image.get(16, 3), Some(&Pixel::TRANSPARENT));
        assert_eq!(image.get(2, 2), Some(&Pixel::TRANSPARENT));
    }

    #[test]
    fn test_degenerate_geometry() {
        let mut image = bitmap(8, 8);
        let mut paint = Paint::new(RED);
        let identity = Transform::identity();
        fill_convex(&mut image, &identity, &[Point::new(0.0, 0.0), Point::new(4.0, 4.0)], &mut paint);
        let nan = Point::new(f64::NAN, 1.0);
        fill_convex(
            &mut image,
            &identity,
            &[Point::new(0.0, 0.0), nan, Point::new(4.0, 4.0)],
            &mut paint,
        );
        let mut path = Path::new();
        path.move_to((0.0, 0.0))
            .line_to((f64::INFINITY, 3.0))
            .line_to((0.0, 5.0));
        fill_path(&mut image, &identity, &path, &mut paint);
        fill_rect(&mut image, &identity, Rect::from_ltrb(1.0, 1.0, 1.0, 5.0), &mut paint);
        assert!(covered(&image).is_empty());
    }

    #[test]
    fn test_blend_mode() {
        let mut canvas = Canvas::new(bitmap(4, 1));
        canvas.fill_paint(&mut Paint::new(RED));
        assert!(canvas.image().iter().all(|p| *p == Pixel::from(RED)));

        // transparent source over is skipped
        canvas.fill_paint(&mut Paint::new(Color::TRANSPARENT));
        assert!(canvas.image().iter().all(|p| *p == Pixel::from(RED)));

        let mut clear = Paint::new(BLUE).with_blend_mode(BlendMode::Clear);
        canvas.fill_rect(Rect::from_ltrb(0.0, 0.0, 2.0, 1.0), &mut clear);
        assert_eq!(canvas.image().get(0, 1), Some(&Pixel::TRANSPARENT));
        assert_eq!(canvas.image().get(0, 2), Some(&Pixel::from(RED)));

        let mut dst_over = Paint::new(BLUE).with_blend_mode(BlendMode::DstOver);
        canvas.fill_paint(&mut dst_over);
        assert_eq!(canvas.image().get(0, 0), Some(&Pixel::from(BLUE)));
        assert_eq!(canvas.image().get(0, 3), Some(&Pixel::from(RED)));
    }

    #[test]
    fn test_shader_paint() {
        let mut canvas = Canvas::new(bitmap(16, 2));
        let grad = LinearGradient::new((0.5, 0.0), (8.5, 0.0), &[RED, BLUE][..], TileMode::Repeat);
        canvas.fill_paint(&mut Paint::default().with_shader(grad));
        let image = canvas.image();
        assert_eq!(image.get(1, 0), Some(&Pixel::from(RED)));
        assert_eq!(image.get(1, 8), Some(&Pixel::from(RED)));
        assert!(image.get(0, 7).is_some_and(|p| p.blue() > 200));

        // shader with non-invertible context is skipped
        let grad = LinearGradient::new((0.0, 0.0), (1.0, 0.0), &[BLUE, BLUE][..], TileMode::Clamp);
        let mut canvas = Canvas::new(bitmap(4, 4));
        canvas.concat(&Transform::new_scale(0.0, 1.0));
        canvas.fill_paint(&mut Paint::default().with_shader(grad));
        assert!(covered(canvas.image()).is_empty());
    }

    #[test]
    fn test_save_restore() {
        let mut canvas = Canvas::new(bitmap(8, 8));
        canvas.save();
        canvas.concat(&Transform::new_translate(4.0, 4.0));
        assert_eq!(canvas.save_count(), 1);
        canvas.fill_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0), &mut Paint::new(RED));
        canvas.restore();
        canvas.restore();
        assert_eq!(canvas.save_count(), 0);
        assert_eq!(canvas.transform(), Transform::identity());
        canvas.fill_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0), &mut Paint::new(RED));
        assert_eq!(covered(canvas.image()), vec![(0, 0), (4, 4)]);
    }

    #[test]
    fn test_fill_mesh_colors() {
        let mut canvas = Canvas::new(bitmap(8, 8));
        let vertices = [
            Point::new(0.0, 0.0),
            Point::new(8.0, 0.0),
            Point::new(0.0, 8.0),
            Point::new(8.0, 8.0),
        ];
        let colors = [RED, RED, RED, RED];
        canvas.fill_mesh(
            &vertices,
            Some(&colors),
            None,
            Some(&[0, 1, 2, 1, 3, 2]),
            &mut Paint::default(),
        );
        assert!(canvas.image().iter().all(|p| *p == Pixel::from(RED)));

        // out of range index is skipped
        let mut canvas = Canvas::new(bitmap(8, 8));
        canvas.fill_mesh(&vertices, None, None, Some(&[0, 1, 7]), &mut Paint::new(RED));
        assert!(covered(canvas.image()).is_empty());

        // without attributes the paint is used
        canvas.fill_mesh(&vertices[..3], None, None, None, &mut Paint::new(BLUE));
        assert_eq!(canvas.image().get(1, 1), Some(&Pixel::from(BLUE)));
        assert_eq!(canvas.image().get(7, 7), Some(&Pixel::TRANSPARENT));
    }

    #[test]
    fn test_fill_quad_textured() {
        // 2x2 texture: red, blue / blue, red
        let texture = ImageOwned::new_with(
            Size {
                width: 2,
                height: 2,
            },
            |row, col| {
                if row == col {
                    Pixel::from(RED)
                } else {
                    Pixel::from(BLUE)
                }
            },
        );
        let shader = BitmapShader::new(texture, Transform::identity(), TileMode::Clamp);
        let mut paint = Paint::default().with_shader(shader);
        let mut canvas = Canvas::new(bitmap(8, 8));
        let corners = Rect::from_ltrb(0.0, 0.0, 8.0, 8.0).corners();
        let tex_coords = Rect::from_ltrb(0.0, 0.0, 2.0, 2.0).corners();
        canvas.fill_quad(corners, None, Some(tex_coords), 1, &mut paint);
        let image = canvas.image();
        assert_eq!(image.get(1, 1), Some(&Pixel::from(RED)));
        assert_eq!(image.get(1, 6), Some(&Pixel::from(BLUE)));
        assert_eq!(image.get(6, 1), Some(&Pixel::from(BLUE)));
        assert_eq!(image.get(6, 6), Some(&Pixel::from(RED)));

        // modulated by half transparent white
        let white = Color::new(1.0, 1.0, 1.0, 0.6);
        let mut canvas = Canvas::new(bitmap(8, 8));
        canvas.fill_quad(corners, Some([white; 4]), Some(tex_coords), 0, &mut paint);
        assert_eq!(canvas.image().get(1, 1), Some(&Pixel::pack_argb(153, 153, 0, 0)));
    }
}
