//! Triangle meshes with per vertex colors and texture coordinates
use crate::{
    Color, Pixel, Point, ProxyShader, Scalar, Shader, Transform, blend::modulate,
    shader::row_start,
};
use std::fmt;

/// Single triangle of a mesh with its optional attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTriangle {
    pub vertices: [Point; 3],
    pub colors: Option<[Color; 3]>,
    pub tex_coords: Option<[Point; 3]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Index references vertex that does not exist
    IndexOutOfRange { index: usize, count: usize },
    /// Attribute is provided for fewer vertices than there are
    AttributeCount {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::IndexOutOfRange { index, count } => {
                write!(f, "mesh index {} is out of range of {} vertices", index, count)
            }
            MeshError::AttributeCount {
                name,
                expected,
                actual,
            } => write!(
                f,
                "mesh has {} vertices but {} {} are provided",
                expected, actual, name
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// Borrowed mesh description
///
/// Without indices every three consecutive vertices form a triangle, otherwise
/// every three consecutive indices do. Trailing vertices or indices that do not
/// form a complete triangle are ignored.
#[derive(Debug, Clone, Copy)]
pub struct Mesh<'a> {
    vertices: &'a [Point],
    colors: Option<&'a [Color]>,
    tex_coords: Option<&'a [Point]>,
    indices: Option<&'a [usize]>,
}

impl<'a> Mesh<'a> {
    pub fn new(
        vertices: &'a [Point],
        colors: Option<&'a [Color]>,
        tex_coords: Option<&'a [Point]>,
        indices: Option<&'a [usize]>,
    ) -> Result<Self, MeshError> {
        let count = vertices.len();
        if let Some(colors) = colors {
            if colors.len() < count {
                return Err(MeshError::AttributeCount {
                    name: "colors",
                    expected: count,
                    actual: colors.len(),
                });
            }
        }
        if let Some(tex_coords) = tex_coords {
            if tex_coords.len() < count {
                return Err(MeshError::AttributeCount {
                    name: "texture coordinates",
                    expected: count,
                    actual: tex_coords.len(),
                });
            }
        }
        if let Some(index) = indices.into_iter().flatten().find(|index| **index >= count) {
            return Err(MeshError::IndexOutOfRange {
                index: *index,
                count,
            });
        }
        Ok(Self {
            vertices,
            colors,
            tex_coords,
            indices,
        })
    }

    pub fn triangles_count(&self) -> usize {
        match self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 3,
        }
    }

    fn triangle(&self, index: usize) -> MeshTriangle {
        let ids = match self.indices {
            Some(indices) => [indices[3 * index], indices[3 * index + 1], indices[3 * index + 2]],
            None => [3 * index, 3 * index + 1, 3 * index + 2],
        };
        MeshTriangle {
            vertices: ids.map(|id| self.vertices[id]),
            colors: self.colors.map(|colors| ids.map(|id| colors[id])),
            tex_coords: self.tex_coords.map(|tex_coords| ids.map(|id| tex_coords[id])),
        }
    }

    /// Iterator over all complete triangles of the mesh
    pub fn triangles(&self) -> impl Iterator<Item = MeshTriangle> + '_ {
        (0..self.triangles_count()).map(|index| self.triangle(index))
    }
}

/// Mesh produced by tessellation of a quad
#[derive(Debug, Clone)]
pub struct QuadMesh {
    pub vertices: Vec<Point>,
    pub colors: Option<Vec<Color>>,
    pub tex_coords: Option<Vec<Point>>,
    pub indices: Vec<usize>,
}

impl QuadMesh {
    /// Tessellate quad into `(level + 2) x (level + 2)` grid of vertices
    ///
    /// Corners are ordered top-left, top-right, bottom-right, bottom-left,
    /// attributes are interpolated linearly along both sides of the grid.
    pub fn new(
        corners: [Point; 4],
        colors: Option<[Color; 4]>,
        tex_coords: Option<[Point; 4]>,
        level: usize,
    ) -> Self {
        let divisions = level + 2;
        let vertices = quad_grid(corners, divisions, |p0, p1, t| p0.lerp(p1, t));
        let colors = colors.map(|colors| {
            quad_grid(colors, divisions, |c0, c1, t| c0.lerp(c1, t as f32))
        });
        let tex_coords =
            tex_coords.map(|tex_coords| quad_grid(tex_coords, divisions, |p0, p1, t| p0.lerp(p1, t)));

        let cells = divisions - 1;
        let mut indices = Vec::with_capacity(6 * cells * cells);
        for row in 0..cells {
            for col in 0..cells {
                let tl = row * divisions + col;
                let tr = tl + 1;
                let bl = tl + divisions;
                let br = bl + 1;
                indices.extend_from_slice(&[tl, tr, bl, tr, br, bl]);
            }
        }

        Self {
            vertices,
            colors,
            tex_coords,
            indices,
        }
    }

    pub fn as_mesh(&self) -> Mesh<'_> {
        Mesh {
            vertices: &self.vertices,
            colors: self.colors.as_deref(),
            tex_coords: self.tex_coords.as_deref(),
            indices: Some(self.indices.as_slice()),
        }
    }
}

/// Values at the nodes of `divisions x divisions` grid, in row major order
fn quad_grid<T: Copy>(
    corners: [T; 4],
    divisions: usize,
    lerp: impl Fn(T, T, Scalar) -> T,
) -> Vec<T> {
    let [tl, tr, br, bl] = corners;
    let step = 1.0 / (divisions - 1) as Scalar;
    let mut values = Vec::with_capacity(divisions * divisions);
    for row in 0..divisions {
        let t = row as Scalar * step;
        let left = lerp(tl, bl, t);
        let right = lerp(tr, br, t);
        for col in 0..divisions {
            values.push(lerp(left, right, col as Scalar * step));
        }
    }
    values
}

/// Transformation from the texture space onto the local space of the triangle
///
/// `[v2 - v0 | v1 - v0 | v0] * inverse([t2 - t0 | t1 - t0 | t0])`, `None` if
/// texture coordinates are degenerate.
pub fn texture_transform(vertices: [Point; 3], tex_coords: [Point; 3]) -> Option<Transform> {
    let [v0, v1, v2] = vertices;
    let [t0, t1, t2] = tex_coords;
    let tex = Transform::from_basis(t2 - t0, t1 - t0, t0).invert()?;
    Some(Transform::from_basis(v2 - v0, v1 - v0, v0) * tex)
}

/// Shader interpolating colors of the triangle vertices
#[derive(Debug, Clone)]
pub struct TriColorShader {
    vertices: [Point; 3],
    colors: [Color; 3],
    // device space onto `(u, v)` weights of the third and the second vertices
    inverse: Transform,
}

impl TriColorShader {
    pub fn new(vertices: [Point; 3], colors: [Color; 3]) -> Self {
        Self {
            vertices,
            colors,
            inverse: Transform::identity(),
        }
    }

    /// Weights are kept in `Scalar` so a uniform triangle packs exactly as its color
    #[inline]
    fn color_at(&self, point: Point) -> Color {
        let [c0, c1, c2] = self.colors;
        let u = point.x();
        let v = point.y();
        let w = 1.0 - u - v;
        let mix = |a: f32, b: f32, c: f32| {
            (a as Scalar * w + b as Scalar * v + c as Scalar * u) as f32
        };
        Color::new(
            mix(c0.r, c1.r, c2.r),
            mix(c0.g, c1.g, c2.g),
            mix(c0.b, c1.b, c2.b),
            mix(c0.a, c1.a, c2.a),
        )
    }
}

impl Shader for TriColorShader {
    fn is_opaque(&self) -> bool {
        self.colors.iter().all(|color| color.is_opaque())
    }

    fn set_context(&mut self, ctm: &Transform) -> bool {
        let [p0, p1, p2] = self.vertices.map(|vertex| ctm.apply(vertex));
        match Transform::from_basis(p2 - p0, p1 - p0, p0).invert() {
            Some(inverse) => {
                self.inverse = inverse;
                true
            }
            None => false,
        }
    }

    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        let (mut point, step) = row_start(&self.inverse, x, y);
        for pixel in row.iter_mut() {
            *pixel = self.color_at(point).into();
            point = point + step;
        }
    }
}

/// Shader multiplying interpolated vertex colors with the texture
pub struct ModulateShader<'a> {
    colors: TriColorShader,
    texture: ProxyShader<'a>,
}

impl<'a> ModulateShader<'a> {
    pub fn new(colors: TriColorShader, texture: ProxyShader<'a>) -> Self {
        Self { colors, texture }
    }
}

impl Shader for ModulateShader<'_> {
    fn is_opaque(&self) -> bool {
        self.colors.is_opaque() && self.texture.is_opaque()
    }

    fn set_context(&mut self, ctm: &Transform) -> bool {
        self.colors.set_context(ctm) && self.texture.set_context(ctm)
    }

    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        self.texture.shade_row(x, y, row);
        let (mut point, step) = row_start(&self.colors.inverse, x, y);
        for pixel in row.iter_mut() {
            *pixel = modulate(self.colors.color_at(point).into(), *pixel);
            point = point + step;
        }
    }
}
