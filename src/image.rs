use crate::Pixel;
use std::{io::Write, sync::Arc};

/// Size of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
    /// How many elements we need to skip to get to the next row.
    pub row_stride: usize,
    /// How many elements we need to skip to get to the next column.
    pub col_stride: usize,
}

impl Shape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride + col * self.col_stride
    }

    #[inline]
    pub fn nth(&self, n: usize) -> Option<(usize, usize)> {
        if self.width == 0 {
            return None;
        }
        let row = n / self.width;
        let col = n - row * self.width;
        (row < self.height).then_some((row, col))
    }

    /// Whether `(row, col)` is inside of the image
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn shape(&self) -> Shape;

    fn width(&self) -> usize {
        self.shape().width
    }

    fn height(&self) -> usize {
        self.shape().height
    }

    /// Bounds checked access to the pixel
    fn get(&self, row: usize, col: usize) -> Option<&Self::Pixel> {
        let shape = self.shape();
        if !shape.contains(row, col) {
            return None;
        }
        self.data().get(shape.offset(row, col))
    }

    /// Slice of the row, `None` if the row is out of bounds or its pixels are not contiguous
    fn row(&self, row: usize) -> Option<&[Self::Pixel]> {
        let shape = self.shape();
        if row >= shape.height || shape.col_stride != 1 {
            return None;
        }
        let start = shape.offset(row, 0);
        self.data().get(start..start + shape.width)
    }

    fn as_ref(&self) -> ImageRef<'_, Self::Pixel> {
        ImageRef {
            shape: self.shape(),
            data: self.data(),
        }
    }

    fn iter(&self) -> ImageIter<'_, Self::Pixel> {
        ImageIter {
            index: 0,
            shape: self.shape(),
            data: self.data(),
        }
    }

    /// Whether all pixels of the image are opaque
    fn is_opaque(&self) -> bool
    where
        Self::Pixel: Copy + Into<Pixel>,
    {
        self.iter().all(|pixel| (*pixel).into().is_opaque())
    }

    /// Write image in the BMP format (32-bit BGRA, top-down rows)
    fn write_bmp(&self, mut out: impl Write) -> std::io::Result<()>
    where
        Self: Sized,
        Self::Pixel: Copy + Into<Pixel>,
    {
        const HEADER_SIZE: u32 = 14 + 40;
        let width = self.width() as u32;
        let height = self.height() as u32;
        let data_size = width * height * 4;

        // file header
        out.write_all(b"BM")?;
        out.write_all(&(HEADER_SIZE + data_size).to_le_bytes())?;
        out.write_all(&0u32.to_le_bytes())?;
        out.write_all(&HEADER_SIZE.to_le_bytes())?;

        // info header, negative height indicates top-down row order
        out.write_all(&40u32.to_le_bytes())?;
        out.write_all(&(width as i32).to_le_bytes())?;
        out.write_all(&(-(height as i32)).to_le_bytes())?;
        out.write_all(&1u16.to_le_bytes())?;
        out.write_all(&32u16.to_le_bytes())?;
        out.write_all(&0u32.to_le_bytes())?;
        out.write_all(&data_size.to_le_bytes())?;
        out.write_all(&2835u32.to_le_bytes())?;
        out.write_all(&2835u32.to_le_bytes())?;
        out.write_all(&0u32.to_le_bytes())?;
        out.write_all(&0u32.to_le_bytes())?;

        for pixel in self.iter() {
            let [r, g, b, a] = (*pixel).into().to_rgba();
            out.write_all(&[b, g, r, a])?;
        }
        Ok(())
    }

    /// Write image in the PNG format
    #[cfg(feature = "png")]
    fn write_png(&self, out: impl Write) -> std::io::Result<()>
    where
        Self: Sized,
        Self::Pixel: Copy + Into<Pixel>,
    {
        let mut encoder = png::Encoder::new(out, self.width() as u32, self.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(std::io::Error::other)?;
        let mut data = Vec::with_capacity(self.width() * self.height() * 4);
        for pixel in self.iter() {
            data.extend_from_slice(&(*pixel).into().to_rgba());
        }
        writer
            .write_image_data(&data)
            .map_err(std::io::Error::other)?;
        Ok(())
    }
}

pub struct ImageIter<'a, P> {
    index: usize,
    shape: Shape,
    data: &'a [P],
}

impl<P> ImageIter<'_, P> {
    pub fn position(&self) -> (usize, usize) {
        self.shape.nth(self.index).unwrap_or((self.shape.height, 0))
    }
}

impl<'a, P> Iterator for ImageIter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        self.nth(0)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index += n + 1;
        let (row, col) = self.shape.nth(self.index - 1)?;
        self.data.get(self.shape.offset(row, col))
    }
}

pub trait ImageMut: Image {
    fn data_mut(&mut self) -> &mut [Self::Pixel];

    /// Bounds checked mutable access to the pixel
    fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Self::Pixel> {
        let shape = self.shape();
        if !shape.contains(row, col) {
            return None;
        }
        self.data_mut().get_mut(shape.offset(row, col))
    }

    /// Mutable slice of the row, `None` if the row is out of bounds or its pixels are not contiguous
    fn row_mut(&mut self, row: usize) -> Option<&mut [Self::Pixel]> {
        let shape = self.shape();
        if row >= shape.height || shape.col_stride != 1 {
            return None;
        }
        let start = shape.offset(row, 0);
        self.data_mut().get_mut(start..start + shape.width)
    }

    fn as_mut(&mut self) -> ImageMutRef<'_, Self::Pixel> {
        ImageMutRef {
            shape: self.shape(),
            data: self.data_mut(),
        }
    }

    fn fill(&mut self, value: Self::Pixel)
    where
        Self::Pixel: Copy,
    {
        let shape = self.shape();
        let data = self.data_mut();
        for row in 0..shape.height {
            for col in 0..shape.width {
                data[shape.offset(row, col)] = value;
            }
        }
    }

    fn clear(&mut self)
    where
        Self::Pixel: Default + Copy,
    {
        self.fill(Default::default())
    }
}

/// Image that owns its pixels
#[derive(Debug, Clone)]
pub struct ImageOwned<P> {
    shape: Shape,
    data: Vec<P>,
}

/// Destination and source pixel storage used by the rendering pipeline
pub type Bitmap = ImageOwned<Pixel>;

impl<P> ImageOwned<P> {
    pub fn new(shape: Shape, data: Vec<P>) -> Self {
        Self { shape, data }
    }

    pub fn empty() -> Self {
        Self {
            shape: Shape {
                width: 0,
                height: 0,
                row_stride: 0,
                col_stride: 1,
            },
            data: Vec::new(),
        }
    }

    pub fn new_default(size: Size) -> Self
    where
        P: Default,
    {
        Self::new_with(size, |_, _| Default::default())
    }

    pub fn new_with<F>(size: Size, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let Size { width, height } = size;
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col))
            }
        }
        Self {
            shape: Shape {
                width,
                height,
                row_stride: width,
                col_stride: 1,
            },
            data,
        }
    }

    pub fn to_vec(self) -> Vec<P> {
        self.data
    }
}

impl ImageOwned<Pixel> {
    /// Raw bytes of the packed pixels in native endianness
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

impl<P> ImageMut for ImageOwned<P> {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        &mut self.data
    }
}

#[derive(Clone)]
pub struct ImageRef<'a, P> {
    shape: Shape,
    data: &'a [P],
}

impl<'a, P> ImageRef<'a, P> {
    pub fn new(shape: Shape, data: &'a [P]) -> Self {
        Self { shape, data }
    }
}

impl<P> Image for ImageRef<'_, P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        self.data
    }
}

pub struct ImageMutRef<'a, P> {
    shape: Shape,
    data: &'a mut [P],
}

impl<'a, P> ImageMutRef<'a, P> {
    pub fn new(shape: Shape, data: &'a mut [P]) -> Self {
        Self { shape, data }
    }
}

impl<P> Image for ImageMutRef<'_, P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        self.data
    }
}

impl<P> ImageMut for ImageMutRef<'_, P> {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        self.data
    }
}

impl<I> Image for &I
where
    I: Image + ?Sized,
{
    type Pixel = I::Pixel;

    fn shape(&self) -> Shape {
        (*self).shape()
    }

    fn data(&self) -> &[Self::Pixel] {
        (*self).data()
    }
}

impl<I> Image for &mut I
where
    I: Image + ?Sized,
{
    type Pixel = I::Pixel;

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn data(&self) -> &[Self::Pixel] {
        (**self).data()
    }
}

impl<I> ImageMut for &mut I
where
    I: ImageMut + ?Sized,
{
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        (**self).data_mut()
    }
}

impl<I> Image for Arc<I>
where
    I: Image + ?Sized,
{
    type Pixel = I::Pixel;

    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn data(&self) -> &[Self::Pixel] {
        (**self).data()
    }
}
