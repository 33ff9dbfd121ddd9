/// Borrowed view over a row-major grayscale buffer.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned row-major grayscale buffer.
#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl<'a> GrayImageView<'a> {
    /// Pixel at `(x, y)`. Out-of-bounds reads return 0.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Copy the region `[x0, x1) × [y0, y1)` into an owned image.
    ///
    /// Bounds are clamped to the view; an empty region yields a 0×0 image.
    pub fn crop(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> GrayImage {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);
        let width = x1 - x0;
        let height = y1 - y0;

        let mut data = Vec::with_capacity(width * height);
        for y in y0..y1 {
            let row = y * self.width;
            data.extend_from_slice(&self.data[row + x0..row + x1]);
        }

        GrayImage {
            width,
            height,
            data,
        }
    }
}
