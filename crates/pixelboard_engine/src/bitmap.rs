use crate::Size;

/// A variable sized monochrome image, used for logos.
///
/// Width is the length of the longest source row; shorter rows are padded with off pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitmap {
    size: Size,
    pixels: Vec<bool>,
}

impl Bitmap {
    pub fn from_bitlines<S: AsRef<str>>(lines: &[S]) -> Self {
        let width = lines.iter().map(|l| l.as_ref().chars().count()).max().unwrap_or(0);
        let height = lines.len();
        let mut pixels = vec![false; width * height];
        for (y, line) in lines.iter().enumerate() {
            for (x, bit) in line.as_ref().chars().enumerate() {
                pixels[y * width + x] = bit == '1';
            }
        }
        Self {
            size: Size::new(width, height),
            pixels,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        self.pixels[y * self.size.width + x]
    }

    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.size.width.max(1);
        self.pixels.iter().enumerate().filter(|&(_, &on)| on).map(move |(i, _)| (i % width, i / width))
    }
}
