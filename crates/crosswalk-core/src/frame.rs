use ndarray::Array2;

/// A single grayscale image plane.
/// Pixel values are f32, nominally in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Color image composed of separate channel frames.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
}

impl ColorFrame {
    /// Channel planes in R, G, B order.
    pub fn planes(&self) -> [&Frame; 3] {
        [&self.red, &self.green, &self.blue]
    }

    /// Unweighted mean of the three channels, per pixel.
    pub fn channel_mean(&self) -> Frame {
        let data = (&self.red.data + &self.green.data + &self.blue.data) / 3.0;
        Frame::new(data, self.red.original_bit_depth)
    }
}

/// Either a grayscale or an RGB image. Owned by the caller; analysis code
/// only ever borrows it.
#[derive(Clone, Debug)]
pub enum Image {
    Gray(Frame),
    Color(ColorFrame),
}

impl Image {
    pub fn rows(&self) -> usize {
        match self {
            Self::Gray(f) => f.height(),
            Self::Color(cf) => cf.red.height(),
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            Self::Gray(f) => f.width(),
            Self::Color(cf) => cf.red.width(),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            Self::Gray(_) => 1,
            Self::Color(_) => crate::consts::COLOR_CHANNEL_COUNT,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.columns() == 0
    }

    /// Per-pixel mean over channels. Grayscale images are returned as-is.
    pub fn intensity(&self) -> Frame {
        match self {
            Self::Gray(f) => f.clone(),
            Self::Color(cf) => cf.channel_mean(),
        }
    }
}
