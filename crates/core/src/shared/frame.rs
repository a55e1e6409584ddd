use std::time::Duration;

use ndarray::ArrayView3;

/// A single captured frame: contiguous RGB bytes in row-major order.
///
/// Frames are immutable once captured. Transformations such as mirroring
/// return a new frame. A frame whose buffer does not match its stated
/// dimensions can still be constructed so that sources never have to fail;
/// downstream stages check [`Frame::is_well_formed`] and degrade to an empty
/// result.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
    timestamp: Duration,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        index: usize,
        timestamp: Duration,
    ) -> Self {
        Self {
            data,
            width,
            height,
            channels,
            index,
            timestamp,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Capture time relative to the start of the source.
    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    /// True when the frame is non-empty, has at least three color channels
    /// and its buffer length equals `width * height * channels`.
    pub fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.channels >= 3
            && self.expected_len() == Some(self.data.len())
    }

    /// Pixel view shaped `(height, width, channels)`, or `None` when the
    /// buffer does not match the stated dimensions.
    pub fn as_ndarray(&self) -> Option<ArrayView3<'_, u8>> {
        ArrayView3::from_shape(self.shape(), &self.data).ok()
    }

    /// Returns a horizontally flipped copy, as seen in a mirror.
    ///
    /// Malformed frames are returned unchanged.
    pub fn mirrored(&self) -> Frame {
        if self.expected_len() != Some(self.data.len()) {
            return self.clone();
        }
        let w = self.width as usize;
        let c = self.channels as usize;
        let row_len = w * c;
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(row_len.max(1)) {
            for px in row.chunks_exact(c.max(1)).rev() {
                data.extend_from_slice(px);
            }
        }
        Frame::new(
            data,
            self.width,
            self.height,
            self.channels,
            self.index,
            self.timestamp,
        )
    }

    /// `None` when the stated dimensions overflow `usize`.
    fn expected_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.channels as usize)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
