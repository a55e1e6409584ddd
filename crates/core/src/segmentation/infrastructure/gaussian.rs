/// Precompute a normalised 1D Gaussian kernel of the given size.
///
/// `kernel_size` must be odd and >= 1. Sigma follows OpenCV's `sigma = 0`
/// rule: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    let sigma = 0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (kernel_size / 2) as f64;
    let mut weights: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    for v in &mut weights {
        *v /= sum;
    }
    weights.iter().map(|&v| v as f32).collect()
}

/// Separable Gaussian blur over interleaved pixels, reusing `temp` and
/// `scratch` between calls. Samples past the frame edge repeat the edge pixel.
pub fn separable_gaussian_blur(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
    scratch: &mut Vec<f32>,
) {
    if kernel.len() <= 1 || width == 0 || height == 0 {
        return;
    }
    temp.clear();
    temp.extend(data.iter().map(|&v| v as f32));
    scratch.clear();
    scratch.resize(temp.len(), 0.0);

    let rows = Lanes {
        count: height,
        len: width,
        lane_stride: width * channels,
        step: channels,
    };
    let cols = Lanes {
        count: width,
        len: height,
        lane_stride: channels,
        step: width * channels,
    };
    convolve(temp, scratch, rows, channels, kernel);
    convolve(scratch, temp, cols, channels, kernel);

    for (dst, &v) in data.iter_mut().zip(temp.iter()) {
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }
}

/// Layout of the 1D lanes a pass walks: `count` lanes of `len` samples,
/// lanes `lane_stride` apart, samples `step` apart.
#[derive(Clone, Copy)]
struct Lanes {
    count: usize,
    len: usize,
    lane_stride: usize,
    step: usize,
}

fn convolve(src: &[f32], dst: &mut [f32], lanes: Lanes, channels: usize, kernel: &[f32]) {
    let half = (kernel.len() / 2) as isize;
    let last = lanes.len as isize - 1;
    for lane in 0..lanes.count {
        let base = lane * lanes.lane_stride;
        for i in 0..lanes.len {
            for c in 0..channels {
                let acc: f32 = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, &w)| {
                        let j = (i as isize + k as isize - half).clamp(0, last) as usize;
                        src[base + j * lanes.step + c] * w
                    })
                    .sum();
                dst[base + i * lanes.step + c] = acc;
            }
        }
    }
}
