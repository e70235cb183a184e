//! Spatial resizing of pixel frames.
use image::{
    imageops::{resize, FilterType::Triangle},
    ImageBuffer, Luma,
};
use ndarray::{Array3, ArrayView3, Axis};

/// Resizes a frame of shape `[height, width, channels]` to `size = (height, width)`.
///
/// Each channel is resampled independently with a triangle filter, so the
/// number of channels is kept and every output value lies between the minimum
/// and maximum of its input channel. A frame already of the target size is
/// copied as it is.
pub fn resize_frame(frame: ArrayView3<u8>, size: (usize, usize)) -> Array3<u8> {
    let (h, w, c) = frame.dim();
    let (height, width) = size;

    if (h, w) == (height, width) {
        return frame.to_owned();
    }

    let mut out = Array3::zeros((height, width, c));
    for (src, mut dst) in frame.axis_iter(Axis(2)).zip(out.axis_iter_mut(Axis(2))) {
        let img = ImageBuffer::from_fn(w as u32, h as u32, |x, y| {
            Luma([src[[y as usize, x as usize]]])
        });
        let img: ImageBuffer<Luma<u8>, Vec<u8>> = resize(&img, width as u32, height as u32, Triangle);
        for (x, y, p) in img.enumerate_pixels() {
            dst[[y as usize, x as usize]] = p.0[0];
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::resize_frame;
    use ndarray::{Array3, Axis};

    fn gradient(h: usize, w: usize, c: usize) -> Array3<u8> {
        Array3::from_shape_fn((h, w, c), |(y, x, ch)| ((y * 7 + x * 3 + ch * 50) % 200) as u8)
    }

    #[test]
    fn test_resize_shape() {
        let frame = gradient(210, 160, 3);
        let out = resize_frame(frame.view(), (84, 84));
        assert_eq!(out.dim(), (84, 84, 3));

        let frame = gradient(10, 12, 1);
        let out = resize_frame(frame.view(), (30, 40));
        assert_eq!(out.dim(), (30, 40, 1));
    }

    #[test]
    fn test_resize_keeps_value_range() {
        let frame = gradient(50, 40, 2);
        let out = resize_frame(frame.view(), (21, 17));

        for (src, dst) in frame.axis_iter(Axis(2)).zip(out.axis_iter(Axis(2))) {
            // Slack for float rounding in the two filter passes.
            let lo = src.iter().min().unwrap().saturating_sub(2);
            let hi = *src.iter().max().unwrap();
            assert!(dst.iter().all(|&v| lo <= v && v <= hi));
        }
    }

    #[test]
    fn test_resize_constant_frame() {
        let frame = Array3::from_elem((33, 45, 3), 128u8);
        let out = resize_frame(frame.view(), (84, 84));
        assert!(out.iter().all(|&v| (126..=128).contains(&v)));
    }

    #[test]
    fn test_resize_same_size_is_copy() {
        let frame = gradient(8, 6, 3);
        let out = resize_frame(frame.view(), (8, 6));
        assert_eq!(out, frame);
    }

    #[test]
    fn test_resize_is_deterministic() {
        let frame = gradient(64, 48, 3);
        let out1 = resize_frame(frame.view(), (84, 84));
        let out2 = resize_frame(frame.view(), (84, 84));
        assert_eq!(out1, out2);
    }
}
