//! Separable box blur on premultiplied RGBA8 pixels.
//!
//! Three box passes per axis approximate a gaussian. Edge pixels are clamped,
//! so a uniform image is left unchanged. Averages are rounded per pass; since
//! every channel is averaged over the same window, premultiplied color never
//! exceeds alpha.

const PASSES: usize = 3;

type Px = [u8; 4];

pub(super) fn box_blur(rgba: &mut [u8], width: usize, height: usize, radius: usize) {
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(rgba.len(), width * height * 4);

    let mut line: Vec<Px> = vec![[0; 4]; width.max(height)];
    let mut scratch: Vec<Px> = vec![[0; 4]; width.max(height)];

    for _ in 0..PASSES {
        for y in 0..height {
            for x in 0..width {
                line[x] = read(rgba, y * width + x);
            }
            blur_line(&line[..width], &mut scratch[..width], radius);
            for x in 0..width {
                write(rgba, y * width + x, scratch[x]);
            }
        }
        for x in 0..width {
            for y in 0..height {
                line[y] = read(rgba, y * width + x);
            }
            blur_line(&line[..height], &mut scratch[..height], radius);
            for y in 0..height {
                write(rgba, y * width + x, scratch[y]);
            }
        }
    }
}

#[inline]
fn read(rgba: &[u8], i: usize) -> Px {
    let o = i * 4;
    [rgba[o], rgba[o + 1], rgba[o + 2], rgba[o + 3]]
}

#[inline]
fn write(rgba: &mut [u8], i: usize, px: Px) {
    rgba[i * 4..i * 4 + 4].copy_from_slice(&px);
}

/// Sliding-window average of `src` into `dst` with window `2 * radius + 1`.
fn blur_line(src: &[Px], dst: &mut [Px], radius: usize) {
    let last = src.len() as isize - 1;
    let window = (2 * radius + 1) as u32;
    let at = |i: isize| src[i.clamp(0, last) as usize];

    let mut sum = [0u32; 4];
    for i in -(radius as isize)..=(radius as isize) {
        let c = at(i);
        for k in 0..4 {
            sum[k] += u32::from(c[k]);
        }
    }

    for (i, out) in dst.iter_mut().enumerate() {
        for k in 0..4 {
            out[k] = ((sum[k] + window / 2) / window) as u8;
        }
        let enter = at(i as isize + radius as isize + 1);
        let leave = at(i as isize - radius as isize);
        for k in 0..4 {
            sum[k] = sum[k] + u32::from(enter[k]) - u32::from(leave[k]);
        }
    }
}
