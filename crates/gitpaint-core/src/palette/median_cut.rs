// crates/gitpaint-core/src/palette/median_cut.rs
//
// Median-cut palette reduction without dithering.
// Deterministic: the histogram is ordered and every tie breaks toward the lower index.

use std::collections::BTreeMap;

use image::{Rgb, RgbImage};

#[derive(Clone, Debug)]
struct ColorBox {
    /// (color, pixel count), unique colors only.
    colors: Vec<([u8; 3], u64)>,
}

impl ColorBox {
    fn population(&self) -> u64 {
        self.colors.iter().map(|(_, n)| *n).sum()
    }

    /// (channel, spread) of the widest channel.
    fn widest_channel(&self) -> (usize, u8) {
        let mut best = (0usize, 0u8);
        for ch in 0..3 {
            let lo = self.colors.iter().map(|(c, _)| c[ch]).min().unwrap_or(0);
            let hi = self.colors.iter().map(|(c, _)| c[ch]).max().unwrap_or(0);
            let spread = hi - lo;
            if spread > best.1 {
                best = (ch, spread);
            }
        }
        best
    }

    /// Split at the population-weighted median of the widest channel.
    /// Both halves are non-empty; caller guarantees at least two unique colors.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (ch, _) = self.widest_channel();
        self.colors.sort_by(|a, b| a.0[ch].cmp(&b.0[ch]).then_with(|| a.0.cmp(&b.0)));

        let half = self.population() / 2;
        let mut acc = 0u64;
        let mut cut = 1usize;
        for (i, (_, n)) in self.colors.iter().enumerate() {
            acc += n;
            if acc >= half {
                cut = i + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.colors.len() - 1);

        let upper = self.colors.split_off(cut);
        (self, ColorBox { colors: upper })
    }

    /// Population-weighted mean, rounded to nearest.
    fn average(&self) -> Rgb<u8> {
        let total = self.population().max(1);
        let mut sum = [0u64; 3];
        for (c, n) in &self.colors {
            for ch in 0..3 {
                sum[ch] += c[ch] as u64 * n;
            }
        }
        let avg = |s: u64| ((s + total / 2) / total).min(255) as u8;
        Rgb([avg(sum[0]), avg(sum[1]), avg(sum[2])])
    }
}

/// Unique colors of `img` with their pixel counts, in ascending color order.
pub fn histogram(img: &RgbImage) -> Vec<([u8; 3], u64)> {
    let mut h: BTreeMap<[u8; 3], u64> = BTreeMap::new();
    for p in img.pixels() {
        *h.entry(p.0).or_insert(0) += 1;
    }
    h.into_iter().collect()
}

/// Reduce `img` to at most `max_colors` representative colors.
///
/// When the image already has `max_colors` or fewer unique colors they are
/// returned unchanged, which makes re-quantizing a quantized image a no-op.
pub fn palette(img: &RgbImage, max_colors: usize) -> Vec<Rgb<u8>> {
    let hist = histogram(img);
    if hist.is_empty() || max_colors == 0 {
        return Vec::new();
    }
    if hist.len() <= max_colors {
        return hist.into_iter().map(|(c, _)| Rgb(c)).collect();
    }

    let mut boxes = vec![ColorBox { colors: hist }];
    while boxes.len() < max_colors {
        // Split the box with the widest spread; ties go to the larger population.
        let pick = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .map(|(i, b)| (i, b.widest_channel().1, b.population()))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| a.2.cmp(&b.2)).then_with(|| b.0.cmp(&a.0)))
            .map(|(i, _, _)| i);

        let Some(i) = pick else { break };
        let (lo, hi) = boxes.swap_remove(i).split();
        boxes.push(lo);
        boxes.push(hi);
    }

    let mut out: Vec<Rgb<u8>> = boxes.iter().map(ColorBox::average).collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out.dedup();
    out
}

/// Index of the palette entry closest to `c` (squared RGB distance).
pub fn nearest(palette: &[Rgb<u8>], c: &Rgb<u8>) -> usize {
    let dist = |p: &Rgb<u8>| -> u32 {
        (0..3)
            .map(|ch| {
                let d = p[ch] as i32 - c[ch] as i32;
                (d * d) as u32
            })
            .sum()
    };

    let mut best = 0usize;
    let mut best_d = u32::MAX;
    for (i, p) in palette.iter().enumerate() {
        let d = dist(p);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}
