/// Integer Bresenham line between two pixels, both endpoints included.
///
/// Emits exactly one pixel per step along the dominant axis. The walk always
/// starts from the lexicographically smaller endpoint, so `(a, b)` and `(b, a)`
/// visit the same pixels; the result is reversed to match the call direction.
pub fn rasterize_segment(x1: i64, y1: i64, x2: i64, y2: i64) -> Vec<(i64, i64)> {
    let swapped = (x2, y2) < (x1, y1);
    let (mut x0, mut y0, xe, ye) = if swapped { (x2, y2, x1, y1) } else { (x1, y1, x2, y2) };

    let dx = (xe - x0).abs();
    let dy = (ye - y0).abs();
    let sx = if x0 < xe { 1 } else { -1 };
    let sy = if y0 < ye { 1 } else { -1 };
    let mut err = dx - dy;

    let mut out = Vec::with_capacity(dx.max(dy) as usize + 1);
    loop {
        out.push((x0, y0));
        if x0 == xe && y0 == ye { break; }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }

    if swapped { out.reverse(); }
    out
}

/// Clips the segment `a`-`b` to the axis-aligned box `lo..=hi` (Liang-Barsky).
///
/// Endpoints already inside the box come back unchanged. `None` when the
/// segment misses the box entirely.
pub fn clip_segment(a: (f64, f64), b: (f64, f64), lo: (f64, f64), hi: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, a.0 - lo.0), (dx, hi.0 - a.0), (-dy, a.1 - lo.1), (dy, hi.1 - a.1)] {
        if p == 0.0 {
            if q < 0.0 { return None; }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 { return None; }
            t0 = t0.max(r);
        } else {
            if r < t0 { return None; }
            t1 = t1.min(r);
        }
    }
    let start = if t0 > 0.0 { (a.0 + t0 * dx, a.1 + t0 * dy) } else { a };
    let end = if t1 < 1.0 { (a.0 + t1 * dx, a.1 + t1 * dy) } else { b };
    Some((start, end))
}
