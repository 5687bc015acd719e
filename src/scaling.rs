//! Cover-fit geometry.
//!
//! Scales an image so it fills its container completely while keeping its
//! aspect ratio. Whatever overflows on one axis is cropped and, if centering is
//! enabled for that axis, split evenly on both sides.

/// Size of the surface the background is fitted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Placement of the scaled image relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Compute the cover-fit rectangle of an image with `ratio` (natural width
/// over natural height) inside a `container_width` x `container_height` box.
///
/// Returns `None` when the ratio is not a positive finite number, which is the
/// case for an image whose natural size is not known yet. Callers skip the
/// layout step and try again after the next load or resize.
pub fn compute_fill(
    container_width: f64,
    container_height: f64,
    ratio: f64,
    centered_x: bool,
    centered_y: bool,
) -> Option<Geometry> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return None;
    }
    if !container_width.is_finite() || !container_height.is_finite() {
        return None;
    }

    let width = container_width;
    let height = width / ratio;

    if height >= container_height {
        let overflow = height - container_height;
        return Some(Geometry {
            width,
            height,
            offset_x: 0.0,
            offset_y: if centered_y { -overflow / 2.0 } else { 0.0 },
        });
    }

    let height = container_height;
    let width = height * ratio;
    let overflow = width - container_width;
    Some(Geometry {
        width,
        height,
        offset_x: if centered_x { -overflow / 2.0 } else { 0.0 },
        offset_y: 0.0,
    })
}

/// Same as [`compute_fill`] for a [`Viewport`].
pub fn fill_viewport(viewport: Viewport, ratio: f64, centered_x: bool, centered_y: bool) -> Option<Geometry> {
    compute_fill(viewport.width, viewport.height, ratio, centered_x, centered_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn exact_fit_has_no_offsets() {
        let g = compute_fill(1000.0, 500.0, 2.0, true, true).unwrap();
        assert_eq!(g, Geometry { width: 1000.0, height: 500.0, offset_x: 0.0, offset_y: 0.0 });
    }

    #[test]
    fn tall_image_overflows_vertically() {
        // 4:3 image in a 16:9 box
        let g = compute_fill(1600.0, 900.0, 4.0 / 3.0, true, true).unwrap();
        assert!((g.width - 1600.0).abs() < EPS);
        assert!((g.height - 1200.0).abs() < EPS);
        assert!((g.offset_y + 150.0).abs() < EPS);
        assert_eq!(g.offset_x, 0.0);

        let g = compute_fill(1600.0, 900.0, 4.0 / 3.0, true, false).unwrap();
        assert_eq!(g.offset_y, 0.0);
    }

    #[test]
    fn wide_image_overflows_horizontally() {
        let g = compute_fill(800.0, 800.0, 2.0, true, true).unwrap();
        assert_eq!(g.width, 1600.0);
        assert_eq!(g.height, 800.0);
        assert_eq!(g.offset_x, -400.0);
        assert_eq!(g.offset_y, 0.0);

        let g = compute_fill(800.0, 800.0, 2.0, false, true).unwrap();
        assert_eq!(g.offset_x, 0.0);
    }

    #[test]
    fn unknown_ratio_is_skipped() {
        assert!(compute_fill(800.0, 600.0, f64::NAN, true, true).is_none());
        assert!(compute_fill(800.0, 600.0, f64::INFINITY, true, true).is_none());
        assert!(compute_fill(800.0, 600.0, 0.0, true, true).is_none());
    }

    #[test]
    fn always_covers_and_keeps_ratio() {
        let sizes = [1.0, 37.0, 320.0, 768.0, 1024.5, 1920.0, 4096.0];
        let ratios = [0.1, 0.5625, 0.75, 1.0, 4.0 / 3.0, 16.0 / 9.0, 2.35, 10.0];

        for &w in &sizes {
            for &h in &sizes {
                for &r in &ratios {
                    let g = compute_fill(w, h, r, true, true).unwrap();
                    assert!(g.width >= w - EPS, "{w}x{h} r={r}: {g:?}");
                    assert!(g.height >= h - EPS, "{w}x{h} r={r}: {g:?}");
                    assert!(((g.width / g.height) - r).abs() < 1e-9 * r.max(1.0), "{w}x{h} r={r}: {g:?}");
                    // centered overflow leaves the container fully covered
                    assert!(g.offset_x <= 0.0 && g.offset_x + g.width >= w - EPS);
                    assert!(g.offset_y <= 0.0 && g.offset_y + g.height >= h - EPS);
                }
            }
        }
    }
}
