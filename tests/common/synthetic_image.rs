use staff_detector::image::RasterImage;

/// Five staff rows starting at `top`, `spacing` px apart.
pub fn staff_rows(top: usize, spacing: usize) -> Vec<usize> {
    (0..5).map(|i| top + i * spacing).collect()
}

/// White page with 1 px black horizontal lines spanning `x0..x1` at each of
/// `rows`. `channels` selects gray (1), RGB (3) or RGBA (4).
pub fn page_with_lines(
    width: usize,
    height: usize,
    channels: usize,
    x0: usize,
    x1: usize,
    rows: &[usize],
) -> RasterImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(x0 < x1 && x1 <= width, "line span must lie inside the page");

    let mut img = RasterImage::filled(width, height, channels, 255).unwrap();
    for &y in rows {
        assert!(y < height, "line row outside the page");
        for x in x0..x1 {
            let px = img.pixel_mut(x, y);
            let color = px.len().min(3);
            px[..color].fill(0);
        }
    }
    img
}

/// Vertical black bar (a note stem) of `thickness` px at column `x`.
pub fn draw_stem(img: &mut RasterImage, x: usize, y0: usize, y1: usize, thickness: usize) {
    for y in y0..y1 {
        for dx in 0..thickness {
            let px = img.pixel_mut(x + dx, y);
            let color = px.len().min(3);
            px[..color].fill(0);
        }
    }
}

/// Scenario page: one 300 px staff at rows 100..=140 on a 640x480 page.
pub fn single_staff_page() -> RasterImage {
    page_with_lines(640, 480, 1, 170, 470, &staff_rows(100, 10))
}
