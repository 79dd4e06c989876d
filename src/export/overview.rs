use crate::image::RasterImage;
use crate::staff::StaffGroup;

/// Staff colours, cycled by group index.
pub const OVERVIEW_PALETTE: [[u8; 3]; 5] = [
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [255, 255, 0],
    [255, 0, 255],
];

const LINE_THICKNESS: usize = 2;

/// RGB copy of `page` with every staff's lines painted in its group colour.
pub fn render_overview(page: &RasterImage, groups: &[StaffGroup]) -> RasterImage {
    let mut canvas = page.to_rgb();
    let (w, h) = (canvas.width(), canvas.height());
    for (index, group) in groups.iter().enumerate() {
        let color = OVERVIEW_PALETTE[index % OVERVIEW_PALETTE.len()];
        for seg in group.members() {
            let y0 = seg.y().saturating_sub(LINE_THICKNESS / 2);
            let y1 = (y0 + LINE_THICKNESS).min(h);
            let x1 = seg.x_end().min(w);
            for y in y0..y1 {
                for x in seg.x_start()..x1 {
                    canvas.pixel_mut(x, y).copy_from_slice(&color);
                }
            }
        }
    }
    canvas
}
