mod common;

use common::synthetic_image::{draw_stem, page_with_lines, single_staff_page, staff_rows};
use staff_detector::detector::{process_document, DocumentOptions, StaffDetector, StaffParams};
use staff_detector::export::OVERVIEW_PALETTE;
use staff_detector::image::RasterImage;
use staff_detector::staff::ClusterOptions;
use staff_detector::{extract_staff_regions, StaffError};

#[test]
fn single_staff_yields_one_padded_region() {
    let _ = env_logger::builder().is_test(true).try_init();
    let page = single_staff_page();

    let detection = StaffDetector::new(StaffParams::default())
        .unwrap()
        .process(&page)
        .unwrap();

    assert_eq!(detection.segments.len(), 5);
    assert_eq!(detection.groups.len(), 1);
    let group = &detection.groups[0];
    assert_eq!(group.line_count(), 5);
    assert_eq!(group.top(), 100);
    assert_eq!(group.bottom(), 140);

    assert_eq!(detection.regions.len(), 1);
    let region = &detection.regions[0];
    assert_eq!(region.line_count, 5);
    assert_eq!(region.bbox.y_min, 70);
    assert_eq!(region.bbox.y_max, 171);
    assert!(
        (138..=140).contains(&region.bbox.x_min),
        "x_min={}",
        region.bbox.x_min
    );
    assert!(
        (500..=502).contains(&region.bbox.x_max),
        "x_max={}",
        region.bbox.x_max
    );
    assert_eq!(region.image.width(), region.bbox.width());
    assert_eq!(region.image.height(), 101);
    assert_eq!(region.image.channels(), 1);
    // The top staff line sits 30 px below the crop edge.
    assert_eq!(region.image.pixel(200 - region.bbox.x_min, 30)[0], 0);

    for stage in ["intensity", "blur", "threshold", "opening", "components", "clustering", "cropping"] {
        let ms = detection.timings.stage_ms(stage);
        assert!(ms.is_some_and(|ms| ms >= 0.0), "missing timing for {stage}");
    }
    assert_eq!(detection.timings.stage_ms("refinement"), None);
}

#[test]
fn isolated_line_is_discarded() {
    let mut rows = staff_rows(100, 10);
    rows.push(400);
    let page = page_with_lines(640, 480, 1, 170, 470, &rows);

    let detection = StaffDetector::new(StaffParams::default())
        .unwrap()
        .process(&page)
        .unwrap();

    assert_eq!(detection.segments.len(), 6);
    assert_eq!(detection.groups.len(), 1);
    assert_eq!(detection.groups[0].bottom(), 140);
    assert_eq!(detection.regions[0].bbox.y_max, 171);
}

#[test]
fn blank_page_reports_nothing_without_failing() {
    let pages = vec![RasterImage::filled(400, 300, 1, 255).unwrap()];
    let detector = StaffDetector::new(StaffParams::default()).unwrap();

    let detection = process_document(&detector, &pages, &DocumentOptions::default());

    let summary = &detection.summary;
    assert_eq!(summary.pages_processed, 1);
    assert_eq!(summary.pages_failed, 0);
    assert_eq!(summary.total_lines, 0);
    assert_eq!(summary.total_groups, 0);
    assert_eq!(summary.average_lines_per_group, None);
    assert_eq!(detection.regions().count(), 0);
}

#[test]
fn staves_are_returned_top_to_bottom_with_stems_ignored() {
    let mut rows = staff_rows(300, 10);
    rows.extend(staff_rows(100, 10));
    let mut page = page_with_lines(640, 480, 3, 170, 470, &rows);
    draw_stem(&mut page, 250, 80, 160, 2);
    draw_stem(&mut page, 320, 290, 360, 2);

    let regions = extract_staff_regions(&page, &StaffParams::default()).unwrap();

    assert_eq!(regions.len(), 2);
    assert_eq!((regions[0].bbox.y_min, regions[0].bbox.y_max), (70, 171));
    assert_eq!((regions[1].bbox.y_min, regions[1].bbox.y_max), (270, 371));
    for (region, top) in regions.iter().zip([100, 300]) {
        assert!(region.bbox.contains(200, top));
        assert!(region.bbox.contains(200, top + 40));
        assert!(!region.bbox.contains(200, top + 71));
        assert_eq!(region.line_count, 5);
        assert_eq!(region.image.channels(), 3);
        assert!(region.bbox.x_max <= page.width());
        assert!(region.bbox.y_max <= page.height());
    }
}

#[test]
fn rgba_pages_keep_their_channels_and_ignore_alpha() {
    let pages = vec![page_with_lines(640, 480, 4, 170, 470, &staff_rows(100, 10))];
    let detector = StaffDetector::new(StaffParams::default()).unwrap();

    let detection = process_document(&detector, &pages, &DocumentOptions::default());

    let processed = detection.pages[0].outcome.as_ref().unwrap();
    assert_eq!(processed.detection.segments.len(), 5);
    assert_eq!(processed.detection.regions.len(), 1);
    let region = &processed.detection.regions[0];
    assert_eq!((region.bbox.y_min, region.bbox.y_max), (70, 171));
    assert_eq!(region.image.channels(), 4);
    assert_eq!(region.image.pixel(200 - region.bbox.x_min, 30), &[0, 0, 0, 255]);

    let overview = processed.overview.as_ref().unwrap();
    assert_eq!(overview.channels(), 3);
    assert_eq!(overview.pixel(300, 120), &OVERVIEW_PALETTE[0]);
    assert_eq!(overview.pixel(300, 200), &[255, 255, 255]);
}

#[test]
fn regions_are_clipped_to_the_page() {
    let rows = [4, 12, 20, 28, 36];
    let page = page_with_lines(300, 60, 1, 0, 300, &rows);

    let regions = extract_staff_regions(&page, &StaffParams::default()).unwrap();

    assert_eq!(regions.len(), 1);
    let bbox = regions[0].bbox;
    assert_eq!((bbox.x_min, bbox.y_min), (0, 0));
    assert_eq!((bbox.x_max, bbox.y_max), (300, 60));
    assert_eq!(regions[0].image.width(), 300);
    assert_eq!(regions[0].image.height(), 60);
}

#[test]
fn tighter_tolerance_splits_a_widely_spaced_staff() {
    let page = page_with_lines(640, 480, 1, 170, 470, &staff_rows(100, 20));
    let params = StaffParams {
        clustering: ClusterOptions {
            tolerance_px: 19.0,
            min_lines_per_group: 1,
        },
        ..Default::default()
    };

    let regions = extract_staff_regions(&page, &params).unwrap();

    assert_eq!(regions.len(), 5);
    assert!(regions.iter().all(|r| r.line_count == 1));
}

#[test]
fn overview_marks_each_staff_in_its_own_colour() {
    let mut rows = staff_rows(100, 10);
    rows.extend(staff_rows(300, 10));
    let pages = vec![page_with_lines(640, 480, 1, 170, 470, &rows)];
    let detector = StaffDetector::new(StaffParams::default()).unwrap();

    let detection = process_document(&detector, &pages, &DocumentOptions::default());

    let processed = detection.pages[0].outcome.as_ref().unwrap();
    let overview = processed.overview.as_ref().unwrap();
    assert_eq!(overview.channels(), 3);
    assert_eq!(overview.pixel(300, 120), &OVERVIEW_PALETTE[0]);
    assert_eq!(overview.pixel(300, 320), &OVERVIEW_PALETTE[1]);
    assert_eq!(overview.pixel(300, 200), &[255, 255, 255]);
}

#[test]
fn detection_is_deterministic() {
    let page = single_staff_page();
    let params = StaffParams::default();

    let first = extract_staff_regions(&page, &params).unwrap();
    let second = extract_staff_regions(&page, &params).unwrap();

    assert_eq!(first, second);
}

#[test]
fn invalid_parameters_are_rejected_before_processing() {
    let params = StaffParams {
        clustering: ClusterOptions {
            tolerance_px: 0.0,
            min_lines_per_group: 3,
        },
        ..Default::default()
    };

    let err = extract_staff_regions(&single_staff_page(), &params).unwrap_err();

    assert!(matches!(err, StaffError::Configuration { .. }), "{err}");
}
