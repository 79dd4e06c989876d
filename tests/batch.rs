mod common;

use common::synthetic_image::{page_with_lines, single_staff_page, staff_rows};
use staff_detector::detector::{process_document, DocumentOptions, StaffDetector, StaffParams};
use staff_detector::error::StaffError;
use staff_detector::export::{FsRegionSink, RegionSink};
use staff_detector::image::io::save_raster_image;
use staff_detector::image::RasterImage;
use staff_detector::source::{ImageFileSource, PageSource};
use staff_detector::staff::CroppedRegion;
use staff_detector::types::RegionKey;

fn detector() -> StaffDetector {
    StaffDetector::new(StaffParams::default()).unwrap()
}

fn two_staff_page() -> RasterImage {
    let mut rows = staff_rows(100, 10);
    rows.extend(staff_rows(300, 12));
    page_with_lines(640, 480, 1, 170, 470, &rows)
}

/// Serves in-memory pages but fails on the listed indices.
struct FlakySource {
    pages: Vec<RasterImage>,
    broken: Vec<usize>,
}

impl PageSource for FlakySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&self, index: usize) -> Result<RasterImage, StaffError> {
        if self.broken.contains(&index) {
            return Err(StaffError::PageSource {
                index,
                message: "render failed".to_string(),
            });
        }
        self.pages.load_page(index)
    }
}

#[derive(Default)]
struct FailingSink {
    attempts: usize,
}

impl RegionSink for FailingSink {
    fn write_region(&mut self, _key: RegionKey, _region: &CroppedRegion) -> Result<(), StaffError> {
        self.attempts += 1;
        Err(StaffError::input("disk full"))
    }

    fn write_overview(&mut self, _page_index: usize, _overview: &RasterImage) -> Result<(), StaffError> {
        self.attempts += 1;
        Err(StaffError::input("disk full"))
    }
}

#[test]
fn failing_page_does_not_abort_the_document() {
    let _ = env_logger::builder().is_test(true).try_init();
    let source = FlakySource {
        pages: vec![single_staff_page(), single_staff_page(), two_staff_page()],
        broken: vec![1],
    };

    let detection = process_document(&detector(), &source, &DocumentOptions::default());

    assert_eq!(detection.pages.len(), 3);
    assert!(detection.pages[1].outcome.is_err());
    let summary = &detection.summary;
    assert_eq!(summary.pages_processed, 2);
    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.total_lines, 15);
    assert_eq!(summary.total_groups, 3);
    assert_eq!(summary.average_lines_per_group, Some(5.0));
    assert!(summary.pages[1]
        .error
        .as_deref()
        .is_some_and(|e| e.contains("render failed")));

    let keys: Vec<_> = detection.regions().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        [
            RegionKey { page_index: 0, group_index: 0 },
            RegionKey { page_index: 2, group_index: 0 },
            RegionKey { page_index: 2, group_index: 1 },
        ]
    );
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let pages = vec![two_staff_page(), single_staff_page(), two_staff_page()];
    let parallel = process_document(&detector(), &pages, &DocumentOptions::default());
    let sequential = process_document(
        &detector(),
        &pages,
        &DocumentOptions {
            parallel: false,
            ..Default::default()
        },
    );

    let boxes = |d: &staff_detector::DocumentDetection| {
        d.regions().map(|(k, r)| (k, r.bbox)).collect::<Vec<_>>()
    };
    assert_eq!(boxes(&parallel), boxes(&sequential));
    assert_eq!(parallel.summary.total_lines, sequential.summary.total_lines);
    assert_eq!(parallel.summary.total_groups, 5);
}

#[test]
fn max_pages_limits_processing() {
    let pages = vec![single_staff_page(); 4];
    let options = DocumentOptions {
        max_pages: Some(2),
        ..Default::default()
    };

    let detection = process_document(&detector(), &pages, &options);

    assert_eq!(detection.pages.len(), 2);
    assert_eq!(detection.summary.pages_processed, 2);
    assert_eq!(detection.summary.total_groups, 2);
}

#[test]
fn line_masks_are_kept_on_request() {
    let pages = vec![single_staff_page()];
    let options = DocumentOptions {
        keep_line_masks: true,
        render_overview: false,
        ..Default::default()
    };

    let detection = process_document(&detector(), &pages, &options);

    let page = detection.pages[0].outcome.as_ref().unwrap();
    assert!(page.overview.is_none());
    let mask = page.detection.line_mask.as_ref().unwrap();
    assert_eq!((mask.w, mask.h), (640, 480));
    assert!(mask.is_set(300, 120));
    assert!(!mask.is_set(300, 200));
}

#[test]
fn files_on_disk_are_processed_and_exported() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("in").join("page1.png");
    save_raster_image(&two_staff_page(), &first).unwrap();
    let missing = dir.path().join("in").join("page2.png");

    let source = ImageFileSource::new([first, missing]);
    let detection = process_document(&detector(), &source, &DocumentOptions::default());
    assert_eq!(detection.summary.pages_processed, 1);
    assert_eq!(detection.summary.pages_failed, 1);

    let out = dir.path().join("out");
    let mut sink = FsRegionSink::new(&out, "etude");
    let report = detection.export(&mut sink);
    assert_eq!(sink.dir(), out);

    assert_eq!(report.regions_written, 2);
    assert_eq!(report.overviews_written, 1);
    assert_eq!(report.failures, 0);
    for name in [
        "etude_page_1_staff_1.png",
        "etude_page_1_staff_2.png",
        "etude_page_1_overview.png",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    assert_eq!(sink.written().len(), 3);

    let crop = image::open(out.join("etude_page_1_staff_1.png")).unwrap();
    assert_eq!(crop.to_luma8().height(), 101);
}

#[test]
fn sink_failures_are_counted_not_fatal() {
    let pages = vec![two_staff_page()];
    let detection = process_document(&detector(), &pages, &DocumentOptions::default());

    let mut sink = FailingSink::default();
    let report = detection.export(&mut sink);

    assert_eq!(sink.attempts, 3);
    assert_eq!(report.failures, 3);
    assert_eq!(report.regions_written, 0);
}
