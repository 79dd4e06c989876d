//! Multi-page orchestration.
//!
//! Every page is an independent task: load → detect → (optionally) render
//! the overview. Tasks share only the immutable detector and the page
//! source, and their results are reduced into a [`DocumentSummary`] after
//! all pages finished. A failing page is recorded and skipped.

use super::params::DocumentOptions;
use super::pipeline::{PageDetection, StaffDetector};
use crate::diagnostics::{DocumentSummary, PageSummary};
use crate::error::StaffError;
use crate::export::{render_overview, ExportReport, RegionSink};
use crate::image::RasterImage;
use crate::source::PageSource;
use crate::staff::CroppedRegion;
use crate::types::RegionKey;
use log::{info, warn};
use rayon::prelude::*;

/// Successful result of one page task.
#[derive(Clone, Debug)]
pub struct ProcessedPage {
    pub detection: PageDetection,
    pub overview: Option<RasterImage>,
}

#[derive(Debug)]
pub struct PageResult {
    pub page_index: usize,
    pub outcome: Result<ProcessedPage, StaffError>,
}

/// All page results of a document, in page order, plus their summary.
#[derive(Debug)]
pub struct DocumentDetection {
    pub pages: Vec<PageResult>,
    pub summary: DocumentSummary,
}

impl DocumentDetection {
    /// Every crop with its document address, pages and staves in order.
    pub fn regions(&self) -> impl Iterator<Item = (RegionKey, &CroppedRegion)> + '_ {
        self.pages.iter().flat_map(|page| {
            page.outcome.iter().flat_map(move |processed| {
                processed
                    .detection
                    .regions
                    .iter()
                    .enumerate()
                    .map(move |(group_index, region)| {
                        (
                            RegionKey {
                                page_index: page.page_index,
                                group_index,
                            },
                            region,
                        )
                    })
            })
        })
    }

    /// Hand every crop and overview to `sink`. Write failures are logged and
    /// counted; the remaining items are still written.
    pub fn export(&self, sink: &mut dyn RegionSink) -> ExportReport {
        let mut report = ExportReport::default();
        for (key, region) in self.regions() {
            match sink.write_region(key, region) {
                Ok(()) => report.regions_written += 1,
                Err(err) => {
                    warn!(
                        "export: page {} staff {} failed: {err}",
                        key.page_index, key.group_index
                    );
                    report.failures += 1;
                }
            }
        }
        for page in &self.pages {
            let Ok(ProcessedPage {
                overview: Some(overview),
                ..
            }) = &page.outcome
            else {
                continue;
            };
            match sink.write_overview(page.page_index, overview) {
                Ok(()) => report.overviews_written += 1,
                Err(err) => {
                    warn!("export: overview of page {} failed: {err}", page.page_index);
                    report.failures += 1;
                }
            }
        }
        report
    }
}

/// Detect staves on every page of `source`.
pub fn process_document<S: PageSource + ?Sized>(
    detector: &StaffDetector,
    source: &S,
    options: &DocumentOptions,
) -> DocumentDetection {
    let count = options
        .max_pages
        .map_or(source.page_count(), |max| max.min(source.page_count()));
    let detector = detector.clone().with_line_mask(options.keep_line_masks);
    let task = |page_index: usize| process_page(&detector, source, page_index, options.render_overview);

    let pages: Vec<PageResult> = if options.parallel {
        (0..count).into_par_iter().map(task).collect()
    } else {
        (0..count).map(task).collect()
    };

    let summary = DocumentSummary::from_pages(pages.iter().map(PageSummary::from_result).collect());
    info!(
        "document: pages={} failed={} lines={} staves={} avg_lines_per_staff={}",
        summary.pages_processed,
        summary.pages_failed,
        summary.total_lines,
        summary.total_groups,
        summary
            .average_lines_per_group
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "-".to_string())
    );
    DocumentDetection { pages, summary }
}

fn process_page<S: PageSource + ?Sized>(
    detector: &StaffDetector,
    source: &S,
    page_index: usize,
    render: bool,
) -> PageResult {
    let outcome = source.load_page(page_index).and_then(|image| {
        let detection = detector.process(&image)?;
        let overview = render.then(|| render_overview(&image, &detection.groups));
        Ok(ProcessedPage {
            detection,
            overview,
        })
    });
    match &outcome {
        Ok(page) => info!(
            "page {}: lines={} staves={}",
            page_index + 1,
            page.detection.segments.len(),
            page.detection.groups.len()
        ),
        Err(err) => warn!("page {} skipped: {err}", page_index + 1),
    }
    PageResult {
        page_index,
        outcome,
    }
}
