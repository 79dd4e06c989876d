//! Serializable per-page and per-document statistics.

use crate::detector::PageResult;
use crate::types::BoundingBox;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub group_index: usize,
    pub line_count: usize,
    pub bbox: BoundingBox,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub page_index: usize,
    /// Every extracted segment, grouped or not.
    pub lines: usize,
    pub groups: usize,
    pub regions: Vec<RegionSummary>,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageSummary {
    pub fn from_result(result: &PageResult) -> Self {
        match &result.outcome {
            Ok(page) => {
                let detection = &page.detection;
                Self {
                    page_index: result.page_index,
                    lines: detection.segments.len(),
                    groups: detection.groups.len(),
                    regions: detection
                        .regions
                        .iter()
                        .enumerate()
                        .map(|(group_index, region)| RegionSummary {
                            group_index,
                            line_count: region.line_count,
                            bbox: region.bbox,
                        })
                        .collect(),
                    elapsed_ms: detection.timings.total_ms,
                    error: None,
                }
            }
            Err(err) => Self {
                page_index: result.page_index,
                lines: 0,
                groups: 0,
                regions: Vec::new(),
                elapsed_ms: 0.0,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Document totals reduced from independent page summaries.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub pages_processed: usize,
    pub pages_failed: usize,
    pub total_lines: usize,
    pub total_groups: usize,
    /// `None` when no staff was found anywhere.
    pub average_lines_per_group: Option<f64>,
    pub pages: Vec<PageSummary>,
}

impl DocumentSummary {
    pub fn from_pages(pages: Vec<PageSummary>) -> Self {
        let (processed, failed, lines, groups) =
            pages
                .iter()
                .fold((0, 0, 0, 0), |(processed, failed, lines, groups), page| {
                    if page.failed() {
                        (processed, failed + 1, lines, groups)
                    } else {
                        (processed + 1, failed, lines + page.lines, groups + page.groups)
                    }
                });
        Self {
            pages_processed: processed,
            pages_failed: failed,
            total_lines: lines,
            total_groups: groups,
            average_lines_per_group: average(lines, groups),
            pages,
        }
    }
}

fn average(lines: usize, groups: usize) -> Option<f64> {
    (groups > 0).then(|| lines as f64 / groups as f64)
}
