use staff_detector::config::staff::{self, StaffToolConfig};
use staff_detector::detector::{process_document, DocumentDetection, StaffDetector};
use staff_detector::export::FsRegionSink;
use staff_detector::image::io::{save_mask, write_json_file};
use staff_detector::source::ImageFileSource;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = staff::load_config(Path::new(&config_path))?;
    if config.inputs.is_empty() {
        return Err("Config lists no input pages".to_string());
    }

    let detector = StaffDetector::new(config.params).map_err(|e| e.to_string())?;
    let mut document = config.document;
    document.render_overview = config.output.save_overview;
    document.keep_line_masks = config.output.save_masks;

    let source = ImageFileSource::new(config.inputs.iter().cloned());
    let detection = process_document(&detector, &source, &document);

    let stem = config.output_stem();
    let mut sink = FsRegionSink::new(&config.output.dir, stem.clone());
    let report = detection.export(&mut sink);

    if config.output.save_masks {
        save_line_masks(&config, &stem, &detection)?;
    }
    if let Some(path) = &config.output.summary_json {
        write_json_file(path, &detection.summary).map_err(|e| e.to_string())?;
    }

    print_text_summary(&detection);
    println!(
        "\nWrote {} staff crops and {} overviews to {}",
        report.regions_written,
        report.overviews_written,
        sink.dir().display()
    );
    if report.failures > 0 {
        println!("  {} files could not be written (see log)", report.failures);
    }
    if let Some(path) = &config.output.summary_json {
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn print_text_summary(detection: &DocumentDetection) {
    let summary = &detection.summary;
    println!("Staff detection summary");
    for page in &summary.pages {
        match &page.error {
            Some(err) => println!("  page {}: skipped ({err})", page.page_index + 1),
            None => println!(
                "  page {}: lines={} staves={} elapsed_ms={:.3}",
                page.page_index + 1,
                page.lines,
                page.groups,
                page.elapsed_ms
            ),
        }
        for region in &page.regions {
            let b = &region.bbox;
            println!(
                "    staff {}: lines={} box=[{}, {}, {}, {}]",
                region.group_index + 1,
                region.line_count,
                b.x_min,
                b.y_min,
                b.x_max,
                b.y_max
            );
        }
    }
    println!(
        "\nPages: {} processed, {} failed",
        summary.pages_processed, summary.pages_failed
    );
    println!("Lines detected: {}", summary.total_lines);
    println!("Staves detected: {}", summary.total_groups);
    println!(
        "Average lines per staff: {}",
        format_opt(summary.average_lines_per_group)
    );
}

fn save_line_masks(
    config: &StaffToolConfig,
    stem: &str,
    detection: &DocumentDetection,
) -> Result<(), String> {
    for page in &detection.pages {
        let Ok(processed) = &page.outcome else {
            continue;
        };
        if let Some(mask) = &processed.detection.line_mask {
            let path = config
                .output
                .dir
                .join(format!("{stem}_page_{}_lines.png", page.page_index + 1));
            save_mask(mask, &path).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn format_opt(val: Option<f64>) -> String {
    val.map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn usage() -> String {
    "Usage: staff_demo <config.json>".to_string()
}
