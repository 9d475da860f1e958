//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Fit
//!
//! ```text
//! Picture 4000x2000 (before.jpg)
//!     Frame: 1000x1000
//!     Width scale: 4
//!     Height scale: 2
//!     Fit scale: 4
//!     Displayed: 1000x500
//!     Pinch range: 1 to 6
//! ```
//!
//! ## Replay
//!
//! ```text
//! Steps
//! 001 frame 1000x1000
//! 002 picture bottom 4000x2000 → scale 4
//! 003 pinch 0.9 → bottom 4.4, top 4.4
//!
//! Layers
//! 001 bottom
//!     Scale: 4.4
//!     Opacity: 1
//!     Image: 909.09x454.55 at (45.45, 272.73)
//! ```

use crate::geometry::{Rect, Size};
use crate::render::LayerPlan;
use crate::scale::PictureScaleModel;
use crate::script::{ReplayReport, StepOutcome, StepRecord};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Number with at most two decimals and no trailing zeros.
fn format_number(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn format_size(size: Size) -> String {
    format!(
        "{}x{}",
        format_number(size.width),
        format_number(size.height)
    )
}

fn format_rect(rect: &Rect) -> String {
    format!(
        "{} at ({}, {})",
        format_size(rect.size()),
        format_number(rect.x),
        format_number(rect.y)
    )
}

// ============================================================================
// Fit
// ============================================================================

/// Format the fit of one picture into a frame.
pub fn format_fit(model: &PictureScaleModel, source: Option<&str>) -> Vec<String> {
    let image = model.image();
    let frame = model.frame();
    let header = match source {
        Some(name) => format!("Picture {} ({})", format_size(image), name),
        None => format!("Picture {}", format_size(image)),
    };
    vec![
        header,
        format!("    Frame: {}", format_size(frame)),
        format!(
            "    Width scale: {}",
            format_number(image.width / frame.width)
        ),
        format!(
            "    Height scale: {}",
            format_number(image.height / frame.height)
        ),
        format!("    Fit scale: {}", format_number(model.original_scale())),
        format!("    Displayed: {}", format_size(model.displayed_size())),
        format!(
            "    Pinch range: {} to {}",
            format_number(crate::scale::MIN_SCALE),
            format_number(model.max_scale())
        ),
    ]
}

pub fn print_fit(model: &PictureScaleModel, source: Option<&str>) {
    for line in format_fit(model, source) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

fn step_line(record: &StepRecord) -> String {
    let detail = match &record.outcome {
        StepOutcome::FrameSet { frame } => format!("frame {}", format_size(*frame)),
        StepOutcome::PictureSet {
            role,
            image,
            original_scale,
            ..
        } => format!(
            "picture {} {} → scale {}",
            role,
            format_size(*image),
            format_number(*original_scale)
        ),
        StepOutcome::PictureRejected { role, kind } => {
            format!("picture {} rejected ({:?} not offered)", role, kind)
        }
        StepOutcome::Pinched(outcome) => format!(
            "pinch {} → bottom {}, top {}",
            format_number(pinch_scale(record)),
            format_number(outcome.bottom_scale),
            format_number(outcome.top_scale)
        ),
        StepOutcome::PinchIgnored => format!(
            "pinch {} ignored (needs both pictures)",
            format_number(pinch_scale(record))
        ),
        StepOutcome::OpacitySet { opacity } => format!("opacity {}", format_number(*opacity)),
        StepOutcome::Cleared { role, was_present } => {
            if *was_present {
                format!("clear {}", role)
            } else {
                format!("clear {} (already empty)", role)
            }
        }
    };
    format!("{} {}", format_index(record.index), detail)
}

fn pinch_scale(record: &StepRecord) -> f64 {
    match record.step {
        crate::script::Step::Pinch { scale } => scale,
        _ => 1.0,
    }
}

fn layer_lines(position: usize, layer: &LayerPlan) -> Vec<String> {
    vec![
        format!("{} {}", format_index(position), layer.role),
        format!("    Scale: {}", format_number(layer.contents_scale)),
        format!("    Opacity: {}", format_number(layer.opacity)),
        format!("    Image: {}", format_rect(&layer.image_rect)),
    ]
}

/// Format a replay report: step log, then the final layer stack.
pub fn format_replay(report: &ReplayReport) -> Vec<String> {
    let mut lines = vec!["Steps".to_string()];
    if report.steps.is_empty() {
        lines.push("    (none)".to_string());
    }
    lines.extend(report.steps.iter().map(step_line));

    lines.push(String::new());
    lines.push("Layers".to_string());
    if report.layers.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, layer) in report.layers.iter().enumerate() {
        lines.extend(layer_lines(i + 1, layer));
    }
    lines
}

pub fn print_replay(report: &ReplayReport) {
    for line in format_replay(report) {
        println!("{}", line);
    }
}
