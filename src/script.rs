//! Scripted comparison sessions.
//!
//! A script is a TOML file with an ordered list of `[[step]]` tables, each
//! tagged by `action`. Replaying it drives a [`ComparisonSession`] exactly
//! the way a UI would: layout, picks, pinches and slider moves.
//!
//! ```toml
//! [[step]]
//! action = "frame"
//! width = 1000.0
//! height = 1000.0
//!
//! [[step]]
//! action = "picture"
//! role = "bottom"
//! path = "before.jpg"          # probed, relative to the script
//!
//! [[step]]
//! action = "picture"
//! role = "top"
//! width = 4000.0               # or a size, without any file
//! height = 2000.0
//!
//! [[step]]
//! action = "opacity"
//! value = 0.5
//!
//! [[step]]
//! action = "pinch"
//! scale = 0.9
//!
//! [[step]]
//! action = "clear"
//! role = "top"
//! ```
//!
//! The session starts in the configured default frame with the configured
//! initial opacity.

use crate::config::CompareConfig;
use crate::geometry::Size;
use crate::imaging::{self, ImagingError};
use crate::picker::{MediaFilter, PickedImage};
use crate::render::{LayerPlan, plan_layers};
use crate::scale::ScaleError;
use crate::session::{ComparisonSession, PinchOutcome, Role};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Step {index}: {reason}")]
    InvalidStep { index: usize, reason: String },
    #[error("Step {index}: {source}")]
    Scale {
        index: usize,
        #[source]
        source: ScaleError,
    },
    #[error("Step {index}: {source}")]
    Imaging {
        index: usize,
        #[source]
        source: ImagingError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase", deny_unknown_fields)]
pub enum Step {
    /// Lay out the frame (first layout or rotation).
    Frame { width: f64, height: f64 },
    /// Pick a picture for a slot, from a file or a bare size.
    Picture {
        role: Role,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
        /// Media kind reported by the picker, images when omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<MediaFilter>,
    },
    /// One pinch gesture update with the raw recognizer scale.
    Pinch { scale: f64 },
    /// Move the opacity slider.
    Opacity { value: f64 },
    /// Remove a slot's picture.
    Clear { role: Role },
}

/// What a step did to the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    FrameSet {
        frame: Size,
    },
    PictureSet {
        role: Role,
        image: Size,
        original_scale: f64,
        current_scale: f64,
    },
    PictureRejected {
        role: Role,
        kind: MediaFilter,
    },
    Pinched(PinchOutcome),
    PinchIgnored,
    OpacitySet {
        opacity: f64,
    },
    Cleared {
        role: Role,
        was_present: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Result of a replay: one record per step and the final layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepRecord>,
    pub top_layer_opacity: f64,
    pub layers: Vec<LayerPlan>,
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Script, ScriptError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Run `script` against a fresh session.
///
/// Picture paths are resolved against `base_dir`. The first failing step
/// aborts the replay.
pub fn replay(
    script: &Script,
    config: &CompareConfig,
    base_dir: &Path,
) -> Result<ReplayReport, ScriptError> {
    let mut session = ComparisonSession::new().with_initial_opacity(config.session.initial_opacity);
    session
        .update_frame_size(config.frame.size())
        .map_err(|source| ScriptError::Scale { index: 0, source })?;

    let mut steps = Vec::with_capacity(script.steps.len());
    for (i, step) in script.steps.iter().enumerate() {
        let index = i + 1;
        let outcome = run_step(&mut session, config, base_dir, index, step)?;
        debug!(index, ?outcome, "step done");
        steps.push(StepRecord {
            index,
            step: step.clone(),
            outcome,
        });
    }

    let layers = plan_layers(&session);
    info!(steps = steps.len(), layers = layers.len(), "replay complete");
    Ok(ReplayReport {
        steps,
        top_layer_opacity: session.top_layer_opacity(),
        layers,
    })
}

fn run_step(
    session: &mut ComparisonSession,
    config: &CompareConfig,
    base_dir: &Path,
    index: usize,
    step: &Step,
) -> Result<StepOutcome, ScriptError> {
    let scale_err = |source: ScaleError| ScriptError::Scale { index, source };

    let outcome = match step {
        Step::Frame { width, height } => {
            let frame = Size::new(*width, *height);
            session.update_frame_size(frame).map_err(scale_err)?;
            StepOutcome::FrameSet { frame }
        }
        Step::Picture {
            role,
            path,
            width,
            height,
            kind,
        } => {
            let image = picture_size(base_dir, index, path.as_deref(), *width, *height)?;
            let kind = kind.unwrap_or(MediaFilter::Images);
            let applied = config
                .picker
                .request(*role)
                .apply(session, [PickedImage { kind, size: image }])
                .map_err(scale_err)?;
            match session.picture(*role) {
                Some(model) if applied > 0 => StepOutcome::PictureSet {
                    role: *role,
                    image,
                    original_scale: model.original_scale(),
                    current_scale: model.current_scale(),
                },
                _ => StepOutcome::PictureRejected { role: *role, kind },
            }
        }
        Step::Pinch { scale } => match session.apply_pinch(*scale) {
            Some(outcome) => StepOutcome::Pinched(outcome),
            None => StepOutcome::PinchIgnored,
        },
        Step::Opacity { value } => StepOutcome::OpacitySet {
            opacity: session.set_top_layer_opacity(*value),
        },
        Step::Clear { role } => StepOutcome::Cleared {
            role: *role,
            was_present: session.clear(*role).is_some(),
        },
    };
    Ok(outcome)
}

fn picture_size(
    base_dir: &Path,
    index: usize,
    path: Option<&Path>,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<Size, ScriptError> {
    match (path, width, height) {
        (Some(path), None, None) => imaging::probe(&base_dir.join(path))
            .map(|probed| probed.upright)
            .map_err(|source| ScriptError::Imaging { index, source }),
        (None, Some(width), Some(height)) => Ok(Size::new(width, height)),
        _ => Err(ScriptError::InvalidStep {
            index,
            reason: "picture needs either `path` or both `width` and `height`".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Script {
        toml::from_str(toml).unwrap()
    }

    fn run(toml: &str) -> Result<ReplayReport, ScriptError> {
        replay(&parse(toml), &CompareConfig::default(), Path::new("."))
    }

    #[test]
    fn parse_every_action() {
        let script = parse(
            r#"
[[step]]
action = "frame"
width = 1000
height = 1000

[[step]]
action = "picture"
role = "bottom"
path = "a.jpg"

[[step]]
action = "picture"
role = "top"
width = 10.0
height = 20.0
kind = "screenshots"

[[step]]
action = "pinch"
scale = 0.9

[[step]]
action = "opacity"
value = 0.5

[[step]]
action = "clear"
role = "top"
"#,
        );
        assert_eq!(
            script.steps,
            vec![
                Step::Frame {
                    width: 1000.0,
                    height: 1000.0
                },
                Step::Picture {
                    role: Role::Bottom,
                    path: Some("a.jpg".into()),
                    width: None,
                    height: None,
                    kind: None,
                },
                Step::Picture {
                    role: Role::Top,
                    path: None,
                    width: Some(10.0),
                    height: Some(20.0),
                    kind: Some(MediaFilter::Screenshots),
                },
                Step::Pinch { scale: 0.9 },
                Step::Opacity { value: 0.5 },
                Step::Clear { role: Role::Top },
            ]
        );
    }

    #[test]
    fn misspelled_step_key_rejected() {
        let err = toml::from_str::<Script>(
            r#"
[[step]]
action = "picture"
role = "top"
width = 10.0
height = 10.0
knd = "live_photos"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("knd"));
    }

    #[test]
    fn empty_script_has_no_layers() {
        let report = run("").unwrap();
        assert!(report.steps.is_empty());
        assert!(report.layers.is_empty());
        assert_eq!(report.top_layer_opacity, 0.0);
    }

    #[test]
    fn pictures_use_default_frame_without_frame_step() {
        let report = run(
            r#"
[[step]]
action = "picture"
role = "bottom"
width = 3900.0
height = 3000.0
"#,
        )
        .unwrap();
        // default frame 390x600 → width scale 10 fits
        assert_eq!(
            report.steps[0].outcome,
            StepOutcome::PictureSet {
                role: Role::Bottom,
                image: Size::new(3900.0, 3000.0),
                original_scale: 10.0,
                current_scale: 10.0,
            }
        );
    }

    #[test]
    fn pinch_before_both_pictures_is_ignored() {
        let report = run(
            r#"
[[step]]
action = "picture"
role = "bottom"
width = 100.0
height = 100.0

[[step]]
action = "pinch"
scale = 0.5
"#,
        )
        .unwrap();
        assert_eq!(report.steps[1].outcome, StepOutcome::PinchIgnored);
    }

    #[test]
    fn opacity_outcome_is_clamped() {
        let report = run(
            r#"
[[step]]
action = "opacity"
value = 3.0
"#,
        )
        .unwrap();
        assert_eq!(report.steps[0].outcome, StepOutcome::OpacitySet { opacity: 1.0 });
        assert_eq!(report.top_layer_opacity, 1.0);
    }

    #[test]
    fn filtered_kind_is_rejected() {
        let report = run(
            r#"
[[step]]
action = "picture"
role = "top"
width = 100.0
height = 100.0
kind = "live_photos"
"#,
        )
        .unwrap();
        assert_eq!(
            report.steps[0].outcome,
            StepOutcome::PictureRejected {
                role: Role::Top,
                kind: MediaFilter::LivePhotos
            }
        );
        assert!(report.layers.is_empty());
    }

    #[test]
    fn picture_without_source_is_invalid() {
        let err = run(
            r#"
[[step]]
action = "picture"
role = "top"
width = 100.0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidStep { index: 1, .. }));
    }

    #[test]
    fn zero_frame_fails_with_step_index() {
        let err = run(
            r#"
[[step]]
action = "opacity"
value = 0.1

[[step]]
action = "frame"
width = 0.0
height = 100.0
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Scale {
                index: 2,
                source: ScaleError::InvalidFrame { .. }
            }
        ));
    }

    #[test]
    fn clear_reports_presence() {
        let report = run(
            r#"
[[step]]
action = "clear"
role = "bottom"
"#,
        )
        .unwrap();
        assert_eq!(
            report.steps[0].outcome,
            StepOutcome::Cleared {
                role: Role::Bottom,
                was_present: false
            }
        );
    }
}
