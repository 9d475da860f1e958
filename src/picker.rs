//! Photo picker configuration.
//!
//! The picker itself lives on the platform side. What the core owns is the
//! configuration handed to it and the bookkeeping of which slot a pick was
//! started for: a [`PickRequest`] carries its target [`Role`], so results
//! can never land in a slot chosen by a later tap.

use crate::geometry::Size;
use crate::scale::ScaleError;
use crate::session::{ComparisonSession, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kinds of media the picker may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFilter {
    Images,
    Screenshots,
    LivePhotos,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    /// Maximum number of results taken from one pick.
    pub selection_limit: usize,
    /// Media kinds the picker offers.
    pub filter: Vec<MediaFilter>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            selection_limit: 1,
            filter: vec![MediaFilter::Images, MediaFilter::Screenshots],
        }
    }
}

impl PickerConfig {
    pub fn admits(&self, kind: MediaFilter) -> bool {
        self.filter.contains(&kind)
    }

    /// Start a pick for `role`.
    pub fn request(&self, role: Role) -> PickRequest {
        PickRequest {
            role,
            config: self.clone(),
        }
    }
}

/// One decoded picker result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedImage {
    pub kind: MediaFilter,
    /// Upright natural size of the image.
    pub size: Size,
}

/// A pick in flight for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PickRequest {
    role: Role,
    config: PickerConfig,
}

impl PickRequest {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Results the configuration admits, up to the selection limit.
    pub fn accept(&self, results: impl IntoIterator<Item = PickedImage>) -> Vec<PickedImage> {
        results
            .into_iter()
            .filter(|picked| self.config.admits(picked.kind))
            .take(self.config.selection_limit)
            .collect()
    }

    /// Put the accepted results into the session's slot for this request.
    ///
    /// Each result replaces the previous one, so the last accepted result is
    /// what ends up in the slot. Returns how many results were applied.
    pub fn apply(
        &self,
        session: &mut ComparisonSession,
        results: impl IntoIterator<Item = PickedImage>,
    ) -> Result<usize, ScaleError> {
        let accepted = self.accept(results);
        for picked in &accepted {
            session.set_picture_in_frame(self.role, picked.size)?;
        }
        debug!(role = %self.role, applied = accepted.len(), "pick applied");
        Ok(accepted.len())
    }
}
