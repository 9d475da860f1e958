//! Layer plans for the rendering side.
//!
//! Each occupied slot becomes one layer covering the whole frame. The image
//! is drawn centred in the layer at its contents scale, so a picture zoomed
//! in past the frame spills over the edges and gets clipped by the renderer.
//! Layers are listed bottom first.

use crate::geometry::Rect;
use crate::session::{ComparisonSession, Role};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerPlan {
    pub role: Role,
    /// Layer bounds, always the full frame.
    pub frame: Rect,
    pub contents_scale: f64,
    pub opacity: f64,
    /// Where the image lands inside the layer.
    pub image_rect: Rect,
}

/// One plan per occupied slot, in stacking order.
pub fn plan_layers(session: &ComparisonSession) -> Vec<LayerPlan> {
    Role::ALL
        .into_iter()
        .filter_map(|role| {
            let model = session.picture(role)?;
            let frame = model.frame();
            Some(LayerPlan {
                role,
                frame: Rect::from_size(frame),
                contents_scale: model.current_scale(),
                opacity: session.opacity_for(role),
                image_rect: Rect::centered(model.displayed_size(), frame),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    const FRAME: Size = Size::new(1000.0, 1000.0);

    #[test]
    fn empty_session_has_no_layers() {
        assert!(plan_layers(&ComparisonSession::new()).is_empty());
    }

    #[test]
    fn layers_are_stacked_bottom_first() {
        let mut session = ComparisonSession::new();
        session
            .set_picture(Role::Top, Size::new(1000.0, 2000.0), FRAME)
            .unwrap();
        session
            .set_picture(Role::Bottom, Size::new(4000.0, 2000.0), FRAME)
            .unwrap();

        let layers = plan_layers(&session);
        let roles: Vec<Role> = layers.iter().map(|l| l.role).collect();
        assert_eq!(roles, vec![Role::Bottom, Role::Top]);
    }

    #[test]
    fn fitted_layer_is_centred() {
        let mut session = ComparisonSession::new();
        session
            .set_picture(Role::Bottom, Size::new(4000.0, 2000.0), FRAME)
            .unwrap();

        let layer = plan_layers(&session)[0];
        assert_eq!(layer.frame, Rect::from_size(FRAME));
        assert_eq!(layer.contents_scale, 4.0);
        assert_eq!(layer.opacity, 1.0);
        assert_eq!(
            layer.image_rect,
            Rect {
                x: 0.0,
                y: 250.0,
                width: 1000.0,
                height: 500.0
            }
        );
    }

    #[test]
    fn top_layer_carries_session_opacity() {
        let mut session = ComparisonSession::new();
        session
            .set_picture(Role::Top, Size::new(2000.0, 2000.0), FRAME)
            .unwrap();
        session.set_top_layer_opacity(0.6);

        let layer = plan_layers(&session)[0];
        assert_eq!(layer.role, Role::Top);
        assert_eq!(layer.opacity, 0.6);
    }

    #[test]
    fn zoomed_in_layer_spills_over_frame() {
        let mut session = ComparisonSession::new();
        session
            .set_picture(Role::Bottom, Size::new(2000.0, 2000.0), FRAME)
            .unwrap();
        session
            .set_picture(Role::Top, Size::new(2000.0, 2000.0), FRAME)
            .unwrap();
        // fit scale 2 → 1: image doubles on screen
        session.apply_pinch(1.5);

        for layer in plan_layers(&session) {
            assert_eq!(layer.contents_scale, 1.0);
            assert_eq!(layer.image_rect.size(), Size::new(2000.0, 2000.0));
            assert_eq!(layer.image_rect.x, -500.0);
        }
    }
}
