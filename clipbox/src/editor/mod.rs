//! Binding layer: editors that wire the controller to a clipping model
//!
//! Both editors share the same lifecycle. Interaction is live only while the
//! editor is observed (some consumer shows its proxies), clipping is enabled
//! and the editor UI is shown. Every setter re-evaluates that condition and
//! installs or tears down the controller accordingly.

mod box_editor;
mod planes_editor;

pub use box_editor::{BoxHandle, ClippingBoxEditor};
pub use planes_editor::{ClippingPlanesEditor, PlaneCollectionDefinition, PlaneDefinition};

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::controller::{Controller, ControllerEvent, TrackedEntities};
use crate::input::PointerEvent;
use crate::scene::SceneView;
use crate::solver::SolverConfig;
use crate::style::{PlaneStyle, PointStyle};
use crate::types::{ClippingPlane, EntityId};
use crate::volume::Corner;

/// User-facing clipping toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ClippingSettings {
    /// Clipping is applied to the model
    pub enabled: bool,
    /// The interactive editor is shown
    pub show_editor: bool,
}

impl Default for ClippingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            show_editor: true,
        }
    }
}

/// Canvas cursor requested by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorStyle {
    #[default]
    Auto,
    /// Over a draggable box
    Move,
    /// Over a draggable handle
    Pointer,
    /// Dragging
    Grabbing,
}

impl CursorStyle {
    /// CSS cursor keyword
    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Auto => "auto",
            CursorStyle::Move => "move",
            CursorStyle::Pointer => "pointer",
            CursorStyle::Grabbing => "grabbing",
        }
    }
}

/// A plane proxy for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneEntity {
    pub id: EntityId,
    /// Face index for the box editor, plane index for the planes editor
    pub index: usize,
    pub position: DVec3,
    pub plane: ClippingPlane,
    pub dimensions: DVec2,
    pub style: PlaneStyle,
}

/// A corner proxy for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointEntity {
    pub id: EntityId,
    pub corner: Corner,
    pub position: DVec3,
    /// Plane proxies touching this corner, one per axis X, Y, Z
    pub adjacent_planes: [EntityId; 3],
    pub style: PointStyle,
}

/// Everything the renderer draws for an editor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedEntities {
    pub planes: Vec<PlaneEntity>,
    pub points: Vec<PointEntity>,
}

impl RenderedEntities {
    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty() && self.points.is_empty()
    }

    /// Number of proxies
    pub fn len(&self) -> usize {
        self.planes.len() + self.points.len()
    }
}

/// Activation state shared by the editors
#[derive(Debug)]
pub(crate) struct EditorSession {
    settings: ClippingSettings,
    observed: bool,
    controller: Option<Controller>,
    solver: SolverConfig,
    generation: u64,
    cursor: CursorStyle,
}

impl EditorSession {
    pub(crate) fn new(settings: ClippingSettings, solver: SolverConfig) -> Self {
        Self {
            settings,
            observed: false,
            controller: None,
            solver,
            generation: 0,
            cursor: CursorStyle::Auto,
        }
    }

    pub(crate) fn settings(&self) -> ClippingSettings {
        self.settings
    }

    pub(crate) fn settings_mut(&mut self) -> &mut ClippingSettings {
        &mut self.settings
    }

    pub(crate) fn set_observed(&mut self, observed: bool) {
        self.observed = observed;
    }

    pub(crate) fn is_observed(&self) -> bool {
        self.observed
    }

    /// Whether the controller should be live, given the editor's own
    /// precondition (e.g. it has something to edit)
    pub(crate) fn wants_interaction(&self, available: bool) -> bool {
        available && self.observed && self.settings.enabled && self.settings.show_editor
    }

    pub(crate) fn is_active(&self) -> bool {
        self.controller.is_some()
    }

    /// Counter bumped by every activation
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    /// Install a controller; no-op when one is live
    pub(crate) fn activate(&mut self) -> bool {
        if self.controller.is_some() {
            return false;
        }
        self.controller = Some(Controller::new(self.solver));
        self.generation += 1;
        crate::clip_debug!("clipping editor activated (generation {})", self.generation);
        true
    }

    /// Tear the controller down; no-op when none is live
    pub(crate) fn deactivate(&mut self, scene: &mut dyn SceneView) -> bool {
        let Some(mut controller) = self.controller.take() else {
            return false;
        };
        controller.destroy(scene);
        self.cursor = CursorStyle::Auto;
        crate::clip_debug!("clipping editor deactivated");
        true
    }

    /// Bring the controller in line with [`Self::wants_interaction`]
    ///
    /// Returns `Some(true)` when a controller was installed and `Some(false)`
    /// when one was torn down.
    pub(crate) fn sync(&mut self, scene: &mut dyn SceneView, available: bool) -> Option<bool> {
        if self.wants_interaction(available) {
            self.activate().then_some(true)
        } else {
            self.deactivate(scene).then_some(false)
        }
    }

    pub(crate) fn handle(
        &mut self,
        event: PointerEvent,
        scene: &mut dyn SceneView,
        entities: &dyn TrackedEntities,
    ) -> Vec<ControllerEvent> {
        match self.controller.as_mut() {
            Some(controller) => controller.handle(event, scene, entities),
            None => Vec::new(),
        }
    }

    pub(crate) fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }
}

/// Allocate `count` consecutive entity ids unique within the process
pub(crate) fn allocate_entity_ids(count: usize) -> Vec<EntityId> {
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT: AtomicU64 = AtomicU64::new(1);
    let base = NEXT.fetch_add(count as u64, Ordering::Relaxed);
    (0..count as u64).map(|offset| EntityId(base + offset)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::oblique_scene;

    #[test]
    fn test_session_activation_requires_every_flag() {
        let mut scene = oblique_scene();
        let mut session = EditorSession::new(ClippingSettings::default(), SolverConfig::default());
        assert_eq!(session.sync(&mut scene, true), None);

        session.set_observed(true);
        assert_eq!(session.sync(&mut scene, true), None);

        session.settings_mut().enabled = true;
        assert_eq!(session.sync(&mut scene, true), Some(true));
        assert_eq!(session.sync(&mut scene, true), None);
        assert_eq!(session.generation(), 1);

        assert_eq!(session.sync(&mut scene, false), Some(false));
        assert!(!session.is_active());
    }

    #[test]
    fn test_activate_is_reentrant() {
        let mut scene = oblique_scene();
        let mut session = EditorSession::new(ClippingSettings::default(), SolverConfig::default());
        assert!(session.activate());
        let id = session.controller().and_then(|c| c.registration()).map(|r| r.id());
        assert!(!session.activate());
        assert_eq!(
            session.controller().and_then(|c| c.registration()).map(|r| r.id()),
            id
        );
        assert!(session.deactivate(&mut scene));
        assert!(!session.deactivate(&mut scene));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let a = allocate_entity_ids(6);
        let b = allocate_entity_ids(8);
        assert_eq!(a.len(), 6);
        assert!(a.iter().all(|id| !b.contains(id)));
    }

    #[test]
    fn test_cursor_keywords() {
        assert_eq!(CursorStyle::default().as_css(), "auto");
        assert_eq!(CursorStyle::Grabbing.as_css(), "grabbing");
    }
}
