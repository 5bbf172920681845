use glam::{DMat4, DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    ClippingSettings, CursorStyle, EditorSession, PlaneEntity, RenderedEntities,
    allocate_entity_ids,
};
use crate::config::ClippingConfig;
use crate::controller::{ControllerEvent, ControllerEventKind, DragPlane, TrackedEntities};
use crate::dimensions::{
    DimensionAction, SelectableDimensionGroup, clipping_dimension_group, parse_selection,
};
use crate::error::{ClipError, ClipResult};
use crate::input::PointerEvent;
use crate::memo::Memo;
use crate::scene::SceneView;
use crate::style::{Color, Highlight};
use crate::types::{BoundingSphere, ClippingPlane, EntityId};
use crate::volume::ClippingPlaneCollection;

/// A stored clipping plane
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaneDefinition {
    pub normal: DVec3,
    pub distance: f64,
}

impl PlaneDefinition {
    pub const fn new(normal: DVec3, distance: f64) -> Self {
        Self { normal, distance }
    }

    fn to_plane(self) -> ClippingPlane {
        ClippingPlane::new(self.normal.normalize_or_zero(), self.distance)
    }
}

/// A stored clipping plane collection, as persisted with the model
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PlaneCollectionDefinition {
    pub planes: Vec<PlaneDefinition>,
    pub enabled: bool,
    pub union_clipping_regions: bool,
    pub edge_color: Option<Color>,
    pub edge_width: f32,
    /// Model frame of the planes, identity when absent
    pub model_matrix: Option<DMat4>,
}

struct PlaneTargets<'a> {
    ids: &'a [EntityId],
    live: &'a [ClippingPlane],
    sphere: &'a BoundingSphere,
}

impl PlaneTargets<'_> {
    fn index(&self, entity: EntityId) -> Option<usize> {
        self.ids.iter().position(|id| *id == entity)
    }
}

impl TrackedEntities for PlaneTargets<'_> {
    fn is_tracked(&self, entity: EntityId) -> bool {
        self.index(entity).is_some()
    }

    fn drag_plane(&self, entity: EntityId) -> Option<DragPlane> {
        let plane = *self.live.get(self.index(entity)?)?;
        Some(DragPlane {
            plane,
            anchor: self.sphere.center,
            sampling_distance: self.sphere.radius,
        })
    }
}

type RenderKey = (u64, u64, u64, bool);

/// Interactive editor that slides individual clipping planes along their normals
///
/// Drags only touch a working copy of the planes; the stored definition is
/// updated when the drag is released.
#[derive(Debug)]
pub struct ClippingPlanesEditor {
    config: ClippingConfig,
    sphere: BoundingSphere,
    definition: PlaneCollectionDefinition,
    live: Vec<ClippingPlane>,
    live_revision: u64,
    session: EditorSession,
    ids: Option<Vec<EntityId>>,
    highlights: Vec<Highlight>,
    style_revision: u64,
    rendered: Memo<RenderKey, RenderedEntities>,
}

impl ClippingPlanesEditor {
    /// Create an editor for a stored plane collection around a model
    ///
    /// The collection's `enabled` flag seeds the clipping toggle.
    pub fn new(
        definition: PlaneCollectionDefinition,
        bounds: &BoundingSphere,
        config: ClippingConfig,
    ) -> ClipResult<Self> {
        if !bounds.is_valid() {
            return Err(ClipError::invalid_bounds(format!(
                "bounding sphere radius {} at {:?}",
                bounds.radius, bounds.center
            )));
        }
        config.validate()?;
        let settings = ClippingSettings {
            enabled: definition.enabled,
            ..ClippingSettings::default()
        };
        let mut editor = Self {
            session: EditorSession::new(settings, config.solver),
            config,
            sphere: *bounds,
            live: Vec::new(),
            live_revision: 0,
            highlights: Vec::new(),
            definition,
            ids: None,
            style_revision: 0,
            rendered: Memo::new(),
        };
        editor.reload_live();
        Ok(editor)
    }

    fn reload_live(&mut self) {
        let radius = self.sphere.radius;
        self.live = self
            .definition
            .planes
            .iter()
            .map(|definition| {
                let mut plane = definition.to_plane();
                plane.distance = plane.distance.clamp(-radius, radius);
                plane
            })
            .collect();
        self.highlights = vec![Highlight::None; self.live.len()];
        self.live_revision += 1;
        self.style_revision += 1;
    }

    /// Whether there is anything to edit
    pub fn has_planes(&self) -> bool {
        !self.live.is_empty()
    }

    /// The stored definition
    pub fn definition(&self) -> &PlaneCollectionDefinition {
        &self.definition
    }

    /// Stored planes, as of the last release
    pub fn committed_planes(&self) -> &[PlaneDefinition] {
        &self.definition.planes
    }

    /// Planes including an in-progress drag
    pub fn live_planes(&self) -> &[ClippingPlane] {
        &self.live
    }

    /// Current toggles
    pub fn settings(&self) -> ClippingSettings {
        self.session.settings()
    }

    /// Whether some consumer currently shows the proxies
    pub fn is_observed(&self) -> bool {
        self.session.is_observed()
    }

    /// Whether the pointer handler is live
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Cursor the host should show over the canvas
    pub fn cursor(&self) -> CursorStyle {
        self.session.cursor()
    }

    /// Entity id of plane `index` in the current activation
    pub fn plane_entity(&self, index: usize) -> Option<EntityId> {
        self.ids.as_ref()?.get(index).copied()
    }

    /// Highlight of plane `index`
    pub fn highlight(&self, index: usize) -> Highlight {
        self.highlights.get(index).copied().unwrap_or_default()
    }

    /// Some consumer started showing the editor's proxies
    pub fn activate(&mut self, scene: &mut dyn SceneView) {
        self.session.set_observed(true);
        self.sync(scene);
    }

    /// No consumer shows the proxies any more
    pub fn deactivate(&mut self, scene: &mut dyn SceneView) {
        self.session.set_observed(false);
        self.sync(scene);
    }

    /// Turn clipping on or off; stored with the definition
    pub fn set_enabled(&mut self, scene: &mut dyn SceneView, enabled: bool) {
        self.session.settings_mut().enabled = enabled;
        self.definition.enabled = enabled;
        self.sync(scene);
    }

    /// Show or hide the interactive editor
    pub fn set_show_editor(&mut self, scene: &mut dyn SceneView, show: bool) {
        self.session.settings_mut().show_editor = show;
        self.sync(scene);
    }

    /// Replace the stored definition, dropping any drag in progress
    pub fn set_definition(&mut self, scene: &mut dyn SceneView, definition: PlaneCollectionDefinition) {
        self.session.deactivate(scene);
        self.ids = None;
        self.session.settings_mut().enabled = definition.enabled;
        self.definition = definition;
        self.reload_live();
        self.sync(scene);
    }

    /// Set the distance of plane `index`, clamped to the model bounds
    pub fn set_plane_distance(&mut self, index: usize, distance: f64) -> ClipResult<()> {
        let len = self.live.len();
        let (Some(live), Some(stored)) =
            (self.live.get_mut(index), self.definition.planes.get_mut(index))
        else {
            return Err(ClipError::plane_out_of_range(index, len));
        };
        let radius = self.sphere.radius;
        live.distance = distance.clamp(-radius, radius);
        stored.distance = live.distance;
        self.live_revision += 1;
        Ok(())
    }

    fn sync(&mut self, scene: &mut dyn SceneView) {
        let available = self.has_planes();
        match self.session.sync(scene, available) {
            Some(true) => {
                self.ids = Some(allocate_entity_ids(self.live.len()));
                self.reset_highlights();
            }
            Some(false) => {
                self.ids = None;
                self.reset_highlights();
                // A drag cut short never reaches release
                self.reload_live();
            }
            None => {}
        }
    }

    /// Feed a pointer event; returns the controller events it produced
    pub fn handle_pointer_event(
        &mut self,
        scene: &mut dyn SceneView,
        event: PointerEvent,
    ) -> Vec<ControllerEvent> {
        let Some(ids) = self.ids.as_deref() else {
            return Vec::new();
        };
        let targets = PlaneTargets {
            ids,
            live: &self.live,
            sphere: &self.sphere,
        };
        let events = self.session.handle(event, scene, &targets);
        for event in &events {
            self.apply(event);
        }
        events
    }

    fn apply(&mut self, event: &ControllerEvent) {
        let Some(index) = self
            .ids
            .as_ref()
            .and_then(|ids| ids.iter().position(|id| *id == event.entity))
        else {
            return;
        };
        match event.kind {
            ControllerEventKind::MouseOver => {
                self.set_highlight(index, Highlight::Hovered);
                self.session.set_cursor(CursorStyle::Pointer);
            }
            ControllerEventKind::Pick => {
                self.set_highlight(index, Highlight::Picked);
                self.session.set_cursor(CursorStyle::Grabbing);
            }
            ControllerEventKind::MouseOut => {
                self.set_highlight(index, Highlight::None);
                self.session.set_cursor(CursorStyle::Auto);
            }
            ControllerEventKind::Release => {
                self.set_highlight(index, Highlight::None);
                self.session.set_cursor(CursorStyle::Auto);
                self.commit(index);
            }
            ControllerEventKind::Move { amount, .. } => self.slide(index, amount),
        }
    }

    fn slide(&mut self, index: usize, amount: f64) {
        if amount == 0.0 || !amount.is_finite() {
            return;
        }
        let radius = self.sphere.radius;
        if let Some(plane) = self.live.get_mut(index) {
            plane.distance = (plane.distance + amount).clamp(-radius, radius);
            self.live_revision += 1;
        }
    }

    fn commit(&mut self, index: usize) {
        if let (Some(live), Some(stored)) =
            (self.live.get(index), self.definition.planes.get_mut(index))
        {
            stored.distance = live.distance;
            crate::clip_info!("clipping plane {} committed at distance {}", index, live.distance);
        }
    }

    fn set_highlight(&mut self, index: usize, highlight: Highlight) {
        if let Some(slot) = self.highlights.get_mut(index)
            && *slot != highlight
        {
            *slot = highlight;
            self.style_revision += 1;
        }
    }

    fn reset_highlights(&mut self) {
        self.highlights.fill(Highlight::None);
        self.style_revision += 1;
    }

    /// Proxies for the renderer; empty while interaction is off
    pub fn rendered_entities(&mut self) -> &RenderedEntities {
        let key = (
            self.live_revision,
            self.style_revision,
            self.session.generation(),
            self.ids.is_some(),
        );
        let side = self.sphere.radius * self.config.plane_size_factor;
        let center = self.sphere.center;
        let Self {
            rendered,
            ids,
            live,
            highlights,
            config,
            ..
        } = self;
        let (ids, live, highlights, style) = (ids.as_deref(), &*live, &*highlights, &config.style);
        rendered.get_or_compute(key, || {
            let Some(ids) = ids else {
                return RenderedEntities::default();
            };
            let planes = ids
                .iter()
                .zip(live)
                .zip(highlights)
                .enumerate()
                .map(|(index, ((id, plane), highlight))| PlaneEntity {
                    id: *id,
                    index,
                    position: center,
                    plane: *plane,
                    dimensions: DVec2::splat(side),
                    style: style.free_plane(*highlight),
                })
                .collect();
            RenderedEntities {
                planes,
                points: Vec::new(),
            }
        })
    }

    /// How many times the proxies were rebuilt
    pub fn render_recomputations(&self) -> usize {
        self.rendered.recomputations()
    }

    /// Planes for the renderer, `None` when the collection is empty
    pub fn clipping_plane_collection(&self) -> Option<ClippingPlaneCollection> {
        if !self.has_planes() {
            return None;
        }
        Some(ClippingPlaneCollection {
            planes: self.live.clone(),
            model_matrix: self.definition.model_matrix.unwrap_or(DMat4::IDENTITY),
            enabled: self.session.settings().enabled,
            union_clipping_regions: self.definition.union_clipping_regions,
            edge_color: self.definition.edge_color,
            edge_width: self.definition.edge_width,
        })
    }

    /// UI toggles, `None` when there is nothing to clip with
    pub fn dimension_group(&self) -> Option<SelectableDimensionGroup> {
        self.has_planes()
            .then(|| clipping_dimension_group(&self.session.settings()))
    }

    /// Apply a selection made in the UI
    pub fn apply_dimension(
        &mut self,
        scene: &mut dyn SceneView,
        id: &str,
        value: &str,
    ) -> ClipResult<()> {
        match parse_selection(id, value)? {
            DimensionAction::SetEnabled(enabled) => self.set_enabled(scene, enabled),
            DimensionAction::SetShowEditor(show) => self.set_show_editor(scene, show),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessScene;
    use crate::test_util::{EQUATOR, side_view_scene};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    const RADIUS: f64 = 10.0;

    fn definition() -> PlaneCollectionDefinition {
        PlaneCollectionDefinition {
            planes: vec![
                PlaneDefinition::new(DVec3::X, 2.0),
                PlaneDefinition::new(DVec3::NEG_Z, 0.0),
            ],
            enabled: true,
            ..Default::default()
        }
    }

    fn editor() -> ClippingPlanesEditor {
        ClippingPlanesEditor::new(
            definition(),
            &BoundingSphere::new(EQUATOR, RADIUS),
            ClippingConfig::default(),
        )
        .unwrap()
    }

    fn active_editor(scene: &mut HeadlessScene) -> (ClippingPlanesEditor, DVec2) {
        let mut editor = editor();
        editor.activate(scene);
        let id = editor.plane_entity(0).unwrap();
        let at = scene.add_world_target(id, EQUATOR, 20.0).unwrap();
        (editor, at)
    }

    #[test]
    fn test_empty_collection_is_unavailable() {
        let mut scene = side_view_scene();
        let mut editor = ClippingPlanesEditor::new(
            PlaneCollectionDefinition {
                enabled: true,
                ..Default::default()
            },
            &BoundingSphere::new(EQUATOR, RADIUS),
            ClippingConfig::default(),
        )
        .unwrap();
        editor.activate(&mut scene);
        assert!(!editor.is_active());
        assert!(editor.rendered_entities().is_empty());
        assert!(editor.dimension_group().is_none());
        assert!(editor.clipping_plane_collection().is_none());
    }

    #[test]
    fn test_rendered_planes_sit_on_the_sphere() {
        let mut scene = side_view_scene();
        let mut editor = editor();
        editor.activate(&mut scene);
        let entities = editor.rendered_entities();
        assert_eq!(entities.planes.len(), 2);
        assert!(entities.points.is_empty());
        let plane = entities.planes[1];
        assert_eq!(plane.index, 1);
        assert_eq!(plane.position, EQUATOR);
        assert_relative_eq!(plane.dimensions.x, RADIUS * 2.25);
        assert_eq!(plane.plane, ClippingPlane::new(DVec3::NEG_Z, 0.0));
    }

    #[test]
    fn test_drag_commits_on_release_only() {
        let mut scene = side_view_scene();
        let (mut editor, at) = active_editor(&mut scene);

        editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: at });
        assert_eq!(editor.highlight(0), Highlight::Picked);
        assert_eq!(editor.cursor(), CursorStyle::Grabbing);

        editor.handle_pointer_event(
            &mut scene,
            PointerEvent::Move {
                position: at + DVec2::new(400.0, 0.0),
            },
        );
        let live = editor.live_planes()[0].distance;
        assert_relative_eq!(live, -RADIUS);
        assert_eq!(editor.committed_planes()[0].distance, 2.0);

        editor.handle_pointer_event(&mut scene, PointerEvent::LeftUp { position: at });
        assert_eq!(editor.committed_planes()[0].distance, live);
        assert_eq!(editor.highlight(0), Highlight::None);
        assert_eq!(editor.cursor(), CursorStyle::Auto);
        assert!(scene.camera_input_enabled());
    }

    #[test]
    fn test_hover_uses_pointer_cursor() {
        let mut scene = side_view_scene();
        let (mut editor, at) = active_editor(&mut scene);
        editor.handle_pointer_event(&mut scene, PointerEvent::Move { position: at });
        assert_eq!(editor.highlight(0), Highlight::Hovered);
        assert_eq!(editor.cursor(), CursorStyle::Pointer);
        let style = editor.rendered_entities().planes[0].style;
        assert_eq!(style.outline_width, 5.0);

        editor.handle_pointer_event(&mut scene, PointerEvent::CanvasLeave);
        assert_eq!(editor.highlight(0), Highlight::None);
        assert_eq!(editor.cursor(), CursorStyle::Auto);
    }

    #[test]
    fn test_hiding_mid_drag_discards_live_distance() {
        let mut scene = side_view_scene();
        let (mut editor, at) = active_editor(&mut scene);
        editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: at });
        editor.handle_pointer_event(
            &mut scene,
            PointerEvent::Move {
                position: at + DVec2::new(400.0, 0.0),
            },
        );
        editor.set_show_editor(&mut scene, false);
        assert!(!editor.is_active());
        assert!(scene.camera_input_enabled());
        assert_eq!(editor.live_planes()[0].distance, 2.0);
    }

    #[test]
    fn test_set_plane_distance() {
        let mut editor = editor();
        editor.set_plane_distance(1, -25.0).unwrap();
        assert_eq!(editor.committed_planes()[1].distance, -RADIUS);
        assert_eq!(editor.live_planes()[1].distance, -RADIUS);
        assert_eq!(
            editor.set_plane_distance(2, 0.0),
            Err(ClipError::PlaneOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_collection_carries_definition() {
        let mut scene = side_view_scene();
        let mut editor = editor();
        let collection = editor.clipping_plane_collection().unwrap();
        assert!(collection.enabled);
        assert!(!collection.union_clipping_regions);
        assert_eq!(collection.model_matrix, DMat4::IDENTITY);

        editor
            .apply_dimension(&mut scene, "clipModel", "false")
            .unwrap();
        assert!(!editor.definition().enabled);
        assert!(!editor.clipping_plane_collection().unwrap().enabled);
    }
}
