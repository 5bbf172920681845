use glam::DMat4;

use super::{
    ClippingSettings, CursorStyle, EditorSession, PlaneEntity, PointEntity, RenderedEntities,
    allocate_entity_ids,
};
use crate::config::ClippingConfig;
use crate::controller::{
    ControllerEvent, ControllerEventKind, DragPlane, InteractionState, TrackedEntities,
};
use crate::dimensions::{
    DimensionAction, SelectableDimensionGroup, clipping_dimension_group, parse_selection,
};
use crate::error::ClipResult;
use crate::input::PointerEvent;
use crate::memo::Memo;
use crate::scene::SceneView;
use crate::style::Highlight;
use crate::types::{BoundingSphere, EntityId, PointerMovement};
use crate::volume::{ClippingPlaneCollection, ClippingVolume, Corner, Face};

/// A box proxy resolved from an entity id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxHandle {
    Face(Face),
    Corner(Corner),
}

/// Entity ids of one activation
#[derive(Debug, Clone, PartialEq)]
struct BoxHandles {
    faces: [EntityId; 6],
    corners: [EntityId; 8],
}

impl BoxHandles {
    fn allocate() -> Self {
        let ids = allocate_entity_ids(14);
        let mut faces = [EntityId(0); 6];
        let mut corners = [EntityId(0); 8];
        faces.copy_from_slice(&ids[..6]);
        corners.copy_from_slice(&ids[6..]);
        Self { faces, corners }
    }

    fn resolve(&self, entity: EntityId) -> Option<BoxHandle> {
        if let Some(i) = self.faces.iter().position(|id| *id == entity) {
            return Face::from_index(i).map(BoxHandle::Face);
        }
        self.corners
            .iter()
            .position(|id| *id == entity)
            .and_then(Corner::from_index)
            .map(BoxHandle::Corner)
    }

    fn face(&self, face: Face) -> EntityId {
        self.faces[face.index()]
    }

    fn corner(&self, corner: Corner) -> EntityId {
        self.corners[corner.index()]
    }
}

/// Tracked set handed to the controller
struct BoxTargets<'a> {
    handles: &'a BoxHandles,
    volume: &'a ClippingVolume,
}

impl TrackedEntities for BoxTargets<'_> {
    fn is_tracked(&self, entity: EntityId) -> bool {
        self.handles.resolve(entity).is_some()
    }

    fn drag_plane(&self, entity: EntityId) -> Option<DragPlane> {
        match self.handles.resolve(entity)? {
            BoxHandle::Face(face) => Some(DragPlane {
                plane: self.volume.scaled_plane(face),
                anchor: self.volume.position(),
                sampling_distance: self.volume.dimensions()[face.axis().index()],
            }),
            // Corner drags are resolved per axis by the volume
            BoxHandle::Corner(_) => None,
        }
    }
}

type RenderKey = (u64, u64, u64, bool);

/// Interactive editor for a clipping box around one model
///
/// Faces translate the box, corners scale it from the dragged corner. The box
/// outlives activations: hiding the editor releases the pointer handler and the
/// proxies but keeps the box where the user left it.
#[derive(Debug)]
pub struct ClippingBoxEditor {
    config: ClippingConfig,
    volume: ClippingVolume,
    session: EditorSession,
    handles: Option<BoxHandles>,
    face_highlights: [Highlight; 6],
    corner_highlights: [Highlight; 8],
    style_revision: u64,
    rendered: Memo<RenderKey, RenderedEntities>,
}

impl ClippingBoxEditor {
    /// Create an editor for a model with the given origin and bounds
    pub fn new(
        origin: DMat4,
        bounds: &BoundingSphere,
        settings: ClippingSettings,
        config: ClippingConfig,
    ) -> ClipResult<Self> {
        let volume = ClippingVolume::from_bounding_sphere(origin, bounds, &config)?;
        Ok(Self {
            session: EditorSession::new(settings, config.solver),
            config,
            volume,
            handles: None,
            face_highlights: [Highlight::None; 6],
            corner_highlights: [Highlight::None; 8],
            style_revision: 0,
            rendered: Memo::new(),
        })
    }

    /// The clipping volume
    pub fn volume(&self) -> &ClippingVolume {
        &self.volume
    }

    /// Mutable access for programmatic edits
    pub fn volume_mut(&mut self) -> &mut ClippingVolume {
        &mut self.volume
    }

    /// Editor configuration
    pub fn config(&self) -> &ClippingConfig {
        &self.config
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

    /// Controller state, if active
    pub fn interaction_state(&self) -> Option<InteractionState> {
        self.session.controller().map(|controller| controller.state())
    }

    /// The model moved: re-anchor the box
    pub fn set_origin(&mut self, origin: DMat4) {
        self.volume.set_origin(origin);
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

    /// Turn clipping on or off
    pub fn set_enabled(&mut self, scene: &mut dyn SceneView, enabled: bool) {
        self.session.settings_mut().enabled = enabled;
        self.sync(scene);
    }

    /// Show or hide the interactive editor
    pub fn set_show_editor(&mut self, scene: &mut dyn SceneView, show: bool) {
        self.session.settings_mut().show_editor = show;
        self.sync(scene);
    }

    fn sync(&mut self, scene: &mut dyn SceneView) {
        match self.session.sync(scene, true) {
            Some(true) => {
                self.handles = Some(BoxHandles::allocate());
                self.reset_highlights();
            }
            Some(false) => {
                self.handles = None;
                self.reset_highlights();
            }
            None => {}
        }
    }

    /// Resolve an entity id of the current activation
    pub fn resolve(&self, entity: EntityId) -> Option<BoxHandle> {
        self.handles.as_ref()?.resolve(entity)
    }

    /// Entity id of a face in the current activation
    pub fn face_entity(&self, face: Face) -> Option<EntityId> {
        self.handles.as_ref().map(|handles| handles.face(face))
    }

    /// Entity id of a corner in the current activation
    pub fn corner_entity(&self, corner: Corner) -> Option<EntityId> {
        self.handles.as_ref().map(|handles| handles.corner(corner))
    }

    /// Highlight of a face
    pub fn face_highlight(&self, face: Face) -> Highlight {
        self.face_highlights[face.index()]
    }

    /// Highlight of a corner
    pub fn corner_highlight(&self, corner: Corner) -> Highlight {
        self.corner_highlights[corner.index()]
    }

    /// Feed a pointer event; returns the controller events it produced
    pub fn handle_pointer_event(
        &mut self,
        scene: &mut dyn SceneView,
        event: PointerEvent,
    ) -> Vec<ControllerEvent> {
        let Some(handles) = self.handles.as_ref() else {
            return Vec::new();
        };
        let targets = BoxTargets {
            handles,
            volume: &self.volume,
        };
        let events = self.session.handle(event, scene, &targets);
        for event in &events {
            self.apply(&*scene, event);
        }
        events
    }

    fn apply(&mut self, scene: &dyn SceneView, event: &ControllerEvent) {
        let Some(handle) = self.resolve(event.entity) else {
            return;
        };
        match (handle, event.kind) {
            (BoxHandle::Face(_), ControllerEventKind::MouseOver) => {
                self.highlight_faces(Face::ALL, Highlight::Hovered);
                self.session.set_cursor(CursorStyle::Move);
            }
            (BoxHandle::Face(_), ControllerEventKind::Pick) => {
                // a pick can follow a hover on another handle without a mouse-out
                self.reset_highlights();
                self.highlight_faces(Face::ALL, Highlight::Picked);
                self.session.set_cursor(CursorStyle::Grabbing);
            }
            (BoxHandle::Face(_), ControllerEventKind::MouseOut | ControllerEventKind::Release) => {
                self.highlight_faces(Face::ALL, Highlight::None);
                self.session.set_cursor(CursorStyle::Auto);
            }
            (BoxHandle::Face(face), ControllerEventKind::Move { amount, movement }) => {
                self.volume.drag_face(scene, face, amount, movement);
            }
            (BoxHandle::Corner(corner), ControllerEventKind::MouseOver) => {
                self.highlight_corner(corner, Highlight::Hovered);
                self.session.set_cursor(CursorStyle::Pointer);
            }
            (BoxHandle::Corner(corner), ControllerEventKind::Pick) => {
                self.reset_highlights();
                self.highlight_corner(corner, Highlight::Picked);
                self.highlight_faces(corner.adjacent_faces(), Highlight::Picked);
                self.session.set_cursor(CursorStyle::Grabbing);
            }
            (
                BoxHandle::Corner(corner),
                ControllerEventKind::MouseOut | ControllerEventKind::Release,
            ) => {
                self.highlight_corner(corner, Highlight::None);
                self.highlight_faces(corner.adjacent_faces(), Highlight::None);
                self.session.set_cursor(CursorStyle::Auto);
            }
            (BoxHandle::Corner(corner), ControllerEventKind::Move { movement, .. }) => {
                self.scale_from_corner(scene, corner, movement);
            }
        }
    }

    fn scale_from_corner(&mut self, scene: &dyn SceneView, corner: Corner, movement: PointerMovement) {
        let solver = self.config.solver;
        self.volume.scale_from_corner(scene, corner, movement, &solver);
    }

    fn highlight_faces<const N: usize>(&mut self, faces: [Face; N], highlight: Highlight) {
        for face in faces {
            self.set_highlight(Target::Face(face), highlight);
        }
    }

    fn highlight_corner(&mut self, corner: Corner, highlight: Highlight) {
        self.set_highlight(Target::Corner(corner), highlight);
    }

    fn set_highlight(&mut self, target: Target, highlight: Highlight) {
        let slot = match target {
            Target::Face(face) => &mut self.face_highlights[face.index()],
            Target::Corner(corner) => &mut self.corner_highlights[corner.index()],
        };
        if *slot != highlight {
            *slot = highlight;
            self.style_revision += 1;
        }
    }

    fn reset_highlights(&mut self) {
        self.highlight_faces(Face::ALL, Highlight::None);
        for corner in Corner::ALL {
            self.highlight_corner(corner, Highlight::None);
        }
    }

    /// Proxies for the renderer; empty while interaction is off
    ///
    /// Recomputed only when the box, a highlight or the activation changed.
    pub fn rendered_entities(&mut self) -> &RenderedEntities {
        let key = (
            self.volume.revision(),
            self.style_revision,
            self.session.generation(),
            self.handles.is_some(),
        );
        let Self {
            rendered,
            handles,
            volume,
            config,
            face_highlights,
            corner_highlights,
            ..
        } = self;
        let (handles, volume, config) = (handles.as_ref(), &*volume, &*config);
        rendered.get_or_compute(key, || match handles {
            Some(handles) => {
                build_entities(handles, volume, config, face_highlights, corner_highlights)
            }
            None => RenderedEntities::default(),
        })
    }

    /// How many times the proxies were rebuilt
    pub fn render_recomputations(&self) -> usize {
        self.rendered.recomputations()
    }

    /// Planes for the renderer; applied only when clipping is enabled
    pub fn clipping_plane_collection(&self) -> ClippingPlaneCollection {
        self.volume
            .clipping_plane_collection(self.session.settings().enabled)
    }

    /// UI toggles for this editor
    pub fn dimension_group(&self) -> SelectableDimensionGroup {
        clipping_dimension_group(&self.session.settings())
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

#[derive(Clone, Copy)]
enum Target {
    Face(Face),
    Corner(Corner),
}

fn build_entities(
    handles: &BoxHandles,
    volume: &ClippingVolume,
    config: &ClippingConfig,
    face_highlights: &[Highlight; 6],
    corner_highlights: &[Highlight; 8],
) -> RenderedEntities {
    let position = volume.position();
    let planes = Face::ALL
        .into_iter()
        .map(|face| PlaneEntity {
            id: handles.face(face),
            index: face.index(),
            position,
            plane: volume.scaled_plane(face),
            dimensions: volume.plane_dimensions(face),
            style: config.style.box_plane(face_highlights[face.index()]),
        })
        .collect();
    let points = Corner::ALL
        .into_iter()
        .map(|corner| PointEntity {
            id: handles.corner(corner),
            corner,
            position: volume.corner_position(corner),
            adjacent_planes: corner.adjacent_faces().map(|face| handles.face(face)),
            style: config.style.corner(corner_highlights[corner.index()]),
        })
        .collect();
    RenderedEntities { planes, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::east_north_up_to_fixed_frame;
    use crate::style::Color;
    use crate::test_util::{EQUATOR, oblique_scene};
    use glam::DVec3;
    use pretty_assertions::assert_eq;

    fn editor() -> ClippingBoxEditor {
        ClippingBoxEditor::new(
            east_north_up_to_fixed_frame(EQUATOR),
            &BoundingSphere::new(EQUATOR, 20.0),
            ClippingSettings {
                enabled: true,
                show_editor: true,
            },
            ClippingConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_activation_follows_flags() {
        let mut scene = oblique_scene();
        let mut editor = editor();
        assert!(!editor.is_active());
        assert!(editor.rendered_entities().is_empty());

        editor.activate(&mut scene);
        assert!(editor.is_active());
        assert_eq!(editor.rendered_entities().len(), 14);

        editor.set_show_editor(&mut scene, false);
        assert!(!editor.is_active());
        assert!(editor.rendered_entities().is_empty());
        assert!(editor.face_entity(Face::ALL[0]).is_none());

        editor.set_show_editor(&mut scene, true);
        assert!(editor.is_active());
        editor.set_enabled(&mut scene, false);
        assert!(!editor.is_active());
        assert!(!editor.clipping_plane_collection().enabled);
    }

    #[test]
    fn test_rendered_entities_are_cached() {
        let mut scene = oblique_scene();
        let mut editor = editor();
        editor.activate(&mut scene);

        editor.rendered_entities();
        editor.rendered_entities();
        let before = editor.render_recomputations();

        editor.volume_mut().translate(DVec3::X);
        let position = editor.rendered_entities().planes[0].position;
        assert_eq!(editor.render_recomputations(), before + 1);
        assert_eq!(position, editor.volume().position());
    }

    #[test]
    fn test_point_entities_list_adjacent_planes() {
        let mut scene = oblique_scene();
        let mut editor = editor();
        editor.activate(&mut scene);
        let corner = Corner::from_index(7).unwrap();
        let expected = corner
            .adjacent_faces()
            .map(|face| editor.face_entity(face).unwrap());
        let point = editor.rendered_entities().points[7];
        assert_eq!(point.corner, corner);
        assert_eq!(point.adjacent_planes, expected);
        assert_eq!(point.style.color, Color::WHITE);
    }

    #[test]
    fn test_resolve_handles() {
        let mut scene = oblique_scene();
        let mut editor = editor();
        assert_eq!(editor.resolve(EntityId(1)), None);
        editor.activate(&mut scene);
        let face = Face::from_index(3).unwrap();
        let corner = Corner::from_index(5).unwrap();
        let face_id = editor.face_entity(face).unwrap();
        let corner_id = editor.corner_entity(corner).unwrap();
        assert_eq!(editor.resolve(face_id), Some(BoxHandle::Face(face)));
        assert_eq!(editor.resolve(corner_id), Some(BoxHandle::Corner(corner)));
    }

    #[test]
    fn test_dimension_selection_toggles_editor() {
        let mut scene = oblique_scene();
        let mut editor = editor();
        editor.activate(&mut scene);
        editor
            .apply_dimension(&mut scene, "showEditorUi", "false")
            .unwrap();
        assert!(!editor.is_active());
        assert!(editor.settings().enabled);

        let group = editor.dimension_group();
        assert!(!group.dimension("showEditorUi").unwrap().is_checked());
        assert!(editor.apply_dimension(&mut scene, "bogus", "true").is_err());
    }
}
