mod common;

use approx::assert_relative_eq;
use clipbox::types::Axis;
use clipbox::{Color, Corner, CursorStyle, Face, Highlight, PointerEvent, SceneView};
use common::{EQUATOR, active_box_editor, side_view_scene};
use glam::{DVec2, DVec3};
use pretty_assertions::assert_eq;

#[test]
fn dragging_the_top_face_lifts_the_box() {
    let mut scene = side_view_scene();
    let mut editor = active_box_editor(&mut scene);
    let top = Face::from_normal(Axis::Z, false);
    let id = editor.face_entity(top).unwrap();
    // Top face centre is 15 m above the anchor
    let at = scene.add_world_target(id, EQUATOR + DVec3::X * 15.0, 10.0).unwrap();
    assert_relative_eq!(at, DVec2::new(500.0, 425.0), epsilon = 1e-6);

    editor.handle_pointer_event(&mut scene, PointerEvent::Move { position: at });
    assert_eq!(editor.cursor(), CursorStyle::Move);
    assert!(Face::ALL
        .into_iter()
        .all(|face| editor.face_highlight(face) == Highlight::Hovered));

    editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: at });
    assert_eq!(editor.cursor(), CursorStyle::Grabbing);
    assert!(!scene.camera_input_enabled());

    editor.handle_pointer_event(
        &mut scene,
        PointerEvent::Move {
            position: at - DVec2::new(0.0, 50.0),
        },
    );
    assert_relative_eq!(
        editor.volume().position(),
        EQUATOR + DVec3::X * 10.0,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        editor.volume().dimensions(),
        DVec3::new(10.0, 15.0, 30.0),
        epsilon = 1e-9
    );

    editor.handle_pointer_event(&mut scene, PointerEvent::LeftUp { position: at });
    assert_eq!(editor.cursor(), CursorStyle::Auto);
    assert!(scene.camera_input_enabled());
    assert!(Face::ALL
        .into_iter()
        .all(|face| editor.face_highlight(face) == Highlight::None));

    let position = editor.volume().position();
    let entities = editor.rendered_entities();
    assert!(entities.planes.iter().all(|plane| plane.position == position));
}

#[test]
fn dragging_a_top_corner_up_grows_the_box_upward() {
    let mut scene = side_view_scene();
    let mut editor = active_box_editor(&mut scene);
    let corner = Corner::from_index(7).unwrap();
    let id = editor.corner_entity(corner).unwrap();
    let at = scene
        .add_world_target(id, editor.volume().corner_position(corner), 8.0)
        .unwrap();

    editor.handle_pointer_event(&mut scene, PointerEvent::Move { position: at });
    assert_eq!(editor.cursor(), CursorStyle::Pointer);
    assert_eq!(editor.corner_highlight(corner), Highlight::Hovered);

    editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: at });
    let adjacent = corner.adjacent_faces();
    for face in Face::ALL {
        let expected = if adjacent.contains(&face) {
            Highlight::Picked
        } else {
            Highlight::None
        };
        assert_eq!(editor.face_highlight(face), expected);
    }
    let point = editor.rendered_entities().points[corner.index()];
    assert_eq!(point.style.color, Color::BLUE);

    let bottom_before = editor
        .volume()
        .corner_position(Corner::from_index(0).unwrap());
    editor.handle_pointer_event(
        &mut scene,
        PointerEvent::Move {
            position: at - DVec2::new(0.0, 50.0),
        },
    );
    editor.handle_pointer_event(&mut scene, PointerEvent::LeftUp { position: at });

    let volume = editor.volume();
    assert_relative_eq!(volume.dimensions().z, 40.0, epsilon = 1e-6);
    assert_relative_eq!(
        volume.dimensions(),
        DVec3::new(10.0, 15.0, 40.0),
        epsilon = 1e-3
    );
    // The far bottom corner does not move
    assert_relative_eq!(
        volume.corner_position(Corner::from_index(0).unwrap()),
        bottom_before,
        epsilon = 1e-3
    );
    assert_eq!(editor.corner_highlight(corner), Highlight::None);
    assert!(scene.camera_input_enabled());
}

#[test]
fn dragging_over_another_handle_does_not_hover_it() {
    let mut scene = side_view_scene();
    let mut editor = active_box_editor(&mut scene);
    let corner = Corner::from_index(7).unwrap();
    let other = Corner::from_index(3).unwrap();
    let at = scene
        .add_world_target(
            editor.corner_entity(corner).unwrap(),
            editor.volume().corner_position(corner),
            8.0,
        )
        .unwrap();
    let over_other = scene
        .add_world_target(
            editor.corner_entity(other).unwrap(),
            editor.volume().corner_position(other),
            8.0,
        )
        .unwrap();

    editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: at });
    editor.handle_pointer_event(&mut scene, PointerEvent::Move { position: over_other });
    assert_eq!(editor.corner_highlight(other), Highlight::None);
    assert_eq!(editor.corner_highlight(corner), Highlight::Picked);
}

#[test]
fn picking_a_corner_after_hovering_a_face_clears_the_face_hover() {
    let mut scene = side_view_scene();
    let mut editor = active_box_editor(&mut scene);
    let top = Face::from_normal(Axis::Z, false);
    let corner = Corner::from_index(7).unwrap();
    let on_face = scene
        .add_world_target(editor.face_entity(top).unwrap(), EQUATOR + DVec3::X * 15.0, 10.0)
        .unwrap();
    let on_corner = scene
        .add_world_target(
            editor.corner_entity(corner).unwrap(),
            editor.volume().corner_position(corner),
            8.0,
        )
        .unwrap();

    editor.handle_pointer_event(&mut scene, PointerEvent::Move { position: on_face });
    assert_eq!(editor.face_highlight(top), Highlight::Hovered);

    editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: on_corner });
    let adjacent = corner.adjacent_faces();
    for face in Face::ALL {
        let expected = if adjacent.contains(&face) {
            Highlight::Picked
        } else {
            Highlight::None
        };
        assert_eq!(editor.face_highlight(face), expected);
    }

    editor.handle_pointer_event(&mut scene, PointerEvent::LeftUp { position: on_corner });
    editor.handle_pointer_event(
        &mut scene,
        PointerEvent::Move {
            position: DVec2::new(5.0, 5.0),
        },
    );
    for face in Face::ALL {
        assert_eq!(editor.face_highlight(face), Highlight::None);
    }
    for corner in Corner::ALL {
        assert_eq!(editor.corner_highlight(corner), Highlight::None);
    }
    assert_eq!(editor.cursor(), CursorStyle::Auto);
}

#[test]
fn picking_a_face_after_hovering_a_corner_clears_the_corner_hover() {
    let mut scene = side_view_scene();
    let mut editor = active_box_editor(&mut scene);
    let top = Face::from_normal(Axis::Z, false);
    let corner = Corner::from_index(7).unwrap();
    let on_face = scene
        .add_world_target(editor.face_entity(top).unwrap(), EQUATOR + DVec3::X * 15.0, 10.0)
        .unwrap();
    let on_corner = scene
        .add_world_target(
            editor.corner_entity(corner).unwrap(),
            editor.volume().corner_position(corner),
            8.0,
        )
        .unwrap();

    editor.handle_pointer_event(&mut scene, PointerEvent::Move { position: on_corner });
    assert_eq!(editor.corner_highlight(corner), Highlight::Hovered);

    editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: on_face });
    assert_eq!(editor.corner_highlight(corner), Highlight::None);
    assert!(Face::ALL
        .into_iter()
        .all(|face| editor.face_highlight(face) == Highlight::Picked));
}

#[test]
fn hiding_the_editor_mid_drag_restores_camera_input() {
    let mut scene = side_view_scene();
    let mut editor = active_box_editor(&mut scene);
    let top = Face::from_normal(Axis::Z, false);
    let at = scene
        .add_world_target(editor.face_entity(top).unwrap(), EQUATOR + DVec3::X * 15.0, 10.0)
        .unwrap();
    editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: at });
    assert!(!scene.camera_input_enabled());

    editor.deactivate(&mut scene);
    assert!(scene.camera_input_enabled());
    assert!(!editor.is_active());
    assert_eq!(editor.cursor(), CursorStyle::Auto);

    // Stale ids from the previous activation are ignored
    let events =
        editor.handle_pointer_event(&mut scene, PointerEvent::LeftDown { position: at });
    assert!(events.is_empty());
}

#[test]
fn box_survives_reactivation() {
    let mut scene = side_view_scene();
    let mut editor = active_box_editor(&mut scene);
    editor.volume_mut().translate(DVec3::new(1.0, 2.0, 3.0));
    let first = editor.face_entity(Face::ALL[0]).unwrap();

    editor.set_enabled(&mut scene, false);
    editor.set_enabled(&mut scene, true);

    assert!(editor.is_active());
    assert_ne!(editor.face_entity(Face::ALL[0]).unwrap(), first);
    assert_relative_eq!(
        editor.volume().box_transform().translation,
        DVec3::new(1.0, 2.0, 3.0)
    );
}

#[test]
fn plane_collection_is_relative_to_the_model_origin() {
    let mut scene = side_view_scene();
    let editor = active_box_editor(&mut scene);
    let collection = editor.clipping_plane_collection();
    assert_eq!(collection.model_matrix, editor.volume().model_matrix());
    // The origin carries the globe position, the collection does not
    assert!(collection.model_matrix.w_axis.truncate().length() < 1.0);
    assert_relative_eq!(
        editor.volume().origin() * collection.model_matrix,
        editor.volume().world_matrix(),
        epsilon = 1e-6
    );
}
