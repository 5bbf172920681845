//! Pick, hover and drag state machine
//!
//! The controller turns raw pointer events into semantic events for one
//! tracked entity at a time. While a drag is in progress camera navigation is
//! switched off and hover picking is suspended; releasing the button, losing
//! focus or tearing the controller down always switches navigation back on.

use glam::{DVec2, DVec3};

use crate::input::{HandlerRegistration, InputActions, PointerEvent};
use crate::scene::SceneView;
use crate::solver::{SolverConfig, compute_move_amount};
use crate::types::{ClippingPlane, EntityId, PointerMovement};

/// Where the controller is in an interaction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// Nothing under the pointer
    #[default]
    Idle,
    /// Pointer is over a tracked entity
    Hovering { entity: EntityId },
    /// A tracked entity is being dragged
    Dragging {
        entity: EntityId,
        last_position: DVec2,
    },
}

impl InteractionState {
    /// Entity currently hovered or dragged
    pub fn target(&self) -> Option<EntityId> {
        match *self {
            InteractionState::Idle => None,
            InteractionState::Hovering { entity } | InteractionState::Dragging { entity, .. } => {
                Some(entity)
            }
        }
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging { .. })
    }
}

/// What happened to the target entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEventKind {
    /// Drag started
    Pick,
    /// Drag ended
    Release,
    /// Pointer entered the entity
    MouseOver,
    /// Pointer left the entity
    MouseOut,
    /// Pointer moved during a drag
    Move {
        /// Displacement along the entity's drag plane normal, `0.0` when the
        /// entity has no drag plane or the projection failed
        amount: f64,
        /// Raw pointer movement since the previous event
        movement: PointerMovement,
    },
}

/// A semantic event for one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerEvent {
    pub entity: EntityId,
    pub kind: ControllerEventKind,
}

impl ControllerEvent {
    fn new(entity: EntityId, kind: ControllerEventKind) -> Self {
        Self { entity, kind }
    }
}

/// Plane along which an entity's drag is measured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPlane {
    /// Plane whose normal is the drag direction
    pub plane: ClippingPlane,
    /// World anchor of the plane
    pub anchor: DVec3,
    /// Reference length for projecting the normal
    pub sampling_distance: f64,
}

/// The set of entities a controller reacts to
pub trait TrackedEntities {
    /// Whether picks on `entity` count
    fn is_tracked(&self, entity: EntityId) -> bool;

    /// Drag plane of `entity`, if moves on it are measured along a normal
    fn drag_plane(&self, _entity: EntityId) -> Option<DragPlane> {
        None
    }
}

impl TrackedEntities for Vec<EntityId> {
    fn is_tracked(&self, entity: EntityId) -> bool {
        self.contains(&entity)
    }
}

/// Pick/hover/drag controller
#[derive(Debug)]
pub struct Controller {
    state: InteractionState,
    registration: Option<HandlerRegistration>,
    solver: SolverConfig,
}

impl Controller {
    /// Create a controller and install its pointer handler
    pub fn new(solver: SolverConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            registration: Some(HandlerRegistration::new(InputActions::ALL)),
            solver,
        }
    }

    /// Current interaction state
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether the pointer handler is installed
    pub fn is_active(&self) -> bool {
        self.registration.is_some()
    }

    /// The installed registration, if any
    pub fn registration(&self) -> Option<&HandlerRegistration> {
        self.registration.as_ref()
    }

    /// Release the pointer handler and switch camera navigation back on
    ///
    /// Safe to call any number of times; events arriving afterwards are
    /// ignored.
    pub fn destroy(&mut self, scene: &mut dyn SceneView) {
        if let Some(registration) = self.registration.take() {
            crate::clip_debug!(
                "destroying controller {} in state {:?}",
                registration.id().get(),
                self.state
            );
        }
        self.state = InteractionState::Idle;
        scene.set_camera_input_enabled(true);
    }

    /// Feed one pointer event; returns the semantic events it produced
    pub fn handle(
        &mut self,
        event: PointerEvent,
        scene: &mut dyn SceneView,
        entities: &dyn TrackedEntities,
    ) -> Vec<ControllerEvent> {
        let accepted = self
            .registration
            .as_ref()
            .is_some_and(|registration| registration.accepts(&event));
        if !accepted {
            return Vec::new();
        }

        let mut events = Vec::new();
        match event {
            PointerEvent::LeftDown { position } => {
                self.on_left_down(position, scene, entities, &mut events)
            }
            PointerEvent::LeftUp { .. } => self.on_left_up(scene, &mut events),
            PointerEvent::Move { position } => {
                self.on_move(position, &*scene, entities, &mut events)
            }
            PointerEvent::CanvasLeave => self.on_canvas_leave(&mut events),
            PointerEvent::FocusLost => self.on_focus_lost(scene, &mut events),
        }
        events
    }

    fn tracked_pick(
        scene: &dyn SceneView,
        position: DVec2,
        entities: &dyn TrackedEntities,
    ) -> Option<EntityId> {
        scene
            .pick(position)
            .filter(|entity| entities.is_tracked(*entity))
    }

    fn on_left_down(
        &mut self,
        position: DVec2,
        scene: &mut dyn SceneView,
        entities: &dyn TrackedEntities,
        events: &mut Vec<ControllerEvent>,
    ) {
        let Some(picked) = Self::tracked_pick(&*scene, position, entities) else {
            return;
        };

        if let InteractionState::Dragging { entity, .. } = self.state {
            if entity == picked {
                return;
            }
            events.push(ControllerEvent::new(entity, ControllerEventKind::Release));
        }

        scene.set_camera_input_enabled(false);
        self.transition(InteractionState::Dragging {
            entity: picked,
            last_position: position,
        });
        events.push(ControllerEvent::new(picked, ControllerEventKind::Pick));
    }

    fn on_left_up(&mut self, scene: &mut dyn SceneView, events: &mut Vec<ControllerEvent>) {
        if let InteractionState::Dragging { entity, .. } = self.state {
            scene.set_camera_input_enabled(true);
            self.transition(InteractionState::Idle);
            events.push(ControllerEvent::new(entity, ControllerEventKind::Release));
        }
    }

    fn on_move(
        &mut self,
        position: DVec2,
        scene: &dyn SceneView,
        entities: &dyn TrackedEntities,
        events: &mut Vec<ControllerEvent>,
    ) {
        if let InteractionState::Dragging {
            entity,
            last_position,
        } = self.state
        {
            let movement = PointerMovement::new(last_position, position);
            let amount = entities
                .drag_plane(entity)
                .map(|drag| {
                    compute_move_amount(
                        scene,
                        &drag.plane,
                        drag.anchor,
                        movement,
                        drag.sampling_distance,
                        &self.solver,
                    )
                })
                .unwrap_or(0.0);
            self.state = InteractionState::Dragging {
                entity,
                last_position: position,
            };
            events.push(ControllerEvent::new(
                entity,
                ControllerEventKind::Move { amount, movement },
            ));
            return;
        }

        let hit = Self::tracked_pick(scene, position, entities);
        match (self.state, hit) {
            (InteractionState::Hovering { entity }, Some(hit)) if entity == hit => {}
            (InteractionState::Hovering { entity }, Some(hit)) => {
                events.push(ControllerEvent::new(entity, ControllerEventKind::MouseOut));
                events.push(ControllerEvent::new(hit, ControllerEventKind::MouseOver));
                self.transition(InteractionState::Hovering { entity: hit });
            }
            (InteractionState::Hovering { entity }, None) => {
                events.push(ControllerEvent::new(entity, ControllerEventKind::MouseOut));
                self.transition(InteractionState::Idle);
            }
            (_, Some(hit)) => {
                events.push(ControllerEvent::new(hit, ControllerEventKind::MouseOver));
                self.transition(InteractionState::Hovering { entity: hit });
            }
            (_, None) => {}
        }
    }

    fn on_canvas_leave(&mut self, events: &mut Vec<ControllerEvent>) {
        if let InteractionState::Hovering { entity } = self.state {
            events.push(ControllerEvent::new(entity, ControllerEventKind::MouseOut));
            self.transition(InteractionState::Idle);
        }
    }

    fn on_focus_lost(&mut self, scene: &mut dyn SceneView, events: &mut Vec<ControllerEvent>) {
        match self.state {
            InteractionState::Dragging { .. } => self.on_left_up(scene, events),
            InteractionState::Hovering { .. } => self.on_canvas_leave(events),
            InteractionState::Idle => {}
        }
    }

    fn transition(&mut self, next: InteractionState) {
        crate::clip_trace!("controller {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
