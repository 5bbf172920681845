//! Declarative UI records for the clipping toggles
//!
//! Editors describe their toggles as a [`SelectableDimensionGroup`]; whatever
//! UI layer the host uses renders the records and feeds a selection back via
//! `apply_dimension`, which parses it into a [`DimensionAction`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::editor::ClippingSettings;
use crate::error::{ClipError, ClipResult};

/// Id of the clipping dimension group
pub const CLIPPING_GROUP_ID: &str = "clipping-planes";
/// Id of the "clip model" checkbox
pub const CLIP_MODEL_ID: &str = "clipModel";
/// Id of the "show editor" checkbox
pub const SHOW_EDITOR_ID: &str = "showEditorUi";

const TRUE: &str = "true";
const FALSE: &str = "false";

/// How a dimension is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DimensionKind {
    /// Two-state checkbox with `true`/`false` options
    Checkbox,
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionOption {
    pub id: String,
    pub name: String,
}

impl DimensionOption {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// A single selectable dimension
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectableDimension {
    pub id: String,
    pub name: String,
    pub kind: DimensionKind,
    pub options: Vec<DimensionOption>,
    pub selected_id: String,
    pub disabled: bool,
}

impl SelectableDimension {
    /// A checkbox dimension
    pub fn checkbox(id: &str, name: &str, checked: bool, disabled: bool) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            kind: DimensionKind::Checkbox,
            options: vec![
                DimensionOption::new(TRUE, "True"),
                DimensionOption::new(FALSE, "False"),
            ],
            selected_id: if checked { TRUE } else { FALSE }.to_owned(),
            disabled,
        }
    }

    /// Whether a checkbox dimension is checked
    pub fn is_checked(&self) -> bool {
        self.selected_id == TRUE
    }
}

/// A titled group of dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectableDimensionGroup {
    pub id: String,
    pub name: String,
    pub dimensions: Vec<SelectableDimension>,
}

impl SelectableDimensionGroup {
    /// Dimension by id
    pub fn dimension(&self, id: &str) -> Option<&SelectableDimension> {
        self.dimensions.iter().find(|dimension| dimension.id == id)
    }
}

/// What a selection asks the editor to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionAction {
    /// Turn clipping on or off
    SetEnabled(bool),
    /// Show or hide the interactive editor
    SetShowEditor(bool),
}

/// The clipping toggles for the current settings
pub fn clipping_dimension_group(settings: &ClippingSettings) -> SelectableDimensionGroup {
    SelectableDimensionGroup {
        id: CLIPPING_GROUP_ID.to_owned(),
        name: "Clipping".to_owned(),
        dimensions: vec![
            SelectableDimension::checkbox(CLIP_MODEL_ID, "Clip model", settings.enabled, false),
            SelectableDimension::checkbox(
                SHOW_EDITOR_ID,
                "Show clipping editor",
                settings.show_editor,
                !settings.enabled,
            ),
        ],
    }
}

/// Parse a selection coming back from the UI
pub fn parse_selection(id: &str, value: &str) -> ClipResult<DimensionAction> {
    let checked = match value {
        TRUE => true,
        FALSE => false,
        _ => return Err(ClipError::invalid_dimension_value(id, value)),
    };
    match id {
        CLIP_MODEL_ID => Ok(DimensionAction::SetEnabled(checked)),
        SHOW_EDITOR_ID => Ok(DimensionAction::SetShowEditor(checked)),
        _ => Err(ClipError::unknown_dimension(id)),
    }
}
