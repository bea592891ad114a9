//! Interaction mode controller and mutation gate.
//!
//! # Responsibility
//! - Track the process-wide Edit/Preview mode for the active document.
//! - Hand out the `EditAccess` token that every document mutation requires.
//!
//! # Invariants
//! - `toggle()` is the only transition; there is no terminal state.
//! - `EditAccess` can only be obtained while mode is `Edit`, and only inside
//!   this crate; external callers mutate documents through `Session`.
//! - A live `EditAccess` borrows the controller, so mode cannot change while
//!   a mutation holding it is in flight.

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Global Edit/Preview switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Sections are draggable and content is editable.
    #[default]
    Edit,
    /// Static read-only rendering.
    Preview,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Preview => "preview",
        }
    }

    /// Mode reached by one toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Edit => Self::Preview,
            Self::Preview => Self::Edit,
        }
    }

    pub fn is_edit(self) -> bool {
        matches!(self, Self::Edit)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof that the controller was in `Edit` mode when the token was issued.
///
/// Store mutations take `&EditAccess`, which makes a Preview-mode mutation
/// unrepresentable rather than merely checked.
#[derive(Debug)]
pub(crate) struct EditAccess<'a> {
    _controller: &'a ModeController,
}

/// Tracks the current interaction mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    /// Creates a controller starting in `initial`.
    pub fn new(initial: Mode) -> Self {
        Self { mode: initial }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flips between Edit and Preview and returns the new mode.
    pub fn toggle(&mut self) -> Mode {
        let previous = self.mode;
        self.mode = previous.toggled();
        info!(
            "event=mode_toggle module=mode status=ok from={} to={}",
            previous, self.mode
        );
        self.mode
    }

    /// True iff mode is `Edit`.
    pub fn can_reorder(&self) -> bool {
        self.mode.is_edit()
    }

    /// True iff mode is `Edit`.
    pub fn can_edit_content(&self) -> bool {
        self.mode.is_edit()
    }

    /// Issues a mutation token, or `None` while previewing.
    pub(crate) fn edit_access(&self) -> Option<EditAccess<'_>> {
        if self.mode.is_edit() {
            Some(EditAccess { _controller: self })
        } else {
            None
        }
    }

    /// Label of the action the toggle control performs next.
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            Mode::Edit => "Preview Mode",
            Mode::Preview => "Edit Mode",
        }
    }
}
