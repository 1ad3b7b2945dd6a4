//! Annotator interaction states
//!
//! The editor lives inside the `Editing` variant: there is no separate
//! editor slot that could disagree with the state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::editor::Editor;

#[derive(Debug, Clone, Default)]
pub enum AnnotatorState {
    /// Edit surface hidden, selector inactive
    #[default]
    Idle,
    /// Pointer is down; edit surface shown and the selector is tracking
    Selecting,
    /// Selection completed; exactly one editor is open
    Editing(Editor),
}

impl AnnotatorState {
    pub fn kind(&self) -> StateKind {
        match self {
            AnnotatorState::Idle => StateKind::Idle,
            AnnotatorState::Selecting => StateKind::Selecting,
            AnnotatorState::Editing(_) => StateKind::Editing,
        }
    }

    pub fn editor(&self) -> Option<&Editor> {
        match self {
            AnnotatorState::Editing(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        match self {
            AnnotatorState::Editing(editor) => Some(editor),
            _ => None,
        }
    }
}

/// Payload-free mirror of `AnnotatorState` for errors and the display list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateKind {
    Idle,
    Selecting,
    Editing,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateKind::Idle => "IDLE",
            StateKind::Selecting => "SELECTING",
            StateKind::Editing => "EDITING",
        };
        f.write_str(name)
    }
}
