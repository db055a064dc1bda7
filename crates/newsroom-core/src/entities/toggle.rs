//! Toggle state machine
//!
//! Per (user, article) the state is either `None` or `Reacted(kind)`.
//! Submitting a kind moves between states:
//!
//! - `None` + k            -> `Reacted(k)`  (create)
//! - `Reacted(k)` + k      -> `None`        (remove)
//! - `Reacted(k1)` + k2    -> `Reacted(k2)` (switch)
//!
//! There is no terminal state.

use serde::{Deserialize, Serialize};

use super::reaction::ReactionKind;

/// Reaction state of one (user, article) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactionState {
    #[default]
    None,
    Reacted(ReactionKind),
}

impl ReactionState {
    /// The active kind, if any
    pub fn kind(self) -> Option<ReactionKind> {
        match self {
            Self::None => None,
            Self::Reacted(kind) => Some(kind),
        }
    }
}

impl From<Option<ReactionKind>> for ReactionState {
    fn from(kind: Option<ReactionKind>) -> Self {
        kind.map_or(Self::None, Self::Reacted)
    }
}

/// Store mutation chosen for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ToggleAction {
    Create,
    Remove,
    Switch { previous: ReactionKind },
}

/// Classified result of submitting `kind` against the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub action: ToggleAction,
    pub kind: ReactionKind,
}

impl ToggleOutcome {
    /// Classify a submission of `submitted` given the current state
    pub fn classify(current: ReactionState, submitted: ReactionKind) -> Self {
        let action = match current {
            ReactionState::None => ToggleAction::Create,
            ReactionState::Reacted(kind) if kind == submitted => ToggleAction::Remove,
            ReactionState::Reacted(previous) => ToggleAction::Switch { previous },
        };
        Self {
            action,
            kind: submitted,
        }
    }

    /// Whether the submission cleared the user's reaction
    pub fn removed(&self) -> bool {
        matches!(self.action, ToggleAction::Remove)
    }

    /// State after the transition
    pub fn next_state(&self) -> ReactionState {
        if self.removed() {
            ReactionState::None
        } else {
            ReactionState::Reacted(self.kind)
        }
    }

    /// Kinds whose aggregates must be recomputed, in canonical order
    pub fn affected_kinds(&self) -> Vec<ReactionKind> {
        match self.action {
            ToggleAction::Create | ToggleAction::Remove => vec![self.kind],
            ToggleAction::Switch { previous } => {
                let mut kinds = vec![previous, self.kind];
                kinds.sort_unstable();
                kinds
            }
        }
    }

    /// How the true count of `kind` moves because of this transition
    pub fn expected_delta(&self, kind: ReactionKind) -> i64 {
        match self.action {
            ToggleAction::Create if kind == self.kind => 1,
            ToggleAction::Remove if kind == self.kind => -1,
            ToggleAction::Switch { previous } if kind == previous => -1,
            ToggleAction::Switch { .. } if kind == self.kind => 1,
            _ => 0,
        }
    }
}
