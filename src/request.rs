//! The constraint bundle handed to the generator.

use crate::ids::{CardId, ExpansionId};
use crate::selection::SelectionTree;

/// Everything the generator needs to draw one setup.
///
/// Absent constraints are `None`, never an empty list. The generator reads
/// an empty `include_expansions` as "draw from no expansions at all", which
/// is a real (if unsatisfiable) request, so "nothing checked" must collapse
/// to `None` before serialization. [`GenerationRequest::from_selections`]
/// guarantees this; hand-built requests may say `Some(vec![])` on purpose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRequest {
    pub project_count: Option<u8>,
    pub bane_count: Option<u8>,
    pub include_expansions: Option<Vec<ExpansionId>>,
    pub include_cards: Option<Vec<CardId>>,
    pub ban_cards: Option<Vec<CardId>>,
}

impl GenerationRequest {
    /// A fully unconstrained request: the generator chooses everything.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Constrain only the card includes.
    pub fn including_cards(cards: Vec<CardId>) -> Self {
        Self {
            include_cards: Some(cards),
            ..Self::default()
        }
    }

    /// Constrain only the expansion pool.
    pub fn including_expansions(expansions: Vec<ExpansionId>) -> Self {
        Self {
            include_expansions: Some(expansions),
            ..Self::default()
        }
    }

    /// Derive a request from the three trees and the two count choices.
    ///
    /// Pure field derivation. Cross-field conflicts (a card both included
    /// and banned) are carried through untouched; detecting them is the
    /// generator's job.
    pub fn from_selections(
        includes: &SelectionTree,
        bans: &SelectionTree,
        pool: &SelectionTree,
        project_count: Option<u8>,
        bane_count: Option<u8>,
    ) -> Self {
        Self {
            project_count,
            bane_count,
            include_expansions: pool.checked_expansion_ids(),
            include_cards: includes.checked_card_ids(),
            ban_cards: bans.checked_card_ids(),
        }
    }

    /// True when every field is `None`.
    pub fn is_unconstrained(&self) -> bool {
        self.project_count.is_none()
            && self.bane_count.is_none()
            && self.include_expansions.is_none()
            && self.include_cards.is_none()
            && self.ban_cards.is_none()
    }
}
