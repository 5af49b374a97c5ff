//! The generator's card catalogue and the card/expansion index built from it.
//!
//! The catalogue arrives once, at session startup, as an ordered list of
//! expansions with their cards. Everything downstream is derived from it:
//! the selection trees mirror its contents and the projector's index is its
//! inversion. Enumeration order is the generator's and is preserved here
//! because the trees' dedupe rule depends on it being stable.

use std::collections::HashMap;

use crate::ids::{CardId, ExpansionId};

/// One expansion and its cards, in the order the generator reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub expansion: ExpansionId,
    pub cards: Vec<CardId>,
}

/// The generator's full card catalogue.
///
/// A card may appear under several expansions (promo reprints do); the
/// catalogue keeps every occurrence and leaves dedupe policy to consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<CatalogueEntry>) -> Self {
        Self { entries }
    }

    /// Append one expansion with its cards, keeping enumeration order.
    pub fn push(&mut self, expansion: ExpansionId, cards: Vec<CardId>) {
        self.entries.push(CatalogueEntry { expansion, cards });
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogueEntry> {
        self.entries.iter()
    }

    /// Number of expansions (not cards).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Card-to-expansions lookup, built by inverting a [`Catalogue`].
///
/// For each card this records every expansion that lists it, in catalogue
/// enumeration order. The projector groups kingdom cards by exactly this
/// membership list, so a card the index has never seen is a construction
/// defect, not a user input problem.
#[derive(Debug, Clone, Default)]
pub struct ExpansionIndex {
    memberships: HashMap<CardId, Vec<ExpansionId>>,
}

impl ExpansionIndex {
    pub fn from_catalogue(catalogue: &Catalogue) -> Self {
        let mut memberships: HashMap<CardId, Vec<ExpansionId>> = HashMap::new();
        for entry in catalogue.iter() {
            for card in &entry.cards {
                memberships
                    .entry(card.clone())
                    .or_default()
                    .push(entry.expansion.clone());
            }
        }
        Self { memberships }
    }

    /// Every expansion listing `card`, in catalogue order. `None` for cards
    /// the catalogue never mentioned.
    pub fn expansions_of(&self, card: &CardId) -> Option<&[ExpansionId]> {
        self.memberships.get(card).map(Vec::as_slice)
    }

    pub fn contains(&self, card: &CardId) -> bool {
        self.memberships.contains_key(card)
    }

    /// Number of distinct cards indexed.
    pub fn len(&self) -> usize {
        self.memberships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }
}
