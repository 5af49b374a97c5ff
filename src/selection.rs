//! Checkbox trees over the catalogue.
//!
//! Three trees exist per session, one per constraint the request carries:
//! card includes, card bans, and the expansion pool. All three are built
//! from the same catalogue and differ only in which nodes respond to a
//! toggle and how far a toggle reaches.
//!
//! Toggling is strictly local in the includes and bans trees: flipping an
//! expansion never touches its cards and flipping a card never touches its
//! expansion. The pool tree is the opposite, an expansion toggle cascades
//! to every card beneath it and card checkboxes do not respond at all.

use std::collections::HashSet;

use crate::catalogue::Catalogue;
use crate::ids::{CardId, ExpansionId};
use crate::text::display_name;

/// Which constraint a tree feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreePurpose {
    /// Cards that must appear in the generated kingdom.
    Includes,
    /// Cards that must not appear.
    Bans,
    /// Expansions the kingdom may draw from.
    ExpansionPool,
}

impl TreePurpose {
    pub const ALL: [TreePurpose; 3] = [
        TreePurpose::Includes,
        TreePurpose::Bans,
        TreePurpose::ExpansionPool,
    ];

    /// Stable name used in browser payloads and element ids.
    pub fn as_str(self) -> &'static str {
        match self {
            TreePurpose::Includes => "includes",
            TreePurpose::Bans => "bans",
            TreePurpose::ExpansionPool => "expansions",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "includes" => Some(TreePurpose::Includes),
            "bans" => Some(TreePurpose::Bans),
            "expansions" => Some(TreePurpose::ExpansionPool),
            _ => None,
        }
    }
}

/// Leaf checkbox for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardNode {
    pub id: CardId,
    pub name: String,
    pub is_checked: bool,
}

/// Expansion-level checkbox with its card children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionNode {
    pub id: ExpansionId,
    pub name: String,
    pub is_checked: bool,
    pub children: Vec<CardNode>,
}

/// One checkbox hierarchy over the catalogue, everything unchecked at build
/// time.
///
/// Expansions are ordered by display name, cards within an expansion
/// likewise. A card listed under several expansions appears only under the
/// first of them in that display order, so every card id occurs at most
/// once per tree and a toggle is unambiguous.
#[derive(Debug, Clone)]
pub struct SelectionTree {
    purpose: TreePurpose,
    expansions: Vec<ExpansionNode>,
}

impl SelectionTree {
    pub fn build(purpose: TreePurpose, catalogue: &Catalogue) -> Self {
        let mut expansions: Vec<ExpansionNode> = catalogue
            .iter()
            .map(|entry| ExpansionNode {
                id: entry.expansion.clone(),
                name: display_name(entry.expansion.as_str()),
                is_checked: false,
                children: entry
                    .cards
                    .iter()
                    .map(|card| CardNode {
                        id: card.clone(),
                        name: display_name(card.as_str()),
                        is_checked: false,
                    })
                    .collect(),
            })
            .collect();
        expansions.sort_by(|a, b| a.name.cmp(&b.name));

        let mut seen: HashSet<CardId> = HashSet::new();
        for expansion in &mut expansions {
            expansion.children.retain(|card| seen.insert(card.id.clone()));
            expansion.children.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Self { purpose, expansions }
    }

    pub fn purpose(&self) -> TreePurpose {
        self.purpose
    }

    pub fn expansions(&self) -> &[ExpansionNode] {
        &self.expansions
    }

    /// Whether card checkboxes respond to [`SelectionTree::toggle`]. They do
    /// everywhere except the pool tree, where only whole expansions are
    /// selectable.
    pub fn cards_toggleable(&self) -> bool {
        !matches!(self.purpose, TreePurpose::ExpansionPool)
    }

    /// Flip the checkbox identified by `node_id` under this tree's rules.
    ///
    /// Returns whether any state changed. Unknown ids and card ids in the
    /// pool tree are no-ops.
    pub fn toggle(&mut self, node_id: &str) -> bool {
        match self.purpose {
            TreePurpose::Includes | TreePurpose::Bans => self.toggle_single(node_id),
            TreePurpose::ExpansionPool => self.toggle_cascading(node_id),
        }
    }

    /// Flip exactly the targeted node, never its relatives.
    fn toggle_single(&mut self, node_id: &str) -> bool {
        for expansion in &mut self.expansions {
            if expansion.id.as_str() == node_id {
                expansion.is_checked = !expansion.is_checked;
                return true;
            }
            for card in &mut expansion.children {
                if card.id.as_str() == node_id {
                    card.is_checked = !card.is_checked;
                    return true;
                }
            }
        }
        false
    }

    /// Flip an expansion and push the new state down to all its cards.
    fn toggle_cascading(&mut self, node_id: &str) -> bool {
        for expansion in &mut self.expansions {
            if expansion.id.as_str() == node_id {
                let checked = !expansion.is_checked;
                expansion.is_checked = checked;
                for card in &mut expansion.children {
                    card.is_checked = checked;
                }
                return true;
            }
        }
        false
    }

    /// Checked card ids in tree order, or `None` when none are checked.
    ///
    /// The distinction matters downstream: the request serializes `None` as
    /// an absent constraint, while an explicit empty list would tell the
    /// generator to use nothing at all.
    pub fn checked_card_ids(&self) -> Option<Vec<CardId>> {
        let checked: Vec<CardId> = self
            .expansions
            .iter()
            .flat_map(|expansion| expansion.children.iter())
            .filter(|card| card.is_checked)
            .map(|card| card.id.clone())
            .collect();
        if checked.is_empty() {
            None
        } else {
            Some(checked)
        }
    }

    /// Checked expansion ids in tree order, or `None` when none are checked.
    pub fn checked_expansion_ids(&self) -> Option<Vec<ExpansionId>> {
        let checked: Vec<ExpansionId> = self
            .expansions
            .iter()
            .filter(|expansion| expansion.is_checked)
            .map(|expansion| expansion.id.clone())
            .collect();
        if checked.is_empty() {
            None
        } else {
            Some(checked)
        }
    }

    /// Look up an expansion node by raw id.
    pub fn expansion_node(&self, id: &str) -> Option<&ExpansionNode> {
        self.expansions
            .iter()
            .find(|expansion| expansion.id.as_str() == id)
    }

    /// Look up a card node by raw id, wherever it lives.
    pub fn card_node(&self, id: &str) -> Option<&CardNode> {
        self.expansions
            .iter()
            .flat_map(|expansion| expansion.children.iter())
            .find(|card| card.id.as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalogue() -> Catalogue {
        let mut catalogue = Catalogue::new();
        catalogue.push(
            ExpansionId::new("Seaside"),
            vec![CardId::new("Lighthouse"), CardId::new("Witch")],
        );
        catalogue.push(
            ExpansionId::new("Base"),
            vec![
                CardId::new("YoungWitch"),
                CardId::new("Witch"),
                CardId::new("Moat"),
            ],
        );
        catalogue
    }

    fn includes_tree() -> SelectionTree {
        SelectionTree::build(TreePurpose::Includes, &sample_catalogue())
    }

    #[test]
    fn test_build_sorts_expansions_by_display_name() {
        let tree = includes_tree();
        let names: Vec<&str> = tree
            .expansions()
            .iter()
            .map(|expansion| expansion.name.as_str())
            .collect();
        assert_eq!(names, vec!["Base", "Seaside"]);
    }

    #[test]
    fn test_build_formats_names_and_sorts_cards() {
        let tree = includes_tree();
        let base = tree.expansion_node("Base").unwrap();
        let names: Vec<&str> = base.children.iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names, vec!["Moat", "Witch", "Young Witch"]);
    }

    #[test]
    fn test_build_keeps_shared_card_under_first_expansion_only() {
        let tree = includes_tree();
        let base = tree.expansion_node("Base").unwrap();
        let seaside = tree.expansion_node("Seaside").unwrap();

        assert!(base.children.iter().any(|card| card.id.as_str() == "Witch"));
        assert!(!seaside.children.iter().any(|card| card.id.as_str() == "Witch"));
    }

    #[test]
    fn test_build_starts_fully_unchecked() {
        let tree = includes_tree();
        assert!(tree.checked_card_ids().is_none());
        assert!(tree.checked_expansion_ids().is_none());
    }

    #[test]
    fn test_single_toggle_flips_only_the_card() {
        let mut tree = includes_tree();
        assert!(tree.toggle("Witch"));

        assert!(tree.card_node("Witch").unwrap().is_checked);
        assert!(!tree.card_node("Moat").unwrap().is_checked);
        assert!(!tree.expansion_node("Base").unwrap().is_checked);
    }

    #[test]
    fn test_single_toggle_on_expansion_leaves_cards_alone() {
        let mut tree = includes_tree();
        assert!(tree.toggle("Base"));

        assert!(tree.expansion_node("Base").unwrap().is_checked);
        assert!(tree.checked_card_ids().is_none());
    }

    #[test]
    fn test_toggle_twice_restores_original_state() {
        let mut tree = includes_tree();
        tree.toggle("Moat");
        tree.toggle("Moat");
        assert!(!tree.card_node("Moat").unwrap().is_checked);
    }

    #[test]
    fn test_toggle_unknown_id_is_a_noop() {
        let mut tree = includes_tree();
        assert!(!tree.toggle("Stables"));
        assert!(tree.checked_card_ids().is_none());
    }

    #[test]
    fn test_pool_toggle_cascades_to_cards() {
        let mut tree = SelectionTree::build(TreePurpose::ExpansionPool, &sample_catalogue());
        assert!(tree.toggle("Base"));

        assert!(tree.expansion_node("Base").unwrap().is_checked);
        assert!(
            tree.expansion_node("Base")
                .unwrap()
                .children
                .iter()
                .all(|card| card.is_checked)
        );
        assert_eq!(
            tree.checked_expansion_ids(),
            Some(vec![ExpansionId::new("Base")])
        );
    }

    #[test]
    fn test_pool_untoggle_cascades_unchecking() {
        let mut tree = SelectionTree::build(TreePurpose::ExpansionPool, &sample_catalogue());
        tree.toggle("Base");
        tree.toggle("Base");

        assert!(tree.checked_expansion_ids().is_none());
        assert!(tree.checked_card_ids().is_none());
    }

    #[test]
    fn test_pool_card_toggle_is_disabled() {
        let mut tree = SelectionTree::build(TreePurpose::ExpansionPool, &sample_catalogue());
        assert!(!tree.cards_toggleable());
        assert!(!tree.toggle("Moat"));
        assert!(!tree.card_node("Moat").unwrap().is_checked);
    }

    #[test]
    fn test_checked_card_ids_follow_tree_order() {
        let mut tree = includes_tree();
        tree.toggle("Lighthouse");
        tree.toggle("Moat");

        // Base sorts before Seaside, so Moat comes first.
        assert_eq!(
            tree.checked_card_ids(),
            Some(vec![CardId::new("Moat"), CardId::new("Lighthouse")])
        );
    }

    #[test]
    fn test_checked_card_ids_never_empty_vec() {
        let mut tree = includes_tree();
        tree.toggle("Moat");
        tree.toggle("Moat");
        assert_eq!(tree.checked_card_ids(), None);
    }

    #[test]
    fn test_purpose_names_round_trip() {
        for purpose in TreePurpose::ALL {
            assert_eq!(TreePurpose::parse(purpose.as_str()), Some(purpose));
        }
        assert_eq!(TreePurpose::parse("banes"), None);
    }
}
