//! Projection of a generated setup into its display form.
//!
//! The generator reports raw identifiers; the page wants grouped, ordered,
//! human-readable names. Projection is the one place that translation
//! happens: kingdom cards are grouped by expansion membership, ordered
//! deterministically, formatted, and annotated with their bane or variant
//! role.

use std::collections::HashMap;
use std::fmt;

use crate::catalogue::ExpansionIndex;
use crate::generator::GeneratedSetup;
use crate::ids::CardId;
use crate::text::display_name;

/// Internal defect raised while projecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// A kingdom card has no entry in the card/expansion index. The index
    /// is built from the same catalogue the generator draws from, so this
    /// means the session was wired up wrong, not that the user asked for
    /// something impossible.
    UnknownCard(CardId),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::UnknownCard(card) => {
                write!(f, "kingdom card '{card}' is missing from the expansion index")
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

/// One displayed group of kingdom cards sharing an expansion membership.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayGroup {
    /// The group's sorted expansion ids joined with "/", e.g. "Base/Seaside".
    pub expansion_label: String,
    /// Formatted, annotated card names in display order.
    pub cards: Vec<String>,
}

/// Display-ready projection of one generated setup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayModel {
    /// Kingdom card groups, ordered by label.
    pub groups: Vec<DisplayGroup>,
    /// Project card names, raw; may be empty.
    pub project_cards: Vec<String>,
}

impl DisplayModel {
    /// The projects section, or `None` when the setup drew no projects.
    /// Renderers omit the whole section rather than show an empty one.
    pub fn project_section(&self) -> Option<&[String]> {
        if self.project_cards.is_empty() {
            None
        } else {
            Some(&self.project_cards)
        }
    }
}

/// Render the model the way the page does: one label line per group, cards
/// indented beneath it, and a trailing "Projects" section only when one
/// exists.
impl fmt::Display for DisplayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(f, "{}", group.expansion_label)?;
            for card in &group.cards {
                writeln!(f, " - {card}")?;
            }
        }
        if let Some(projects) = self.project_section() {
            writeln!(f)?;
            writeln!(f, "Projects")?;
            for project in projects {
                writeln!(f, " - {project}")?;
            }
        }
        Ok(())
    }
}

/// Project a raw setup into its display model.
///
/// Grouping key is the card's full expansion membership, sorted and joined
/// with "/", so a card shared by Base and Seaside lands in a "Base/Seaside"
/// group distinct from either single-expansion group. Cards sort by raw id
/// within a group (stable, so duplicate entries keep their encounter
/// order), groups sort by label, and only then are names formatted and
/// annotated.
pub fn project(
    setup: &GeneratedSetup,
    index: &ExpansionIndex,
) -> Result<DisplayModel, ProjectionError> {
    let mut groups: HashMap<String, Vec<&CardId>> = HashMap::new();

    for card in &setup.kingdom_cards {
        let Some(memberships) = index.expansions_of(card) else {
            tracing::error!(
                card = card.as_str(),
                "kingdom card missing from expansion index"
            );
            return Err(ProjectionError::UnknownCard(card.clone()));
        };
        let mut labels: Vec<&str> = memberships.iter().map(|e| e.as_str()).collect();
        labels.sort_unstable();
        groups.entry(labels.join("/")).or_default().push(card);
    }

    let mut groups: Vec<(String, Vec<&CardId>)> = groups.into_iter().collect();
    groups.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let groups = groups
        .into_iter()
        .map(|(expansion_label, mut cards)| {
            cards.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            DisplayGroup {
                expansion_label,
                cards: cards.into_iter().map(|card| annotate(card, setup)).collect(),
            }
        })
        .collect();

    Ok(DisplayModel {
        groups,
        project_cards: setup.project_cards.clone(),
    })
}

/// Format one kingdom card's name and append its annotation, if any.
///
/// A card gets at most one parenthetical: the bane marker wins over a
/// variant, and the zebra variant folds its companion into the same
/// parenthetical instead of adding a second one.
fn annotate(card: &CardId, setup: &GeneratedSetup) -> String {
    let name = display_name(card.as_str());

    if setup.bane_card.as_ref() == Some(card) {
        return format!("{name} (Bane)");
    }

    if let Some(variant) = setup.bane_cards.get(card) {
        let variant_name = display_name(variant);
        if variant_name == "Zebra"
            && let Some(second_zebra) = &setup.second_zebra
        {
            return format!("{name} (Zebra with {second_zebra})");
        }
        return format!("{name} ({variant_name})");
    }

    name
}
