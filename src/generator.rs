//! The seam between this crate and the setup generator.
//!
//! The generator is an external module: it owns the catalogue, the legal
//! count choices, and the combinatorial draw itself. This crate only relies
//! on the [`Generator`] contract, so the browser build can hand the role to
//! page-supplied functions while tests drive everything with a scripted
//! stand-in.

use std::collections::{HashMap, VecDeque};

use crate::catalogue::Catalogue;
use crate::ids::CardId;
use crate::request::GenerationRequest;

/// One successful draw, exactly as the generator reported it.
///
/// Card identities stay raw here; formatting and annotation happen in the
/// projection step. Fields a JSON producer omits read as their empty
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GeneratedSetup {
    /// The drawn kingdom, in the generator's order.
    pub kingdom_cards: Vec<CardId>,
    /// The bane card, when the draw produced one.
    pub bane_card: Option<CardId>,
    /// Kingdom cards that came with a variant, keyed by card id.
    pub bane_cards: HashMap<CardId, String>,
    /// Companion name for the zebra variant, raw and unformatted.
    pub second_zebra: Option<String>,
    /// Drawn project cards; empty when the draw used none.
    pub project_cards: Vec<String>,
}

/// Failure reported by the generator.
///
/// Both variants carry the generator's own message, which the session
/// surfaces to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerateError {
    /// The same card was requested in both the include and ban lists.
    Conflict(String),
    /// No setup can satisfy the request's constraints.
    Unsatisfiable(String),
}

impl GenerateError {
    /// Stable tag for logs and browser payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::Conflict(_) => "conflict",
            GenerateError::Unsatisfiable(_) => "unsatisfiable",
        }
    }

    /// The generator's message, unedited.
    pub fn message(&self) -> &str {
        match self {
            GenerateError::Conflict(message) | GenerateError::Unsatisfiable(message) => message,
        }
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for GenerateError {}

/// The external setup generator.
pub trait Generator {
    /// The full card catalogue. Called once, at session startup.
    fn catalogue(&self) -> Catalogue;

    /// Legal values for the project count choice.
    fn project_count_options(&self) -> Vec<u8>;

    /// Legal values for the bane count choice.
    fn bane_count_options(&self) -> Vec<u8>;

    /// Draw one setup under the request's constraints.
    fn generate(&mut self, request: &GenerationRequest) -> Result<GeneratedSetup, GenerateError>;
}

/// Scripted [`Generator`] for tests and demos.
///
/// Serves a fixed catalogue and replays queued outcomes in order, recording
/// every request it sees so callers can assert on what the session actually
/// sent. An exhausted script yields empty setups rather than panicking.
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    catalogue: Catalogue,
    project_counts: Vec<u8>,
    bane_counts: Vec<u8>,
    outcomes: VecDeque<Result<GeneratedSetup, GenerateError>>,
    seen: Vec<GenerationRequest>,
}

impl ScriptedGenerator {
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            catalogue,
            project_counts: vec![0, 1, 2],
            bane_counts: vec![0, 1, 2, 3],
            outcomes: VecDeque::new(),
            seen: Vec::new(),
        }
    }

    pub fn with_project_counts(mut self, counts: Vec<u8>) -> Self {
        self.project_counts = counts;
        self
    }

    pub fn with_bane_counts(mut self, counts: Vec<u8>) -> Self {
        self.bane_counts = counts;
        self
    }

    /// Queue a successful draw.
    pub fn queue_setup(mut self, setup: GeneratedSetup) -> Self {
        self.outcomes.push_back(Ok(setup));
        self
    }

    /// Queue a failure.
    pub fn queue_error(mut self, error: GenerateError) -> Self {
        self.outcomes.push_back(Err(error));
        self
    }

    /// Queue either outcome after construction.
    pub fn push_outcome(&mut self, outcome: Result<GeneratedSetup, GenerateError>) {
        self.outcomes.push_back(outcome);
    }

    /// Every request received so far, oldest first.
    pub fn seen_requests(&self) -> &[GenerationRequest] {
        &self.seen
    }

    pub fn last_request(&self) -> Option<&GenerationRequest> {
        self.seen.last()
    }
}

impl Generator for ScriptedGenerator {
    fn catalogue(&self) -> Catalogue {
        self.catalogue.clone()
    }

    fn project_count_options(&self) -> Vec<u8> {
        self.project_counts.clone()
    }

    fn bane_count_options(&self) -> Vec<u8> {
        self.bane_counts.clone()
    }

    fn generate(&mut self, request: &GenerationRequest) -> Result<GeneratedSetup, GenerateError> {
        self.seen.push(request.clone());
        self.outcomes
            .pop_front()
            .unwrap_or_else(|| Ok(GeneratedSetup::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ExpansionId;

    fn small_catalogue() -> Catalogue {
        let mut catalogue = Catalogue::new();
        catalogue.push(ExpansionId::new("Base"), vec![CardId::new("Witch")]);
        catalogue
    }

    #[test]
    fn test_scripted_generator_replays_outcomes_in_order() {
        let mut generator = ScriptedGenerator::new(small_catalogue())
            .queue_setup(GeneratedSetup {
                kingdom_cards: vec![CardId::new("Witch")],
                ..GeneratedSetup::default()
            })
            .queue_error(GenerateError::Unsatisfiable("no luck".to_string()));

        let first = generator.generate(&GenerationRequest::unconstrained());
        assert_eq!(
            first.unwrap().kingdom_cards,
            vec![CardId::new("Witch")]
        );

        let second = generator.generate(&GenerationRequest::unconstrained());
        assert_eq!(
            second,
            Err(GenerateError::Unsatisfiable("no luck".to_string()))
        );
    }

    #[test]
    fn test_scripted_generator_records_requests() {
        let mut generator = ScriptedGenerator::new(small_catalogue());
        let request = GenerationRequest::including_cards(vec![CardId::new("Witch")]);
        let _ = generator.generate(&request);

        assert_eq!(generator.seen_requests(), &[request.clone()]);
        assert_eq!(generator.last_request(), Some(&request));
    }

    #[test]
    fn test_exhausted_script_yields_empty_setup() {
        let mut generator = ScriptedGenerator::new(small_catalogue());
        let outcome = generator.generate(&GenerationRequest::unconstrained());
        assert_eq!(outcome, Ok(GeneratedSetup::default()));
    }

    #[test]
    fn test_generate_error_displays_message_verbatim() {
        let message = "Could not pick 10 kingdom cards! Ensure your filters \
                       don't over-limit cards.";
        let error = GenerateError::Unsatisfiable(message.to_string());
        assert_eq!(error.to_string(), message);
        assert_eq!(error.kind(), "unsatisfiable");

        let conflict = GenerateError::Conflict("overlap".to_string());
        assert_eq!(conflict.kind(), "conflict");
    }
}
