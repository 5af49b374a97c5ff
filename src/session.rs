//! One sitting of the setup picker.
//!
//! The session owns everything the page shows: the three selection trees,
//! the two count choices, and the submit lifecycle. It talks to the
//! generator exactly twice per concern, once at startup for the catalogue
//! and option lists, then once per submit for the draw itself.
//!
//! Submits are split into `begin` and `finish` so a driver whose generator
//! answers asynchronously can interleave them. Tickets keep that honest:
//! only the newest submit may render, older results are discarded when they
//! finally arrive.

use crate::catalogue::{Catalogue, ExpansionIndex};
use crate::generator::{GenerateError, GeneratedSetup, Generator};
use crate::projection::{DisplayModel, ProjectionError, project};
use crate::request::GenerationRequest;
use crate::selection::{SelectionTree, TreePurpose};

/// Handle for one submit, issued by [`SetupSession::begin_submit`].
///
/// Tickets are ordered by issue time; a ticket older than the newest issued
/// one identifies a superseded submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubmitTicket(u64);

impl SubmitTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Failure surfaced by a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The generator rejected the request. The message is the generator's
    /// own and is shown to the user verbatim.
    Generate(GenerateError),
    /// The projector hit an internal defect; nothing the user did and
    /// nothing they can fix.
    Projection(ProjectionError),
}

impl SubmitError {
    /// Stable tag for logs and browser payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::Generate(error) => error.kind(),
            SubmitError::Projection(_) => "internal",
        }
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Generate(error) => write!(f, "{error}"),
            SubmitError::Projection(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<GenerateError> for SubmitError {
    fn from(error: GenerateError) -> Self {
        SubmitError::Generate(error)
    }
}

impl From<ProjectionError> for SubmitError {
    fn from(error: ProjectionError) -> Self {
        SubmitError::Projection(error)
    }
}

/// Selection state and submit pipeline for one sitting.
pub struct SetupSession<G> {
    generator: G,
    catalogue: Catalogue,
    index: ExpansionIndex,
    includes: SelectionTree,
    bans: SelectionTree,
    pool: SelectionTree,
    project_count: Option<u8>,
    bane_count: Option<u8>,
    project_count_options: Vec<u8>,
    bane_count_options: Vec<u8>,
    newest_ticket: u64,
}

impl<G: Generator> SetupSession<G> {
    /// Start a sitting: pull the catalogue once, build the three trees and
    /// the projector's index from it.
    ///
    /// Both count choices start at "random" (`None`) and every checkbox
    /// starts unchecked.
    pub fn new(generator: G) -> Self {
        let catalogue = generator.catalogue();
        let index = ExpansionIndex::from_catalogue(&catalogue);
        let includes = SelectionTree::build(TreePurpose::Includes, &catalogue);
        let bans = SelectionTree::build(TreePurpose::Bans, &catalogue);
        let pool = SelectionTree::build(TreePurpose::ExpansionPool, &catalogue);
        let project_count_options = generator.project_count_options();
        let bane_count_options = generator.bane_count_options();
        tracing::debug!(
            expansions = catalogue.len(),
            cards = index.len(),
            "setup session started"
        );
        Self {
            generator,
            catalogue,
            index,
            includes,
            bans,
            pool,
            project_count: None,
            bane_count: None,
            project_count_options,
            bane_count_options,
            newest_ticket: 0,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn tree(&self, purpose: TreePurpose) -> &SelectionTree {
        match purpose {
            TreePurpose::Includes => &self.includes,
            TreePurpose::Bans => &self.bans,
            TreePurpose::ExpansionPool => &self.pool,
        }
    }

    /// Flip one checkbox under its tree's toggle rules. Returns whether any
    /// state changed.
    pub fn toggle(&mut self, purpose: TreePurpose, node_id: &str) -> bool {
        let tree = match purpose {
            TreePurpose::Includes => &mut self.includes,
            TreePurpose::Bans => &mut self.bans,
            TreePurpose::ExpansionPool => &mut self.pool,
        };
        tree.toggle(node_id)
    }

    pub fn project_count(&self) -> Option<u8> {
        self.project_count
    }

    pub fn bane_count(&self) -> Option<u8> {
        self.bane_count
    }

    /// Choose a project count, `None` meaning "let the generator decide".
    pub fn set_project_count(&mut self, count: Option<u8>) {
        self.project_count = count;
    }

    /// Choose a bane count, `None` meaning "let the generator decide".
    pub fn set_bane_count(&mut self, count: Option<u8>) {
        self.bane_count = count;
    }

    /// Legal project count values, as the generator reported them.
    pub fn project_count_options(&self) -> &[u8] {
        &self.project_count_options
    }

    /// Legal bane count values, as the generator reported them.
    pub fn bane_count_options(&self) -> &[u8] {
        &self.bane_count_options
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// The request the current selections describe.
    pub fn current_request(&self) -> GenerationRequest {
        GenerationRequest::from_selections(
            &self.includes,
            &self.bans,
            &self.pool,
            self.project_count,
            self.bane_count,
        )
    }

    /// Open a submit: snapshot the current request and issue the ticket
    /// that must accompany its result. Issuing a new ticket supersedes
    /// every earlier one.
    pub fn begin_submit(&mut self) -> (SubmitTicket, GenerationRequest) {
        self.newest_ticket += 1;
        tracing::debug!(ticket = self.newest_ticket, "submit opened");
        (SubmitTicket(self.newest_ticket), self.current_request())
    }

    /// Close a submit with the generator's outcome.
    ///
    /// Returns `None` when the ticket has been superseded by a newer
    /// [`SetupSession::begin_submit`]; the result is discarded and nothing
    /// should be rendered for it. Otherwise, projects successful draws and
    /// wraps failures for display.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<GeneratedSetup, GenerateError>,
    ) -> Option<Result<DisplayModel, SubmitError>> {
        if ticket.0 < self.newest_ticket {
            tracing::debug!(
                ticket = ticket.0,
                newest = self.newest_ticket,
                "discarding superseded submit result"
            );
            return None;
        }
        Some(self.settle(outcome))
    }

    /// Submit synchronously: build the request, run the generator, project.
    pub fn submit(&mut self) -> Result<DisplayModel, SubmitError> {
        // The ticket issued here is the newest by construction; no other
        // submit can open while we hold &mut self.
        let (_ticket, request) = self.begin_submit();
        let outcome = self.generator.generate(&request);
        self.settle(outcome)
    }

    fn settle(
        &self,
        outcome: Result<GeneratedSetup, GenerateError>,
    ) -> Result<DisplayModel, SubmitError> {
        match outcome {
            Ok(setup) => Ok(project(&setup, &self.index)?),
            Err(error) => {
                tracing::debug!(kind = error.kind(), "generation failed");
                Err(SubmitError::Generate(error))
            }
        }
    }
}
