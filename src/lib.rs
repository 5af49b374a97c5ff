pub mod catalogue;
pub mod generator;
pub mod ids;
pub mod projection;
pub mod request;
pub mod selection;
pub mod session;
pub mod text;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm_api;

#[cfg(test)]
mod tests;

pub use catalogue::{Catalogue, CatalogueEntry, ExpansionIndex};
pub use generator::{GenerateError, GeneratedSetup, Generator, ScriptedGenerator};
pub use ids::{CardId, ExpansionId};
pub use projection::{DisplayGroup, DisplayModel, ProjectionError, project};
pub use request::GenerationRequest;
pub use selection::{CardNode, ExpansionNode, SelectionTree, TreePurpose};
pub use session::{SetupSession, SubmitError, SubmitTicket};
pub use text::display_name;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use wasm_api::{JsGenerator, WasmSession};
