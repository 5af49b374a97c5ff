//! WASM-facing API for browser integration.
//!
//! This module provides a small wrapper around `SetupSession` so JavaScript
//! can:
//! - construct a session over the page's generator module
//! - toggle checkboxes and pick counts
//! - read tree snapshots and submit for a displayable setup
//!
//! The generator lives on the JS side. The page loads its module
//! (asynchronously, before any session exists) and hands four entry points
//! to the constructor; everything after that is synchronous calls into this
//! wrapper.

use js_sys::{Array, Function, Object};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::catalogue::Catalogue;
use crate::generator::{GenerateError, GeneratedSetup, Generator};
use crate::ids::{CardId, ExpansionId};
use crate::projection::DisplayModel;
use crate::request::GenerationRequest;
use crate::selection::{SelectionTree, TreePurpose};
use crate::session::SetupSession;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/// [`Generator`] backed by functions supplied from JavaScript.
///
/// Expected entry points:
/// - `catalogue()` returns an object mapping expansion id to an array of
///   card ids; key order is the generator's enumeration order.
/// - `projectCountOptions()` / `baneCountOptions()` return arrays of legal
///   count values.
/// - `generate(request)` returns the setup object on success and throws
///   `{ kind, message }` on failure. A thrown value of any other shape is
///   surfaced as an unsatisfiable request with its string form.
///
/// The catalogue and option lists are pulled eagerly at construction, so a
/// misbehaving module fails the session before any tree exists.
pub struct JsGenerator {
    catalogue: Catalogue,
    project_counts: Vec<u8>,
    bane_counts: Vec<u8>,
    generate_fn: Function,
}

impl JsGenerator {
    pub fn from_module(
        catalogue_fn: &Function,
        project_count_options_fn: &Function,
        bane_count_options_fn: &Function,
        generate_fn: Function,
    ) -> Result<Self, JsValue> {
        let catalogue = catalogue_from_js(catalogue_fn.call0(&JsValue::NULL)?)?;
        let project_counts =
            count_options_from_js("project", project_count_options_fn.call0(&JsValue::NULL)?)?;
        let bane_counts =
            count_options_from_js("bane", bane_count_options_fn.call0(&JsValue::NULL)?)?;
        Ok(Self {
            catalogue,
            project_counts,
            bane_counts,
            generate_fn,
        })
    }
}

impl Generator for JsGenerator {
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
        let payload = match request_payload(request) {
            Ok(value) => value,
            Err(e) => {
                return Err(GenerateError::Unsatisfiable(format!(
                    "request encode failed: {e}"
                )));
            }
        };
        match self.generate_fn.call1(&JsValue::NULL, &payload) {
            Ok(setup) => serde_wasm_bindgen::from_value(setup).map_err(|e| {
                GenerateError::Unsatisfiable(format!("generator returned a malformed setup: {e}"))
            }),
            Err(thrown) => Err(generate_error_from_js(thrown)),
        }
    }
}

/// Read an `{ expansion: [cards] }` object, preserving its key order.
fn catalogue_from_js(value: JsValue) -> Result<Catalogue, JsValue> {
    if !value.is_object() {
        return Err(JsValue::from_str(
            "catalogue must be an object mapping expansions to card lists",
        ));
    }
    let mut catalogue = Catalogue::new();
    for entry in Object::entries(&Object::from(value)).iter() {
        let pair = Array::from(&entry);
        let expansion = pair
            .get(0)
            .as_string()
            .ok_or_else(|| JsValue::from_str("catalogue keys must be strings"))?;
        let cards: Vec<String> = serde_wasm_bindgen::from_value(pair.get(1))
            .map_err(|e| JsValue::from_str(&format!("invalid card list for {expansion}: {e}")))?;
        catalogue.push(
            ExpansionId::new(expansion),
            cards.into_iter().map(CardId::new).collect(),
        );
    }
    Ok(catalogue)
}

fn count_options_from_js(which: &str, value: JsValue) -> Result<Vec<u8>, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("invalid {which} count options: {e}")))
}

/// Absent constraints must reach the generator as `null`, not `undefined`.
fn request_payload(request: &GenerationRequest) -> Result<JsValue, serde_wasm_bindgen::Error> {
    request.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

#[derive(Debug, Clone, Deserialize)]
struct ThrownErrorShape {
    kind: String,
    message: String,
}

fn generate_error_from_js(thrown: JsValue) -> GenerateError {
    if let Ok(shape) = serde_wasm_bindgen::from_value::<ThrownErrorShape>(thrown.clone()) {
        return match shape.kind.as_str() {
            "conflict" => GenerateError::Conflict(shape.message),
            _ => GenerateError::Unsatisfiable(shape.message),
        };
    }
    GenerateError::Unsatisfiable(thrown.as_string().unwrap_or_else(|| format!("{thrown:?}")))
}

#[derive(Debug, Clone, Serialize)]
struct CardNodeSnapshot {
    id: String,
    name: String,
    checked: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ExpansionNodeSnapshot {
    id: String,
    name: String,
    checked: bool,
    cards: Vec<CardNodeSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
struct TreeSnapshot {
    purpose: String,
    cards_toggleable: bool,
    expansions: Vec<ExpansionNodeSnapshot>,
}

impl TreeSnapshot {
    fn from_tree(tree: &SelectionTree) -> Self {
        Self {
            purpose: tree.purpose().as_str().to_string(),
            cards_toggleable: tree.cards_toggleable(),
            expansions: tree
                .expansions()
                .iter()
                .map(|expansion| ExpansionNodeSnapshot {
                    id: expansion.id.as_str().to_string(),
                    name: expansion.name.clone(),
                    checked: expansion.is_checked,
                    cards: expansion
                        .children
                        .iter()
                        .map(|card| CardNodeSnapshot {
                            id: card.id.as_str().to_string(),
                            name: card.name.clone(),
                            checked: card.is_checked,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct TreesSnapshot {
    includes: TreeSnapshot,
    bans: TreeSnapshot,
    expansions: TreeSnapshot,
}

#[derive(Debug, Clone, Serialize)]
struct SubmitOutcome {
    status: &'static str,
    model: Option<DisplayModel>,
    kind: Option<&'static str>,
    message: Option<String>,
}

/// Browser-exposed session handle.
#[wasm_bindgen]
pub struct WasmSession {
    session: SetupSession<JsGenerator>,
}

#[wasm_bindgen]
impl WasmSession {
    /// Construct a session over the page's generator module.
    #[wasm_bindgen(constructor)]
    pub fn new(
        catalogue_fn: Function,
        project_count_options_fn: Function,
        bane_count_options_fn: Function,
        generate_fn: Function,
    ) -> Result<WasmSession, JsValue> {
        let generator = JsGenerator::from_module(
            &catalogue_fn,
            &project_count_options_fn,
            &bane_count_options_fn,
            generate_fn,
        )?;
        Ok(Self {
            session: SetupSession::new(generator),
        })
    }

    /// Snapshot of the three selection trees for rendering.
    #[wasm_bindgen]
    pub fn trees(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.trees_snapshot())
            .map_err(|e| JsValue::from_str(&format!("trees encode failed: {e}")))
    }

    /// Tree snapshot as pretty JSON.
    #[wasm_bindgen(js_name = treesJson)]
    pub fn trees_json(&self) -> Result<String, JsValue> {
        serde_json::to_string_pretty(&self.trees_snapshot())
            .map_err(|e| JsValue::from_str(&format!("json encode failed: {e}")))
    }

    /// Toggle a node in one tree ("includes", "bans" or "expansions").
    /// Returns whether any checkbox changed.
    #[wasm_bindgen]
    pub fn toggle(&mut self, tree: &str, node_id: &str) -> Result<bool, JsValue> {
        let purpose = TreePurpose::parse(tree)
            .ok_or_else(|| JsValue::from_str(&format!("unknown tree: {tree}")))?;
        Ok(self.session.toggle(purpose, node_id))
    }

    /// Choose a project count; any negative value means "random".
    #[wasm_bindgen(js_name = setProjectCount)]
    pub fn set_project_count(&mut self, count: i32) {
        self.session.set_project_count(u8::try_from(count).ok());
    }

    /// Choose a bane count; any negative value means "random".
    #[wasm_bindgen(js_name = setBaneCount)]
    pub fn set_bane_count(&mut self, count: i32) {
        self.session.set_bane_count(u8::try_from(count).ok());
    }

    /// Legal project count values, as the generator reported them.
    #[wasm_bindgen(js_name = projectCountOptions)]
    pub fn project_count_options(&self) -> Vec<u8> {
        self.session.project_count_options().to_vec()
    }

    /// Legal bane count values, as the generator reported them.
    #[wasm_bindgen(js_name = baneCountOptions)]
    pub fn bane_count_options(&self) -> Vec<u8> {
        self.session.bane_count_options().to_vec()
    }

    /// The request the current selections describe, exactly as `generate`
    /// would receive it.
    #[wasm_bindgen(js_name = currentRequest)]
    pub fn current_request(&self) -> Result<JsValue, JsValue> {
        request_payload(&self.session.current_request())
            .map_err(|e| JsValue::from_str(&format!("request encode failed: {e}")))
    }

    /// Run one submit and report the outcome as data.
    ///
    /// Generation failures are part of the payload (`status: "error"` with
    /// `kind` and `message`), never thrown; the returned `Err` only signals
    /// an encode failure in the wrapper itself.
    #[wasm_bindgen]
    pub fn submit(&mut self) -> Result<JsValue, JsValue> {
        let outcome = match self.session.submit() {
            Ok(model) => SubmitOutcome {
                status: "ok",
                model: Some(model),
                kind: None,
                message: None,
            },
            Err(error) => SubmitOutcome {
                status: "error",
                model: None,
                kind: Some(error.kind()),
                message: Some(error.to_string()),
            },
        };
        serde_wasm_bindgen::to_value(&outcome)
            .map_err(|e| JsValue::from_str(&format!("submit encode failed: {e}")))
    }
}

impl WasmSession {
    fn trees_snapshot(&self) -> TreesSnapshot {
        TreesSnapshot {
            includes: TreeSnapshot::from_tree(self.session.tree(TreePurpose::Includes)),
            bans: TreeSnapshot::from_tree(self.session.tree(TreePurpose::Bans)),
            expansions: TreeSnapshot::from_tree(self.session.tree(TreePurpose::ExpansionPool)),
        }
    }
}
