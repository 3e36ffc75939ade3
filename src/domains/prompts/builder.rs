//! Prompt builders.
//!
//! [`PromptBuilder`] is the object-safe seam the registry dispatches through.
//! Definitions in `definitions/` are adapted to it by [`DefinitionBuilder`];
//! ad hoc closures are adapted by [`FnBuilder`].

use rmcp::model::PromptArgument;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, error};

use super::definitions::PromptDefinition;
use super::error::PromptError;
use super::responses::{BuilderOutput, format_for_responses_api};
use super::validation::{RequiredField, parse_params, validate_required};

/// Renders a params object into a prompt.
pub trait PromptBuilder: Send + Sync {
    /// Build the prompt for `params`.
    fn build(&self, params: &Value) -> Result<BuilderOutput, PromptError>;

    /// Human-readable description, if the builder has one.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Arguments advertised to MCP clients.
    fn arguments(&self) -> Vec<PromptArgument> {
        Vec::new()
    }

    /// Top-level fields the builder rejects params without.
    fn required_fields(&self) -> &'static [RequiredField] {
        &[]
    }
}

/// Adapts a [`PromptDefinition`] to [`PromptBuilder`].
pub struct DefinitionBuilder<P>(PhantomData<fn() -> P>);

impl<P> DefinitionBuilder<P> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<P> Default for DefinitionBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PromptDefinition> PromptBuilder for DefinitionBuilder<P> {
    fn build(&self, params: &Value) -> Result<BuilderOutput, PromptError> {
        let prompt_type = P::PROMPT_TYPE.as_str();

        let params = validate_required(params, P::required_fields())?;
        let typed: P::Params = parse_params(params)?;

        let rendered = P::render(&typed).map_err(|e| {
            let e = e.into_construction(prompt_type);
            if !e.is_validation() {
                error!(prompt_type, error = %e, "Prompt construction failed");
            }
            e
        })?;

        debug!(
            prompt_type,
            system_len = rendered.system.len(),
            user_len = rendered.user.len(),
            "Rendered prompt"
        );

        Ok(format_for_responses_api(rendered.user, rendered.system).into())
    }

    fn description(&self) -> Option<&str> {
        Some(P::PROMPT_TYPE.description())
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        P::arguments()
    }

    fn required_fields(&self) -> &'static [RequiredField] {
        P::required_fields()
    }
}

/// Adapts a closure to [`PromptBuilder`].
pub struct FnBuilder<F>(F);

impl<F> FnBuilder<F>
where
    F: Fn(&Value) -> Result<BuilderOutput, PromptError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> PromptBuilder for FnBuilder<F>
where
    F: Fn(&Value) -> Result<BuilderOutput, PromptError> + Send + Sync,
{
    fn build(&self, params: &Value) -> Result<BuilderOutput, PromptError> {
        (self.0)(params)
    }
}
