//! Execution context handed to protocol operations.
//!
//! Built once at the composition root and passed by reference to every
//! operation that needs configuration or the prompt facility.

use crate::config::RuntimeConfig;
use crate::prompt::{PromptHandler, ScriptedPromptHandler};

/// Shared state for protocol operations.
pub struct Context {
    config: RuntimeConfig,
    prompt: PromptHandler,
}

impl Context {
    /// Context with default configuration and a stdin prompt.
    pub fn new() -> Self {
        ContextBuilder::new().build()
    }

    /// Start building a context.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Prompt facility used by `input`.
    #[inline]
    pub fn prompt(&self) -> &PromptHandler {
        &self.prompt
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Context`.
#[derive(Default)]
pub struct ContextBuilder {
    config: RuntimeConfig,
    prompt: Option<PromptHandler>,
}

impl ContextBuilder {
    /// Builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime configuration.
    #[must_use]
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the prompt handler.
    #[must_use]
    pub fn prompt(mut self, prompt: PromptHandler) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Answer `input` from a fixed list of lines.
    #[must_use]
    pub fn scripted_input<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt(PromptHandler::Scripted(ScriptedPromptHandler::new(lines)))
    }

    /// Build the context.
    pub fn build(self) -> Context {
        Context {
            config: self.config,
            prompt: self.prompt.unwrap_or_default(),
        }
    }
}
