use std::sync::Arc;

use crate::{scanner::Scanner, Result, State};

/// A builder for creating a scanner.
pub struct ScannerBuilder<V = String, C = ()> {
    states: Vec<Arc<State<V, C>>>,
    context: Option<C>,
    precompile: bool,
}

impl<V, C> Default for ScannerBuilder<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> ScannerBuilder<V, C> {
    /// Creates a new scanner builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            context: None,
            precompile: false,
        }
    }

    /// Adds a state to the scanner builder.
    /// The first state added is the start state of the scanner.
    pub fn add_state(mut self, state: impl Into<Arc<State<V, C>>>) -> Self {
        self.states.push(state.into());
        self
    }

    /// Adds multiple states to the scanner builder.
    pub fn add_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<State<V, C>>>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Sets the initial context of the scanner.
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Compiles all states when the scanner is built instead of on first use.
    /// Invalid patterns are reported by [`ScannerBuilder::build`] then.
    pub fn precompile(mut self) -> Self {
        self.precompile = true;
        self
    }
}

impl<V, C: Default> ScannerBuilder<V, C> {
    /// Builds the scanner from the scanner builder.
    pub fn build(self) -> Result<Scanner<V, C>> {
        let scanner = Scanner::with_context(self.states, self.context.unwrap_or_default())?;
        if self.precompile {
            scanner.compile_all()?;
        }
        Ok(scanner)
    }
}
