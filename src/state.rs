use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use crate::{internal::CompiledAutomaton, Pattern, RegexFlags, Result, Scanner, Token};

/// A callback that is invoked when no active pattern matches at the cursor.
///
/// It receives a token of kind [`crate::TokenKind::Error`] that holds the unconsumed rest of the
/// input and the live scanner. It must advance the cursor, e.g. with [`Scanner::skip`], and may
/// return a token to emit in place of the unmatched input.
pub type ErrorFn<V, C> =
    Arc<dyn Fn(Token<V, C>, &mut Scanner<V, C>) -> Result<Option<Token<V, C>>> + Send + Sync>;

/// A named set of patterns the scanner can be in.
///
/// States are stacked by the scanner. An exclusive state hides every state below it while it is
/// on top of the stack. An inclusive state adds its patterns on top of the state below it, and so
/// forth down the stack until the first exclusive state.
///
/// The patterns are compiled on first use and the result is kept for the lifetime of the state.
/// Share a state between scanners with an [`Arc`] to compile it only once.
pub struct State<V = String, C = ()> {
    name: String,
    patterns: Vec<Pattern<V, C>>,
    inclusive: bool,
    ignore: String,
    error_hook: Option<ErrorFn<V, C>>,
    flags: RegexFlags,
    nfa_size_limit: Option<usize>,
    compiled: OnceLock<Vec<CompiledAutomaton>>,
}

impl<V, C> State<V, C> {
    /// Create a new exclusive state.
    /// The order of the patterns is their priority: earlier patterns win if several match.
    pub fn new<P>(name: impl Into<String>, patterns: P) -> Self
    where
        P: IntoIterator<Item = Pattern<V, C>>,
    {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().collect(),
            inclusive: false,
            ignore: String::new(),
            error_hook: None,
            flags: RegexFlags::default(),
            nfa_size_limit: None,
            compiled: OnceLock::new(),
        }
    }

    /// Make the state inclusive or exclusive.
    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    /// Set the characters that are skipped silently before each match attempt.
    pub fn ignore(mut self, chars: impl Into<String>) -> Self {
        self.ignore = chars.into();
        self
    }

    /// Set the error hook.
    pub fn with_error_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Token<V, C>, &mut Scanner<V, C>) -> Result<Option<Token<V, C>>>
            + Send
            + Sync
            + 'static,
    {
        self.error_hook = Some(Arc::new(hook));
        self
    }

    /// Set the regex flags for all patterns of the state.
    pub fn flags(mut self, flags: RegexFlags) -> Self {
        self.flags = flags;
        self.compiled = OnceLock::new();
        self
    }

    /// Limit the heap size of the NFA of a composite regex in bytes.
    /// A composite regex that exceeds the limit is split into smaller ones.
    pub fn nfa_size_limit(mut self, limit: usize) -> Self {
        self.nfa_size_limit = Some(limit);
        self.compiled = OnceLock::new();
        self
    }

    /// Get the name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the patterns.
    #[inline]
    pub fn patterns(&self) -> &[Pattern<V, C>] {
        &self.patterns
    }

    /// Check if the state is inclusive.
    #[inline]
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Get the ignored characters.
    #[inline]
    pub fn ignore_chars(&self) -> &str {
        &self.ignore
    }

    /// Get the error hook.
    #[inline]
    pub fn error_hook(&self) -> Option<&ErrorFn<V, C>> {
        self.error_hook.as_ref()
    }

    /// Get the regex flags.
    #[inline]
    pub fn regex_flags(&self) -> RegexFlags {
        self.flags
    }

    /// Compiles the patterns if this has not happened yet.
    pub fn compile(&self) -> Result<()> {
        self.compiled().map(|_| ())
    }

    /// Check if the patterns are compiled already.
    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    pub(crate) fn compiled(&self) -> Result<&[CompiledAutomaton]> {
        if let Some(automata) = self.compiled.get() {
            return Ok(automata);
        }
        let automata = CompiledAutomaton::compile_all(
            &self.name,
            &self.patterns,
            &self.flags,
            self.nfa_size_limit,
        )?;
        Ok(self.compiled.get_or_init(|| automata))
    }
}

impl<V, C> fmt::Debug for State<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("patterns", &self.patterns)
            .field("inclusive", &self.inclusive)
            .field("ignore", &self.ignore)
            .field("error_hook", &self.error_hook.is_some())
            .field("flags", &self.flags)
            .finish()
    }
}
