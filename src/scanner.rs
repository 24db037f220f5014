use std::{fmt, sync::Arc};

use log::trace;
use regex_automata::util::primitives::NonMaxUsize;
use rustc_hash::FxHashMap;

use crate::{
    internal::Resolution, position::LineIndex, Position, Result, ScannerError, ScannerErrorKind,
    State, Token, TokenKind, Tokens, Transform,
};

/// A Scanner.
///
/// It owns a registry of [`State`]s, the input, a cursor into the input and a stack of states.
/// The state on top of the stack, together with the inclusive states below it, determines which
/// patterns are matched at the cursor.
///
/// Transform callbacks and error hooks receive the scanner itself, so they can move the cursor
/// and change the state stack while a token is being scanned. This is the mechanism for context
/// sensitive scanning. It is known from Flex as *Start conditions*.
/// See <https://www.cs.princeton.edu/~appel/modern/c/software/flex/flex.html#SEC11>
/// for more information.
///
/// To create a scanner, you can use the [`crate::ScannerBuilder`] or [`Scanner::new`]. At least
/// one state must be given. The first one is the start state.
pub struct Scanner<V = String, C = ()> {
    states: Vec<Arc<State<V, C>>>,
    // Maps a name to the first state with that name.
    state_index: FxHashMap<String, usize>,
    state_stack: Vec<Arc<State<V, C>>>,
    input: String,
    line_index: LineIndex,
    cursor: usize,
    context: C,
    // Capture slots reused by every match attempt.
    slots: Vec<Option<NonMaxUsize>>,
}

impl<V, C: Default> Scanner<V, C> {
    /// Creates a scanner with the given state registry and the default context.
    pub fn new<I, S>(states: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<State<V, C>>>,
    {
        Self::with_context(states, C::default())
    }

    /// Sets a new input with the default context.
    /// The state stack is reset to the first registered state.
    pub fn feed(&mut self, text: impl Into<String>) {
        let start = Arc::clone(&self.states[0]);
        self.reset(text.into(), C::default(), start);
    }
}

impl<V, C> Scanner<V, C> {
    /// Creates a scanner with the given state registry and context.
    pub fn with_context<I, S>(states: I, context: C) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<State<V, C>>>,
    {
        let states: Vec<Arc<State<V, C>>> = states.into_iter().map(Into::into).collect();
        let start = states
            .first()
            .cloned()
            .ok_or_else(|| ScannerError::new(ScannerErrorKind::EmptyRegistry))?;
        let mut state_index = FxHashMap::default();
        for (index, state) in states.iter().enumerate() {
            state_index.entry(state.name().to_string()).or_insert(index);
        }
        Ok(Self {
            states,
            state_index,
            state_stack: vec![start],
            input: String::new(),
            line_index: LineIndex::new(""),
            cursor: 0,
            context,
            slots: Vec::new(),
        })
    }

    /// Sets a new input and context.
    /// The state stack is reset to the given state, or to the first registered state if `None`
    /// is given.
    pub fn feed_with(
        &mut self,
        text: impl Into<String>,
        context: C,
        start_state: Option<&str>,
    ) -> Result<()> {
        let start = match start_state {
            Some(name) => Arc::clone(self.lookup(name)?),
            None => Arc::clone(&self.states[0]),
        };
        self.reset(text.into(), context, start);
        Ok(())
    }

    fn reset(&mut self, input: String, context: C, start: Arc<State<V, C>>) {
        trace!("Feed {} bytes, start state '{}'", input.len(), start.name());
        self.line_index = LineIndex::new(&input);
        self.input = input;
        self.cursor = 0;
        self.context = context;
        self.state_stack = vec![start];
    }

    /// Returns the first registered state with the given name.
    pub fn lookup(&self, name: &str) -> Result<&Arc<State<V, C>>> {
        self.state_index
            .get(name)
            .map(|index| &self.states[*index])
            .ok_or_else(|| ScannerError::new(ScannerErrorKind::UndefinedState(name.to_string())))
    }

    /// Replaces the whole state stack with the given state.
    pub fn set_state(&mut self, name: &str) -> Result<()> {
        let state = Arc::clone(self.lookup(name)?);
        trace!("Set state '{}'", name);
        self.state_stack = vec![state];
        Ok(())
    }

    /// Pushes the given state on top of the state stack.
    pub fn push_state(&mut self, name: &str) -> Result<()> {
        let state = Arc::clone(self.lookup(name)?);
        trace!("Push state '{}' onto '{}'", name, self.current_state());
        self.state_stack.push(state);
        Ok(())
    }

    /// Removes the top of the state stack.
    /// The last remaining state can't be removed.
    pub fn pop_state(&mut self) -> Result<()> {
        if self.state_stack.len() <= 1 {
            return Err(ScannerError::new(ScannerErrorKind::StateStackUnderflow(
                self.current_state().to_string(),
            )));
        }
        let popped = self.state_stack.pop();
        trace!(
            "Pop state '{}', back in '{}'",
            popped.as_ref().map_or("", |state| state.name()),
            self.current_state()
        );
        Ok(())
    }

    /// Advances the cursor by `n` characters, at most to the end of the input.
    pub fn skip(&mut self, n: usize) {
        let rest = &self.input[self.cursor..];
        let advance = rest.char_indices().nth(n).map_or(rest.len(), |(i, _)| i);
        trace!("Skip {} characters at {}", n, self.cursor);
        self.cursor += advance;
    }

    /// Moves the cursor to the given byte offset.
    /// If the offset is greater than the length of the input, the cursor is set to the end of the
    /// input. An offset inside a character is moved forward to the next character boundary.
    pub fn set_offset(&mut self, offset: usize) {
        let mut offset = offset.min(self.input.len());
        while !self.input.is_char_boundary(offset) {
            offset += 1;
        }
        trace!("Set offset to {}", offset);
        self.cursor = offset;
    }

    /// The current byte offset of the cursor.
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Check if the cursor reached the end of the input.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.input.len()
    }

    /// The input the scanner was fed with.
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The line and column of the given byte offset.
    pub fn position(&self, offset: usize) -> Position {
        self.line_index.position(&self.input, offset)
    }

    /// The name of the state on top of the state stack.
    pub fn current_state(&self) -> &str {
        self.state_stack.last().map_or("", |state| state.name())
    }

    /// The names of the states on the state stack, from bottom to top.
    pub fn state_stack(&self) -> impl Iterator<Item = &str> + '_ {
        self.state_stack.iter().map(|state| state.name())
    }

    /// The registered states.
    #[inline]
    pub fn states(&self) -> &[Arc<State<V, C>>] {
        &self.states
    }

    /// The context the scanner was fed with.
    #[inline]
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the context.
    #[inline]
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Compiles the patterns of all registered states.
    pub fn compile_all(&self) -> Result<()> {
        self.states.iter().try_for_each(|state| state.compile())
    }

    /// The top state and the inclusive states below it, down to and including the first
    /// exclusive state.
    fn active_states(&self) -> impl Iterator<Item = &Arc<State<V, C>>> + '_ {
        debug_assert!(!self.state_stack.is_empty(), "state stack is empty");
        let depth = self
            .state_stack
            .iter()
            .rev()
            .position(|state| !state.is_inclusive())
            .map_or(self.state_stack.len(), |index| index + 1);
        self.state_stack.iter().rev().take(depth)
    }

    fn skip_ignored(&mut self) {
        let skipped: usize = match self
            .active_states()
            .map(|state| state.ignore_chars())
            .find(|chars| !chars.is_empty())
        {
            Some(ignore) => self.input[self.cursor..]
                .chars()
                .take_while(|c| ignore.contains(*c))
                .map(char::len_utf8)
                .sum(),
            None => 0,
        };
        self.cursor += skipped;
    }

    /// Tries all automata of the active states in order and returns the first match at the
    /// cursor: the matching state, the index of the pattern and the end of the match.
    fn match_at_cursor(&mut self) -> Result<Option<(Arc<State<V, C>>, usize, usize)>> {
        let mut slots = std::mem::take(&mut self.slots);
        let mut found = None;
        'states: for state in self.active_states() {
            for automaton in state.compiled()? {
                let matched = automaton.match_at(&self.input, self.cursor, &mut slots);
                if let Some((index, end)) = matched {
                    found = Some((Arc::clone(state), index, end));
                    break 'states;
                }
            }
        }
        self.slots = slots;
        Ok(found)
    }

    fn scan_failure(&self, offset: usize, hook_stalled: bool) -> ScannerError {
        let remainder = self.input[offset..].to_string();
        let character = remainder.chars().next().unwrap_or_default();
        let position = self.position(offset);
        let kind = if hook_stalled {
            ScannerErrorKind::ErrorHookStalled {
                character,
                offset,
                position,
                remainder,
            }
        } else {
            ScannerErrorKind::IllegalCharacter {
                character,
                offset,
                position,
                remainder,
            }
        };
        ScannerError::new(kind)
    }
}

impl<V, C> Scanner<V, C>
where
    V: for<'a> From<&'a str>,
    C: Clone,
{
    /// Returns the next token, or `None` at the end of the input.
    ///
    /// Ignored characters and matches of ignored patterns are skipped. Transform callbacks and
    /// error hooks run synchronously inside this call.
    pub fn next_token(&mut self) -> Result<Option<Token<V, C>>> {
        loop {
            self.skip_ignored();
            if self.is_at_end() {
                self.cursor = self.input.len();
                return Ok(None);
            }
            let start = self.cursor;
            let emitted = match self.match_at_cursor()? {
                Some((state, index, end)) => self.dispatch(&state, index, start, end)?,
                None => self.recover(start)?,
            };
            if emitted.is_some() {
                return Ok(emitted);
            }
        }
    }

    /// Returns an iterator over the remaining tokens.
    pub fn tokens(&mut self) -> Tokens<'_, V, C> {
        Tokens::new(self)
    }

    fn dispatch(
        &mut self,
        state: &State<V, C>,
        index: usize,
        start: usize,
        end: usize,
    ) -> Result<Option<Token<V, C>>> {
        let pattern = &state.patterns()[index];
        trace!(
            "Matched '{}' of state '{}' at {}..{}",
            pattern.name(),
            state.name(),
            start,
            end
        );
        let mut stack_changed = false;
        let emitted = match Resolution::of(pattern) {
            Resolution::Emit => {
                let token = self.candidate(pattern.name(), start, end);
                self.cursor = end;
                Some(token)
            }
            Resolution::Ignore => {
                self.cursor = end;
                None
            }
            Resolution::Transform(transform) => {
                let transform = Arc::clone(transform);
                let candidate = self.candidate(pattern.name(), start, end);
                // The callback sees the cursor behind the match and may move it.
                self.cursor = end;
                let depth = self.state_stack.len();
                let top = self.state_stack.last().cloned();
                let transformed = transform(candidate, self)?;
                stack_changed = depth != self.state_stack.len()
                    || !top
                        .zip(self.state_stack.last())
                        .is_some_and(|(before, after)| Arc::ptr_eq(&before, after));
                match transformed {
                    Transform::Replace(token) => Some(token),
                    Transform::Value(value) => Some(Token::new(
                        pattern.name(),
                        value,
                        start,
                        self.context.clone(),
                    )),
                    Transform::Suppress => None,
                }
            }
        };
        // An empty match must move the cursor or switch states to make progress.
        if start == end && self.cursor == start && !stack_changed {
            return Err(ScannerError::new(ScannerErrorKind::EmptyMatch {
                state: state.name().to_string(),
                pattern: pattern.name().to_string(),
                offset: start,
            }));
        }
        Ok(emitted)
    }

    fn recover(&mut self, start: usize) -> Result<Option<Token<V, C>>> {
        let Some(hook) = self
            .active_states()
            .find_map(|state| state.error_hook().cloned())
        else {
            return Err(self.scan_failure(start, false));
        };
        trace!("No match at {}, calling error hook", start);
        let token = Token::error(
            V::from(&self.input[start..]),
            start,
            self.context.clone(),
        );
        let emitted = hook(token, self)?;
        if self.cursor == start {
            return Err(self.scan_failure(start, true));
        }
        Ok(emitted)
    }

    fn candidate(&self, name: &str, start: usize, end: usize) -> Token<V, C> {
        Token::new(
            TokenKind::Named(name.to_string()),
            V::from(&self.input[start..end]),
            start,
            self.context.clone(),
        )
    }
}

impl<'s, V, C> IntoIterator for &'s mut Scanner<V, C>
where
    V: for<'a> From<&'a str>,
    C: Clone,
{
    type Item = Result<Token<V, C>>;
    type IntoIter = Tokens<'s, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        Tokens::new(self)
    }
}

impl<V, C: fmt::Debug> fmt::Debug for Scanner<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field(
                "states",
                &self.states.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("state_stack", &self.state_stack().collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .field("length", &self.input.len())
            .field("context", &self.context)
            .finish()
    }
}
