use std::ops::Range;

use log::{debug, trace};
use regex_automata::{meta::Regex, util::primitives::NonMaxUsize, Anchored, Input, PatternID};

use crate::{Pattern, RegexFlags, Result, ScannerErrorKind, TransformFn};

/// A composite regex built from a contiguous run of the patterns of a state.
///
/// Each pattern is a named alternative of the regex. The alternatives keep the declaration order,
/// so earlier patterns win if several alternatives match at the same position.
#[derive(Debug, Clone)]
pub(crate) struct CompiledAutomaton {
    regex: Regex,
    /// Start slot of the pattern's capture group in `regex` and index of the pattern in the
    /// state's pattern list.
    groups: Vec<(usize, usize)>,
}

/// What the scanner does with a match of a pattern.
pub(crate) enum Resolution<'a, V, C> {
    /// Hand the candidate token to the callback.
    Transform(&'a TransformFn<V, C>),
    /// Emit the candidate token.
    Emit,
    /// Consume the match silently.
    Ignore,
}

impl<'a, V, C> Resolution<'a, V, C> {
    pub(crate) fn of(pattern: &'a Pattern<V, C>) -> Self {
        match pattern.transform() {
            Some(transform) => Resolution::Transform(transform),
            None if pattern.is_ignored() => Resolution::Ignore,
            None => Resolution::Emit,
        }
    }
}

impl CompiledAutomaton {
    /// Compiles the patterns of a state into as few automata as possible.
    ///
    /// All patterns are first joined into one composite regex. If the engine rejects it, the
    /// pattern list is split in halves that are compiled independently, recursively. A single
    /// pattern that still fails to compile is reported as error.
    pub(crate) fn compile_all<V, C>(
        state: &str,
        patterns: &[Pattern<V, C>],
        flags: &RegexFlags,
        nfa_size_limit: Option<usize>,
    ) -> Result<Vec<Self>> {
        let automata =
            Self::compile_range(state, patterns, 0..patterns.len(), flags, nfa_size_limit)?;
        trace!(
            "Compiled {} patterns of state '{}' into {} automata",
            patterns.len(),
            state,
            automata.len()
        );
        Ok(automata)
    }

    fn compile_range<V, C>(
        state: &str,
        patterns: &[Pattern<V, C>],
        range: Range<usize>,
        flags: &RegexFlags,
        nfa_size_limit: Option<usize>,
    ) -> Result<Vec<Self>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let composite = patterns[range.clone()]
            .iter()
            .map(|pattern| pattern.group_expression())
            .collect::<Vec<_>>()
            .join("|");

        let mut config = Regex::config();
        if let Some(limit) = nfa_size_limit {
            config = config.nfa_size_limit(Some(limit));
        }
        let built = Regex::builder()
            .configure(config)
            .syntax(flags.syntax_config())
            .build(&composite);

        match built {
            Ok(regex) => {
                let groups = range
                    .filter_map(|index| {
                        let info = regex.group_info();
                        let group = info.to_index(PatternID::ZERO, patterns[index].name())?;
                        info.slot(PatternID::ZERO, group).map(|slot| (slot, index))
                    })
                    .collect();
                Ok(vec![Self { regex, groups }])
            }
            Err(source) if range.len() == 1 => Err(ScannerErrorKind::Pattern {
                state: state.to_string(),
                pattern: patterns[range.start].name().to_string(),
                source,
            }
            .into()),
            Err(e) => {
                let middle = range.start + range.len() / 2;
                debug!(
                    "Splitting patterns {:?} of state '{}' at {}: {}",
                    range, state, middle, e
                );
                let mut automata = Self::compile_range(
                    state,
                    patterns,
                    range.start..middle,
                    flags,
                    nfa_size_limit,
                )?;
                automata.extend(Self::compile_range(
                    state,
                    patterns,
                    middle..range.end,
                    flags,
                    nfa_size_limit,
                )?);
                Ok(automata)
            }
        }
    }

    /// Tries to match at exactly `start`.
    /// Returns the index of the matching pattern and the end offset of the match.
    ///
    /// `slots` is scratch space. It is resized as needed so one buffer can serve all automata.
    pub(crate) fn match_at(
        &self,
        haystack: &str,
        start: usize,
        slots: &mut Vec<Option<NonMaxUsize>>,
    ) -> Option<(usize, usize)> {
        let input = Input::new(haystack).range(start..).anchored(Anchored::Yes);
        slots.clear();
        slots.resize(self.regex.group_info().slot_len(), None);
        self.regex.search_slots(&input, slots)?;
        // Slot 1 holds the end of the overall match.
        let end = slots.get(1).copied().flatten()?.get();
        self.groups
            .iter()
            .find(|(slot, _)| slots.get(*slot).copied().flatten().is_some())
            .map(|(_, index)| (*index, end))
    }

    /// The indices of the patterns this automaton can match.
    #[cfg(test)]
    pub(crate) fn pattern_indices(&self) -> Vec<usize> {
        self.groups.iter().map(|(_, index)| *index).collect()
    }
}
