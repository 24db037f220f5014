//! Module with serializable descriptions of states without callbacks.
//!
//! Patterns that only emit or ignore their matches need no code. Such states can be kept in data
//! files and turned into [`State`]s at runtime.
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{Pattern, RegexFlags, Result, State};

/// A pattern without a transform callback.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// The name of the pattern, used as token kind.
    pub name: String,
    /// The regular expression.
    pub pattern: String,
    /// If matches are discarded.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore: bool,
}

/// A state whose patterns have no transform callbacks and that has no error hook.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateDefinition {
    /// The name of the state.
    pub name: String,
    /// The patterns in priority order.
    pub patterns: Vec<PatternDefinition>,
    /// If the state is inclusive.
    #[serde(default)]
    pub inclusive: bool,
    /// The characters that are skipped silently.
    #[serde(default)]
    pub ignore: String,
    /// The regex flags of the state.
    #[serde(default)]
    pub flags: RegexFlags,
}

impl<V, C> From<PatternDefinition> for Pattern<V, C> {
    fn from(definition: PatternDefinition) -> Self {
        let pattern = Pattern::new(definition.name, definition.pattern);
        if definition.ignore {
            pattern.ignored()
        } else {
            pattern
        }
    }
}

impl<V, C> From<StateDefinition> for State<V, C> {
    fn from(definition: StateDefinition) -> Self {
        State::new(
            definition.name,
            definition.patterns.into_iter().map(Pattern::from),
        )
        .inclusive(definition.inclusive)
        .ignore(definition.ignore)
        .flags(definition.flags)
    }
}

/// Reads a JSON array of [`StateDefinition`]s and converts them into states.
pub fn states_from_json<V, C, R: Read>(reader: R) -> Result<Vec<State<V, C>>> {
    let definitions: Vec<StateDefinition> = serde_json::from_reader(reader)?;
    Ok(definitions.into_iter().map(State::from).collect())
}
