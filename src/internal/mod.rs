/// Module that provides the composite regexes a state is compiled into.
pub(crate) mod compiled_automaton;
pub(crate) use compiled_automaton::{CompiledAutomaton, Resolution};
