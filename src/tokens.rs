use std::iter::FusedIterator;

use crate::{Result, Scanner, Token};

/// An iterator over the tokens of a scanner.
///
/// The iterator yields tokens until the end of the input is reached. A scanning error is yielded
/// once and ends the iteration as well. Feed the scanner again to start over.
///
/// This iterator can be created with the [`Scanner::tokens`] method.
#[derive(Debug)]
pub struct Tokens<'s, V, C> {
    scanner: &'s mut Scanner<V, C>,
    finished: bool,
}

impl<'s, V, C> Tokens<'s, V, C> {
    pub(crate) fn new(scanner: &'s mut Scanner<V, C>) -> Self {
        Self {
            scanner,
            finished: false,
        }
    }

    /// Access to the scanner, e.g. to switch states between two tokens.
    pub fn scanner(&mut self) -> &mut Scanner<V, C> {
        self.scanner
    }
}

impl<V, C> Iterator for Tokens<'_, V, C>
where
    V: for<'a> From<&'a str>,
    C: Clone,
{
    type Item = Result<Token<V, C>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.scanner.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<V, C> FusedIterator for Tokens<'_, V, C>
where
    V: for<'a> From<&'a str>,
    C: Clone,
{
}
