//! A restartable cursor over a slice of component values.

use super::token::ComponentValue;

/// A cursor over component values with checkpoint/restore support.
///
/// Grammar productions return `None` on mismatch; [`TokenCursor::try_parse`]
/// rewinds the cursor when that happens.
#[derive(Debug, Clone, Copy)]
pub struct TokenCursor<'a> {
    values: &'a [ComponentValue],
    position: usize,
}

impl<'a> TokenCursor<'a> {
    /// Create a cursor positioned at the first value.
    pub fn new(values: &'a [ComponentValue]) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// The current position, usable with [`TokenCursor::restore`].
    pub fn checkpoint(&self) -> usize {
        self.position
    }

    /// Rewind (or advance) to a previously taken checkpoint.
    pub fn restore(&mut self, checkpoint: usize) {
        self.position = checkpoint.min(self.values.len());
    }

    /// Returns the next value including whitespace.
    pub fn next_including_whitespace(&mut self) -> Option<&'a ComponentValue> {
        let value = self.values.get(self.position)?;
        self.position += 1;
        Some(value)
    }

    /// Returns the next non-whitespace value.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a ComponentValue> {
        self.skip_whitespace();
        self.next_including_whitespace()
    }

    /// Peek at the next value including whitespace.
    pub fn peek_including_whitespace(&self) -> Option<&'a ComponentValue> {
        self.values.get(self.position)
    }

    /// Peek at the next non-whitespace value.
    pub fn peek(&self) -> Option<&'a ComponentValue> {
        self.values[self.position..]
            .iter()
            .find(|value| !value.is_whitespace())
    }

    /// Skip over whitespace.
    pub fn skip_whitespace(&mut self) {
        while self
            .values
            .get(self.position)
            .is_some_and(ComponentValue::is_whitespace)
        {
            self.position += 1;
        }
    }

    /// Returns `true` if only whitespace remains.
    pub fn is_exhausted(&self) -> bool {
        self.peek().is_none()
    }

    /// The values not yet consumed.
    pub fn rest(&self) -> &'a [ComponentValue] {
        &self.values[self.position..]
    }

    /// Consume everything that remains and return it.
    pub fn take_rest(&mut self) -> &'a [ComponentValue] {
        let rest = self.rest();
        self.position = self.values.len();
        rest
    }

    /// Consume the next non-whitespace value if it is an identifier.
    pub fn expect_ident(&mut self) -> Option<&'a str> {
        self.try_parse(|cursor| cursor.next()?.as_ident())
    }

    /// Consume the identifier `keyword` (ASCII case-insensitive).
    pub fn expect_keyword(&mut self, keyword: &str) -> Option<()> {
        self.try_parse(|cursor| cursor.next()?.is_ident(keyword).then_some(()))
    }

    /// Succeeds if only whitespace remains.
    pub fn expect_exhausted(&self) -> Option<()> {
        self.is_exhausted().then_some(())
    }

    /// Run `parse`, rewinding the cursor if it returns `None`.
    pub fn try_parse<T>(&mut self, parse: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        let result = parse(self);
        if result.is_none() {
            self.restore(checkpoint);
        }
        result
    }
}
