//! Forward cursor over a list.

use crate::item_type::ListItem;
use crate::list::ListStorage;
use crate::packet::Shared;
use std::iter::FusedIterator;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    At(usize),
    AfterLast,
}

/// Single-direction cursor over the index range `[0, len)` of a list.
///
/// The cursor starts *before* the first element. Each [`move_next`] moves
/// exactly one position and reports whether an element is there; once it
/// has reported `false` it stays exhausted until [`reset`] puts it back
/// before the first element.
///
/// The length is re-read on every step. If the list is structurally
/// modified while a cursor is open (possible when the list itself sits
/// behind shared interior mutability), the positions visited afterwards are
/// unspecified: elements may be skipped or seen twice. Use a fresh cursor
/// after modifying the list.
///
/// The cursor is also an [`Iterator`] yielding the element handles.
///
/// [`move_next`]: DataListCursor::move_next
/// [`reset`]: DataListCursor::reset
pub struct DataListCursor<'a, E: ?Sized + ListItem, L: ?Sized + ListStorage<E>> {
    list: &'a L,
    position: Position,
    _item: PhantomData<fn() -> Shared<E>>,
}

impl<'a, E: ?Sized + ListItem, L: ?Sized + ListStorage<E>> DataListCursor<'a, E, L> {
    pub fn new(list: &'a L) -> Self {
        Self {
            list,
            position: Position::BeforeFirst,
            _item: PhantomData,
        }
    }

    /// Advances to the next element. Returns false when there is none.
    pub fn move_next(&mut self) -> bool {
        let next = match self.position {
            Position::BeforeFirst => 0,
            Position::At(index) => index + 1,
            Position::AfterLast => return false,
        };
        if next < self.list.item_count() {
            self.position = Position::At(next);
            true
        } else {
            self.position = Position::AfterLast;
            false
        }
    }

    /// Element at the current position; `None` before the first advance and
    /// after the end.
    #[must_use]
    pub fn current(&self) -> Option<Shared<E>> {
        match self.position {
            Position::At(index) => self.list.get_item(index),
            Position::BeforeFirst | Position::AfterLast => None,
        }
    }

    /// Index of the current element.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self.position {
            Position::At(index) => Some(index),
            Position::BeforeFirst | Position::AfterLast => None,
        }
    }

    /// Moves the cursor back before the first element.
    pub fn reset(&mut self) {
        self.position = Position::BeforeFirst;
    }
}

impl<E: ?Sized + ListItem, L: ?Sized + ListStorage<E>> Iterator for DataListCursor<'_, E, L> {
    type Item = Shared<E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.move_next() {
            self.current()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.list.item_count();
        let remaining = match self.position {
            Position::BeforeFirst => count,
            Position::At(index) => count.saturating_sub(index + 1),
            Position::AfterLast => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<E: ?Sized + ListItem, L: ?Sized + ListStorage<E>> FusedIterator for DataListCursor<'_, E, L> {}
