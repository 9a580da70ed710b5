//! The ordered-collection contract.
//!
//! A backing store implements the primitive operations of [`ListStorage`].
//! Everything a caller uses day to day lives on [`DataList`], which is
//! implemented once for every storage and cannot be overridden: element
//! type checks, item-type inference, reference and copy aggregation, and
//! the forward cursor.
//!
//! Lists hold [`Shared`] handles. Adding by reference aliases the handle;
//! adding by copy builds a new packet whose content (never its identity)
//! matches the source.

use crate::cursor::DataListCursor;
use crate::item_type::{ItemType, ItemTypeSlot, ListItem};
use crate::packet::{DataPacket, Shared};
use datapack_types::{Error, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Conventional lock token handed out by [`ListStorage::sync_root`].
///
/// Lists never acquire it themselves. Callers that share a list across a
/// sequence of operations hold the guard for the duration.
pub type SyncRoot = Arc<Mutex<()>>;

/// Primitive operations a backing store supplies.
///
/// Element identity is reference identity: `remove_item` and
/// `index_of_item` compare handles with [`Rc::ptr_eq`](std::rc::Rc::ptr_eq),
/// not packet content.
pub trait ListStorage<E: ?Sized + ListItem> {
    /// Inserts `item` so that it ends up at `index` (`index <= len`).
    fn insert_item(&mut self, index: usize, item: Shared<E>) -> Result<()>;

    /// Removes the first occurrence of `item`. Returns false if absent.
    fn remove_item(&mut self, item: &Shared<E>) -> bool;

    /// Removes and returns the element at `index`.
    fn delete_item(&mut self, index: usize) -> Result<Shared<E>>;

    fn index_of_item(&self, item: &Shared<E>) -> Option<usize>;

    fn get_item(&self, index: usize) -> Option<Shared<E>>;

    /// Replaces the element at `index`, returning the previous one.
    fn set_item(&mut self, index: usize, item: Shared<E>) -> Result<Shared<E>>;

    /// Empties the storage and resets any metadata derived from it.
    fn clear_items(&mut self);

    /// Appends `item` and returns its position.
    fn add_item(&mut self, item: Shared<E>) -> usize;

    fn item_count(&self) -> usize;

    /// Clones every handle into `dest`, starting at `dest[offset]`.
    ///
    /// Fails without writing anything if `dest` cannot hold all elements.
    fn copy_items_to(&self, dest: &mut [Option<Shared<E>>], offset: usize) -> Result<()>;

    fn sync_root(&self) -> SyncRoot;

    fn is_synchronized(&self) -> bool;

    fn item_type_slot(&self) -> &ItemTypeSlot;
}

/// Fails if a type was declared and `item` is not of that type.
fn ensure_accepted<E: ?Sized + ListItem>(slot: &ItemTypeSlot, item: &Shared<E>) -> Result<()> {
    if let Some(declared) = slot.declared_type() {
        let packet = item.borrow();
        if !declared.matches(packet.as_packet()) {
            return Err(Error::TypeMismatch {
                expected: declared.name(),
                found: packet.type_name(),
            });
        }
    }
    Ok(())
}

fn note_first_item(slot: &ItemTypeSlot, item_type: ItemType) {
    if slot.infer(item_type) {
        debug!(item_type = item_type.name(), "inferred list item type");
    }
}

/// Operations every list offers on top of its [`ListStorage`].
pub trait DataList<E: ?Sized + ListItem>: ListStorage<E> {
    /// Appends `item` by reference and returns its position.
    fn add(&mut self, item: Shared<E>) -> Result<usize> {
        ensure_accepted(self.item_type_slot(), &item)?;
        let item_type = item.borrow().item_type();
        let position = self.add_item(item);
        note_first_item(self.item_type_slot(), item_type);
        trace!(position, "added item");
        Ok(position)
    }

    fn insert(&mut self, index: usize, item: Shared<E>) -> Result<()> {
        ensure_accepted(self.item_type_slot(), &item)?;
        let item_type = item.borrow().item_type();
        self.insert_item(index, item)?;
        note_first_item(self.item_type_slot(), item_type);
        trace!(index, "inserted item");
        Ok(())
    }

    /// Removes the first occurrence of `item`. Returns false if absent.
    fn remove(&mut self, item: &Shared<E>) -> bool {
        self.remove_item(item)
    }

    fn remove_at(&mut self, index: usize) -> Result<Shared<E>> {
        self.delete_item(index)
    }

    fn index_of(&self, item: &Shared<E>) -> Option<usize> {
        self.index_of_item(item)
    }

    fn contains(&self, item: &Shared<E>) -> bool {
        self.index_of_item(item).is_some()
    }

    fn get(&self, index: usize) -> Option<Shared<E>> {
        self.get_item(index)
    }

    /// Replaces the element at `index`, returning the previous one.
    fn set(&mut self, index: usize, item: Shared<E>) -> Result<Shared<E>> {
        ensure_accepted(self.item_type_slot(), &item)?;
        self.set_item(index, item)
    }

    fn len(&self) -> usize {
        self.item_count()
    }

    fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Removes every element. The item type survives.
    fn clear(&mut self) {
        let removed = self.item_count();
        self.clear_items();
        debug!(removed, "cleared list");
    }

    fn copy_to(&self, dest: &mut [Option<Shared<E>>], offset: usize) -> Result<()> {
        self.copy_items_to(dest, offset)
    }

    /// The declared item type, else the inferred one, else the type of the
    /// current first element (which then becomes the inferred type).
    fn item_type(&self) -> Option<ItemType> {
        let slot = self.item_type_slot();
        if let Some(item_type) = slot.get() {
            return Some(item_type);
        }
        let first = self.get_item(0)?;
        let item_type = first.borrow().item_type();
        note_first_item(slot, item_type);
        Some(item_type)
    }

    /// Declares the item type explicitly. Takes precedence over inference.
    ///
    /// Elements already present are not checked.
    fn declare_item_type(&mut self, item_type: ItemType) -> Result<()> {
        E::check_item_type(&item_type)?;
        self.item_type_slot().declare(item_type);
        debug!(item_type = item_type.name(), "declared list item type");
        Ok(())
    }

    /// Builds a default packet of the list's item type, or `None` when the
    /// list has neither a declared type nor an element to infer one from.
    fn create_new_item(&self) -> Result<Option<Shared<E>>> {
        match self.item_type() {
            Some(item_type) => E::instantiate(&item_type).map(Some),
            None => Ok(None),
        }
    }

    /// Appends every handle of `source`, in iteration order, without
    /// copying. Returns the number of items appended.
    ///
    /// Stops at the first rejected item; items before it stay appended.
    fn append_all_by_reference<I>(&mut self, source: I) -> Result<usize>
    where
        I: IntoIterator<Item = Shared<E>>,
        Self: Sized,
    {
        let mut appended = 0;
        for item in source {
            self.add(item)?;
            appended += 1;
        }
        debug!(appended, "appended items by reference");
        Ok(appended)
    }

    /// Appends an independent copy of every packet in `source`.
    ///
    /// Each copy is built from the list's item type when one is known, or
    /// else from the source packet's own type, and receives the source's
    /// JSON content. Identity fields of the copies stay at their defaults.
    /// Returns the number of items appended.
    fn append_all_by_copy<S, I>(&mut self, source: I) -> Result<usize>
    where
        S: ?Sized + DataPacket,
        I: IntoIterator<Item = Shared<S>>,
        Self: Sized,
    {
        let mut appended = 0;
        for source_item in source {
            let copy = {
                let original = source_item.borrow();
                let copy = match self.create_new_item()? {
                    Some(item) => item,
                    None => E::instantiate_like(original.as_packet()),
                };
                let content = original.to_json()?;
                copy.borrow_mut().set_json(&content)?;
                copy
            };
            self.add(copy)?;
            appended += 1;
        }
        debug!(appended, "appended items by copy");
        Ok(appended)
    }

    /// Forward cursor positioned before the first element.
    fn cursor(&self) -> DataListCursor<'_, E, Self> {
        DataListCursor::new(self)
    }
}

impl<E: ?Sized + ListItem, L: ?Sized + ListStorage<E>> DataList<E> for L {}
