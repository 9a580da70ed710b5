use datapack_model::{
    DataPacket, Identified, ItemType, ItemTypeSlot, ListItem, ListStorage, Shared, SyncRoot,
};
use datapack_types::{Error, Identity, Result};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Array-backed list of shared packet handles.
///
/// `E` is either a concrete packet type or, by default, `dyn DataPacket`
/// for lists mixing several packet types.
///
/// The list carries its own [`Identity`], independent of its elements'.
/// Clearing the list resets it.
#[derive(Debug)]
pub struct VecDataList<E: ?Sized + ListItem = dyn DataPacket> {
    identity: Identity,
    items: Vec<Shared<E>>,
    item_type: ItemTypeSlot,
    sync_root: SyncRoot,
}

impl<E: ?Sized + ListItem> VecDataList<E> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            identity: Identity::new(),
            items: Vec::with_capacity(capacity),
            item_type: ItemTypeSlot::new(),
            sync_root: Arc::new(Mutex::new(())),
        }
    }

    /// Creates an empty list with `item_type` declared.
    pub fn with_item_type(item_type: ItemType) -> Result<Self> {
        E::check_item_type(&item_type)?;
        let list = Self::new();
        list.item_type.declare(item_type);
        Ok(list)
    }

    /// Creates a list holding `items` by reference. The first item, if any,
    /// fixes the inferred item type.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Shared<E>>,
    {
        let list = Self {
            identity: Identity::new(),
            items: items.into_iter().collect(),
            item_type: ItemTypeSlot::new(),
            sync_root: Arc::new(Mutex::new(())),
        };
        if let Some(first) = list.items.first() {
            let item_type = first.borrow().item_type();
            list.item_type.infer(item_type);
        }
        debug!(len = list.items.len(), "created list from items");
        list
    }

    /// The element handles, in order.
    #[must_use]
    pub fn items(&self) -> &[Shared<E>] {
        &self.items
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Fails unless `index < bound`.
    fn check_index(&self, index: usize, bound: usize) -> Result<()> {
        if index < bound {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl<E: ?Sized + ListItem> Default for VecDataList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized + ListItem> Identified for VecDataList<E> {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }
}

impl<E: ?Sized + ListItem> FromIterator<Shared<E>> for VecDataList<E> {
    fn from_iter<I: IntoIterator<Item = Shared<E>>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<E: ?Sized + ListItem> ListStorage<E> for VecDataList<E> {
    fn insert_item(&mut self, index: usize, item: Shared<E>) -> Result<()> {
        // inserting at `len` appends
        self.check_index(index, self.items.len() + 1)?;
        self.items.insert(index, item);
        Ok(())
    }

    fn remove_item(&mut self, item: &Shared<E>) -> bool {
        match self.index_of_item(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    fn delete_item(&mut self, index: usize) -> Result<Shared<E>> {
        self.check_index(index, self.items.len())?;
        Ok(self.items.remove(index))
    }

    fn index_of_item(&self, item: &Shared<E>) -> Option<usize> {
        self.items.iter().position(|current| Rc::ptr_eq(current, item))
    }

    fn get_item(&self, index: usize) -> Option<Shared<E>> {
        self.items.get(index).cloned()
    }

    fn set_item(&mut self, index: usize, item: Shared<E>) -> Result<Shared<E>> {
        self.check_index(index, self.items.len())?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    fn clear_items(&mut self) {
        self.items.clear();
        self.identity.reset();
    }

    fn add_item(&mut self, item: Shared<E>) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn copy_items_to(&self, dest: &mut [Option<Shared<E>>], offset: usize) -> Result<()> {
        let required = offset.saturating_add(self.items.len());
        if required > dest.len() {
            return Err(Error::InsufficientCapacity {
                required,
                available: dest.len(),
            });
        }
        for (slot, item) in dest[offset..].iter_mut().zip(&self.items) {
            *slot = Some(Rc::clone(item));
        }
        Ok(())
    }

    fn sync_root(&self) -> SyncRoot {
        Arc::clone(&self.sync_root)
    }

    fn is_synchronized(&self) -> bool {
        false
    }

    fn item_type_slot(&self) -> &ItemTypeSlot {
        &self.item_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
    struct Note {
        #[serde(skip)]
        identity: datapack_model::Identity,
        text: String,
    }

    datapack_model::impl_packet!(Note { text });

    #[test]
    fn add_item_returns_position_of_new_element() {
        let mut list = VecDataList::<Note>::new();
        assert_eq!(list.add_item(datapack_model::shared(Note::default())), 0);
        assert_eq!(list.add_item(datapack_model::shared(Note::default())), 1);
    }

    #[test]
    fn insert_at_len_appends() {
        let mut list = VecDataList::<Note>::new();
        list.insert_item(0, datapack_model::shared(Note::default())).unwrap();
        assert_eq!(list.item_count(), 1);
    }

    #[test]
    fn clear_items_resets_list_identity() {
        let mut list = VecDataList::<Note>::new();
        list.identity_mut().set_id(12);
        list.add_item(datapack_model::shared(Note::default()));

        list.clear_items();

        assert_eq!(*list.identity(), Identity::default());
    }

    #[test]
    fn out_of_range_index_reports_current_len() {
        let mut list = VecDataList::<Note>::new();
        let err = list.delete_item(3).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 0 }));
    }

    #[test]
    fn sync_root_is_stable_per_list() {
        let list = VecDataList::<Note>::new();
        assert!(Arc::ptr_eq(&list.sync_root(), &list.sync_root()));
        assert!(!Arc::ptr_eq(&list.sync_root(), &VecDataList::<Note>::new().sync_root()));
        assert!(!list.is_synchronized());
    }
}
