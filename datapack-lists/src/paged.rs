use crate::VecDataList;
use datapack_model::{
    DataPacket, Identified, ItemType, ItemTypeSlot, ListItem, ListStorage, Shared, SyncRoot,
};
use datapack_types::{Identity, Result};

/// One page of a larger result set.
///
/// Behaves exactly like [`VecDataList`], plus `total_count`: the size of
/// the full result this page was cut from. Clearing the list also resets
/// `total_count` to zero, along with the list's identity.
#[derive(Debug)]
pub struct PagedDataList<E: ?Sized + ListItem = dyn DataPacket> {
    list: VecDataList<E>,
    total_count: usize,
}

impl<E: ?Sized + ListItem> PagedDataList<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: VecDataList::new(),
            total_count: 0,
        }
    }

    pub fn with_item_type(item_type: ItemType) -> Result<Self> {
        Ok(Self {
            list: VecDataList::with_item_type(item_type)?,
            total_count: 0,
        })
    }

    /// Wraps the handles of one page together with the size of the full
    /// result.
    pub fn from_page<I>(items: I, total_count: usize) -> Self
    where
        I: IntoIterator<Item = Shared<E>>,
    {
        Self {
            list: VecDataList::from_items(items),
            total_count,
        }
    }

    /// Size of the full result set, not of this page.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn set_total_count(&mut self, total_count: usize) {
        self.total_count = total_count;
    }

    #[must_use]
    pub fn items(&self) -> &[Shared<E>] {
        self.list.items()
    }

    /// Drops the page metadata and returns the underlying list.
    pub fn into_inner(self) -> VecDataList<E> {
        self.list
    }
}

impl<E: ?Sized + ListItem> Default for PagedDataList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized + ListItem> Identified for PagedDataList<E> {
    fn identity(&self) -> &Identity {
        self.list.identity()
    }

    fn identity_mut(&mut self) -> &mut Identity {
        self.list.identity_mut()
    }
}

impl<E: ?Sized + ListItem> ListStorage<E> for PagedDataList<E> {
    fn insert_item(&mut self, index: usize, item: Shared<E>) -> Result<()> {
        self.list.insert_item(index, item)
    }

    fn remove_item(&mut self, item: &Shared<E>) -> bool {
        self.list.remove_item(item)
    }

    fn delete_item(&mut self, index: usize) -> Result<Shared<E>> {
        self.list.delete_item(index)
    }

    fn index_of_item(&self, item: &Shared<E>) -> Option<usize> {
        self.list.index_of_item(item)
    }

    fn get_item(&self, index: usize) -> Option<Shared<E>> {
        self.list.get_item(index)
    }

    fn set_item(&mut self, index: usize, item: Shared<E>) -> Result<Shared<E>> {
        self.list.set_item(index, item)
    }

    fn clear_items(&mut self) {
        self.list.clear_items();
        self.total_count = 0;
    }

    fn add_item(&mut self, item: Shared<E>) -> usize {
        self.list.add_item(item)
    }

    fn item_count(&self) -> usize {
        self.list.item_count()
    }

    fn copy_items_to(&self, dest: &mut [Option<Shared<E>>], offset: usize) -> Result<()> {
        self.list.copy_items_to(dest, offset)
    }

    fn sync_root(&self) -> SyncRoot {
        self.list.sync_root()
    }

    fn is_synchronized(&self) -> bool {
        self.list.is_synchronized()
    }

    fn item_type_slot(&self) -> &ItemTypeSlot {
        self.list.item_type_slot()
    }
}
