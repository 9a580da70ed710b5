//! Item types: the concrete packet type a list re-instantiates when it
//! copies foreign items.

use crate::packet::{DataPacket, Packet, Shared, shared};
use datapack_types::{Error, Result};
use std::any::TypeId;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle to a concrete packet type plus a factory for it.
#[derive(Clone, Copy)]
pub struct ItemType {
    name: &'static str,
    type_id: TypeId,
    factory: fn() -> Shared<dyn DataPacket>,
}

fn create_default<T: Packet>() -> Shared<dyn DataPacket> {
    Rc::new(RefCell::new(T::default()))
}

impl ItemType {
    /// Item type of the packet type `T`.
    #[must_use]
    pub fn of<T: Packet>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            factory: create_default::<T>,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Builds a default-constructed packet of this type.
    #[must_use]
    pub fn create(&self) -> Shared<dyn DataPacket> {
        (self.factory)()
    }

    /// Returns true if `packet`'s concrete type is this item type.
    #[must_use]
    pub fn matches(&self, packet: &dyn DataPacket) -> bool {
        packet.as_any().type_id() == self.type_id
    }
}

impl PartialEq for ItemType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ItemType {}

impl fmt::Debug for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemType").field(&self.name).finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Tag {
    #[default]
    Unset,
    Inferred(ItemType),
    Declared(ItemType),
}

/// Storage-held item-type tag of a list.
///
/// Starts unset. The first element ever present fixes an *inferred* type,
/// which is never replaced by later inference. An explicitly *declared*
/// type always takes precedence over an inferred one.
#[derive(Debug, Clone, Default)]
pub struct ItemTypeSlot(Cell<Tag>);

impl ItemTypeSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot with `item_type` declared from the start.
    #[must_use]
    pub fn declared(item_type: ItemType) -> Self {
        Self(Cell::new(Tag::Declared(item_type)))
    }

    /// The declared type, or else the inferred one.
    #[must_use]
    pub fn get(&self) -> Option<ItemType> {
        match self.0.get() {
            Tag::Unset => None,
            Tag::Inferred(item_type) | Tag::Declared(item_type) => Some(item_type),
        }
    }

    /// The explicitly declared type, if any.
    #[must_use]
    pub fn declared_type(&self) -> Option<ItemType> {
        match self.0.get() {
            Tag::Declared(item_type) => Some(item_type),
            _ => None,
        }
    }

    pub fn declare(&self, item_type: ItemType) {
        self.0.set(Tag::Declared(item_type));
    }

    /// Records `item_type` as inferred if the slot is still unset.
    /// Returns true if the slot changed.
    pub fn infer(&self, item_type: ItemType) -> bool {
        if self.0.get() == Tag::Unset {
            self.0.set(Tag::Inferred(item_type));
            true
        } else {
            false
        }
    }
}

/// Element types a list can hold: any concrete [`Packet`], or
/// `dyn DataPacket` for heterogeneous lists.
pub trait ListItem: DataPacket {
    /// Fails unless lists of `Self` can hold packets of `item_type`.
    fn check_item_type(item_type: &ItemType) -> Result<()>;

    /// Builds a default packet of `item_type`.
    fn instantiate(item_type: &ItemType) -> Result<Shared<Self>>;

    /// Builds a default packet to receive a copy of `prototype`'s content.
    fn instantiate_like(prototype: &dyn DataPacket) -> Shared<Self>;
}

impl ListItem for dyn DataPacket {
    fn check_item_type(_item_type: &ItemType) -> Result<()> {
        Ok(())
    }

    fn instantiate(item_type: &ItemType) -> Result<Shared<Self>> {
        Ok(item_type.create())
    }

    fn instantiate_like(prototype: &dyn DataPacket) -> Shared<Self> {
        prototype.new_shared()
    }
}

impl<T: Packet> ListItem for T {
    fn check_item_type(item_type: &ItemType) -> Result<()> {
        if item_type.type_id() == TypeId::of::<T>() {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found: item_type.name(),
            })
        }
    }

    fn instantiate(item_type: &ItemType) -> Result<Shared<Self>> {
        Self::check_item_type(item_type)?;
        Ok(shared(T::default()))
    }

    fn instantiate_like(_prototype: &dyn DataPacket) -> Shared<Self> {
        shared(T::default())
    }
}
