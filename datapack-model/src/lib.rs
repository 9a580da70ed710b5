//! Packet and list contracts for datapack.
//!
//! Defines the building blocks for transferable business objects:
//! - [`Packet`] / [`DataPacket`]: a content-bearing struct with embedded
//!   [`Identity`], JSON and XML text forms, and cross-type value copy
//! - [`ItemType`]: a registered factory for one concrete packet type
//! - [`ListStorage`]: the primitive operations a list's backing store supplies
//! - [`DataList`]: typed add/insert/remove, reference and copy aggregation,
//!   item-type inference, and the forward [`DataListCursor`]
//! - [`TextFormatConfig`]: output options for the text formats
//!
//! Identity fields are process-local: they are excluded from both text
//! formats and from every copy operation. Concrete list implementations
//! live in `datapack-lists`.

mod config;
mod cursor;
mod item_type;
mod list;
mod packet;
mod text;

pub use config::TextFormatConfig;
pub use cursor::DataListCursor;
pub use datapack_types::{Error, Identity, Result, UniqueId};
pub use item_type::{ItemType, ItemTypeSlot, ListItem};
pub use list::{DataList, ListStorage, SyncRoot};
pub use packet::{
    DEFAULT_ROOT_NODE_NAME, DataPacket, Identified, Packet, Shared, shared, shared_dyn,
};
