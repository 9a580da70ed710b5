//! The packet (entity) abstraction.
//!
//! A packet is a plain struct whose serde-visible fields are its *content*
//! and which embeds an [`Identity`] marked `#[serde(skip)]`. Content is what
//! travels: it is written to JSON and XML, parsed back, and copied between
//! packets. Identity stays with the instance.
//!
//! Concrete types implement [`Packet`] (usually through [`impl_packet!`]);
//! every `Packet` is automatically a [`DataPacket`], the object-safe view
//! used by lists and by code that handles packets of unknown type.
//!
//! [`impl_packet!`]: crate::impl_packet

use crate::config::TextFormatConfig;
use crate::item_type::ItemType;
use crate::text;
use datapack_types::{Error, Identity, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::any::Any;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use tracing::trace;

/// Root element name used for XML when a packet type does not choose one.
pub const DEFAULT_ROOT_NODE_NAME: &str = "HDataPacket";

/// Shared, interiorly mutable handle to a packet.
///
/// Lists hold packets through this handle, so the same instance can be
/// visible from several lists at once.
pub type Shared<E> = Rc<RefCell<E>>;

/// Wraps a packet into a [`Shared`] handle.
pub fn shared<T: Packet>(packet: T) -> Shared<T> {
    Rc::new(RefCell::new(packet))
}

/// Wraps a packet into a type-erased handle for heterogeneous lists.
pub fn shared_dyn<T: Packet>(packet: T) -> Shared<dyn DataPacket> {
    Rc::new(RefCell::new(packet))
}

/// Access to the identity fields embedded in a packet.
pub trait Identified {
    fn identity(&self) -> &Identity;

    fn identity_mut(&mut self) -> &mut Identity;

    /// Resets the identity fields to their defaults.
    ///
    /// Types carrying extra bookkeeping override this and call
    /// `self.identity_mut().reset()` themselves.
    fn reset(&mut self) {
        self.identity_mut().reset();
    }
}

/// A concrete packet type.
///
/// # Invariants
/// - The serde-visible fields are the content properties; identity and any
///   other bookkeeping are `#[serde(skip)]`.
/// - `take_content` moves every content property and leaves identity and
///   bookkeeping untouched.
/// - Packet types should carry `#[serde(default)]` so that partial content
///   (a subset of fields, or an empty XML element) still deserializes.
pub trait Packet: Identified + Serialize + DeserializeOwned + Default + Debug + 'static {
    /// Root element name for XML.
    const ROOT_NODE_NAME: &'static str = DEFAULT_ROOT_NODE_NAME;

    /// Replaces this packet's content with the content of `from`.
    fn take_content(&mut self, from: Self);
}

/// Object-safe packet interface, implemented for every [`Packet`].
pub trait DataPacket: Identified + Any + Debug {
    /// Fully qualified Rust type name of the concrete packet.
    fn type_name(&self) -> &'static str;

    /// Root element name used by [`to_xml`](Self::to_xml) and
    /// [`set_xml`](Self::set_xml).
    fn root_node_name(&self) -> &'static str;

    /// The content properties as a JSON object.
    fn content(&self) -> Result<Map<String, Value>>;

    fn to_json_with(&self, config: &TextFormatConfig) -> Result<String>;

    /// Serializes the content properties to JSON.
    fn to_json(&self) -> Result<String> {
        self.to_json_with(&TextFormatConfig::default())
    }

    /// Replaces the content properties with those parsed from JSON.
    ///
    /// Blank text is a no-op. Identity fields are never touched.
    fn set_json(&mut self, text: &str) -> Result<()>;

    fn to_xml_with(&self, root: &str, config: &TextFormatConfig) -> Result<String>;

    /// Serializes the content properties to XML under the packet's own
    /// root element.
    fn to_xml(&self) -> Result<String> {
        self.to_xml_with(self.root_node_name(), &TextFormatConfig::default())
    }

    /// Serializes the content properties to XML under the `root` element.
    fn to_xml_as(&self, root: &str) -> Result<String> {
        self.to_xml_with(root, &TextFormatConfig::default())
    }

    /// Replaces the content properties with those parsed from XML whose root
    /// element must be named `root`. Blank text is a no-op.
    fn set_xml_as(&mut self, text: &str, root: &str) -> Result<()>;

    fn set_xml(&mut self, text: &str) -> Result<()> {
        let root = self.root_node_name();
        self.set_xml_as(text, root)
    }

    /// Copies every content property of this packet's type from the
    /// property of `other` with the same serialized name.
    ///
    /// Properties `other` does not have are skipped. `other` may be of a
    /// different concrete type. Returns the number of properties copied.
    fn copy_values_from(&mut self, other: &dyn DataPacket) -> Result<usize>;

    /// Item type describing this packet's concrete type.
    fn item_type(&self) -> ItemType;

    /// A default-constructed packet of the same concrete type.
    fn new_shared(&self) -> Shared<dyn DataPacket>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn as_packet(&self) -> &dyn DataPacket;
}

impl<T: Packet> DataPacket for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn root_node_name(&self) -> &'static str {
        T::ROOT_NODE_NAME
    }

    fn content(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::TypeMismatch {
                expected: "packet with named content fields",
                found: std::any::type_name::<T>(),
            }),
        }
    }

    fn to_json_with(&self, config: &TextFormatConfig) -> Result<String> {
        text::write_json(self, config)
    }

    fn set_json(&mut self, text: &str) -> Result<()> {
        if text::is_blank(text) {
            return Ok(());
        }
        let parsed: T = text::read_json(text)?;
        self.take_content(parsed);
        trace!(packet = std::any::type_name::<T>(), "applied json content");
        Ok(())
    }

    fn to_xml_with(&self, root: &str, config: &TextFormatConfig) -> Result<String> {
        text::write_xml(self, root, config)
    }

    fn set_xml_as(&mut self, text: &str, root: &str) -> Result<()> {
        if text::is_blank(text) {
            return Ok(());
        }
        let parsed: T = text::read_xml(text, root)?;
        self.take_content(parsed);
        trace!(packet = std::any::type_name::<T>(), root, "applied xml content");
        Ok(())
    }

    fn copy_values_from(&mut self, other: &dyn DataPacket) -> Result<usize> {
        let source = other.content()?;
        let mut target = self.content()?;

        // keys are the serialized names, so serde renames line up
        let mut copied = 0;
        for (name, slot) in &mut target {
            if let Some(value) = source.get(name) {
                *slot = value.clone();
                copied += 1;
            }
        }
        if copied == 0 {
            return Ok(0);
        }

        let merged: T = serde_json::from_value(Value::Object(target))?;
        self.take_content(merged);
        trace!(
            from = other.type_name(),
            to = std::any::type_name::<T>(),
            copied,
            "copied packet values"
        );
        Ok(copied)
    }

    fn item_type(&self) -> ItemType {
        ItemType::of::<T>()
    }

    fn new_shared(&self) -> Shared<dyn DataPacket> {
        Rc::new(RefCell::new(T::default()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_packet(&self) -> &dyn DataPacket {
        self
    }
}

/// Implements [`Identified`] and [`Packet`] for a struct with an
/// `identity: Identity` field.
///
/// ```
/// use datapack_model::{Identity, impl_packet};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// pub struct Customer {
///     #[serde(skip)]
///     identity: Identity,
///     pub name: String,
///     pub credit: i64,
/// }
///
/// impl_packet!(Customer, root = "Customer", { name, credit });
/// ```
///
/// Without `root = ...` the packet uses [`DEFAULT_ROOT_NODE_NAME`]. Types
/// that need a custom `reset` implement the traits by hand.
#[macro_export]
macro_rules! impl_packet {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::impl_packet!($ty, root = $crate::DEFAULT_ROOT_NODE_NAME, { $($field),* });
    };
    ($ty:ty, root = $root:expr, { $($field:ident),* $(,)? }) => {
        impl $crate::Identified for $ty {
            fn identity(&self) -> &$crate::Identity {
                &self.identity
            }

            fn identity_mut(&mut self) -> &mut $crate::Identity {
                &mut self.identity
            }
        }

        impl $crate::Packet for $ty {
            const ROOT_NODE_NAME: &'static str = $root;

            #[allow(unused_variables)]
            fn take_content(&mut self, from: Self) {
                $(self.$field = from.$field;)*
            }
        }
    };
}
