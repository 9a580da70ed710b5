mod common;

use common::{Contact, Customer};
use datapack_model::{DataPacket, Error, ItemType, ItemTypeSlot, ListItem};

// ── ItemType ─────────────────────────────────────────────────────

#[test]
fn item_type_equality_is_by_type() {
    assert_eq!(ItemType::of::<Customer>(), ItemType::of::<Customer>());
    assert_ne!(ItemType::of::<Customer>(), ItemType::of::<Contact>());
}

#[test]
fn item_type_factory_builds_default_instance() {
    let item_type = ItemType::of::<Contact>();
    let created = item_type.create();
    let created = created.borrow();
    assert!(item_type.matches(created.as_packet()));
    assert_eq!(created.as_any().downcast_ref::<Contact>(), Some(&Contact::default()));
}

#[test]
fn item_type_matches_only_its_type() {
    let item_type = ItemType::of::<Customer>();
    assert!(item_type.matches(&Customer::sample()));
    assert!(!item_type.matches(&Contact::default()));
}

#[test]
fn item_type_debug_shows_name() {
    let debug = format!("{:?}", ItemType::of::<Customer>());
    assert!(debug.starts_with("ItemType("));
    assert!(debug.contains("Customer"));
}

// ── ItemTypeSlot ─────────────────────────────────────────────────

#[test]
fn slot_starts_unset() {
    let slot = ItemTypeSlot::new();
    assert_eq!(slot.get(), None);
    assert_eq!(slot.declared_type(), None);
}

#[test]
fn inference_happens_once() {
    let slot = ItemTypeSlot::new();
    assert!(slot.infer(ItemType::of::<Customer>()));
    assert!(!slot.infer(ItemType::of::<Contact>()));
    assert_eq!(slot.get(), Some(ItemType::of::<Customer>()));
    assert_eq!(slot.declared_type(), None);
}

#[test]
fn declaration_overrides_inference() {
    let slot = ItemTypeSlot::new();
    slot.infer(ItemType::of::<Customer>());
    slot.declare(ItemType::of::<Contact>());
    assert_eq!(slot.get(), Some(ItemType::of::<Contact>()));
    assert_eq!(slot.declared_type(), Some(ItemType::of::<Contact>()));
}

#[test]
fn inference_does_not_override_declaration() {
    let slot = ItemTypeSlot::declared(ItemType::of::<Contact>());
    assert!(!slot.infer(ItemType::of::<Customer>()));
    assert_eq!(slot.get(), Some(ItemType::of::<Contact>()));
}

// ── ListItem ─────────────────────────────────────────────────────

#[test]
fn dyn_item_accepts_any_type() {
    let item_type = ItemType::of::<Customer>();
    assert!(<dyn DataPacket as ListItem>::check_item_type(&item_type).is_ok());

    let created = <dyn DataPacket as ListItem>::instantiate(&item_type).unwrap();
    assert!(item_type.matches(&*created.borrow()));
}

#[test]
fn typed_item_rejects_other_types() {
    let err = <Customer as ListItem>::instantiate(&ItemType::of::<Contact>()).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn instantiate_like_follows_prototype_for_dyn_items() {
    let prototype = Contact::default();
    let created = <dyn DataPacket as ListItem>::instantiate_like(&prototype);
    assert!(created.borrow().as_any().is::<Contact>());

    let typed = <Customer as ListItem>::instantiate_like(&prototype);
    assert_eq!(*typed.borrow(), Customer::default());
}
