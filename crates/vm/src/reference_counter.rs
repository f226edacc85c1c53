//! Reference counter module for the Neo Virtual Machine.
//!
//! This module provides reference counting functionality for objects in the Neo VM.

use crate::stack_item::StackItem;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Provides reference counting functionality for objects in the Neo VM.
#[derive(Clone, Debug)]
pub struct ReferenceCounter {
    /// A map of object IDs to their reference counts
    references: Arc<Mutex<HashMap<usize, u32>>>,

    /// The next available object ID
    next_id: Arc<AtomicUsize>,

    /// The total count of references
    reference_count: Arc<AtomicUsize>,

    /// Tracked items (compound types and buffers)
    tracked_items: Arc<Mutex<HashSet<usize>>>,

    /// Items with zero references
    zero_referred: Arc<Mutex<HashSet<usize>>>,
}

impl ReferenceCounter {
    /// Creates a new reference counter.
    pub fn new() -> Self {
        Self {
            references: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicUsize::new(1)), // Start from 1, reserve 0 for null
            reference_count: Arc::new(AtomicUsize::new(0)),
            tracked_items: Arc::new(Mutex::new(HashSet::new())),
            zero_referred: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Registers a new object and returns its ID.
    pub fn register(&self) -> usize {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        // Initialize reference count to 0
        let mut references = self.references.lock().expect("Lock poisoned");
        references.insert(id, 0);

        id
    }

    /// Adds a reference and returns its ID (matches test expectations).
    /// This method creates a new reference and returns the ID.
    pub fn add_reference(&self) -> usize {
        let id = self.register();
        self.add_reference_to(id);
        id
    }

    /// Increments the reference count for an object by ID.
    pub fn add_reference_to(&self, id: usize) {
        // Increment total reference count
        self.reference_count.fetch_add(1, Ordering::SeqCst);

        // Increment object's reference count
        let mut references = self.references.lock().expect("Lock poisoned");
        *references.entry(id).or_insert(0) += 1;

        let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
        zero_referred.remove(&id);
    }

    /// Decrements the reference count for an object.
    /// Returns true if the reference count reached zero.
    pub fn remove_reference(&self, id: usize) -> bool {
        // Decrement total reference count
        self.reference_count.fetch_sub(1, Ordering::SeqCst);

        // Decrement object's reference count
        let mut references = self.references.lock().expect("Lock poisoned");
        let ref_count = references.entry(id).or_insert(0);
        if *ref_count > 0 {
            *ref_count -= 1;
        }

        let zero_refs = *ref_count == 0;

        if zero_refs {
            let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
            zero_referred.insert(id);
        }

        zero_refs
    }

    /// Returns the reference count for an object.
    pub fn get_reference_count(&self, id: usize) -> u32 {
        let references = self.references.lock().expect("Lock poisoned");
        *references.get(&id).unwrap_or(&0)
    }

    /// Returns the total reference count.
    pub fn count(&self) -> usize {
        self.reference_count.load(Ordering::SeqCst)
    }

    /// Adds an item to the tracked items set.
    /// This is used for compound types and buffers that need special tracking.
    pub fn add_tracked_item(&self, id: usize) {
        let mut tracked_items = self.tracked_items.lock().expect("Lock poisoned");
        tracked_items.insert(id);
    }

    /// Adds an item to the zero referred set.
    /// This is used when an item has no references but needs to be tracked
    /// for potential cleanup (e.g., circular references).
    pub fn add_zero_referred(&self, id: usize) {
        let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
        zero_referred.insert(id);
    }

    /// Drops tracking for any item that reached a zero reference count.
    /// Returns the current total reference count.
    pub fn check_zero_referred(&self) -> usize {
        let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
        if zero_referred.is_empty() {
            return self.reference_count.load(Ordering::SeqCst);
        }

        let mut tracked_items = self.tracked_items.lock().expect("Lock poisoned");
        let mut references = self.references.lock().expect("Lock poisoned");

        let mut cleaned = 0usize;
        for item_id in zero_referred.drain() {
            if references.get(&item_id).copied() != Some(0) {
                continue;
            }
            if tracked_items.remove(&item_id) {
                cleaned += 1;
            }
            references.remove(&item_id);
        }

        if cleaned > 0 {
            log::debug!("VM GC: dropped {cleaned} zero-ref items");
        }

        self.reference_count.load(Ordering::SeqCst)
    }

    /// Adds a stack reference for a StackItem.
    pub fn add_stack_reference(&self, item: &StackItem) {
        let item_id = self.get_or_assign_item_id(item);
        self.add_reference_to(item_id);
    }

    /// Removes a stack reference for a StackItem.
    pub fn remove_stack_reference(&self, item: &StackItem) {
        if let Some(item_id) = self.get_item_id(item) {
            self.remove_reference(item_id);
        }
    }

    /// Gets or assigns an ID for a StackItem.
    fn get_or_assign_item_id(&self, item: &StackItem) -> usize {
        // In Neo, each StackItem has a unique object identity based on its type and content

        // Calculate a stable hash based on the item's type and content
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        // Hash the item type and content to create a stable identifier
        match item {
            StackItem::Null => {
                0u8.hash(&mut hasher); // Type identifier for Null
            }
            StackItem::Boolean(b) => {
                1u8.hash(&mut hasher); // Type identifier for Boolean
                b.hash(&mut hasher);
            }
            StackItem::Integer(i) => {
                2u8.hash(&mut hasher); // Type identifier for Integer
                i.hash(&mut hasher);
            }
            StackItem::ByteString(bytes) => {
                3u8.hash(&mut hasher); // Type identifier for ByteString
                bytes.hash(&mut hasher);
            }
            StackItem::Buffer(buffer) => {
                4u8.hash(&mut hasher); // Type identifier for Buffer
                (buffer.as_ptr() as usize).hash(&mut hasher);
            }
            StackItem::Array(arr) => {
                5u8.hash(&mut hasher); // Type identifier for Array
                (arr.as_ptr() as usize).hash(&mut hasher);
            }
            StackItem::Struct(s) => {
                6u8.hash(&mut hasher); // Type identifier for Struct
                (s.as_ptr() as usize).hash(&mut hasher);
            }
            StackItem::Map(map) => {
                7u8.hash(&mut hasher); // Type identifier for Map
                (map as *const _ as usize).hash(&mut hasher);
            }
            StackItem::InteropInterface(iface) => {
                8u8.hash(&mut hasher); // Type identifier for InteropInterface
                (Arc::as_ptr(iface) as *const () as usize).hash(&mut hasher);
            }
            StackItem::Pointer(ptr) => {
                9u8.hash(&mut hasher); // Type identifier for Pointer
                ptr.hash(&mut hasher);
            }
        }

        hasher.finish() as usize
    }

    /// Gets the ID for a StackItem if it exists.
    fn get_item_id(&self, item: &StackItem) -> Option<usize> {
        Some(self.get_or_assign_item_id(item))
    }

    /// Clears all references.
    pub fn clear(&self) {
        let mut references = self.references.lock().expect("Lock poisoned");
        references.clear();

        let mut tracked_items = self.tracked_items.lock().expect("Lock poisoned");
        tracked_items.clear();

        let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
        zero_referred.clear();

        self.reference_count.store(0, Ordering::SeqCst);
    }

}

impl Default for ReferenceCounter {
    fn default() -> Self {
        Self::new()
    }
}
