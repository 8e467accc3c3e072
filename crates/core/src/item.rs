use std::collections::HashMap;

use dynlights_common::{ItemId, ItemStack, clamp_luminance};

use crate::config::ItemLightEntry;

/// Maps an item stack to the light it emits.
///
/// `submerged` tells the lookup whether the holder's eye is in fluid, so
/// water-sensitive items can report zero.
pub trait ItemLuminance {
    fn luminance(&self, stack: &ItemStack, submerged: bool) -> u8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemLight {
    luminance: u8,
    water_sensitive: bool,
}

/// Table-backed item lookup. Unknown items emit nothing.
#[derive(Debug, Clone, Default)]
pub struct ItemLuminanceTable {
    items: HashMap<ItemId, ItemLight>,
}

impl ItemLuminanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Common light-emitting items.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register(ItemId::new("torch"), 14, true);
        table.register(ItemId::new("lantern"), 15, false);
        table.register(ItemId::new("glowstone"), 15, false);
        table.register(ItemId::new("lava_bucket"), 15, false);
        table.register(ItemId::new("soul_torch"), 10, true);
        table.register(ItemId::new("glow_berries"), 8, false);
        table.register(ItemId::new("redstone_torch"), 7, true);
        table
    }

    pub fn register(&mut self, item: ItemId, luminance: u8, water_sensitive: bool) {
        self.items.insert(
            item,
            ItemLight {
                luminance: clamp_luminance(luminance as i32),
                water_sensitive,
            },
        );
    }

    /// Register config entries on top of what is already known. Later
    /// entries win.
    pub fn extend_from_entries(&mut self, entries: &[ItemLightEntry]) {
        for entry in entries {
            self.register(entry.item.clone(), entry.luminance, entry.water_sensitive);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemLuminance for ItemLuminanceTable {
    fn luminance(&self, stack: &ItemStack, submerged: bool) -> u8 {
        if stack.is_empty() {
            return 0;
        }
        match self.items.get(&stack.item) {
            Some(light) if light.water_sensitive && submerged => 0,
            Some(light) => light.luminance,
            None => 0,
        }
    }
}
