use crate::emitter::LightEmitter;
use crate::item::ItemLuminance;

/// Brightest item among the entity's held and worn stacks.
///
/// `submerged` is passed through to the item lookup unchanged; the lookup
/// decides which items go dark under water.
pub fn equipment_luminance(
    entity: &dyn LightEmitter,
    items: &dyn ItemLuminance,
    submerged: bool,
) -> u8 {
    entity
        .held_items()
        .iter()
        .chain(entity.worn_items())
        .map(|stack| items.luminance(stack, submerged))
        .max()
        .unwrap_or(0)
}
