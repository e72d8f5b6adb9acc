use crate::schema::{InventoryItem, inventory_item__view};

/// The caller's own inventory stacks.
#[spacetimedb::view(name = my_inventory, public)]
fn my_inventory(ctx: &spacetimedb::ViewContext) -> Vec<InventoryItem> {
    ctx.db.inventory_item().owner().filter(ctx.sender).collect()
}
