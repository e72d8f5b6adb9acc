use spacetimedb::*;

/// One stack of items held by an agent.
///
/// Private. Agents read their own stacks through the `my_inventory` view.
#[table(name = inventory_item)]
pub struct InventoryItem {
    #[primary_key]
    #[auto_inc]
    pub id: u64,

    #[index(btree)]
    pub owner: Identity,

    pub item: String,

    pub amount: u32,
}
