use shared::ResourceAmount;

/// One line of an archetype's build cost.
#[derive(spacetimedb::SpacetimeType, Debug, Clone, PartialEq)]
pub struct DbResourceAmount {
    pub item: String,
    pub amount: u32,
}

impl DbResourceAmount {
    pub fn new(item: &str, amount: u32) -> Self {
        Self {
            item: item.to_owned(),
            amount,
        }
    }
}

impl From<&DbResourceAmount> for ResourceAmount {
    fn from(value: &DbResourceAmount) -> Self {
        ResourceAmount::new(value.item.clone(), value.amount)
    }
}
