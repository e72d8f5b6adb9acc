//! Agent inventories stored in `inventory_item`.

use crate::schema::{InventoryItem, agent, inventory_item};
use shared::{BuildCost, Builder};
use spacetimedb::{Identity, ReducerContext, Table};

pub fn count(ctx: &ReducerContext, owner: Identity, item: &str) -> u32 {
    ctx.db
        .inventory_item()
        .owner()
        .filter(owner)
        .filter(|stack| stack.item == item)
        .map(|stack| stack.amount)
        .sum()
}

pub fn add(ctx: &ReducerContext, owner: Identity, item: &str, amount: u32) {
    if amount == 0 {
        return;
    }
    let existing = ctx
        .db
        .inventory_item()
        .owner()
        .filter(owner)
        .find(|stack| stack.item == item);
    match existing {
        Some(stack) => {
            ctx.db.inventory_item().id().update(InventoryItem {
                amount: stack.amount.saturating_add(amount),
                ..stack
            });
        }
        None => {
            ctx.db.inventory_item().insert(InventoryItem {
                id: 0,
                owner,
                item: item.to_owned(),
                amount,
            });
        }
    }
}

/// Removes `amount` of `item`. Takes nothing and returns `false` if the owner holds less.
pub fn take(ctx: &ReducerContext, owner: Identity, item: &str, amount: u32) -> bool {
    if count(ctx, owner, item) < amount {
        return false;
    }
    let stacks: Vec<InventoryItem> = ctx
        .db
        .inventory_item()
        .owner()
        .filter(owner)
        .filter(|stack| stack.item == item)
        .collect();
    let mut remaining = amount;
    for stack in stacks {
        if remaining == 0 {
            break;
        }
        let taken = stack.amount.min(remaining);
        remaining -= taken;
        if taken == stack.amount {
            ctx.db.inventory_item().id().delete(stack.id);
        } else {
            ctx.db.inventory_item().id().update(InventoryItem {
                amount: stack.amount - taken,
                ..stack
            });
        }
    }
    true
}

/// An agent paying for rebuilds out of their inventory.
pub struct InventoryBuilder<'a> {
    ctx: &'a ReducerContext,
    identity: Identity,
    no_cost: bool,
}

impl<'a> InventoryBuilder<'a> {
    /// `None` if the identity has no agent in the world.
    pub fn for_agent(ctx: &'a ReducerContext, identity: Identity) -> Option<Self> {
        let agent = ctx.db.agent().identity().find(identity)?;
        Some(Self {
            ctx,
            identity,
            no_cost: agent.no_cost,
        })
    }
}

impl Builder for InventoryBuilder<'_> {
    fn no_cost(&self) -> bool {
        self.no_cost
    }

    fn have_requirements(&self, cost: &BuildCost) -> bool {
        cost.totals()
            .into_iter()
            .all(|(item, amount)| count(self.ctx, self.identity, item) >= amount)
    }

    fn consume(&mut self, cost: &BuildCost) {
        for (item, amount) in cost.totals() {
            if !take(self.ctx, self.identity, item, amount) {
                log::warn!("{} lost {item} between check and consume", self.identity);
            }
        }
    }
}
