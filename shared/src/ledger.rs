//! Resource accounting around ghosting and rebuilding.

use crate::{error::GhostError, policy::GhostPolicy};
use std::collections::BTreeMap;

/// One line of a build requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAmount {
    pub item: String,
    pub amount: u32,
}

impl ResourceAmount {
    pub fn new(item: impl Into<String>, amount: u32) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }
}

/// Everything needed to build (and rebuild) a structure.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildCost(pub Vec<ResourceAmount>);

impl BuildCost {
    /// Total required per item, merging duplicate lines.
    pub fn totals(&self) -> BTreeMap<&str, u32> {
        let mut totals = BTreeMap::new();
        for line in &self.0 {
            let total = totals.entry(line.item.as_str()).or_insert(0u32);
            *total = total.saturating_add(line.amount);
        }
        totals
    }
}

/// The acting agent paying for a rebuild.
pub trait Builder {
    /// Bypass privilege: builds without paying.
    fn no_cost(&self) -> bool;

    fn have_requirements(&self, cost: &BuildCost) -> bool;

    /// Removes the cost. Only called after [`Builder::have_requirements`] passed.
    fn consume(&mut self, cost: &BuildCost);
}

/// Whether destroying a structure should drop its resources.
pub fn should_drop(policy: &GhostPolicy, block_drop: bool) -> bool {
    !block_drop && policy.require_resources.is_on()
}

/// Validates and consumes the rebuild cost.
///
/// With `require_resources` off this always succeeds and consumes nothing. With it on, a missing
/// builder fails, a builder with the bypass privilege pays nothing, and any other builder must
/// hold the full cost. Nothing is consumed on failure.
pub fn try_consume_for_rebuild<B: Builder + ?Sized>(
    policy: &GhostPolicy,
    cost: &BuildCost,
    builder: Option<&mut B>,
) -> Result<(), GhostError> {
    if !policy.require_resources.is_on() {
        return Ok(());
    }
    let Some(builder) = builder else {
        return Err(GhostError::InsufficientResources);
    };
    if builder.no_cost() {
        return Ok(());
    }
    if !builder.have_requirements(cost) {
        return Err(GhostError::InsufficientResources);
    }
    builder.consume(cost);
    Ok(())
}

/// Item counts held by an agent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
    pub no_cost: bool,
}

impl Inventory {
    pub fn with(mut self, item: impl Into<String>, amount: u32) -> Self {
        self.add(item, amount);
        self
    }

    pub fn add(&mut self, item: impl Into<String>, amount: u32) {
        let slot = self.items.entry(item.into()).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }
}

impl Builder for Inventory {
    fn no_cost(&self) -> bool {
        self.no_cost
    }

    fn have_requirements(&self, cost: &BuildCost) -> bool {
        cost.totals()
            .into_iter()
            .all(|(item, amount)| self.count(item) >= amount)
    }

    fn consume(&mut self, cost: &BuildCost) {
        for (item, amount) in cost.totals() {
            if let Some(slot) = self.items.get_mut(item) {
                *slot = slot.saturating_sub(amount);
            }
        }
        self.items.retain(|_, amount| *amount > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Toggle;

    fn wood(amount: u32) -> BuildCost {
        BuildCost(vec![ResourceAmount::new("Wood", amount)])
    }

    #[test]
    fn insufficient_resources_leave_inventory_untouched() {
        let policy = GhostPolicy::default();
        let mut inventory = Inventory::default().with("Wood", 5);

        let result = try_consume_for_rebuild(&policy, &wood(10), Some(&mut inventory));

        assert_eq!(result, Err(GhostError::InsufficientResources));
        assert_eq!(inventory.count("Wood"), 5);
    }

    #[test]
    fn sufficient_resources_are_consumed() {
        let policy = GhostPolicy::default();
        let mut inventory = Inventory::default().with("Wood", 12).with("Stone", 1);

        try_consume_for_rebuild(&policy, &wood(10), Some(&mut inventory)).unwrap();

        assert_eq!(inventory.count("Wood"), 2);
        assert_eq!(inventory.count("Stone"), 1);
    }

    #[test]
    fn duplicate_cost_lines_are_summed() {
        let cost = BuildCost(vec![
            ResourceAmount::new("Wood", 4),
            ResourceAmount::new("Wood", 4),
        ]);
        let inventory = Inventory::default().with("Wood", 7);
        assert!(!inventory.have_requirements(&cost));
    }

    #[test]
    fn oversized_duplicate_lines_saturate() {
        let cost = BuildCost(vec![
            ResourceAmount::new("Wood", u32::MAX),
            ResourceAmount::new("Wood", u32::MAX),
        ]);
        assert_eq!(cost.totals().get("Wood"), Some(&u32::MAX));

        let inventory = Inventory::default().with("Wood", u32::MAX);
        assert!(inventory.have_requirements(&cost));
    }

    #[test]
    fn bypass_privilege_pays_nothing() {
        let policy = GhostPolicy::default();
        let mut inventory = Inventory {
            no_cost: true,
            ..Inventory::default()
        };
        assert!(try_consume_for_rebuild(&policy, &wood(10), Some(&mut inventory)).is_ok());
    }

    #[test]
    fn missing_builder_fails_only_when_resources_required() {
        let mut policy = GhostPolicy::default();
        let none: Option<&mut Inventory> = None;
        assert_eq!(
            try_consume_for_rebuild(&policy, &wood(1), none),
            Err(GhostError::InsufficientResources)
        );

        policy.require_resources = Toggle::Off;
        let mut inventory = Inventory::default();
        assert!(try_consume_for_rebuild(&policy, &wood(1), Some(&mut inventory)).is_ok());
        assert!(try_consume_for_rebuild::<Inventory>(&policy, &wood(1), None).is_ok());
    }

    #[test]
    fn drops_follow_policy_and_block_flag() {
        let mut policy = GhostPolicy::default();
        assert!(should_drop(&policy, false));
        assert!(!should_drop(&policy, true));
        policy.require_resources = Toggle::Off;
        assert!(!should_drop(&policy, false));
    }
}
