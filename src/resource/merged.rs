use crate::action::Action;
use super::kind::{KindTable, ResourceKind};
use super::stack::ResourceStack;
use super::tank::ResourceTank;

/// Five sub-tanks (fluid, gas, infusion, pigment, slurry) of which at most
/// one holds anything at a time.
///
/// Sub-tanks are readable directly but can only be mutated through
/// [`MergedTank::insert`] and [`MergedTank::extract`], which keep the
/// exclusivity invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTank {
    tanks: KindTable<ResourceTank>,
}

impl MergedTank {
    /// Creates an empty merged tank with the given per-kind capacities
    pub fn new(capacities: &KindTable<u64>) -> Self {
        MergedTank {
            tanks: KindTable::from_fn(|kind| ResourceTank::new(kind, *capacities.get(kind))),
        }
    }

    /// The kind currently held, or None when every sub-tank is empty
    pub fn current_type(&self) -> Option<ResourceKind> {
        self.tanks
            .iter()
            .find(|(_, tank)| !tank.is_empty())
            .map(|(kind, _)| kind)
    }

    pub fn is_empty(&self) -> bool {
        self.current_type().is_none()
    }

    pub fn tank(&self, kind: ResourceKind) -> &ResourceTank {
        self.tanks.get(kind)
    }

    pub fn fluid_tank(&self) -> &ResourceTank {
        &self.tanks.fluid
    }

    pub fn gas_tank(&self) -> &ResourceTank {
        &self.tanks.gas
    }

    pub fn infusion_tank(&self) -> &ResourceTank {
        &self.tanks.infusion
    }

    pub fn pigment_tank(&self) -> &ResourceTank {
        &self.tanks.pigment
    }

    pub fn slurry_tank(&self) -> &ResourceTank {
        &self.tanks.slurry
    }

    /// Returns true if a sub-tank of `kind` may receive resources right now
    pub fn accepts_kind(&self, kind: ResourceKind) -> bool {
        match self.current_type() {
            Some(active) => active == kind,
            None => true,
        }
    }

    /// Inserts into the sub-tank matching the stack's kind
    ///
    /// Refused (whole stack returned) while a different kind is active.
    pub fn insert(&mut self, stack: &ResourceStack, action: Action) -> ResourceStack {
        if !self.accepts_kind(stack.kind) {
            log::trace!(
                "merged tank refused {} {}: {:?} is active",
                stack.amount,
                stack.resource,
                self.current_type()
            );
            return stack.clone();
        }
        self.tanks.get_mut(stack.kind).insert(stack, action)
    }

    /// Extracts from the sub-tank of `kind`
    pub fn extract(&mut self, kind: ResourceKind, amount: u64, action: Action) -> ResourceStack {
        self.tanks.get_mut(kind).extract(amount, action)
    }

    /// Restores one sub-tank's contents from saved state
    ///
    /// Other sub-tanks are cleared so that exclusivity holds afterwards.
    pub(crate) fn restore(&mut self, contents: Option<ResourceStack>) {
        for kind in ResourceKind::ALL {
            self.tanks.get_mut(kind).set_stored(None);
        }
        if let Some(stack) = contents {
            let kind = stack.kind;
            self.tanks.get_mut(kind).set_stored(Some(stack));
        }
    }

    /// Capacities of every sub-tank
    pub fn capacities(&self) -> KindTable<u64> {
        KindTable::from_fn(|kind| self.tanks.get(kind).capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank() -> MergedTank {
        MergedTank::new(&KindTable::from_fn(|_| 1000))
    }

    #[test]
    fn test_empty_tank_has_no_current_type() {
        let tank = tank();
        assert_eq!(tank.current_type(), None);
        assert!(tank.is_empty());
    }

    #[test]
    fn test_current_type_follows_contents() {
        let mut tank = tank();
        tank.insert(&ResourceStack::new(ResourceKind::Pigment, "red", 100), Action::Execute);
        assert_eq!(tank.current_type(), Some(ResourceKind::Pigment));

        tank.extract(ResourceKind::Pigment, 100, Action::Execute);
        assert_eq!(tank.current_type(), None);
    }

    #[test]
    fn test_mutual_exclusivity() {
        let mut tank = tank();
        tank.insert(&ResourceStack::new(ResourceKind::Gas, "hydrogen", 100), Action::Execute);

        let water = ResourceStack::new(ResourceKind::Fluid, "water", 500);
        let remainder = tank.insert(&water, Action::Execute);

        assert_eq!(remainder, water);
        assert!(tank.fluid_tank().is_empty());
        assert_eq!(tank.gas_tank().amount(), 100);
    }

    #[test]
    fn test_restore_clears_other_tanks() {
        let mut tank = tank();
        tank.insert(&ResourceStack::new(ResourceKind::Gas, "hydrogen", 100), Action::Execute);

        tank.restore(Some(ResourceStack::new(ResourceKind::Slurry, "dirty_iron", 40)));

        assert!(tank.gas_tank().is_empty());
        assert_eq!(tank.slurry_tank().amount(), 40);
        assert_eq!(tank.current_type(), Some(ResourceKind::Slurry));
    }
}
