use serde::{Deserialize, Serialize};
use std::fmt;

/// The five mutually exclusive resource kinds a merged tank can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Fluid,
    Gas,
    Infusion,
    Pigment,
    Slurry,
}

impl ResourceKind {
    /// Every kind, fluid first, then chemicals in transfer order
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Fluid,
        ResourceKind::Gas,
        ResourceKind::Infusion,
        ResourceKind::Pigment,
        ResourceKind::Slurry,
    ];

    /// Returns the chemical kind, or None for fluids
    pub fn as_chemical(self) -> Option<ChemicalKind> {
        match self {
            ResourceKind::Fluid => None,
            ResourceKind::Gas => Some(ChemicalKind::Gas),
            ResourceKind::Infusion => Some(ChemicalKind::Infusion),
            ResourceKind::Pigment => Some(ChemicalKind::Pigment),
            ResourceKind::Slurry => Some(ChemicalKind::Slurry),
        }
    }

    pub fn is_chemical(self) -> bool {
        self.as_chemical().is_some()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ResourceKind::Fluid => "fluid",
            ResourceKind::Gas => "gas",
            ResourceKind::Infusion => "infusion",
            ResourceKind::Pigment => "pigment",
            ResourceKind::Slurry => "slurry",
        };
        write!(f, "{}", name)
    }
}

/// The chemical subset of resource kinds
///
/// Transfers that "try all chemicals" walk `ChemicalKind::ALL` in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChemicalKind {
    Gas,
    Infusion,
    Pigment,
    Slurry,
}

impl ChemicalKind {
    pub const ALL: [ChemicalKind; 4] = [
        ChemicalKind::Gas,
        ChemicalKind::Infusion,
        ChemicalKind::Pigment,
        ChemicalKind::Slurry,
    ];
}

impl From<ChemicalKind> for ResourceKind {
    fn from(kind: ChemicalKind) -> Self {
        match kind {
            ChemicalKind::Gas => ResourceKind::Gas,
            ChemicalKind::Infusion => ResourceKind::Infusion,
            ChemicalKind::Pigment => ResourceKind::Pigment,
            ChemicalKind::Slurry => ResourceKind::Slurry,
        }
    }
}

impl fmt::Display for ChemicalKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        ResourceKind::from(*self).fmt(f)
    }
}

/// One value per resource kind
///
/// Used for per-kind configuration (tank capacities) and for the
/// sub-tanks of a merged tank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KindTable<T> {
    pub fluid: T,
    pub gas: T,
    pub infusion: T,
    pub pigment: T,
    pub slurry: T,
}

impl<T> KindTable<T> {
    /// Builds a table by calling `f` once per kind
    pub fn from_fn(mut f: impl FnMut(ResourceKind) -> T) -> Self {
        KindTable {
            fluid: f(ResourceKind::Fluid),
            gas: f(ResourceKind::Gas),
            infusion: f(ResourceKind::Infusion),
            pigment: f(ResourceKind::Pigment),
            slurry: f(ResourceKind::Slurry),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> &T {
        match kind {
            ResourceKind::Fluid => &self.fluid,
            ResourceKind::Gas => &self.gas,
            ResourceKind::Infusion => &self.infusion,
            ResourceKind::Pigment => &self.pigment,
            ResourceKind::Slurry => &self.slurry,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut T {
        match kind {
            ResourceKind::Fluid => &mut self.fluid,
            ResourceKind::Gas => &mut self.gas,
            ResourceKind::Infusion => &mut self.infusion,
            ResourceKind::Pigment => &mut self.pigment,
            ResourceKind::Slurry => &mut self.slurry,
        }
    }

    /// Iterates `(kind, value)` pairs in `ResourceKind::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &T)> + '_ {
        ResourceKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chemical_round_trip() {
        for chemical in ChemicalKind::ALL {
            let kind = ResourceKind::from(chemical);
            assert_eq!(kind.as_chemical(), Some(chemical));
        }
        assert_eq!(ResourceKind::Fluid.as_chemical(), None);
    }

    #[test]
    fn test_chemical_transfer_order() {
        assert_eq!(
            ChemicalKind::ALL,
            [ChemicalKind::Gas, ChemicalKind::Infusion, ChemicalKind::Pigment, ChemicalKind::Slurry]
        );
    }

    #[test]
    fn test_kind_table_lookup() {
        let mut table = KindTable::from_fn(|kind| kind.to_string());
        assert_eq!(table.get(ResourceKind::Pigment), "pigment");

        *table.get_mut(ResourceKind::Slurry) = "changed".to_string();
        assert_eq!(table.slurry, "changed");

        let order: Vec<ResourceKind> = table.iter().map(|(kind, _)| kind).collect();
        assert_eq!(order, ResourceKind::ALL.to_vec());
    }
}
