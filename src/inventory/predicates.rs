//! Per-kind slot predicates
//!
//! Each check looks at one sub-tank and the item's container of the same
//! kind. A stack without that container fails every "may insert" check.

use crate::item::ItemStack;
use crate::resource::ResourceTank;

/// Item holds something `tank` would take at least part of right now
///
/// Insert check for slots that empty containers into a tank.
pub fn can_drain_into(tank: &ResourceTank, stack: &ItemStack) -> bool {
    let Some(handler) = stack.handler(tank.kind()) else {
        return false;
    };
    match handler.stored() {
        Some(offered) => tank.accepts(offered) > 0,
        None => false,
    }
}

/// Item has a container of the tank's kind that can receive the tank's
/// contents (any container qualifies while the tank is empty)
///
/// Insert check for slots that fill containers from a tank.
pub fn can_fill_from(tank: &ResourceTank, stack: &ItemStack) -> bool {
    let Some(handler) = stack.handler(tank.kind()) else {
        return false;
    };
    match tank.stored() {
        Some(stored) => handler.accepts(stored) > 0,
        None => true,
    }
}

/// Item cannot take anything more from `tank`, so filling is done
///
/// Extract check for slots that fill containers from a tank. Items with
/// no container of the tank's kind are never held back.
pub fn is_fill_complete(tank: &ResourceTank, stack: &ItemStack) -> bool {
    let Some(handler) = stack.handler(tank.kind()) else {
        return true;
    };
    match tank.stored() {
        Some(stored) => handler.accepts(stored) == 0,
        None => true,
    }
}
