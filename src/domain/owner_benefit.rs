//! Owner benefit aggregation.

use super::sheet::OwnerAddBacks;

/// Sum of all add-backs. Every category is treated the same.
pub fn total_owner_benefit(addbacks: &OwnerAddBacks) -> f64 {
    addbacks.total()
}
