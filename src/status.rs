//! Order status reconciliation.
//!
//! Kitchen and bar work through their own sub-status independently; the
//! overall status shown to waitstaff is derived from the pair. For mixed
//! orders the slowest department wins: anything short of both sides being
//! `ready` (or both `served`) collapses to `preparing`.

use crate::models::{Department, OrderStatus};

/// Sub-status a department starts at when an order is created. A department
/// with nothing to prepare starts at `ready` so it never holds the order up.
pub fn initial_sub_status(has_items_for_department: bool) -> OrderStatus {
    if has_items_for_department {
        OrderStatus::Pending
    } else {
        OrderStatus::Ready
    }
}

/// Derive the overall status from the two department sub-statuses.
pub fn reconcile(
    has_food_items: bool,
    has_drink_items: bool,
    kitchen_status: OrderStatus,
    bar_status: OrderStatus,
) -> OrderStatus {
    match (has_food_items, has_drink_items) {
        (true, true) => match (kitchen_status, bar_status) {
            (OrderStatus::Ready, OrderStatus::Ready) => OrderStatus::Ready,
            (OrderStatus::Served, OrderStatus::Served) => OrderStatus::Served,
            _ => OrderStatus::Preparing,
        },
        (true, false) => kitchen_status,
        (false, true) => bar_status,
        // Orders are rejected at creation unless they contain at least one
        // item, so both flags false cannot occur for a persisted order.
        (false, false) => OrderStatus::Ready,
    }
}

/// Apply a department's status report and return the new
/// `(kitchen_status, bar_status, overall_status)` triple.
pub fn apply_department_update(
    department: Department,
    new_status: OrderStatus,
    has_food_items: bool,
    has_drink_items: bool,
    kitchen_status: OrderStatus,
    bar_status: OrderStatus,
) -> (OrderStatus, OrderStatus, OrderStatus) {
    let (kitchen_status, bar_status) = match department {
        Department::Kitchen => (new_status, bar_status),
        Department::Bar => (kitchen_status, new_status),
    };
    let overall = reconcile(has_food_items, has_drink_items, kitchen_status, bar_status);
    (kitchen_status, bar_status, overall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus::*;

    #[test]
    fn initial_sub_statuses() {
        assert_eq!(initial_sub_status(true), Pending);
        assert_eq!(initial_sub_status(false), Ready);
    }

    #[test]
    fn food_only_order_passes_kitchen_status_through() {
        for status in [Pending, Confirmed, SentToKitchen, Preparing, Ready, Served] {
            assert_eq!(reconcile(true, false, status, Ready), status);
        }
    }

    #[test]
    fn drink_only_order_passes_bar_status_through() {
        for status in [Pending, Confirmed, SentToBar, Preparing, Ready, Served] {
            assert_eq!(reconcile(false, true, Ready, status), status);
        }
    }

    #[test]
    fn mixed_order_ready_only_when_both_ready() {
        assert_eq!(reconcile(true, true, Ready, Ready), Ready);
        assert_eq!(reconcile(true, true, Ready, Pending), Preparing);
        assert_eq!(reconcile(true, true, Pending, Ready), Preparing);
        assert_eq!(reconcile(true, true, Preparing, Ready), Preparing);
    }

    #[test]
    fn mixed_order_served_only_when_both_served() {
        assert_eq!(reconcile(true, true, Served, Served), Served);
        assert_eq!(reconcile(true, true, Served, Ready), Preparing);
        assert_eq!(reconcile(true, true, Ready, Served), Preparing);
    }

    #[test]
    fn mixed_order_everything_else_is_preparing() {
        for kitchen in [Pending, Confirmed, SentToKitchen, Preparing] {
            for bar in [Pending, Confirmed, SentToBar, Preparing, Ready] {
                assert_eq!(reconcile(true, true, kitchen, bar), Preparing);
            }
        }
    }

    // Bar finishes first, kitchen catches up later.
    #[test]
    fn mixed_order_update_sequence() {
        let (kitchen, bar, overall) =
            apply_department_update(Department::Bar, Ready, true, true, Pending, Pending);
        assert_eq!((kitchen, bar, overall), (Pending, Ready, Preparing));

        let (kitchen, bar, overall) =
            apply_department_update(Department::Kitchen, Ready, true, true, kitchen, bar);
        assert_eq!((kitchen, bar, overall), (Ready, Ready, Ready));
    }

    #[test]
    fn department_update_is_idempotent() {
        let first = apply_department_update(Department::Kitchen, Ready, true, false, Pending, Ready);
        let second =
            apply_department_update(Department::Kitchen, Ready, true, false, first.0, first.1);
        assert_eq!(first, second);
    }

    #[test]
    fn departments_never_touch_each_others_sub_status() {
        let (kitchen, bar, _) =
            apply_department_update(Department::Bar, Served, true, true, Preparing, Ready);
        assert_eq!(kitchen, Preparing);
        assert_eq!(bar, Served);
    }
}
