//! Entity aliases.

pub use super::capex_budget_type::Entity as CapexBudgetType;
pub use super::capex_list::Entity as CapexList;
pub use super::company2::Entity as Company2;
pub use super::division::Entity as Division;
pub use super::po_order::Entity as PoOrder;
pub use super::po_order_detail::Entity as PoOrderDetail;
