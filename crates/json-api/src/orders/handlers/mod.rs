//! Order Handlers

pub(crate) mod admin_index;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update_status;
pub(crate) mod user_orders;
