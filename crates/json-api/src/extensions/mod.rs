//! Extension traits

mod depot;
mod requester;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use requester::RequesterExt as _;
pub(crate) use result::ResultExt as _;
