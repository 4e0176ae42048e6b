//! Service test harness.

mod db;
mod helpers;

pub(crate) use context::TestContext;
