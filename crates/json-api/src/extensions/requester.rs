//! Authenticated requester stored in the depot.

use salvo::prelude::{Depot, StatusError};
use storefront_app::auth::Requester;

pub(crate) trait RequesterExt {
    fn insert_requester(&mut self, requester: Requester);

    /// The authenticated requester, or 401 when auth did not run.
    fn requester_or_401(&self) -> Result<Requester, StatusError>;

    /// The authenticated requester if it is an admin, or 403.
    fn admin_or_403(&self) -> Result<Requester, StatusError>;
}

impl RequesterExt for Depot {
    fn insert_requester(&mut self, requester: Requester) {
        self.inject(requester);
    }

    fn requester_or_401(&self) -> Result<Requester, StatusError> {
        self.obtain::<Requester>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn admin_or_403(&self) -> Result<Requester, StatusError> {
        let requester = self.requester_or_401()?;

        if !requester.is_admin {
            return Err(StatusError::forbidden().brief("Admin access required"));
        }

        Ok(requester)
    }
}
