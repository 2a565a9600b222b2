//! Depot helper extensions.

use std::any::Any;

use pantry_app::auth::models::AuthedUser;
use salvo::prelude::{Depot, StatusError};

const AUTHED_USER_KEY: &str = "authed_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The user the auth middleware resolved for this request.
    fn authed_user_or_401(&self) -> Result<&AuthedUser, StatusError>;

    fn insert_authed_user(&mut self, user: AuthedUser);
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn authed_user_or_401(&self) -> Result<&AuthedUser, StatusError> {
        self.get::<AuthedUser>(AUTHED_USER_KEY)
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }

    fn insert_authed_user(&mut self, user: AuthedUser) {
        self.insert(AUTHED_USER_KEY, user);
    }
}
