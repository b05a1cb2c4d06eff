//! Depot helpers for extracting the caller from Salvo requests.

use crate::error::{ServiceError, ServiceResult};

use super::caller::{Caller, DepotUser};

pub mod depot_keys {
    pub const AUTHENTICATED_PRINCIPAL: &str = "__authenticated_principal";
}

/// Get the authenticated caller from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if no caller is found in the depot or if the request is public.
pub fn get_caller_from_depot(depot: &salvo::Depot) -> ServiceResult<&Caller> {
    let depot_user = depot
        .get::<DepotUser>(depot_keys::AUTHENTICATED_PRINCIPAL)
        .map_err(|_e| ServiceError::NotAuthenticated)?;

    match depot_user {
        DepotUser::User(caller) => Ok(caller),
        DepotUser::Public => Err(ServiceError::NotAuthenticated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiary_core::types::UserRole;

    #[test]
    fn caller_is_read_back_from_depot() {
        let mut depot = salvo::Depot::new();
        assert!(matches!(
            get_caller_from_depot(&depot),
            Err(ServiceError::NotAuthenticated)
        ));

        depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::Public);
        assert!(get_caller_from_depot(&depot).is_err());

        let caller = Caller {
            uid: 7,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            role: UserRole::Member,
        };
        depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::User(caller.clone()));
        assert_eq!(get_caller_from_depot(&depot).unwrap(), &caller);
    }
}
