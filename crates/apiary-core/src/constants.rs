/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const GROUP_ROUTE_COMPONENT: &str = "group";
pub const GROUP_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", GROUP_ROUTE_COMPONENT);

/// Display name used for every private group, whatever its stored name.
pub const DEFAULT_PRIVATE_GROUP_LABEL: &str = "Personal Space";

/// Header carrying the caller uid when `auth.method = "header"`.
pub const DEFAULT_AUTH_HEADER: &str = "x-apiary-uid";
