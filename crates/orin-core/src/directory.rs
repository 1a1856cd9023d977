//! Static demo user directory.
//!
//! The prototype backend ships a fixed set of telemetry accounts; there
//! is no persistence. The `api_token` is carried as opaque account data
//! and is never used to authenticate anything.

use serde::Serialize;

/// A registered demo user and their telemetry devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: &'static str,
    pub devices: &'static [&'static str],
    pub api_token: &'static str,
}

/// Demo accounts shipped with the prototype.
const USERS: &[UserRecord] = &[
    UserRecord {
        id: "41651",
        devices: &["353691846067915", "353691846067907"],
        api_token: "FCrZ4HasaK25prlLw20Pdwq9eqsRISHuHleMNQXmkxD6P1yx2OOkFM0VTNVU",
    },
    UserRecord {
        id: "41641",
        devices: &["353691846741238", "353691846741212", "353691846741311"],
        api_token: "7mI48BNlgVLHUcz3Sl8nFPJHoANS1UDGbr8CnbTYEWNmqD6LwRJhwCbnnsHU",
    },
    UserRecord {
        id: "41634",
        devices: &["352503096245417", "352503097599697"],
        api_token: "lj6t8C29HziAzh3rV6hxWpE6fD9lrr9KmDJrBrrPso1nrn1j6G9zvlaRgg1n",
    },
    UserRecord {
        id: "41564",
        devices: &["353691840153869", "353691845897312"],
        api_token: "xboInEFhBWuyrEGdUO7odsXHuPtY0eywLOqNHJJzrMCabBMVt7thoC61ddzY",
    },
];

/// Returns all demo accounts in seed order.
pub fn all() -> &'static [UserRecord] {
    USERS
}

/// Returns user IDs containing `query` (case-insensitive), capped at `limit`.
///
/// An empty query matches every ID. Results keep seed order.
pub fn search_ids(query: &str, limit: usize) -> Vec<&'static str> {
    let needle = query.to_lowercase();
    USERS
        .iter()
        .filter(|user| user.id.to_lowercase().contains(&needle))
        .map(|user| user.id)
        .take(limit)
        .collect()
}

/// Looks up a user by exact ID. `None` means the user is not registered.
pub fn find(id: &str) -> Option<&'static UserRecord> {
    USERS.iter().find(|user| user.id == id)
}
