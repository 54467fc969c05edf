//! Identifiers for users, wallets and settled transactions
//!
//! Each id wraps a UUID v7, so ids created later sort later. A user keeps
//! its id for life; wallets are addressed by id in every trade and swap
//! request; a transaction id is fixed when the record is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Fresh id stamped with the current time
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_id! {
    /// Account holder; wallets point back to their owner through it
    UserId
}

uuid_id! {
    /// Wallet address used by trade and swap requests and the registry index
    WalletId
}

uuid_id! {
    /// Settled trade or swap; two identical requests still get two ids
    TransactionId
}
