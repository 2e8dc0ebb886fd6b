use std::fmt;

use serde::Serialize;

/// Lookup strategies, in the order the resolver tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// Document key equals the identity key.
    PrimaryKey,
    /// `userId` field equals the identity key.
    UserIdField,
    /// `email` field equals the identity's email.
    EmailField,
    /// Every document, checked against all of the above.
    FullScan,
}

impl LookupStrategy {
    pub const CASCADE: [LookupStrategy; 4] = [
        LookupStrategy::PrimaryKey,
        LookupStrategy::UserIdField,
        LookupStrategy::EmailField,
        LookupStrategy::FullScan,
    ];
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookupStrategy::PrimaryKey => "primary key",
            LookupStrategy::UserIdField => "userId field",
            LookupStrategy::EmailField => "email field",
            LookupStrategy::FullScan => "full scan",
        })
    }
}
