use serde::{Serialize, Serializer};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// How long the server should keep a secret around.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Expiration {
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    OneHour,
    FourHours,
    TwelveHours,
    OneDay,
    ThreeDays,
    SevenDays,
}

impl Expiration {
    pub const ALL: [Expiration; 9] = [
        Expiration::FiveMinutes,
        Expiration::TenMinutes,
        Expiration::FifteenMinutes,
        Expiration::OneHour,
        Expiration::FourHours,
        Expiration::TwelveHours,
        Expiration::OneDay,
        Expiration::ThreeDays,
        Expiration::SevenDays,
    ];

    /// The value sent to the server.
    pub fn as_str(self) -> &'static str {
        match self {
            Expiration::FiveMinutes => "5m",
            Expiration::TenMinutes => "10m",
            Expiration::FifteenMinutes => "15m",
            Expiration::OneHour => "1h",
            Expiration::FourHours => "4h",
            Expiration::TwelveHours => "12h",
            Expiration::OneDay => "1d",
            Expiration::ThreeDays => "3d",
            Expiration::SevenDays => "7d",
        }
    }
}

impl Default for Expiration {
    fn default() -> Expiration { Expiration::FiveMinutes }
}

impl Display for Expiration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Expiration {
    type Err = UnknownExpiration;

    fn from_str(s: &str) -> Result<Expiration, Self::Err> {
        Expiration::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownExpiration(s.to_string()))
    }
}

impl Serialize for Expiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "Invalid expiration time \"{0}\" (expected one of 5m, 10m, 15m, 1h, 4h, 12h, 1d, 3d, 7d)"
)]
pub struct UnknownExpiration(pub String);
