// Closed code lists defined by the OTA protocol
use std::fmt;

use crate::error::MappingError;

/// Occupant categories used in guest counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeQualifyingCode {
    Adult,
    Child,
}

impl AgeQualifyingCode {
    pub const ALL: [Self; 2] = [Self::Adult, Self::Child];

    pub const fn code(self) -> u32 {
        match self {
            Self::Adult => 10,
            Self::Child => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Adult => "adult",
            Self::Child => "child",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.name().eq_ignore_ascii_case(name))
    }

    pub fn resolve(field: &str, name: &str) -> Result<Self, MappingError> {
        Self::from_name(name).ok_or_else(|| MappingError::UnknownCode {
            field: field.to_string(),
            kind: "age qualifying category",
            value: name.to_string(),
        })
    }
}

impl fmt::Display for AgeQualifyingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// OTA unique identifier types (UIT code list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UniqueIdType {
    Customer,
    Hotel,
    #[default]
    Reservation,
    Cancellation,
    Reference,
    Profile,
}

impl UniqueIdType {
    pub const ALL: [Self; 6] = [
        Self::Customer,
        Self::Hotel,
        Self::Reservation,
        Self::Cancellation,
        Self::Reference,
        Self::Profile,
    ];

    pub const fn code(self) -> u32 {
        match self {
            Self::Customer => 1,
            Self::Hotel => 10,
            Self::Reservation => 14,
            Self::Cancellation => 15,
            Self::Reference => 16,
            Self::Profile => 21,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Hotel => "hotel",
            Self::Reservation => "reservation",
            Self::Cancellation => "cancellation",
            Self::Reference => "reference",
            Self::Profile => "profile",
        }
    }

    /// The ID_Context the CRS expects when the caller gives none.
    pub const fn default_context(self) -> Option<&'static str> {
        match self {
            Self::Reservation => Some("CrsConfirmNumber"),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.name().eq_ignore_ascii_case(name))
    }

    pub fn resolve(field: &str, name: &str) -> Result<Self, MappingError> {
        Self::from_name(name).ok_or_else(|| MappingError::UnknownCode {
            field: field.to_string(),
            kind: "unique identifier type",
            value: name.to_string(),
        })
    }
}

impl fmt::Display for UniqueIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
