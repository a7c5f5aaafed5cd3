use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same strings as `as_str`.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(UserRole {
    Patient => "patient",
    Caregiver => "caregiver",
    Volunteer => "volunteer",
});

str_enum!(DeliveryStatus {
    Pending => "pending",
    Assigned => "assigned",
    InTransit => "in-transit",
    Delivered => "delivered",
});

impl UserRole {
    /// Capitalized role name for badges ("Patient").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Caregiver => "Caregiver",
            Self::Volunteer => "Volunteer",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Patient
    }
}

impl DeliveryStatus {
    /// Every status in progression order.
    pub const ALL: [DeliveryStatus; 4] = [
        Self::Pending,
        Self::Assigned,
        Self::InTransit,
        Self::Delivered,
    ];

    fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Assigned => 1,
            Self::InTransit => 2,
            Self::Delivered => 3,
        }
    }

    /// Forward-only progression: pending → assigned → in-transit → delivered.
    /// Steps may be skipped; staying put is allowed.
    pub fn can_advance_to(&self, next: DeliveryStatus) -> bool {
        next.rank() >= self.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn delivery_status_round_trip() {
        for (variant, s) in [
            (DeliveryStatus::Pending, "pending"),
            (DeliveryStatus::Assigned, "assigned"),
            (DeliveryStatus::InTransit, "in-transit"),
            (DeliveryStatus::Delivered, "delivered"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(DeliveryStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&DeliveryStatus::InTransit).unwrap();
        assert_eq!(json, "\"in-transit\"");
        let role: UserRole = serde_json::from_str("\"volunteer\"").unwrap();
        assert_eq!(role, UserRole::Volunteer);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(DeliveryStatus::from_str("in_transit").is_err());
        assert!(UserRole::from_str("doctor").is_err());
        assert!(serde_json::from_str::<DeliveryStatus>("\"lost\"").is_err());
    }

    #[test]
    fn progression_is_forward_only() {
        assert!(DeliveryStatus::Pending.can_advance_to(DeliveryStatus::Assigned));
        assert!(DeliveryStatus::Assigned.can_advance_to(DeliveryStatus::Delivered));
        assert!(DeliveryStatus::InTransit.can_advance_to(DeliveryStatus::InTransit));
        assert!(!DeliveryStatus::Delivered.can_advance_to(DeliveryStatus::Pending));
        assert!(!DeliveryStatus::InTransit.can_advance_to(DeliveryStatus::Assigned));
    }

    #[test]
    fn role_display_name_is_capitalized() {
        assert_eq!(UserRole::Caregiver.display_name(), "Caregiver");
        assert_eq!(UserRole::default(), UserRole::Patient);
    }
}
