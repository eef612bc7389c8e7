//! Status and category enums for catalog and order entities.
//!
//! All of these are stored as lowercase TEXT in the database, so each enum
//! implements `FromStr`/`Display` in addition to serde. Repositories parse
//! the stored text back into these types and treat unknown values as data
//! corruption.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stored status string is not a known variant.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownStatus {
    /// Which enum failed to parse.
    pub kind: &'static str,
    /// The offending value.
    pub value: String,
}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// The lowercase text stored in the database for this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownStatus {
                        kind: stringify!($name),
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

text_enum! {
    /// Product category.
    ProductCategory {
        Fruit => "fruit",
        Vegetable => "vegetable",
    }
}

text_enum! {
    /// Bag template category. `Mixed` bags draw from both product categories.
    BagCategory {
        Fruit => "fruit",
        Vegetable => "vegetable",
        Mixed => "mixed",
    }
}

text_enum! {
    /// Mobile wallet used to pay for an order.
    ///
    /// Referenced by name only; no gateway integration exists.
    PaymentMethod {
        Easypaisa => "easypaisa",
        Jazzcash => "jazzcash",
    }
}

text_enum! {
    /// Payment status of an order.
    PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
    }
}

text_enum! {
    /// Fulfillment status of an order.
    ///
    /// Transitions are unconstrained: the admin can move an order from any
    /// status to any other.
    OrderStatus {
        Processing => "processing",
        Confirmed => "confirmed",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Processing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_text() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Confirmed,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().expect("parse"), status);
        }
    }

    #[test]
    fn test_unknown_value() {
        let err = "shipped".parse::<OrderStatus>().expect_err("unknown");
        assert_eq!(err.kind, "OrderStatus");
        assert_eq!(err.value, "shipped");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PaymentMethod::Easypaisa).expect("serialize");
        assert_eq!(json, "\"easypaisa\"");
        let back: PaymentMethod = serde_json::from_str("\"jazzcash\"").expect("deserialize");
        assert_eq!(back, PaymentMethod::Jazzcash);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
    }

    #[test]
    fn test_bag_category_includes_mixed() {
        assert_eq!("mixed".parse::<BagCategory>().expect("parse"), BagCategory::Mixed);
        assert!("mixed".parse::<ProductCategory>().is_err());
    }
}
