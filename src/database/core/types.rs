//! Enum boundary types for CHECK-constrained columns
//!
//! The payments and bookings tables restrict several TEXT columns to closed
//! sets of literals via CHECK constraints. These enums mirror those sets so
//! callers can validate values at the application boundary instead of relying
//! on the database error alone. `as_str()` returns the exact literal stored
//! in the database.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accepted payment methods (`payments.payment_method`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "PayPal")]
    PayPal,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: &'static [PaymentMethod] = &[
        PaymentMethod::CreditCard,
        PaymentMethod::PayPal,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit Card" => Ok(PaymentMethod::CreditCard),
            "PayPal" => Ok(PaymentMethod::PayPal),
            "Bank Transfer" => Ok(PaymentMethod::BankTransfer),
            other => Err(format!("unknown payment method: '{}'", other)),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment lifecycle states (`payments.status`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub const ALL: &'static [PaymentStatus] = &[
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PaymentStatus::Pending),
            "Completed" => Ok(PaymentStatus::Completed),
            "Failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status: '{}'", other)),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Booking appointment kinds (`bookings.type`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Consultation,
    Installation,
}

impl BookingKind {
    pub const ALL: &'static [BookingKind] =
        &[BookingKind::Consultation, BookingKind::Installation];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Consultation => "Consultation",
            BookingKind::Installation => "Installation",
        }
    }
}

impl FromStr for BookingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Consultation" => Ok(BookingKind::Consultation),
            "Installation" => Ok(BookingKind::Installation),
            other => Err(format!("unknown booking type: '{}'", other)),
        }
    }
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Booking lifecycle states (`bookings.status`)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: &'static [BookingStatus] = &[
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(BookingStatus::Pending),
            "Confirmed" => Ok(BookingStatus::Confirmed),
            "Cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: '{}'", other)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::{DatabaseConn, SchemaManager};

    #[test]
    fn test_round_trips() {
        for m in PaymentMethod::ALL {
            assert_eq!(m.as_str().parse::<PaymentMethod>().unwrap(), *m);
        }
        for s in PaymentStatus::ALL {
            assert_eq!(s.as_str().parse::<PaymentStatus>().unwrap(), *s);
        }
        for k in BookingKind::ALL {
            assert_eq!(k.as_str().parse::<BookingKind>().unwrap(), *k);
        }
        for s in BookingStatus::ALL {
            assert_eq!(s.as_str().parse::<BookingStatus>().unwrap(), *s);
        }
    }

    #[test]
    fn test_unknown_literals_rejected() {
        assert!("Bitcoin".parse::<PaymentMethod>().is_err());
        assert!("pending".parse::<PaymentStatus>().is_err());
        assert!("Repair".parse::<BookingKind>().is_err());
        assert!("Done".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_defaults_match_schema_defaults() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
    }

    #[test]
    fn test_serde_uses_database_literals() {
        let json = serde_json::to_string(&PaymentMethod::CreditCard).unwrap();
        assert_eq!(json, "\"Credit Card\"");
        let back: PaymentMethod = serde_json::from_str("\"Bank Transfer\"").unwrap();
        assert_eq!(back, PaymentMethod::BankTransfer);
    }

    #[test]
    fn test_every_literal_passes_check_constraints() {
        let db = DatabaseConn::open_in_memory().unwrap();
        SchemaManager::new(&db.conn).initialize().unwrap();

        db.execute(
            "INSERT INTO users (username, email, password_hash) VALUES ('alice', 'alice@example.com', 'h')",
        )
        .unwrap();
        db.execute("INSERT INTO products (name) VALUES ('Solar Panel')")
            .unwrap();

        for method in PaymentMethod::ALL {
            for status in PaymentStatus::ALL {
                db.conn
                    .execute(
                        "INSERT INTO payments (user_id, product_id, amount, payment_method, status) VALUES (1, 1, 1.0, ?1, ?2)",
                        [method.as_str(), status.as_str()],
                    )
                    .unwrap();
            }
        }

        for kind in BookingKind::ALL {
            for status in BookingStatus::ALL {
                db.conn
                    .execute(
                        "INSERT INTO bookings (user_id, date, type, status) VALUES (1, '2026-09-01', ?1, ?2)",
                        [kind.as_str(), status.as_str()],
                    )
                    .unwrap();
            }
        }
    }
}
