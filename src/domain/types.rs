//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, positive money amounts) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::{ops::Deref, str::FromStr};

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Money amount could not be parsed.
    #[error("invalid amount")]
    InvalidAmount,
    /// Money amount was zero or negative.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a marketplace user.");
id_newtype!(CategoryId, "Unique identifier for a service category.");
id_newtype!(SubcategoryId, "Unique identifier for a service subcategory.");
id_newtype!(ProviderId, "Unique identifier for a service provider.");
id_newtype!(BookingId, "Unique identifier for a service booking.");
id_newtype!(RideId, "Unique identifier for a taxi ride booking.");
id_newtype!(NotificationId, "Unique identifier for a user notification.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserEmail(String);

impl UserEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for UserEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserEmail> for String {
    fn from(value: UserEmail) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(FullName, "User display name enforcing non-empty values.");

non_empty_string_newtype!(
    ProviderName,
    "Service provider name enforcing trimmed, non-empty values."
);

non_empty_string_newtype!(
    Address,
    "Street address used for ride pickup and dropoff."
);

non_empty_string_newtype!(
    DonationCause,
    "Donation campaign name enforcing trimmed, non-empty values."
);

/// Normalizes a phone number string to E.164 format.
fn normalize_phone_to_e164(input: &str) -> Result<String, TypeConstraintError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    if !parsed.is_valid() {
        return Err(TypeConstraintError::InvalidPhone);
    }
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Strictly positive money amount stored in minor units (cents).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Wraps a cent value, rejecting zero and negative amounts.
    pub fn from_cents(cents: i64) -> Result<Self, TypeConstraintError> {
        if cents > 0 {
            Ok(Self(cents))
        } else {
            Err(TypeConstraintError::NonPositiveAmount)
        }
    }

    /// Returns the amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whole currency units, fraction discarded.
    pub const fn whole_units(self) -> i64 {
        self.0 / 100
    }
}

impl FromStr for Amount {
    type Err = TypeConstraintError;

    /// Parses a decimal string such as `"12"`, `"12.5"` or `"12.50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() && fraction.is_empty()
            || !all_digits(whole)
            || !all_digits(fraction)
            || fraction.len() > 2
        {
            return Err(TypeConstraintError::InvalidAmount);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| TypeConstraintError::InvalidAmount)?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| TypeConstraintError::InvalidAmount)? * 10,
            _ => fraction
                .parse()
                .map_err(|_| TypeConstraintError::InvalidAmount)?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or(TypeConstraintError::InvalidAmount)?;
        Self::from_cents(cents)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_cents(self.0, f)
    }
}

fn format_cents(cents: i64, f: &mut Formatter<'_>) -> std::fmt::Result {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Formats a signed cent value as a decimal string.
pub fn display_cents(cents: i64) -> String {
    struct Cents(i64);
    impl Display for Cents {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            format_cents(self.0, f)
        }
    }
    Cents(cents).to_string()
}

/// Roles a marketplace account can hold.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Provider,
    Driver,
    Admin,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Provider => "provider",
            UserRole::Driver => "driver",
            UserRole::Admin => "admin",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "provider" => Ok(UserRole::Provider),
            "driver" => Ok(UserRole::Driver),
            "admin" => Ok(UserRole::Admin),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert!(UserId::new(1).is_ok());
        assert_eq!(UserId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(RideId::new(-4), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn email_is_normalized() {
        let email = UserEmail::new("  Rider@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "rider@example.com");
        assert_eq!(
            UserEmail::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert_eq!(ProviderName::new("  Spark Clean ").unwrap().as_str(), "Spark Clean");
        assert_eq!(Address::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn phone_is_normalized_to_e164() {
        let phone = PhoneNumber::new("+1 (415) 555-2671").unwrap();
        assert_eq!(phone.as_str(), "+14155552671");
        assert!(PhoneNumber::new("12").is_err());
    }

    #[test]
    fn amount_parses_decimal_strings() {
        assert_eq!("12".parse::<Amount>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Amount>().unwrap().cents(), 1250);
        assert_eq!(" 0.05 ".parse::<Amount>().unwrap().cents(), 5);
        assert_eq!(".5".parse::<Amount>().unwrap().cents(), 50);
    }

    #[test]
    fn amount_rejects_bad_input() {
        assert_eq!("".parse::<Amount>(), Err(TypeConstraintError::EmptyString));
        assert_eq!("abc".parse::<Amount>(), Err(TypeConstraintError::InvalidAmount));
        assert_eq!("1.234".parse::<Amount>(), Err(TypeConstraintError::InvalidAmount));
        assert_eq!("-5".parse::<Amount>(), Err(TypeConstraintError::InvalidAmount));
        assert_eq!("0.00".parse::<Amount>(), Err(TypeConstraintError::NonPositiveAmount));
        assert_eq!(".".parse::<Amount>(), Err(TypeConstraintError::InvalidAmount));
    }

    #[test]
    fn amount_display_uses_two_decimals() {
        assert_eq!(Amount::from_cents(705).unwrap().to_string(), "7.05");
        assert_eq!(display_cents(-1250), "-12.50");
    }

    #[test]
    fn roles_round_trip_through_strings() {
        assert_eq!("Admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(UserRole::Driver.to_string(), "driver");
        assert!("pilot".parse::<UserRole>().is_err());
    }
}
