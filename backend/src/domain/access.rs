//! Write authorisation for catalogue operations.
//!
//! Each operation maps to the capability it requires through
//! [`AccessPolicy::required`]. The match is exhaustive, so adding an
//! operation without deciding its policy fails to compile.
//!
//! Precedence: a caller without valid credentials is rejected as
//! unauthorised before privilege is considered; a valid caller without the
//! staff flag is forbidden.

use std::fmt;

use super::Error;

/// A CRUD operation on a catalogue collection or item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

/// What a caller must hold to perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Anyone, with or without credentials.
    Public,
    /// An authenticated user carrying the staff flag.
    Staff,
}

/// Opaque bearer credential presented by a caller.
///
/// `Debug` output hides the key so tokens never reach the logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token key. Returns `None` for empty keys or keys containing
    /// whitespace.
    pub fn parse(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(key))
    }

    /// The raw key, for lookups against the credential store.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// A user resolved from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    is_staff: bool,
}

impl Principal {
    pub fn new(username: impl Into<String>, is_staff: bool) -> Self {
        Self {
            username: username.into(),
            is_staff,
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Whether the user holds administrative privilege.
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }
}

/// Who is making a request, as far as credentials tell us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No credentials were presented.
    Anonymous,
    /// Credentials were presented but are malformed or unknown.
    Rejected,
    /// Credentials resolved to a user.
    Authenticated(Principal),
}

/// The per-operation policy table.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Capability required for `operation`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{AccessPolicy, Capability, Operation};
    ///
    /// assert_eq!(AccessPolicy::required(Operation::List), Capability::Public);
    /// assert_eq!(AccessPolicy::required(Operation::Delete), Capability::Staff);
    /// ```
    #[must_use]
    pub const fn required(operation: Operation) -> Capability {
        match operation {
            Operation::List | Operation::Retrieve => Capability::Public,
            Operation::Create | Operation::Update | Operation::Delete => Capability::Staff,
        }
    }

    /// Check that `caller` may perform `operation`.
    ///
    /// # Errors
    /// [`Error::unauthorized`] for anonymous or rejected callers on a staff
    /// operation, [`Error::forbidden`] for authenticated non-staff callers.
    pub fn authorize(operation: Operation, caller: &Caller) -> Result<(), Error> {
        match (Self::required(operation), caller) {
            (Capability::Public, _) => Ok(()),
            (Capability::Staff, Caller::Anonymous) => Err(Error::unauthorized(
                "authentication credentials were not provided",
            )),
            (Capability::Staff, Caller::Rejected) => Err(Error::unauthorized("invalid token")),
            (Capability::Staff, Caller::Authenticated(principal)) if principal.is_staff() => {
                Ok(())
            }
            (Capability::Staff, Caller::Authenticated(_)) => Err(Error::forbidden(
                "you do not have permission to perform this action",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn staff() -> Caller {
        Caller::Authenticated(Principal::new("librarian", true))
    }

    fn reader() -> Caller {
        Caller::Authenticated(Principal::new("reader", false))
    }

    #[rstest]
    #[case(Operation::List)]
    #[case(Operation::Retrieve)]
    fn public_operations_admit_everyone(#[case] operation: Operation) {
        for caller in [Caller::Anonymous, Caller::Rejected, reader(), staff()] {
            assert!(AccessPolicy::authorize(operation, &caller).is_ok());
        }
    }

    #[rstest]
    #[case(Operation::Create)]
    #[case(Operation::Update)]
    #[case(Operation::Delete)]
    fn writes_follow_credential_precedence(#[case] operation: Operation) {
        let code = |caller: Caller| {
            AccessPolicy::authorize(operation, &caller)
                .err()
                .map(|err| err.code())
        };

        assert_eq!(code(Caller::Anonymous), Some(ErrorCode::Unauthorized));
        assert_eq!(code(Caller::Rejected), Some(ErrorCode::Unauthorized));
        assert_eq!(code(reader()), Some(ErrorCode::Forbidden));
        assert_eq!(code(staff()), None);
    }

    #[rstest]
    #[case("")]
    #[case("two words")]
    #[case("tab\there")]
    fn access_token_rejects_blank_or_spaced_keys(#[case] key: &str) {
        assert!(AccessToken::parse(key).is_none());
    }

    #[rstest]
    fn access_token_debug_hides_key() {
        let token = AccessToken::parse("9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b").expect("valid");
        assert_eq!(format!("{token:?}"), "AccessToken(..)");
        assert_eq!(token.expose(), "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b");
    }
}
