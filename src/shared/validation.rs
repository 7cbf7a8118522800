//! Validation Utilities
//!
//! A small assertion engine. An [`Assertion`] is a named, reusable predicate
//! that either passes or fails with a [`FailedAssertion`]. Assertions are
//! immutable once built and cheap to clone, so a single instance can be shared
//! between threads and reused for every request.
//!
//! Whole-object assertions are built by lifting field assertions with
//! [`field`], [`required_field`] and [`optional_field`], then chaining them with
//! [`Assertion::and`] or [`all_of`]. Composition is fail-fast: the first
//! violation is returned and later checks never run.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;
use validator::ValidateEmail;

use super::error::FailedAssertion;

type Predicate<T> = dyn Fn(&T) -> Result<(), FailedAssertion> + Send + Sync;

/// A named predicate over a value of type `T`.
pub struct Assertion<T: ?Sized> {
    description: Cow<'static, str>,
    predicate: Arc<Predicate<T>>,
}

impl<T: ?Sized> Clone for Assertion<T> {
    fn clone(&self) -> Self {
        Self {
            description: self.description.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Assertion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("description", &self.description)
            .finish()
    }
}

impl<T: ?Sized + 'static> Assertion<T> {
    /// Build an assertion from a predicate that reports its own violations.
    pub fn new<F>(description: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&T) -> Result<(), FailedAssertion> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Build an assertion from a boolean test. The description doubles as the
    /// failure message.
    pub fn that<F>(description: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let description = description.into();
        let message = description.clone();
        Self::new(description, move |value| {
            if test(value) {
                Ok(())
            } else {
                Err(FailedAssertion::new(message.clone()))
            }
        })
    }

    /// What this assertion checks.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Check a value.
    pub fn check(&self, value: &T) -> Result<(), FailedAssertion> {
        (self.predicate)(value)
    }

    /// Check a value that may be absent. An absent value always fails.
    pub fn check_present(&self, value: Option<&T>) -> Result<(), FailedAssertion> {
        match value {
            Some(value) => self.check(value),
            None => Err(FailedAssertion::new(format!(
                "{}: value is missing",
                self.description
            ))),
        }
    }

    /// Run `self`, then `next` only if `self` passed.
    pub fn and(self, next: Assertion<T>) -> Assertion<T> {
        let description = format!("{} and {}", self.description, next.description);
        Assertion::new(description, move |value| {
            self.check(value)?;
            next.check(value)
        })
    }
}

/// Run every assertion in order, stopping at the first violation.
pub fn all_of<T: ?Sized + 'static>(
    description: impl Into<Cow<'static, str>>,
    assertions: Vec<Assertion<T>>,
) -> Assertion<T> {
    Assertion::new(description, move |value| {
        assertions
            .iter()
            .try_for_each(|assertion| assertion.check(value))
    })
}

/// Lift an assertion over a field into an assertion over its owner.
pub fn field<T, V>(name: &'static str, accessor: fn(&T) -> &V, assertion: Assertion<V>) -> Assertion<T>
where
    T: ?Sized + 'static,
    V: ?Sized + 'static,
{
    let description = format!("{} {}", name, assertion.description());
    Assertion::new(description, move |owner| {
        assertion
            .check(accessor(owner))
            .map_err(|violation| violation.in_field(name))
    })
}

/// Lift an assertion over an optional field. An unset field fails.
pub fn required_field<T, V>(
    name: &'static str,
    accessor: fn(&T) -> Option<&V>,
    assertion: Assertion<V>,
) -> Assertion<T>
where
    T: ?Sized + 'static,
    V: ?Sized + 'static,
{
    let description = format!("{} is set and {}", name, assertion.description());
    Assertion::new(description, move |owner| match accessor(owner) {
        Some(value) => assertion
            .check(value)
            .map_err(|violation| violation.in_field(name)),
        None => Err(FailedAssertion::new("field is not set").in_field(name)),
    })
}

/// Lift an assertion over an optional field. An unset field passes.
pub fn optional_field<T, V>(
    name: &'static str,
    accessor: fn(&T) -> Option<&V>,
    assertion: Assertion<V>,
) -> Assertion<T>
where
    T: ?Sized + 'static,
    V: ?Sized + 'static,
{
    let description = format!("{} is unset or {}", name, assertion.description());
    Assertion::new(description, move |owner| match accessor(owner) {
        Some(value) => assertion
            .check(value)
            .map_err(|violation| violation.in_field(name)),
        None => Ok(()),
    })
}

/// Every element of a collection must pass `element`.
pub fn each<C, T, E>(element: Assertion<E>) -> Assertion<C>
where
    C: ?Sized + 'static,
    T: AsRef<E> + 'static,
    E: ?Sized + 'static,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
{
    let description = format!("each element {}", element.description());
    Assertion::new(description, move |collection: &C| {
        collection
            .into_iter()
            .enumerate()
            .try_for_each(|(index, item)| {
                element
                    .check(item.as_ref())
                    .map_err(|violation| violation.in_field(&format!("[{}]", index)))
            })
    })
}

/// The string must contain at least one character.
pub fn non_empty_string() -> Assertion<str> {
    Assertion::that("is a non-empty string", |value: &str| !value.is_empty())
}

/// The string must be non-empty and a UUID in lowercase hyphenated
/// (8-4-4-4-12) form, the form identifiers are read back in.
pub fn valid_uuid() -> Assertion<str> {
    non_empty_string().and(Assertion::new("is a valid UUID", |value: &str| {
        match Uuid::parse_str(value) {
            Ok(id) if id.hyphenated().to_string() == value => Ok(()),
            Ok(_) => Err(FailedAssertion::new(format!(
                "'{}' is not a lowercase hyphenated UUID",
                value
            ))),
            Err(_) => Err(FailedAssertion::new(format!("'{}' is not a valid UUID", value))),
        }
    }))
}

/// The string must be a non-empty, structurally plausible email address.
pub fn valid_email() -> Assertion<str> {
    non_empty_string().and(Assertion::new("is a valid email", |value: &str| {
        if value.validate_email() {
            Ok(())
        } else {
            Err(FailedAssertion::new(format!("'{}' is not a valid email", value)))
        }
    }))
}

/// The collection must contain at least one element.
pub fn non_empty_collection<C>() -> Assertion<C>
where
    C: ?Sized + 'static,
    for<'a> &'a C: IntoIterator,
{
    Assertion::that("is a non-empty collection", |collection: &C| {
        collection.into_iter().next().is_some()
    })
}

/// The value must be one of `allowed`.
pub fn valid_enum_member<T>(allowed: impl IntoIterator<Item = T>) -> Assertion<T>
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    let allowed: Vec<T> = allowed.into_iter().collect();
    let description = format!("is one of {:?}", allowed);
    Assertion::new(description, move |value| {
        if allowed.contains(value) {
            Ok(())
        } else {
            Err(FailedAssertion::new(format!(
                "{:?} is not one of {:?}",
                value, allowed
            )))
        }
    })
}

/// Whether a string is absent or empty.
pub fn is_null_or_empty(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}
