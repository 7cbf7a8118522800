//! Request Assertions
//!
//! Reusable assertions for domain objects and identifiers arriving in
//! requests. Every function returns a shared, prebuilt [`Assertion`]; cloning
//! one only bumps a reference count.
//!
//! ```rust,ignore
//! use aroma_data::domain::services::request_assertions::valid_user;
//!
//! valid_user().check(&user)?;            // entity known to be present
//! valid_user().check_present(maybe_user)?; // absent entities fail
//! ```

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::domain::entities::{
    AndroidDevice, Application, AuthenticationToken, IosDevice, Message, MobileDevice,
    Organization, Reaction, User,
};
use crate::domain::value_objects::{Image, LengthOfTime, TimeUnit};
use crate::shared::validation::{
    all_of, each, field, non_empty_collection, non_empty_string, required_field, valid_enum_member,
    valid_uuid, Assertion,
};

pub use crate::shared::validation::is_null_or_empty;

/// A non-empty identifier that parses as a UUID.
pub fn valid_id() -> Assertion<str> {
    static ASSERTION: Lazy<Assertion<str>> = Lazy::new(valid_uuid);
    ASSERTION.clone()
}

pub fn valid_application_id() -> Assertion<str> {
    valid_id()
}

pub fn valid_message_id() -> Assertion<str> {
    valid_id()
}

pub fn valid_user_id() -> Assertion<str> {
    valid_id()
}

pub fn valid_org_id() -> Assertion<str> {
    valid_id()
}

/// The value is greater than zero and its unit is set.
pub fn positive_duration() -> Assertion<LengthOfTime> {
    static ASSERTION: Lazy<Assertion<LengthOfTime>> = Lazy::new(|| {
        all_of(
            "positive length of time",
            vec![
                required_field(
                    "unit",
                    |time: &LengthOfTime| time.unit.as_ref(),
                    valid_enum_member(TimeUnit::ALL),
                ),
                field(
                    "value",
                    |time: &LengthOfTime| &time.value,
                    Assertion::that("is positive", |value: &i64| *value > 0),
                ),
            ],
        )
    });
    ASSERTION.clone()
}

/// A valid application ID and at least one owner, all of them valid IDs.
pub fn valid_application() -> Assertion<Application> {
    static ASSERTION: Lazy<Assertion<Application>> = Lazy::new(|| {
        all_of(
            "valid application",
            vec![
                field(
                    "application_id",
                    |app: &Application| app.application_id.as_str(),
                    valid_id(),
                ),
                field(
                    "owners",
                    |app: &Application| &app.owners,
                    non_empty_collection(),
                ),
                field(
                    "owners",
                    |app: &Application| &app.owners,
                    each::<BTreeSet<String>, String, str>(valid_id()),
                ),
            ],
        )
    });
    ASSERTION.clone()
}

pub fn valid_user() -> Assertion<User> {
    static ASSERTION: Lazy<Assertion<User>> = Lazy::new(|| {
        field("user_id", |user: &User| user.user_id.as_str(), valid_id())
    });
    ASSERTION.clone()
}

pub fn valid_message() -> Assertion<Message> {
    static ASSERTION: Lazy<Assertion<Message>> = Lazy::new(|| {
        all_of(
            "valid message",
            vec![
                field(
                    "message_id",
                    |message: &Message| message.message_id.as_str(),
                    valid_id(),
                ),
                field(
                    "application_id",
                    |message: &Message| message.application_id.as_str(),
                    valid_id(),
                ),
            ],
        )
    });
    ASSERTION.clone()
}

/// A valid organization ID, a name, and valid owner IDs.
///
/// Owners are not required; an organization without any passes.
pub fn valid_organization() -> Assertion<Organization> {
    static ASSERTION: Lazy<Assertion<Organization>> = Lazy::new(|| {
        all_of(
            "valid organization",
            vec![
                field(
                    "organization_id",
                    |org: &Organization| org.organization_id.as_str(),
                    valid_id(),
                ),
                required_field(
                    "organization_name",
                    |org: &Organization| org.organization_name.as_deref(),
                    non_empty_string(),
                ),
                field(
                    "owners",
                    |org: &Organization| &org.owners,
                    each::<Vec<String>, String, str>(valid_id()),
                ),
            ],
        )
    });
    ASSERTION.clone()
}

pub fn token_containing_owner_id() -> Assertion<AuthenticationToken> {
    static ASSERTION: Lazy<Assertion<AuthenticationToken>> = Lazy::new(|| {
        required_field(
            "owner_id",
            |token: &AuthenticationToken| token.owner_id.as_deref(),
            non_empty_string(),
        )
    });
    ASSERTION.clone()
}

pub fn valid_android_device() -> Assertion<AndroidDevice> {
    static ASSERTION: Lazy<Assertion<AndroidDevice>> = Lazy::new(|| {
        field(
            "registration_id",
            |device: &AndroidDevice| device.registration_id.as_str(),
            non_empty_string(),
        )
    });
    ASSERTION.clone()
}

pub fn valid_ios_device() -> Assertion<IosDevice> {
    static ASSERTION: Lazy<Assertion<IosDevice>> = Lazy::new(|| {
        field(
            "device_token",
            |device: &IosDevice| &device.device_token,
            non_empty_collection(),
        )
    });
    ASSERTION.clone()
}

/// Dispatches to the platform-specific device assertion.
pub fn valid_mobile_device() -> Assertion<MobileDevice> {
    static ASSERTION: Lazy<Assertion<MobileDevice>> = Lazy::new(|| {
        let android = valid_android_device();
        let ios = valid_ios_device();
        Assertion::new("valid mobile device", move |device: &MobileDevice| match device {
            MobileDevice::Android(device) => android.check(device),
            MobileDevice::Ios(device) => ios.check(device),
        })
    });
    ASSERTION.clone()
}

pub fn valid_length_of_time() -> Assertion<LengthOfTime> {
    positive_duration()
}

/// Any present reaction is accepted, including an empty one.
pub fn valid_reaction() -> Assertion<Reaction> {
    static ASSERTION: Lazy<Assertion<Reaction>> =
        Lazy::new(|| Assertion::that("is a reaction", |_: &Reaction| true));
    ASSERTION.clone()
}

/// An image must carry data. Type and dimension are optional metadata.
pub fn valid_image() -> Assertion<Image> {
    static ASSERTION: Lazy<Assertion<Image>> =
        Lazy::new(|| field("data", |image: &Image| &image.data, non_empty_collection()));
    ASSERTION.clone()
}
