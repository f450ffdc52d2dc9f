use anyhow::anyhow;
use chrono::{DateTime, TimeZone, Utc};
use folio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactValidationError,
};
use folio_models::contact::{ContactField, ContactMessage, ContactSubmission};
use folio_persistence_contracts::contact::MockContactMessageRepository;
use folio_shared_contracts::time::MockTimeService;
use folio_utils::assert_matches;
use pretty_assertions::assert_eq;

use crate::ContactFeatureServiceImpl;

type Sut = ContactFeatureServiceImpl<MockTimeService, MockContactMessageRepository>;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
}

fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
    ContactSubmission {
        name: Some(name.into()),
        email: Some(email.into()),
        message: Some(message.into()),
    }
}

fn alice() -> ContactMessage {
    ContactMessage {
        name: "Alice".try_into().unwrap(),
        email: "a@x.com".try_into().unwrap(),
        message: "Hi".try_into().unwrap(),
        submitted_at: now(),
    }
}

#[tokio::test]
async fn ok() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let contact_repo = MockContactMessageRepository::new().with_create(alice(), Ok(()));

    let sut = Sut::new(time, contact_repo);

    // Act
    let result = sut
        .submit_message(submission("Alice", "a@x.com", "Hi"))
        .await;

    // Assert
    assert_eq!(result.unwrap(), alice());
}

#[tokio::test]
async fn ok_trims_fields() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let contact_repo = MockContactMessageRepository::new().with_create(alice(), Ok(()));

    let sut = Sut::new(time, contact_repo);

    // Act
    let result = sut
        .submit_message(submission("  Alice ", "a@x.com\n", "\tHi"))
        .await;

    // Assert
    assert_eq!(result.unwrap(), alice());
}

#[tokio::test]
async fn empty_name() {
    // Arrange
    let sut = Sut::default();

    // Act
    let result = sut.submit_message(submission("", "a@x.com", "Hi")).await;

    // Assert
    assert_matches!(
        result,
        Err(ContactSubmitError::Validation(ContactValidationError::MissingFields(missing)))
            if *missing == [ContactField::Name]
    );
}

#[tokio::test]
async fn blank_message() {
    // Arrange
    let sut = Sut::default();

    // Act
    let result = sut
        .submit_message(submission("Alice", "a@x.com", "   "))
        .await;

    // Assert
    assert_matches!(
        result,
        Err(ContactSubmitError::Validation(ContactValidationError::MissingFields(missing)))
            if *missing == [ContactField::Message]
    );
}

#[tokio::test]
async fn missing_fields() {
    for (submission, expected) in [
        (
            ContactSubmission::default(),
            vec![ContactField::Name, ContactField::Email, ContactField::Message],
        ),
        (
            ContactSubmission {
                email: None,
                ..submission("Alice", "a@x.com", "Hi")
            },
            vec![ContactField::Email],
        ),
        (
            ContactSubmission {
                name: None,
                message: Some("".into()),
                ..submission("Alice", "a@x.com", "Hi")
            },
            vec![ContactField::Name, ContactField::Message],
        ),
    ] {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut.submit_message(submission).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Validation(ContactValidationError::MissingFields(missing)))
                if *missing == expected
        );
    }
}

#[tokio::test]
async fn ok_long_message() {
    // Arrange
    let text = "x".repeat(5000);
    let expected = ContactMessage {
        message: text.as_str().try_into().unwrap(),
        ..alice()
    };

    let time = MockTimeService::new().with_now(now());
    let contact_repo = MockContactMessageRepository::new().with_create(expected.clone(), Ok(()));

    let sut = Sut::new(time, contact_repo);

    // Act
    let result = sut
        .submit_message(submission("Alice", "a@x.com", &text))
        .await;

    // Assert
    assert_eq!(result.unwrap(), expected);
}

#[tokio::test]
async fn persistence_error() {
    // Arrange
    let time = MockTimeService::new().with_now(now());
    let contact_repo = MockContactMessageRepository::new()
        .with_create(alice(), Err(anyhow!("server selection timeout")));

    let sut = Sut::new(time, contact_repo);

    // Act
    let result = sut
        .submit_message(submission("Alice", "a@x.com", "Hi"))
        .await;

    // Assert
    assert_matches!(result, Err(ContactSubmitError::Persistence(_)));
}
