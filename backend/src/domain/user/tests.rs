//! Tests for the resident identity model.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn draft() -> UserDraft {
    UserDraft {
        id: UserId::random(),
        name: "  Ada Lovelace ".to_owned(),
        email: EmailAddress::new("ada@example.org").expect("valid email"),
        phone: Some("   ".to_owned()),
        room_hint: RoomHint::default(),
        created_at: Utc::now(),
    }
}

#[rstest]
#[case("ada@example.org", "ada@example.org")]
#[case("  Ada@Example.ORG\t", "ada@example.org")]
fn email_is_trimmed_and_lowercased(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@example.org")]
#[case("ada@")]
#[case("ada@x@y")]
fn malformed_email_is_rejected(#[case] raw: &str) {
    assert_eq!(EmailAddress::new(raw), Err(UserValidationError::InvalidEmail));
}

#[rstest]
fn user_id_rejects_garbage() {
    assert_eq!(UserId::new("abc"), Err(UserValidationError::InvalidId));
}

#[rstest]
fn user_trims_name_and_drops_blank_phone(draft: UserDraft) {
    let user = User::new(draft).expect("valid user");
    assert_eq!(user.name(), "Ada Lovelace");
    assert!(user.phone().is_none());
}

#[rstest]
fn user_rejects_blank_name(mut draft: UserDraft) {
    draft.name = "   ".to_owned();
    assert_eq!(User::new(draft), Err(UserValidationError::EmptyName));
}

#[rstest]
fn password_digest_debug_is_redacted() {
    let digest = PasswordDigest::new("$argon2id$secret");
    assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
}
