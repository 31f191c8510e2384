//! Tests for the account service using mocked ports.

use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockCredentialHasher, MockTokenService, MockUserRepository};
use crate::domain::{AccessToken, EmailAddress, PersonName};

const USER_ID: &str = "11111111-1111-1111-1111-111111111111";

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixture_now()
    }
}

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn user() -> User {
    User::new(
        UserId::new(USER_ID).expect("fixture id"),
        PersonName::new("Ada").expect("fixture name"),
        EmailAddress::new("ada@example.com").expect("fixture email"),
        fixture_now(),
    )
}

fn stored(user: &User) -> StoredAccount {
    StoredAccount {
        user: user.clone(),
        password: PasswordDigest::new("digest"),
    }
}

fn issuing_tokens() -> MockTokenService {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .returning(|user, _| Ok(AccessToken::new(format!("token-for-{user}"))));
    tokens
}

fn matching_hasher(matches: bool) -> MockCredentialHasher {
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordDigest::new("digest")));
    hasher.expect_verify().returning(move |_, _| Ok(matches));
    hasher
}

fn service(
    users: MockUserRepository,
    hasher: MockCredentialHasher,
    tokens: MockTokenService,
) -> AccountService {
    AccountService::new(
        Arc::new(users),
        Arc::new(hasher),
        Arc::new(tokens),
        Arc::new(FixtureClock),
    )
}

fn registration() -> Registration {
    Registration::try_from_parts("Ada", "Ada@Example.com", "secret").expect("valid registration")
}

#[rstest]
#[tokio::test]
async fn register_creates_account_and_issues_token() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|account| {
            account.user.email().as_ref() == "ada@example.com"
                && account.password.as_str() == "digest"
        })
        .times(1)
        .returning(|_| Ok(()));

    let session = service(users, matching_hasher(true), issuing_tokens())
        .register(registration())
        .await
        .expect("registration succeeds");

    assert_eq!(session.user.name().as_ref(), "Ada");
    assert_eq!(session.user.created_at(), fixture_now());
    assert_eq!(
        session.token.as_str(),
        format!("token-for-{}", session.user.id())
    );
}

#[rstest]
#[tokio::test]
async fn register_rejects_taken_email(user: User) {
    let mut users = MockUserRepository::new();
    let existing = stored(&user);
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(existing.clone())));
    users.expect_create().never();

    let err = service(users, matching_hasher(true), MockTokenService::new())
        .register(registration())
        .await
        .expect_err("duplicate must fail");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), USER_EXISTS);
}

#[rstest]
#[tokio::test]
async fn register_maps_racing_duplicate_to_user_exists() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .returning(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));

    let err = service(users, matching_hasher(true), MockTokenService::new())
        .register(registration())
        .await
        .expect_err("duplicate must fail");

    assert_eq!(err.message(), USER_EXISTS);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn login_checks_password(
    #[case] matches: bool,
    #[case] expected_error: Option<ErrorCode>,
    user: User,
) {
    let mut users = MockUserRepository::new();
    let existing = stored(&user);
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(existing.clone())));
    let credentials =
        LoginCredentials::try_from_parts("ada@example.com", "secret").expect("valid credentials");

    let result = service(users, matching_hasher(matches), issuing_tokens())
        .login(credentials)
        .await;

    match (expected_error, result) {
        (None, Ok(session)) => assert_eq!(session.user.id(), user.id()),
        (Some(code), Err(err)) => {
            assert_eq!(err.code(), code);
            assert_eq!(err.message(), INVALID_CREDENTIALS);
        }
        (expected, actual) => panic!("expected {expected:?}, got {actual:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn login_with_unknown_email_is_unauthorized() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_verify().never();
    let credentials =
        LoginCredentials::try_from_parts("who@example.com", "secret").expect("valid credentials");

    let err = service(users, hasher, MockTokenService::new())
        .login(credentials)
        .await
        .expect_err("unknown email must fail");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

#[rstest]
#[tokio::test]
async fn update_profile_renames_and_rehashes(user: User) {
    let mut users = MockUserRepository::new();
    let existing = user.clone();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    users
        .expect_update()
        .withf(|user, password| {
            user.name().as_ref() == "Countess" && password.as_ref().map(PasswordDigest::as_str) == Some("digest")
        })
        .times(1)
        .returning(|_, _| Ok(true));
    let update = ProfileUpdate::try_from_parts(Some("Countess"), Some("new-secret"))
        .expect("valid update");

    let updated = service(users, matching_hasher(true), MockTokenService::new())
        .update_profile(user.id(), update)
        .await
        .expect("update succeeds");

    assert_eq!(updated.name().as_ref(), "Countess");
    assert_eq!(updated.email(), user.email());
}

#[rstest]
#[tokio::test]
async fn update_profile_for_missing_user_is_not_found(user: User) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    users.expect_update().never();

    let err = service(users, MockCredentialHasher::new(), MockTokenService::new())
        .update_profile(user.id(), ProfileUpdate::default())
        .await
        .expect_err("missing user must fail");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn current_user_maps_connection_failures() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Err(UserPersistenceError::connection("refused")));
    let user_id = UserId::new(USER_ID).expect("fixture id");

    let err = service(users, MockCredentialHasher::new(), MockTokenService::new())
        .current_user(&user_id)
        .await
        .expect_err("store failure must surface");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
fn authenticate_returns_token_subject() {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_verify()
        .withf(|token, now| token == "good" && *now == fixture_now())
        .returning(|_, _| Ok(UserId::new(USER_ID).expect("fixture id")));

    let user_id = service(MockUserRepository::new(), MockCredentialHasher::new(), tokens)
        .authenticate("good")
        .expect("token verifies");

    assert_eq!(user_id.as_ref(), USER_ID);
}

#[rstest]
#[case(TokenError::expired())]
#[case(TokenError::invalid("bad signature"))]
fn authenticate_rejects_bad_tokens(#[case] failure: TokenError) {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_verify()
        .returning(move |_, _| Err(failure.clone()));

    let err = service(MockUserRepository::new(), MockCredentialHasher::new(), tokens)
        .authenticate("bad")
        .expect_err("token must be rejected");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), TOKEN_FAILED);
}
