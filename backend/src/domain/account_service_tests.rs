//! Tests for the account service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::domain::{ErrorCode, PasswordHash, Username};

const STORED_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";

fn account(id: i64, username: &str, is_admin: bool) -> UserAccount {
    UserAccount {
        user: User::new(
            UserId::new(id),
            Username::new(username).expect("valid username"),
            is_admin,
        ),
        password_hash: PasswordHash::new(STORED_HASH),
    }
}

#[fixture]
fn hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordHash::new(STORED_HASH)));
    hasher
        .expect_verify()
        .returning(|password, _| Ok(password == "correct"));
    hasher
}

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
) -> AccountService<MockUserRepository, MockPasswordHasher> {
    AccountService::new(Arc::new(users), Arc::new(hasher))
}

fn registration(username: &str) -> Registration {
    Registration::try_from_parts(username, "correct").expect("valid registration")
}

#[rstest]
#[tokio::test]
async fn register_creates_non_admin_account(hasher: MockPasswordHasher) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .times(1)
        .withf(|account| account.username.as_ref() == "ada" && !account.is_admin)
        .returning(|account| {
            Ok(UserAccount {
                user: User::new(UserId::new(1), account.username.clone(), account.is_admin),
                password_hash: account.password_hash.clone(),
            })
        });

    let user = service(users, hasher)
        .register(&registration("ada"))
        .await
        .expect("registration succeeds");
    assert_eq!(user.id(), UserId::new(1));
    assert!(!user.is_admin());
}

#[rstest]
#[tokio::test]
async fn register_rejects_taken_username(hasher: MockPasswordHasher) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|name| Ok(Some(account(3, name, false))));
    users.expect_create().times(0);

    let error = service(users, hasher)
        .register(&registration("ada"))
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Username already taken");
}

#[rstest]
#[tokio::test]
async fn register_maps_racing_duplicate_to_conflict(hasher: MockPasswordHasher) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .returning(|_| Err(UserRepositoryError::duplicate_username("ada")));

    let error = service(users, hasher)
        .register(&registration("ada"))
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case("ada", "correct", true)]
#[case("ada", "wrong", false)]
#[case("nobody", "correct", false)]
#[tokio::test]
async fn authenticate_checks_user_and_password(
    hasher: MockPasswordHasher,
    #[case] username: &str,
    #[case] password: &str,
    #[case] should_succeed: bool,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|name| Ok((name == "ada").then(|| account(1, "ada", false))));

    let creds = LoginCredentials::try_from_parts(username, password).expect("credentials shape");
    let result = service(users, hasher).authenticate(&creds).await;
    match (should_succeed, result) {
        (true, Ok(user)) => assert_eq!(user.username().as_ref(), "ada"),
        (false, Err(err)) => {
            assert_eq!(err.code(), ErrorCode::Unauthorized);
            assert_eq!(err.message(), "invalid credentials");
        }
        (true, Err(err)) => panic!("expected success, got error: {err:?}"),
        (false, Ok(user)) => panic!("expected failure, got success: {user:?}"),
    }
}

#[rstest]
#[case(UserRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserRepositoryError::query("broken"), ErrorCode::InternalError)]
#[tokio::test]
async fn authenticate_maps_repository_failures(
    hasher: MockPasswordHasher,
    #[case] failure: UserRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(move |_| Err(failure));

    let creds = LoginCredentials::try_from_parts("ada", "correct").expect("credentials shape");
    let error = service(users, hasher)
        .authenticate(&creds)
        .await
        .expect_err("repository failure");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn current_user_requires_existing_account(hasher: MockPasswordHasher) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(UserId::new(5)))
        .returning(|_| Ok(None));

    let error = service(users, hasher)
        .current_user(UserId::new(5))
        .await
        .expect_err("unknown user");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn ensure_admin_creates_missing_admin(hasher: MockPasswordHasher) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .times(1)
        .withf(|account| account.is_admin)
        .returning(|account| {
            Ok(UserAccount {
                user: User::new(UserId::new(1), account.username.clone(), true),
                password_hash: account.password_hash.clone(),
            })
        });

    let admin = service(users, hasher)
        .ensure_admin(&registration("root"))
        .await
        .expect("bootstrap succeeds");
    assert!(admin.is_admin());
}

#[rstest]
#[tokio::test]
async fn ensure_admin_keeps_existing_account(hasher: MockPasswordHasher) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|_| Ok(Some(account(4, "root", true))));
    users.expect_create().times(0);

    let admin = service(users, hasher)
        .ensure_admin(&registration("root"))
        .await
        .expect("bootstrap succeeds");
    assert_eq!(admin.id(), UserId::new(4));
}
