//! Resident sign-up and sign-in.
//!
//! Sign-up inserts the user and, when a room is named, resolves the room and
//! registers membership in the same unit of work as the insert.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use super::membership::ensure_member;
use super::ports::{
    AccountCommand, AccountRegistration, AccountRegistry, AccountRegistryError,
    CredentialHasher, CredentialHasherError, FacilityStoreError, FacilityTransaction,
    SignInRequest, SignUpRequest, UserInsert, UserRepository,
};
use super::request_ledger::map_user_error;
use super::room_resolver::{RoomResolutionError, resolve_location};
use super::user::PASSWORD_MIN_LENGTH;
use super::{
    Block, EmailAddress, Error, PasswordDigest, RoomHint, RoomNumber, User, UserId,
    UserValidationError,
};

fn store_error(error: FacilityStoreError, email: &EmailAddress) -> AccountRegistryError {
    match error {
        FacilityStoreError::EmailTaken => AccountRegistryError::email_taken(email.to_string()),
        FacilityStoreError::Connection { message } => AccountRegistryError::connection(message),
        FacilityStoreError::Query { message } => AccountRegistryError::query(message),
        other @ FacilityStoreError::ActiveRequestConflict => {
            AccountRegistryError::query(other.to_string())
        }
    }
}

/// Insert the user, then join the requested room when one is named.
///
/// Any error must abort the surrounding transaction.
pub async fn register_account(
    tx: &mut dyn FacilityTransaction,
    registration: &AccountRegistration,
) -> Result<User, AccountRegistryError> {
    let email = &registration.user.email;
    let user = tx
        .insert_user(&registration.user)
        .await
        .map_err(|err| store_error(err, email))?;

    if let Some((room_number, block)) = registration.room.as_ref() {
        let room = resolve_location(tx, block, room_number)
            .await
            .map_err(|err| match err {
                RoomResolutionError::Conflict { block, room_number } => {
                    AccountRegistryError::room_conflict(block.as_str(), room_number.as_str())
                }
                RoomResolutionError::Store(store) => store_error(store, email),
                other => AccountRegistryError::query(other.to_string()),
            })?;
        ensure_member(tx, &room, user.id())
            .await
            .map_err(|err| store_error(err, email))?;
    }

    Ok(user)
}

fn invalid_field(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn map_registry_error(error: AccountRegistryError) -> Error {
    match error {
        AccountRegistryError::EmailTaken { email } => {
            Error::conflict("Email is already registered").with_details(json!({ "email": email }))
        }
        AccountRegistryError::RoomConflict { block, room_number } => {
            warn!(%block, %room_number, "room creation raced a concurrent sign-up");
            Error::service_unavailable("Room is being created concurrently; retry the request")
        }
        AccountRegistryError::Connection { message } => {
            error!(%message, "account registry unavailable");
            Error::service_unavailable("account store unavailable")
        }
        AccountRegistryError::Query { message } => {
            error!(%message, "account registry query failed");
            Error::internal(format!("account registry error: {message}"))
        }
    }
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    error!(error = %error, "credential hashing failed");
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Validated sign-up form.
struct SignUpForm {
    name: String,
    email: EmailAddress,
    password: String,
    phone: Option<String>,
    room_hint: RoomHint,
    room: Option<(RoomNumber, Block)>,
}

impl TryFrom<SignUpRequest> for SignUpForm {
    type Error = Error;

    fn try_from(request: SignUpRequest) -> Result<Self, Self::Error> {
        let name = request.name.trim().to_owned();
        if name.is_empty() {
            return Err(invalid_field("name", UserValidationError::EmptyName.to_string()));
        }
        let email = EmailAddress::new(&request.email)
            .map_err(|err| invalid_field("email", err.to_string()))?;
        if request.password.chars().count() < PASSWORD_MIN_LENGTH {
            let err = UserValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            };
            return Err(invalid_field("password", err.to_string()));
        }

        let room_number = non_blank(request.room_number.as_deref())
            .map(RoomNumber::new)
            .transpose()
            .map_err(|err| invalid_field("roomNumber", err.to_string()))?;
        let block = non_blank(request.block.as_deref())
            .map(Block::new)
            .transpose()
            .map_err(|err| invalid_field("block", err.to_string()))?;
        let room = match (&room_number, &block) {
            (Some(number), Some(block)) => Some((number.clone(), block.clone())),
            (Some(_), None) => {
                return Err(invalid_field("block", "block is required with a room number"));
            }
            _ => None,
        };

        Ok(Self {
            name,
            email,
            password: request.password,
            phone: non_blank(request.phone.as_deref()).map(str::to_owned),
            room_hint: RoomHint { block, room_number },
            room,
        })
    }
}

/// [`AccountCommand`] implementation.
#[derive(Clone)]
pub struct AccountService<R, U, H> {
    registry: Arc<R>,
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<R, U, H> AccountService<R, U, H> {
    pub fn new(registry: Arc<R>, users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            registry,
            users,
            hasher,
        }
    }
}

impl<R, U, H> AccountService<R, U, H>
where
    H: CredentialHasher + 'static,
{
    // CPU-bound; runs on the blocking pool.
    async fn hash(&self, password: String) -> Result<PasswordDigest, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    async fn verify(&self, password: String, digest: PasswordDigest) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|err| Error::internal(format!("verification task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<R, U, H> AccountCommand for AccountService<R, U, H>
where
    R: AccountRegistry,
    U: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<User, Error> {
        let form = SignUpForm::try_from(request)?;

        if self
            .users
            .find_by_email(&form.email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(map_registry_error(AccountRegistryError::email_taken(
                form.email.to_string(),
            )));
        }

        let digest = self.hash(form.password).await?;
        let registration = AccountRegistration {
            user: UserInsert {
                id: UserId::random(),
                name: form.name,
                email: form.email,
                digest,
                phone: form.phone,
                room_hint: form.room_hint,
            },
            room: form.room,
        };

        let user = self
            .registry
            .register(registration)
            .await
            .map_err(map_registry_error)?;
        info!(user_id = %user.id(), "resident signed up");
        Ok(user)
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<User, Error> {
        let Ok(email) = EmailAddress::new(&request.email) else {
            return Err(invalid_credentials());
        };
        let Some(credentials) = self
            .users
            .find_credentials(&email)
            .await
            .map_err(map_user_error)?
        else {
            return Err(invalid_credentials());
        };

        if !self.verify(request.password, credentials.digest).await? {
            return Err(invalid_credentials());
        }
        info!(user_id = %credentials.user.id(), "resident signed in");
        Ok(credentials.user)
    }
}
