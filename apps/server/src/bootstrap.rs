//! # First-Run Bootstrap
//!
//! Guarantees an administrator account exists the first time the system is
//! used.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/auth/first-run                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  any identity? ── yes ──► { show_default_credentials: false }          │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  seed_admin()                       (also POST /functions/v1/seed-admin)│
//! │    1. any identity? ── yes ──► AlreadySeeded                            │
//! │    2. delete orphaned profiles                                          │
//! │    3. create admin@admin.com / admin1, email pre-confirmed              │
//! │       │            │                                                    │
//! │       │            └─ error ──► Failed(message), logged, not retried    │
//! │       ▼                                                                 │
//! │  { show_default_credentials: true, credentials: {...} }                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Race
//! The existence check and the insert are separate statements. Two first
//! loads can both see "no users"; the loser hits the unique email constraint
//! and reports `Failed`. No second account is ever created.

use inventory_core::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME, DEFAULT_ADMIN_PASSWORD};
use inventory_db::{Database, DbResult, NewIdentity};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::auth::hash_password;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadySeeded,
    Failed(String),
}

impl SeedOutcome {
    /// JSON body returned by the function endpoint.
    pub fn to_body(&self) -> Value {
        match self {
            SeedOutcome::Created => json!({ "created": true }),
            SeedOutcome::AlreadySeeded => {
                json!({ "created": false, "message": "Admin already exists" })
            }
            SeedOutcome::Failed(message) => json!({ "created": false, "error": message }),
        }
    }
}

/// Provisions the default administrator when no identity exists.
///
/// ## Returns
/// * `Err(_)` - the existence check or orphan cleanup could not run
/// * `Ok(SeedOutcome::Failed)` - provisioning itself was rejected
pub async fn seed_admin(db: &Database) -> DbResult<SeedOutcome> {
    if db.identities().any_exists().await? {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    db.profiles().delete_orphans().await?;

    let password_hash = match hash_password(DEFAULT_ADMIN_PASSWORD) {
        Ok(hash) => hash,
        Err(e) => return Ok(SeedOutcome::Failed(e.to_string())),
    };

    let admin = NewIdentity {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        full_name: DEFAULT_ADMIN_NAME.to_string(),
        confirmed: true,
    };

    match db.identities().create(&admin).await {
        Ok(identity) => {
            info!(user_id = %identity.id, "Default administrator provisioned");
            Ok(SeedOutcome::Created)
        }
        Err(e) => {
            warn!(error = %e, "Default administrator provisioning failed");
            Ok(SeedOutcome::Failed(e.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultCredentials {
    pub email: &'static str,
    pub password: &'static str,
}

/// What the sign-in screen needs on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstRun {
    pub show_default_credentials: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<DefaultCredentials>,
}

impl FirstRun {
    fn hidden() -> Self {
        FirstRun {
            show_default_credentials: false,
            credentials: None,
        }
    }
}

/// Sign-in screen check. Never fails: every error degrades to "no banner".
pub async fn first_run(db: &Database) -> FirstRun {
    match db.identities().any_exists().await {
        Ok(true) => return FirstRun::hidden(),
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "First-run user check failed");
            return FirstRun::hidden();
        }
    }

    match seed_admin(db).await {
        Ok(SeedOutcome::Created) => FirstRun {
            show_default_credentials: true,
            credentials: Some(DefaultCredentials {
                email: DEFAULT_ADMIN_EMAIL,
                password: DEFAULT_ADMIN_PASSWORD,
            }),
        },
        Ok(outcome) => {
            warn!(?outcome, "First-run bootstrap did not create an account");
            FirstRun::hidden()
        }
        Err(e) => {
            error!(error = %e, "First-run bootstrap failed");
            FirstRun::hidden()
        }
    }
}
