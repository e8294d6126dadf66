//! Service wiring over in-memory stores and a manual clock.

use std::sync::Arc;

use chrono::{Duration, Utc};

use leavedesk_auth::jwt::{JwtDecoder, JwtEncoder};
use leavedesk_auth::password::{PasswordHasher, PasswordValidator};
use leavedesk_auth::rbac::RbacEnforcer;
use leavedesk_core::config::AuthConfig;
use leavedesk_core::traits::{Clock, ManualClock};
use leavedesk_database::Stores;
use leavedesk_entity::identity::{NewIdentity, Role};

use crate::admin::{AnalyticsService, UserAdminService};
use crate::context::RequestContext;
use crate::identity::IdentityService;
use crate::leave::LeaveService;
use crate::ticket::TicketService;

pub(crate) struct Harness {
    pub clock: ManualClock,
    pub stores: Stores,
    pub identity: Arc<IdentityService>,
    pub leave: Arc<LeaveService>,
    pub ticket: Arc<TicketService>,
    pub users: Arc<UserAdminService>,
    pub analytics: Arc<AnalyticsService>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = ManualClock::new(Utc::now());
        let dyn_clock: Arc<dyn Clock> = Arc::new(clock.clone());
        let stores = Stores::memory();
        let auth = AuthConfig::default();
        let rbac = Arc::new(RbacEnforcer::new());

        let identity = Arc::new(IdentityService::new(
            stores.identities.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&auth)),
            Arc::new(JwtEncoder::new(&auth, dyn_clock.clone())),
            Arc::new(JwtDecoder::new(&auth, dyn_clock.clone())),
            rbac.clone(),
            dyn_clock.clone(),
        ));
        let leave = Arc::new(LeaveService::new(
            stores.leaves.clone(),
            rbac.clone(),
            dyn_clock.clone(),
            Duration::hours(48),
        ));
        let ticket = Arc::new(TicketService::new(
            stores.tickets.clone(),
            rbac.clone(),
            dyn_clock.clone(),
        ));
        let users = Arc::new(UserAdminService::new(
            stores.identities.clone(),
            identity.clone(),
            rbac.clone(),
        ));
        let analytics = Arc::new(AnalyticsService::new(
            stores.identities.clone(),
            stores.leaves.clone(),
            rbac,
            dyn_clock,
        ));

        Self {
            clock,
            stores,
            identity,
            leave,
            ticket,
            users,
            analytics,
        }
    }

    /// Insert an identity directly and return a context acting as it.
    pub async fn context(&self, role: Role, email: &str) -> RequestContext {
        let name = email.split('@').next().unwrap_or(email).to_string();
        let identity = self
            .stores
            .identities
            .insert(
                NewIdentity {
                    name,
                    email: email.into(),
                    password_hash: PasswordHasher::new().hash_password("secret1").unwrap(),
                    role,
                },
                self.clock.now(),
            )
            .await
            .unwrap()
            .expect("unique email");
        RequestContext::for_identity(&identity, self.clock.now())
    }
}
