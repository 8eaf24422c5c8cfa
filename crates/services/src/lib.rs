#![forbid(unsafe_code)]

pub mod access;
pub mod app_services;
pub mod error;
pub mod identity;
pub mod roster;
pub mod session;

pub use academy_core::Clock;

pub use access::AdminPolicy;
pub use app_services::AppServices;
pub use error::{AppServicesError, AuthError, RosterError, SessionError};
pub use identity::{
    Credentials, IdentityProvider, IdentitySubscription, LocalIdentityProvider, SubscriptionClosed,
};
pub use roster::{RosterEntry, RosterService};
pub use session::{Learner, LessonCompletion, SessionController, SessionSnapshot, View};
