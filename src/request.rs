use std::marker::PhantomData;

use crate::access::grant::AccessGrant;
use crate::session::Session;

/// Typestate: request received, route policy not yet consulted.
pub struct Pending;

/// Typestate: route policy has been consulted for this request.
pub struct Checked;

/// A request progressing through access enforcement.
///
/// `AccessRequest<Pending>` → `access::evaluate` → `AccessRequest<Checked>`
///
/// `authorize()` only exists on `Checked` and needs an `AccessGrant`.
pub struct AccessRequest<State> {
    pub(crate) session: Session,
    pub(crate) path: String,
    _state: PhantomData<State>,
}

impl AccessRequest<Pending> {
    pub fn new(session: Session, path: &str) -> Self {
        Self {
            session,
            path: path.to_owned(),
            _state: PhantomData,
        }
    }

    /// Transition to Checked state. Only callable within the crate (by enforcement).
    pub(crate) fn transition(self) -> AccessRequest<Checked> {
        AccessRequest {
            session: self.session,
            path: self.path,
            _state: PhantomData,
        }
    }
}

impl<State> AccessRequest<State> {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl AccessRequest<Checked> {
    /// Hand the session to the route handler. Consumes the grant.
    pub fn authorize(self, _grant: AccessGrant) -> Session {
        self.session
    }
}
