//! User directory used to expand embedded user references.
//!
//! Listings often embed only a user id, or a user object without its
//! department. The directory fills those gaps from the user listing so that
//! department attribution can follow the assignee and creator paths.

use std::collections::HashMap;

use ticketdesk_core::directory::User;
use ticketdesk_core::types::RecordId;

use crate::models::common::RawUserField;

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    by_id: HashMap<String, User>,
}

impl UserDirectory {
    /// Index users by the string form of their id. Later duplicates win.
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        let by_id = users.into_iter().map(|u| (u.id.to_string(), u)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: &RecordId) -> Option<&User> {
        self.by_id.get(&id.to_string())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Turn an embedded user reference into a [`User`].
    ///
    /// Bare ids are looked up (falling back to an id-only user); expanded
    /// objects keep their own fields and borrow missing names and
    /// department from the directory. Objects without an id are dropped.
    pub fn resolve(&self, field: RawUserField) -> Option<User> {
        match field {
            RawUserField::Id(id) => Some(self.get(&id).cloned().unwrap_or_else(|| User::new(id))),
            RawUserField::Object(raw) => match raw.into_user() {
                Ok(user) => Some(self.complete(user)),
                Err(e) => {
                    tracing::debug!(error = %e, "Dropping embedded user reference");
                    None
                }
            },
        }
    }

    fn complete(&self, mut user: User) -> User {
        let Some(known) = self.get(&user.id) else {
            return user;
        };
        if user.first_name.is_empty() && user.last_name.is_empty() {
            user.first_name = known.first_name.clone();
            user.last_name = known.last_name.clone();
        }
        if !user.has_department() {
            user.department_id = known.department_id.clone();
            user.department_name = known.department_name.clone();
        }
        user
    }
}
