//! User record types.

use std::fmt;
use std::str::FromStr;

/// Opaque record identifier assigned by [`crate::store::UserStore`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access level of a user.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// The other role; used by the role selector.
    pub fn cycle(self) -> Self {
        match self {
            Role::User => Role::Admin,
            Role::Admin => Role::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Editable fields of a user record, in form order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Role,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Role];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Role => "Role",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            Field::Name => "Name is required",
            Field::Email => "Email is required",
            Field::Role => "Role is required",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Role,
            Field::Role => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Role,
            Field::Email => Field::Name,
            Field::Role => Field::Email,
        }
    }
}

/// A stored user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserRecord {
    /// String value of `field`, as compared by the sorter.
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Role => self.role.as_str(),
        }
    }

    /// Drop the id, e.g. to resubmit the same data.
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// A candidate record that passed required-field checks but has no id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub(crate) fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}

/// Raw values captured by the form, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
}

impl FormValues {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Form defaults: empty text fields, role preselected to `user`.
    pub fn blank() -> Self {
        Self {
            role: Some(Role::User),
            ..Self::default()
        }
    }

    /// Mutable text of a text field; `None` for the role selector.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Role => None,
        }
    }
}

impl From<&UserRecord> for FormValues {
    fn from(u: &UserRecord) -> Self {
        Self {
            name: u.name.clone(),
            email: u.email.clone(),
            role: Some(u.role),
        }
    }
}
