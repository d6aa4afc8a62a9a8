//! Role based authorization.
//!
//! Every route names the [`Action`] it performs. [`PermissionsLayer`] checks the
//! action against [`Resource::Global`] before the handler runs; handlers that touch
//! a specific classroom check it again against [`Resource::Classroom`].
//!
//! [`PermissionsLayer`]: crate::middlewares::PermissionsLayer

use crate::error::{self, Error};
use entity::users::Role;
use uuid::Uuid;

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ClassroomIndex,
    ClassroomList,
    ClassroomShow,
    ClassroomStore,
    ClassroomUpdate,
    ClassroomDestroy,
    ClassroomJoin,
    ClassroomLeave,
    ClassroomMembers,
    LectureIndex,
    LectureShow,
    LectureStore,
    LectureUpdate,
    LectureDestroy,
    AssignableIndex,
    AssignableShow,
    AssignableStore,
    AssignableUpdate,
    AssignableDestroy,
    Submit,
    Mark,
    SubmissionIndex,
    ReportIndex,
    ReportStore,
    DocumentShow,
    Dashboard,
    UserIndex,
    UserShow,
    UserStore,
    UserUpdate,
    UserDestroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Global,
    Classroom {
        owner: Uuid,
        /// Whether the principal has joined the classroom.
        joined: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The role never allows the action.
    Role,
    /// Only the owner of the classroom (or an admin) may do this.
    NotOwner,
    /// The classroom is not visible to the principal.
    NotVisible,
    /// The principal has to join the classroom first.
    NotJoined,
}

impl From<Denial> for Error<'static> {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Role => error::NOT_ENOUGH_PERMISSIONS,
            Denial::NotOwner => error::NOT_CLASSROOM_OWNER,
            Denial::NotVisible => error::CLASSROOM_NOT_FOUND,
            Denial::NotJoined => error::USER_NOT_JOINED,
        }
    }
}

impl Decision {
    pub fn into_result(self) -> error::Result {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(denial) => Err(denial.into()),
        }
    }
}

fn role_allows(role: Role, action: Action) -> bool {
    match role {
        Role::Admin => !matches!(action, Action::Submit),
        Role::Teacher => matches!(
            action,
            Action::ClassroomIndex
                | Action::ClassroomList
                | Action::ClassroomShow
                | Action::ClassroomStore
                | Action::ClassroomUpdate
                | Action::ClassroomDestroy
                | Action::ClassroomMembers
                | Action::LectureIndex
                | Action::LectureShow
                | Action::LectureStore
                | Action::LectureUpdate
                | Action::LectureDestroy
                | Action::AssignableIndex
                | Action::AssignableShow
                | Action::AssignableStore
                | Action::AssignableUpdate
                | Action::AssignableDestroy
                | Action::Mark
                | Action::SubmissionIndex
                | Action::ReportIndex
                | Action::ReportStore
                | Action::DocumentShow
        ),
        Role::Student => matches!(
            action,
            Action::ClassroomIndex
                | Action::ClassroomList
                | Action::ClassroomShow
                | Action::ClassroomJoin
                | Action::ClassroomLeave
                | Action::LectureIndex
                | Action::LectureShow
                | Action::AssignableIndex
                | Action::AssignableShow
                | Action::Submit
                | Action::ReportIndex
                | Action::DocumentShow
        ),
    }
}

pub fn can(principal: &Principal, action: Action, resource: Resource) -> Decision {
    if !role_allows(principal.role, action) {
        return Decision::Deny(Denial::Role);
    }

    let Resource::Classroom { owner, joined } = resource else {
        return Decision::Allow;
    };

    if principal.role == Role::Admin {
        return Decision::Allow;
    }

    let owns = principal.id == owner;

    match action {
        Action::ClassroomUpdate
        | Action::ClassroomDestroy
        | Action::ClassroomMembers
        | Action::LectureStore
        | Action::LectureUpdate
        | Action::LectureDestroy
        | Action::AssignableStore
        | Action::AssignableUpdate
        | Action::AssignableDestroy
        | Action::Mark
        | Action::SubmissionIndex
        | Action::ReportStore => {
            if owns {
                Decision::Allow
            } else {
                Decision::Deny(Denial::NotOwner)
            }
        }
        Action::ClassroomShow
        | Action::LectureIndex
        | Action::LectureShow
        | Action::AssignableIndex
        | Action::AssignableShow => {
            if owns || joined {
                Decision::Allow
            } else {
                Decision::Deny(Denial::NotVisible)
            }
        }
        // students only ever get their own report, membership is checked with it
        Action::ReportIndex => {
            if owns || principal.role == Role::Student {
                Decision::Allow
            } else {
                Decision::Deny(Denial::NotOwner)
            }
        }
        Action::Submit => {
            if joined {
                Decision::Allow
            } else {
                Decision::Deny(Denial::NotJoined)
            }
        }
        _ => Decision::Allow,
    }
}
