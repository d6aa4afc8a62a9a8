//! Per student, per classroom progress reports.
//!
//! A report has one entry per graded category. Assignments, quizzes and projects
//! are aggregated from their submission records; the mid and final term entries
//! are copied from the membership record, where [`record_term_marks`] stores them.

use crate::{
    error::{self, Result},
    policy::Principal,
};
use entity::{
    assignments, classroom_users, classrooms, projects, quizzes,
    users::{self, Role},
    Assignable, AssignableColumn, SubmissionColumn,
};
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Select,
};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// A count that is either meaningful for the category or not applicable to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Applicable(u64),
    NotApplicable,
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Metric::Applicable(n) => serializer.serialize_u64(*n),
            Metric::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub submitted: Metric,
    pub marked: Metric,
    pub total: Metric,
    pub obtained_marks: Option<i64>,
    pub total_marks: Option<i64>,
}

impl CategoryReport {
    fn term(obtained_marks: Option<i32>, total_marks: Option<i32>) -> Self {
        Self {
            submitted: Metric::NotApplicable,
            marked: Metric::NotApplicable,
            total: Metric::NotApplicable,
            obtained_marks: obtained_marks.map(i64::from),
            total_marks: total_marks.map(i64::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub assignment: CategoryReport,
    pub quiz: CategoryReport,
    pub project: CategoryReport,
    pub mid_term: CategoryReport,
    pub final_term: CategoryReport,
}

/// Builds the report of one classroom member.
///
/// Students always get their own report, `requested_user_id` is only honoured
/// for staff.
pub async fn compute_report<C: ConnectionTrait>(
    db: &C,
    classroom_id: Uuid,
    requested_user_id: Option<Uuid>,
    principal: &Principal,
) -> Result<Report> {
    let classroom = classrooms::Entity::find_by_id(classroom_id).one(db).await?;
    if classroom.is_none() {
        return Err(error::CLASSROOM_NOT_FOUND);
    }

    let user_id = if principal.role == Role::Student {
        principal.id
    } else {
        let user_id = requested_user_id.ok_or(error::USER_NOT_FOUND)?;

        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(error::USER_NOT_FOUND)?
            .id
    };

    let membership = classroom_users::Entity::find_membership(classroom_id, user_id)
        .one(db)
        .await?
        .ok_or(error::USER_NOT_JOINED)?;

    Ok(Report {
        assignment: category::<assignments::Entity, _>(db, classroom_id, user_id).await?,
        quiz: category::<quizzes::Entity, _>(db, classroom_id, user_id).await?,
        project: category::<projects::Entity, _>(db, classroom_id, user_id).await?,
        mid_term: CategoryReport::term(
            membership.mid_term_obtained_marks,
            membership.mid_term_total_marks,
        ),
        final_term: CategoryReport::term(
            membership.final_term_obtained_marks,
            membership.final_term_total_marks,
        ),
    })
}

/// Submission records of `user_id` for the assignables of `classroom_id`.
fn submissions<A: Assignable>(classroom_id: Uuid, user_id: Uuid) -> Select<A::Submission> {
    A::Submission::find()
        .inner_join(A::default())
        .filter(A::column(AssignableColumn::ClassroomId).eq(classroom_id))
        .filter(A::submission_column(SubmissionColumn::UserId).eq(user_id))
}

async fn sum<E, C>(db: &C, select: Select<E>, column: E::Column) -> std::result::Result<i64, DbErr>
where
    E: EntityTrait + Default,
    C: ConnectionTrait,
{
    let sum = select
        .select_only()
        .column_as(Expr::col((E::default(), column)).sum(), "sum")
        .into_tuple::<Option<i64>>()
        .one(db)
        .await?;

    Ok(sum.flatten().unwrap_or(0))
}

async fn category<A, C>(
    db: &C,
    classroom_id: Uuid,
    user_id: Uuid,
) -> std::result::Result<CategoryReport, DbErr>
where
    A: Assignable,
    A::Model: Sync,
    <A::Submission as EntityTrait>::Model: Sync,
    C: ConnectionTrait,
{
    let assignables =
        || A::find().filter(A::column(AssignableColumn::ClassroomId).eq(classroom_id));

    let submitted = submissions::<A>(classroom_id, user_id).count(db).await?;
    let marked = submissions::<A>(classroom_id, user_id)
        .filter(A::submission_column(SubmissionColumn::Marks).is_not_null())
        .count(db)
        .await?;
    let total = assignables().count(db).await?;

    let obtained_marks = sum(
        db,
        submissions::<A>(classroom_id, user_id),
        A::submission_column(SubmissionColumn::Marks),
    )
    .await?;
    let total_marks = sum(db, assignables(), A::column(AssignableColumn::Marks)).await?;

    Ok(CategoryReport {
        submitted: Metric::Applicable(submitted),
        marked: Metric::Applicable(marked),
        total: Metric::Applicable(total),
        obtained_marks: Some(obtained_marks),
        total_marks: Some(total_marks),
    })
}

/// Term marks to store. An absent field is left untouched, an explicit `null`
/// clears the stored value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct TermMarks {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub mid_term_obtained_marks: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub mid_term_total_marks: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub final_term_obtained_marks: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub final_term_total_marks: Option<Option<i32>>,
}

impl TermMarks {
    fn fields(&self) -> [(&'static str, classroom_users::Column, Option<Option<i32>>); 4] {
        [
            (
                "mid_term_obtained_marks",
                classroom_users::Column::MidTermObtainedMarks,
                self.mid_term_obtained_marks,
            ),
            (
                "mid_term_total_marks",
                classroom_users::Column::MidTermTotalMarks,
                self.mid_term_total_marks,
            ),
            (
                "final_term_obtained_marks",
                classroom_users::Column::FinalTermObtainedMarks,
                self.final_term_obtained_marks,
            ),
            (
                "final_term_total_marks",
                classroom_users::Column::FinalTermTotalMarks,
                self.final_term_total_marks,
            ),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, _, value)| value.is_none())
    }
}

impl Validate for TermMarks {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (name, _, value) in self.fields() {
            if matches!(value, Some(Some(marks)) if marks < 0) {
                errors.add(name, ValidationError::new("range"));
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Stores the given term marks on the membership record in a single statement.
pub async fn record_term_marks<C: ConnectionTrait>(
    db: &C,
    classroom_id: Uuid,
    user_id: Uuid,
    input: &TermMarks,
) -> Result {
    if input.is_empty() {
        let joined = classroom_users::Entity::find_membership(classroom_id, user_id)
            .count(db)
            .await?;

        return if joined == 0 {
            Err(error::USER_NOT_JOINED)
        } else {
            Ok(())
        };
    }

    let mut update = classroom_users::Entity::update_many()
        .filter(classroom_users::Column::ClassroomId.eq(classroom_id))
        .filter(classroom_users::Column::UserId.eq(user_id));

    for (_, column, value) in input.fields() {
        if let Some(value) = value {
            update = update.col_expr(column, Expr::value(value));
        }
    }

    let result = update.exec(db).await?;

    if result.rows_affected == 0 {
        return Err(error::USER_NOT_JOINED);
    }

    Ok(())
}
