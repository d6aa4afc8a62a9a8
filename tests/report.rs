mod utils;

use utils::prelude::*;

async fn setup() -> (App, User, User, Classroom) {
    let app = App::new().await;
    let teacher = app.create_user(Role::Teacher).await;
    let student = app.create_user(Role::Student).await;
    let classroom = app.create_classroom(&teacher).await;

    app.join(&student, &classroom).await;

    (app, teacher, student, classroom)
}

mod show {
    use super::*;

    #[tokio::test]
    async fn empty_classroom() {
        let (app, teacher, student, classroom) = setup().await;

        let res = app
            .get(&format!("/v1/report/{}/{}", classroom.id, student.id))
            .user(&teacher)
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);

        let empty = json!({
            "submitted": 0,
            "marked": 0,
            "total": 0,
            "obtained_marks": 0,
            "total_marks": 0,
        });
        let term = json!({
            "submitted": "N/A",
            "marked": "N/A",
            "total": "N/A",
            "obtained_marks": null,
            "total_marks": null,
        });

        assert_json_eq!(
            res.json::<Value>().await,
            json!({
                "assignment": empty,
                "quiz": empty,
                "project": empty,
                "mid_term": term,
                "final_term": term,
            })
        );
    }

    #[tokio::test]
    async fn counts_submissions_and_marks() {
        let (app, teacher, student, classroom) = setup().await;

        let first = app
            .create_assignable(&teacher, &classroom, "assignment", 10)
            .await;
        let second = app
            .create_assignable(&teacher, &classroom, "assignment", 10)
            .await;
        app.create_assignable(&teacher, &classroom, "assignment", 10)
            .await;

        app.submit(&student, "assignment", first).await;
        app.submit(&student, "assignment", second).await;

        let submission = app
            .submission_of(&teacher, "assignment", first, &student)
            .await;
        app.mark(&teacher, "assignment", first, submission, 7).await;

        let res = app
            .get(&format!("/v1/report/{}/{}", classroom.id, student.id))
            .user(&teacher)
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);

        let body = res.json::<Value>().await;

        assert_json_eq!(
            body["assignment"],
            json!({
                "submitted": 2,
                "marked": 1,
                "total": 3,
                "obtained_marks": 7,
                "total_marks": 30,
            })
        );
        assert_json_include!(
            actual: body["quiz"],
            expected: json!({ "submitted": 0, "total": 0 })
        );
    }

    #[tokio::test]
    async fn other_classrooms_are_not_counted() {
        let (app, teacher, student, classroom) = setup().await;
        let other = app.create_classroom(&teacher).await;
        app.join(&student, &other).await;

        let quiz = app.create_assignable(&teacher, &other, "quiz", 5).await;
        app.submit(&student, "quiz", quiz).await;

        let res = app
            .get(&format!("/v1/report/{}/{}", classroom.id, student.id))
            .user(&teacher)
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);

        let body = res.json::<Value>().await;
        assert_eq!(body["quiz"]["submitted"], 0);
        assert_eq!(body["quiz"]["total_marks"], 0);
    }

    #[tokio::test]
    async fn student_gets_own_report() {
        let (app, teacher, student, classroom) = setup().await;
        let project = app
            .create_assignable(&teacher, &classroom, "project", 20)
            .await;
        app.submit(&student, "project", project).await;

        let other = app.create_user(Role::Student).await;
        app.join(&other, &classroom).await;

        // the requested id is ignored for students
        let res = app
            .get(&format!("/v1/report/{}/{}", classroom.id, other.id))
            .user(&student)
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.json::<Value>().await["project"]["submitted"], 1);

        let res = app
            .get(&format!("/v1/report/{}", classroom.id))
            .user(&student)
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.json::<Value>().await["project"]["submitted"], 1);
    }

    #[tokio::test]
    async fn idempotent() {
        let (app, teacher, student, classroom) = setup().await;
        app.create_assignable(&teacher, &classroom, "quiz", 10)
            .await;

        let url = format!("/v1/report/{}/{}", classroom.id, student.id);

        let first = app.get(&url).user(&teacher).send().await.bytes().await;
        let second = app.get(&url).user(&teacher).send().await.bytes().await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn classroom_not_found() {
        let (app, teacher, student, _) = setup().await;

        let res = app
            .get(&format!("/v1/report/{}/{}", Uuid::new_v4(), student.id))
            .user(&teacher)
            .send()
            .await;

        assert_error!(res, error::CLASSROOM_NOT_FOUND);
    }

    #[tokio::test]
    async fn user_not_found() {
        let (app, teacher, _, classroom) = setup().await;

        let res = app
            .get(&format!("/v1/report/{}/{}", classroom.id, Uuid::new_v4()))
            .user(&teacher)
            .send()
            .await;

        assert_error!(res, error::USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn staff_without_user() {
        let (app, teacher, _, classroom) = setup().await;

        let res = app
            .get(&format!("/v1/report/{}", classroom.id))
            .user(&teacher)
            .send()
            .await;

        assert_error!(res, error::USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn user_not_joined() {
        let (app, teacher, _, classroom) = setup().await;
        let stranger = app.create_user(Role::Student).await;

        let res = app
            .get(&format!("/v1/report/{}/{}", classroom.id, stranger.id))
            .user(&teacher)
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_json_eq!(
            res.json::<Value>().await,
            json!({
                "code": "USER_NOT_JOINED",
                "error": "User has not joined selected classroom",
            })
        );
    }
}

mod store {
    use super::*;

    #[tokio::test]
    async fn records_mid_term() {
        let (app, teacher, student, classroom) = setup().await;
        let url = format!("/v1/report/{}/{}", classroom.id, student.id);

        let assignment = app
            .create_assignable(&teacher, &classroom, "assignment", 10)
            .await;
        let quiz = app.create_assignable(&teacher, &classroom, "quiz", 20).await;
        app.submit(&student, "assignment", assignment).await;
        app.submit(&student, "quiz", quiz).await;

        let submission = app.submission_of(&teacher, "quiz", quiz, &student).await;
        app.mark(&teacher, "quiz", quiz, submission, 15).await;

        let mut before = app.get(&url).user(&teacher).send().await.json::<Value>().await;

        let res = app
            .post(&url)
            .user(&teacher)
            .json(&json!({
                "mid_term_obtained_marks": 45,
            }))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let after = app.get(&url).user(&teacher).send().await.json::<Value>().await;

        assert_eq!(after["mid_term"]["obtained_marks"], 45);
        assert_eq!(after["quiz"]["obtained_marks"], 15);

        before["mid_term"]["obtained_marks"] = json!(45);
        assert_json_eq!(after, before);
    }

    #[tokio::test]
    async fn null_clears() {
        let (app, teacher, student, classroom) = setup().await;
        let url = format!("/v1/report/{}/{}", classroom.id, student.id);

        let res = app
            .post(&url)
            .user(&teacher)
            .json(&json!({
                "final_term_obtained_marks": 80,
                "final_term_total_marks": 100,
            }))
            .send()
            .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app
            .post(&url)
            .user(&teacher)
            .json(&json!({
                "final_term_obtained_marks": null,
            }))
            .send()
            .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let body = app.get(&url).user(&teacher).send().await.json::<Value>().await;

        assert_eq!(body["final_term"]["obtained_marks"], Value::Null);
        assert_eq!(body["final_term"]["total_marks"], 100);
    }

    #[tokio::test]
    async fn negative_marks() {
        let (app, teacher, student, classroom) = setup().await;

        let res = app
            .post(&format!("/v1/report/{}/{}", classroom.id, student.id))
            .user(&teacher)
            .json(&json!({
                "mid_term_total_marks": -1,
            }))
            .send()
            .await;

        assert_error!(res, error::JSON_VALIDATE_INVALID);
    }

    #[tokio::test]
    async fn user_not_joined() {
        let (app, teacher, _, classroom) = setup().await;
        let stranger = app.create_user(Role::Student).await;

        for body in [json!({ "mid_term_obtained_marks": 10 }), json!({})] {
            let res = app
                .post(&format!("/v1/report/{}/{}", classroom.id, stranger.id))
                .user(&teacher)
                .json(&body)
                .send()
                .await;

            assert_error!(res, error::USER_NOT_JOINED);
        }
    }

    #[tokio::test]
    async fn students_cannot_record() {
        let (app, _, student, classroom) = setup().await;

        let res = app
            .post(&format!("/v1/report/{}/{}", classroom.id, student.id))
            .user(&student)
            .json(&json!({
                "mid_term_obtained_marks": 100,
            }))
            .send()
            .await;

        assert_error!(res, error::NOT_ENOUGH_PERMISSIONS);
    }

    #[tokio::test]
    async fn not_classroom_owner() {
        let (app, _, student, classroom) = setup().await;
        let other_teacher = app.create_user(Role::Teacher).await;
        let url = format!("/v1/report/{}/{}", classroom.id, student.id);

        let res = app.get(&url).user(&other_teacher).send().await;
        assert_error!(res, error::NOT_CLASSROOM_OWNER);

        let res = app
            .post(&url)
            .user(&other_teacher)
            .json(&json!({
                "final_term_total_marks": 1,
            }))
            .send()
            .await;
        assert_error!(res, error::NOT_CLASSROOM_OWNER);
    }
}
