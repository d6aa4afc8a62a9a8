mod utils;

use reqwest::multipart::Form;
use utils::{document, prelude::*};

async fn setup() -> (App, User, User, Classroom) {
    let app = App::new().await;
    let teacher = app.create_user(Role::Teacher).await;
    let student = app.create_user(Role::Student).await;
    let classroom = app.create_classroom(&teacher).await;

    app.join(&student, &classroom).await;

    (app, teacher, student, classroom)
}

mod crud {
    use super::*;

    #[tokio::test]
    async fn store_and_list() {
        let (app, teacher, student, classroom) = setup().await;

        for kind in ["assignment", "quiz", "project"] {
            let id = app.create_assignable(&teacher, &classroom, kind, 10).await;

            let res = app
                .get(&format!("/v1/classroom/{}/{kind}", classroom.id))
                .user(&student)
                .send()
                .await;

            assert_eq!(res.status(), StatusCode::OK);
            assert_json_include!(
                actual: res.json::<Value>().await,
                expected: json!([{
                    "id": id,
                    "classroom_id": classroom.id,
                    "marks": 10,
                }])
            );
        }
    }

    #[tokio::test]
    async fn negative_marks() {
        let (app, teacher, _, classroom) = setup().await;

        let form = Form::new()
            .text("name", "Homework")
            .text("marks", "-5")
            .part("document", document("task.pdf"));

        let res = app
            .post(&format!("/v1/classroom/{}/assignment", classroom.id))
            .user(&teacher)
            .multipart(form)
            .send()
            .await;

        assert_error!(res, error::MULTIPART_INVALID);
    }

    #[tokio::test]
    async fn students_cannot_create() {
        let (app, _, student, classroom) = setup().await;

        let form = Form::new()
            .text("name", "Homework")
            .text("marks", "5")
            .part("document", document("task.pdf"));

        let res = app
            .post(&format!("/v1/classroom/{}/quiz", classroom.id))
            .user(&student)
            .multipart(form)
            .send()
            .await;

        assert_error!(res, error::NOT_ENOUGH_PERMISSIONS);
    }

    #[tokio::test]
    async fn update() {
        let (app, teacher, _, classroom) = setup().await;
        let id = app.create_assignable(&teacher, &classroom, "project", 10).await;

        let res = app
            .patch(&format!("/v1/classroom/{}/project/{id}", classroom.id))
            .user(&teacher)
            .multipart(Form::new().text("marks", "25"))
            .send()
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_json_include!(
            actual: res.json::<Value>().await,
            expected: json!({
                "id": id,
                "name": "Test project",
                "marks": 25,
            })
        );
    }

    #[tokio::test]
    async fn wrong_classroom() {
        let (app, teacher, _, classroom) = setup().await;
        let other = app.create_classroom(&teacher).await;
        let id = app.create_assignable(&teacher, &classroom, "quiz", 10).await;

        let res = app
            .get(&format!("/v1/classroom/{}/quiz/{id}", other.id))
            .user(&teacher)
            .send()
            .await;

        assert_error!(res, error::ASSIGNABLE_NOT_FOUND);
    }

    #[tokio::test]
    async fn destroy() {
        let (app, teacher, student, classroom) = setup().await;
        let id = app.create_assignable(&teacher, &classroom, "assignment", 10).await;
        app.submit(&student, "assignment", id).await;

        let url = format!("/v1/classroom/{}/assignment/{id}", classroom.id);

        let res = app.delete(&url).user(&teacher).send().await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app.get(&url).user(&teacher).send().await;
        assert_error!(res, error::ASSIGNABLE_NOT_FOUND);
    }
}

mod submission {
    use super::*;

    #[tokio::test]
    async fn resubmit_replaces_document() {
        let (app, teacher, student, classroom) = setup().await;
        let id = app.create_assignable(&teacher, &classroom, "quiz", 10).await;

        app.submit(&student, "quiz", id).await;

        let res = app
            .get(&format!("/v1/quiz/{id}/submissions"))
            .user(&teacher)
            .send()
            .await;
        let first = res.json::<Value>().await;
        assert_eq!(first.as_array().map(Vec::len), Some(1));

        app.submit(&student, "quiz", id).await;

        let res = app
            .get(&format!("/v1/quiz/{id}/submissions"))
            .user(&teacher)
            .send()
            .await;
        let second = res.json::<Value>().await;

        assert_eq!(second.as_array().map(Vec::len), Some(1));
        assert_eq!(first[0]["id"], second[0]["id"]);
        assert_ne!(first[0]["document"], second[0]["document"]);

        let old_key = first[0]["document"].as_str().expect("no document");
        let res = app
            .get(&format!("/v1/document/{old_key}"))
            .user(&teacher)
            .send()
            .await;

        assert_error!(res, error::DOCUMENT_NOT_FOUND);
    }

    #[tokio::test]
    async fn not_joined() {
        let (app, teacher, _, classroom) = setup().await;
        let stranger = app.create_user(Role::Student).await;
        let id = app.create_assignable(&teacher, &classroom, "assignment", 10).await;

        let res = app
            .post(&format!("/v1/assignment/{id}/submit"))
            .user(&stranger)
            .multipart(Form::new().part("document", document("answer.pdf")))
            .send()
            .await;

        assert_error!(res, error::USER_NOT_JOINED);
    }

    #[tokio::test]
    async fn teachers_cannot_submit() {
        let (app, teacher, _, classroom) = setup().await;
        let id = app.create_assignable(&teacher, &classroom, "assignment", 10).await;

        let res = app
            .post(&format!("/v1/assignment/{id}/submit"))
            .user(&teacher)
            .multipart(Form::new().part("document", document("answer.pdf")))
            .send()
            .await;

        assert_error!(res, error::NOT_ENOUGH_PERMISSIONS);
    }

    #[tokio::test]
    async fn unknown_assignable() {
        let (app, _, student, _) = setup().await;

        let res = app
            .post(&format!("/v1/project/{}/submit", Uuid::new_v4()))
            .user(&student)
            .multipart(Form::new().part("document", document("answer.pdf")))
            .send()
            .await;

        assert_error!(res, error::ASSIGNABLE_NOT_FOUND);
    }

    #[tokio::test]
    async fn mark_overwrites() {
        let (app, teacher, student, classroom) = setup().await;
        let id = app.create_assignable(&teacher, &classroom, "project", 20).await;

        app.submit(&student, "project", id).await;
        let submission = app.submission_of(&teacher, "project", id, &student).await;

        app.mark(&teacher, "project", id, submission, 12).await;
        app.mark(&teacher, "project", id, submission, 18).await;

        let res = app
            .get(&format!("/v1/project/{id}/submissions"))
            .user(&teacher)
            .send()
            .await;

        assert_eq!(res.json::<Value>().await[0]["marks"], 18);
    }

    #[tokio::test]
    async fn mark_foreign_submission() {
        let (app, teacher, student, classroom) = setup().await;
        let first = app.create_assignable(&teacher, &classroom, "quiz", 10).await;
        let second = app.create_assignable(&teacher, &classroom, "quiz", 10).await;

        app.submit(&student, "quiz", first).await;
        let submission = app.submission_of(&teacher, "quiz", first, &student).await;

        let res = app
            .post(&format!("/v1/quiz/{second}/mark"))
            .user(&teacher)
            .json(&json!({
                "id": submission,
                "marks": 5,
            }))
            .send()
            .await;

        assert_error!(res, error::SUBMISSION_NOT_FOUND);
    }

    #[tokio::test]
    async fn mark_not_owner() {
        let (app, teacher, student, classroom) = setup().await;
        let other_teacher = app.create_user(Role::Teacher).await;
        let id = app.create_assignable(&teacher, &classroom, "quiz", 10).await;

        app.submit(&student, "quiz", id).await;
        let submission = app.submission_of(&teacher, "quiz", id, &student).await;

        let res = app
            .post(&format!("/v1/quiz/{id}/mark"))
            .user(&other_teacher)
            .json(&json!({
                "id": submission,
                "marks": 5,
            }))
            .send()
            .await;

        assert_error!(res, error::NOT_CLASSROOM_OWNER);
    }
}
