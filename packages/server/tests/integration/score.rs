use sea_orm::prelude::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use podium_server::entity::submission;

use crate::common::{TestApp, routes};

async fn set_votes(app: &TestApp, submission_id: i32, votes: i64) {
    submission::Entity::update_many()
        .filter(submission::Column::Id.eq(submission_id))
        .col_expr(submission::Column::Votes, Expr::value(votes))
        .exec(&app.db)
        .await
        .expect("Failed to set votes");
}

mod scoring {
    use super::*;

    #[tokio::test]
    async fn admin_can_score_a_submission() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&admin, "Juried", true).await;
        let submission_id = app.create_submission(contest_id, &admin, "Entry").await;

        let res = app
            .post_with_token(
                routes::SCORE,
                &json!({"submissionId": submission_id, "score": 8}),
                &admin,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["admin_score"], 8);
    }

    #[tokio::test]
    async fn rescoring_overwrites_the_previous_score() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&admin, "Juried", true).await;
        let submission_id = app.create_submission(contest_id, &admin, "Entry").await;

        for score in [3, 9] {
            let res = app
                .post_with_token(
                    routes::SCORE,
                    &json!({"submissionId": submission_id, "score": score}),
                    &admin,
                )
                .await;
            assert_eq!(res.status, 200);
        }

        let detail = app.get_without_token(&routes::contest(contest_id)).await;
        assert_eq!(detail.body["submissions"][0]["admin_score"], 9);
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected_without_mutation() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&admin, "Juried", true).await;
        let submission_id = app.create_submission(contest_id, &admin, "Entry").await;

        for score in [0, 11] {
            let res = app
                .post_with_token(
                    routes::SCORE,
                    &json!({"submissionId": submission_id, "score": score}),
                    &admin,
                )
                .await;
            assert_eq!(res.status, 400);
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }

        let detail = app.get_without_token(&routes::contest(contest_id)).await;
        assert_eq!(detail.body["submissions"][0]["admin_score"], json!(null));
    }

    #[tokio::test]
    async fn unknown_submission_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin@example.com", "pass1234").await;

        let res = app
            .post_with_token(routes::SCORE, &json!({"submissionId": 999, "score": 5}), &admin)
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn non_admin_cannot_score() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin@example.com", "pass1234").await;
        let user = app.create_user("user@example.com", "pass1234").await;
        let contest_id = app.create_contest(&admin, "Juried", true).await;
        let submission_id = app.create_submission(contest_id, &admin, "Entry").await;

        let res = app
            .post_with_token(
                routes::SCORE,
                &json!({"submissionId": submission_id, "score": 5}),
                &user,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod jury_ranking {
    use super::*;

    #[tokio::test]
    async fn jury_mode_ranks_by_score_with_unscored_last() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&admin, "Juried", true).await;

        // A: score 8, 2 votes. B: unscored, 50 votes. C: score 8, 10 votes.
        let a = app.create_submission(contest_id, &admin, "A").await;
        let b = app.create_submission(contest_id, &admin, "B").await;
        let c = app.create_submission(contest_id, &admin, "C").await;
        set_votes(&app, a, 2).await;
        set_votes(&app, b, 50).await;
        set_votes(&app, c, 10).await;
        for (id, score) in [(a, 8), (c, 8)] {
            let res = app
                .post_with_token(
                    routes::SCORE,
                    &json!({"submissionId": id, "score": score}),
                    &admin,
                )
                .await;
            assert_eq!(res.status, 200);
        }

        let detail = app.get_without_token(&routes::contest(contest_id)).await;
        let names: Vec<&str> = detail.body["submissions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        // Score ties break on votes; the unscored crowd favourite sorts last.
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn switching_jury_mode_off_restores_vote_ordering() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&admin, "Flexible", true).await;

        let a = app.create_submission(contest_id, &admin, "A").await;
        let b = app.create_submission(contest_id, &admin, "B").await;
        set_votes(&app, a, 1).await;
        set_votes(&app, b, 10).await;
        app.post_with_token(
            routes::SCORE,
            &json!({"submissionId": a, "score": 10}),
            &admin,
        )
        .await;

        let res = app
            .post_with_token(
                &routes::contest(contest_id),
                &json!({"jury_mode": false}),
                &admin,
            )
            .await;
        assert_eq!(res.status, 200);

        let detail = app.get_without_token(&routes::contest(contest_id)).await;
        let names: Vec<&str> = detail.body["submissions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
