use sea_orm::prelude::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use podium_server::entity::submission;

use crate::common::{TestApp, routes};

fn valid_contest_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "A contest description in **Markdown**.",
        "start_date": "2020-01-01T00:00:00Z",
        "end_date": "2099-01-02T00:00:00Z",
        "status": "active",
        "jury_mode": false,
        "positions": [
            {"rank": 1, "name": "Gold", "image": null},
            {"rank": 2, "name": "Silver", "image": null},
        ],
    })
}

/// Set a submission's vote counter directly, bypassing the rate limiter.
async fn set_votes(app: &TestApp, submission_id: i32, votes: i64) {
    submission::Entity::update_many()
        .filter(submission::Column::Id.eq(submission_id))
        .col_expr(submission::Column::Votes, Expr::value(votes))
        .exec(&app.db)
        .await
        .expect("Failed to set votes");
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_a_contest() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;

        let res = app
            .post_with_token(routes::CONTESTS, &valid_contest_body("Spring Jam"), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Spring Jam");
        assert_eq!(res.body["status"], "active");
        assert_eq!(res.body["positions"][0]["name"], "Gold");
        assert!(res.body["id"].as_i64().is_some());
    }

    #[tokio::test]
    async fn non_admin_cannot_create_a_contest() {
        let app = TestApp::spawn().await;
        let token = app.create_user("user@example.com", "pass1234").await;

        let res = app
            .post_with_token(routes::CONTESTS, &valid_contest_body("Nope"), &token)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn unauthenticated_user_cannot_create_a_contest() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::CONTESTS, &valid_contest_body("Nope"))
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn rejects_end_date_before_start_date() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;

        let mut body = valid_contest_body("Bad Dates");
        body["start_date"] = json!("2099-01-02T00:00:00Z");
        body["end_date"] = json!("2099-01-01T00:00:00Z");
        let res = app.post_with_token(routes::CONTESTS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_positions_without_rank_two() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;

        let mut body = valid_contest_body("One Slot");
        body["positions"] = json!([{"rank": 1, "name": "Gold", "image": null}]);
        let res = app.post_with_token(routes::CONTESTS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_duplicate_position_ranks() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;

        let mut body = valid_contest_body("Dup Slots");
        body["positions"] = json!([
            {"rank": 1, "name": "Gold", "image": null},
            {"rank": 2, "name": "Silver", "image": null},
            {"rank": 2, "name": "Also silver", "image": null},
        ]);
        let res = app.post_with_token(routes::CONTESTS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn lists_contests_by_end_date_descending() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;

        let mut early = valid_contest_body("Ends First");
        early["end_date"] = json!("2097-01-01T00:00:00Z");
        let mut late = valid_contest_body("Ends Last");
        late["end_date"] = json!("2099-01-01T00:00:00Z");
        let mut middle = valid_contest_body("Ends Middle");
        middle["end_date"] = json!("2098-01-01T00:00:00Z");

        for body in [&early, &late, &middle] {
            let res = app.post_with_token(routes::CONTESTS, body, &token).await;
            assert_eq!(res.status, 201);
        }

        let res = app.get_without_token(routes::CONTESTS).await;
        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res.body.as_array().unwrap().iter()
            .map(|c| c["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Ends Last", "Ends Middle", "Ends First"]);
    }

    #[tokio::test]
    async fn listing_is_public() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::CONTESTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }
}

mod detail {
    use super::*;

    #[tokio::test]
    async fn unknown_contest_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::contest(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn detail_contains_contest_submissions_and_winners() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&token, "Detail", false).await;
        app.create_submission(contest_id, &token, "Entry A").await;

        let res = app.get_without_token(&routes::contest(contest_id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["contest"]["title"], "Detail");
        assert_eq!(res.body["submissions"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["winners"], json!([]));
    }

    #[tokio::test]
    async fn public_contest_ranks_by_votes_then_age() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&token, "Popular Vote", false).await;

        let a = app.create_submission(contest_id, &token, "A").await;
        let b = app.create_submission(contest_id, &token, "B").await;
        let c = app.create_submission(contest_id, &token, "C").await;
        set_votes(&app, a, 2).await;
        set_votes(&app, b, 50).await;
        set_votes(&app, c, 10).await;

        let res = app.get_without_token(&routes::contest(contest_id)).await;
        let names: Vec<&str> = res.body["submissions"].as_array().unwrap().iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn vote_ties_rank_the_older_submission_first() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&token, "Tied", false).await;

        let first = app.create_submission(contest_id, &token, "Older").await;
        let second = app.create_submission(contest_id, &token, "Newer").await;
        set_votes(&app, first, 5).await;
        set_votes(&app, second, 5).await;

        let res = app.get_without_token(&routes::contest(contest_id)).await;
        let names: Vec<&str> = res.body["submissions"].as_array().unwrap().iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Older", "Newer"]);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn admin_can_complete_a_contest() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&token, "Closing", false).await;

        let res = app
            .post_with_token(
                &routes::contest(contest_id),
                &json!({"status": "completed"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "completed");
    }

    #[tokio::test]
    async fn cross_field_date_validation_uses_stored_values() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;
        let contest_id = app.create_contest(&token, "Dates", false).await;

        // Moving the end before the stored start must fail even though the
        // payload alone looks consistent.
        let res = app
            .post_with_token(
                &routes::contest(contest_id),
                &json!({"end_date": "2019-01-01T00:00:00Z"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn non_admin_cannot_update() {
        let app = TestApp::spawn().await;
        let admin_token = app.create_admin("admin@example.com", "pass1234").await;
        let user_token = app.create_user("user@example.com", "pass1234").await;
        let contest_id = app.create_contest(&admin_token, "Locked", false).await;

        let res = app
            .post_with_token(
                &routes::contest(contest_id),
                &json!({"title": "Hijacked"}),
                &user_token,
            )
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn updating_an_unknown_contest_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("admin@example.com", "pass1234").await;

        let res = app
            .post_with_token(&routes::contest(4242), &json!({"title": "Ghost"}), &token)
            .await;

        assert_eq!(res.status, 404);
    }
}
