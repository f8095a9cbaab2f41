use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/contests", contest_routes())
        .nest("/vote", vote_routes())
        .nest("/admin", admin_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn contest_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::contest::list_contests,
            handlers::contest::create_contest
        ))
        .routes(routes!(
            handlers::contest::get_contest,
            handlers::contest::update_contest
        ))
        .routes(routes!(handlers::submission::create_submission))
}

fn vote_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::vote::cast_vote))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::admin::set_winner))
        .routes(routes!(handlers::admin::score_submission))
        .routes(routes!(handlers::admin::set_admin_flag))
}
