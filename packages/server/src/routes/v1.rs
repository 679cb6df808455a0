use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/scheduler", scheduler_routes())
        .nest("/contests", contest_routes())
}

fn scheduler_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::scheduler::run_scheduler))
}

fn contest_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::contest::list_contests))
        .routes(routes!(handlers::contest::get_contest))
        .routes(routes!(handlers::contest::list_contest_entries))
}
