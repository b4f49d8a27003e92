//! Exercise read endpoints.
//!
//! ```text
//! GET /api/exercises
//! GET /api/exercises/{id}
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::{Error, Exercise, ExerciseId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List every stored exercise.
#[utoipa::path(
    get,
    path = "/api/exercises",
    responses(
        (status = 200, description = "All exercises", body = [Exercise]),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["exercises"],
    operation_id = "listExercises"
)]
#[get("/exercises")]
pub async fn list_exercises(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Exercise>>> {
    let logic = state.exercise_logic();
    Ok(web::Json(logic.get_exercises().await?))
}

/// Fetch one exercise by id.
///
/// Unknown ids, and ids that are not UUIDs, answer `404` with an empty
/// body.
#[utoipa::path(
    get,
    path = "/api/exercises/{id}",
    params(("id" = String, Path, description = "Exercise UUID")),
    responses(
        (status = 200, description = "The exercise", body = Exercise),
        (status = 404, description = "No exercise with this id"),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["exercises"],
    operation_id = "getExercise"
)]
#[get("/exercises/{id}")]
pub async fn get_exercise(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Ok(id) = path.parse::<ExerciseId>() else {
        return Ok(HttpResponse::NotFound().finish());
    };
    let logic = state.exercise_logic();
    Ok(match logic.get(&id).await? {
        Some(exercise) => HttpResponse::Ok().json(exercise),
        None => HttpResponse::NotFound().finish(),
    })
}
