use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::lessons::lessons_list_handler,
        crate::web::routes::lessons::lessons_get_handler,
        crate::web::routes::lessons::lessons_create_handler,
        crate::web::routes::lessons::lessons_update_handler,
        crate::web::routes::lessons::lessons_delete_handler,
    ),
    tags(
        (name = "lessons", description = "Lesson catalogue"),
    ),
)]
pub struct ApiDoc;
