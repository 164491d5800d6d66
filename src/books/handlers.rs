use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    books::{
        dto::{AddBookRequest, AddBookResponse, GetBooksRequest, MessageResponse, UpdatePagesReadRequest},
        repo_types::Book,
        services::LibraryService,
    },
    error::ApiError,
    extract::Payload,
    state::AppState,
};

pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/addBook", post(add_book))
        .route("/getBooks", post(get_books))
        .route("/updatePagesRead", put(update_pages_read))
}

#[instrument(skip(library, payload))]
pub async fn add_book(
    State(library): State<LibraryService>,
    Payload(payload): Payload<AddBookRequest>,
) -> Result<(StatusCode, Json<AddBookResponse>), ApiError> {
    let book_id = library
        .add_book(payload)
        .await
        .map_err(ApiError::with("Failed to add book"))?;

    info!(%book_id, "book added");
    Ok((
        StatusCode::CREATED,
        Json(AddBookResponse {
            message: "Book added successfully",
            book_id,
        }),
    ))
}

#[instrument(skip(library, payload))]
pub async fn get_books(
    State(library): State<LibraryService>,
    Payload(payload): Payload<GetBooksRequest>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = library
        .list_books(payload)
        .await
        .map_err(ApiError::with("Failed to fetch books"))?;
    Ok(Json(books))
}

#[instrument(skip(library, payload))]
pub async fn update_pages_read(
    State(library): State<LibraryService>,
    Payload(payload): Payload<UpdatePagesReadRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let book_id = payload.book_id.clone();
    let pages_read = payload.pages_read;
    library
        .update_pages_read(payload)
        .await
        .map_err(ApiError::with("Failed to update pages read"))?;

    info!(book_id = ?book_id, pages_read = ?pages_read, "pages read updated");
    Ok(Json(MessageResponse {
        message: "Pages read updated successfully",
    }))
}
