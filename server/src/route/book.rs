mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use application::service::{
    CreateBookService, DeleteBookService, GetBookService, SearchBookService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::book::request::{
    CreateRequest, DeleteRequest, GetRequest, SearchRequest, Transformer,
};
use crate::route::book::response::{Created, Presenter};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(
                |State(module): State<AppModule>, Query(req): Query<SearchRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.handler().search_books(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Created)
                        .intake(req)
                        .handle(|dto| async move { module.handler().add_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:isbn",
            get(
                |State(module): State<AppModule>, Path(isbn): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(isbn))
                        .handle(|dto| async move { module.handler().find_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(isbn): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteRequest::new(isbn))
                        .handle(|dto| async move { module.handler().remove_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
