mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{
    CreateAccountService, DeleteAccountService, GetAccountService, SearchAccountService,
    UpdateBalanceService, VerifyPinService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::account::request::{
    AmountRequest, CreateRequest, DeleteRequest, GetRequest, SearchRequest, Transformer,
    VerifyRequest,
};
use crate::route::account::response::{Created, Presenter};

pub trait AccountRouter {
    fn route_account(self) -> Self;
}

impl AccountRouter for Router<AppModule> {
    fn route_account(self) -> Self {
        self.route(
            "/accounts",
            get(
                |State(module): State<AppModule>, Query(req): Query<SearchRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.handler().search_accounts(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Created)
                        .intake(req)
                        .handle(|dto| async move { module.handler().create_account(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/accounts/:number",
            get(
                |State(module): State<AppModule>, Path(number): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(number))
                        .handle(|dto| async move { module.handler().get_balance(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(number): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteRequest::new(number))
                        .handle(|dto| async move { module.handler().close_account(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/accounts/:number/deposit",
            post(
                |State(module): State<AppModule>,
                 Path(number): Path<String>,
                 Json(req): Json<AmountRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((number, req))
                        .handle(|dto| async move { module.handler().deposit(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/accounts/:number/withdraw",
            post(
                |State(module): State<AppModule>,
                 Path(number): Path<String>,
                 Json(req): Json<AmountRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((number, req))
                        .handle(|dto| async move { module.handler().withdraw(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/accounts/:number/verify",
            post(
                |State(module): State<AppModule>,
                 Path(number): Path<String>,
                 Json(req): Json<VerifyRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((number, req))
                        .handle(|dto| async move { module.handler().verify_pin(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
