mod request;
mod response;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{CreateLoanService, GetLoanService, ReturnBookService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::loan::request::{LoanRequest, MemberLoansRequest, ReturnRequest, Transformer};
use crate::route::loan::response::{Created, Presenter};

pub trait LoanRouter {
    fn route_loan(self) -> Self;
}

impl LoanRouter for Router<AppModule> {
    fn route_loan(self) -> Self {
        self.route(
            "/loans",
            post(
                |State(module): State<AppModule>, Json(req): Json<LoanRequest>| async move {
                    Controller::new(Transformer, Created)
                        .intake(req)
                        .handle(|dto| async move { module.handler().loan_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/returns",
            post(
                |State(module): State<AppModule>, Json(req): Json<ReturnRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.handler().return_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/members/:id/loans",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(MemberLoansRequest::new(id))
                        .handle(|dto| async move { module.handler().member_loans(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
