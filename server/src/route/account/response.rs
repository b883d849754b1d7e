use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use application::transfer::AccountDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    number: String,
    owner: String,
    balance: Decimal,
}

impl From<AccountDto> for AccountResponse {
    fn from(value: AccountDto) -> Self {
        Self {
            number: value.number,
            owner: value.owner,
            balance: value.balance,
        }
    }
}

impl IntoResponse for AccountResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    verified: bool,
}

pub struct Presenter;

impl Exhaust<AccountDto> for Presenter {
    type To = AccountResponse;
    fn emit(&self, input: AccountDto) -> Self::To {
        AccountResponse::from(input)
    }
}

impl Exhaust<Vec<AccountDto>> for Presenter {
    type To = Json<Vec<AccountResponse>>;
    fn emit(&self, input: Vec<AccountDto>) -> Self::To {
        Json(input.into_iter().map(AccountResponse::from).collect())
    }
}

impl Exhaust<bool> for Presenter {
    type To = Json<VerifyResponse>;
    fn emit(&self, input: bool) -> Self::To {
        Json(VerifyResponse { verified: input })
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

pub struct Created;

impl Exhaust<AccountDto> for Created {
    type To = (StatusCode, Json<AccountResponse>);
    fn emit(&self, input: AccountDto) -> Self::To {
        (StatusCode::CREATED, Json(AccountResponse::from(input)))
    }
}
