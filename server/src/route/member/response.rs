use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::MemberDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    id: Uuid,
    name: String,
    email: String,
}

impl From<MemberDto> for MemberResponse {
    fn from(value: MemberDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

impl IntoResponse for MemberResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<MemberDto> for Presenter {
    type To = MemberResponse;
    fn emit(&self, input: MemberDto) -> Self::To {
        MemberResponse::from(input)
    }
}

impl Exhaust<Vec<MemberDto>> for Presenter {
    type To = Json<Vec<MemberResponse>>;
    fn emit(&self, input: Vec<MemberDto>) -> Self::To {
        Json(input.into_iter().map(MemberResponse::from).collect())
    }
}

pub struct Created;

impl Exhaust<MemberDto> for Created {
    type To = (StatusCode, Json<MemberResponse>);
    fn emit(&self, input: MemberDto) -> Self::To {
        (StatusCode::CREATED, Json(MemberResponse::from(input)))
    }
}
