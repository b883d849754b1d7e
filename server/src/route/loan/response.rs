use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{LoanDto, ReturnedLoanDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    id: Uuid,
    member_id: Uuid,
    book_isbn: String,
    #[serde(with = "time::serde::rfc3339")]
    loaned_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    due_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    returned_at: Option<OffsetDateTime>,
}

impl From<LoanDto> for LoanResponse {
    fn from(value: LoanDto) -> Self {
        Self {
            id: value.id,
            member_id: value.member_id,
            book_isbn: value.book_isbn,
            loaned_at: value.loaned_at,
            due_date: value.due_date,
            returned_at: value.returned_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnedResponse {
    loan: LoanResponse,
    fine: Decimal,
}

pub struct Presenter;

impl Exhaust<ReturnedLoanDto> for Presenter {
    type To = Json<ReturnedResponse>;
    fn emit(&self, input: ReturnedLoanDto) -> Self::To {
        Json(ReturnedResponse {
            loan: LoanResponse::from(input.loan),
            fine: input.fine,
        })
    }
}

impl Exhaust<Vec<LoanDto>> for Presenter {
    type To = Json<Vec<LoanResponse>>;
    fn emit(&self, input: Vec<LoanDto>) -> Self::To {
        Json(input.into_iter().map(LoanResponse::from).collect())
    }
}

pub struct Created;

impl Exhaust<LoanDto> for Created {
    type To = (StatusCode, Json<LoanResponse>);
    fn emit(&self, input: LoanDto) -> Self::To {
        (StatusCode::CREATED, Json(LoanResponse::from(input)))
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use time::macros::datetime;
    use uuid::Uuid;

    use application::transfer::{LoanDto, ReturnedLoanDto};

    use crate::controller::Exhaust;
    use crate::route::loan::response::Presenter;

    #[test]
    fn returned_loan_serializes_timestamps_and_fine() {
        let dto = ReturnedLoanDto {
            loan: LoanDto {
                id: Uuid::nil(),
                member_id: Uuid::nil(),
                book_isbn: "ISBN1".into(),
                loaned_at: datetime!(2024-01-01 0:00 UTC),
                due_date: datetime!(2024-01-15 0:00 UTC),
                returned_at: Some(datetime!(2024-01-25 0:00 UTC)),
            },
            fine: Decimal::new(50, 1),
        };
        let json = serde_json::to_value(&Presenter.emit(dto).0).unwrap();
        assert_eq!(json["loan"]["due_date"], "2024-01-15T00:00:00Z");
        assert_eq!(json["loan"]["returned_at"], "2024-01-25T00:00:00Z");
        assert_eq!(json["fine"], "5.0");
    }
}
