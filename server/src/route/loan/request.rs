use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateLoanDto, GetMemberLoansDto, ReturnBookDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct LoanRequest {
    member_id: Uuid,
    isbn: String,
}

#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    isbn: String,
}

#[derive(Debug)]
pub struct MemberLoansRequest {
    member_id: Uuid,
}

impl MemberLoansRequest {
    pub fn new(member_id: Uuid) -> Self {
        Self { member_id }
    }
}

pub struct Transformer;

impl Intake<LoanRequest> for Transformer {
    type To = CreateLoanDto;
    fn emit(&self, input: LoanRequest) -> Self::To {
        CreateLoanDto {
            member_id: input.member_id,
            isbn: input.isbn,
        }
    }
}

impl Intake<ReturnRequest> for Transformer {
    type To = ReturnBookDto;
    fn emit(&self, input: ReturnRequest) -> Self::To {
        ReturnBookDto { isbn: input.isbn }
    }
}

impl Intake<MemberLoansRequest> for Transformer {
    type To = GetMemberLoansDto;
    fn emit(&self, input: MemberLoansRequest) -> Self::To {
        GetMemberLoansDto {
            member_id: input.member_id,
        }
    }
}
