use rust_decimal::Decimal;
use serde::Deserialize;

use application::transfer::{
    AmountDto, CreateAccountDto, DeleteAccountDto, GetAccountDto, SearchDto, VerifyPinDto,
};

use crate::controller::Intake;

#[derive(Deserialize)]
pub struct CreateRequest {
    owner: String,
    #[serde(default)]
    initial_balance: Decimal,
    pin: String,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    amount: Decimal,
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    pin: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    keyword: String,
}

#[derive(Debug)]
pub struct GetRequest {
    number: String,
}

impl GetRequest {
    pub fn new(number: String) -> Self {
        Self { number }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    number: String,
}

impl DeleteRequest {
    pub fn new(number: String) -> Self {
        Self { number }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateAccountDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateAccountDto {
            owner: input.owner,
            initial_balance: input.initial_balance,
            pin: input.pin,
        }
    }
}

impl Intake<(String, AmountRequest)> for Transformer {
    type To = AmountDto;
    fn emit(&self, input: (String, AmountRequest)) -> Self::To {
        let (number, input) = input;
        AmountDto {
            number,
            amount: input.amount,
        }
    }
}

impl Intake<(String, VerifyRequest)> for Transformer {
    type To = VerifyPinDto;
    fn emit(&self, input: (String, VerifyRequest)) -> Self::To {
        let (number, input) = input;
        VerifyPinDto {
            number,
            pin: input.pin,
        }
    }
}

impl Intake<SearchRequest> for Transformer {
    type To = SearchDto;
    fn emit(&self, input: SearchRequest) -> Self::To {
        SearchDto {
            keyword: input.keyword,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetAccountDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetAccountDto {
            number: input.number,
        }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteAccountDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteAccountDto {
            number: input.number,
        }
    }
}
