use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{GetMemberDto, RegisterMemberDto, SearchDto, UpdateMemberDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    keyword: String,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<RegisterRequest> for Transformer {
    type To = RegisterMemberDto;
    fn emit(&self, input: RegisterRequest) -> Self::To {
        RegisterMemberDto {
            name: input.name,
            email: input.email,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateMemberDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateMemberDto {
            id,
            name: input.name,
            email: input.email,
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
    type To = GetMemberDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetMemberDto { id: input.id }
    }
}
