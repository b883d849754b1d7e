use serde::Deserialize;

use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, SearchDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    isbn: String,
    title: String,
    author: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    keyword: String,
}

#[derive(Debug)]
pub struct GetRequest {
    isbn: String,
}

impl GetRequest {
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    isbn: String,
}

impl DeleteRequest {
    pub fn new(isbn: String) -> Self {
        Self { isbn }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateBookDto {
            isbn: input.isbn,
            title: input.title,
            author: input.author,
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
    type To = GetBookDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookDto { isbn: input.isbn }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteBookDto { isbn: input.isbn }
    }
}
