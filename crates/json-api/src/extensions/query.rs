//! Query parameter parsing helpers.

use std::{fmt::Display, str::FromStr};

use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use lemon_app::pagination::PageRequest;

use crate::extensions::*;

pub(crate) trait QueryParamExt {
    /// Parse an optional parameter, answering 400 with `brief` when it is malformed.
    fn parse_or_400<T>(self, brief: &str) -> Result<Option<T>, StatusError>
    where
        T: FromStr,
        T::Err: Display;
}

impl QueryParamExt for QueryParam<String, false> {
    fn parse_or_400<T>(self, brief: &str) -> Result<Option<T>, StatusError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.into_inner()
            .map(|value| value.parse::<T>())
            .transpose()
            .or_400(brief)
    }
}

pub(crate) trait PageQueryExt {
    fn into_page_request(self) -> PageRequest;
}

/// `page` and `per_page` query parameters.
impl PageQueryExt for (QueryParam<u32, false>, QueryParam<u32, false>) {
    fn into_page_request(self) -> PageRequest {
        let (page, per_page) = self;

        PageRequest::new(page.into_inner(), per_page.into_inner())
    }
}
