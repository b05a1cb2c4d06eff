//! The `{errcode, errmsg, data}` envelope every group endpoint answers with.

use salvo::Response;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use serde::Serialize;

use apiary_service::group::error::errcode;
use apiary_service::group::{GroupError, GroupResult};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub errcode: i32,
    pub errmsg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            errcode: errcode::OK,
            errmsg: "success".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    #[must_use]
    pub fn failure(errcode: i32, errmsg: impl Into<String>) -> Self {
        Self {
            errcode,
            errmsg: errmsg.into(),
            data: None,
        }
    }
}

impl From<&GroupError> for ApiResponse<()> {
    fn from(err: &GroupError) -> Self {
        Self::failure(err.errcode(), err.to_string())
    }
}

/// ## Summary
/// Renders a service result as an envelope with HTTP 200.
pub fn render<T>(res: &mut Response, result: GroupResult<T>)
where
    T: Serialize + Send,
{
    res.status_code(StatusCode::OK);
    match result {
        Ok(data) => res.render(Json(ApiResponse::success(data))),
        Err(err) => {
            tracing::debug!(errcode = err.errcode(), error = %err, "Group request failed");
            res.render(Json(ApiResponse::from(&err)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let ok = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(ok["errcode"], 0);
        assert_eq!(ok["errmsg"], "success");
        assert_eq!(ok["data"], serde_json::json!([1, 2]));

        let err = serde_json::to_value(ApiResponse::from(&GroupError::DangerDenied)).unwrap();
        assert_eq!(err["errcode"], 405);
        assert_eq!(err["errmsg"], "permission denied");
        assert!(err["data"].is_null());
    }
}
