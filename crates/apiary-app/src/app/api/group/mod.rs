//! `/api/group/*` endpoints.

mod envelope;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::de::DeserializeOwned;

use apiary_service::auth::{Caller, get_caller_from_depot};
use apiary_service::group::GroupService;
use apiary_service::group::error::errcode;
use apiary_service::group::params::{
    AddGroupParams, AddMemberParams, DelMemberParams, GroupIdParams, MemberRoleParams,
    UpdateGroupParams,
};

use super::GROUP_ROUTE_COMPONENT;
use crate::group_handler::get_group_service_from_depot;
use envelope::{ApiResponse, render};

/// ## Summary
/// Fetches the group service and the caller for a handler.
///
/// Renders HTTP 500 when the service is not wired, and the "please log in"
/// envelope for public requests. Returns `None` once a response is written.
fn context(depot: &Depot, res: &mut Response) -> Option<(Arc<GroupService>, Caller)> {
    let service = match get_group_service_from_depot(depot) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(error = %e, "Failed to get group service");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            return None;
        }
    };

    match get_caller_from_depot(depot) {
        Ok(caller) => Some((service, caller.clone())),
        Err(_) => {
            res.render(Json(ApiResponse::failure(
                errcode::NOT_LOGGED_IN,
                "please log in",
            )));
            None
        }
    }
}

/// Parses a JSON body, rendering the validation envelope on failure.
async fn parse_body<T>(req: &mut Request, res: &mut Response) -> Option<T>
where
    T: DeserializeOwned,
{
    match req.parse_json::<T>().await {
        Ok(params) => Some(params),
        Err(e) => {
            tracing::debug!(error = %e, "Invalid request body");
            res.render(Json(ApiResponse::failure(
                errcode::INVALID,
                "invalid request body",
            )));
            None
        }
    }
}

fn id_query(req: &Request) -> GroupIdParams {
    GroupIdParams {
        id: req.query::<i32>("id"),
    }
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn get(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, caller)) = context(depot, res) else {
        return;
    };
    render(res, service.get(&caller, id_query(req)).await);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn add(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, caller)) = context(depot, res) else {
        return;
    };
    let Some(params) = parse_body::<AddGroupParams>(req, res).await else {
        return;
    };
    render(res, service.add(&caller, params).await);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn add_member(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, caller)) = context(depot, res) else {
        return;
    };
    let Some(params) = parse_body::<AddMemberParams>(req, res).await else {
        return;
    };
    render(res, service.add_member(&caller, params).await);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn change_member_role(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, caller)) = context(depot, res) else {
        return;
    };
    let Some(params) = parse_body::<MemberRoleParams>(req, res).await else {
        return;
    };
    render(res, service.change_member_role(&caller, params).await);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn get_member_list(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, _caller)) = context(depot, res) else {
        return;
    };
    render(res, service.get_member_list(id_query(req)).await);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn del_member(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, caller)) = context(depot, res) else {
        return;
    };
    let Some(params) = parse_body::<DelMemberParams>(req, res).await else {
        return;
    };
    render(res, service.del_member(&caller, params).await);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn list(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, caller)) = context(depot, res) else {
        return;
    };
    render(res, service.list(&caller).await);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn del(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, caller)) = context(depot, res) else {
        return;
    };
    let Some(params) = parse_body::<GroupIdParams>(req, res).await else {
        return;
    };
    render(res, service.del(&caller, params).await);
}

#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn up(req: &mut Request, depot: &Depot, res: &mut Response) {
    let Some((service, caller)) = context(depot, res) else {
        return;
    };
    let Some(params) = parse_body::<UpdateGroupParams>(req, res).await else {
        return;
    };
    render(res, service.up(&caller, params).await);
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(GROUP_ROUTE_COMPONENT)
        .push(Router::with_path("get").get(get))
        .push(Router::with_path("add").post(add))
        .push(Router::with_path("add_member").post(add_member))
        .push(Router::with_path("change_member_role").post(change_member_role))
        .push(Router::with_path("get_member_list").get(get_member_list))
        .push(Router::with_path("del_member").post(del_member))
        .push(Router::with_path("list").get(list))
        .push(Router::with_path("del").post(del))
        .push(Router::with_path("up").post(up))
}
