//! HTTP request handlers
//!
//! Each handler is a plain function of the request: no I/O and no shared state.

use crate::api::extract::{get_json_field, get_query_param, parse_json_body, Param, Request};
use crate::error::Result;
use tracing::debug;

/// What a handler gets to see for one request
pub struct HandlerContext<'a> {
    pub request: &'a Request,
    /// Rendered in place of parameters the client did not send
    pub absent: &'a str,
}

impl<'a> HandlerContext<'a> {
    pub fn new(request: &'a Request, absent: &'a str) -> Self {
        Self { request, absent }
    }

    fn query(&self, key: &str) -> Param {
        get_query_param(self.request, key)
    }
}

/// Signature shared by all route handlers
pub type HandlerFn = fn(&HandlerContext<'_>) -> Result<String>;

/// `GET /process`
pub fn process(ctx: &HandlerContext<'_>) -> Result<String> {
    let param1 = ctx.query("param1");
    let param2 = ctx.query("param2");
    debug!(?param1, ?param2, "process");

    Ok(format!(
        "Recibido param1: {} y param2: {}",
        param1.render(ctx.absent),
        param2.render(ctx.absent)
    ))
}

/// `GET /item`
pub fn get_item(ctx: &HandlerContext<'_>) -> Result<String> {
    let param1 = ctx.query("param1");
    let param2 = ctx.query("param2");

    Ok(format!(
        "GET recibido param1: {} y param2: {}",
        param1.render(ctx.absent),
        param2.render(ctx.absent)
    ))
}

/// `POST /item`
pub fn post_item(ctx: &HandlerContext<'_>) -> Result<String> {
    let (name, value) = item_fields(ctx)?;

    Ok(format!(
        "POST recibido name: {}, value: {}",
        name.render(ctx.absent),
        value.render(ctx.absent)
    ))
}

/// `PUT /item`
pub fn put_item(ctx: &HandlerContext<'_>) -> Result<String> {
    let (name, value) = item_fields(ctx)?;

    Ok(format!(
        "PUT actualizado name: {}, nuevo value: {}",
        name.render(ctx.absent),
        value.render(ctx.absent)
    ))
}

/// `DELETE /item`
pub fn delete_item(ctx: &HandlerContext<'_>) -> Result<String> {
    let (name, value) = item_fields(ctx)?;

    Ok(format!(
        "DELETE eliminado name: {}, value: {}",
        name.render(ctx.absent),
        value.render(ctx.absent)
    ))
}

fn item_fields(ctx: &HandlerContext<'_>) -> Result<(Param, Param)> {
    let body = parse_json_body(ctx.request)?;
    let name = get_json_field(&body, "name");
    let value = get_json_field(&body, "value");
    debug!(?name, ?value, "item body");

    Ok((name, value))
}
