//! API documentation: OpenAPI document generation and serving
//!
//! [`ApiDescription`] is built once from the frozen route table and turned
//! into an OpenAPI 3 document with utoipa's builders. [`DocsServer`] holds the
//! rendered document and the Swagger UI configuration pointing at it.

use crate::api::models::{ErrorResponse, ItemPayload, MessageResponse};
use crate::api::router::{HttpMethod, Route, RouteInput};
use crate::config::DocsConfig;
use crate::error::Result;
use axum::{
    body::Bytes,
    http::header,
    response::{IntoResponse, Response},
};
use utoipa::openapi::path::{
    OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder, PathItemType,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::tag::TagBuilder;
use utoipa::openapi::{
    ComponentsBuilder, ContentBuilder, InfoBuilder, ObjectBuilder, OpenApi, OpenApiBuilder,
    PathsBuilder, Ref, Required, ResponseBuilder, SchemaType,
};
use utoipa::ToSchema;
use utoipa_swagger_ui::{Config, SwaggerUi};

const JSON: &str = "application/json";

/// Documentation metadata for one registered route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedRoute {
    pub path: String,
    pub method: HttpMethod,
    pub tag: String,
    pub operation_id: String,
    pub summary: Option<String>,
    pub input: RouteInput,
}

impl From<&Route> for DescribedRoute {
    fn from(route: &Route) -> Self {
        Self {
            path: route.path.clone(),
            method: route.method,
            tag: route.tag.clone(),
            operation_id: route.operation_id.clone(),
            summary: route.summary.clone(),
            input: route.input,
        }
    }
}

/// Machine-readable description of the registered routes
#[derive(Debug, Clone)]
pub struct ApiDescription {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    routes: Vec<DescribedRoute>,
}

impl ApiDescription {
    /// Collect route metadata, keeping registration order
    pub fn build(docs: &DocsConfig, routes: &[Route]) -> Self {
        Self {
            title: docs.title.clone(),
            version: docs.version.clone(),
            description: docs.description.clone(),
            routes: routes.iter().map(DescribedRoute::from).collect(),
        }
    }

    pub fn routes(&self) -> &[DescribedRoute] {
        &self.routes
    }

    /// Distinct tags in order of first use
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for route in &self.routes {
            if !tags.contains(&route.tag.as_str()) {
                tags.push(&route.tag);
            }
        }
        tags
    }

    /// Build the OpenAPI document
    pub fn to_document(&self) -> OpenApi {
        // Group operations by path, preserving first-registration order
        let mut grouped: Vec<(&str, Vec<&DescribedRoute>)> = Vec::new();
        for route in &self.routes {
            match grouped.iter_mut().find(|(path, _)| *path == route.path) {
                Some((_, ops)) => ops.push(route),
                None => grouped.push((route.path.as_str(), vec![route])),
            }
        }

        let mut paths = PathsBuilder::new();
        for (path, routes) in grouped {
            let item = routes
                .into_iter()
                .fold(PathItemBuilder::new(), |item, route| {
                    item.operation(path_item_type(route.method), operation(route))
                })
                .build();
            paths = paths.path(path, item);
        }

        let tags = self
            .tags()
            .into_iter()
            .map(|tag| TagBuilder::new().name(tag).build())
            .collect::<Vec<_>>();

        let (message_name, message_schema) = MessageResponse::schema();
        let (item_name, item_schema) = ItemPayload::schema();
        let (error_name, error_schema) = ErrorResponse::schema();
        let components = ComponentsBuilder::new()
            .schema(message_name, message_schema)
            .schema(item_name, item_schema)
            .schema(error_name, error_schema)
            .build();

        OpenApiBuilder::new()
            .info(
                InfoBuilder::new()
                    .title(self.title.clone())
                    .version(self.version.clone())
                    .description(self.description.clone())
                    .build(),
            )
            .paths(paths.build())
            .components(Some(components))
            .tags(Some(tags))
            .build()
    }

    /// Serialize the OpenAPI document. Output is stable across calls.
    pub fn to_json(&self) -> Result<String> {
        Ok(self.to_document().to_pretty_json()?)
    }
}

fn path_item_type(method: HttpMethod) -> PathItemType {
    match method {
        HttpMethod::Get => PathItemType::Get,
        HttpMethod::Post => PathItemType::Post,
        HttpMethod::Put => PathItemType::Put,
        HttpMethod::Delete => PathItemType::Delete,
    }
}

fn operation(route: &DescribedRoute) -> utoipa::openapi::path::Operation {
    let ok = ResponseBuilder::new()
        .description("Echo of the received parameters")
        .content(
            JSON,
            ContentBuilder::new()
                .schema(Ref::from_schema_name("MessageResponse"))
                .build(),
        );

    let mut op = OperationBuilder::new()
        .tag(route.tag.clone())
        .operation_id(Some(route.operation_id.clone()))
        .summary(route.summary.clone())
        .response("200", ok);

    match route.input {
        RouteInput::Query(names) => {
            for name in names {
                op = op.parameter(
                    ParameterBuilder::new()
                        .name(*name)
                        .parameter_in(ParameterIn::Query)
                        .required(Required::False)
                        .schema(Some(ObjectBuilder::new().schema_type(SchemaType::String)))
                        .build(),
                );
            }
        }
        RouteInput::JsonBody => {
            let body = RequestBodyBuilder::new()
                .content(
                    JSON,
                    ContentBuilder::new()
                        .schema(Ref::from_schema_name("ItemPayload"))
                        .build(),
                )
                .required(Some(Required::False))
                .build();
            let bad_request = ResponseBuilder::new()
                .description("Body is not a JSON object")
                .content(
                    JSON,
                    ContentBuilder::new()
                        .schema(Ref::from_schema_name("ErrorResponse"))
                        .build(),
                );
            op = op.request_body(Some(body)).response("400", bad_request);
        }
    }

    op.build()
}

/// Serves the rendered OpenAPI document and the Swagger UI
#[derive(Debug, Clone)]
pub struct DocsServer {
    description: ApiDescription,
    schema: Bytes,
    schema_path: String,
    ui_path: String,
}

impl DocsServer {
    /// Render the document once; it never changes afterwards
    pub fn new(description: ApiDescription, docs: &DocsConfig) -> Result<Self> {
        let schema = Bytes::from(description.to_json()?);
        Ok(Self {
            description,
            schema,
            schema_path: docs.schema_path.clone(),
            ui_path: docs.ui_path.clone(),
        })
    }

    pub fn description(&self) -> &ApiDescription {
        &self.description
    }

    pub fn schema_path(&self) -> &str {
        &self.schema_path
    }

    pub fn ui_path(&self) -> &str {
        &self.ui_path
    }

    /// The OpenAPI document as an `application/json` response
    pub fn serve_schema(&self) -> Response {
        ([(header::CONTENT_TYPE, JSON)], self.schema.clone()).into_response()
    }

    /// Swagger UI configured to load the schema from `schema_path`
    pub fn serve_ui(&self) -> SwaggerUi {
        SwaggerUi::new(self.ui_path.clone()).config(Config::from(self.schema_path.clone()))
    }
}
