mod http;

pub(crate) use http::{build_client, HttpGateway};

#[cfg(test)]
pub(crate) use http::build_client_with_timeout;
