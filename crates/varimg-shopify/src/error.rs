use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("GraphQL errors from {context}: {}", join_messages(.messages))]
    GraphQl {
        context: String,
        messages: Vec<String>,
    },

    #[error("{context} reported user errors: {}", join_messages(.messages))]
    UserErrors {
        context: String,
        messages: Vec<String>,
    },

    #[error("{context} returned no result")]
    EmptyResult { context: String },

    #[error("invalid shop domain \"{shop}\": {reason}")]
    InvalidShopDomain { shop: String, reason: String },
}

fn join_messages(messages: &[String]) -> String {
    messages.join("; ")
}
